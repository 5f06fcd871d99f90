//! Matching observed bit codes against a dictionary.

use crate::Dictionary;

/// Result of looking an observed code up in the dictionary.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Match {
    /// Marker id in the dictionary.
    pub id: u32,
    /// Quarter turns such that `observed == rotate_code_u64(code, n, rotation)`.
    pub rotation: u8,
    /// Hamming distance after rotation.
    pub hamming: u8,
}

/// Precomputed lookup over a dictionary and the four rotations of every code.
///
/// A lookup is 200 XOR/popcount pairs for the 50-entry dictionary, cheap next
/// to sampling the bit grid.
#[derive(Clone, Debug)]
pub struct Matcher {
    dict: Dictionary,
    max_hamming: u8,
    table: Vec<(u32, u8, u64)>,
}

impl Matcher {
    /// Build a matcher for the given dictionary and Hamming threshold.
    pub fn new(dict: Dictionary, max_hamming: u8) -> Self {
        assert!(
            dict.bit_count() <= 64,
            "marker_size {} exceeds the 64-bit code representation",
            dict.marker_size
        );

        let mut table = Vec::with_capacity(dict.len() * 4);
        for (id, &base) in dict.codes.iter().enumerate() {
            for rot in 0u8..4 {
                table.push((id as u32, rot, rotate_code_u64(base, dict.marker_size, rot)));
            }
        }

        Self {
            dict,
            max_hamming,
            table,
        }
    }

    /// Dictionary used by this matcher.
    #[inline]
    pub fn dictionary(&self) -> Dictionary {
        self.dict
    }

    /// Best match within the Hamming threshold, or `None`.
    pub fn match_code(&self, observed: u64) -> Option<Match> {
        let mut best: Option<Match> = None;

        for &(id, rotation, code) in &self.table {
            let hamming = (observed ^ code).count_ones() as u8;
            if hamming > self.max_hamming {
                continue;
            }
            if best.map_or(true, |b| hamming < b.hamming) {
                best = Some(Match {
                    id,
                    rotation,
                    hamming,
                });
                if hamming == 0 {
                    break;
                }
            }
        }

        best
    }
}

/// Rotate a row-major code (`bit index = y * n + x`) clockwise by `rot`
/// quarter turns.
pub fn rotate_code_u64(code: u64, n: usize, rot: u8) -> u64 {
    let mut out = code;
    for _ in 0..(rot & 3) {
        out = turn_cw(out, n);
    }
    out
}

fn turn_cw(code: u64, n: usize) -> u64 {
    let mut out = 0u64;
    for y in 0..n {
        for x in 0..n {
            // Destination (x, y) reads source (y, n - 1 - x).
            if code >> ((n - 1 - x) * n + y) & 1 == 1 {
                out |= 1 << (y * n + x);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DICT_4X4_50;

    #[test]
    fn rotate_four_times_is_identity() {
        let code = 0x0123_4567_89ab_cdef_u64;
        let n = 8;
        let mut r = code;
        for _ in 0..4 {
            r = rotate_code_u64(r, n, 1);
        }
        assert_eq!(code, r);
    }

    #[test]
    fn matcher_finds_rotated_code() {
        let matcher = Matcher::new(DICT_4X4_50, 0);

        let base = DICT_4X4_50.codes[7];
        let observed = rotate_code_u64(base, DICT_4X4_50.marker_size, 3);
        let m = matcher.match_code(observed).expect("match");
        assert_eq!(m.id, 7);
        assert_eq!(m.rotation, 3);
        assert_eq!(m.hamming, 0);
    }

    #[test]
    fn matcher_tolerates_one_flipped_bit() {
        let matcher = Matcher::new(DICT_4X4_50, 1);
        let observed = DICT_4X4_50.codes[3] ^ 0b100;
        let m = matcher.match_code(observed).expect("match");
        assert_eq!(m.id, 3);
        assert_eq!(m.hamming, 1);
    }

    #[test]
    fn matcher_rejects_far_codes() {
        let matcher = Matcher::new(DICT_4X4_50, 0);
        // Flip enough bits that no dictionary entry is within threshold.
        let observed = DICT_4X4_50.codes[0] ^ 0xffff;
        assert!(matcher.match_code(observed).is_none());
    }
}
