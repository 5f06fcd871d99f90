//! Scale degrees and the fixed overlay color palette.

use serde::{Deserialize, Serialize};

/// The eight keys of one octave strip, `HighC` being the enharmonic top C.
///
/// Note naming follows the central-European convention where B natural is
/// written H.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScaleDegree {
    C,
    D,
    E,
    F,
    G,
    A,
    H,
    HighC,
}

impl ScaleDegree {
    /// The seven chord roots (everything except the top C).
    pub const CHORD_ROOTS: [ScaleDegree; 7] = [
        ScaleDegree::C,
        ScaleDegree::D,
        ScaleDegree::E,
        ScaleDegree::F,
        ScaleDegree::G,
        ScaleDegree::A,
        ScaleDegree::H,
    ];

    /// Key index within the octave, 0..=7 left to right.
    #[inline]
    pub fn key_index(self) -> usize {
        self as usize
    }

    /// Note letter as drawn on the overlay.
    pub fn letter(self) -> char {
        match self {
            ScaleDegree::C | ScaleDegree::HighC => 'C',
            ScaleDegree::D => 'D',
            ScaleDegree::E => 'E',
            ScaleDegree::F => 'F',
            ScaleDegree::G => 'G',
            ScaleDegree::A => 'A',
            ScaleDegree::H => 'H',
        }
    }
}

/// Green used for note-name labels.
pub const TEXT_COLOR: [u8; 4] = [0, 210, 0, 255];

/// Per-degree color used for chord names and chord key lines.
pub fn degree_color(degree: ScaleDegree) -> [u8; 4] {
    match degree {
        ScaleDegree::C | ScaleDegree::HighC => [239, 10, 0, 255],
        ScaleDegree::D => [0, 14, 239, 255],
        ScaleDegree::E => [250, 90, 7, 255],
        ScaleDegree::F => [240, 0, 230, 255],
        ScaleDegree::G => [240, 240, 0, 255],
        ScaleDegree::A => [117, 44, 0, 255],
        ScaleDegree::H => [0, 230, 240, 255],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_indices_are_left_to_right() {
        assert_eq!(ScaleDegree::C.key_index(), 0);
        assert_eq!(ScaleDegree::H.key_index(), 6);
        assert_eq!(ScaleDegree::HighC.key_index(), 7);
    }

    #[test]
    fn both_c_keys_share_letter_and_color() {
        assert_eq!(ScaleDegree::C.letter(), ScaleDegree::HighC.letter());
        assert_eq!(
            degree_color(ScaleDegree::C),
            degree_color(ScaleDegree::HighC)
        );
    }
}
