//! Reindexing detected marker ids into canonical keyboard order.

use serde::{Deserialize, Serialize};

/// Number of marker slots along the keyboard strip.
///
/// A 49-key instrument carries markers 1..=16 in two rows above the keys;
/// dictionary ids beyond the strip cannot belong to the keyboard.
pub const STRIP_SLOTS: usize = 17;

/// Physical keyboard description.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct KeyboardLayout {
    /// Number of keys on the instrument (49, 61, 76 or 88).
    pub keys_count: u32,
}

impl Default for KeyboardLayout {
    fn default() -> Self {
        Self { keys_count: 49 }
    }
}

/// Detected markers reindexed by marker id.
///
/// `positions()[k]` is the detection index of the k-th marker in keyboard
/// order (ascending id); `min_id()` is the smallest detected id, which pins
/// the strip's base octave.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SortedMarkers {
    positions: Vec<usize>,
    min_id: u32,
}

impl SortedMarkers {
    /// Reindex detection-order marker ids into keyboard order.
    ///
    /// Ids outside the strip are skipped with a warning. Returns `None`
    /// when fewer than four usable markers remain, since a single octave
    /// region needs four corners.
    pub fn from_ids(ids: &[u32]) -> Option<Self> {
        let mut slots = [None::<usize>; STRIP_SLOTS];
        let mut min_id = STRIP_SLOTS as u32;

        for (det_index, &id) in ids.iter().enumerate() {
            let Some(slot) = slots.get_mut(id as usize) else {
                log::warn!("marker id {id} is outside the keyboard strip, skipping");
                continue;
            };
            if slot.replace(det_index).is_some() {
                log::warn!("marker id {id} detected twice, keeping the later detection");
            }
            min_id = min_id.min(id);
        }

        let positions: Vec<usize> = slots.iter().filter_map(|s| *s).collect();
        if positions.len() < 4 {
            return None;
        }
        Some(Self { positions, min_id })
    }

    /// Detection indices in keyboard order.
    #[inline]
    pub fn positions(&self) -> &[usize] {
        &self.positions
    }

    /// Smallest detected marker id.
    #[inline]
    pub fn min_id(&self) -> u32 {
        self.min_id
    }

    /// Four-marker octave windows; adjacent octaves share a marker pair.
    pub fn octave_windows(&self) -> impl Iterator<Item = [usize; 4]> + '_ {
        (0..)
            .step_by(2)
            .take_while(|i| i + 3 < self.positions.len())
            .map(|i| {
                [
                    self.positions[i],
                    self.positions[i + 1],
                    self.positions[i + 2],
                    self.positions[i + 3],
                ]
            })
    }
}

/// Octave number implied by the smallest detected marker id.
///
/// The formulas come from polynomial interpolation over (marker id, octave)
/// pairs for each instrument size.
pub fn octave_number(min_id: u32, keys_count: u32) -> u32 {
    match keys_count {
        88 => (min_id + 1) / 2,
        // 49, 61 and 76 keys share a strip layout; also the fallback.
        _ => (min_id + 3) / 2,
    }
}
