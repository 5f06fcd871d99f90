//! Marker rendering for tests, demos and printable strips.

use crate::Dictionary;
use keyboard_ar_core::GrayImage;

/// Render marker `id` of `dict` with one black border cell per side.
///
/// Each bit becomes a `cell_px x cell_px` block; the image side is
/// `(marker_size + 2) * cell_px`. Returns `None` for an unknown id.
pub fn render_marker(dict: &Dictionary, id: u32, cell_px: usize) -> Option<GrayImage> {
    let code = *dict.codes.get(id as usize)?;
    let bits = dict.marker_size;
    let cells = bits + 2;
    let side = cells * cell_px;
    let mut data = vec![255u8; side * side];

    for cy in 0..cells {
        for cx in 0..cells {
            let is_border = cx == 0 || cy == 0 || cx + 1 == cells || cy + 1 == cells;
            let is_black = if is_border {
                true
            } else {
                let idx = (cy - 1) * bits + (cx - 1);
                (code >> idx) & 1 == 1
            };
            if !is_black {
                continue;
            }
            for yy in 0..cell_px {
                for xx in 0..cell_px {
                    data[(cy * cell_px + yy) * side + cx * cell_px + xx] = 0;
                }
            }
        }
    }

    Some(GrayImage {
        width: side,
        height: side,
        data,
    })
}
