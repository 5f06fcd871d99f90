//! Embedded 5x7 bitmap glyphs for overlay labels.
//!
//! Only the characters the overlay actually uses are included: the note
//! letters and the octave digits. Glyphs scale by integer pixel
//! replication, which survives the later perspective warp well enough at
//! camera resolutions.

use keyboard_ar_core::RgbaImageViewMut;

/// Glyph cell width in font pixels.
pub const GLYPH_COLS: usize = 5;
/// Glyph cell height in font pixels.
pub const GLYPH_ROWS: usize = 7;

/// Horizontal advance between characters, in font pixels.
const ADVANCE: usize = GLYPH_COLS + 1;

/// Row bitmaps for a supported character, bit 4 is the leftmost column.
pub fn glyph_rows(c: char) -> Option<[u8; GLYPH_ROWS]> {
    let rows = match c {
        '0' => [0x0e, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0e],
        '1' => [0x04, 0x0c, 0x04, 0x04, 0x04, 0x04, 0x0e],
        '2' => [0x0e, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1f],
        '3' => [0x1f, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0e],
        '4' => [0x02, 0x06, 0x0a, 0x12, 0x1f, 0x02, 0x02],
        '5' => [0x1f, 0x10, 0x1e, 0x01, 0x01, 0x11, 0x0e],
        '6' => [0x06, 0x08, 0x10, 0x1e, 0x11, 0x11, 0x0e],
        '7' => [0x1f, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08],
        '8' => [0x0e, 0x11, 0x11, 0x0e, 0x11, 0x11, 0x0e],
        '9' => [0x0e, 0x11, 0x11, 0x0f, 0x01, 0x02, 0x0c],
        'A' => [0x0e, 0x11, 0x11, 0x1f, 0x11, 0x11, 0x11],
        'C' => [0x0e, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0e],
        'D' => [0x1e, 0x11, 0x11, 0x11, 0x11, 0x11, 0x1e],
        'E' => [0x1f, 0x10, 0x1e, 0x10, 0x10, 0x10, 0x1f],
        'F' => [0x1f, 0x10, 0x1e, 0x10, 0x10, 0x10, 0x10],
        'G' => [0x0e, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0f],
        'H' => [0x11, 0x11, 0x11, 0x1f, 0x11, 0x11, 0x11],
        _ => return None,
    };
    Some(rows)
}

/// Painted width of `text` at `scale`, in pixels.
pub fn text_width(text: &str, scale: usize) -> usize {
    let n = text.chars().count();
    if n == 0 {
        return 0;
    }
    (n * ADVANCE - 1) * scale
}

/// Paint `text` with its top-left corner at `(x, y)`.
///
/// Unsupported characters advance the cursor without painting.
pub fn draw_text(
    canvas: &mut RgbaImageViewMut<'_>,
    x: i32,
    y: i32,
    text: &str,
    scale: usize,
    color: [u8; 4],
) {
    let scale = scale.max(1);
    let mut cursor = x;

    for c in text.chars() {
        if let Some(rows) = glyph_rows(c) {
            for (ry, row) in rows.iter().enumerate() {
                for rx in 0..GLYPH_COLS {
                    if row >> (GLYPH_COLS - 1 - rx) & 1 == 0 {
                        continue;
                    }
                    for dy in 0..scale {
                        for dx in 0..scale {
                            canvas.put_pixel(
                                cursor + (rx * scale + dx) as i32,
                                y + (ry * scale + dy) as i32,
                                color,
                            );
                        }
                    }
                }
            }
        }
        cursor += (ADVANCE * scale) as i32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn covers_note_letters_and_digits() {
        for c in "CDEFGAH0123456789".chars() {
            assert!(glyph_rows(c).is_some(), "missing glyph for {c:?}");
        }
        assert!(glyph_rows('B').is_none());
    }

    use keyboard_ar_core::RgbaImage;

    #[test]
    fn draws_within_the_glyph_cell() {
        let mut canvas = RgbaImage::new(32, 32);
        draw_text(&mut canvas.view_mut(), 2, 3, "C", 2, [0, 210, 0, 255]);

        let mut painted = 0usize;
        for y in 0..32 {
            for x in 0..32 {
                if canvas.pixel(x, y) != [0; 4] {
                    painted += 1;
                    assert!((2..2 + (GLYPH_COLS * 2) as i32).contains(&x));
                    assert!((3..3 + (GLYPH_ROWS * 2) as i32).contains(&y));
                }
            }
        }
        assert!(painted > 0);
    }

    #[test]
    fn text_width_accounts_for_advance() {
        assert_eq!(text_width("", 3), 0);
        assert_eq!(text_width("C", 1), GLYPH_COLS);
        assert_eq!(text_width("C4", 2), (2 * ADVANCE - 1) * 2);
    }

    #[test]
    fn clipping_is_silent() {
        let mut canvas = RgbaImage::new(8, 8);
        draw_text(&mut canvas.view_mut(), 6, 6, "H8", 3, [255, 255, 255, 255]);
    }
}
