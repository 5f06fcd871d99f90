//! Overlay canvas painters.

use crate::chords::chord_line_points;
use crate::glyphs::draw_text;
use crate::palette::{degree_color, ScaleDegree, TEXT_COLOR};
use keyboard_ar_core::{RgbaImage, RgbaImageViewMut};
use nalgebra::Point2;
use serde::{Deserialize, Serialize};

/// Sizing knobs for the painted overlay.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct OverlayStyle {
    /// Glyph scale for note-name labels.
    pub note_text_scale: usize,
    /// Glyph scale for chord letters on the frame top.
    pub chord_text_scale: usize,
    /// Chord indicator line thickness in pixels.
    pub line_thickness: u32,
    /// Radius of the white root-note circle.
    pub root_circle_radius: i32,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            note_text_scale: 4,
            chord_text_scale: 3,
            line_thickness: 3,
            root_circle_radius: 5,
        }
    }
}

/// Draw a straight line with a square brush of side `thickness`.
pub fn draw_line(
    canvas: &mut RgbaImageViewMut<'_>,
    a: Point2<f32>,
    b: Point2<f32>,
    color: [u8; 4],
    thickness: u32,
) {
    let dx = b.x - a.x;
    let dy = b.y - a.y;
    let len = (dx * dx + dy * dy).sqrt();
    let steps = (len.ceil() as usize * 2).max(1);
    let half = thickness as i32 / 2;

    for s in 0..=steps {
        let t = s as f32 / steps as f32;
        let cx = (a.x + t * dx).round() as i32;
        let cy = (a.y + t * dy).round() as i32;
        for oy in -half..=half {
            for ox in -half..=half {
                canvas.put_pixel(cx + ox, cy + oy, color);
            }
        }
    }
}

/// Draw a filled circle.
pub fn draw_filled_circle(
    canvas: &mut RgbaImageViewMut<'_>,
    center: Point2<f32>,
    radius: i32,
    color: [u8; 4],
) {
    let cx = center.x.round() as i32;
    let cy = center.y.round() as i32;
    let r2 = radius * radius;
    for oy in -radius..=radius {
        for ox in -radius..=radius {
            if ox * ox + oy * oy <= r2 {
                canvas.put_pixel(cx + ox, cy + oy, color);
            }
        }
    }
}

/// Label the eight keys of one octave along the bottom eighth of the canvas.
///
/// The trailing C belongs to the next octave up and is numbered accordingly.
pub fn draw_note_names(canvas: &mut RgbaImage, octave: u32, style: &OverlayStyle) {
    let h8 = canvas.width as f32 / 8.0;
    let v8 = canvas.height as f32 / 8.0;

    let mut x = h8 / 8.0;
    let y = canvas.height as f32 - v8;
    let mut view = canvas.view_mut();

    for degree in [
        ScaleDegree::C,
        ScaleDegree::D,
        ScaleDegree::E,
        ScaleDegree::F,
        ScaleDegree::G,
        ScaleDegree::A,
        ScaleDegree::H,
        ScaleDegree::HighC,
    ] {
        let n = if degree == ScaleDegree::HighC {
            octave + 1
        } else {
            octave
        };
        let label = format!("{}{}", degree.letter(), n);
        draw_text(
            &mut view,
            x.round() as i32,
            y.round() as i32,
            &label,
            style.note_text_scale,
            TEXT_COLOR,
        );
        x += h8;
    }
}

/// Draw the seven chord letters across the top eighth row.
///
/// Unlike the key labels this goes straight onto the camera frame, so the
/// letters stay upright and legible regardless of keyboard perspective.
pub fn draw_chord_names(frame: &mut RgbaImageViewMut<'_>, style: &OverlayStyle) {
    let h8 = frame.width as f32 / 8.0;
    let v8 = frame.height as f32 / 8.0;

    for (i, chord) in ScaleDegree::CHORD_ROOTS.iter().enumerate() {
        let x = h8 * (1.0 + i as f32);
        draw_text(
            frame,
            x.round() as i32,
            v8.round() as i32,
            &chord.letter().to_string(),
            style.chord_text_scale,
            degree_color(*chord),
        );
    }
}

/// Draw the chord indicator lines, one color-coded row of three segments
/// per chord, with a white circle marking the root key.
pub fn draw_chord_lines(canvas: &mut RgbaImage, style: &OverlayStyle) {
    let h8 = canvas.width as f32 / 8.0;
    let v8 = canvas.height as f32 / 8.0;
    let mut view = canvas.view_mut();

    for chord in ScaleDegree::CHORD_ROOTS {
        let pts = chord_line_points(chord, h8, v8);
        let color = degree_color(chord);

        for (j, (start, end)) in pts.starts.iter().zip(pts.ends.iter()).enumerate() {
            draw_line(&mut view, *start, *end, color, style.line_thickness);
            if j == 0 {
                let mid = Point2::new((start.x + end.x) / 2.0, start.y);
                draw_filled_circle(&mut view, mid, style.root_circle_radius, [255, 255, 255, 255]);
            }
        }
    }
}
