//! Overlay generation for the AR keyboard.
//!
//! Everything here is flat coordinate arithmetic on an eighth-of-canvas
//! grid: reindexing detected markers into keyboard order, inferring the
//! octave number, and painting note labels and chord indicators onto a
//! transparent canvas that is later warped onto the camera frame.

mod canvas;
mod chords;
mod glyphs;
mod palette;
mod sorting;

pub use canvas::{
    draw_chord_lines, draw_chord_names, draw_filled_circle, draw_line, draw_note_names,
    OverlayStyle,
};
pub use chords::{chord_line_points, triad_tones, x_of_degree, ChordLinePoints};
pub use glyphs::{draw_text, glyph_rows, text_width, GLYPH_COLS, GLYPH_ROWS};
pub use palette::{degree_color, ScaleDegree, TEXT_COLOR};
pub use sorting::{octave_number, KeyboardLayout, SortedMarkers, STRIP_SLOTS};
