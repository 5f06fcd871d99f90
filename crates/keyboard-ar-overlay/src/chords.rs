//! Static chord indicator geometry on the eighth-of-canvas grid.

use crate::ScaleDegree;
use nalgebra::Point2;

/// Starting and ending points of the lines drawn on the keys of one chord.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ChordLinePoints {
    pub starts: [Point2<f32>; 3],
    pub ends: [Point2<f32>; 3],
}

/// X coordinate of a key's left edge, `h8` being one horizontal eighth of
/// the canvas.
#[inline]
pub fn x_of_degree(degree: ScaleDegree, h8: f32) -> f32 {
    degree.key_index() as f32 * h8
}

/// The three keys lit for a chord, root first.
///
/// Triads wrap within the octave strip: chords rooted above F reuse the
/// low D/E keys, A reaches the top C.
pub fn triad_tones(chord: ScaleDegree) -> [ScaleDegree; 3] {
    use ScaleDegree::*;
    match chord {
        C => [C, E, G],
        D => [D, F, A],
        E => [E, G, H],
        F => [F, A, HighC],
        G => [G, H, D],
        A => [A, E, HighC],
        H | HighC => [H, F, D],
    }
}

/// Line segments for one chord.
///
/// Each segment spans one key width. Rows are staggered by a tenth of a
/// vertical eighth per chord so neighboring chords stay distinguishable
/// where their keys overlap.
pub fn chord_line_points(chord: ScaleDegree, h8: f32, v8: f32) -> ChordLinePoints {
    let row = chord.key_index().min(6) as f32;
    let y = v8 * (5.5 + 0.1 * row);

    let tones = triad_tones(chord);
    let starts = tones.map(|tone| Point2::new(x_of_degree(tone, h8), y));
    let ends = starts.map(|p| Point2::new(p.x + h8, p.y));

    ChordLinePoints { starts, ends }
}
