//! ArUco marker dictionary, matching and detection for the AR keyboard.
//!
//! This crate covers:
//! - the embedded `DICT_4X4_50` dictionary (compiled into the binary),
//! - matching observed marker codes against it under rotation,
//! - detecting markers in a full grayscale camera frame,
//! - rendering markers for tests, demos and printable strips.
//!
//! Callers treat detection as a black box: a grayscale frame goes in,
//! marker ids with clockwise-from-top-left corner quads come out.

mod detect;
mod dictionary;
mod matcher;
mod render;
mod threshold;

pub use detect::{detect_markers, DetectParams, Marker};
pub use dictionary::{Dictionary, DICT_4X4_50};
pub use matcher::{rotate_code_u64, Match, Matcher};
pub use render::render_marker;
