//! High-level facade crate for the `keyboard-ar-*` workspace.
//!
//! This crate provides:
//! - stable, convenient re-exports of the underlying crates
//! - the per-frame entry point that the host application calls with its
//!   camera buffers
//! - (feature-gated) conversions to and from `image` buffers and a small
//!   CLI for running the pipeline on image files.
//!
//! ## Quickstart
//!
//! ```no_run
//! use keyboard_ar::{AnnotateParams, Annotator};
//! use keyboard_ar::core::{GrayImageView, RgbaImage};
//!
//! # fn main() {
//! let annotator = Annotator::new(AnnotateParams::default());
//!
//! let gray = vec![255u8; 640 * 480];
//! let view = GrayImageView { width: 640, height: 480, data: &gray };
//! let mut frame = RgbaImage::new(640, 480);
//!
//! let report = annotator.annotate(&view, &mut frame.view_mut());
//! println!("composited {} octaves", report.octaves);
//! # }
//! ```
//!
//! ## API map
//! - `keyboard_ar::core`: image buffers, homographies, warping, compositing.
//! - `keyboard_ar::aruco`: embedded dictionary, matching, marker detection.
//! - `keyboard_ar::overlay`: marker ordering, note labels, chord geometry.

pub use keyboard_ar_aruco as aruco;
pub use keyboard_ar_core as core;
pub use keyboard_ar_overlay as overlay;

pub use keyboard_ar_aruco::{DetectParams, Marker};
pub use keyboard_ar_overlay::{KeyboardLayout, OverlayStyle};

mod compose;
mod pipeline;

pub use compose::{composite_octave, octave_frame_quad, ComposeError};
pub use pipeline::{AnnotateParams, Annotator, FrameError, FrameReport};

#[cfg(feature = "image")]
pub mod convert;
