//! Core types and utilities for the AR keyboard pipeline.
//!
//! This crate is intentionally small and purely geometric. It does *not*
//! depend on any concrete marker detector or on an image-IO crate; frames
//! are plain row-major byte buffers.

mod compose;
mod homography;
mod image;
mod logger;

pub use compose::{composite_masked, warp_perspective_rgba, CornerIndex, MarkerQuad};
pub use homography::{homography_from_4pt, Homography};
pub use image::{sample_bilinear_rgba, GrayImage, GrayImageView, RgbaImage, RgbaImageViewMut};

#[cfg(feature = "tracing")]
pub use logger::init_tracing;

pub use logger::init_with_level;
