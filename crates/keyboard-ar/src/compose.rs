//! Mapping overlay canvases onto octave regions of the camera frame.

use keyboard_ar_aruco::Marker;
use keyboard_ar_core::{
    composite_masked, homography_from_4pt, warp_perspective_rgba, CornerIndex, MarkerQuad,
    RgbaImage, RgbaImageViewMut,
};
use nalgebra::Point2;

/// Errors from per-octave compositing.
#[derive(thiserror::Error, Debug)]
pub enum ComposeError {
    #[error("homography estimation failed for the octave quad")]
    HomographyFailed,
    #[error("octave homography is not invertible")]
    NotInvertible,
}

/// Overlay canvas corners in `[TL, BL, TR, BR]` order.
fn overlay_corners(width: usize, height: usize) -> MarkerQuad {
    let w = width as f32;
    let h = height as f32;
    [
        Point2::new(0.0, 0.0),
        Point2::new(0.0, h),
        Point2::new(w, 0.0),
        Point2::new(w, h),
    ]
}

/// Frame-space quad of one octave window, in the same `[TL, BL, TR, BR]`
/// order as [`overlay_corners`].
///
/// The keyboard strip carries markers in vertical pairs; an octave spans
/// two pairs. The region's left edge runs along the bottom-left corners of
/// the left pair, the right edge along the bottom-right corners of the
/// right pair.
pub fn octave_frame_quad(markers: &[Marker], window: [usize; 4]) -> MarkerQuad {
    [
        CornerIndex::BottomLeft.get(&markers[window[0]].corners),
        CornerIndex::BottomLeft.get(&markers[window[1]].corners),
        CornerIndex::BottomRight.get(&markers[window[2]].corners),
        CornerIndex::BottomRight.get(&markers[window[3]].corners),
    ]
}

/// Warp `overlay` onto `quad` and merge it into `frame` through the binary
/// mask of painted pixels.
pub fn composite_octave(
    frame: &mut RgbaImageViewMut<'_>,
    overlay: &RgbaImage,
    quad: &MarkerQuad,
) -> Result<(), ComposeError> {
    let src = overlay_corners(overlay.width, overlay.height);
    let h = homography_from_4pt(&src, quad).ok_or(ComposeError::HomographyFailed)?;
    let warped = warp_perspective_rgba(overlay, &h, frame.width, frame.height)
        .ok_or(ComposeError::NotInvertible)?;
    composite_masked(frame, &warped);
    Ok(())
}
