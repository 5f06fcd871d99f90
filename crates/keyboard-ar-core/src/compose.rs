//! Perspective warping of the overlay canvas and masked merging into the
//! camera frame.

use crate::{sample_bilinear_rgba, Homography, RgbaImage, RgbaImageViewMut};
use nalgebra::Point2;

/// Ordered quadrilateral of image points, clockwise from top-left.
pub type MarkerQuad = [Point2<f32>; 4];

/// Corner positions within a [`MarkerQuad`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CornerIndex {
    TopLeft = 0,
    TopRight = 1,
    BottomRight = 2,
    BottomLeft = 3,
}

impl CornerIndex {
    #[inline]
    pub fn get(self, quad: &MarkerQuad) -> Point2<f32> {
        quad[self as usize]
    }
}

/// Warp `src` into a `out_w x out_h` canvas through `h_dst_from_src`.
///
/// Each destination pixel is mapped back through the inverse homography and
/// sampled bilinearly; pixels mapping outside `src` stay transparent black.
/// Returns `None` when the homography is not invertible.
pub fn warp_perspective_rgba(
    src: &RgbaImage,
    h_dst_from_src: &Homography,
    out_w: usize,
    out_h: usize,
) -> Option<RgbaImage> {
    let inv = h_dst_from_src.inverse()?;
    let mut out = RgbaImage::new(out_w, out_h);

    for y in 0..out_h {
        for x in 0..out_w {
            // Sample at the pixel center.
            let pd = Point2::new(x as f32 + 0.5, y as f32 + 0.5);
            let ps = inv.apply(pd);
            let px = sample_bilinear_rgba(src, ps.x - 0.5, ps.y - 0.5);
            out.put_pixel(x as i32, y as i32, px);
        }
    }

    Some(out)
}

/// Merge a warped overlay into the frame through a binary mask.
///
/// A frame pixel is replaced wherever the warped overlay carries any color,
/// i.e. any of its RGB channels is nonzero. This is the single-pass form of
/// the classic threshold / invert / copy-masked / add sequence.
pub fn composite_masked(frame: &mut RgbaImageViewMut<'_>, warped: &RgbaImage) {
    if frame.width != warped.width || frame.height != warped.height {
        log::warn!(
            "composite size mismatch: frame {}x{}, overlay {}x{}",
            frame.width,
            frame.height,
            warped.width,
            warped.height
        );
        return;
    }

    for (dst, src) in frame.data.chunks_exact_mut(4).zip(warped.data.chunks_exact(4)) {
        if src[0] | src[1] | src[2] != 0 {
            dst.copy_from_slice(src);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: usize, height: usize, px: [u8; 4]) -> RgbaImage {
        let mut img = RgbaImage::new(width, height);
        for chunk in img.data.chunks_exact_mut(4) {
            chunk.copy_from_slice(&px);
        }
        img
    }

    #[test]
    fn identity_warp_preserves_pixels() {
        let mut src = RgbaImage::new(8, 8);
        src.put_pixel(3, 4, [200, 100, 50, 255]);

        let out = warp_perspective_rgba(&src, &Homography::identity(), 8, 8).expect("warp");
        assert_eq!(out.pixel(3, 4), [200, 100, 50, 255]);
        assert_eq!(out.pixel(0, 0), [0; 4]);
    }

    #[test]
    fn composite_replaces_only_painted_pixels() {
        let mut frame = solid(4, 4, [9, 9, 9, 255]);
        let mut overlay = RgbaImage::new(4, 4);
        overlay.put_pixel(1, 1, [0, 210, 0, 255]);

        composite_masked(&mut frame.view_mut(), &overlay);
        assert_eq!(frame.pixel(1, 1), [0, 210, 0, 255]);
        assert_eq!(frame.pixel(0, 0), [9, 9, 9, 255]);
    }

    #[test]
    fn composite_ignores_size_mismatch() {
        let mut frame = solid(4, 4, [9, 9, 9, 255]);
        let overlay = solid(3, 3, [1, 2, 3, 255]);
        composite_masked(&mut frame.view_mut(), &overlay);
        assert_eq!(frame.pixel(0, 0), [9, 9, 9, 255]);
    }

    #[test]
    fn corner_index_picks_expected_point() {
        let quad: MarkerQuad = [
            Point2::new(0.0, 0.0),
            Point2::new(10.0, 0.0),
            Point2::new(10.0, 10.0),
            Point2::new(0.0, 10.0),
        ];
        assert_eq!(CornerIndex::BottomLeft.get(&quad), Point2::new(0.0, 10.0));
        assert_eq!(CornerIndex::BottomRight.get(&quad), Point2::new(10.0, 10.0));
    }
}
