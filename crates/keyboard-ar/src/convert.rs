//! Conversions between `image` buffers and the core frame types.

use keyboard_ar_core as core;

/// Borrow an `image::GrayImage` as the lightweight core view type.
pub fn gray_view(img: &::image::GrayImage) -> core::GrayImageView<'_> {
    core::GrayImageView {
        width: img.width() as usize,
        height: img.height() as usize,
        data: img.as_raw(),
    }
}

/// Copy an `image::RgbaImage` into a core frame buffer.
pub fn rgba_from_image(img: &::image::RgbaImage) -> core::RgbaImage {
    core::RgbaImage {
        width: img.width() as usize,
        height: img.height() as usize,
        data: img.as_raw().clone(),
    }
}

/// Copy a core frame buffer back into an `image::RgbaImage`.
///
/// Returns `None` when the dimensions do not fit `u32` or the buffer
/// length is inconsistent.
pub fn rgba_to_image(frame: &core::RgbaImage) -> Option<::image::RgbaImage> {
    let w = u32::try_from(frame.width).ok()?;
    let h = u32::try_from(frame.height).ok()?;
    ::image::RgbaImage::from_raw(w, h, frame.data.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_image() {
        let mut frame = core::RgbaImage::new(3, 2);
        frame.put_pixel(1, 1, [10, 20, 30, 255]);

        let img = rgba_to_image(&frame).expect("convert");
        assert_eq!(img.get_pixel(1, 1).0, [10, 20, 30, 255]);

        let back = rgba_from_image(&img);
        assert_eq!(back.data, frame.data);
    }

    #[test]
    fn gray_view_borrows_without_copy() {
        let img = ::image::GrayImage::from_pixel(4, 2, ::image::Luma([77]));
        let view = gray_view(&img);
        assert_eq!(view.width, 4);
        assert_eq!(view.height, 2);
        assert!(view.data.iter().all(|&v| v == 77));
    }
}
