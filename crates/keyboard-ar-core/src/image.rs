//! Grayscale and RGBA frame buffers.

/// Borrowed grayscale frame, row-major `len = w*h`.
#[derive(Clone, Copy, Debug)]
pub struct GrayImageView<'a> {
    pub width: usize,
    pub height: usize,
    pub data: &'a [u8],
}

/// Owned grayscale image.
#[derive(Clone, Debug)]
pub struct GrayImage {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl GrayImage {
    pub fn view(&self) -> GrayImageView<'_> {
        GrayImageView {
            width: self.width,
            height: self.height,
            data: &self.data,
        }
    }
}

/// Owned RGBA image, row-major, 4 bytes per pixel.
///
/// Used both for camera frames and for the transient overlay canvas. A new
/// canvas starts fully transparent black, so anything painted onto it is
/// exactly what the compositing mask later keys on.
#[derive(Clone, Debug)]
pub struct RgbaImage {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl RgbaImage {
    /// Transparent black canvas.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0u8; width * height * 4],
        }
    }

    pub fn view_mut(&mut self) -> RgbaImageViewMut<'_> {
        RgbaImageViewMut {
            width: self.width,
            height: self.height,
            data: &mut self.data,
        }
    }

    /// Wrap an existing RGBA buffer. Returns `None` on a length mismatch.
    pub fn from_raw(width: usize, height: usize, data: Vec<u8>) -> Option<Self> {
        if data.len() != width * height * 4 {
            return None;
        }
        Some(Self {
            width,
            height,
            data,
        })
    }

    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// Pixel at `(x, y)`, zero (transparent black) outside the frame.
    #[inline]
    pub fn pixel(&self, x: i32, y: i32) -> [u8; 4] {
        if !self.in_bounds(x, y) {
            return [0; 4];
        }
        let i = (y as usize * self.width + x as usize) * 4;
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }

    #[inline]
    pub fn put_pixel(&mut self, x: i32, y: i32, px: [u8; 4]) {
        if !self.in_bounds(x, y) {
            return;
        }
        let i = (y as usize * self.width + x as usize) * 4;
        self.data[i..i + 4].copy_from_slice(&px);
    }
}

/// Mutably borrowed RGBA frame, for hosts that own the pixel buffer.
///
/// Carries the same painting surface as [`RgbaImage`] without taking
/// ownership, so per-frame entry points can annotate a caller's buffer in
/// place.
#[derive(Debug)]
pub struct RgbaImageViewMut<'a> {
    pub width: usize,
    pub height: usize,
    pub data: &'a mut [u8],
}

impl RgbaImageViewMut<'_> {
    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// Pixel at `(x, y)`, zero (transparent black) outside the frame.
    #[inline]
    pub fn pixel(&self, x: i32, y: i32) -> [u8; 4] {
        if !self.in_bounds(x, y) {
            return [0; 4];
        }
        let i = (y as usize * self.width + x as usize) * 4;
        [
            self.data[i],
            self.data[i + 1],
            self.data[i + 2],
            self.data[i + 3],
        ]
    }

    #[inline]
    pub fn put_pixel(&mut self, x: i32, y: i32, px: [u8; 4]) {
        if !self.in_bounds(x, y) {
            return;
        }
        let i = (y as usize * self.width + x as usize) * 4;
        self.data[i..i + 4].copy_from_slice(&px);
    }
}

/// Bilinear sample of all four RGBA channels, transparent black outside.
#[inline]
pub fn sample_bilinear_rgba(src: &RgbaImage, x: f32, y: f32) -> [u8; 4] {
    let x0 = x.floor() as i32;
    let y0 = y.floor() as i32;
    let fx = x - x0 as f32;
    let fy = y - y0 as f32;

    let p00 = src.pixel(x0, y0);
    let p10 = src.pixel(x0 + 1, y0);
    let p01 = src.pixel(x0, y0 + 1);
    let p11 = src.pixel(x0 + 1, y0 + 1);

    let mut out = [0u8; 4];
    for c in 0..4 {
        let a = p00[c] as f32 + fx * (p10[c] as f32 - p00[c] as f32);
        let b = p01[c] as f32 + fx * (p11[c] as f32 - p01[c] as f32);
        out[c] = (a + fy * (b - a)).clamp(0.0, 255.0) as u8;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_access_is_zero_outside() {
        let img = RgbaImage::new(4, 3);
        assert_eq!(img.pixel(-1, 0), [0; 4]);
        assert_eq!(img.pixel(0, 3), [0; 4]);
    }

    #[test]
    fn put_then_get_round_trips() {
        let mut img = RgbaImage::new(4, 3);
        img.put_pixel(2, 1, [10, 20, 30, 255]);
        assert_eq!(img.pixel(2, 1), [10, 20, 30, 255]);
        // Out-of-bounds writes are dropped.
        img.put_pixel(7, 7, [1, 1, 1, 1]);
    }

    #[test]
    fn from_raw_rejects_bad_length() {
        assert!(RgbaImage::from_raw(2, 2, vec![0u8; 15]).is_none());
        assert!(RgbaImage::from_raw(2, 2, vec![0u8; 16]).is_some());
    }

    #[test]
    fn bilinear_interpolates_between_neighbors() {
        let mut img = RgbaImage::new(2, 1);
        img.put_pixel(1, 0, [200, 200, 200, 200]);
        let px = sample_bilinear_rgba(&img, 0.5, 0.0);
        assert_eq!(px, [100, 100, 100, 100]);
    }

    #[test]
    fn view_shares_the_owned_buffer() {
        let mut img = RgbaImage::new(4, 3);
        {
            let mut view = img.view_mut();
            view.put_pixel(2, 1, [10, 20, 30, 255]);
            assert_eq!(view.pixel(2, 1), [10, 20, 30, 255]);
            assert_eq!(view.pixel(-1, 0), [0; 4]);
        }
        assert_eq!(img.pixel(2, 1), [10, 20, 30, 255]);
    }
}
