//! The per-frame entry point: detect markers, sort them into keyboard
//! order and composite one overlay per octave onto the camera frame.

use crate::compose::{composite_octave, octave_frame_quad};
use keyboard_ar_aruco::{detect_markers, DetectParams, Marker, Matcher, DICT_4X4_50};
use keyboard_ar_core::{GrayImageView, RgbaImage, RgbaImageViewMut};
use keyboard_ar_overlay::{
    draw_chord_lines, draw_chord_names, draw_note_names, octave_number, KeyboardLayout,
    OverlayStyle, SortedMarkers,
};
use serde::{Deserialize, Serialize};

#[cfg(feature = "tracing")]
use tracing::instrument;

/// Errors produced by the raw-buffer entry point.
#[derive(thiserror::Error, Debug)]
pub enum FrameError {
    #[error("invalid grayscale buffer length (expected {expected} bytes, got {got})")]
    InvalidGrayBuffer { expected: usize, got: usize },

    #[error("invalid RGBA buffer length (expected {expected} bytes, got {got})")]
    InvalidRgbaBuffer { expected: usize, got: usize },
}

/// Everything the per-frame pipeline is parameterized by.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AnnotateParams {
    #[serde(default)]
    pub detect: DetectParams,
    #[serde(default)]
    pub layout: KeyboardLayout,
    #[serde(default)]
    pub style: OverlayStyle,
}

/// What happened to one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameReport {
    /// Markers detected in the frame.
    pub markers: usize,
    /// Octave regions successfully composited.
    pub octaves: usize,
}

/// Per-frame annotator.
///
/// Holds the dictionary matcher so its rotation tables are built once, not
/// per frame.
pub struct Annotator {
    params: AnnotateParams,
    matcher: Matcher,
}

impl Annotator {
    pub fn new(params: AnnotateParams) -> Self {
        let matcher = Matcher::new(DICT_4X4_50, params.detect.max_hamming);
        Self { params, matcher }
    }

    #[inline]
    pub fn params(&self) -> &AnnotateParams {
        &self.params
    }

    /// Detect markers in `gray` and composite the keyboard overlay into
    /// `frame`. Both buffers come from the same camera image.
    ///
    /// With fewer than four markers no octave can be located and the frame
    /// is left untouched.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip(self, gray, frame), fields(width = gray.width, height = gray.height))
    )]
    pub fn annotate(&self, gray: &GrayImageView<'_>, frame: &mut RgbaImageViewMut<'_>) -> FrameReport {
        let markers = detect_markers(gray, &self.params.detect, &self.matcher);
        log::debug!("detected {} markers", markers.len());

        let mut report = FrameReport {
            markers: markers.len(),
            octaves: 0,
        };

        let ids: Vec<u32> = markers.iter().map(|m| m.id).collect();
        let Some(sorted) = SortedMarkers::from_ids(&ids) else {
            return report;
        };

        let first_octave = octave_number(sorted.min_id(), self.params.layout.keys_count);

        draw_chord_names(frame, &self.params.style);
        report.octaves = self.composite_octaves(&markers, &sorted, first_octave, frame);

        report
    }

    /// Composite one overlay per octave window; returns the number of
    /// octaves painted. A failed homography stops the frame.
    fn composite_octaves(
        &self,
        markers: &[Marker],
        sorted: &SortedMarkers,
        first_octave: u32,
        frame: &mut RgbaImageViewMut<'_>,
    ) -> usize {
        let mut octave = first_octave;
        let mut painted = 0;

        for window in sorted.octave_windows() {
            let mut overlay = RgbaImage::new(frame.width, frame.height);
            draw_note_names(&mut overlay, octave, &self.params.style);
            draw_chord_lines(&mut overlay, &self.params.style);
            octave += 1;

            let quad = octave_frame_quad(markers, window);
            if let Err(err) = composite_octave(frame, &overlay, &quad) {
                log::error!("octave compositing failed: {err}");
                break;
            }
            painted += 1;
        }

        painted
    }

    /// Raw-buffer variant for host applications.
    ///
    /// `gray` is `width * height` luminance bytes, `rgba` is the matching
    /// `width * height * 4` color buffer, annotated in place without
    /// copying.
    pub fn annotate_raw(
        &self,
        width: usize,
        height: usize,
        gray: &[u8],
        rgba: &mut [u8],
    ) -> Result<FrameReport, FrameError> {
        let expected = width * height;
        if gray.len() != expected {
            return Err(FrameError::InvalidGrayBuffer {
                expected,
                got: gray.len(),
            });
        }
        if rgba.len() != expected * 4 {
            return Err(FrameError::InvalidRgbaBuffer {
                expected: expected * 4,
                got: rgba.len(),
            });
        }

        let view = GrayImageView {
            width,
            height,
            data: gray,
        };
        let mut frame = RgbaImageViewMut {
            width,
            height,
            data: rgba,
        };
        Ok(self.annotate(&view, &mut frame))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::Point2;

    #[test]
    fn raw_entry_validates_buffer_lengths() {
        let annotator = Annotator::new(AnnotateParams::default());

        let gray = vec![255u8; 10 * 10];
        let mut rgba = vec![0u8; 10 * 10 * 4];
        assert!(annotator.annotate_raw(10, 10, &gray, &mut rgba).is_ok());

        let short_gray = vec![255u8; 99];
        assert!(matches!(
            annotator.annotate_raw(10, 10, &short_gray, &mut rgba),
            Err(FrameError::InvalidGrayBuffer { expected: 100, got: 99 })
        ));

        let mut short_rgba = vec![0u8; 399];
        assert!(matches!(
            annotator.annotate_raw(10, 10, &gray, &mut short_rgba),
            Err(FrameError::InvalidRgbaBuffer { .. })
        ));
    }

    #[test]
    fn empty_frame_reports_nothing_and_leaves_frame_alone() {
        let annotator = Annotator::new(AnnotateParams::default());
        let gray = vec![255u8; 64 * 64];
        let view = GrayImageView {
            width: 64,
            height: 64,
            data: &gray,
        };
        let mut frame = RgbaImage::new(64, 64);
        let before = frame.data.clone();

        let report = annotator.annotate(&view, &mut frame.view_mut());
        assert_eq!(report, FrameReport::default());
        assert_eq!(frame.data, before);
    }

    fn square_marker(id: u32, x: f32, y: f32, side: f32) -> Marker {
        Marker {
            id,
            corners: [
                Point2::new(x, y),
                Point2::new(x + side, y),
                Point2::new(x + side, y + side),
                Point2::new(x, y + side),
            ],
        }
    }

    #[test]
    fn two_clean_windows_paint_two_octaves() {
        let annotator = Annotator::new(AnnotateParams::default());
        let markers = vec![
            square_marker(1, 10.0, 10.0, 20.0),
            square_marker(2, 10.0, 100.0, 20.0),
            square_marker(3, 200.0, 10.0, 20.0),
            square_marker(4, 200.0, 100.0, 20.0),
            square_marker(5, 400.0, 10.0, 20.0),
            square_marker(6, 400.0, 100.0, 20.0),
        ];
        let sorted = SortedMarkers::from_ids(&[1, 2, 3, 4, 5, 6]).expect("six markers");
        let mut frame = RgbaImage::new(640, 480);

        let painted = annotator.composite_octaves(&markers, &sorted, 2, &mut frame.view_mut());
        assert_eq!(painted, 2);
    }

    #[test]
    fn failed_octave_homography_stops_the_frame() {
        let annotator = Annotator::new(AnnotateParams::default());

        // The first window's quad collapses to a point; the second window
        // reads the bottom-left corners of markers 3 and 4, which stay sane,
        // so it would composite if the loop kept going.
        let collapsed = Marker {
            id: 0,
            corners: [Point2::new(50.0, 50.0); 4],
        };
        let mut m3 = square_marker(3, 200.0, 10.0, 20.0);
        let mut m4 = square_marker(4, 200.0, 100.0, 20.0);
        m3.corners[2] = Point2::new(50.0, 50.0);
        m4.corners[2] = Point2::new(50.0, 50.0);

        let markers = vec![
            Marker { id: 1, ..collapsed },
            Marker { id: 2, ..collapsed },
            m3,
            m4,
            square_marker(5, 400.0, 10.0, 20.0),
            square_marker(6, 400.0, 100.0, 20.0),
        ];
        let sorted = SortedMarkers::from_ids(&[1, 2, 3, 4, 5, 6]).expect("six markers");
        let mut frame = RgbaImage::new(640, 480);

        let painted = annotator.composite_octaves(&markers, &sorted, 2, &mut frame.view_mut());
        assert_eq!(painted, 0, "compositing must stop at the failed octave");
        assert!(frame.data.iter().all(|&v| v == 0), "frame must stay untouched");
    }

    #[cfg(feature = "cli")]
    #[test]
    fn params_serde_round_trip() {
        let params = AnnotateParams::default();
        let json = serde_json::to_string(&params).expect("serialize");
        let back: AnnotateParams = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back.layout.keys_count, 49);
        assert_eq!(back.detect.max_hamming, params.detect.max_hamming);
    }
}
