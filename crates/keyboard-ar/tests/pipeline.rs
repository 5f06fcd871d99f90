//! End-to-end pipeline test on a synthetic camera frame.

use keyboard_ar::aruco::{render_marker, DICT_4X4_50};
use keyboard_ar::core::{GrayImage, GrayImageView, RgbaImage};
use keyboard_ar::overlay::{degree_color, ScaleDegree};
use keyboard_ar::{AnnotateParams, Annotator};

const FRAME_W: usize = 640;
const FRAME_H: usize = 480;
const FRAME_COLOR: [u8; 4] = [120, 120, 120, 255];

fn blit(dst: &mut GrayImage, src: &GrayImage, ox: usize, oy: usize) {
    for y in 0..src.height {
        for x in 0..src.width {
            dst.data[(oy + y) * dst.width + ox + x] = src.data[y * src.width + x];
        }
    }
}

/// White scene with markers placed in two vertical pairs, one octave apart.
fn synthetic_scene(ids: &[(u32, usize, usize)]) -> GrayImage {
    let mut gray = GrayImage {
        width: FRAME_W,
        height: FRAME_H,
        data: vec![255u8; FRAME_W * FRAME_H],
    };
    for &(id, ox, oy) in ids {
        let marker = render_marker(&DICT_4X4_50, id, 10).expect("render marker");
        blit(&mut gray, &marker, ox, oy);
    }
    gray
}

fn solid_frame() -> RgbaImage {
    let mut frame = RgbaImage::new(FRAME_W, FRAME_H);
    for chunk in frame.data.chunks_exact_mut(4) {
        chunk.copy_from_slice(&FRAME_COLOR);
    }
    frame
}

fn changed_pixels(frame: &RgbaImage) -> usize {
    frame
        .data
        .chunks_exact(4)
        .filter(|px| px != &FRAME_COLOR)
        .count()
}

#[test]
fn one_octave_is_detected_and_composited() {
    let gray = synthetic_scene(&[(1, 60, 100), (2, 60, 300), (3, 500, 100), (4, 500, 300)]);
    let mut frame = solid_frame();

    let annotator = Annotator::new(AnnotateParams::default());
    let view = GrayImageView {
        width: FRAME_W,
        height: FRAME_H,
        data: &gray.data,
    };
    let report = annotator.annotate(&view, &mut frame.view_mut());

    assert_eq!(report.markers, 4);
    assert_eq!(report.octaves, 1);

    // The overlay painted a visible amount of the frame.
    assert!(changed_pixels(&frame) > 500, "overlay barely visible");

    // Chord letters go straight onto the frame, so their colors are exact.
    let c_color = degree_color(ScaleDegree::C);
    assert!(
        frame.data.chunks_exact(4).any(|px| px == c_color),
        "no C chord letter on the frame"
    );
}

#[test]
fn three_markers_leave_the_frame_untouched() {
    let gray = synthetic_scene(&[(1, 60, 100), (2, 60, 300), (3, 500, 100)]);
    let mut frame = solid_frame();

    let annotator = Annotator::new(AnnotateParams::default());
    let view = GrayImageView {
        width: FRAME_W,
        height: FRAME_H,
        data: &gray.data,
    };
    let report = annotator.annotate(&view, &mut frame.view_mut());

    assert_eq!(report.markers, 3);
    assert_eq!(report.octaves, 0);
    assert_eq!(changed_pixels(&frame), 0);
}

#[test]
fn six_markers_make_two_octaves() {
    // Three vertical pairs: two octave regions sharing the middle pair.
    let gray = synthetic_scene(&[
        (1, 30, 100),
        (2, 30, 300),
        (3, 290, 100),
        (4, 290, 300),
        (5, 550, 100),
        (6, 550, 300),
    ]);
    let mut frame = solid_frame();

    let annotator = Annotator::new(AnnotateParams::default());
    let view = GrayImageView {
        width: FRAME_W,
        height: FRAME_H,
        data: &gray.data,
    };
    let report = annotator.annotate(&view, &mut frame.view_mut());

    assert_eq!(report.markers, 6);
    assert_eq!(report.octaves, 2);
}

#[test]
fn raw_buffers_round_trip() {
    let gray = synthetic_scene(&[(1, 60, 100), (2, 60, 300), (3, 500, 100), (4, 500, 300)]);
    let mut rgba = vec![0u8; FRAME_W * FRAME_H * 4];
    for chunk in rgba.chunks_exact_mut(4) {
        chunk.copy_from_slice(&FRAME_COLOR);
    }

    let annotator = Annotator::new(AnnotateParams::default());
    let report = annotator
        .annotate_raw(FRAME_W, FRAME_H, &gray.data, &mut rgba)
        .expect("valid buffers");

    assert_eq!(report.octaves, 1);
    assert!(rgba.chunks_exact(4).any(|px| px != FRAME_COLOR));
}
