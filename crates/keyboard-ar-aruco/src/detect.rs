//! Full-frame marker detection.
//!
//! Candidates are dark connected components with roughly square bounding
//! boxes. Each candidate quad is read through a homography from the
//! canonical marker square, thresholded with Otsu, checked for a black
//! border and matched against the dictionary.

use crate::threshold::otsu_threshold_from_samples;
use crate::Matcher;
use keyboard_ar_core::{homography_from_4pt, GrayImageView, Homography, MarkerQuad};
use nalgebra::Point2;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// One detected marker: dictionary id plus the corner quad in image
/// coordinates, clockwise from the marker's own top-left.
#[derive(Clone, Copy, Debug)]
pub struct Marker {
    pub id: u32,
    pub corners: MarkerQuad,
}

/// Detection parameters.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DetectParams {
    /// Pixels at or below this value seed candidate components.
    pub max_dark_value: u8,
    /// Minimum candidate bounding-box side in pixels.
    pub min_side_px: usize,
    /// Accepted bounding-box aspect ratio range (width / height).
    pub min_aspect: f32,
    pub max_aspect: f32,
    /// Accepted dark-pixel fill rate of the bounding box.
    pub min_fill: f32,
    pub max_fill: f32,
    /// Require border-black ratio >= this.
    pub min_border_score: f32,
    /// Maximum Hamming distance accepted from the matcher.
    pub max_hamming: u8,
}

impl Default for DetectParams {
    fn default() -> Self {
        Self {
            max_dark_value: 80,
            min_side_px: 12,
            min_aspect: 0.7,
            max_aspect: 1.3,
            min_fill: 0.18,
            max_fill: 0.95,
            min_border_score: 0.85,
            max_hamming: 1,
        }
    }
}

struct Candidate {
    /// Quad from component extremes, clockwise from image-space top-left.
    corners: MarkerQuad,
}

/// Detect dictionary markers in a grayscale frame.
///
/// Returns at most one (best-scoring) detection per marker id. Corners are
/// rotated so index 0 is the marker's own top-left regardless of how the
/// marker is oriented in the frame.
pub fn detect_markers(
    gray: &GrayImageView<'_>,
    params: &DetectParams,
    matcher: &Matcher,
) -> Vec<Marker> {
    let bits = matcher.dictionary().marker_size;
    if bits * bits > 64 {
        return Vec::new();
    }

    let candidates = find_candidates(gray, params);
    log::debug!("{} candidate components", candidates.len());

    let mut scored = Vec::new();
    for cand in candidates {
        let Some((code, border_score)) = decode_candidate(gray, &cand, bits, params) else {
            continue;
        };
        let Some(m) = matcher.match_code(code) else {
            continue;
        };
        if m.hamming > params.max_hamming {
            continue;
        }

        let ham_pen = 1.0 - m.hamming as f32 / matcher.dictionary().bit_count().max(1) as f32;
        let score = border_score * ham_pen;

        // The observed code equals the dictionary code rotated clockwise by
        // `m.rotation`, so the marker's canonical corner k sits at detected
        // corner (k + rotation) % 4.
        let mut corners = cand.corners;
        if m.rotation != 0 {
            let r = m.rotation as usize;
            corners = [0usize, 1, 2, 3].map(|k| cand.corners[(k + r) % 4]);
        }

        scored.push((score, Marker { id: m.id, corners }));
    }

    dedup_by_id_keep_best(scored)
}

fn dedup_by_id_keep_best(mut scored: Vec<(f32, Marker)>) -> Vec<Marker> {
    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
    let mut out: Vec<Marker> = Vec::with_capacity(scored.len());
    for (_, m) in scored {
        if out.iter().all(|kept| kept.id != m.id) {
            out.push(m);
        }
    }
    out
}

/// Flood-fill dark components and keep the roughly square ones.
fn find_candidates(gray: &GrayImageView<'_>, params: &DetectParams) -> Vec<Candidate> {
    let w = gray.width;
    let h = gray.height;
    if w == 0 || h == 0 {
        return Vec::new();
    }

    let mut visited = vec![false; w * h];
    let mut out = Vec::new();

    for y0 in 0..h {
        for x0 in 0..w {
            let idx0 = y0 * w + x0;
            if visited[idx0] || gray.data[idx0] > params.max_dark_value {
                continue;
            }

            visited[idx0] = true;
            let mut queue = VecDeque::new();
            queue.push_back((x0 as i32, y0 as i32));

            let mut count = 0usize;
            let mut min_x = x0;
            let mut min_y = y0;
            let mut max_x = x0;
            let mut max_y = y0;
            // Extreme points along the two diagonals give the quad corners.
            let mut tl = (x0, y0, x0 + y0);
            let mut br = (x0, y0, x0 + y0);
            let mut tr = (x0, y0, x0 as i64 - y0 as i64);
            let mut bl = (x0, y0, x0 as i64 - y0 as i64);

            while let Some((x, y)) = queue.pop_front() {
                count += 1;
                let (ux, uy) = (x as usize, y as usize);
                min_x = min_x.min(ux);
                min_y = min_y.min(uy);
                max_x = max_x.max(ux);
                max_y = max_y.max(uy);

                let sum = ux + uy;
                let diff = ux as i64 - uy as i64;
                if sum < tl.2 {
                    tl = (ux, uy, sum);
                }
                if sum > br.2 {
                    br = (ux, uy, sum);
                }
                if diff > tr.2 {
                    tr = (ux, uy, diff);
                }
                if diff < bl.2 {
                    bl = (ux, uy, diff);
                }

                for (nx, ny) in [(x - 1, y), (x + 1, y), (x, y - 1), (x, y + 1)] {
                    if nx < 0 || ny < 0 || nx >= w as i32 || ny >= h as i32 {
                        continue;
                    }
                    let nidx = ny as usize * w + nx as usize;
                    if visited[nidx] || gray.data[nidx] > params.max_dark_value {
                        continue;
                    }
                    visited[nidx] = true;
                    queue.push_back((nx, ny));
                }
            }

            let bw = max_x - min_x + 1;
            let bh = max_y - min_y + 1;
            if bw < params.min_side_px || bh < params.min_side_px {
                continue;
            }
            let aspect = bw as f32 / bh as f32;
            if aspect < params.min_aspect || aspect > params.max_aspect {
                continue;
            }
            let fill = count as f32 / (bw * bh) as f32;
            if fill < params.min_fill || fill > params.max_fill {
                continue;
            }

            out.push(Candidate {
                corners: [
                    Point2::new(tl.0 as f32, tl.1 as f32),
                    Point2::new(tr.0 as f32, tr.1 as f32),
                    Point2::new(br.0 as f32, br.1 as f32),
                    Point2::new(bl.0 as f32, bl.1 as f32),
                ],
            });
        }
    }

    out
}

/// Read the candidate's bit grid and return `(code, border_score)`.
fn decode_candidate(
    gray: &GrayImageView<'_>,
    cand: &Candidate,
    bits: usize,
    params: &DetectParams,
) -> Option<(u64, f32)> {
    let cells = bits + 2;
    let h = cell_grid_homography(&cand.corners, cells)?;

    let mut samples = Vec::with_capacity(cells * cells);
    for cy in 0..cells {
        for cx in 0..cells {
            let p = h.apply(Point2::new(cx as f32 + 0.5, cy as f32 + 0.5));
            samples.push(sample_mean_3x3(gray, p.x, p.y));
        }
    }
    let thr = otsu_threshold_from_samples(&samples);

    let mut border_ok = 0u32;
    let mut border_total = 0u32;
    let mut code = 0u64;
    for cy in 0..cells {
        for cx in 0..cells {
            let is_black = samples[cy * cells + cx] < thr;
            if cx == 0 || cy == 0 || cx + 1 == cells || cy + 1 == cells {
                border_total += 1;
                if is_black {
                    border_ok += 1;
                }
            } else if is_black {
                code |= 1u64 << ((cy - 1) * bits + (cx - 1));
            }
        }
    }

    let border_score = border_ok as f32 / border_total.max(1) as f32;
    if border_score < params.min_border_score {
        return None;
    }
    Some((code, border_score))
}

/// Homography mapping cell-grid coordinates (one unit per cell) onto the
/// candidate quad. Corners come from component extreme pixels, so the grid
/// is off by up to half a pixel; the 3x3 mean sampling absorbs that.
fn cell_grid_homography(quad: &MarkerQuad, cells: usize) -> Option<Homography> {
    let s = cells as f32;
    let canon = [
        Point2::new(0.0, 0.0),
        Point2::new(s, 0.0),
        Point2::new(s, s),
        Point2::new(0.0, s),
    ];
    homography_from_4pt(&canon, quad)
}

fn sample_mean_3x3(img: &GrayImageView<'_>, x: f32, y: f32) -> u8 {
    let ix = x.floor() as i32;
    let iy = y.floor() as i32;
    let mut sum = 0u32;
    for dy in -1..=1 {
        for dx in -1..=1 {
            sum += get_gray(img, ix + dx, iy + dy) as u32;
        }
    }
    (sum / 9) as u8
}

#[inline]
fn get_gray(img: &GrayImageView<'_>, x: i32, y: i32) -> u8 {
    if x < 0 || y < 0 || x >= img.width as i32 || y >= img.height as i32 {
        return 255;
    }
    img.data[y as usize * img.width + x as usize]
}
