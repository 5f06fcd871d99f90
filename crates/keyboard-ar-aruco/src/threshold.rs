//! Intensity thresholding for the sampled cell grid.

/// Otsu's method over an explicit sample set.
///
/// Degenerate inputs short-circuit: no samples gives the midpoint 127, a
/// flat input gives its own value, and two occupied bins split midway.
pub(crate) fn otsu_threshold_from_samples(samples: &[u8]) -> u8 {
    if samples.is_empty() {
        return 127;
    }

    let mut hist = [0u32; 256];
    for &v in samples {
        hist[v as usize] += 1;
    }

    let lo = hist.iter().position(|&h| h > 0).unwrap_or(0);
    let hi = hist.iter().rposition(|&h| h > 0).unwrap_or(255);
    if lo == hi {
        return lo as u8;
    }
    if hist.iter().filter(|&&h| h > 0).count() <= 2 {
        return ((lo + hi) / 2) as u8;
    }

    let total = samples.len() as u64;
    let moment: u64 = hist
        .iter()
        .enumerate()
        .map(|(i, &h)| i as u64 * h as u64)
        .sum();

    let mut w_back = 0u64;
    let mut m_back = 0u64;
    let mut best_sep = 0.0f64;
    let mut best_t = 127u8;

    for (t, &h) in hist.iter().enumerate() {
        w_back += h as u64;
        m_back += t as u64 * h as u64;
        if w_back == 0 {
            continue;
        }
        let w_fore = total - w_back;
        if w_fore == 0 {
            break;
        }

        let mean_b = m_back as f64 / w_back as f64;
        let mean_f = (moment - m_back) as f64 / w_fore as f64;
        let sep = w_back as f64 * w_fore as f64 * (mean_b - mean_f) * (mean_b - mean_f);
        if sep > best_sep {
            best_sep = sep;
            best_t = t as u8;
        }
    }

    best_t
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_and_flat_inputs() {
        assert_eq!(otsu_threshold_from_samples(&[]), 127);
        assert_eq!(otsu_threshold_from_samples(&[42; 9]), 42);
    }

    #[test]
    fn two_values_split_midway() {
        assert_eq!(otsu_threshold_from_samples(&[10, 10, 200, 200]), 105);
    }

    #[test]
    fn bimodal_separates_classes() {
        let mut samples = vec![10u8; 40];
        samples.extend(vec![240u8; 40]);
        samples.push(12);
        samples.push(238);
        let t = otsu_threshold_from_samples(&samples);
        assert!(t > 12 && t < 238, "threshold {t} outside the gap");
    }
}
