//! Single-column distribution helpers: quantiles, box-plot spreads,
//! histogram binning and kernel density estimation.

use serde::Serialize;

/// Linear-interpolated quantile of already sorted data.
///
/// Uses the `h = (n - 1) * p` rule, so `p = 0` is the minimum and `p = 1`
/// the maximum. Returns `None` for empty input.
pub fn quantile(sorted: &[f64], p: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let p = p.clamp(0.0, 1.0);
    let h = (sorted.len() - 1) as f64 * p;
    let lo = h.floor() as usize;
    let hi = h.ceil() as usize;
    let frac = h - lo as f64;
    Some(sorted[lo] + frac * (sorted[hi] - sorted[lo]))
}

/// Arithmetic mean; `None` for empty input.
pub fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (denominator `n - 1`); `None` below two values.
pub fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values)?;
    let ss: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    Some((ss / (values.len() - 1) as f64).sqrt())
}

pub(crate) fn sorted_copy(values: &[f64]) -> Vec<f64> {
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    sorted
}

// ---------------------------------------------------------------------------
// Box-plot spread
// ---------------------------------------------------------------------------

/// Quartiles plus Tukey whiskers (furthest points within 1.5 IQR).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FiveNumber {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    pub lower_whisker: f64,
    pub upper_whisker: f64,
}

pub fn five_number(values: &[f64]) -> Option<FiveNumber> {
    let sorted = sorted_copy(values);
    let q1 = quantile(&sorted, 0.25)?;
    let median = quantile(&sorted, 0.5)?;
    let q3 = quantile(&sorted, 0.75)?;
    let iqr = q3 - q1;
    let (lo_fence, hi_fence) = (q1 - 1.5 * iqr, q3 + 1.5 * iqr);

    let lower_whisker = sorted
        .iter()
        .copied()
        .find(|&v| v >= lo_fence)
        .unwrap_or(q1);
    let upper_whisker = sorted
        .iter()
        .rev()
        .copied()
        .find(|&v| v <= hi_fence)
        .unwrap_or(q3);

    Some(FiveNumber {
        min: sorted[0],
        q1,
        median,
        q3,
        max: sorted[sorted.len() - 1],
        lower_whisker,
        upper_whisker,
    })
}

// ---------------------------------------------------------------------------
// Histogram
// ---------------------------------------------------------------------------

/// Equal-width bins; `edges.len() == counts.len() + 1`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Histogram {
    pub edges: Vec<f64>,
    pub counts: Vec<usize>,
}

impl Histogram {
    pub fn bin_width(&self) -> f64 {
        match self.edges.as_slice() {
            [first, second, ..] => second - first,
            _ => 0.0,
        }
    }

    pub fn centers(&self) -> Vec<f64> {
        self.edges.windows(2).map(|w| (w[0] + w[1]) / 2.0).collect()
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

/// Bin `values` into `bins` equal-width intervals spanning `[min, max]`.
/// Every bin is half-open except the last, which also includes `max`.
/// Constant input collapses to one bin of width 1 centred on the value.
pub fn histogram(values: &[f64], bins: usize) -> Option<Histogram> {
    if values.is_empty() || bins == 0 {
        return None;
    }
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    if (max - min).abs() < f64::EPSILON {
        return Some(Histogram {
            edges: vec![min - 0.5, min + 0.5],
            counts: vec![values.len()],
        });
    }

    let width = (max - min) / bins as f64;
    let edges: Vec<f64> = (0..=bins).map(|i| min + i as f64 * width).collect();
    let mut counts = vec![0usize; bins];
    for &v in values {
        let idx = (((v - min) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }
    Some(Histogram { edges, counts })
}

// ---------------------------------------------------------------------------
// Kernel density
// ---------------------------------------------------------------------------

/// Gaussian KDE evaluated at each point of `grid`, with Scott's bandwidth
/// `std * n^(-1/5)`. Returns `None` for fewer than two values or zero
/// variance.
pub fn gaussian_kde(values: &[f64], grid: &[f64]) -> Option<Vec<f64>> {
    let std = sample_std(values)?;
    if std <= 0.0 {
        return None;
    }
    let n = values.len() as f64;
    let bandwidth = std * n.powf(-0.2);
    let norm = 1.0 / (n * bandwidth * (2.0 * std::f64::consts::PI).sqrt());

    Some(
        grid.iter()
            .map(|&x| {
                let sum: f64 = values
                    .iter()
                    .map(|&v| {
                        let z = (x - v) / bandwidth;
                        (-0.5 * z * z).exp()
                    })
                    .sum();
                sum * norm
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantile_interpolates() {
        let v = [1.0, 2.0, 3.0, 4.0];
        assert_eq!(quantile(&v, 0.0), Some(1.0));
        assert_eq!(quantile(&v, 1.0), Some(4.0));
        assert!((quantile(&v, 0.25).unwrap() - 1.75).abs() < 1e-12);
        assert!((quantile(&v, 0.5).unwrap() - 2.5).abs() < 1e-12);
        assert_eq!(quantile(&[], 0.5), None);
        assert_eq!(quantile(&[7.0], 0.75), Some(7.0));
    }

    #[test]
    fn test_sample_std() {
        let v = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
        assert!((sample_std(&v).unwrap() - 4.571428571428571_f64.sqrt()).abs() < 1e-12);
        assert_eq!(sample_std(&[1.0]), None);
    }

    #[test]
    fn test_five_number_whiskers_exclude_outliers() {
        let v = [1.0, 2.0, 3.0, 4.0, 5.0, 100.0];
        let f = five_number(&v).unwrap();
        assert_eq!(f.min, 1.0);
        assert_eq!(f.max, 100.0);
        assert_eq!(f.lower_whisker, 1.0);
        assert_eq!(f.upper_whisker, 5.0);
        assert!(f.q1 <= f.median && f.median <= f.q3);
    }

    #[test]
    fn test_histogram_counts_cover_all_values() {
        let v = [0.0, 0.5, 1.0, 1.5, 2.0, 2.0];
        let h = histogram(&v, 4).unwrap();
        assert_eq!(h.edges.len(), 5);
        assert_eq!(h.counts, vec![1, 1, 1, 3]);
        assert_eq!(h.total(), v.len());
        assert!((h.bin_width() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_histogram_constant_input() {
        let h = histogram(&[3.0, 3.0], 20).unwrap();
        assert_eq!(h.counts, vec![2]);
        assert_eq!(h.centers(), vec![3.0]);
        assert!(histogram(&[], 5).is_none());
    }

    #[test]
    fn test_kde_is_symmetric_and_peaks_at_center() {
        let v = [-1.0, 0.0, 1.0];
        let d = gaussian_kde(&v, &[-0.5, 0.0, 0.5]).unwrap();
        assert!((d[0] - d[2]).abs() < 1e-12);
        assert!(d[1] > d[0]);
        assert!(gaussian_kde(&[1.0, 1.0], &[1.0]).is_none());
    }
}
