use serde::Serialize;

use super::distribution::mean;
use crate::data::Dataset;
use crate::error::StatsError;

/// Pairwise Pearson coefficients, row-major, `attributes.len()` squared.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CorrelationMatrix {
    pub attributes: Vec<String>,
    pub coefficients: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    pub fn at(&self, i: usize, j: usize) -> f64 {
        self.coefficients[i][j]
    }

    pub fn get(&self, a: &str, b: &str) -> Option<f64> {
        let i = self.attributes.iter().position(|x| x == a)?;
        let j = self.attributes.iter().position(|x| x == b)?;
        Some(self.at(i, j))
    }

    /// Off-diagonal pair with the largest absolute coefficient.
    pub fn strongest_pair(&self) -> Option<(usize, usize, f64)> {
        let mut best: Option<(usize, usize, f64)> = None;
        for i in 0..self.len() {
            for j in (i + 1)..self.len() {
                let r = self.at(i, j);
                if best.map_or(true, |(_, _, b)| r.abs() > b.abs()) {
                    best = Some((i, j, r));
                }
            }
        }
        best
    }
}

/// Pearson correlation between every pair of attributes.
///
/// Each attribute with zero variance makes its row undefined, which is
/// reported as [`StatsError::DegenerateInput`] rather than a NaN entry.
pub fn correlate(dataset: &Dataset) -> Result<CorrelationMatrix, StatsError> {
    if dataset.is_empty() {
        return Err(StatsError::EmptyDataset);
    }

    let n = dataset.attributes().len();
    let degenerate = |idx: usize| StatsError::DegenerateInput {
        attribute: dataset.attributes()[idx].clone(),
    };

    // Columns are rescaled to [-1, 1] first so squared deviations neither
    // underflow nor overflow at extreme magnitudes.
    let mut deviations: Vec<Vec<f64>> = Vec::with_capacity(n);
    for idx in 0..n {
        let col = dataset.column(idx);
        if col.iter().all(|&v| v == col[0]) {
            return Err(degenerate(idx));
        }
        let scale = col.iter().fold(0.0_f64, |acc, v| acc.max(v.abs()));
        let scaled: Vec<f64> = col.iter().map(|v| v / scale).collect();
        let m = mean(&scaled).unwrap_or(0.0);
        deviations.push(scaled.into_iter().map(|v| v - m).collect());
    }
    let sum_sq: Vec<f64> = deviations
        .iter()
        .map(|d| d.iter().map(|v| v * v).sum())
        .collect();
    if let Some(idx) = sum_sq.iter().position(|&s| !(s > 0.0 && s.is_finite())) {
        return Err(degenerate(idx));
    }

    let mut coefficients = vec![vec![1.0; n]; n];
    for i in 0..n {
        for j in (i + 1)..n {
            let cross: f64 = deviations[i]
                .iter()
                .zip(&deviations[j])
                .map(|(a, b)| a * b)
                .sum();
            let r = cross / (sum_sq[i].sqrt() * sum_sq[j].sqrt());
            if !r.is_finite() {
                return Err(degenerate(i));
            }
            let r = r.clamp(-1.0, 1.0);
            coefficients[i][j] = r;
            coefficients[j][i] = r;
        }
    }

    Ok(CorrelationMatrix {
        attributes: dataset.attributes().to_vec(),
        coefficients,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Record, Schema};

    fn dataset(rows: &[[f64; 3]]) -> Dataset {
        Dataset::new(
            Schema::new(vec!["x".into(), "y".into(), "z".into()], "k"),
            rows.iter().map(|r| Record::new(r.to_vec(), "a")).collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_exact_linear_relation() {
        // x = 2y, z = -y + 7
        let ds = dataset(&[
            [2.0, 1.0, 6.0],
            [4.6, 2.3, 4.7],
            [7.0, 3.5, 3.5],
            [19.8, 9.9, -2.9],
        ]);
        let c = correlate(&ds).unwrap();
        assert_eq!(c.get("x", "y"), Some(1.0));
        assert!((c.get("y", "z").unwrap() + 1.0).abs() < 1e-12);
        assert_eq!(c.strongest_pair().map(|(i, j, _)| (i, j)), Some((0, 1)));
    }

    #[test]
    fn test_symmetric_with_unit_diagonal() {
        let ds = dataset(&[[1.0, 5.0, 2.0], [2.0, 3.0, 9.0], [4.0, 4.0, 1.0], [3.0, 1.0, 5.0]]);
        let c = correlate(&ds).unwrap();
        for i in 0..c.len() {
            assert_eq!(c.at(i, i), 1.0);
            for j in 0..c.len() {
                assert_eq!(c.at(i, j), c.at(j, i));
                assert!((-1.0..=1.0).contains(&c.at(i, j)));
            }
        }
    }

    #[test]
    fn test_zero_variance_is_degenerate() {
        let ds = dataset(&[[1.0, 2.0, 3.0], [2.0, 2.0, 4.0]]);
        assert_eq!(
            correlate(&ds),
            Err(StatsError::DegenerateInput {
                attribute: "y".into()
            })
        );
    }

    #[test]
    fn test_single_record_is_degenerate() {
        let ds = dataset(&[[1.0, 2.0, 3.0]]);
        assert!(matches!(correlate(&ds), Err(StatsError::DegenerateInput { .. })));
    }

    #[test]
    fn test_extreme_magnitudes_stay_finite() {
        for scale in [1e-200, 1e200, 1e300, 5e-324] {
            let rows: Vec<[f64; 3]> = [1.0, 2.0, 3.0, 5.0]
                .iter()
                .map(|&v| [v * scale, (10.0 - v) * scale, v * v])
                .collect();
            let c = correlate(&dataset(&rows)).unwrap();
            for i in 0..c.len() {
                for j in 0..c.len() {
                    assert!(c.at(i, j).is_finite(), "scale {scale}: ({i}, {j})");
                    assert_eq!(c.at(i, j), c.at(j, i));
                }
            }
            assert!((c.get("x", "y").unwrap() + 1.0).abs() < 1e-12, "scale {scale}");
        }
    }

    #[test]
    fn test_empty_dataset() {
        assert_eq!(correlate(&dataset(&[])), Err(StatsError::EmptyDataset));
    }
}
