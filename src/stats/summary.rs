use serde::Serialize;

use super::distribution::{mean, quantile, sample_std, sorted_copy};
use crate::data::Dataset;
use crate::error::StatsError;

/// Descriptive statistics of one numeric attribute.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttributeSummary {
    pub name: String,
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation; `None` when there is a single value.
    pub std: Option<f64>,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

/// One [`AttributeSummary`] per attribute, in schema order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryStatistics {
    pub attributes: Vec<AttributeSummary>,
}

impl SummaryStatistics {
    pub fn get(&self, name: &str) -> Option<&AttributeSummary> {
        self.attributes.iter().find(|a| a.name == name)
    }
}

/// count / mean / std / min / quartiles / max for every attribute.
pub fn summarize(dataset: &Dataset) -> Result<SummaryStatistics, StatsError> {
    if dataset.is_empty() {
        return Err(StatsError::EmptyDataset);
    }

    let attributes = dataset
        .attributes()
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            let sorted = sorted_copy(&dataset.column(idx));
            let q = |p| quantile(&sorted, p).ok_or(StatsError::EmptyDataset);
            Ok(AttributeSummary {
                name: name.clone(),
                count: sorted.len(),
                mean: mean(&sorted).ok_or(StatsError::EmptyDataset)?,
                std: sample_std(&sorted),
                min: q(0.0)?,
                q25: q(0.25)?,
                median: q(0.5)?,
                q75: q(0.75)?,
                max: q(1.0)?,
            })
        })
        .collect::<Result<Vec<_>, StatsError>>()?;

    log::debug!("summarized {} attributes over {} records", attributes.len(), dataset.len());
    Ok(SummaryStatistics { attributes })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{Record, Schema};

    #[test]
    fn test_empty_dataset_fails() {
        let ds = Dataset::new(Schema::new(vec!["x".into()], "k"), vec![]).unwrap();
        assert_eq!(summarize(&ds), Err(StatsError::EmptyDataset));
    }

    #[test]
    fn test_single_record_has_no_std() {
        let ds = Dataset::new(
            Schema::new(vec!["x".into()], "k"),
            vec![Record::new(vec![4.0], "a")],
        )
        .unwrap();
        let s = summarize(&ds).unwrap();
        let x = &s.attributes[0];
        assert_eq!(x.count, 1);
        assert_eq!(x.std, None);
        assert_eq!((x.min, x.q25, x.median, x.q75, x.max), (4.0, 4.0, 4.0, 4.0, 4.0));
    }

    #[test]
    fn test_quartiles_are_ordered() {
        let values = [9.0, 1.0, 5.0, 3.0, 7.0, 2.0, 8.0];
        let ds = Dataset::new(
            Schema::new(vec!["x".into(), "y".into()], "k"),
            values
                .iter()
                .map(|&v| Record::new(vec![v, -v], "a"))
                .collect(),
        )
        .unwrap();
        let s = summarize(&ds).unwrap();
        assert_eq!(s.attributes.len(), 2);
        for a in &s.attributes {
            assert!(a.min <= a.q25 && a.q25 <= a.median);
            assert!(a.median <= a.q75 && a.q75 <= a.max);
        }
        let x = s.get("x").unwrap();
        assert_eq!(x.median, 5.0);
        assert_eq!(x.q25, 2.5);
        assert_eq!(x.q75, 7.5);
        assert!((x.mean - 5.0).abs() < 1e-12);
    }
}
