use serde::Serialize;

use crate::data::Dataset;
use crate::error::StatsError;

/// Per-attribute means of the records sharing one label.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupMeans {
    pub label: String,
    pub count: usize,
    /// Indexed like [`GroupedMeans::attributes`].
    pub means: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupedMeans {
    pub label_field: String,
    pub attributes: Vec<String>,
    /// Groups in first-seen label order.
    pub groups: Vec<GroupMeans>,
}

impl GroupedMeans {
    pub fn group(&self, label: &str) -> Option<&GroupMeans> {
        self.groups.iter().find(|g| g.label == label)
    }

    /// Mean of `attribute` within `label`.
    pub fn mean_of(&self, label: &str, attribute: &str) -> Option<f64> {
        let idx = self.attributes.iter().position(|a| a == attribute)?;
        self.group(label).map(|g| g.means[idx])
    }
}

/// Partition records by `label_field` and average every attribute within each
/// partition. An empty dataset yields no groups.
pub fn group_means(dataset: &Dataset, label_field: &str) -> Result<GroupedMeans, StatsError> {
    if label_field != dataset.label_field() {
        return Err(StatsError::UnknownField(label_field.to_string()));
    }

    let width = dataset.attributes().len();
    let mut sums: Vec<(usize, Vec<f64>)> = vec![(0, vec![0.0; width]); dataset.labels().len()];

    for record in dataset.records() {
        let Some(slot) = dataset.labels().iter().position(|l| *l == record.label) else {
            continue;
        };
        let (count, acc) = &mut sums[slot];
        *count += 1;
        for (a, v) in acc.iter_mut().zip(&record.values) {
            *a += v;
        }
    }

    let groups = dataset
        .labels()
        .iter()
        .zip(sums)
        .map(|(label, (count, acc))| GroupMeans {
            label: label.clone(),
            count,
            means: acc.into_iter().map(|s| s / count as f64).collect(),
        })
        .collect();

    Ok(GroupedMeans {
        label_field: label_field.to_string(),
        attributes: dataset.attributes().to_vec(),
        groups,
    })
}
