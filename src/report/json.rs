use serde::Serialize;

use crate::data::Dataset;
use crate::error::StatsError;
use crate::stats::{
    CorrelationMatrix, GroupedMeans, SummaryStatistics, correlate, group_means, summarize,
};

/// The three aggregator views of one dataset. A view that fails is
/// serialized as `{"error": "..."}`.
#[derive(Debug, Serialize)]
pub struct Views {
    pub records: usize,
    pub summary: ViewResult<SummaryStatistics>,
    pub grouped_means: ViewResult<GroupedMeans>,
    pub correlation: ViewResult<CorrelationMatrix>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ViewResult<T> {
    Ok(T),
    Err { error: String },
}

impl<T> From<Result<T, StatsError>> for ViewResult<T> {
    fn from(result: Result<T, StatsError>) -> Self {
        match result {
            Ok(v) => ViewResult::Ok(v),
            Err(e) => ViewResult::Err {
                error: e.to_string(),
            },
        }
    }
}

pub fn views(dataset: &Dataset) -> Views {
    Views {
        records: dataset.len(),
        summary: summarize(dataset).into(),
        grouped_means: group_means(dataset, dataset.label_field()).into(),
        correlation: correlate(dataset).into(),
    }
}

pub fn to_string_pretty(dataset: &Dataset) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&views(dataset))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::load_bundled;
    use serde_json::Value;

    #[test]
    fn test_views_serialize() {
        let ds = load_bundled().unwrap();
        let v: Value = serde_json::from_str(&to_string_pretty(&ds).unwrap()).unwrap();
        assert_eq!(v["records"], 150);
        assert_eq!(v["summary"]["attributes"][0]["count"], 150);
        assert_eq!(v["grouped_means"]["groups"][1]["label"], "versicolor");
        assert_eq!(v["correlation"]["coefficients"][3][3], 1.0);
    }

    #[test]
    fn test_failed_view_serializes_error() {
        let ds = load_bundled().unwrap().subset(&[]);
        let v: Value = serde_json::from_str(&to_string_pretty(&ds).unwrap()).unwrap();
        assert_eq!(v["summary"]["error"], "dataset is empty");
        assert!(v["grouped_means"]["groups"].as_array().unwrap().is_empty());
    }
}
