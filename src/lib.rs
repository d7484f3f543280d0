//! Descriptive statistics and dashboard reports for small labelled numeric
//! datasets, with the Iris dataset bundled.
//!
//! * [`data`]   – schema-validated [`Dataset`](data::Dataset), loaders and export
//! * [`stats`]  – the aggregator: `summarize`, `group_means`, `correlate`
//! * [`report`] – page models built from the aggregator views, plus text/JSON output

pub mod data;
pub mod error;
pub mod report;
pub mod stats;

pub use error::{SchemaError, StatsError};
