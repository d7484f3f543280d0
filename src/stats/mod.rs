/// Aggregator: descriptive views over a [`Dataset`](crate::data::Dataset).
///
/// Every operation is a pure function of its input; nothing is cached.
///
/// * [`summarize`]   – count / mean / std / quartiles per attribute
/// * [`group_means`] – per-label attribute means
/// * [`correlate`]   – Pearson correlation matrix
///
/// `distribution` holds the single-column helpers the charts need
/// (box-plot spreads, histogram bins, kernel density).

pub mod correlation;
pub mod distribution;
pub mod grouped;
pub mod summary;

pub use correlation::{CorrelationMatrix, correlate};
pub use distribution::{FiveNumber, Histogram, five_number, gaussian_kde, histogram, quantile};
pub use grouped::{GroupMeans, GroupedMeans, group_means};
pub use summary::{AttributeSummary, SummaryStatistics, summarize};
