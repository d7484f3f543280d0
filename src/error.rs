use thiserror::Error;

/// Raised when a set of records does not satisfy the dataset invariants.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SchemaError {
    #[error("schema has no numeric attributes")]
    NoAttributes,

    #[error("attribute {index} has an empty name")]
    EmptyAttributeName { index: usize },

    #[error("attribute '{0}' appears more than once in the schema")]
    DuplicateAttribute(String),

    #[error("label field '{0}' is also declared as a numeric attribute")]
    LabelCollision(String),

    #[error("record {row}: expected {expected} values but found {found}")]
    ArityMismatch {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("record {row}: value for '{attribute}' is not a finite number")]
    NonFinite { row: usize, attribute: String },
}

/// Failures of the aggregation operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum StatsError {
    #[error("dataset is empty")]
    EmptyDataset,

    #[error("unknown field '{0}'")]
    UnknownField(String),

    #[error("attribute '{attribute}' has zero variance; correlation is undefined")]
    DegenerateInput { attribute: String },
}
