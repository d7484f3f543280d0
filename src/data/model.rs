use std::collections::{BTreeMap, BTreeSet};

use crate::error::SchemaError;

// ---------------------------------------------------------------------------
// Schema – attribute names shared by every record
// ---------------------------------------------------------------------------

/// Column layout of a dataset: the numeric attributes in order, plus the name
/// of the categorical label column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    pub attributes: Vec<String>,
    pub label_field: String,
}

impl Schema {
    pub fn new(attributes: Vec<String>, label_field: impl Into<String>) -> Self {
        Schema {
            attributes,
            label_field: label_field.into(),
        }
    }

    fn validate(&self) -> Result<(), SchemaError> {
        if self.attributes.is_empty() {
            return Err(SchemaError::NoAttributes);
        }
        let mut seen = BTreeSet::new();
        for (index, name) in self.attributes.iter().enumerate() {
            if name.trim().is_empty() {
                return Err(SchemaError::EmptyAttributeName { index });
            }
            if !seen.insert(name.as_str()) {
                return Err(SchemaError::DuplicateAttribute(name.clone()));
            }
        }
        if seen.contains(self.label_field.as_str()) {
            return Err(SchemaError::LabelCollision(self.label_field.clone()));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Record – one observation
// ---------------------------------------------------------------------------

/// A single observation: one value per schema attribute plus its label.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub values: Vec<f64>,
    pub label: String,
}

impl Record {
    pub fn new(values: Vec<f64>, label: impl Into<String>) -> Self {
        Record {
            values,
            label: label.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset – validated, immutable collection of records
// ---------------------------------------------------------------------------

/// An ordered, validated set of records sharing one [`Schema`].
///
/// Construction checks arity and finiteness of every value, so consumers can
/// index `record.values` by attribute position without further checks.
#[derive(Debug, Clone)]
pub struct Dataset {
    schema: Schema,
    records: Vec<Record>,
    /// Distinct labels in first-seen order.
    labels: Vec<String>,
}

impl Dataset {
    pub fn new(schema: Schema, records: Vec<Record>) -> Result<Self, SchemaError> {
        schema.validate()?;

        let expected = schema.attributes.len();
        let mut labels: Vec<String> = Vec::new();
        for (row, record) in records.iter().enumerate() {
            if record.values.len() != expected {
                return Err(SchemaError::ArityMismatch {
                    row,
                    expected,
                    found: record.values.len(),
                });
            }
            if let Some(col) = record.values.iter().position(|v| !v.is_finite()) {
                return Err(SchemaError::NonFinite {
                    row,
                    attribute: schema.attributes[col].clone(),
                });
            }
            if !labels.contains(&record.label) {
                labels.push(record.label.clone());
            }
        }

        Ok(Dataset {
            schema,
            records,
            labels,
        })
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn attributes(&self) -> &[String] {
        &self.schema.attributes
    }

    pub fn label_field(&self) -> &str {
        &self.schema.label_field
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Distinct label values in the order they first appear.
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn attribute_index(&self, name: &str) -> Option<usize> {
        self.schema.attributes.iter().position(|a| a == name)
    }

    /// All values of the attribute at `idx`, in record order.
    pub fn column(&self, idx: usize) -> Vec<f64> {
        self.records.iter().map(|r| r.values[idx]).collect()
    }

    /// Values of the attribute at `idx` restricted to records with `label`.
    pub fn column_for_label(&self, idx: usize, label: &str) -> Vec<f64> {
        self.records
            .iter()
            .filter(|r| r.label == label)
            .map(|r| r.values[idx])
            .collect()
    }

    pub fn label_counts(&self) -> BTreeMap<String, usize> {
        let mut counts = BTreeMap::new();
        for r in &self.records {
            *counts.entry(r.label.clone()).or_insert(0) += 1;
        }
        counts
    }

    /// A new dataset holding the records at `indices`, in the given order.
    /// Out-of-range indices are skipped.
    pub fn subset(&self, indices: &[usize]) -> Dataset {
        let records: Vec<Record> = indices
            .iter()
            .filter_map(|&i| self.records.get(i).cloned())
            .collect();
        let mut labels: Vec<String> = Vec::new();
        for r in &records {
            if !labels.contains(&r.label) {
                labels.push(r.label.clone());
            }
        }
        Dataset {
            schema: self.schema.clone(),
            records,
            labels,
        }
    }
}
