use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result, bail};
use arrow::array::{Array, AsArray};
use arrow::compute::cast;
use arrow::datatypes::{DataType, Float64Type};
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{Dataset, Record, Schema};

/// Label column name used by the bundled dataset.
pub const DEFAULT_LABEL_FIELD: &str = "species";

const BUNDLED_CSV: &str = include_str!("../../data/iris.csv");

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load the Iris dataset embedded in the binary (150 records, 3 species).
pub fn load_bundled() -> Result<Dataset> {
    parse_csv(BUNDLED_CSV.as_bytes(), DEFAULT_LABEL_FIELD).context("parsing bundled iris.csv")
}

/// Load a labelled dataset from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.parquet` – numeric columns plus one string label column
/// * `.json`    – `[{ "sepal length (cm)": 5.1, ..., "species": "setosa" }, ...]`
/// * `.csv`     – header row, numeric columns plus one label column
///
/// In every format the column named `label_field` holds the category; all
/// other columns must be numeric.
pub fn load_file(path: &Path, label_field: &str) -> Result<Dataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "parquet" | "pq" => load_parquet(path, label_field),
        "json" => load_json(path, label_field),
        "csv" => {
            let file = std::fs::File::open(path).context("opening CSV")?;
            parse_csv(file, label_field)
        }
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// Parse CSV text from any reader. Every column except `label_field` is
/// parsed as `f64`.
pub fn parse_csv<R: Read>(input: R, label_field: &str) -> Result<Dataset> {
    let mut reader = csv::Reader::from_reader(input);
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.trim().to_string())
        .collect();

    let label_idx = headers
        .iter()
        .position(|h| h == label_field)
        .with_context(|| format!("CSV missing '{label_field}' column"))?;

    let attributes: Vec<String> = headers
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != label_idx)
        .map(|(_, h)| h.clone())
        .collect();

    let mut records = Vec::new();

    for (row_no, result) in reader.records().enumerate() {
        let row = result.with_context(|| format!("CSV row {row_no}"))?;

        let mut values = Vec::with_capacity(attributes.len());
        for (col_idx, cell) in row.iter().enumerate() {
            if col_idx == label_idx {
                continue;
            }
            let v = cell.trim().parse::<f64>().with_context(|| {
                format!("Row {row_no}, {}: '{cell}' is not a number", headers[col_idx])
            })?;
            values.push(v);
        }
        let label = row.get(label_idx).unwrap_or("").trim().to_string();

        records.push(Record { values, label });
    }

    Dataset::new(Schema::new(attributes, label_field), records).context("validating CSV data")
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "sepal length (cm)": 5.1, "sepal width (cm)": 3.5, "species": "setosa" },
///   ...
/// ]
/// ```
///
/// Attribute order is taken from the first object.
fn load_json(path: &Path, label_field: &str) -> Result<Dataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    parse_json(&text, label_field)
}

pub fn parse_json(text: &str, label_field: &str) -> Result<Dataset> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;

    let rows = root.as_array().context("Expected top-level JSON array")?;

    let attributes: Vec<String> = match rows.first().and_then(|r| r.as_object()) {
        Some(first) => first
            .keys()
            .filter(|k| k.as_str() != label_field)
            .cloned()
            .collect(),
        None => bail!("JSON array is empty; cannot infer columns"),
    };

    let mut records = Vec::with_capacity(rows.len());

    for (i, row) in rows.iter().enumerate() {
        let obj = row
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        let label = match obj.get(label_field) {
            Some(JsonValue::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => bail!("Row {i}: missing '{label_field}'"),
        };

        let values = attributes
            .iter()
            .map(|attr| {
                obj.get(attr)
                    .and_then(|v| v.as_f64())
                    .with_context(|| format!("Row {i}, {attr}: missing or not a number"))
            })
            .collect::<Result<Vec<f64>>>()?;

        records.push(Record { values, label });
    }

    Dataset::new(Schema::new(attributes, label_field), records).context("validating JSON data")
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file holding one record per row.
///
/// Expected schema:
/// - `label_field`: Utf8 / LargeUtf8 (or anything castable to Utf8)
/// - every other column: Float64, Float32 or an integer type
///
/// Nulls in numeric columns are rejected by dataset validation.
fn load_parquet(path: &Path, label_field: &str) -> Result<Dataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;

    let schema = builder.schema().clone();
    let label_idx = schema
        .index_of(label_field)
        .map_err(|_| anyhow::anyhow!("Parquet file missing '{label_field}' column"))?;
    let attr_cols: Vec<(usize, String)> = schema
        .fields()
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != label_idx)
        .map(|(i, f)| (i, f.name().clone()))
        .collect();

    let reader = builder.build().context("building parquet reader")?;
    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;

        let labels = cast(batch.column(label_idx), &DataType::Utf8)
            .with_context(|| format!("'{label_field}' is not a text column"))?;
        let labels = labels.as_string::<i32>();

        let mut columns = Vec::with_capacity(attr_cols.len());
        for (col_idx, name) in &attr_cols {
            let col = cast(batch.column(*col_idx), &DataType::Float64)
                .with_context(|| format!("column '{name}' is not numeric"))?;
            columns.push(col);
        }

        for row in 0..batch.num_rows() {
            let values = columns
                .iter()
                .map(|col| {
                    let arr = col.as_primitive::<Float64Type>();
                    if arr.is_null(row) {
                        f64::NAN
                    } else {
                        arr.value(row)
                    }
                })
                .collect();
            let label = if labels.is_null(row) {
                String::new()
            } else {
                labels.value(row).to_string()
            };
            records.push(Record { values, label });
        }
    }

    let attributes = attr_cols.into_iter().map(|(_, name)| name).collect();
    Dataset::new(Schema::new(attributes, label_field), records)
        .context("validating parquet data")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_dataset_shape() {
        let ds = load_bundled().unwrap();
        assert_eq!(ds.len(), 150);
        assert_eq!(ds.attributes().len(), 4);
        assert_eq!(ds.attributes()[2], "petal length (cm)");
        assert_eq!(ds.label_field(), "species");
        assert_eq!(ds.labels(), &["setosa", "versicolor", "virginica"]);
    }

    #[test]
    fn test_csv_label_column_may_be_anywhere() {
        let text = "kind,x,y\na,1.0,2\nb,3.5,4\n";
        let ds = parse_csv(text.as_bytes(), "kind").unwrap();
        assert_eq!(ds.attributes(), &["x", "y"]);
        assert_eq!(ds.records()[1].values, vec![3.5, 4.0]);
        assert_eq!(ds.records()[1].label, "b");
    }

    #[test]
    fn test_csv_missing_label_column() {
        let err = parse_csv("x,y\n1,2\n".as_bytes(), "species").unwrap_err();
        assert!(format!("{err:#}").contains("missing 'species'"));
    }

    #[test]
    fn test_csv_rejects_blank_header() {
        let err = parse_csv("x, ,species\n1,2,a\n".as_bytes(), "species").unwrap_err();
        assert!(format!("{err:#}").contains("attribute 1 has an empty name"));
    }

    #[test]
    fn test_csv_rejects_non_numeric_cell() {
        let err = parse_csv("x,species\nabc,a\n".as_bytes(), "species").unwrap_err();
        assert!(format!("{err:#}").contains("not a number"));
    }

    #[test]
    fn test_json_preserves_key_order() {
        let text = r#"[{"b": 1.0, "a": 2.0, "species": "s"}, {"b": 3, "a": 4, "species": "t"}]"#;
        let ds = parse_json(text, "species").unwrap();
        assert_eq!(ds.attributes(), &["b", "a"]);
        assert_eq!(ds.records()[1].values, vec![3.0, 4.0]);
    }

    #[test]
    fn test_json_missing_attribute() {
        let text = r#"[{"a": 1.0, "species": "s"}, {"species": "t"}]"#;
        assert!(parse_json(text, "species").is_err());
    }

    #[test]
    fn test_unsupported_extension() {
        let err = load_file(Path::new("data.xlsx"), "species").unwrap_err();
        assert!(err.to_string().contains("Unsupported"));
    }
}
