use std::fs::File;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{ArrayRef, Float64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema as ArrowSchema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use serde_json::{Map, Value as JsonValue};

use super::model::Dataset;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Write `dataset` to `path`, choosing the format from the extension.
/// Files written here load back through [`super::loader::load_file`].
pub fn save_file(dataset: &Dataset, path: &Path) -> Result<()> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "parquet" | "pq" => save_parquet(dataset, path),
        "json" => save_json(dataset, path),
        "csv" => save_csv(dataset, path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

fn save_csv(dataset: &Dataset, path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV file")?;

    let mut header: Vec<&str> = dataset.attributes().iter().map(String::as_str).collect();
    header.push(dataset.label_field());
    writer.write_record(&header).context("writing CSV header")?;

    for record in dataset.records() {
        let mut row: Vec<String> = record.values.iter().map(|v| v.to_string()).collect();
        row.push(record.label.clone());
        writer.write_record(&row).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

/// Records-oriented JSON, one object per record, keys in schema order.
pub fn to_json(dataset: &Dataset) -> JsonValue {
    let rows = dataset
        .records()
        .iter()
        .map(|record| {
            let mut obj = Map::new();
            for (name, value) in dataset.attributes().iter().zip(&record.values) {
                obj.insert(name.clone(), JsonValue::from(*value));
            }
            obj.insert(
                dataset.label_field().to_string(),
                JsonValue::String(record.label.clone()),
            );
            JsonValue::Object(obj)
        })
        .collect();
    JsonValue::Array(rows)
}

fn save_json(dataset: &Dataset, path: &Path) -> Result<()> {
    let file = File::create(path).context("creating JSON file")?;
    serde_json::to_writer_pretty(file, &to_json(dataset)).context("writing JSON")?;
    Ok(())
}

fn save_parquet(dataset: &Dataset, path: &Path) -> Result<()> {
    let mut fields: Vec<Field> = dataset
        .attributes()
        .iter()
        .map(|name| Field::new(name, DataType::Float64, false))
        .collect();
    fields.push(Field::new(dataset.label_field(), DataType::Utf8, false));
    let schema = Arc::new(ArrowSchema::new(fields));

    let mut columns: Vec<ArrayRef> = (0..dataset.attributes().len())
        .map(|idx| Arc::new(Float64Array::from(dataset.column(idx))) as ArrayRef)
        .collect();
    let labels: Vec<&str> = dataset.records().iter().map(|r| r.label.as_str()).collect();
    columns.push(Arc::new(StringArray::from(labels)));

    let batch = RecordBatch::try_new(schema.clone(), columns).context("building record batch")?;

    let file = File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::{load_bundled, load_file};

    fn round_trip(ext: &str) {
        let ds = load_bundled().unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(format!("iris.{ext}"));

        save_file(&ds, &path).unwrap();
        let back = load_file(&path, ds.label_field()).unwrap();

        assert_eq!(back.attributes(), ds.attributes());
        assert_eq!(back.labels(), ds.labels());
        assert_eq!(back.records(), ds.records());
    }

    #[test]
    fn test_csv_file_round_trip() {
        round_trip("csv");
    }

    #[test]
    fn test_json_file_round_trip() {
        round_trip("json");
    }

    #[test]
    fn test_parquet_file_round_trip() {
        round_trip("parquet");
    }

    #[test]
    fn test_rejects_unknown_extension() {
        let ds = load_bundled().unwrap();
        let dir = tempfile::tempdir().unwrap();
        assert!(save_file(&ds, &dir.path().join("iris.txt")).is_err());
    }
}
