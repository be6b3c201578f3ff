use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{
    Array, AsArray, BooleanArray, Float32Array, Float64Array, Int32Array, Int64Array,
    StringArray,
};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{CellValue, SurveyDataset};
use super::prepare::clean_record;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load and clean a survey extract.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – one respondent per row, GSS or dashboard column names
/// * `.json`    – `[{ "sex": "female", "satjob": "very satisfied", ... }, ...]`
/// * `.parquet` – flat table of string / numeric columns
pub fn load_file(path: &Path) -> Result<SurveyDataset> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    let dataset = match ext.as_str() {
        "parquet" | "pq" => load_parquet(path),
        "json" => load_json(path),
        "csv" => load_csv(path),
        other => bail!("Unsupported file extension: .{other}"),
    }?;

    log::debug!(
        "{}: {} respondents, columns {:?}",
        path.display(),
        dataset.len(),
        dataset.column_names
    );
    Ok(dataset)
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Records-oriented JSON, the default `df.to_json(orient='records')`:
///
/// ```json
/// [
///   { "id": 1, "sex": "female", "satjob": "very satisfied", "coninc": 22782.0 },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<SurveyDataset> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    parse_json(&text)
}

fn parse_json(text: &str) -> Result<SurveyDataset> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;

    let rows = root
        .as_array()
        .context("Expected top-level JSON array")?;

    let mut records = Vec::with_capacity(rows.len());
    for (i, row) in rows.iter().enumerate() {
        let obj = row
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;

        let raw: BTreeMap<String, CellValue> = obj
            .iter()
            .map(|(key, val)| (key.clone(), json_to_cell(val)))
            .collect();
        records.push(clean_record(raw));
    }

    Ok(SurveyDataset::from_records(records))
}

fn json_to_cell(val: &JsonValue) -> CellValue {
    match val {
        JsonValue::String(s) => CellValue::String(s.clone()),
        JsonValue::Number(n) => {
            if let Some(i) = n.as_i64() {
                CellValue::Integer(i)
            } else if let Some(f) = n.as_f64() {
                CellValue::Float(f)
            } else {
                CellValue::String(n.to_string())
            }
        }
        JsonValue::Bool(b) => CellValue::Bool(*b),
        JsonValue::Null => CellValue::Null,
        other => CellValue::String(other.to_string()),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV with a header row.  The public GSS extract is cp1252, so cells are
/// decoded lossily instead of failing on the odd non-UTF-8 byte.
fn load_csv(path: &Path) -> Result<SurveyDataset> {
    let reader = csv::Reader::from_path(path).context("opening CSV")?;
    read_csv(reader)
}

fn read_csv<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<SurveyDataset> {
    let headers: Vec<String> = reader
        .byte_headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| String::from_utf8_lossy(h).trim().to_string())
        .collect();

    let mut records = Vec::new();
    for (row_no, result) in reader.byte_records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;

        let raw: BTreeMap<String, CellValue> = headers
            .iter()
            .zip(record.iter())
            .map(|(col, bytes)| (col.clone(), guess_cell_type(&String::from_utf8_lossy(bytes))))
            .collect();
        records.push(clean_record(raw));
    }

    Ok(SurveyDataset::from_records(records))
}

fn guess_cell_type(s: &str) -> CellValue {
    let s = s.trim();
    if s.is_empty() {
        return CellValue::Null;
    }
    if let Ok(i) = s.parse::<i64>() {
        return CellValue::Integer(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return CellValue::Float(f);
    }
    if s == "true" || s == "false" {
        return CellValue::Bool(s == "true");
    }
    CellValue::String(s.to_string())
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a flat Parquet table, as written by `df.to_parquet()` or by the
/// `generate_sample` binary.
fn load_parquet(path: &Path) -> Result<SurveyDataset> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();
        let names: Vec<String> = schema.fields().iter().map(|f| f.name().clone()).collect();

        for row in 0..batch.num_rows() {
            let raw: BTreeMap<String, CellValue> = names
                .iter()
                .enumerate()
                .map(|(col_idx, name)| (name.clone(), extract_cell(batch.column(col_idx), row)))
                .collect();
            records.push(clean_record(raw));
        }
    }

    Ok(SurveyDataset::from_records(records))
}

/// Extract a single cell from an Arrow column at a given row.
fn extract_cell(col: &Arc<dyn Array>, row: usize) -> CellValue {
    if col.is_null(row) {
        return CellValue::Null;
    }
    let any = col.as_any();
    match col.data_type() {
        DataType::Utf8 => any
            .downcast_ref::<StringArray>()
            .map(|a| CellValue::String(a.value(row).to_string()))
            .unwrap_or(CellValue::Null),
        DataType::LargeUtf8 => CellValue::String(col.as_string::<i64>().value(row).to_string()),
        DataType::Int32 => any
            .downcast_ref::<Int32Array>()
            .map(|a| CellValue::Integer(a.value(row) as i64))
            .unwrap_or(CellValue::Null),
        DataType::Int64 => any
            .downcast_ref::<Int64Array>()
            .map(|a| CellValue::Integer(a.value(row)))
            .unwrap_or(CellValue::Null),
        DataType::Float32 => any
            .downcast_ref::<Float32Array>()
            .map(|a| CellValue::Float(a.value(row) as f64))
            .unwrap_or(CellValue::Null),
        DataType::Float64 => any
            .downcast_ref::<Float64Array>()
            .map(|a| CellValue::Float(a.value(row)))
            .unwrap_or(CellValue::Null),
        DataType::Boolean => any
            .downcast_ref::<BooleanArray>()
            .map(|a| CellValue::Bool(a.value(row)))
            .unwrap_or(CellValue::Null),
        other => {
            log::warn!("unsupported parquet column type {other:?}, treating as missing");
            CellValue::Null
        }
    }
}
