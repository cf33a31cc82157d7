use std::path::Path;
use std::sync::Arc;

use anyhow::{bail, Context, Result};
use arrow::array::{Array, Float32Array, Float64Array, Int64Array};
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a 2-D point table from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.parquet` – numeric `x` and `y` columns (recommended)
/// * `.json`    – `[{ "x": 1.2, "y": 3.4 }, ...]`
/// * `.csv`     – header row with `x` and `y` columns, one float per cell
pub fn load_points(path: &Path) -> Result<Vec<Vec<f64>>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "parquet" | "pq" => load_parquet(path),
        "json" => load_json(path),
        "csv" => load_csv(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented):
///
/// ```json
/// [
///   { "x": 2.1, "y": 1.9 },
///   { "x": -3.7, "y": 0.4 }
/// ]
/// ```
fn load_json(path: &Path) -> Result<Vec<Vec<f64>>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    let root: JsonValue = serde_json::from_str(&text).context("parsing JSON")?;

    let records = root.as_array().context("Expected top-level JSON array")?;

    let mut points = Vec::with_capacity(records.len());
    for (i, rec) in records.iter().enumerate() {
        let obj = rec
            .as_object()
            .with_context(|| format!("Row {i} is not a JSON object"))?;
        let x = obj
            .get("x")
            .and_then(|v| v.as_f64())
            .with_context(|| format!("Row {i}: missing or non-numeric 'x'"))?;
        let y = obj
            .get("y")
            .and_then(|v| v.as_f64())
            .with_context(|| format!("Row {i}: missing or non-numeric 'y'"))?;
        points.push(vec![x, y]);
    }
    Ok(points)
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

/// CSV layout: header row naming the columns; `x` and `y` hold one float
/// each. Extra columns are ignored.
fn load_csv(path: &Path) -> Result<Vec<Vec<f64>>> {
    let mut reader = csv::Reader::from_path(path).context("opening CSV")?;
    let headers: Vec<String> = reader
        .headers()
        .context("reading CSV headers")?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let x_idx = headers
        .iter()
        .position(|h| h == "x")
        .context("CSV missing 'x' column")?;
    let y_idx = headers
        .iter()
        .position(|h| h == "y")
        .context("CSV missing 'y' column")?;

    let mut points = Vec::new();
    for (row_no, result) in reader.records().enumerate() {
        let record = result.with_context(|| format!("CSV row {row_no}"))?;
        let x = parse_float(record.get(x_idx).unwrap_or(""), row_no, "x")?;
        let y = parse_float(record.get(y_idx).unwrap_or(""), row_no, "y")?;
        points.push(vec![x, y]);
    }
    Ok(points)
}

fn parse_float(s: &str, row: usize, col: &str) -> Result<f64> {
    s.trim()
        .parse::<f64>()
        .with_context(|| format!("Row {row}, {col}: '{s}' is not a number"))
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file of 2-D points.
///
/// Expected schema: numeric `x` and `y` columns (Float64, Float32 or Int64).
/// Any other columns are ignored.  Works with files written by
/// `generate_points` as well as Pandas/Polars exports.
fn load_parquet(path: &Path) -> Result<Vec<Vec<f64>>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder =
        ParquetRecordBatchReaderBuilder::try_new(file).context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut points = Vec::new();
    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        let x_idx = schema
            .index_of("x")
            .map_err(|_| anyhow::anyhow!("Parquet file missing 'x' column"))?;
        let y_idx = schema
            .index_of("y")
            .map_err(|_| anyhow::anyhow!("Parquet file missing 'y' column"))?;

        let xs = numeric_values(batch.column(x_idx), "x")?;
        let ys = numeric_values(batch.column(y_idx), "y")?;

        points.extend(xs.into_iter().zip(ys).map(|(x, y)| vec![x, y]));
    }
    Ok(points)
}

// -- Parquet / Arrow helpers --

/// Read a whole numeric column as `f64`s; nulls become NaN.
fn numeric_values(col: &Arc<dyn Array>, name: &str) -> Result<Vec<f64>> {
    match col.data_type() {
        DataType::Float64 => {
            let arr = col
                .as_any()
                .downcast_ref::<Float64Array>()
                .context("expected Float64Array")?;
            Ok(arr.iter().map(|v| v.unwrap_or(f64::NAN)).collect())
        }
        DataType::Float32 => {
            let arr = col
                .as_any()
                .downcast_ref::<Float32Array>()
                .context("expected Float32Array")?;
            Ok(arr.iter().map(|v| v.unwrap_or(f32::NAN) as f64).collect())
        }
        DataType::Int64 => {
            let arr = col
                .as_any()
                .downcast_ref::<Int64Array>()
                .context("expected Int64Array")?;
            Ok(arr.iter().map(|v| v.map(|i| i as f64).unwrap_or(f64::NAN)).collect())
        }
        other => bail!("Column '{name}' has type {other:?}, expected Float64, Float32 or Int64"),
    }
}
