use std::io::Read;
use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result, bail};
use arrow::array::{
    Array, ArrayRef, AsArray, Float32Array, Float64Array, Int32Array, Int64Array, StringArray,
};
use arrow::compute::cast;
use arrow::datatypes::DataType;
use parquet::arrow::arrow_reader::ParquetRecordBatchReaderBuilder;
use serde_json::Value as JsonValue;

use super::model::{
    LaunchContext, RawLaunchRecord, LAUNCH_SITE_COLUMN, MISSION_OUTCOME_COLUMN,
    PAYLOAD_MASS_COLUMN,
};
use super::normalize::{build_context, is_missing_marker, MissingPayload};
use crate::error::DashError;

const REQUIRED_COLUMNS: [&str; 3] = [LAUNCH_SITE_COLUMN, MISSION_OUTCOME_COLUMN, PAYLOAD_MASS_COLUMN];

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Read the dataset once and normalize it into a [`LaunchContext`].
///
/// Any read problem becomes [`DashError::DatasetLoadFailure`]; an unparsable
/// payload becomes [`DashError::MalformedPayloadValue`].
pub fn load_context(path: &Path, policy: MissingPayload) -> crate::error::Result<LaunchContext> {
    let raw = load_file(path).map_err(|e| DashError::load(path, format!("{e:#}")))?;
    log::debug!("read {} raw rows from {}", raw.len(), path.display());

    let ctx = build_context(raw, policy)?;
    if ctx.is_empty() {
        log::warn!("{} contains no launch rows", path.display());
    }
    match (ctx.min_payload(), ctx.max_payload()) {
        (Some(min), Some(max)) => log::info!(
            "Loaded {} launches from {} (payload {min} – {max} kg)",
            ctx.len(),
            path.display()
        ),
        _ => log::info!(
            "Loaded {} launches from {} (no payload values)",
            ctx.len(),
            path.display()
        ),
    }
    Ok(ctx)
}

/// Load raw launch rows from a file.  Dispatch by extension.
///
/// Supported formats:
/// * `.csv`     – header row naming at least the three launch columns
/// * `.json`    – `[{ "Launch Site": ..., "Mission Outcome": ..., "Payload Mass (kg)": ... }, ...]`
/// * `.parquet` – same columns, payload as text or number
pub fn load_file(path: &Path) -> Result<Vec<RawLaunchRecord>> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "csv" => load_csv(path),
        "json" => load_json(path),
        "parquet" | "pq" => load_parquet(path),
        other => bail!("Unsupported file extension: .{other}"),
    }
}

// ---------------------------------------------------------------------------
// CSV loader
// ---------------------------------------------------------------------------

fn load_csv(path: &Path) -> Result<Vec<RawLaunchRecord>> {
    let file = std::fs::File::open(path).context("opening CSV")?;
    read_csv(file)
}

/// Parse launch rows from CSV text. Extra columns are ignored; an empty
/// payload cell or a missing-value marker (`N/A`, `NaN`, `null`, ...) reads
/// as absent.
pub fn read_csv<R: Read>(input: R) -> Result<Vec<RawLaunchRecord>> {
    let mut reader = csv::Reader::from_reader(input);
    let headers = reader.headers().context("reading CSV headers")?.clone();

    for column in REQUIRED_COLUMNS {
        if !headers.iter().any(|h| h == column) {
            bail!("CSV missing '{column}' column");
        }
    }

    reader
        .deserialize::<RawLaunchRecord>()
        .enumerate()
        .map(|(row_no, result)| -> Result<RawLaunchRecord> {
            let mut rec = result.with_context(|| format!("CSV row {}", row_no + 1))?;
            rec.payload_mass = rec.payload_mass.filter(|text| !is_missing_marker(text));
            Ok(rec)
        })
        .collect()
}

// ---------------------------------------------------------------------------
// JSON loader
// ---------------------------------------------------------------------------

/// Expected JSON schema (records-oriented, the default `df.to_json(orient='records')`):
///
/// ```json
/// [
///   { "Launch Site": "CCAFS LC-40", "Mission Outcome": "Success", "Payload Mass (kg)": "~4,700" },
///   ...
/// ]
/// ```
fn load_json(path: &Path) -> Result<Vec<RawLaunchRecord>> {
    let text = std::fs::read_to_string(path).context("reading JSON file")?;
    read_json(&text)
}

pub fn read_json(text: &str) -> Result<Vec<RawLaunchRecord>> {
    let root: JsonValue = serde_json::from_str(text).context("parsing JSON")?;

    let records = root
        .as_array()
        .context("Expected top-level JSON array")?;

    records
        .iter()
        .enumerate()
        .map(|(i, rec)| -> Result<RawLaunchRecord> {
            let obj = rec
                .as_object()
                .with_context(|| format!("Row {} is not a JSON object", i + 1))?;

            let required = |column: &str| {
                obj.get(column)
                    .and_then(json_to_text)
                    .with_context(|| format!("Row {}: missing '{column}'", i + 1))
            };

            Ok(RawLaunchRecord {
                launch_site: required(LAUNCH_SITE_COLUMN)?,
                mission_outcome: required(MISSION_OUTCOME_COLUMN)?,
                payload_mass: obj.get(PAYLOAD_MASS_COLUMN).and_then(json_to_text),
            })
        })
        .collect()
}

/// Text form of a scalar cell. `null` (and nested values) read as absent.
fn json_to_text(val: &JsonValue) -> Option<String> {
    match val {
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        JsonValue::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

// ---------------------------------------------------------------------------
// Parquet loader
// ---------------------------------------------------------------------------

/// Load a Parquet file containing launch records.
///
/// Expected schema: `Launch Site` and `Mission Outcome` as Utf8, and
/// `Payload Mass (kg)` as Utf8 (raw text) or any integer/float type.
/// Dictionary-encoded columns (pandas categoricals) are decoded to their
/// value type first.
fn load_parquet(path: &Path) -> Result<Vec<RawLaunchRecord>> {
    let file = std::fs::File::open(path).context("opening parquet file")?;
    let builder = ParquetRecordBatchReaderBuilder::try_new(file)
        .context("reading parquet metadata")?;
    let reader = builder.build().context("building parquet reader")?;

    let mut records = Vec::new();

    for batch_result in reader {
        let batch = batch_result.context("reading parquet record batch")?;
        let schema = batch.schema();

        let column = |name: &str| -> Result<ArrayRef> {
            let idx = schema
                .index_of(name)
                .map_err(|_| anyhow::anyhow!("Parquet file missing '{name}' column"))?;
            decode_dictionary(batch.column(idx))
                .with_context(|| format!("decoding '{name}' column"))
        };
        let site_col = column(LAUNCH_SITE_COLUMN)?;
        let outcome_col = column(MISSION_OUTCOME_COLUMN)?;
        let payload_col = column(PAYLOAD_MASS_COLUMN)?;

        for row in 0..batch.num_rows() {
            let row_no = records.len() + 1;
            let launch_site = extract_text(&site_col, row)?
                .with_context(|| format!("Row {row_no}: null '{LAUNCH_SITE_COLUMN}'"))?;
            let mission_outcome = extract_text(&outcome_col, row)?
                .with_context(|| format!("Row {row_no}: null '{MISSION_OUTCOME_COLUMN}'"))?;
            let payload_mass = extract_text(&payload_col, row)
                .with_context(|| format!("Row {row_no}: failed to read '{PAYLOAD_MASS_COLUMN}'"))?;

            records.push(RawLaunchRecord {
                launch_site,
                mission_outcome,
                payload_mass,
            });
        }
    }

    Ok(records)
}

// -- Parquet / Arrow helpers --

/// Cast a dictionary-encoded column to its value type; other columns are
/// returned as-is.
fn decode_dictionary(col: &ArrayRef) -> Result<ArrayRef> {
    match col.data_type() {
        DataType::Dictionary(_, value_type) => Ok(cast(col.as_ref(), value_type.as_ref())?),
        _ => Ok(Arc::clone(col)),
    }
}

/// Text form of a single Arrow cell; `None` for null.
fn extract_text(col: &Arc<dyn Array>, row: usize) -> Result<Option<String>> {
    if col.is_null(row) {
        return Ok(None);
    }
    let text = match col.data_type() {
        DataType::Utf8 => {
            let arr = col
                .as_any()
                .downcast_ref::<StringArray>()
                .context("expected StringArray")?;
            arr.value(row).to_string()
        }
        DataType::LargeUtf8 => col.as_string::<i64>().value(row).to_string(),
        DataType::Int32 => {
            let arr = col
                .as_any()
                .downcast_ref::<Int32Array>()
                .context("expected Int32Array")?;
            arr.value(row).to_string()
        }
        DataType::Int64 => {
            let arr = col
                .as_any()
                .downcast_ref::<Int64Array>()
                .context("expected Int64Array")?;
            arr.value(row).to_string()
        }
        DataType::Float32 => {
            let arr = col
                .as_any()
                .downcast_ref::<Float32Array>()
                .context("expected Float32Array")?;
            return Ok(float_text(arr.value(row) as f64));
        }
        DataType::Float64 => {
            let arr = col
                .as_any()
                .downcast_ref::<Float64Array>()
                .context("expected Float64Array")?;
            return Ok(float_text(arr.value(row)));
        }
        other => bail!("Unsupported column type {other:?}"),
    };
    Ok(Some(text))
}

/// Pandas writes absent floats as NaN rather than null.
fn float_text(value: f64) -> Option<String> {
    if value.is_nan() {
        None
    } else {
        Some(value.to_string())
    }
}
