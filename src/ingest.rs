// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Bid table ingestion
//!
//! Turns CSV or JSON bid tables into validated [`Bid`] records. Ingestion is
//! fail-fast: the first malformed row aborts the read and is reported by row
//! number and column, so a graph is never built from a partial table.

use crate::error::IngestError;
use crate::types::Bid;
use serde::Deserialize;
use serde_json::Value;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;
use std::str::FromStr;
use tracing::debug;

/// Column holding the auction lot identifier
pub const BLOCK_CODE: &str = "block_code";
/// Column holding the bidding company
pub const COMPANY: &str = "company";
/// Column holding the bid percentage
pub const PERCENTAGE_BID: &str = "percentage_bid";
/// Misspelling of [`PERCENTAGE_BID`] used by the source dataset
pub const PERCENTAGE_BID_ALIAS: &str = "precentage_bid";

/// Supported bid table encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// Comma-separated values with a header row
    Csv,
    /// JSON array of row objects
    Json,
}

impl InputFormat {
    /// Guess the format from a file extension
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| ext.parse().ok())
    }
}

impl FromStr for InputFormat {
    type Err = IngestError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            _ => Err(IngestError::UnknownFormat(s.to_string())),
        }
    }
}

/// CSV row before validation
#[derive(Debug, Deserialize)]
struct CsvRow {
    #[serde(default)]
    block_code: Option<String>,
    #[serde(default)]
    company: Option<String>,
    #[serde(default, alias = "precentage_bid")]
    percentage_bid: Option<String>,
}

/// JSON row before validation; cell types are checked per column
#[derive(Debug, Deserialize)]
struct JsonRow {
    #[serde(default)]
    block_code: Option<Value>,
    #[serde(default)]
    company: Option<Value>,
    #[serde(default, alias = "precentage_bid")]
    percentage_bid: Option<Value>,
}

/// Read bids from CSV with a header row
pub fn read_csv<R: Read>(reader: R) -> Result<Vec<Bid>, IngestError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    check_headers(&headers)?;

    let mut bids = Vec::new();
    for (i, result) in rdr.deserialize::<CsvRow>().enumerate() {
        let raw = result?;
        bids.push(validate_row(i + 1, raw.block_code, raw.company, raw.percentage_bid)?);
    }

    debug!(rows = bids.len(), "read CSV bid table");
    Ok(bids)
}

/// Read bids from a JSON array of row objects
pub fn read_json<R: Read>(reader: R) -> Result<Vec<Bid>, IngestError> {
    let rows: Vec<JsonRow> = serde_json::from_reader(reader)?;

    let mut bids = Vec::with_capacity(rows.len());
    for (i, raw) in rows.into_iter().enumerate() {
        let row = i + 1;
        let block_code = json_cell(row, BLOCK_CODE, raw.block_code, |v| match v {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) if n.is_i64() || n.is_u64() => Some(n.to_string()),
            _ => None,
        })?;
        let company = json_cell(row, COMPANY, raw.company, |v| v.as_str().map(str::to_string))?;
        let percentage_bid = json_cell(row, PERCENTAGE_BID, raw.percentage_bid, |v| match v {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })?;
        bids.push(validate_row(row, block_code, company, percentage_bid)?);
    }

    debug!(rows = bids.len(), "read JSON bid table");
    Ok(bids)
}

/// Read bids from a file.
///
/// When `format` is `None` it is taken from the file extension.
pub fn read_path(path: &Path, format: Option<InputFormat>) -> Result<Vec<Bid>, IngestError> {
    let format = match format {
        Some(f) => f,
        None => InputFormat::from_path(path)
            .ok_or_else(|| IngestError::UnknownFormat(path.display().to_string()))?,
    };

    let file = File::open(path).map_err(|source| IngestError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);

    debug!(path = %path.display(), ?format, "reading bid table");
    match format {
        InputFormat::Csv => read_csv(reader),
        InputFormat::Json => read_json(reader),
    }
}

/// Required columns with the header names accepted for each
const REQUIRED_COLUMNS: [(&str, &[&str]); 3] = [
    (BLOCK_CODE, &[BLOCK_CODE]),
    (COMPANY, &[COMPANY]),
    (PERCENTAGE_BID, &[PERCENTAGE_BID, PERCENTAGE_BID_ALIAS]),
];

/// Every required column must appear exactly once; the misspelt percentage
/// header counts as the same column.
fn check_headers(headers: &csv::StringRecord) -> Result<(), IngestError> {
    for (column, names) in REQUIRED_COLUMNS {
        match headers.iter().filter(|h| names.contains(h)).count() {
            0 => return Err(IngestError::MissingColumn { column }),
            1 => {}
            _ => return Err(IngestError::DuplicateColumn { column }),
        }
    }
    Ok(())
}

/// Extract the text of a JSON cell; `accept` returns `None` for a value of
/// the wrong type. Null and absent cells are left for [`validate_row`].
fn json_cell(
    row: usize,
    field: &'static str,
    value: Option<Value>,
    accept: impl Fn(&Value) -> Option<String>,
) -> Result<Option<String>, IngestError> {
    match value {
        None | Some(Value::Null) => Ok(None),
        Some(v) => accept(&v).map(Some).ok_or(IngestError::WrongType {
            row,
            field,
            found: json_type_name(&v),
        }),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(n) if n.is_f64() => "float",
        Value::Number(_) => "integer",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Check one row and turn it into a [`Bid`]
fn validate_row(
    row: usize,
    block_code: Option<String>,
    company: Option<String>,
    percentage_bid: Option<String>,
) -> Result<Bid, IngestError> {
    let block_code = required(row, BLOCK_CODE, block_code)?;
    let company = required(row, COMPANY, company)?;
    let raw_pct = required(row, PERCENTAGE_BID, percentage_bid)?;

    let percentage_bid: f64 = raw_pct.parse().map_err(|_| IngestError::NotNumeric {
        row,
        field: PERCENTAGE_BID,
        value: raw_pct.clone(),
    })?;
    if !percentage_bid.is_finite() {
        return Err(IngestError::NotNumeric {
            row,
            field: PERCENTAGE_BID,
            value: raw_pct,
        });
    }
    if !(0.0..=100.0).contains(&percentage_bid) {
        return Err(IngestError::OutOfRange {
            row,
            field: PERCENTAGE_BID,
            value: percentage_bid,
        });
    }

    Ok(Bid {
        block_code,
        company,
        percentage_bid,
    })
}

fn required(row: usize, field: &'static str, value: Option<String>) -> Result<String, IngestError> {
    match value.map(|v| v.trim().to_string()) {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(IngestError::MissingField { row, field }),
    }
}
