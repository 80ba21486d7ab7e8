// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2025 Jonathan D.A. Jewell
//! Errors raised while reading a bid table

use std::path::PathBuf;

/// A bid table could not be turned into validated bids.
///
/// Row numbers count data rows from 1; the header line is not counted.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// The input could not be opened
    #[error("failed to open {}: {source}", .path.display())]
    Io {
        /// Offending path
        path: PathBuf,
        /// Underlying error
        source: std::io::Error,
    },

    /// The CSV layer rejected the input
    #[error("malformed CSV: {0}")]
    Csv(#[from] csv::Error),

    /// The JSON layer rejected the input
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A required column is absent from the header
    #[error("missing required column `{column}`")]
    MissingColumn {
        /// Column name
        column: &'static str,
    },

    /// A required column appears more than once (counting its alias)
    #[error("column `{column}` appears more than once")]
    DuplicateColumn {
        /// Column name
        column: &'static str,
    },

    /// A required cell is absent or blank
    #[error("row {row}: missing value for `{field}`")]
    MissingField {
        /// 1-based data row
        row: usize,
        /// Column name
        field: &'static str,
    },

    /// A numeric cell does not hold a number
    #[error("row {row}: `{field}` is not a number: {value:?}")]
    NotNumeric {
        /// 1-based data row
        row: usize,
        /// Column name
        field: &'static str,
        /// Raw cell text
        value: String,
    },

    /// A JSON cell holds a value of the wrong type for its column
    #[error("row {row}: `{field}` has unexpected type {found}")]
    WrongType {
        /// 1-based data row
        row: usize,
        /// Column name
        field: &'static str,
        /// JSON type that was found
        found: &'static str,
    },

    /// A percentage outside `0..=100`
    #[error("row {row}: `{field}` must be within 0..=100, got {value}")]
    OutOfRange {
        /// 1-based data row
        row: usize,
        /// Column name
        field: &'static str,
        /// Parsed value
        value: f64,
    },

    /// The input format could not be determined
    #[error("unknown input format: {0}. Supported: csv, json")]
    UnknownFormat(String),
}

impl IngestError {
    /// Data row the error refers to, if it is row-specific
    #[must_use]
    pub fn row(&self) -> Option<usize> {
        match self {
            Self::MissingField { row, .. }
            | Self::NotNumeric { row, .. }
            | Self::WrongType { row, .. }
            | Self::OutOfRange { row, .. } => Some(*row),
            _ => None,
        }
    }

    /// Column the error refers to, if any
    #[must_use]
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::MissingColumn { column } | Self::DuplicateColumn { column } => Some(*column),
            Self::MissingField { field, .. }
            | Self::NotNumeric { field, .. }
            | Self::WrongType { field, .. }
            | Self::OutOfRange { field, .. } => Some(*field),
            _ => None,
        }
    }
}
