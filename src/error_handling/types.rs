//! Error type definitions.
//!
//! This module defines all error types used throughout the application.

use std::path::PathBuf;

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),

    /// The configured endpoint is not a valid URL.
    #[error("Invalid geocoding endpoint {0:?}: {1}")]
    EndpointError(String, url::ParseError),
}

/// Error types for workbook operations.
#[derive(Error, Debug)]
pub enum SheetError {
    /// The input workbook could not be opened or parsed.
    #[error("Error opening file {path}: {source}")]
    Open {
        /// Workbook path
        path: PathBuf,
        /// Underlying reader error
        #[source]
        source: calamine::Error,
    },

    /// The workbook contains no worksheet.
    #[error("Workbook {0} contains no worksheet")]
    NoWorksheet(PathBuf),

    /// The output workbook could not be written.
    #[error("Error saving file {path}: {source}")]
    Save {
        /// Workbook path
        path: PathBuf,
        /// Underlying writer error
        #[source]
        source: rust_xlsxwriter::XlsxError,
    },

    /// A column label is not made of ASCII letters.
    #[error("Invalid column label {0:?}")]
    InvalidColumn(String),

    /// A cell lies beyond what the xlsx format can address.
    #[error("Cell at row {row}, column {column} is outside the xlsx grid")]
    OutOfGrid {
        /// Zero-based row index
        row: usize,
        /// Zero-based column index
        column: usize,
    },
}

/// Fatal conditions detected by the run before or around dispatch.
#[derive(Error, Debug)]
pub enum RunError {
    /// The address column yielded nothing to geocode.
    #[error("No values found in column {column}")]
    NoData {
        /// Column label that was read
        column: String,
    },

    /// The output path would overwrite the input workbook.
    #[error("Output path {0} is the same as the input workbook")]
    OutputIsInput(PathBuf),
}

/// Failure of a single address lookup.
///
/// These never abort the whole run; they only trigger the failure policy of
/// the worker that hit them.
#[derive(Error, Debug)]
pub enum GeocodeError {
    /// Network error, non-success HTTP status, or unreadable body.
    #[error("Transport failure: {0}")]
    TransportFailure(#[from] ReqwestError),

    /// The body is not the expected JSON document.
    #[error("Malformed response: {0}")]
    ParseFailure(#[from] serde_json::Error),

    /// Empty result list or first result without geometry.
    #[error("Unable to extract coordinates")]
    NoResult,
}

impl GeocodeError {
    /// Returns the statistics bucket for this error.
    pub fn kind(&self) -> FailureKind {
        match self {
            GeocodeError::TransportFailure(_) => FailureKind::Transport,
            GeocodeError::ParseFailure(_) => FailureKind::Parse,
            GeocodeError::NoResult => FailureKind::NoResult,
        }
    }
}

/// Categories of per-address lookup failures, tracked by `FailureStats`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum FailureKind {
    /// Network or HTTP status failure
    Transport,
    /// Malformed response body
    Parse,
    /// No usable result
    NoResult,
}

impl FailureKind {
    /// Returns a human-readable label.
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::Transport => "Transport failure",
            FailureKind::Parse => "Malformed response",
            FailureKind::NoResult => "No result",
        }
    }
}
