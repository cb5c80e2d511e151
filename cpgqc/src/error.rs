//! Error taxonomy of the pipeline.
//!
//! [`ValidationError`] covers everything that can be wrong with a table once
//! it is in memory. [`IngestError`] refines it for the loading stage, where
//! raw bytes have to be decoded first. Every message is meant to be shown to
//! the end user as is.

use polars::prelude::PolarsError;
use thiserror::Error;

/// A table failed one of the validation checks.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error(
        "The uploaded file is empty. Please provide a CSV/TSV with at least \
         one data row."
    )]
    EmptyTable,

    #[error(
        "Missing required column(s): {}. Include these columns (or known \
         aliases) and upload again.",
        .0.join(", ")
    )]
    MissingColumns(Vec<String>),

    #[error(
        "Found {0} non-numeric beta value(s). Beta values must be numeric \
         between 0 and 1."
    )]
    NonNumericBeta(usize),

    #[error(
        "Found {0} beta value(s) outside [0, 1]. Fix out-of-range values and \
         re-upload."
    )]
    BetaOutOfRange(usize),

    /// Frame construction failed. Not reachable from well-formed input.
    #[error("Internal table error: {0}")]
    Frame(String),
}

impl From<PolarsError> for ValidationError {
    fn from(value: PolarsError) -> Self {
        ValidationError::Frame(value.to_string())
    }
}

/// Loading an upload failed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IngestError {
    #[error(
        "The uploaded file is empty. Please choose a non-empty CSV/TSV file."
    )]
    EmptyUpload,

    #[error(
        "The uploaded file appears empty. Please upload a CSV/TSV file with \
         header and rows."
    )]
    EmptyInput,

    #[error(
        "Could not parse the uploaded file. Please upload a valid CSV/TSV \
         with a header row. (line {line}: {reason})"
    )]
    Parse { line: u64, reason: String },

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl IngestError {
    pub(crate) fn parse(
        line: u64,
        reason: impl Into<String>,
    ) -> Self {
        IngestError::Parse {
            line,
            reason: reason.into(),
        }
    }
}
