//! Error taxonomy for statement loading and report queries.

use thiserror::Error;

/// Errors surfaced by the loader and the report primitives.
///
/// `DataFormat` and `Parse` are swallowed at the loader/aggregation boundary
/// (logged, degraded to empty results); `Validation` marks expected
/// user-input problems and is surfaced to the caller.
#[derive(Debug, Error)]
pub enum Error {
    /// The source table is missing required columns or is otherwise malformed.
    #[error("malformed source data: {0}")]
    DataFormat(String),

    /// A date or amount cell could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),

    /// User-supplied input failed validation.
    #[error("invalid input: {0}")]
    Validation(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
