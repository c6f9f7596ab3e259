//! Error taxonomy for construction and codec failures.
//!
//! Illegal gameplay moves are not errors; they come back as boolean no-ops.
//! Terminal game conditions (Won/Lost) are ordinary mode values.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    /// Construction-time failure; no partially built engine or grid is observable.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    /// Malformed encoded-grid text; the caller decides the fallback.
    #[error("malformed grid text: {0}")]
    Format(String),

    /// Direct cell access outside grid bounds. Indicates a bug in the caller;
    /// never produced by normal play.
    #[error("cell access out of bounds: row {row}, col {col}")]
    IndexOutOfBounds { row: i16, col: i16 },
}
