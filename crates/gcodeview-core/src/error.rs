//! Error handling for GCodeView
//!
//! Provides the error types shared across the workspace:
//! - G-Code errors (unsupported modes, invalid expressions, table edits)
//! - A unified `Error` for public APIs that touch I/O
//!
//! All error types use `thiserror` for ergonomic error handling. Parsing,
//! projection and hit resolution are total and never return these; they are
//! produced at the edges (search patterns, table edits, file access).

use thiserror::Error;

/// G-Code error type
///
/// Represents errors related to G-Code interpretation and editing.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GcodeError {
    /// Relative positioning was encountered
    #[error("Relative coordinates (G91) unsupported at line {line}")]
    RelativeModeUnsupported {
        /// The 0-based source line of the G91 statement.
        line: usize,
    },

    /// A search pattern failed to compile
    #[error("Invalid expression '{pattern}': {reason}")]
    InvalidExpression {
        /// The pattern as typed by the user.
        pattern: String,
        /// The compiler's explanation.
        reason: String,
    },

    /// A table row index was out of range
    #[error("Row {row} out of range (rows: {total})")]
    RowOutOfRange {
        /// The requested row.
        row: usize,
        /// The number of rows in the table.
        total: usize,
    },
}

/// Main error type for GCodeView
///
/// A unified error type that can represent any error from all layers.
#[derive(Error, Debug)]
pub enum Error {
    /// G-Code error
    #[error(transparent)]
    Gcode(#[from] GcodeError),

    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create an error from a string message
    pub fn other(msg: impl Into<String>) -> Self {
        Error::Other(msg.into())
    }

    /// Check if this is a G-Code error
    pub fn is_gcode_error(&self) -> bool {
        matches!(self, Error::Gcode(_))
    }
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
