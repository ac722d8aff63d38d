//! Error types for the G-code editor crate.
//!
//! This module provides structured error types for text buffer access,
//! snapshot history, find/replace and the edit session state machine.

use gcodeview_core::GcodeError;
use thiserror::Error;

use crate::session::SessionState;

/// Errors that can occur during editor operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EditorError {
    /// The requested line does not exist.
    #[error("Line out of bounds: {line} (total: {total})")]
    LineOutOfBounds { line: usize, total: usize },

    /// The undo stack is empty.
    #[error("Nothing to undo")]
    NothingToUndo,

    /// The redo stack is empty.
    #[error("Nothing to redo")]
    NothingToRedo,

    /// An edit arrived while the session was busy.
    #[error("Edit rejected while {state}")]
    EditRejected { state: SessionState },

    /// A find/replace pattern failed.
    #[error(transparent)]
    Search(#[from] SearchError),

    /// A table or interpretation operation failed.
    #[error(transparent)]
    Gcode(#[from] GcodeError),
}

/// Find/replace errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The pattern failed to compile.
    #[error("Invalid expression '{pattern}': {reason}")]
    InvalidExpression { pattern: String, reason: String },
}

impl From<SearchError> for GcodeError {
    fn from(err: SearchError) -> Self {
        match err {
            SearchError::InvalidExpression { pattern, reason } => {
                GcodeError::InvalidExpression { pattern, reason }
            }
        }
    }
}

/// Result type alias for editor operations.
pub type EditorResult<T> = Result<T, EditorError>;
