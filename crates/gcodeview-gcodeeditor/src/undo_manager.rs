//! Whole-text snapshot history for undo/redo

use gcodeview_core::constants::MAX_HISTORY_DEPTH;
use std::collections::VecDeque;
use tracing::debug;

use crate::error::{EditorError, EditorResult};

/// Bounded undo/redo stacks of full document snapshots
///
/// Recording a new text clears the redo stack; undo and redo replays do not
/// go through [`record`](Self::record) and so keep it.
#[derive(Debug, Clone)]
pub struct TextHistory {
    current: String,
    undo_stack: VecDeque<String>,
    redo_stack: Vec<String>,
    max_depth: usize,
}

impl TextHistory {
    /// Create a history with default depth (50)
    pub fn new(initial: impl Into<String>) -> Self {
        Self::with_depth(initial, MAX_HISTORY_DEPTH)
    }

    pub fn with_depth(initial: impl Into<String>, max_depth: usize) -> Self {
        Self {
            current: initial.into(),
            undo_stack: VecDeque::with_capacity(max_depth),
            redo_stack: Vec::new(),
            max_depth: max_depth.max(1),
        }
    }

    pub fn current(&self) -> &str {
        &self.current
    }

    /// Record a new text; returns false if it equals the current one
    pub fn record(&mut self, text: &str) -> bool {
        if text == self.current {
            return false;
        }
        let previous = std::mem::replace(&mut self.current, text.to_string());
        self.undo_stack.push_back(previous);
        if self.undo_stack.len() > self.max_depth {
            self.undo_stack.pop_front();
        }
        self.redo_stack.clear();
        true
    }

    /// Step back; returns the restored text
    pub fn undo(&mut self) -> EditorResult<&str> {
        let previous = self.undo_stack.pop_back().ok_or(EditorError::NothingToUndo)?;
        let undone = std::mem::replace(&mut self.current, previous);
        self.redo_stack.push(undone);
        debug!(
            "Undo: {} undo / {} redo entries left",
            self.undo_stack.len(),
            self.redo_stack.len()
        );
        Ok(&self.current)
    }

    /// Step forward; returns the restored text
    pub fn redo(&mut self) -> EditorResult<&str> {
        let next = self.redo_stack.pop().ok_or(EditorError::NothingToRedo)?;
        let redone = std::mem::replace(&mut self.current, next);
        self.undo_stack.push_back(redone);
        if self.undo_stack.len() > self.max_depth {
            self.undo_stack.pop_front();
        }
        debug!(
            "Redo: {} undo / {} redo entries left",
            self.undo_stack.len(),
            self.redo_stack.len()
        );
        Ok(&self.current)
    }

    /// Forget all history and start from `text`
    pub fn reset(&mut self, text: impl Into<String>) {
        self.current = text.into();
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_count(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_count(&self) -> usize {
        self.redo_stack.len()
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }
}

impl Default for TextHistory {
    fn default() -> Self {
        Self::new(String::new())
    }
}
