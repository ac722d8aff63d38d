//! Rope-backed document text

use ropey::Rope;
use std::fmt;
use std::ops::Range;

use crate::error::{EditorError, EditorResult};

/// Document text stored in a rope
///
/// Lines are separated by `'\n'` only, so line indices agree with the ones
/// reported by interpretation and diagnostics.
#[derive(Clone, Debug, Default)]
pub struct TextBuffer {
    rope: Rope,
}

impl TextBuffer {
    /// Create a new empty text buffer
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// Total number of lines; a trailing newline starts an empty last line
    pub fn len_lines(&self) -> usize {
        self.rope.len_lines()
    }

    pub fn is_empty(&self) -> bool {
        self.rope.len_bytes() == 0
    }

    /// Replace the whole text
    pub fn set_text(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
    }

    /// Text of a line without its line break
    pub fn line(&self, line_idx: usize) -> Option<String> {
        let range = self.line_char_range(line_idx).ok()?;
        Some(self.rope.slice(range).to_string())
    }

    /// Character range of a line, excluding its line break
    pub fn line_char_range(&self, line_idx: usize) -> EditorResult<Range<usize>> {
        let total = self.len_lines();
        if line_idx >= total {
            return Err(EditorError::LineOutOfBounds {
                line: line_idx,
                total,
            });
        }
        let start = self.rope.line_to_char(line_idx);
        let line = self.rope.line(line_idx);
        let mut end = start + line.len_chars();
        if line.chars().last() == Some('\n') {
            end -= 1;
        }
        Ok(start..end)
    }

    /// Replace text in character range
    pub fn replace(&mut self, char_range: Range<usize>, text: &str) {
        let start = char_range.start.min(self.len_chars());
        let end = char_range.end.min(self.len_chars()).max(start);
        if start < end {
            self.rope.remove(start..end);
        }
        self.rope.insert(start, text);
    }

    /// Convert char index to line/column
    pub fn char_to_line_col(&self, char_idx: usize) -> (usize, usize) {
        let char_idx = char_idx.min(self.len_chars());
        let line_idx = self.rope.char_to_line(char_idx);
        let line_start = self.rope.line_to_char(line_idx);
        (line_idx, char_idx - line_start)
    }

    /// Convert line/column to char index
    pub fn line_col_to_char(&self, line: usize, col: usize) -> usize {
        let line = line.min(self.len_lines().saturating_sub(1));
        let line_start = self.rope.line_to_char(line);
        let line_len = self.rope.line(line).len_chars();
        line_start + col.min(line_len)
    }
}

impl From<&str> for TextBuffer {
    fn from(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }
}

impl fmt::Display for TextBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.rope)
    }
}
