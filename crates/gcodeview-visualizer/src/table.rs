//! Tabular view of motion nodes
//!
//! Rows are derived from the text with the same carry-forward rule as the
//! interpreter, plus feed carry-forward. Writing rows back regenerates every
//! motion line after the preserved non-motion lines; it is not an in-place
//! patch.

use gcodeview_core::constants::{ABSOLUTE_MODE_LINE, AXIS_DECIMALS, FEED_DECIMALS};
use gcodeview_core::GcodeError;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::gcode::{
    parse_number, statements, to_fixed, tokenize, CommandKind, MotionKind, PositionTracker,
};

/// One motion node as a table row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    /// Dense row index
    pub index: usize,
    /// Source line, `None` for rows added in the table
    pub line: Option<usize>,
    pub command: MotionKind,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub z: Option<f64>,
    pub feed: Option<f64>,
}

impl TableRow {
    /// Regenerated G-Code for this row
    pub fn to_gcode(&self) -> String {
        let mut line = self.command.mnemonic().to_string();
        for (letter, value) in [('X', self.x), ('Y', self.y), ('Z', self.z)] {
            if let Some(value) = value {
                line.push(' ');
                line.push(letter);
                line.push_str(&to_fixed(value, AXIS_DECIMALS));
            }
        }
        if let Some(feed) = self.feed {
            line.push_str(" F");
            line.push_str(&to_fixed(feed, FEED_DECIMALS));
        }
        line
    }

    pub fn get(&self, field: RowField) -> Option<f64> {
        match field {
            RowField::X => self.x,
            RowField::Y => self.y,
            RowField::Z => self.z,
            RowField::Feed => self.feed,
        }
    }

    fn set(&mut self, field: RowField, value: Option<f64>) {
        match field {
            RowField::X => self.x = value,
            RowField::Y => self.y = value,
            RowField::Z => self.z = value,
            RowField::Feed => self.feed = value,
        }
    }
}

/// Editable numeric columns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RowField {
    X,
    Y,
    Z,
    Feed,
}

/// Derive table rows from `text`
pub fn to_rows(text: &str) -> Vec<TableRow> {
    let mut tracker = PositionTracker::new();
    let mut feed: Option<f64> = None;
    let mut rows = Vec::new();

    for statement in statements(text) {
        if statement.kind().motion().is_some() {
            if let Some(value) = statement.tokens.param('F') {
                feed = Some(value);
            }
        }
        let Some(node) = tracker.step(&statement) else {
            continue;
        };
        trace!("Row {} from line {}", rows.len(), node.line);
        rows.push(TableRow {
            index: rows.len(),
            line: Some(node.line),
            command: node.motion,
            x: Some(node.position.x),
            y: Some(node.position.y),
            z: Some(node.position.z),
            feed,
        });
    }
    rows
}

fn is_motion_line(line: &str) -> bool {
    tokenize(line)
        .command
        .is_some_and(|command| CommandKind::classify(&command).motion().is_some())
}

/// Regenerate text from `rows`, keeping every non-motion line of `previous`
///
/// An empty table leaves `previous` untouched.
pub fn from_rows(rows: &[TableRow], previous: &str) -> String {
    if rows.is_empty() {
        return previous.to_string();
    }

    let mut lines: Vec<String> = Vec::new();
    let mut has_absolute = false;
    for line in previous.split('\n') {
        if is_motion_line(line) {
            continue;
        }
        if line.trim().to_ascii_uppercase().starts_with("G90") {
            has_absolute = true;
        }
        lines.push(line.to_string());
    }
    if !has_absolute {
        lines.push(ABSOLUTE_MODE_LINE.to_string());
    }
    lines.extend(rows.iter().map(TableRow::to_gcode));

    debug!(
        "Regenerated {} motion lines after {} preserved lines",
        rows.len(),
        lines.len() - rows.len()
    );
    lines.join("\n")
}

/// Rows plus the selected row
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableModel {
    rows: Vec<TableRow>,
    selected: Option<usize>,
}

impl TableModel {
    pub fn new(rows: Vec<TableRow>) -> Self {
        Self {
            rows,
            selected: None,
        }
    }

    pub fn from_text(text: &str) -> Self {
        Self::new(to_rows(text))
    }

    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    /// Replace rows after a re-parse, keeping the selection in range
    pub fn refresh(&mut self, text: &str) {
        self.rows = to_rows(text);
        self.clamp_selection();
    }

    /// Select a row; returns the source line to highlight, if it has one
    pub fn select(&mut self, row: usize) -> Option<usize> {
        let line = self.rows.get(row)?.line;
        self.selected = Some(row);
        line
    }

    /// Append a `G1` row seeded from the last row and select it
    pub fn add_row(&mut self) -> usize {
        let (x, y, z, feed) = match self.rows.last() {
            Some(last) => (
                last.x.unwrap_or(0.0),
                last.y.unwrap_or(0.0),
                last.z.unwrap_or(0.0),
                last.feed,
            ),
            None => (0.0, 0.0, 0.0, None),
        };
        let index = self.rows.len();
        self.rows.push(TableRow {
            index,
            line: None,
            command: MotionKind::Linear,
            x: Some(x),
            y: Some(y),
            z: Some(z),
            feed,
        });
        self.selected = Some(index);
        index
    }

    /// Remove the selected row; returns false when nothing is selected
    pub fn delete_selected(&mut self) -> bool {
        let Some(selected) = self.selected.filter(|&row| row < self.rows.len()) else {
            return false;
        };
        self.rows.remove(selected);
        for (index, row) in self.rows.iter_mut().enumerate() {
            row.index = index;
        }
        self.clamp_selection();
        true
    }

    /// Set a cell from user input; an empty string clears it
    pub fn update_cell(&mut self, row: usize, field: RowField, value: &str) -> Result<(), GcodeError> {
        let total = self.rows.len();
        let target = self
            .rows
            .get_mut(row)
            .ok_or(GcodeError::RowOutOfRange { row, total })?;
        let value = value.trim();
        let parsed = if value.is_empty() {
            None
        } else {
            Some(parse_number(value))
        };
        target.set(field, parsed);
        Ok(())
    }

    /// Regenerate text from the current rows
    pub fn to_text(&self, previous: &str) -> String {
        from_rows(&self.rows, previous)
    }

    fn clamp_selection(&mut self) {
        self.selected = match self.selected {
            Some(_) if self.rows.is_empty() => None,
            Some(row) => Some(row.min(self.rows.len() - 1)),
            None => None,
        };
    }
}
