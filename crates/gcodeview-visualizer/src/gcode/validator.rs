//! Duplicate node detection
//!
//! Re-walks the program with its own tracker and flags every coordinate
//! changing move that lands on a position already visited, compared at two
//! decimal places. The first visit of a position is never flagged.

use gcodeview_core::constants::{AXIS_DECIMALS, NO_ERRORS_MESSAGE};
use gcodeview_core::Position;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

use super::interpreter::PositionTracker;
use super::parser::{statements, to_fixed};

/// Diagnostic severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DiagnosticSeverity {
    Error,
    Warning,
    Information,
}

/// A finding attached to a source line
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    /// 0-based source line
    pub line: usize,
    pub severity: DiagnosticSeverity,
    pub message: String,
}

/// Outcome of an integrity check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckReport {
    /// No findings; reported with [`NO_ERRORS_MESSAGE`]
    Clean,
    Issues(Vec<Diagnostic>),
}

impl CheckReport {
    pub fn from_diagnostics(diagnostics: Vec<Diagnostic>) -> Self {
        if diagnostics.is_empty() {
            Self::Clean
        } else {
            Self::Issues(diagnostics)
        }
    }

    pub fn is_clean(&self) -> bool {
        matches!(self, Self::Clean)
    }

    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            Self::Clean => &[],
            Self::Issues(diagnostics) => diagnostics,
        }
    }

    /// Human readable lines for a diagnostics panel
    pub fn messages(&self) -> Vec<String> {
        match self {
            Self::Clean => vec![NO_ERRORS_MESSAGE.to_string()],
            Self::Issues(diagnostics) => diagnostics
                .iter()
                .map(|d| format!("Line {}: {}", d.line + 1, d.message))
                .collect(),
        }
    }
}

fn axis_key(value: f64) -> String {
    // -0.00 and 0.00 are the same place
    let value = if value == 0.0 { 0.0 } else { value };
    let formatted = to_fixed(value, AXIS_DECIMALS);
    if formatted.starts_with('-') && formatted[1..].chars().all(|c| c == '0' || c == '.') {
        formatted[1..].to_string()
    } else {
        formatted
    }
}

/// Two-decimal position key used for duplicate comparison
pub fn duplicate_key(position: Position) -> String {
    format!(
        "{},{},{}",
        axis_key(position.x),
        axis_key(position.y),
        axis_key(position.z)
    )
}

/// Find repeated positions in `text`
pub fn find_duplicates(text: &str) -> Vec<Diagnostic> {
    let mut tracker = PositionTracker::new();
    let mut first_seen: HashMap<String, usize> = HashMap::new();
    let mut diagnostics = Vec::new();

    for statement in statements(text) {
        let Some(node) = tracker.step(&statement) else {
            continue;
        };
        let key = duplicate_key(node.position);
        match first_seen.get(&key) {
            Some(first_line) => diagnostics.push(Diagnostic {
                line: node.line,
                severity: DiagnosticSeverity::Error,
                message: format!(
                    "Duplicate node at ({}), first seen on line {}",
                    key,
                    first_line + 1
                ),
            }),
            None => {
                first_seen.insert(key, node.line);
            }
        }
    }

    debug!(
        "Duplicate check: {} positions, {} duplicates",
        first_seen.len(),
        diagnostics.len()
    );
    diagnostics
}

/// Run all integrity checks
pub fn check(text: &str) -> CheckReport {
    CheckReport::from_diagnostics(find_duplicates(text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_duplicate() {
        let diagnostics = find_duplicates("G90\nG1 X1 Y1\nG1 X2 Y2\nG1 X1.00 Y1.00");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].line, 3);
        assert!(diagnostics[0].message.contains("1.00,1.00,0.00"));
        assert!(diagnostics[0].message.contains("line 2"));
    }

    #[test]
    fn test_rounding_to_two_decimals() {
        let diagnostics = find_duplicates("G1 X1.001\nG1 X5\nG1 X0.999");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].line, 2);
    }

    #[test]
    fn test_rounding_ties_go_up() {
        let diagnostics = find_duplicates("G1 X0.125\nG1 X5\nG1 X0.13");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(diagnostics[0].line, 2);
        assert!(diagnostics[0].message.contains("(0.13,0.00,0.00)"));
    }

    #[test]
    fn test_negative_zero_matches_zero() {
        let diagnostics = find_duplicates("G1 X0 Y1\nG1 X5\nG1 X-0.001 Y1");
        assert_eq!(diagnostics.len(), 1);
        assert_eq!(duplicate_key(Position::new(-0.0, -0.001, 0.0)), "0.00,0.00,0.00");
    }

    #[test]
    fn test_clean_report() {
        let report = check("G0 X1\nG1 X2");
        assert!(report.is_clean());
        assert_eq!(report.messages(), vec![NO_ERRORS_MESSAGE.to_string()]);
        assert!(report.diagnostics().is_empty());
    }

    #[test]
    fn test_every_repeat_is_flagged() {
        let report = check("G1 X1\nG1 X1\nG1 X1");
        let lines: Vec<usize> = report.diagnostics().iter().map(|d| d.line).collect();
        assert_eq!(lines, vec![1, 2]);
        assert_eq!(report.messages()[0], format!("Line 2: {}", report.diagnostics()[0].message));
    }
}
