//! Position tracking and node extraction
//!
//! Walks the statements of a program in absolute mode and records a node for
//! every `G0`/`G1` that carries at least one axis word. A word restating the
//! current coordinate still counts: "changed" means the word is present, not
//! that the value moved.

use gcodeview_core::Position;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, trace};

use super::command::{CommandKind, MotionKind};
use super::parser::{statements, Statement};

/// A recorded tool position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Dense, 0-based node index
    pub index: usize,
    /// 0-based source line that produced the node
    pub line: usize,
    pub position: Position,
    pub motion: MotionKind,
}

/// Carry-forward position state over a statement stream
///
/// Each consumer owns its own tracker; nothing is shared between passes.
#[derive(Debug, Clone, Default)]
pub struct PositionTracker {
    position: Position,
    next_index: usize,
}

impl PositionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current tracked position
    pub fn position(&self) -> Position {
        self.position
    }

    /// Number of nodes produced so far
    pub fn node_count(&self) -> usize {
        self.next_index
    }

    /// Feed one statement, returning a node if it changed the position
    pub fn step(&mut self, statement: &Statement<'_>) -> Option<Node> {
        let motion = statement.kind().motion()?;
        let words = statement.tokens.axis_words();
        if !words.has_axis() {
            return None;
        }

        self.position = words.apply(self.position);
        let node = Node {
            index: self.next_index,
            line: statement.line,
            position: self.position,
            motion,
        };
        self.next_index += 1;
        Some(node)
    }
}

/// Result of interpreting a program
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Interpretation {
    pub nodes: Vec<Node>,
    /// Source line to node index
    pub line_to_node: BTreeMap<usize, usize>,
    /// First `G91` statement, if the program has one
    pub relative_mode_line: Option<usize>,
}

impl Interpretation {
    pub fn node_for_line(&self, line: usize) -> Option<usize> {
        self.line_to_node.get(&line).copied()
    }

    pub fn line_for_node(&self, node_index: usize) -> Option<usize> {
        self.nodes.get(node_index).map(|node| node.line)
    }

    pub fn node(&self, node_index: usize) -> Option<&Node> {
        self.nodes.get(node_index)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Interpret a program, starting at the origin
pub fn interpret(text: &str) -> Interpretation {
    let mut tracker = PositionTracker::new();
    let mut result = Interpretation::default();

    for statement in statements(text) {
        if let CommandKind::DistanceMode(_) = statement.kind() {
            if statement.kind().is_relative_mode() && result.relative_mode_line.is_none() {
                debug!("Relative mode statement at line {}", statement.line);
                result.relative_mode_line = Some(statement.line);
            }
            continue;
        }

        if let Some(node) = tracker.step(&statement) {
            trace!(
                "Line {}: node {} at {} ({})",
                node.line,
                node.index,
                node.position,
                node.motion
            );
            result.line_to_node.insert(node.line, node.index);
            result.nodes.push(node);
        }
    }

    debug!(
        "Interpretation complete: {} nodes from {} bytes",
        result.nodes.len(),
        text.len()
    );
    result
}
