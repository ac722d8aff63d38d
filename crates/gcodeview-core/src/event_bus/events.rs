//! Event type definitions for the event bus.
//!
//! Events are cloneable and serializable so collaborators can log or
//! replay them.

use serde::{Deserialize, Serialize};

/// Root event enum for all application events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AppEvent {
    /// Text-editing surface requests
    Editor(EditorEvent),
    /// Rendering surface state
    Visualizer(VisualizerEvent),
    /// Integrity check results
    Diagnostics(DiagnosticsEvent),
}

impl AppEvent {
    /// Get the category of this event
    pub fn category(&self) -> EventCategory {
        match self {
            AppEvent::Editor(_) => EventCategory::Editor,
            AppEvent::Visualizer(_) => EventCategory::Visualizer,
            AppEvent::Diagnostics(_) => EventCategory::Diagnostics,
        }
    }

    /// Get a short description of this event for logging
    pub fn description(&self) -> String {
        match self {
            AppEvent::Editor(e) => e.description(),
            AppEvent::Visualizer(e) => e.description(),
            AppEvent::Diagnostics(e) => e.description(),
        }
    }
}

/// Event category for filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    /// Editor events.
    Editor,
    /// Visualizer events.
    Visualizer,
    /// Diagnostics events.
    Diagnostics,
}

impl std::fmt::Display for EventCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EventCategory::Editor => write!(f, "Editor"),
            EventCategory::Visualizer => write!(f, "Visualizer"),
            EventCategory::Diagnostics => write!(f, "Diagnostics"),
        }
    }
}

/// Where a text change came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EditSource {
    /// Typed or pasted by the user
    User,
    /// Replayed from undo/redo history
    History,
    /// Written back by the core (table apply, format, replace)
    Core,
}

/// Editor-related events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum EditorEvent {
    /// The editor should highlight and scroll to a source line.
    LineSelected {
        /// 0-based source line.
        line: usize,
    },
    /// The document text was replaced and re-analysed.
    TextChanged {
        /// Origin of the change.
        source: EditSource,
        /// Node count after re-analysis.
        nodes: usize,
    },
}

impl EditorEvent {
    fn description(&self) -> String {
        match self {
            EditorEvent::LineSelected { line } => format!("Select line {}", line),
            EditorEvent::TextChanged { source, nodes } => {
                format!("Text changed ({:?}), {} nodes", source, nodes)
            }
        }
    }
}

/// Visualizer-related events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum VisualizerEvent {
    /// Projection stopped at a relative-mode statement.
    RelativeModeAborted {
        /// 0-based source line of the G91 statement.
        line: usize,
    },
    /// An overlap cluster was expanded into its sub-nodes.
    ClusterExpanded {
        /// Lowest node index in the cluster.
        label: usize,
        /// Number of member nodes.
        members: usize,
    },
    /// The expanded cluster was collapsed.
    ClusterCollapsed,
}

impl VisualizerEvent {
    fn description(&self) -> String {
        match self {
            VisualizerEvent::RelativeModeAborted { line } => {
                format!("Projection aborted at line {} (G91)", line)
            }
            VisualizerEvent::ClusterExpanded { label, members } => {
                format!("Cluster {} expanded ({} nodes)", label, members)
            }
            VisualizerEvent::ClusterCollapsed => "Cluster collapsed".to_string(),
        }
    }
}

/// Diagnostics-related events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DiagnosticsEvent {
    /// A duplicate/integrity check finished.
    CheckCompleted {
        /// Number of diagnostics reported (0 means clean).
        issues: usize,
    },
}

impl DiagnosticsEvent {
    fn description(&self) -> String {
        match self {
            DiagnosticsEvent::CheckCompleted { issues } => {
                format!("Check completed, {} issue(s)", issues)
            }
        }
    }
}
