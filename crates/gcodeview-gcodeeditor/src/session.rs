//! Edit session
//!
//! Ties the document text, its history and the derived views together. The
//! text-editing and rendering surfaces talk to the session; the session
//! re-analyses synchronously after every change and reports back through the
//! event bus.
//!
//! ## State machine
//!
//! ```text
//!            on_user_edit / undo / redo
//!   Idle ────────────────────────────────► Reparsing ──► Idle
//!    │
//!    │  format / table write-back / replace
//!    └──► ApplyingExternalEdit ──► Reparsing ──► ApplyingExternalEdit ──► Idle
//! ```
//!
//! User edits are only accepted while `Idle`. When the surface echoes back a
//! text the session itself just wrote, the echo is recognised and ignored.

use gcodeview_core::{
    AppEvent, DiagnosticsEvent, EditSource, EditorEvent, EventBus, VisualizerEvent,
};
use gcodeview_visualizer::{
    check, format_gcode, interpret, project, CheckReport, ClickOutcome, InteractionConfig,
    InteractionResolver, Interpretation, Projection, RenderTransform, RowField, ScreenPoint,
    TableModel,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;
use tracing::{debug, info, trace, warn};

use crate::error::{EditorError, EditorResult};
use crate::search::{SearchMatch, SearchOptions, SearchState};
use crate::text_buffer::TextBuffer;
use crate::undo_manager::TextHistory;
use gcodeview_core::constants::MAX_HISTORY_DEPTH;

/// Session lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SessionState {
    #[default]
    Idle,
    Reparsing,
    ApplyingExternalEdit,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Reparsing => write!(f, "reparsing"),
            Self::ApplyingExternalEdit => write!(f, "applying external edit"),
        }
    }
}

/// Session tuning
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SessionConfig {
    pub transform: RenderTransform,
    pub interaction: InteractionConfig,
    pub history_depth: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            transform: RenderTransform::default(),
            interaction: InteractionConfig::default(),
            history_depth: MAX_HISTORY_DEPTH,
        }
    }
}

/// Derived views of one text revision
#[derive(Debug, Clone, Default)]
pub struct Analysis {
    pub interpretation: Interpretation,
    pub projection: Projection,
}

impl Analysis {
    pub fn of(text: &str, transform: &RenderTransform) -> Self {
        let interpretation = interpret(text);
        let projection = project(&interpretation, transform);
        Self {
            interpretation,
            projection,
        }
    }
}

/// A source line picked on the canvas or in the table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineSelection {
    pub node_index: Option<usize>,
    pub line: usize,
    /// Character range to highlight and scroll to
    pub range: Range<usize>,
}

pub struct EditorSession {
    config: SessionConfig,
    state: SessionState,
    buffer: TextBuffer,
    history: TextHistory,
    analysis: Analysis,
    table: TableModel,
    resolver: InteractionResolver,
    search: SearchState,
    events: EventBus,
    /// Last text written back by the core, until the surface echoes it
    pending_echo: Option<String>,
}

impl EditorSession {
    pub fn new(config: SessionConfig) -> Self {
        Self::with_text(config, "")
    }

    pub fn with_text(config: SessionConfig, text: &str) -> Self {
        let mut session = Self {
            config,
            state: SessionState::Idle,
            buffer: TextBuffer::from(text),
            history: TextHistory::with_depth(text, config.history_depth),
            analysis: Analysis::default(),
            table: TableModel::default(),
            resolver: InteractionResolver::new(config.interaction),
            search: SearchState::new(),
            events: EventBus::new(),
            pending_echo: None,
        };
        session.reanalyze(EditSource::Core);
        session
    }

    pub fn text(&self) -> String {
        self.buffer.to_string()
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    pub fn history(&self) -> &TextHistory {
        &self.history
    }

    pub fn analysis(&self) -> &Analysis {
        &self.analysis
    }

    pub fn table(&self) -> &TableModel {
        &self.table
    }

    pub fn resolver(&self) -> &InteractionResolver {
        &self.resolver
    }

    pub fn search_state(&self) -> &SearchState {
        &self.search
    }

    /// Bus the surfaces subscribe to
    pub fn events(&self) -> &EventBus {
        &self.events
    }

    /// Character range of a source line, without its line break
    pub fn line_range(&self, line: usize) -> EditorResult<Range<usize>> {
        self.buffer.line_char_range(line)
    }

    /// Load a new document, dropping history
    pub fn load(&mut self, text: &str) -> EditorResult<()> {
        self.ensure_idle()?;
        self.buffer.set_text(text);
        self.history.reset(text);
        self.table = TableModel::default();
        self.resolver.collapse();
        self.search.clear();
        self.pending_echo = None;
        self.reanalyze(EditSource::Core);
        Ok(())
    }

    /// Text changed in the editing surface
    ///
    /// Returns false if the text was unchanged or was the echo of a core
    /// write-back.
    pub fn on_user_edit(&mut self, text: &str) -> EditorResult<bool> {
        self.ensure_idle()?;
        if self.pending_echo.take().is_some_and(|echo| echo == text) {
            trace!("Ignoring echo of core write-back");
            return Ok(false);
        }
        if !self.history.record(text) {
            return Ok(false);
        }
        self.buffer.set_text(text);
        self.reanalyze(EditSource::User);
        self.refresh_search();
        Ok(true)
    }

    pub fn undo(&mut self) -> EditorResult<String> {
        self.ensure_idle()?;
        let text = self.history.undo()?.to_string();
        self.replay(&text);
        Ok(text)
    }

    pub fn redo(&mut self) -> EditorResult<String> {
        self.ensure_idle()?;
        let text = self.history.redo()?.to_string();
        self.replay(&text);
        Ok(text)
    }

    /// Normalise the document
    pub fn format(&mut self) -> EditorResult<bool> {
        let formatted = format_gcode(&self.text());
        self.apply_external(&formatted)
    }

    /// Run the integrity check and publish its outcome
    pub fn check(&self) -> CheckReport {
        let report = check(&self.text());
        let issues = report.diagnostics().len();
        info!("Check completed: {} issue(s)", issues);
        self.events
            .publish(AppEvent::Diagnostics(DiagnosticsEvent::CheckCompleted {
                issues,
            }));
        report
    }

    // ── table ───────────────────────────────────────────────────────────

    /// Select a table row and highlight its source line
    pub fn select_row(&mut self, row: usize) -> Option<LineSelection> {
        let line = self.table.select(row)?;
        let node_index = self.analysis.interpretation.node_for_line(line);
        self.select_line(node_index, line)
    }

    pub fn update_cell(&mut self, row: usize, field: RowField, value: &str) -> EditorResult<bool> {
        self.ensure_idle()?;
        self.table.update_cell(row, field, value)?;
        self.apply_table()
    }

    pub fn add_row(&mut self) -> EditorResult<bool> {
        self.ensure_idle()?;
        self.table.add_row();
        self.apply_table()
    }

    pub fn delete_selected_row(&mut self) -> EditorResult<bool> {
        self.ensure_idle()?;
        if !self.table.delete_selected() {
            return Ok(false);
        }
        self.apply_table()
    }

    /// Regenerate the document from the table rows
    pub fn apply_table(&mut self) -> EditorResult<bool> {
        if self.table.is_empty() {
            // An empty table never erases the document
            let text = self.text();
            self.table.refresh(&text);
            return Ok(false);
        }
        let selected = self.table.selected();
        let text = self.table.to_text(&self.text());
        let changed = self.apply_external(&text)?;
        if let Some(row) = selected {
            self.table.select(row);
        }
        Ok(changed)
    }

    // ── search ──────────────────────────────────────────────────────────

    pub fn search(&mut self, query: &str, options: SearchOptions) -> EditorResult<usize> {
        let text = self.text();
        Ok(self.search.search(&text, query, options)?)
    }

    pub fn search_next(&mut self) -> Option<SearchMatch> {
        self.search.next()
    }

    pub fn search_prev(&mut self) -> Option<SearchMatch> {
        self.search.prev()
    }

    pub fn replace_current(&mut self, replacement: &str) -> EditorResult<bool> {
        let Some(current) = self.search.current_match() else {
            return Ok(false);
        };
        let mut buffer = self.buffer.clone();
        buffer.replace(current.start..current.end, replacement);
        let changed = self.apply_external(&buffer.to_string())?;
        self.refresh_search();
        Ok(changed)
    }

    pub fn replace_all(&mut self, replacement: &str) -> EditorResult<bool> {
        let Some(text) = self.search.replace_all(&self.text(), replacement)? else {
            return Ok(false);
        };
        let changed = self.apply_external(&text)?;
        self.refresh_search();
        Ok(changed)
    }

    // ── pointer ─────────────────────────────────────────────────────────

    pub fn pointer_move(&mut self, point: ScreenPoint) -> bool {
        let collapsed = self
            .resolver
            .pointer_move(point, &self.analysis.projection.clusters);
        if collapsed {
            self.publish_collapsed();
        }
        collapsed
    }

    pub fn pointer_leave(&mut self) -> bool {
        let collapsed = self.resolver.pointer_leave();
        if collapsed {
            self.publish_collapsed();
        }
        collapsed
    }

    /// Resolve a click; returns the selected line if a node was picked
    pub fn click(&mut self, point: ScreenPoint) -> Option<LineSelection> {
        let outcome = self
            .resolver
            .click(point, &self.analysis.projection.clusters);
        match outcome {
            ClickOutcome::SelectNode(node_index) => {
                let line = self.analysis.interpretation.line_for_node(node_index)?;
                self.select_line(Some(node_index), line)
            }
            ClickOutcome::Expanded { label, members } => {
                self.events
                    .publish(AppEvent::Visualizer(VisualizerEvent::ClusterExpanded {
                        label,
                        members,
                    }));
                None
            }
            ClickOutcome::Collapsed => {
                self.publish_collapsed();
                None
            }
            ClickOutcome::Nothing => None,
        }
    }

    // ── internals ───────────────────────────────────────────────────────

    fn ensure_idle(&self) -> EditorResult<()> {
        match self.state {
            SessionState::Idle => Ok(()),
            state => {
                warn!("Edit rejected while {}", state);
                Err(EditorError::EditRejected { state })
            }
        }
    }

    fn replay(&mut self, text: &str) {
        self.buffer.set_text(text);
        self.reanalyze(EditSource::History);
        self.refresh_search();
    }

    /// Write core output back into the document
    fn apply_external(&mut self, text: &str) -> EditorResult<bool> {
        self.ensure_idle()?;
        self.state = SessionState::ApplyingExternalEdit;
        let changed = self.history.record(text);
        if changed {
            self.buffer.set_text(text);
            self.pending_echo = Some(text.to_string());
            self.reanalyze(EditSource::Core);
        }
        self.state = SessionState::Idle;
        Ok(changed)
    }

    fn reanalyze(&mut self, source: EditSource) {
        let resume = self.state;
        self.state = SessionState::Reparsing;

        let text = self.text();
        self.analysis = Analysis::of(&text, &self.config.transform);
        self.table.refresh(&text);
        self.resolver
            .retain_valid(&self.analysis.projection.clusters);

        let nodes = self.analysis.interpretation.len();
        debug!(
            "Reparsed ({:?}): {} nodes, {} clusters",
            source,
            nodes,
            self.analysis.projection.clusters.len()
        );
        self.events
            .publish(AppEvent::Editor(EditorEvent::TextChanged { source, nodes }));
        if let Some(abort) = &self.analysis.projection.aborted {
            self.events
                .publish(AppEvent::Visualizer(VisualizerEvent::RelativeModeAborted {
                    line: abort.line,
                }));
        }

        self.state = resume;
    }

    fn refresh_search(&mut self) {
        if !self.search.is_active() {
            return;
        }
        let text = self.text();
        if let Err(err) = self.search.refresh(&text) {
            debug!("Search refresh failed: {}", err);
        }
    }

    fn select_line(&self, node_index: Option<usize>, line: usize) -> Option<LineSelection> {
        let range = self.buffer.line_char_range(line).ok()?;
        self.events
            .publish(AppEvent::Editor(EditorEvent::LineSelected { line }));
        Some(LineSelection {
            node_index,
            line,
            range,
        })
    }

    fn publish_collapsed(&self) {
        self.events
            .publish(AppEvent::Visualizer(VisualizerEvent::ClusterCollapsed));
    }
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl fmt::Debug for EditorSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EditorSession")
            .field("state", &self.state)
            .field("lines", &self.buffer.len_lines())
            .field("nodes", &self.analysis.interpretation.len())
            .field("undo", &self.history.undo_count())
            .finish()
    }
}
