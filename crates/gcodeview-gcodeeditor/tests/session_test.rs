//! Edit session flows over a square-pocket program.

use gcodeview_core::{AppEvent, DiagnosticsEvent, EditSource, EditorEvent, EventFilter, VisualizerEvent};
use gcodeview_gcodeeditor::{
    EditorError, EditorSession, LineSelection, SearchOptions, SessionConfig, SessionState,
};
use gcodeview_visualizer::{RowField, ScreenPoint};
use parking_lot::Mutex;
use std::sync::Arc;

const PROGRAM: &str = "G90\nG0 X0 Y0 Z5\nG1 Z0\nG1 X10 Y0\nG1 X10 Y10\nG1 X0 Y10\nG1 X0 Y0\nG0 Z5";

fn session() -> EditorSession {
    EditorSession::with_text(SessionConfig::default(), PROGRAM)
}

fn record(session: &EditorSession) -> Arc<Mutex<Vec<AppEvent>>> {
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    session
        .events()
        .subscribe(EventFilter::All, move |event| sink.lock().push(event.clone()));
    events
}

#[test]
fn test_initial_analysis() {
    let session = session();
    assert_eq!(session.state(), SessionState::Idle);
    assert_eq!(session.analysis().interpretation.len(), 7);
    assert_eq!(session.analysis().projection.clusters.len(), 4);
    assert_eq!(session.table().len(), 7);
    assert!(!session.history().can_undo());
}

// ============================================================================
// Text edits
// ============================================================================

#[test]
fn test_user_edit_reparses() {
    let mut session = session();
    let events = record(&session);

    let edited = format!("{}\nG1 X20 Y20", PROGRAM);
    assert_eq!(session.on_user_edit(&edited), Ok(true));
    assert_eq!(session.analysis().interpretation.len(), 8);
    assert_eq!(session.table().len(), 8);

    assert_eq!(
        events.lock().as_slice(),
        &[AppEvent::Editor(EditorEvent::TextChanged {
            source: EditSource::User,
            nodes: 8
        })]
    );

    // same text again is not a change
    assert_eq!(session.on_user_edit(&edited), Ok(false));
    assert_eq!(events.lock().len(), 1);
}

#[test]
fn test_undo_redo() {
    let mut session = session();
    session.on_user_edit("G1 X1").expect("edit");
    session.on_user_edit("G1 X2").expect("edit");

    let events = record(&session);
    assert_eq!(session.undo().as_deref(), Ok("G1 X1"));
    assert_eq!(session.text(), "G1 X1");
    assert_eq!(
        events.lock().last(),
        Some(&AppEvent::Editor(EditorEvent::TextChanged {
            source: EditSource::History,
            nodes: 1
        }))
    );

    assert_eq!(session.redo().as_deref(), Ok("G1 X2"));
    session.undo().expect("undo");
    session.on_user_edit("G0 Z9").expect("edit");
    assert_eq!(session.redo(), Err(EditorError::NothingToRedo));

    session.undo().expect("undo");
    session.undo().expect("undo");
    assert_eq!(session.text(), PROGRAM);
    assert_eq!(session.undo(), Err(EditorError::NothingToUndo));
}

#[test]
fn test_relative_mode_is_reported() {
    let mut session = session();
    let events = record(&session);

    session
        .on_user_edit("G90\nG1 X1\nG1 X2\nG91\nG1 X1")
        .expect("edit");
    let projection = &session.analysis().projection;
    assert!(projection.is_aborted());
    assert_eq!(projection.segments.len(), 2);
    assert!(events.lock().contains(&AppEvent::Visualizer(
        VisualizerEvent::RelativeModeAborted { line: 3 }
    )));
}

#[test]
fn test_load_drops_history() {
    let mut session = session();
    session.on_user_edit("G1 X1").expect("edit");
    session.load("G0 Z5").expect("load");
    assert_eq!(session.text(), "G0 Z5");
    assert!(!session.history().can_undo());
    assert_eq!(session.analysis().interpretation.len(), 1);
}

// ============================================================================
// Write-backs
// ============================================================================

#[test]
fn test_format_is_undoable() {
    let mut session = EditorSession::with_text(SessionConfig::default(), "g0  z5 ; lift\ng1 x1");
    assert_eq!(session.format(), Ok(true));
    assert_eq!(session.text(), "G0 Z5 ; lift\nG1 X1");
    assert_eq!(session.state(), SessionState::Idle);

    // the surface echoes the written text back
    assert_eq!(session.on_user_edit("G0 Z5 ; lift\nG1 X1"), Ok(false));

    // already formatted
    assert_eq!(session.format(), Ok(false));

    session.undo().expect("undo");
    assert_eq!(session.text(), "g0  z5 ; lift\ng1 x1");
}

#[test]
fn test_table_cell_edit_regenerates_text() {
    let mut session = session();
    let selection = session.select_row(3).expect("row 3 has a line");
    assert_eq!(selection.line, 4);
    assert_eq!(selection.node_index, Some(3));

    assert_eq!(session.update_cell(3, RowField::X, "12"), Ok(true));
    let text = session.text();
    let lines: Vec<&str> = text.split('\n').collect();
    assert_eq!(lines[0], "G90");
    assert_eq!(lines[4], "G1 X12.00 Y10.00 Z0.00");
    assert_eq!(lines.len(), 8);
    assert_eq!(session.table().selected(), Some(3));

    session.undo().expect("undo");
    assert_eq!(session.text(), PROGRAM);
}

#[test]
fn test_table_cell_out_of_range() {
    let mut session = session();
    assert!(matches!(
        session.update_cell(42, RowField::Feed, "300"),
        Err(EditorError::Gcode(_))
    ));
    assert_eq!(session.text(), PROGRAM);
}

#[test]
fn test_table_add_and_delete_rows() {
    let mut session = session();
    assert_eq!(session.add_row(), Ok(true));
    assert_eq!(session.table().len(), 8);
    assert!(session.text().ends_with("G0 X0.00 Y0.00 Z5.00\nG1 X0.00 Y0.00 Z5.00"));

    session.select_row(0);
    assert_eq!(session.delete_selected_row(), Ok(true));
    assert_eq!(session.table().len(), 7);
    assert!(session.text().starts_with("G90\nG1 X0.00 Y0.00 Z0.00"));
}

#[test]
fn test_deleting_last_row_keeps_text() {
    let mut session = EditorSession::with_text(SessionConfig::default(), "G90\nG1 X5");
    session.select_row(0);
    assert_eq!(session.delete_selected_row(), Ok(false));
    assert_eq!(session.text(), "G90\nG1 X5");
    assert_eq!(session.table().len(), 1);
}

#[test]
fn test_search_and_replace() {
    let mut session = session();
    assert_eq!(session.search("z5", SearchOptions::default()), Ok(2));

    assert_eq!(session.replace_current("Z8"), Ok(true));
    assert!(session.text().contains("G0 X0 Y0 Z8"));
    assert_eq!(session.search_state().matches().len(), 1);

    assert_eq!(session.replace_all("Z8"), Ok(true));
    assert!(session.text().ends_with("G0 Z8"));
    assert_eq!(session.search_state().status(), "No results");
    assert_eq!(session.replace_all("Z1"), Ok(false));

    assert!(matches!(
        session.search("(", SearchOptions::default()),
        Err(EditorError::Search(_))
    ));
}

#[test]
fn test_check_publishes_result() {
    let session = session();
    let events = record(&session);
    let report = session.check();
    assert_eq!(report.diagnostics().len(), 2);
    assert_eq!(
        events.lock().as_slice(),
        &[AppEvent::Diagnostics(DiagnosticsEvent::CheckCompleted { issues: 2 })]
    );
}

// ============================================================================
// Canvas
// ============================================================================

#[test]
fn test_click_expands_and_selects_line() {
    let mut session = session();
    let events = record(&session);

    assert_eq!(session.click(ScreenPoint::new(400.0, 300.0)), None);
    assert!(session.resolver().expanded().is_some());

    let selection = session.click(ScreenPoint::new(400.0, 330.0));
    assert_eq!(
        selection,
        Some(LineSelection {
            node_index: Some(1),
            line: 2,
            range: 16..21,
        })
    );

    assert!(session.pointer_leave());
    assert!(!session.pointer_leave());

    assert_eq!(
        events.lock().as_slice(),
        &[
            AppEvent::Visualizer(VisualizerEvent::ClusterExpanded {
                label: 0,
                members: 4
            }),
            AppEvent::Editor(EditorEvent::LineSelected { line: 2 }),
            AppEvent::Visualizer(VisualizerEvent::ClusterCollapsed),
        ]
    );
}

#[test]
fn test_click_single_node() {
    let mut session = session();
    let selection = session
        .click(ScreenPoint::new(452.0, 250.0))
        .expect("node 3 is at (450, 250)");
    assert_eq!(selection.line, 4);
    assert_eq!(session.line_range(4), Ok(selection.range));
    assert_eq!(session.click(ScreenPoint::new(10.0, 10.0)), None);
}

#[test]
fn test_hover_onto_other_cluster_collapses() {
    let mut session = session();
    session.click(ScreenPoint::new(400.0, 300.0));
    assert!(!session.pointer_move(ScreenPoint::new(401.0, 301.0)));
    assert!(session.pointer_move(ScreenPoint::new(450.0, 300.0)));
    assert!(session.resolver().expanded().is_none());
}

#[test]
fn test_expansion_dropped_when_cluster_disappears() {
    let mut session = session();
    session.click(ScreenPoint::new(400.0, 300.0));
    session.on_user_edit("G90\nG1 X1 Y1").expect("edit");
    assert!(session.resolver().expanded().is_none());
}

#[test]
fn test_expansion_renumbered_after_edit() {
    let mut session = EditorSession::with_text(SessionConfig::default(), "G1 X0\nG1 X10\nG1 X0");
    session.click(ScreenPoint::new(400.0, 300.0));

    // Inserting a line above shifts the origin cluster to nodes [1, 3].
    session
        .on_user_edit("G1 X20\nG1 X0\nG1 X10\nG1 X0")
        .expect("edit");
    let members: Vec<usize> = session
        .resolver()
        .expanded()
        .expect("origin still overlaps")
        .sub_nodes
        .iter()
        .map(|s| s.node_index)
        .collect();
    assert_eq!(members, vec![1, 3]);

    assert_eq!(
        session.click(ScreenPoint::new(430.0, 300.0)),
        Some(LineSelection {
            node_index: Some(1),
            line: 1,
            range: 7..12,
        })
    );
}
