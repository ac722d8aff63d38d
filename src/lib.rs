//! # GCodeView
//!
//! An interactive G-Code motion visualizer core:
//! - Tracks the machine position through absolute `G0`/`G1` moves
//! - Projects nodes to screen space and groups overlapping ones into clusters
//! - Flags moves that revisit a position
//! - Edits the program through an editable table of motion rows
//!
//! ## Architecture
//!
//! GCodeView is organized as a workspace with multiple crates:
//!
//! 1. **gcodeview-core** - Positions, constants, errors, event bus
//! 2. **gcodeview-visualizer** - Tokenizer, interpreter, projector, checker,
//!    interaction resolver, table projection, formatter, SVG export
//! 3. **gcodeview-gcodeeditor** - Text buffer, history, find/replace, edit session
//! 4. **gcodeview-settings** - Configuration file
//! 5. **gcodeview** - This crate: re-exports and the headless CLI

pub mod file_io;
pub mod report;

pub use gcodeview_core::{
    AppEvent, DiagnosticsEvent, EditSource, EditorEvent, Error, EventBus, EventFilter, GcodeError,
    Position, Result, VisualizerEvent,
};

pub use gcodeview_visualizer::{
    check, find_duplicates, format_gcode, from_rows, interpret, project, render_svg, to_rows,
    CheckReport, ClickOutcome, Diagnostic, InteractionConfig, InteractionResolver, Interpretation,
    MotionKind, Node, Projection, RenderTransform, RowField, ScreenPoint, TableModel, TableRow,
};

pub use gcodeview_gcodeeditor::{
    EditorError, EditorSession, LineSelection, SearchOptions, SessionConfig, SessionState,
};

pub use gcodeview_settings::{Config, SettingsError};

pub use file_io::{read_program, GcodeFileReader};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging
///
/// Sets up structured logging with:
/// - stderr output, so stdout stays machine-readable
/// - RUST_LOG environment variable support, `info` by default
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}

/// Render transform and interaction radii from the configuration file
pub fn session_config(config: &Config) -> SessionConfig {
    let (offset_x, offset_y) = config.view.offsets();
    SessionConfig {
        transform: RenderTransform::new(config.view.scale, offset_x, offset_y),
        interaction: InteractionConfig {
            hit_radius: config.interaction.hit_radius,
            ring_radius: config.interaction.ring_radius,
            sub_node_hit_radius: config.interaction.sub_node_hit_radius,
            center_hit_radius: config.interaction.center_hit_radius,
        },
        history_depth: config.editor.history_depth,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{pick, Pick, Summary};
    use std::fs;
    use tempfile::TempDir;

    const PROGRAM: &str =
        "G90\nG0 X0 Y0 Z5\nG1 Z0\nG1 X10 Y0\nG1 X10 Y10\nG1 X0 Y10\nG1 X0 Y0\nG0 Z5\n";

    #[test]
    fn test_default_config_matches_session_defaults() {
        assert_eq!(session_config(&Config::default()), SessionConfig::default());
    }

    #[test]
    fn test_offsets_from_config() {
        let mut config = Config::default();
        config.view.scale = 2.0;
        config.view.offset_x = Some(0.0);
        let session = session_config(&config);
        assert_eq!(
            session.transform.to_screen(Position::new(10.0, 10.0, 0.0)),
            ScreenPoint::new(20.0, 280.0)
        );
    }

    #[test]
    fn test_configured_scale_changes_clusters() {
        let dir = TempDir::new().expect("temp dir");
        let config_path = dir.path().join("config.toml");
        fs::write(
            &config_path,
            "[view]\nscale = 0.01\ncanvas_width = 200.0\ncanvas_height = 100.0\n",
        )
        .expect("write");

        let config = Config::load_or_default(Some(&config_path)).expect("config");
        let session = EditorSession::with_text(session_config(&config), PROGRAM);

        // at 0.01 px per unit the 10 mm square collapses into a single pixel
        let summary = Summary::of(session.analysis(), session.buffer().len_lines());
        assert_eq!(summary.nodes, 7);
        assert_eq!(summary.clusters, 1);
        assert_eq!(summary.overlaps, 1);
        assert_eq!(summary.lines, 9);

        let svg = render_svg(
            &session.analysis().projection,
            config.view.canvas_width,
            config.view.canvas_height,
        );
        assert!(svg.contains(r#"width="200""#));
    }

    #[test]
    fn test_pick_through_default_config() {
        let mut session = EditorSession::with_text(session_config(&Config::default()), PROGRAM);
        match pick(&mut session, ScreenPoint::new(400.0, 250.0)) {
            Pick::Selected { line, text, .. } => {
                assert_eq!(line, 5);
                assert_eq!(text, "G1 X0 Y10");
            }
            other => panic!("expected a selection, got {:?}", other),
        }
    }
}
