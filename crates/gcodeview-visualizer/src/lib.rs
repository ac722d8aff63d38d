//! # GCodeView Visualizer
//!
//! G-code interpretation and node visualization for GCodeView.
//! Includes the statement tokenizer, position tracker, duplicate checker,
//! geometry projector, interaction resolver and the tabular view.
//!
//! Every entry point is a pure function of its inputs: each call returns
//! fresh result structures and nothing is cached between calls.

pub mod gcode;
pub mod table;
pub mod visualizer;

pub use gcode::{
    check, find_duplicates, format_gcode, interpret, statements, tokenize, CheckReport,
    CommandKind, Diagnostic, DiagnosticSeverity, DistanceMode, Interpretation, MotionKind, Node,
    PositionTracker, Statement, Token, TokenizedLine,
};

pub use table::{from_rows, to_rows, RowField, TableModel, TableRow};

pub use visualizer::{
    expand_cluster, project, render_svg, resolve_hit, Bounds, ClickOutcome, ExpandedCluster, Hit,
    InteractionConfig, InteractionResolver, Marker, OverlapCluster, PosKey, Projection,
    ProjectionAbort, RenderPoint, RenderTransform, ScreenPoint, Segment, SegmentStyle, SubNode,
};
