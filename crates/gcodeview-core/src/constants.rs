//! Shared constants for rendering, interaction and editing defaults.

/// Default machine-to-screen scale (pixels per machine unit)
pub const DEFAULT_SCALE: f64 = 5.0;

/// Default canvas width in pixels
pub const DEFAULT_CANVAS_WIDTH: f64 = 800.0;

/// Default canvas height in pixels
pub const DEFAULT_CANVAS_HEIGHT: f64 = 600.0;

/// Pointer distance (px) within which a node or cluster centre is hit
pub const NODE_HIT_RADIUS_PX: f64 = 5.0;

/// Radius (px) of the ring an expanded cluster lays its sub-nodes on
pub const EXPAND_RING_RADIUS_PX: f64 = 30.0;

/// Pointer distance (px) within which a ring sub-node is hit
pub const SUB_NODE_HIT_RADIUS_PX: f64 = 12.0;

/// Pointer distance (px) from an expanded cluster's centre that collapses it
pub const CENTER_HIT_RADIUS_PX: f64 = 8.0;

/// Maximum number of whole-text snapshots kept for undo
pub const MAX_HISTORY_DEPTH: usize = 50;

/// Decimal places used when regenerating axis values
pub const AXIS_DECIMALS: usize = 2;

/// Decimal places used when regenerating feed-rate values
pub const FEED_DECIMALS: usize = 0;

/// Line appended when regenerated text has no absolute-mode marker
pub const ABSOLUTE_MODE_LINE: &str = "G90 ; absolute positioning";

/// Sentinel message for a check pass that found nothing
pub const NO_ERRORS_MESSAGE: &str = "No errors found, G-code is valid.";

/// Notice surfaced when relative positioning aborts projection
pub const RELATIVE_MODE_NOTICE: &str =
    "Relative coordinates (G91) are not supported, use absolute coordinates (G90)";
