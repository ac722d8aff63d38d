//! 2D node visualization
//!
//! This module provides:
//! - Machine-to-screen transform (viewport)
//! - Node projection, overlap clustering and scene building (projector)
//! - Pointer hit testing and cluster expansion (interaction)
//! - SVG export of the projected scene (svg)

pub mod interaction;
pub mod projector;
pub mod svg;
pub mod viewport;

pub use interaction::{
    expand_cluster, resolve_hit, ClickOutcome, ExpandedCluster, Hit, InteractionConfig,
    InteractionResolver, SubNode,
};
pub use projector::{
    cluster_points, project, Marker, OverlapCluster, PosKey, Projection, ProjectionAbort,
    RenderPoint, Segment, SegmentStyle,
};
pub use svg::render_svg;
pub use viewport::{Bounds, RenderTransform, ScreenPoint};
