//! Node geometry projection.
//!
//! Turns interpreted nodes into screen-space points, groups coincident points
//! into overlap clusters, and produces the drawable scene (edges and labelled
//! markers). A relative-mode statement stops the projection at that line.

use gcodeview_core::constants::RELATIVE_MODE_NOTICE;
use gcodeview_core::{GcodeError, Position};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, warn};

use super::viewport::{Bounds, RenderTransform, ScreenPoint};
use crate::gcode::{Interpretation, MotionKind};

/// A node placed on screen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderPoint {
    pub node_index: usize,
    pub screen: ScreenPoint,
    /// Machine Z, kept for display
    pub z: f64,
}

/// Integer-rounded screen position used to group coincident points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PosKey {
    pub x: i64,
    pub y: i64,
}

impl PosKey {
    /// Round half-up; `None` for non-finite coordinates.
    pub fn from_screen(point: ScreenPoint) -> Option<Self> {
        if !point.is_finite() {
            return None;
        }
        Some(Self {
            x: (point.x + 0.5).floor() as i64,
            y: (point.y + 0.5).floor() as i64,
        })
    }

    pub fn center(&self) -> ScreenPoint {
        ScreenPoint::new(self.x as f64, self.y as f64)
    }
}

impl fmt::Display for PosKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

/// Nodes sharing one rounded screen position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverlapCluster {
    pub key: PosKey,
    /// Rounded centre used for hit testing
    pub center: ScreenPoint,
    /// Member node indices, ascending
    pub members: Vec<usize>,
}

impl OverlapCluster {
    /// Lowest member index
    pub fn label(&self) -> usize {
        self.members.first().copied().unwrap_or_default()
    }

    pub fn is_overlap(&self) -> bool {
        self.members.len() > 1
    }

    /// `+N-1` badge for overlap clusters
    pub fn badge(&self) -> Option<String> {
        self.is_overlap()
            .then(|| format!("+{}", self.members.len() - 1))
    }
}

/// Edge style, by motion kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SegmentStyle {
    /// G0, gray dashed
    RapidDashed,
    /// G1, blue solid
    LinearSolid,
}

impl SegmentStyle {
    pub fn color(&self) -> &'static str {
        match self {
            Self::RapidDashed => "gray",
            Self::LinearSolid => "blue",
        }
    }

    pub fn is_dashed(&self) -> bool {
        matches!(self, Self::RapidDashed)
    }
}

impl From<MotionKind> for SegmentStyle {
    fn from(motion: MotionKind) -> Self {
        match motion {
            MotionKind::Rapid => Self::RapidDashed,
            MotionKind::Linear => Self::LinearSolid,
        }
    }
}

/// A drawable edge between consecutive tracked positions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub start: ScreenPoint,
    pub end: ScreenPoint,
    pub style: SegmentStyle,
    /// Node at the end of the edge
    pub node_index: usize,
}

/// A labelled node marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub position: ScreenPoint,
    pub label: String,
    pub badge: Option<String>,
    pub overlap: bool,
    /// Index into [`Projection::clusters`]
    pub cluster: usize,
}

/// Why projection stopped early.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionAbort {
    /// 0-based line of the `G91` statement
    pub line: usize,
    pub notice: String,
}

impl ProjectionAbort {
    pub fn to_error(&self) -> GcodeError {
        GcodeError::RelativeModeUnsupported { line: self.line }
    }
}

/// Everything the rendering surface needs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub points: Vec<RenderPoint>,
    /// Ordered by first appearance
    pub clusters: Vec<OverlapCluster>,
    pub segments: Vec<Segment>,
    pub markers: Vec<Marker>,
    pub bounds: Option<Bounds>,
    pub aborted: Option<ProjectionAbort>,
}

impl Projection {
    pub fn is_aborted(&self) -> bool {
        self.aborted.is_some()
    }

    /// Cluster containing `node_index`
    pub fn cluster_of(&self, node_index: usize) -> Option<&OverlapCluster> {
        self.clusters
            .iter()
            .find(|cluster| cluster.members.contains(&node_index))
    }

    pub fn cluster_by_key(&self, key: PosKey) -> Option<&OverlapCluster> {
        self.clusters.iter().find(|cluster| cluster.key == key)
    }
}

/// Group points by rounded screen position, in order of first appearance.
pub fn cluster_points(points: &[RenderPoint]) -> Vec<OverlapCluster> {
    let mut clusters: Vec<OverlapCluster> = Vec::new();
    let mut by_key: HashMap<PosKey, usize> = HashMap::new();

    for point in points {
        let Some(key) = PosKey::from_screen(point.screen) else {
            continue;
        };
        match by_key.get(&key) {
            Some(&idx) => clusters[idx].members.push(point.node_index),
            None => {
                by_key.insert(key, clusters.len());
                clusters.push(OverlapCluster {
                    key,
                    center: key.center(),
                    members: vec![point.node_index],
                });
            }
        }
    }

    for cluster in &mut clusters {
        cluster.members.sort_unstable();
    }
    clusters
}

fn build_markers(points: &[RenderPoint], clusters: &[OverlapCluster]) -> Vec<Marker> {
    clusters
        .iter()
        .enumerate()
        .filter_map(|(idx, cluster)| {
            let label = cluster.label();
            let point = points.iter().find(|p| p.node_index == label)?;
            Some(Marker {
                position: point.screen,
                label: label.to_string(),
                badge: cluster.badge(),
                overlap: cluster.is_overlap(),
                cluster: idx,
            })
        })
        .collect()
}

/// Project interpreted nodes through `transform`.
pub fn project(interpretation: &Interpretation, transform: &RenderTransform) -> Projection {
    let cutoff = interpretation.relative_mode_line;
    let mut points = Vec::new();
    let mut segments = Vec::new();
    let mut bounds = Bounds::new();
    let mut previous = Position::ORIGIN;

    for node in &interpretation.nodes {
        if cutoff.is_some_and(|line| node.line > line) {
            break;
        }
        let start = transform.to_screen(previous);
        let end = transform.to_screen(node.position);
        segments.push(Segment {
            start,
            end,
            style: node.motion.into(),
            node_index: node.index,
        });
        points.push(RenderPoint {
            node_index: node.index,
            screen: end,
            z: node.position.z,
        });
        bounds.update(node.position);
        previous = node.position;
    }

    let aborted = cutoff.map(|line| {
        warn!("Relative positioning at line {}, projection stopped", line);
        ProjectionAbort {
            line,
            notice: RELATIVE_MODE_NOTICE.to_string(),
        }
    });

    let clusters = cluster_points(&points);
    let markers = build_markers(&points, &clusters);

    debug!(
        "Projection: {} points, {} clusters, {} segments{}",
        points.len(),
        clusters.len(),
        segments.len(),
        if aborted.is_some() { " (aborted)" } else { "" }
    );

    Projection {
        points,
        clusters,
        segments,
        markers,
        bounds: bounds.is_valid().then_some(bounds),
        aborted,
    }
}
