//! Pointer interaction over projected clusters.
//!
//! Hit testing, expansion of overlap clusters into a ring of sub-nodes, and
//! click resolution to a node. At most one cluster is expanded at a time.

use gcodeview_core::constants::{
    CENTER_HIT_RADIUS_PX, EXPAND_RING_RADIUS_PX, NODE_HIT_RADIUS_PX, SUB_NODE_HIT_RADIUS_PX,
};
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;
use tracing::debug;

use super::projector::{OverlapCluster, PosKey};
use super::viewport::ScreenPoint;

/// Pixel radii used for hit testing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InteractionConfig {
    pub hit_radius: f64,
    pub ring_radius: f64,
    pub sub_node_hit_radius: f64,
    pub center_hit_radius: f64,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            hit_radius: NODE_HIT_RADIUS_PX,
            ring_radius: EXPAND_RING_RADIUS_PX,
            sub_node_hit_radius: SUB_NODE_HIT_RADIUS_PX,
            center_hit_radius: CENTER_HIT_RADIUS_PX,
        }
    }
}

/// What the pointer is over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Hit {
    /// A single-member cluster
    Node { node_index: usize },
    /// An overlap cluster, by index into the cluster list
    Cluster { index: usize },
}

/// A ring position of an expanded cluster.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubNode {
    pub node_index: usize,
    pub position: ScreenPoint,
}

/// The currently expanded cluster.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExpandedCluster {
    pub key: PosKey,
    pub center: ScreenPoint,
    pub sub_nodes: Vec<SubNode>,
}

/// Result of a click.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ClickOutcome {
    /// A node was picked; the caller highlights its source line
    SelectNode(usize),
    Expanded { label: usize, members: usize },
    Collapsed,
    Nothing,
}

/// Nearest cluster within `radius` of `point`; ties keep the first one.
pub fn resolve_hit(point: ScreenPoint, clusters: &[OverlapCluster], radius: f64) -> Option<Hit> {
    let mut best: Option<(usize, f64)> = None;
    for (idx, cluster) in clusters.iter().enumerate() {
        let distance = point.distance_to(cluster.center);
        if distance <= radius && best.is_none_or(|(_, d)| distance < d) {
            best = Some((idx, distance));
        }
    }

    best.map(|(idx, _)| {
        let cluster = &clusters[idx];
        if cluster.is_overlap() {
            Hit::Cluster { index: idx }
        } else {
            Hit::Node {
                node_index: cluster.label(),
            }
        }
    })
}

/// Sub-node positions on a ring around the cluster centre.
pub fn expand_cluster(cluster: &OverlapCluster, ring_radius: f64) -> Vec<SubNode> {
    let count = cluster.members.len();
    if count == 0 {
        return Vec::new();
    }
    let step = TAU / count as f64;
    cluster
        .members
        .iter()
        .enumerate()
        .map(|(i, &node_index)| {
            let angle = i as f64 * step;
            SubNode {
                node_index,
                position: ScreenPoint::new(
                    cluster.center.x + angle.cos() * ring_radius,
                    cluster.center.y + angle.sin() * ring_radius,
                ),
            }
        })
        .collect()
}

/// Expansion state plus hit testing.
#[derive(Debug, Clone, Default)]
pub struct InteractionResolver {
    config: InteractionConfig,
    expanded: Option<ExpandedCluster>,
}

impl InteractionResolver {
    pub fn new(config: InteractionConfig) -> Self {
        Self {
            config,
            expanded: None,
        }
    }

    pub fn config(&self) -> &InteractionConfig {
        &self.config
    }

    pub fn expanded(&self) -> Option<&ExpandedCluster> {
        self.expanded.as_ref()
    }

    pub fn resolve_hit(&self, point: ScreenPoint, clusters: &[OverlapCluster]) -> Option<Hit> {
        resolve_hit(point, clusters, self.config.hit_radius)
    }

    /// Expand `cluster`, replacing any previous expansion.
    pub fn expand(&mut self, cluster: &OverlapCluster) -> &ExpandedCluster {
        debug!(
            "Expanding cluster {} ({} nodes)",
            cluster.key,
            cluster.members.len()
        );
        self.expanded.insert(ExpandedCluster {
            key: cluster.key,
            center: cluster.center,
            sub_nodes: expand_cluster(cluster, self.config.ring_radius),
        })
    }

    /// Returns true if something was collapsed.
    pub fn collapse(&mut self) -> bool {
        self.expanded.take().is_some()
    }

    /// Clusters are rebuilt on every re-parse. Node indices shift with the
    /// text, so the ring is rebuilt from the cluster now at the same key, or
    /// dropped if that position no longer overlaps.
    pub fn retain_valid(&mut self, clusters: &[OverlapCluster]) {
        let Some(key) = self.expanded.as_ref().map(|e| e.key) else {
            return;
        };
        match clusters.iter().find(|c| c.key == key && c.is_overlap()) {
            Some(cluster) => {
                self.expanded = Some(ExpandedCluster {
                    key,
                    center: cluster.center,
                    sub_nodes: expand_cluster(cluster, self.config.ring_radius),
                });
            }
            None => {
                debug!("Expanded cluster {} is gone", key);
                self.expanded = None;
            }
        }
    }

    /// Hover. Moving onto a different cluster collapses the expanded one.
    /// Returns true if that happened.
    pub fn pointer_move(&mut self, point: ScreenPoint, clusters: &[OverlapCluster]) -> bool {
        let Some(expanded) = &self.expanded else {
            return false;
        };
        let over_other = self.resolve_hit(point, clusters).is_some_and(|hit| {
            let index = match hit {
                Hit::Cluster { index } => Some(index),
                Hit::Node { node_index } => clusters
                    .iter()
                    .position(|c| c.members.first() == Some(&node_index)),
            };
            index.is_some_and(|i| clusters[i].key != expanded.key)
        });
        if over_other {
            self.collapse();
        }
        over_other
    }

    pub fn pointer_leave(&mut self) -> bool {
        self.collapse()
    }

    /// Sub-node of the expanded cluster under `point`.
    pub fn sub_node_at(&self, point: ScreenPoint) -> Option<usize> {
        let expanded = self.expanded.as_ref()?;
        expanded
            .sub_nodes
            .iter()
            .find(|sub| point.distance_to(sub.position) <= self.config.sub_node_hit_radius)
            .map(|sub| sub.node_index)
    }

    pub fn click(&mut self, point: ScreenPoint, clusters: &[OverlapCluster]) -> ClickOutcome {
        if let Some(expanded) = &self.expanded {
            if point.distance_to(expanded.center) <= self.config.center_hit_radius {
                self.collapse();
                return ClickOutcome::Collapsed;
            }
            if let Some(node_index) = self.sub_node_at(point) {
                return ClickOutcome::SelectNode(node_index);
            }
            self.collapse();
            return match self.click_unexpanded(point, clusters) {
                ClickOutcome::Nothing => ClickOutcome::Collapsed,
                outcome => outcome,
            };
        }
        self.click_unexpanded(point, clusters)
    }

    fn click_unexpanded(&mut self, point: ScreenPoint, clusters: &[OverlapCluster]) -> ClickOutcome {
        match self.resolve_hit(point, clusters) {
            Some(Hit::Node { node_index }) => ClickOutcome::SelectNode(node_index),
            Some(Hit::Cluster { index }) => {
                let cluster = &clusters[index];
                self.expand(cluster);
                ClickOutcome::Expanded {
                    label: cluster.label(),
                    members: cluster.members.len(),
                }
            }
            None => ClickOutcome::Nothing,
        }
    }
}
