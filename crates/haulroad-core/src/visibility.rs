//! Proximity-driven reveal of nodes and their leaves.

use crate::catalog::Catalog;
use crate::{Error, Result};
use haulroad_layout::Node;
use haulroad_layout::geom::{Point, distance, planar_distance};
use indexmap::IndexSet;
use rustc_hash::FxBuildHasher;
use serde::{Deserialize, Serialize};

pub type FxIndexSet<T> = IndexSet<T, FxBuildHasher>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Metric {
    /// Ground-plane distance; elevation is ignored.
    #[default]
    Planar,
    Spatial,
}

impl Metric {
    pub fn distance(self, a: Point, b: Point) -> f64 {
        match self {
            Self::Planar => planar_distance(a, b),
            Self::Spatial => distance(a, b),
        }
    }
}

/// A node revealed by one observation, with the names of the leaves revealed alongside it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reveal {
    pub node: String,
    pub leaves: Vec<String>,
}

/// Revealed nodes and `(node, leaf)` pairs, in reveal order. Only ever grows until
/// [`VisibilityState::reset`].
#[derive(Debug, Clone, Default)]
pub struct VisibilityState {
    nodes: FxIndexSet<String>,
    leaves: FxIndexSet<(String, String)>,
}

impl VisibilityState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reset(&mut self) {
        self.nodes.clear();
        self.leaves.clear();
    }

    pub fn is_node_revealed(&self, node: &str) -> bool {
        self.nodes.contains(node)
    }

    pub fn is_leaf_revealed(&self, node: &str, leaf: &str) -> bool {
        self.leaves.contains(&(node.to_string(), leaf.to_string()))
    }

    pub fn revealed_nodes(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(String::as_str)
    }

    /// `(node, leaf)` pairs.
    pub fn revealed_leaves(&self) -> impl Iterator<Item = (&str, &str)> {
        self.leaves
            .iter()
            .map(|(node, leaf)| (node.as_str(), leaf.as_str()))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn leaf_count(&self) -> usize {
        self.leaves.len()
    }

    /// Marks `node` and the given leaves revealed. Returns `None` when the node already was.
    pub fn reveal<'a>(
        &mut self,
        node: &str,
        leaves: impl IntoIterator<Item = &'a str>,
    ) -> Option<Reveal> {
        if !self.nodes.insert(node.to_string()) {
            return None;
        }
        let mut added = Vec::new();
        for leaf in leaves {
            if self.leaves.insert((node.to_string(), leaf.to_string())) {
                added.push(leaf.to_string());
            }
        }
        Some(Reveal {
            node: node.to_string(),
            leaves: added,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ProximityTrigger {
    pub threshold: f64,
    pub metric: Metric,
}

impl Default for ProximityTrigger {
    fn default() -> Self {
        Self {
            threshold: 0.5,
            metric: Metric::Planar,
        }
    }
}

impl ProximityTrigger {
    pub fn new(threshold: f64, metric: Metric) -> Result<Self> {
        if !threshold.is_finite() || threshold <= 0.0 {
            return Err(Error::InvalidConfig {
                message: format!("reveal threshold must be a positive number, got {threshold}"),
            });
        }
        Ok(Self { threshold, metric })
    }

    pub fn is_near(&self, marker: Point, node: &Node) -> bool {
        self.metric.distance(marker, node.position()) < self.threshold
    }

    /// Reveals every node within the threshold of `marker` that is not revealed yet, in node
    /// order.
    pub fn observe(
        &self,
        state: &mut VisibilityState,
        marker: Point,
        nodes: &[Node],
        catalog: &Catalog,
    ) -> Vec<Reveal> {
        let mut out = Vec::new();
        for node in nodes {
            if state.is_node_revealed(&node.id) || !self.is_near(marker, node) {
                continue;
            }
            let leaves = catalog.leaves(&node.id).unwrap_or_default();
            if let Some(reveal) = state.reveal(&node.id, leaves.iter().map(|l| l.name.as_str())) {
                tracing::debug!(
                    node = %reveal.node,
                    leaves = reveal.leaves.len(),
                    "revealed node"
                );
                out.push(reveal);
            }
        }
        out
    }
}
