//! Colored edge implementation
//!
//! Edges are directed and carry a single color. Several edges may join the
//! same ordered pair of nodes as long as their colors differ.

use super::types::{Color, EdgeId, NodeId};
use serde::{Deserialize, Serialize};

/// A directed, colored edge
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    /// Unique identifier for this edge
    pub id: EdgeId,

    /// Source node (edge goes FROM this node)
    pub source: NodeId,

    /// Target node (edge goes TO this node)
    pub target: NodeId,

    /// Haplotype/path this edge belongs to
    pub color: Color,
}

impl Edge {
    /// Create a new directed edge
    pub fn new(id: EdgeId, source: NodeId, target: NodeId, color: impl Into<Color>) -> Self {
        Edge {
            id,
            source,
            target,
            color: color.into(),
        }
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Edge {}

impl std::hash::Hash for Edge {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}
