//! Graph algorithms module
//!
//! Algorithms are implemented in `afgraph-algorithms` crate.
//! This module provides the integration/adapter layer.

use crate::graph::{Color, GraphStore};
use afgraph_algorithms::{GraphView, NodeId as AlgoNodeId};

// Re-export algorithms
pub use afgraph_algorithms::{has_cycle, topological_order};

/// Build a GraphView from the store for algorithm execution
///
/// With `color` set, only edges of that color are kept. Self-loops are left
/// out: a node reaching itself over a single edge is not a cycle here, only
/// paths of two or more edges are.
pub fn build_view(store: &GraphStore, color: Option<&Color>) -> GraphView {
    let nodes: Vec<AlgoNodeId> = store.all_nodes().map(|n| n.id.as_u64()).collect();
    let edges: Vec<(AlgoNodeId, AlgoNodeId)> = store
        .all_edges()
        .filter(|edge| edge.source != edge.target)
        .filter(|edge| color.map_or(true, |c| &edge.color == c))
        .map(|edge| (edge.source.as_u64(), edge.target.as_u64()))
        .collect();

    GraphView::from_edges(&nodes, &edges)
}
