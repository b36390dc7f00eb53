//! Graph topology analysis algorithms
//!
//! Cycle detection and topological ordering for directed graphs.

use super::common::{GraphView, NodeId};
use std::collections::VecDeque;

/// Kahn's algorithm over the dense view.
///
/// Returns the dense indices in topological order; the order is shorter than
/// `node_count` exactly when the graph contains a cycle.
fn kahn(view: &GraphView) -> Vec<usize> {
    let mut in_degree: Vec<usize> = (0..view.node_count).map(|idx| view.in_degree(idx)).collect();
    let mut ready: VecDeque<usize> = in_degree
        .iter()
        .enumerate()
        .filter(|(_, deg)| **deg == 0)
        .map(|(idx, _)| idx)
        .collect();

    let mut order = Vec::with_capacity(view.node_count);
    while let Some(u) = ready.pop_front() {
        order.push(u);
        for &v in view.successors(u) {
            in_degree[v] -= 1;
            if in_degree[v] == 0 {
                ready.push_back(v);
            }
        }
    }
    order
}

/// Returns true if any node can reach itself. A self-loop counts as a cycle.
pub fn has_cycle(view: &GraphView) -> bool {
    kahn(view).len() < view.node_count
}

/// Topological order of node ids, or `None` if the graph is cyclic.
pub fn topological_order(view: &GraphView) -> Option<Vec<NodeId>> {
    let order = kahn(view);
    if order.len() < view.node_count {
        return None;
    }
    Some(order.into_iter().map(|idx| view.index_to_node[idx]).collect())
}
