//! Graph Store contract
//!
//! Everything above this layer (index, matcher, mutator) talks to storage
//! only through [`GraphBackend`]. The crate ships the in-memory
//! [`GraphStore`](crate::graph::GraphStore) implementation in [`memory`].

pub mod memory;

use crate::graph::{Color, EdgeId, GraphResult, Label, NodeId, NodeSelector, Orientation, PropertyMap};
use crate::query::{PatternQuery, Record};

pub use memory::open_memory;

/// Storage and query primitives consumed by the index, matcher and mutator.
///
/// Implementations are used by a single logical writer at a time; none of
/// these calls is expected to be atomic with respect to another.
pub trait GraphBackend {
    /// Create a node, under `id` if given, otherwise under a fresh id
    fn create_node(&mut self, id: Option<NodeId>, label: Label, properties: PropertyMap) -> GraphResult<NodeId>;

    /// Create one `color` edge per (from, to) pair of selected nodes.
    /// `Orientation::Reverse` makes the `to` node the source.
    fn create_edges(
        &mut self,
        from: &NodeSelector,
        to: &NodeSelector,
        color: &Color,
        orientation: Orientation,
    ) -> GraphResult<Vec<EdgeId>>;

    /// Remove a single edge
    fn delete_edge(&mut self, id: EdgeId) -> GraphResult<()>;

    /// Remove every node and edge
    fn delete_all(&mut self) -> GraphResult<()>;

    /// Run a structural query; records come back in the store's iteration order
    fn run_query(&self, query: &PatternQuery) -> GraphResult<Vec<Record>>;

    /// Is the store reachable?
    fn check_connectivity(&self) -> bool;

    fn node_count(&self) -> usize;

    fn edge_count(&self) -> usize;
}
