//! In-memory backend: [`GraphStore`] behind the [`GraphBackend`] contract

use super::GraphBackend;
use crate::config::ConnectionConfig;
use crate::graph::{
    Color, EdgeId, GraphError, GraphResult, GraphStore, Label, NodeId, NodeSelector, Orientation, PropertyMap,
};
use crate::query::{PatternQuery, QueryExecutor, Record};
use tracing::{debug, info};

/// URI scheme served by the in-memory store
pub const MEMORY_SCHEME: &str = "memory:";

/// Open an empty in-memory store for a validated connection config.
///
/// Only `memory:` URIs can be served in-process; anything else is reported
/// as a connection failure.
pub fn open_memory(config: &ConnectionConfig) -> GraphResult<GraphStore> {
    if !config.uri.starts_with(MEMORY_SCHEME) {
        return Err(GraphError::ConnectionFailed(format!(
            "unsupported store uri '{}', expected '{}'",
            config.uri, MEMORY_SCHEME
        )));
    }
    info!("Opened in-memory graph store '{}' as {}", config.db_name, config.user);
    Ok(GraphStore::new())
}

impl GraphBackend for GraphStore {
    fn create_node(&mut self, id: Option<NodeId>, label: Label, properties: PropertyMap) -> GraphResult<NodeId> {
        self.create_node_with_properties(id, label, properties)
    }

    fn create_edges(
        &mut self,
        from: &NodeSelector,
        to: &NodeSelector,
        color: &Color,
        orientation: Orientation,
    ) -> GraphResult<Vec<EdgeId>> {
        let sources = self.select_nodes(from);
        let targets = self.select_nodes(to);
        debug!(
            "Edge request {:?} matched {} x {} nodes",
            color.as_str(),
            sources.len(),
            targets.len()
        );

        let mut created = Vec::with_capacity(sources.len() * targets.len());
        for &a in &sources {
            for &b in &targets {
                let (source, target) = match orientation {
                    Orientation::Forward => (a, b),
                    Orientation::Reverse => (b, a),
                };
                created.push(self.create_edge(source, target, color.clone())?);
            }
        }
        Ok(created)
    }

    fn delete_edge(&mut self, id: EdgeId) -> GraphResult<()> {
        GraphStore::delete_edge(self, id).map(|_| ())
    }

    fn delete_all(&mut self) -> GraphResult<()> {
        self.clear();
        Ok(())
    }

    fn run_query(&self, query: &PatternQuery) -> GraphResult<Vec<Record>> {
        Ok(QueryExecutor::new(self).execute(query))
    }

    fn check_connectivity(&self) -> bool {
        true
    }

    fn node_count(&self) -> usize {
        GraphStore::node_count(self)
    }

    fn edge_count(&self) -> usize {
        GraphStore::edge_count(self)
    }
}
