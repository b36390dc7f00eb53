//! In-memory graph storage implementation
//!
//! Nodes live in an ordered map so every scan visits them in ascending id
//! order; walk enumeration relies on that for a deterministic "first match".

use super::edge::Edge;
use super::node::Node;
use super::property::PropertyMap;
use super::selector::NodeSelector;
use super::types::{Color, EdgeId, Label, NodeId, MAX_NODE_ID};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use thiserror::Error;

/// Errors that can occur during graph operations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("Node {0} not found")]
    NodeNotFound(NodeId),

    #[error("Edge {0} not found")]
    EdgeNotFound(EdgeId),

    #[error("Node {0} already exists")]
    NodeAlreadyExists(NodeId),

    #[error("Node id {0} is out of range")]
    InvalidNodeId(NodeId),

    #[error("Invalid edge: source node {0} does not exist")]
    InvalidEdgeSource(NodeId),

    #[error("Invalid edge: target node {0} does not exist")]
    InvalidEdgeTarget(NodeId),

    #[error("Graph store connection failed: {0}")]
    ConnectionFailed(String),
}

pub type GraphResult<T> = Result<T, GraphError>;

/// In-memory graph storage
///
/// - nodes: NodeId -> Node (ordered)
/// - edges: EdgeId -> Edge (ordered)
/// - outgoing / incoming: NodeId -> Vec<EdgeId> adjacency lists
/// - label_index: Label -> node ids, for selector lookups
/// - color_index: Color -> edge ids
#[derive(Debug)]
pub struct GraphStore {
    nodes: BTreeMap<NodeId, Node>,
    edges: BTreeMap<EdgeId, Edge>,
    outgoing: HashMap<NodeId, Vec<EdgeId>>,
    incoming: HashMap<NodeId, Vec<EdgeId>>,
    label_index: HashMap<Label, BTreeSet<NodeId>>,
    color_index: HashMap<Color, BTreeSet<EdgeId>>,

    /// Next node ID; ids are never handed out twice
    next_node_id: u64,

    /// Next edge ID
    next_edge_id: u64,
}

impl GraphStore {
    /// Create a new empty graph store
    pub fn new() -> Self {
        GraphStore {
            nodes: BTreeMap::new(),
            edges: BTreeMap::new(),
            outgoing: HashMap::new(),
            incoming: HashMap::new(),
            label_index: HashMap::new(),
            color_index: HashMap::new(),
            next_node_id: 1,
            next_edge_id: 1,
        }
    }

    /// Create a node with auto-generated ID and no attributes
    pub fn create_node(&mut self, label: impl Into<Label>) -> NodeId {
        let id = self.allocate_node_id();
        self.insert_node(Node::new(id, label));
        id
    }

    /// Create a node with attributes, optionally under an explicit ID
    pub fn create_node_with_properties(
        &mut self,
        id: Option<NodeId>,
        label: impl Into<Label>,
        properties: PropertyMap,
    ) -> GraphResult<NodeId> {
        let id = match id {
            Some(id) => {
                if id.as_u64() == 0 || id.as_u64() > MAX_NODE_ID {
                    return Err(GraphError::InvalidNodeId(id));
                }
                if self.nodes.contains_key(&id) {
                    return Err(GraphError::NodeAlreadyExists(id));
                }
                // Keep auto-assigned ids above every explicit one
                self.next_node_id = self.next_node_id.max(id.as_u64() + 1);
                id
            }
            None => self.allocate_node_id(),
        };
        self.insert_node(Node::new_with_properties(id, label, properties));
        Ok(id)
    }

    fn allocate_node_id(&mut self) -> NodeId {
        while self.nodes.contains_key(&NodeId::new(self.next_node_id)) {
            self.next_node_id += 1;
        }
        let id = NodeId::new(self.next_node_id);
        self.next_node_id += 1;
        id
    }

    fn insert_node(&mut self, node: Node) {
        self.label_index
            .entry(node.label.clone())
            .or_default()
            .insert(node.id);
        self.nodes.insert(node.id, node);
    }

    /// Get a node by ID
    pub fn get_node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Check if a node exists
    pub fn has_node(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Ids of all nodes matched by a selector, ascending
    pub fn select_nodes(&self, selector: &NodeSelector) -> Vec<NodeId> {
        if let Some(id) = selector.pinned_id() {
            return self
                .get_node(id)
                .filter(|node| selector.matches(node))
                .map(|node| vec![node.id])
                .unwrap_or_default();
        }
        match &selector.label {
            Some(label) => self
                .label_index
                .get(label)
                .map(|ids| {
                    ids.iter()
                        .filter_map(|id| self.nodes.get(id))
                        .filter(|node| selector.matches(node))
                        .map(|node| node.id)
                        .collect()
                })
                .unwrap_or_default(),
            None => self
                .nodes
                .values()
                .filter(|node| selector.matches(node))
                .map(|node| node.id)
                .collect(),
        }
    }

    /// Create an edge between two nodes
    pub fn create_edge(
        &mut self,
        source: NodeId,
        target: NodeId,
        color: impl Into<Color>,
    ) -> GraphResult<EdgeId> {
        // Validate nodes exist
        if !self.has_node(source) {
            return Err(GraphError::InvalidEdgeSource(source));
        }
        if !self.has_node(target) {
            return Err(GraphError::InvalidEdgeTarget(target));
        }

        let edge_id = EdgeId::new(self.next_edge_id);
        self.next_edge_id += 1;

        let edge = Edge::new(edge_id, source, target, color);

        // Update adjacency lists
        self.outgoing.entry(source).or_default().push(edge_id);
        self.incoming.entry(target).or_default().push(edge_id);

        // Update color index
        self.color_index
            .entry(edge.color.clone())
            .or_default()
            .insert(edge_id);

        self.edges.insert(edge_id, edge);
        Ok(edge_id)
    }

    /// Get an edge by ID
    pub fn get_edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(&id)
    }

    /// Delete an edge
    pub fn delete_edge(&mut self, id: EdgeId) -> GraphResult<Edge> {
        let edge = self.edges.remove(&id).ok_or(GraphError::EdgeNotFound(id))?;

        // Remove from color index
        if let Some(edge_set) = self.color_index.get_mut(&edge.color) {
            edge_set.remove(&id);
            if edge_set.is_empty() {
                self.color_index.remove(&edge.color);
            }
        }

        // Remove from adjacency lists
        if let Some(adj) = self.outgoing.get_mut(&edge.source) {
            adj.retain(|&eid| eid != id);
        }
        if let Some(adj) = self.incoming.get_mut(&edge.target) {
            adj.retain(|&eid| eid != id);
        }

        Ok(edge)
    }

    /// Get all outgoing edges from a node
    pub fn get_outgoing_edges(&self, node_id: NodeId) -> Vec<&Edge> {
        self.adjacent(self.outgoing.get(&node_id))
    }

    /// Get all incoming edges to a node
    pub fn get_incoming_edges(&self, node_id: NodeId) -> Vec<&Edge> {
        self.adjacent(self.incoming.get(&node_id))
    }

    fn adjacent(&self, edge_ids: Option<&Vec<EdgeId>>) -> Vec<&Edge> {
        edge_ids
            .map(|ids| ids.iter().filter_map(|id| self.edges.get(id)).collect())
            .unwrap_or_default()
    }

    /// Colors of every edge touching a node, deduplicated and sorted
    pub fn incident_colors(&self, node_id: NodeId) -> BTreeSet<Color> {
        self.get_incoming_edges(node_id)
            .into_iter()
            .chain(self.get_outgoing_edges(node_id))
            .map(|edge| edge.color.clone())
            .collect()
    }

    /// All colors present in the graph, sorted
    pub fn colors(&self) -> BTreeSet<&Color> {
        self.color_index.keys().collect()
    }

    /// Get total number of nodes
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get total number of edges
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// All nodes, ascending by id
    pub fn all_nodes(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// All edges, ascending by id
    pub fn all_edges(&self) -> impl Iterator<Item = &Edge> {
        self.edges.values()
    }

    /// Clear all data from the graph
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges.clear();
        self.outgoing.clear();
        self.incoming.clear();
        self.label_index.clear();
        self.color_index.clear();
        // Ids stay monotonic across wipes
    }
}

impl Default for GraphStore {
    fn default() -> Self {
        Self::new()
    }
}
