//! Declarative JSON bulk import
//!
//! ```json
//! {
//!   "nodes": [{"label": "Base", "id": 1, "name": "A"}, ...],
//!   "relations": [{
//!     "from": {"label": "Base", "properties": {"id": 1}},
//!     "to": {"label": "Base", "properties": {"id": 2}},
//!     "label": "HG002#1",
//!     "direction": 1
//!   }]
//! }
//! ```

use super::resolve_node;
use crate::backend::GraphBackend;
use crate::config::ConfigError;
use crate::engine::AlignmentFreeGraph;
use crate::error::AfgResult;
use crate::graph::{Color, Label, NodeId, NodeSelector, Orientation, PropertyMap, PropertyValue};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::Path;
use tracing::info;

/// A bulk record set
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BulkDocument {
    #[serde(default)]
    pub nodes: Vec<Map<String, Value>>,
    #[serde(default)]
    pub relations: Vec<BulkRelation>,
}

/// Edge request between two selected node sets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulkRelation {
    pub from: BulkSelector,
    pub to: BulkSelector,
    /// Edge color
    #[serde(default)]
    pub label: Option<String>,
    /// `1` forward, `-1` reversed
    #[serde(default = "forward")]
    pub direction: i64,
}

fn forward() -> i64 {
    1
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BulkSelector {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub properties: Map<String, Value>,
}

/// Counts reported after a bulk import
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BulkSummary {
    pub nodes: usize,
    pub edges: usize,
}

type PlannedNode = (Label, Option<NodeId>, PropertyMap);
type PlannedEdge = (NodeSelector, NodeSelector, Color, Orientation);

impl BulkDocument {
    pub fn from_json(text: &str) -> AfgResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> AfgResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Validate every record and turn it into store requests
    fn plan(&self) -> AfgResult<(Vec<PlannedNode>, Vec<PlannedEdge>)> {
        let nodes = self
            .nodes
            .iter()
            .map(|record| -> AfgResult<PlannedNode> {
                let mut attributes = to_properties(record);
                let (label, id) = resolve_node(&mut attributes, None)?;
                Ok((label, id, attributes))
            })
            .collect::<AfgResult<Vec<_>>>()?;

        let edges = self
            .relations
            .iter()
            .map(|relation| -> AfgResult<PlannedEdge> {
                let color = relation
                    .label
                    .as_deref()
                    .filter(|l| !l.is_empty())
                    .ok_or(ConfigError::Missing("Relation label"))?;
                let orientation = Orientation::from_direction(relation.direction)
                    .ok_or(ConfigError::InvalidDirection(relation.direction))?;
                Ok((
                    relation.from.to_selector()?,
                    relation.to.to_selector()?,
                    Color::new(color),
                    orientation,
                ))
            })
            .collect::<AfgResult<Vec<_>>>()?;

        Ok((nodes, edges))
    }
}

impl BulkSelector {
    fn to_selector(&self) -> Result<NodeSelector, ConfigError> {
        let label = self
            .label
            .as_deref()
            .filter(|l| !l.is_empty())
            .ok_or(ConfigError::Missing("Selector label"))?;
        Ok(NodeSelector {
            label: Some(Label::new(label)),
            properties: to_properties(&self.properties),
        })
    }
}

fn to_properties(record: &Map<String, Value>) -> PropertyMap {
    record
        .iter()
        .map(|(key, value)| (key.clone(), PropertyValue::from_json(value)))
        .collect()
}

impl<B: GraphBackend> AlignmentFreeGraph<B> {
    /// Create all nodes, then all relations, then rebuild the index once.
    ///
    /// Nothing is written if any record is invalid. A failed node write, or
    /// a relation rejected by the acyclicity check, stops the import after
    /// the index is rebuilt.
    pub fn bulk_import(&mut self, document: &BulkDocument) -> AfgResult<BulkSummary> {
        let (nodes, edges) = document.plan()?;

        let mut summary = BulkSummary::default();
        summary.edges = self.write_then_rebuild(|graph| {
            for (label, id, attributes) in nodes {
                graph.backend.create_node(id, label, attributes)?;
                summary.nodes += 1;
            }
            graph.insert_edges(edges)
        })?;

        info!("Bulk import: {} nodes, {} edges", summary.nodes, summary.edges);
        Ok(summary)
    }

    pub fn bulk_import_file(&mut self, path: impl AsRef<Path>) -> AfgResult<BulkSummary> {
        let document = BulkDocument::from_file(path)?;
        self.bulk_import(&document)
    }
}
