//! Graph mutations
//!
//! Node and edge creation, wholesale deletion and the two importers. Edge
//! insertion is guarded by the acyclicity check; every mutation that
//! changes topology ends with an index rebuild unless the caller asks to
//! defer it.

pub mod bulk;
pub mod gfa;
pub mod guard;

pub use bulk::{BulkDocument, BulkRelation, BulkSelector, BulkSummary};
pub use gfa::{GfaDocument, GfaError, GfaImportSummary, GfaPath, Segment, Strand};
pub use guard::{guarded, is_acyclic, Guarded};

use crate::backend::GraphBackend;
use crate::config::ConfigError;
use crate::engine::AlignmentFreeGraph;
use crate::error::{AfgError, AfgResult};
use crate::graph::{Color, EdgeId, Label, NodeId, NodeSelector, Orientation, PropertyMap, ID_KEY, MAX_NODE_ID};
use tracing::{info, warn};

/// Attribute consulted when no explicit label is given
pub const LABEL_KEY: &str = "label";

/// Work out the label and explicit id of a node request.
/// Both keys are removed from `attributes`.
pub(crate) fn resolve_node(attributes: &mut PropertyMap, label: Option<Label>) -> AfgResult<(Label, Option<NodeId>)> {
    let from_attributes = attributes.remove(LABEL_KEY).map(|v| v.to_text());
    let label = label
        .or_else(|| from_attributes.map(Label::new))
        .filter(|l| !l.as_str().is_empty())
        .ok_or(ConfigError::Missing("Label"))?;

    let id = match attributes.remove(ID_KEY) {
        None => None,
        Some(value) => Some(
            value
                .as_id()
                .filter(|id| *id <= MAX_NODE_ID)
                .map(NodeId::new)
                .ok_or_else(|| {
                    AfgError::InvalidRecord(format!(
                        "node id must be a positive integer up to {}, got {}",
                        MAX_NODE_ID, value
                    ))
                })?,
        ),
    };
    Ok((label, id))
}

impl<B: GraphBackend> AlignmentFreeGraph<B> {
    /// Create a node and rebuild the index.
    ///
    /// The label comes from `label` or else the `label` attribute; an `id`
    /// attribute becomes the node id.
    pub fn add_node(&mut self, attributes: PropertyMap, label: Option<Label>) -> AfgResult<NodeId> {
        let id = self.insert_node(attributes, label)?;
        self.rebuild_index()?;
        Ok(id)
    }

    pub(crate) fn insert_node(&mut self, mut attributes: PropertyMap, label: Option<Label>) -> AfgResult<NodeId> {
        let (label, id) = resolve_node(&mut attributes, label)?;
        Ok(self.backend.create_node(id, label, attributes)?)
    }

    /// Create `color` edges between the selected nodes.
    ///
    /// If the new edges close a cycle they are deleted again and
    /// [`AfgError::CycleRejected`] is returned. With `update` the index is
    /// rebuilt after a successful insertion.
    pub fn add_edge(
        &mut self,
        from: &NodeSelector,
        to: &NodeSelector,
        color: impl Into<Color>,
        orientation: Orientation,
        update: bool,
    ) -> AfgResult<Vec<EdgeId>> {
        let color = color.into();
        let outcome = guarded(
            &mut self.backend,
            |backend| Ok(backend.create_edges(from, to, &color, orientation)?),
            |backend| is_acyclic(backend),
            |backend, ids| {
                for id in ids {
                    backend.delete_edge(*id)?;
                }
                Ok(())
            },
        )?;

        match outcome {
            Guarded::Applied(ids) => {
                if update {
                    self.rebuild_index()?;
                }
                Ok(ids)
            }
            Guarded::RolledBack(ids) => {
                warn!("Rejected {} '{}' edge(s): insertion would create a cycle", ids.len(), color);
                Err(AfgError::CycleRejected(ids))
            }
        }
    }

    /// Remove every node and edge, leaving an empty index
    pub fn delete_all(&mut self) -> AfgResult<()> {
        self.backend.delete_all()?;
        self.rebuild_index()?;
        info!("Deleted all nodes and edges");
        Ok(())
    }

    /// Run a batch of writes with deferred rebuilds, then rebuild once
    /// whether or not the batch succeeded
    pub(crate) fn write_then_rebuild<T>(&mut self, write: impl FnOnce(&mut Self) -> AfgResult<T>) -> AfgResult<T> {
        let result = write(self);
        self.rebuild_index()?;
        result
    }

    /// Insert edges without rebuilding, stopping at the first failure
    pub(crate) fn insert_edges<I>(&mut self, edges: I) -> AfgResult<usize>
    where
        I: IntoIterator<Item = (NodeSelector, NodeSelector, Color, Orientation)>,
    {
        let mut created = 0;
        for (from, to, color, orientation) in edges {
            created += self.add_edge(&from, &to, color, orientation, false)?.len();
        }
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{PropertyValue, NAME_KEY};

    fn base_attrs(base: &str) -> PropertyMap {
        let mut props = PropertyMap::new();
        props.insert(NAME_KEY.to_string(), base.into());
        props
    }

    #[test]
    fn test_add_node_label_resolution() {
        let mut graph = AlignmentFreeGraph::in_memory().unwrap();

        let explicit = graph.add_node(base_attrs("A"), Some(Label::new("Base"))).unwrap();
        let mut attrs = base_attrs("C");
        attrs.insert(LABEL_KEY.to_string(), "Base".into());
        let from_attr = graph.add_node(attrs, None).unwrap();
        assert_ne!(explicit, from_attr);

        let err = graph.add_node(base_attrs("G"), None).unwrap_err();
        assert_eq!(err.to_string(), "Configuration error: Label not specified");
        assert_eq!(graph.backend().node_count(), 2);
    }

    #[test]
    fn test_add_node_explicit_id() {
        let mut graph = AlignmentFreeGraph::in_memory().unwrap();
        let mut attrs = base_attrs("A");
        attrs.insert(ID_KEY.to_string(), PropertyValue::Integer(42));
        let id = graph.add_node(attrs, Some(Label::new("Base"))).unwrap();
        assert_eq!(id, NodeId::new(42));

        let mut bad = base_attrs("A");
        bad.insert(ID_KEY.to_string(), "forty-two".into());
        assert!(matches!(
            graph.add_node(bad, Some(Label::new("Base"))),
            Err(AfgError::InvalidRecord(_))
        ));

        let mut huge = base_attrs("A");
        huge.insert(ID_KEY.to_string(), u64::MAX.to_string().into());
        assert!(matches!(
            graph.add_node(huge, Some(Label::new("Base"))),
            Err(AfgError::InvalidRecord(_))
        ));
        assert_eq!(graph.backend().node_count(), 1);
    }

    #[test]
    fn test_add_edge_updates_index() {
        let mut graph = AlignmentFreeGraph::in_memory().unwrap();
        graph.set_k(2).unwrap();
        let a = graph.add_node(base_attrs("A"), Some(Label::new("Base"))).unwrap();
        let c = graph.add_node(base_attrs("C"), Some(Label::new("Base"))).unwrap();

        graph
            .add_edge(&NodeSelector::by_id(a), &NodeSelector::by_id(c), "h1", Orientation::Forward, false)
            .unwrap();
        assert!(graph.index().get("AC").is_none());

        graph.rebuild_index().unwrap();
        assert_eq!(graph.index().get("AC").map(|e| e.start), Some(a));
    }

    #[test]
    fn test_reverse_orientation() {
        let mut graph = AlignmentFreeGraph::in_memory().unwrap();
        graph.set_k(2).unwrap();
        let a = graph.add_node(base_attrs("A"), Some(Label::new("Base"))).unwrap();
        let c = graph.add_node(base_attrs("C"), Some(Label::new("Base"))).unwrap();

        graph
            .add_edge(&NodeSelector::by_id(a), &NodeSelector::by_id(c), "h1", Orientation::Reverse, true)
            .unwrap();
        assert_eq!(graph.index().get("CA").map(|e| e.start), Some(c));
    }

    #[test]
    fn test_cycle_is_compensated() {
        let mut graph = AlignmentFreeGraph::in_memory().unwrap();
        let a = graph.add_node(base_attrs("A"), Some(Label::new("Base"))).unwrap();
        let c = graph.add_node(base_attrs("C"), Some(Label::new("Base"))).unwrap();
        let (sa, sc) = (NodeSelector::by_id(a), NodeSelector::by_id(c));

        graph.add_edge(&sa, &sc, "h1", Orientation::Forward, true).unwrap();
        let err = graph.add_edge(&sc, &sa, "h2", Orientation::Forward, true).unwrap_err();
        assert!(matches!(err, AfgError::CycleRejected(ref ids) if ids.len() == 1));
        assert_eq!(graph.backend().edge_count(), 1);
        assert!(graph.is_acyclic().unwrap());
    }

    #[test]
    fn test_self_loop_is_accepted() {
        let mut graph = AlignmentFreeGraph::in_memory().unwrap();
        graph.set_k(2).unwrap();
        let c = graph.add_node(base_attrs("C"), Some(Label::new("Base"))).unwrap();
        let sc = NodeSelector::by_id(c);

        let created = graph.add_edge(&sc, &sc, "h1", Orientation::Forward, true).unwrap();
        assert_eq!(created.len(), 1);
        assert!(graph.is_acyclic().unwrap());
        assert_eq!(graph.index().get("CC").map(|e| e.start), Some(c));
    }

    #[test]
    fn test_delete_all() {
        let mut graph = AlignmentFreeGraph::in_memory().unwrap();
        graph.set_k(1).unwrap();
        graph.add_node(base_attrs("A"), Some(Label::new("Base"))).unwrap();
        assert_eq!(graph.index().len(), 1);

        graph.delete_all().unwrap();
        assert!(graph.index().is_empty());
        assert_eq!(graph.backend().node_count(), 0);
    }
}
