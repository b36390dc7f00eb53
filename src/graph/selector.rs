//! Node selectors: the `from`/`to` predicates of an edge request

use super::node::{Node, ID_KEY};
use super::property::{PropertyMap, PropertyValue};
use super::types::{Label, NodeId};
use serde::{Deserialize, Serialize};

/// Label + attribute-equality predicate picking a set of nodes
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NodeSelector {
    /// Required label, if any
    #[serde(default)]
    pub label: Option<Label>,

    /// Attributes that must all be present and equal
    #[serde(default)]
    pub properties: PropertyMap,
}

impl NodeSelector {
    pub fn new(label: impl Into<Label>) -> Self {
        NodeSelector {
            label: Some(label.into()),
            properties: PropertyMap::new(),
        }
    }

    /// Select exactly the node with this id
    pub fn by_id(id: NodeId) -> Self {
        NodeSelector::default().with_property(ID_KEY, id.as_u64())
    }

    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<PropertyValue>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// The node id this selector pins, if it constrains `id`
    pub fn pinned_id(&self) -> Option<NodeId> {
        self.properties.get(ID_KEY).and_then(PropertyValue::as_id).map(NodeId::new)
    }

    pub fn matches(&self, node: &Node) -> bool {
        if let Some(label) = &self.label {
            if !node.has_label(label) {
                return false;
            }
        }
        self.properties.iter().all(|(key, expected)| {
            if key == ID_KEY {
                return expected.as_id() == Some(node.id.as_u64());
            }
            node.get_property(key).is_some_and(|actual| actual.matches(expected))
        })
    }
}
