//! Node implementation for the nucleotide graph
//!
//! A node carries one base symbol in its `name` attribute, a category
//! label, and whatever extra attributes a bulk load supplied.

use super::property::{PropertyMap, PropertyValue};
use super::types::{Label, NodeId};
use serde::{Deserialize, Serialize};

/// Attribute holding the node's base symbol
pub const NAME_KEY: &str = "name";

/// Attribute holding the node's external id
pub const ID_KEY: &str = "id";

/// A node in the graph
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    /// Unique identifier for this node
    pub id: NodeId,

    /// Category tag
    pub label: Label,

    /// Attributes associated with this node
    pub properties: PropertyMap,
}

impl Node {
    /// Create a new node without attributes
    pub fn new(id: NodeId, label: impl Into<Label>) -> Self {
        Node {
            id,
            label: label.into(),
            properties: PropertyMap::new(),
        }
    }

    /// Create a new node with attributes
    pub fn new_with_properties(id: NodeId, label: impl Into<Label>, properties: PropertyMap) -> Self {
        Node {
            id,
            label: label.into(),
            properties,
        }
    }

    /// Create a base node: `name` holds the base symbol
    pub fn base(id: NodeId, label: impl Into<Label>, base: char) -> Self {
        let mut node = Node::new(id, label);
        node.set_property(NAME_KEY, base.to_ascii_uppercase());
        node
    }

    /// The base symbol, if the `name` attribute is a single character
    pub fn symbol(&self) -> Option<char> {
        self.get_property(NAME_KEY).and_then(PropertyValue::as_base)
    }

    /// Check if node has a specific label
    pub fn has_label(&self, label: &Label) -> bool {
        &self.label == label
    }

    /// Set a property value
    pub fn set_property(&mut self, key: impl Into<String>, value: impl Into<PropertyValue>) -> Option<PropertyValue> {
        self.properties.insert(key.into(), value.into())
    }

    /// Get a property value
    pub fn get_property(&self, key: &str) -> Option<&PropertyValue> {
        self.properties.get(key)
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Node {}

impl std::hash::Hash for Node {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_node() {
        let node = Node::base(NodeId::new(1), "Base", 'c');
        assert_eq!(node.id, NodeId::new(1));
        assert!(node.has_label(&Label::new("Base")));
        assert_eq!(node.symbol(), Some('C'));
    }

    #[test]
    fn test_node_without_symbol() {
        let mut node = Node::new(NodeId::new(2), "Sample");
        assert_eq!(node.symbol(), None);

        node.set_property(NAME_KEY, "ACGT");
        assert_eq!(node.symbol(), None);
    }

    #[test]
    fn test_node_properties() {
        let mut props = PropertyMap::new();
        props.insert("segment".to_string(), 4i64.into());
        let mut node = Node::new_with_properties(NodeId::new(3), "Base", props);

        node.set_property(NAME_KEY, "T");
        assert_eq!(node.properties.len(), 2);
        assert_eq!(node.get_property("segment").unwrap().as_integer(), Some(4));
    }

    #[test]
    fn test_node_equality() {
        let node1 = Node::base(NodeId::new(7), "Base", 'A');
        let node2 = Node::base(NodeId::new(7), "Base", 'G');
        let node3 = Node::base(NodeId::new(8), "Base", 'A');

        assert_eq!(node1, node2); // Same ID
        assert_ne!(node1, node3); // Different ID
    }
}
