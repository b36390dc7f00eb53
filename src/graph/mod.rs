//! Core graph data model
//!
//! This module implements the nucleotide graph:
//! - Nodes carrying one base symbol and a category label
//! - Directed edges carrying a color (haplotype/path id)
//! - Multiple differently-colored edges between the same nodes
//! - In-memory storage with ordered maps and hash-based indices

pub mod edge;
pub mod node;
pub mod property;
pub mod selector;
pub mod store;
pub mod types;

// Re-export main types
pub use edge::Edge;
pub use node::{Node, ID_KEY, NAME_KEY};
pub use property::{PropertyMap, PropertyValue};
pub use selector::NodeSelector;
pub use store::{GraphError, GraphResult, GraphStore};
pub use types::{Color, EdgeId, Label, NodeId, Orientation, MAX_NODE_ID};
