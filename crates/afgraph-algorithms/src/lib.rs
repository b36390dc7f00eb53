pub mod common;
pub mod topology;

pub use common::{GraphView, NodeId};
pub use topology::{has_cycle, topological_order};
