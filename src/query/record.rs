//! Result records returned by pattern queries

use crate::graph::{Color, NodeId};
use serde::{Deserialize, Serialize};

/// One row of a pattern query result
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Record {
    /// A node and its base symbol (if it has one)
    Node { id: NodeId, symbol: Option<char> },
    /// A matched walk: start node, spelled bases, shared color.
    /// Single-node walks report each incident color in its own record,
    /// or `None` for a node without edges.
    Walk {
        start: NodeId,
        kmer: String,
        color: Option<Color>,
    },
    /// Answer to a cycle-existence query
    Cyclic(bool),
}

impl Record {
    pub fn as_walk(&self) -> Option<(NodeId, &str, Option<&Color>)> {
        match self {
            Record::Walk { start, kmer, color } => Some((*start, kmer.as_str(), color.as_ref())),
            _ => None,
        }
    }

    pub fn as_node(&self) -> Option<(NodeId, Option<char>)> {
        match self {
            Record::Node { id, symbol } => Some((*id, *symbol)),
            _ => None,
        }
    }

    pub fn as_cyclic(&self) -> Option<bool> {
        match self {
            Record::Cyclic(cyclic) => Some(*cyclic),
            _ => None,
        }
    }
}
