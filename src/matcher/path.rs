//! Matched node paths

use crate::graph::NodeId;
use indexmap::IndexMap;
use serde::Serialize;

/// Ordered position key → node id mapping produced by a match.
///
/// Empty means no match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MatchPath {
    positions: IndexMap<usize, NodeId>,
}

impl MatchPath {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `node` at `key` unless the key is already taken
    pub fn record(&mut self, key: usize, node: NodeId) {
        self.positions.entry(key).or_insert(node);
    }

    pub fn get(&self, key: usize) -> Option<NodeId> {
        self.positions.get(&key).copied()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// (position key, node) pairs in window order
    pub fn iter(&self) -> impl Iterator<Item = (usize, NodeId)> + '_ {
        self.positions.iter().map(|(key, node)| (*key, *node))
    }

    pub fn node_ids(&self) -> Vec<NodeId> {
        self.positions.values().copied().collect()
    }
}

impl FromIterator<(usize, NodeId)> for MatchPath {
    fn from_iter<I: IntoIterator<Item = (usize, NodeId)>>(iter: I) -> Self {
        let mut path = MatchPath::new();
        for (key, node) in iter {
            path.record(key, node);
        }
        path
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_key_wins() {
        let mut path = MatchPath::new();
        path.record(1, NodeId::new(10));
        path.record(1, NodeId::new(20));
        path.record(3, NodeId::new(30));
        assert_eq!(path.len(), 2);
        assert_eq!(path.get(1), Some(NodeId::new(10)));
        assert_eq!(path.node_ids(), vec![NodeId::new(10), NodeId::new(30)]);
    }

    #[test]
    fn test_serializes_as_map() {
        let path: MatchPath = [(1, NodeId::new(4)), (3, NodeId::new(9))].into_iter().collect();
        assert_eq!(serde_json::to_string(&path).unwrap(), r#"{"1":4,"3":9}"#);
    }
}
