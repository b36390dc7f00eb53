//! Pattern query interpreter over the in-memory store

use super::ast::{PatternQuery, WalkPattern};
use super::record::Record;
use crate::algo::{build_view, has_cycle};
use crate::graph::{Color, GraphStore, Node, NodeId};

/// Evaluates typed pattern queries against a [`GraphStore`]
pub struct QueryExecutor<'a> {
    store: &'a GraphStore,
}

impl<'a> QueryExecutor<'a> {
    pub fn new(store: &'a GraphStore) -> Self {
        Self { store }
    }

    pub fn execute(&self, query: &PatternQuery) -> Vec<Record> {
        match query {
            PatternQuery::AllNodes => self
                .store
                .all_nodes()
                .map(|node| Record::Node {
                    id: node.id,
                    symbol: node.symbol(),
                })
                .collect(),
            PatternQuery::Walk(pattern) => self.walks(pattern),
            PatternQuery::CycleExists => vec![Record::Cyclic(has_cycle(&build_view(self.store, None)))],
        }
    }

    /// Start nodes are visited in ascending id order, edges in creation order.
    fn walks(&self, pattern: &WalkPattern) -> Vec<Record> {
        let mut out = Vec::new();
        if pattern.length == 0 {
            return out;
        }

        for start in self.store.all_nodes() {
            let Some(symbol) = start.symbol() else { continue };
            if !pattern.accepts(0, symbol) {
                continue;
            }

            if pattern.length == 1 {
                self.single_node(start, symbol, pattern, &mut out);
                continue;
            }

            for edge in self.store.get_outgoing_edges(start.id) {
                if pattern.color.as_ref().is_some_and(|c| c != &edge.color) {
                    continue;
                }
                let mut kmer = String::with_capacity(pattern.length);
                kmer.push(symbol);
                self.extend(pattern, start.id, &edge.color, edge.target, 1, &mut kmer, &mut out);
            }
        }
        out
    }

    fn single_node(&self, node: &Node, symbol: char, pattern: &WalkPattern, out: &mut Vec<Record>) {
        let colors = self.store.incident_colors(node.id);
        let kmer = symbol.to_string();
        match &pattern.color {
            Some(color) => {
                if colors.contains(color) {
                    out.push(Record::Walk { start: node.id, kmer, color: Some(color.clone()) });
                }
            }
            None if colors.is_empty() => {
                out.push(Record::Walk { start: node.id, kmer, color: None });
            }
            None => out.extend(colors.into_iter().map(|color| Record::Walk {
                start: node.id,
                kmer: kmer.clone(),
                color: Some(color),
            })),
        }
    }

    /// Depth-first extension along edges of `color` only.
    #[allow(clippy::too_many_arguments)]
    fn extend(
        &self,
        pattern: &WalkPattern,
        start: NodeId,
        color: &Color,
        current: NodeId,
        depth: usize,
        kmer: &mut String,
        out: &mut Vec<Record>,
    ) {
        let Some(symbol) = self.store.get_node(current).and_then(Node::symbol) else {
            return;
        };
        if !pattern.accepts(depth, symbol) {
            return;
        }
        kmer.push(symbol);

        if depth + 1 == pattern.length {
            out.push(Record::Walk {
                start,
                kmer: kmer.clone(),
                color: Some(color.clone()),
            });
        } else {
            for edge in self.store.get_outgoing_edges(current) {
                if &edge.color == color {
                    self.extend(pattern, start, color, edge.target, depth + 1, kmer, out);
                }
            }
        }
        kmer.pop();
    }
}
