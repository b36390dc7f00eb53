//! K-mer index construction and lookup

use crate::backend::GraphBackend;
use crate::error::{AfgError, AfgResult};
use crate::graph::{Color, NodeId};
use crate::query::{PatternQuery, WalkPattern};
use rustc_hash::FxHashMap;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info};

/// Where a k-mer starts and which haplotypes spell it there
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KmerEntry {
    pub start: NodeId,
    pub colors: BTreeSet<Color>,
}

/// Immutable k-mer → (start node, colors) map for one value of k.
///
/// Only k-mers with a single starting node survive construction; a k-mer
/// spelled from two or more nodes is dropped for all of them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KmerIndex {
    k: usize,
    entries: BTreeMap<String, KmerEntry>,
    purged: usize,
}

impl KmerIndex {
    /// An index with no entries
    pub fn empty(k: usize) -> AfgResult<Self> {
        if k < 1 {
            return Err(AfgError::InvalidK(k));
        }
        Ok(KmerIndex {
            k,
            entries: BTreeMap::new(),
            purged: 0,
        })
    }

    /// Scan the whole graph and build a fresh index.
    ///
    /// For k = 1 each node contributes its own base with the colors of all
    /// incident edges. For k > 1 every monochromatic walk of k nodes
    /// contributes its spelled bases with the walk color.
    pub fn build<B: GraphBackend + ?Sized>(backend: &B, k: usize) -> AfgResult<Self> {
        let mut index = Self::empty(k)?;
        let records = backend.run_query(&PatternQuery::Walk(WalkPattern::any(k)))?;

        // kmer -> start node -> colors
        let mut occurrences: FxHashMap<String, BTreeMap<NodeId, BTreeSet<Color>>> = FxHashMap::default();
        for record in &records {
            let Some((start, kmer, color)) = record.as_walk() else { continue };
            let colors = occurrences
                .entry(kmer.to_string())
                .or_default()
                .entry(start)
                .or_default();
            if let Some(color) = color {
                colors.insert(color.clone());
            }
        }

        for (kmer, mut starts) in occurrences {
            if starts.len() > 1 {
                debug!("Dropping ambiguous k-mer {} ({} start nodes)", kmer, starts.len());
                index.purged += 1;
                continue;
            }
            if let Some((start, colors)) = starts.pop_first() {
                index.entries.insert(kmer, KmerEntry { start, colors });
            }
        }

        info!(
            "Built k-mer index: k={}, {} walks, {} unique k-mers, {} ambiguous dropped",
            k,
            records.len(),
            index.entries.len(),
            index.purged
        );
        Ok(index)
    }

    pub fn k(&self) -> usize {
        self.k
    }

    /// Number of unique k-mers
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of k-mers dropped because they start at more than one node
    pub fn purged(&self) -> usize {
        self.purged
    }

    /// Exact lookup
    pub fn get(&self, kmer: &str) -> Option<&KmerEntry> {
        self.entries.get(kmer)
    }

    pub fn contains(&self, kmer: &str) -> bool {
        self.entries.contains_key(kmer)
    }

    /// Entries in k-mer order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &KmerEntry)> {
        self.entries.iter().map(|(kmer, entry)| (kmer.as_str(), entry))
    }

    /// Every color referenced by some entry
    pub fn colors(&self) -> BTreeSet<&Color> {
        self.entries.values().flat_map(|entry| entry.colors.iter()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::{GraphStore, PropertyMap, NAME_KEY};

    fn add_base(store: &mut GraphStore, base: &str) -> NodeId {
        let mut props = PropertyMap::new();
        props.insert(NAME_KEY.to_string(), base.into());
        store.create_node_with_properties(None, "Base", props).unwrap()
    }

    fn chain(store: &mut GraphStore, bases: &str, color: &str) -> Vec<NodeId> {
        let ids: Vec<NodeId> = bases.chars().map(|b| add_base(store, &b.to_string())).collect();
        for pair in ids.windows(2) {
            store.create_edge(pair[0], pair[1], color).unwrap();
        }
        ids
    }

    fn colors(names: &[&str]) -> BTreeSet<Color> {
        names.iter().map(|c| Color::new(*c)).collect()
    }

    #[test]
    fn test_invalid_k_fails_before_querying() {
        let store = GraphStore::new();
        assert!(matches!(KmerIndex::build(&store, 0), Err(AfgError::InvalidK(0))));
    }

    #[test]
    fn test_linear_chain_k2() {
        let mut store = GraphStore::new();
        let ids = chain(&mut store, "ACGT", "h1");

        let index = KmerIndex::build(&store, 2).unwrap();
        assert_eq!(index.len(), 3);
        assert_eq!(index.get("AC"), Some(&KmerEntry { start: ids[0], colors: colors(&["h1"]) }));
        assert_eq!(index.get("CG").unwrap().start, ids[1]);
        assert_eq!(index.get("GT").unwrap().start, ids[2]);
        assert!(index.get("TA").is_none());
    }

    #[test]
    fn test_ambiguous_kmer_is_purged_everywhere() {
        let mut store = GraphStore::new();
        chain(&mut store, "ACGT", "h1");
        chain(&mut store, "AC", "h2");

        let index = KmerIndex::build(&store, 2).unwrap();
        assert!(!index.contains("AC"));
        assert!(index.contains("CG"));
        assert!(index.contains("GT"));
        assert_eq!(index.purged(), 1);
    }

    #[test]
    fn test_colors_accumulate_at_one_start() {
        // A -h1-> C and A -h2-> C
        let mut store = GraphStore::new();
        let a = add_base(&mut store, "A");
        let c = add_base(&mut store, "C");
        store.create_edge(a, c, "h1").unwrap();
        store.create_edge(a, c, "h2").unwrap();

        let index = KmerIndex::build(&store, 2).unwrap();
        assert_eq!(index.get("AC").unwrap().colors, colors(&["h1", "h2"]));
        assert_eq!(index.colors().len(), 2);
    }

    #[test]
    fn test_k1_uses_incident_colors() {
        let mut store = GraphStore::new();
        let a = add_base(&mut store, "A");
        let c = add_base(&mut store, "C");
        let g = add_base(&mut store, "G");
        store.create_edge(a, c, "h1").unwrap();
        store.create_edge(c, g, "h2").unwrap();
        add_base(&mut store, "T");

        let index = KmerIndex::build(&store, 1).unwrap();
        assert_eq!(index.len(), 4);
        assert_eq!(index.get("A").unwrap().colors, colors(&["h1"]));
        assert_eq!(index.get("C").unwrap().colors, colors(&["h1", "h2"]));
        assert_eq!(index.get("G").unwrap().start, g);
        // Isolated node: present, no colors
        assert!(index.get("T").unwrap().colors.is_empty());
    }

    #[test]
    fn test_k1_duplicate_bases_are_purged() {
        let mut store = GraphStore::new();
        add_base(&mut store, "A");
        add_base(&mut store, "A");
        add_base(&mut store, "C");

        let index = KmerIndex::build(&store, 1).unwrap();
        assert!(!index.contains("A"));
        assert!(index.contains("C"));
    }

    #[test]
    fn test_rebuild_is_idempotent() {
        let mut store = GraphStore::new();
        chain(&mut store, "ACGTTGCA", "h1");
        chain(&mut store, "GGTA", "h2");

        let first = KmerIndex::build(&store, 3).unwrap();
        let second = KmerIndex::build(&store, 3).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_graph() {
        let store = GraphStore::new();
        let index = KmerIndex::build(&store, 4).unwrap();
        assert!(index.is_empty());
        assert_eq!(index.k(), 4);
    }
}
