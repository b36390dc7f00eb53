//! Alignment-free sequence matching
//!
//! A query is uppercased, stripped of whitespace and cut into
//! non-overlapping windows of k bases. Each window is resolved either by
//! exact lookup in a [`KmerIndex`] or by a direct walk query against the
//! store.

pub mod path;
pub mod window;

pub use path::MatchPath;
pub use window::{normalize, position_key, windows};

use crate::backend::GraphBackend;
use crate::config::ColorConsistency;
use crate::error::{AfgError, AfgResult};
use crate::graph::Color;
use crate::index::KmerIndex;
use crate::query::{PatternQuery, WalkPattern};
use std::collections::BTreeSet;
use tracing::debug;

/// Match `sequence` against the index. All-or-nothing: a single window
/// missing from the index, or color sets that fail `consistency`, gives an
/// empty path.
pub fn match_via_index(index: &KmerIndex, sequence: &str, consistency: ColorConsistency) -> MatchPath {
    let k = index.k();
    let sequence = normalize(sequence);
    let mut path = MatchPath::new();
    let mut shared: Option<BTreeSet<Color>> = None;

    for (i, window) in windows(&sequence, k).iter().enumerate() {
        let Some(entry) = index.get(window) else {
            debug!("Window {} ({}) not in index; no match", i, window);
            return MatchPath::new();
        };
        path.record(position_key(i, k), entry.start);
        shared = Some(match shared {
            None => entry.colors.clone(),
            Some(acc) => acc.intersection(&entry.colors).cloned().collect(),
        });
    }

    let Some(shared) = shared else {
        return path;
    };
    let consistent = match consistency {
        ColorConsistency::Disjoint => shared.is_empty(),
        ColorConsistency::Shared => !shared.is_empty(),
    };
    if consistent {
        path
    } else {
        debug!(
            "Color check ({:?}) failed; shared colors: {:?}",
            consistency, shared
        );
        MatchPath::new()
    }
}

/// Match `sequence` by querying the store for each window directly.
///
/// Uniqueness is not enforced: the first walk the store reports for a
/// window is used, and windows with no walk are skipped rather than
/// failing the whole match.
pub fn match_via_traversal<B: GraphBackend + ?Sized>(backend: &B, sequence: &str, k: usize) -> AfgResult<MatchPath> {
    if k < 1 {
        return Err(AfgError::InvalidK(k));
    }
    let sequence = normalize(sequence);
    let mut path = MatchPath::new();

    for (i, window) in windows(&sequence, k).iter().enumerate() {
        let records = backend.run_query(&PatternQuery::Walk(WalkPattern::spelling(window)))?;
        match records.iter().find_map(|record| record.as_walk()) {
            Some((start, _, _)) => path.record(position_key(i, k), start),
            None => debug!("Window {} ({}) has no walk; skipped", i, window),
        }
    }
    Ok(path)
}
