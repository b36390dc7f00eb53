//! Owned façade over a graph store and its k-mer index

use crate::backend::{open_memory, GraphBackend};
use crate::config::{ColorConsistency, GraphConfig};
use crate::error::{AfgError, AfgResult};
use crate::graph::{GraphError, GraphStore};
use crate::index::KmerIndex;
use crate::matcher::{self, MatchPath};
use crate::mutator::guard::is_acyclic;
use tracing::info;

/// A nucleotide DAG together with the k-mer index derived from it.
///
/// Every structural mutation goes through this type so the index can be
/// replaced before the next match observes the graph.
pub struct AlignmentFreeGraph<B: GraphBackend> {
    pub(crate) backend: B,
    pub(crate) index: KmerIndex,
    pub(crate) color_consistency: ColorConsistency,
}

impl AlignmentFreeGraph<GraphStore> {
    /// Validate `config`, open the store it names and build the index
    pub fn connect(config: &GraphConfig) -> AfgResult<Self> {
        if config.k < 1 {
            return Err(AfgError::InvalidK(config.k));
        }
        let connection = config.connection.clone().resolve()?;
        let store = open_memory(&connection)?;
        info!("Connected to {} (db '{}')", connection.uri, connection.db_name);
        Self::with_backend(store, config)
    }

    /// Empty in-memory graph with default settings
    pub fn in_memory() -> AfgResult<Self> {
        Self::connect(&GraphConfig::default())
    }
}

impl<B: GraphBackend> AlignmentFreeGraph<B> {
    /// Wrap an already opened backend.
    ///
    /// Fails if the backend is unreachable or already contains a cycle.
    pub fn with_backend(backend: B, config: &GraphConfig) -> AfgResult<Self> {
        if config.k < 1 {
            return Err(AfgError::InvalidK(config.k));
        }
        if !backend.check_connectivity() {
            return Err(GraphError::ConnectionFailed("store is not reachable".to_string()).into());
        }
        if !is_acyclic(&backend)? {
            return Err(AfgError::CycleDetected);
        }
        let index = KmerIndex::build(&backend, config.k)?;
        Ok(Self {
            backend,
            index,
            color_consistency: config.color_consistency,
        })
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn into_backend(self) -> B {
        self.backend
    }

    pub fn index(&self) -> &KmerIndex {
        &self.index
    }

    pub fn k(&self) -> usize {
        self.index.k()
    }

    pub fn color_consistency(&self) -> ColorConsistency {
        self.color_consistency
    }

    pub fn set_color_consistency(&mut self, consistency: ColorConsistency) {
        self.color_consistency = consistency;
    }

    /// Rebuild the index for the current k
    pub fn rebuild_index(&mut self) -> AfgResult<&KmerIndex> {
        self.set_k(self.k())
    }

    /// Switch to a new k. The previous index stays in place if the build fails.
    pub fn set_k(&mut self, k: usize) -> AfgResult<&KmerIndex> {
        self.index = KmerIndex::build(&self.backend, k)?;
        Ok(&self.index)
    }

    pub fn is_acyclic(&self) -> AfgResult<bool> {
        is_acyclic(&self.backend)
    }

    /// Index-based match. An explicit `k` different from the current one
    /// rebuilds the index first.
    pub fn match_via_index(&mut self, sequence: &str, k: Option<usize>) -> AfgResult<MatchPath> {
        if let Some(k) = k {
            if k != self.k() {
                self.set_k(k)?;
            }
        }
        Ok(matcher::match_via_index(&self.index, sequence, self.color_consistency))
    }

    /// Traversal-based match against live graph state.
    ///
    /// An explicit `k` only sets the window length for this call; the index
    /// is left alone.
    pub fn match_via_traversal(&self, sequence: &str, k: Option<usize>) -> AfgResult<MatchPath> {
        matcher::match_via_traversal(&self.backend, sequence, k.unwrap_or_else(|| self.k()))
    }
}
