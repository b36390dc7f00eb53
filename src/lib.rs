//! afgraph: alignment-free matching over colored nucleotide DAGs
//!
//! A pangenome is stored as a directed acyclic graph of one-base nodes.
//! Edges carry a color naming the haplotype they belong to. The crate keeps
//! a colored k-mer index over that graph and matches query sequences
//! against it without alignment.
//!
//! # Architecture
//!
//! - `graph`: node, edge and selector model plus the in-memory `GraphStore`
//! - `query`: typed pattern queries (node enumeration, monochromatic walks, cycle test)
//! - `backend`: the `GraphBackend` contract every store implements
//! - `index`: the unique k-mer → (start node, colors) index and its exports
//! - `matcher`: index-based and traversal-based sequence matching
//! - `mutator`: acyclicity-guarded edits, JSON bulk import and GFA import
//! - `engine`: `AlignmentFreeGraph`, which owns a backend and its index
//!
//! ## Example Usage
//!
//! ```rust
//! use afgraph::{AlignmentFreeGraph, ColorConsistency, GfaDocument};
//!
//! let gfa = "S\t1\tACG\nS\t2\tTTA\nP\th1\t1+\t*\nP\th2\t2+\t*\n";
//! let mut graph = AlignmentFreeGraph::in_memory().unwrap();
//! graph.import_gfa(&GfaDocument::parse_str(gfa).unwrap(), false).unwrap();
//!
//! // Two windows from different haplotypes: disjoint colors
//! let path = graph.match_via_index("acg tta", None).unwrap();
//! assert_eq!(path.len(), 2);
//!
//! graph.set_color_consistency(ColorConsistency::Shared);
//! assert!(graph.match_via_index("ACGTTA", None).unwrap().is_empty());
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod backend;
pub mod config;
pub mod engine;
pub mod error;
pub mod graph;
pub mod index;
pub mod matcher;
pub mod mutator;
pub mod query;

// Re-export main types for convenience
pub use graph::{
    Color, Edge, EdgeId, GraphError, GraphResult, GraphStore, Label, Node, NodeId, NodeSelector,
    Orientation, PropertyMap, PropertyValue,
};

pub use query::{PatternQuery, QueryExecutor, Record, WalkPattern};

pub use backend::{open_memory, GraphBackend};

pub use index::{KmerEntry, KmerIndex, KmerRow};

pub use matcher::{match_via_index, match_via_traversal, MatchPath};

pub use mutator::{BulkDocument, BulkSummary, GfaDocument, GfaError, GfaImportSummary, Guarded};

pub use config::{ColorConsistency, ConfigError, ConnectionConfig, ConnectionSettings, GraphConfig, DEFAULT_K};

pub use engine::AlignmentFreeGraph;

pub use error::{AfgError, AfgResult};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}
