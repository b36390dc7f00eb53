//! Crate-level error type

use crate::config::ConfigError;
use crate::graph::{EdgeId, GraphError};
use crate::mutator::gfa::GfaError;
use thiserror::Error;

/// Errors surfaced by index, matcher and mutator operations
#[derive(Error, Debug)]
pub enum AfgError {
    /// Store boundary failure, including lost connectivity
    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("k must be at least 1, got {0}")]
    InvalidK(usize),

    #[error("Invalid bulk record: {0}")]
    InvalidRecord(String),

    #[error("GFA parse error: {0}")]
    Gfa(#[from] GfaError),

    /// Graph was already cyclic when opened
    #[error("Graph must be acyclic")]
    CycleDetected,

    /// An insertion would have closed a cycle; the listed edges were removed again
    #[error("Edge insertion would create a cycle; removed {} edge(s)", .0.len())]
    CycleRejected(Vec<EdgeId>),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type AfgResult<T> = Result<T, AfgError>;
