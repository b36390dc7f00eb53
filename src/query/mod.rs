//! Typed structural queries
//!
//! A [`PatternQuery`] names what to find (all nodes, monochromatic walks
//! with per-position base constraints, or a cycle); the [`QueryExecutor`]
//! interprets it over the in-memory store and yields [`Record`]s.

pub mod ast;
pub mod executor;
pub mod record;

pub use ast::{PatternQuery, WalkPattern};
pub use executor::QueryExecutor;
pub use record::Record;
