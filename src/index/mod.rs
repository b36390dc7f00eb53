//! Colored k-mer index
//!
//! Maps every k-mer that starts at exactly one node to that node and the
//! colors observed there. The index is a derived value: it is rebuilt from
//! the store after each structural change and replaced wholesale.

pub mod export;
pub mod kmer;

pub use export::KmerRow;
pub use kmer::{KmerEntry, KmerIndex};
