//! Typed pattern queries understood by a graph backend
//!
//! Queries are plain data: callers describe the walk they want and the
//! backend interprets it. Nothing is ever assembled into query text.

use crate::graph::Color;
use std::fmt;

/// A structural query against the graph store
#[derive(Debug, Clone, PartialEq)]
pub enum PatternQuery {
    /// Every node with its id and base symbol
    AllNodes,
    /// Monochromatic walks of a fixed node count
    Walk(WalkPattern),
    /// Does any node reach itself?
    CycleExists,
}

/// Walk of `length` nodes joined by `length - 1` edges of one shared color.
///
/// `bases[i]`, when set, constrains the base symbol of the i-th node.
/// `color`, when set, fixes the shared edge color.
/// A length-1 walk is a single node; its records carry the node's
/// incident edge colors instead of a walk color.
#[derive(Debug, Clone, PartialEq)]
pub struct WalkPattern {
    pub length: usize,
    pub bases: Vec<Option<char>>,
    pub color: Option<Color>,
}

impl WalkPattern {
    /// Unconstrained walks of `length` nodes
    pub fn any(length: usize) -> Self {
        WalkPattern {
            length,
            bases: vec![None; length],
            color: None,
        }
    }

    /// Walks whose bases spell `sequence`, in order
    pub fn spelling(sequence: &str) -> Self {
        let bases: Vec<Option<char>> = sequence.chars().map(|c| Some(c.to_ascii_uppercase())).collect();
        WalkPattern {
            length: bases.len(),
            bases,
            color: None,
        }
    }

    pub fn with_color(mut self, color: impl Into<Color>) -> Self {
        self.color = Some(color.into());
        self
    }

    /// Does the symbol at `position` satisfy the pattern?
    pub fn accepts(&self, position: usize, symbol: char) -> bool {
        match self.bases.get(position) {
            Some(Some(expected)) => *expected == symbol,
            _ => true,
        }
    }
}

impl fmt::Display for WalkPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "walk[{}] ", self.length)?;
        for base in &self.bases {
            write!(f, "{}", base.unwrap_or('.'))?;
        }
        if let Some(color) = &self.color {
            write!(f, " :{}", color)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spelling_constrains_every_position() {
        let pattern = WalkPattern::spelling("acg");
        assert_eq!(pattern.length, 3);
        assert!(pattern.accepts(0, 'A'));
        assert!(!pattern.accepts(1, 'A'));
        assert!(pattern.accepts(2, 'G'));
        assert_eq!(pattern.to_string(), "walk[3] ACG");
    }

    #[test]
    fn test_any_accepts_everything() {
        let pattern = WalkPattern::any(2).with_color("h1");
        assert!(pattern.accepts(0, 'T'));
        assert!(pattern.accepts(5, 'T'));
        assert_eq!(pattern.to_string(), "walk[2] .. :h1");
    }
}
