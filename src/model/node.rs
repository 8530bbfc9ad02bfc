use std::collections::BTreeMap;
use std::fmt;

use crate::error::{IsingError, Result};

/// Identifier of one spin: an integer or a string label.
///
/// Ordering puts every integer before every string, then compares values,
/// which fixes the canonical index order of a model.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Node {
    Int(i64),
    Str(String),
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{i}"),
            Self::Str(s) => write!(f, "{s:?}"),
        }
    }
}

impl From<i64> for Node {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<i32> for Node {
    fn from(i: i32) -> Self {
        Self::Int(i as i64)
    }
}

impl From<usize> for Node {
    fn from(i: usize) -> Self {
        Self::Int(i as i64)
    }
}

impl From<&str> for Node {
    fn from(s: &str) -> Self {
        Self::Str(s.to_string())
    }
}

impl From<String> for Node {
    fn from(s: String) -> Self {
        Self::Str(s)
    }
}

/// Unordered pair of distinct nodes, stored smaller node first.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge(Node, Node);

impl Edge {
    /// Build an edge from an already-canonical pair.
    ///
    /// Rejects self-loops and pairs whose first node is not the smaller one;
    /// the order is never silently swapped.
    pub fn new(first: Node, second: Node) -> Result<Self> {
        match first.cmp(&second) {
            std::cmp::Ordering::Less => Ok(Self(first, second)),
            std::cmp::Ordering::Equal => Err(IsingError::SelfLoop(first)),
            std::cmp::Ordering::Greater => Err(IsingError::NonCanonicalEdge { first, second }),
        }
    }

    pub fn first(&self) -> &Node {
        &self.0
    }

    pub fn second(&self) -> &Node {
        &self.1
    }
}

/// External field per node. Unlisted nodes get 0.
pub type LinearBiases = BTreeMap<Node, f64>;

/// Coupling per unordered pair, keyed `(smaller, larger)`. Unlisted pairs get 0.
pub type QuadraticBiases = BTreeMap<(Node, Node), f64>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ints_sort_before_strings() {
        let mut nodes = vec![Node::from("a"), Node::from(3), Node::from(-1), Node::from("B")];
        nodes.sort();
        assert_eq!(
            nodes,
            vec![Node::from(-1), Node::from(3), Node::from("B"), Node::from("a")]
        );
    }

    #[test]
    fn test_edge_requires_canonical_order() {
        assert!(Edge::new(Node::from(1), Node::from(2)).is_ok());
        assert_eq!(
            Edge::new(Node::from(2), Node::from(1)),
            Err(IsingError::NonCanonicalEdge {
                first: Node::from(2),
                second: Node::from(1),
            })
        );
        assert_eq!(
            Edge::new(Node::from("x"), Node::from("x")),
            Err(IsingError::SelfLoop(Node::from("x")))
        );
        assert!(Edge::new(Node::from(9), Node::from("a")).is_ok());
    }
}
