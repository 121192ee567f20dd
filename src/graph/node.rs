//! Node implementation
//!
//! A node is nothing more than an immutable [`Identifier`]. The graph keeps
//! the authoritative instance behind an `Arc`, and every adjacency slot and
//! edge endpoint shares that same instance.

use super::types::Identifier;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A vertex of the graph
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Node {
    /// Identifier of this node, stable for its whole lifetime
    id: Identifier,
}

impl Node {
    /// Create a new node with the given identifier
    pub fn new(id: impl Into<Identifier>) -> Self {
        Node { id: id.into() }
    }

    /// Identifier of this node
    pub fn id(&self) -> &Identifier {
        &self.id
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({})", self.id)
    }
}
