//! Nebula Graph Store
//!
//! A concurrent, in-memory graph of identified nodes joined by weighted edges,
//! queryable by adjacency and summarised by degree distribution.
//!
//! # Architecture
//!
//! - [`graph`]: entity model (`Identifier`, `Node`, `Edge`), the `Graph`
//!   container with its node/heads/tails/edges indexes behind one `RwLock`,
//!   and `DegreeDistribution`
//! - [`render`]: Graphviz DOT output built from the public query surface
//! - [`generate`]: Barabási-Albert and Watts-Strogatz random graphs built from
//!   the public CRUD surface
//!
//! # Semantics
//!
//! - Adding an edge that already exists accumulates its weight.
//! - An undirected graph stores each connection as two edges whose weights
//!   are always equal.
//! - Self-loops are rejected.
//! - Removing a node removes every incident edge.
//! - Queries return copies; nothing handed out aliases the live tables.
//!
//! ## Example Usage
//!
//! ```rust
//! use nebula::graph::{Graph, Node};
//!
//! let graph = Graph::new_undirected();
//! for id in ["A", "B", "C"] {
//!     graph.add_node(Node::new(id));
//! }
//!
//! graph.add_edge("A", "B", 1.0).unwrap();
//! graph.add_edge("A", "C", 1.0).unwrap();
//! graph.add_edge("A", "C", 0.5).unwrap();
//!
//! assert_eq!(graph.get_edge("C", "A").unwrap().weight(), 1.5);
//! assert_eq!(graph.get_heads("A").unwrap().len(), 2);
//!
//! let mut dist = graph.get_indegree_distribution();
//! dist.sort();
//! assert_eq!(dist.get_degrees(), vec![1, 2]);
//! assert_eq!(dist.average_degree(), Some(4.0 / 3.0));
//! ```

#![warn(clippy::all)]

pub mod generate;
pub mod graph;
pub mod render;

// Re-export main types for convenience
pub use graph::{
    DegreeDistribution, Edge, EdgeMap, Graph, GraphError, GraphResult, GraphStatistics,
    Identifier, Node, NodeMap,
};

pub use render::{to_dot, write_dot, Dot, DotConfig};

pub use generate::{
    barabasi_albert, watts_strogatz, BarabasiAlbertConfig, GenerateError, GenerateResult,
    WattsStrogatzConfig,
};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        let ver = version();
        assert!(!ver.is_empty());
        assert_eq!(ver, "0.1.0");
    }
}
