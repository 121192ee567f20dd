//! Core graph store implementation
//!
//! This module implements the weighted graph data model:
//! - Nodes identified by immutable string identifiers
//! - Weighted edges, directed or undirected per graph
//! - Duplicate edges collapse into one edge with accumulated weight
//! - In-memory storage with hash-based adjacency indexes behind one RwLock
//! - Degree distributions computed on demand

pub mod degree;
pub mod edge;
pub mod node;
pub mod store;
pub mod types;

// Re-export main types
pub use degree::DegreeDistribution;
pub use edge::Edge;
pub use node::Node;
pub use store::{EdgeMap, Graph, GraphError, GraphResult, GraphStatistics, NodeMap};
pub use types::Identifier;
