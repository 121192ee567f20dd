//! Textual renderings of a graph
//!
//! Renderers only read the public query surface of [`crate::graph::Graph`].

pub mod dot;

pub use dot::{to_dot, write_dot, Dot, DotConfig};
