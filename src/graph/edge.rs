//! Edge implementation
//!
//! An edge joins a tail node to a head node and carries one scalar weight.
//! Its directionality mirrors the owning graph at creation time and never
//! changes afterwards. An undirected connection is stored by the graph as two
//! `Edge` values (tail->head and head->tail) whose weights the graph keeps
//! equal.

use super::node::Node;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// A weighted edge between two nodes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge {
    /// Whether this edge belongs to a directed graph
    is_directed: bool,

    /// Node the edge goes FROM
    tail: Arc<Node>,

    /// Node the edge goes TO
    head: Arc<Node>,

    /// Accumulated weight
    weight: f64,
}

impl Edge {
    fn new(is_directed: bool, tail: Arc<Node>, head: Arc<Node>, weight: f64) -> Self {
        Edge {
            is_directed,
            tail,
            head,
            weight,
        }
    }

    /// Create a directed edge
    pub fn directed(tail: Arc<Node>, head: Arc<Node>, weight: f64) -> Self {
        Self::new(true, tail, head, weight)
    }

    /// Create an undirected edge
    pub fn undirected(tail: Arc<Node>, head: Arc<Node>, weight: f64) -> Self {
        Self::new(false, tail, head, weight)
    }

    pub fn is_directed(&self) -> bool {
        self.is_directed
    }

    pub fn tail(&self) -> &Arc<Node> {
        &self.tail
    }

    pub fn head(&self) -> &Arc<Node> {
        &self.head
    }

    pub fn weight(&self) -> f64 {
        self.weight
    }

    /// Add `delta` to the stored weight in place
    pub fn add_weight(&mut self, delta: f64) {
        self.weight += delta;
    }

    /// Check if this edge connects two specific nodes (in either direction)
    pub fn connects(&self, a: &str, b: &str) -> bool {
        let (tail, head) = (self.tail.id().as_str(), self.head.id().as_str());
        (tail == a && head == b) || (tail == b && head == a)
    }
}
