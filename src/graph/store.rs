//! In-memory graph storage implementation
//!
//! The [`Graph`] owns every node and edge and keeps three adjacency indexes in
//! step with each other:
//! - nodes: Identifier -> Node
//! - heads: tail Identifier -> {head Identifier -> Node} (outgoing adjacency)
//! - tails: head Identifier -> {tail Identifier -> Node} (incoming adjacency)
//! - edges: tail Identifier -> {head Identifier -> Edge}
//!
//! `heads[a][b]`, `tails[b][a]` and `edges[a][b]` always exist together.
//! Nested maps are pruned as soon as they become empty.
//!
//! All tables sit behind one graph-wide `RwLock`: queries take it shared,
//! mutations take it exclusively, so every single call is atomic. Nothing is
//! atomic across calls.

use super::degree::DegreeDistribution;
use super::edge::Edge;
use super::node::Node;
use super::types::Identifier;
use serde::Serialize;
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use thiserror::Error;
use tracing::{debug, trace};

/// Errors that can occur during graph operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError {
    #[error("Node {0} does not exist in the graph")]
    NodeNotExist(Identifier),

    #[error("Edge {tail} -> {head} does not exist in the graph")]
    EdgeNotExist { tail: Identifier, head: Identifier },

    #[error("Edge from node {0} to itself is looped")]
    EdgeLooped(Identifier),
}

pub type GraphResult<T> = Result<T, GraphError>;

/// Nodes keyed by identifier
pub type NodeMap = HashMap<Identifier, Arc<Node>>;

/// Edges keyed by tail, then head
pub type EdgeMap = HashMap<Identifier, HashMap<Identifier, Edge>>;

type Adjacency = HashMap<Identifier, NodeMap>;

/// Graph-wide counters
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphStatistics {
    pub is_directed: bool,
    pub node_count: usize,
    /// Distinct connections; an undirected pair counts once
    pub edge_count: usize,
    /// Sum of weights over distinct connections
    pub total_weight: f64,
}

#[derive(Debug, Default)]
struct Tables {
    nodes: NodeMap,
    heads: Adjacency,
    tails: Adjacency,
    edges: EdgeMap,
}

impl Tables {
    fn node(&self, id: &str) -> GraphResult<&Arc<Node>> {
        self.nodes
            .get(id)
            .ok_or_else(|| GraphError::NodeNotExist(id.into()))
    }

    fn edge(&self, tail: &str, head: &str) -> Option<&Edge> {
        self.edges.get(tail).and_then(|heads| heads.get(head))
    }

    /// Insert tail->head or accumulate its weight, then record the relation
    fn link(&mut self, is_directed: bool, tail: &Arc<Node>, head: &Arc<Node>, weight: f64) {
        let out = self.edges.entry(tail.id().clone()).or_default();
        match out.entry(head.id().clone()) {
            Entry::Occupied(mut slot) => {
                let edge = slot.get_mut();
                edge.add_weight(weight);
                trace!(
                    "Accumulated weight on {} -> {}: now {}",
                    tail.id(),
                    head.id(),
                    edge.weight()
                );
            }
            Entry::Vacant(slot) => {
                let edge = if is_directed {
                    Edge::directed(Arc::clone(tail), Arc::clone(head), weight)
                } else {
                    Edge::undirected(Arc::clone(tail), Arc::clone(head), weight)
                };
                slot.insert(edge);
            }
        }

        self.heads
            .entry(tail.id().clone())
            .or_default()
            .entry(head.id().clone())
            .or_insert_with(|| Arc::clone(head));
        self.tails
            .entry(head.id().clone())
            .or_default()
            .entry(tail.id().clone())
            .or_insert_with(|| Arc::clone(tail));
    }

    /// Remove tail->head from all three tables; false if it was absent
    fn unlink(&mut self, tail: &str, head: &str) -> bool {
        let removed = prune(&mut self.edges, tail, head).is_some();
        prune(&mut self.heads, tail, head);
        prune(&mut self.tails, head, tail);
        removed
    }

    fn degree_distribution(&self, adjacency: &Adjacency) -> DegreeDistribution {
        self.nodes
            .keys()
            .map(|id| adjacency.get(id).map_or(0, HashMap::len))
            .collect()
    }

    fn edge_instances(&self) -> usize {
        self.edges.values().map(HashMap::len).sum()
    }
}

/// Remove `table[outer][inner]`, dropping `table[outer]` once it is empty
fn prune<V>(
    table: &mut HashMap<Identifier, HashMap<Identifier, V>>,
    outer: &str,
    inner: &str,
) -> Option<V> {
    let nested = table.get_mut(outer)?;
    let removed = nested.remove(inner);
    if nested.is_empty() {
        table.remove(outer);
    }
    removed
}

/// Drop `id` from every nested map, then drop nested maps left empty
fn prune_everywhere<V>(table: &mut HashMap<Identifier, HashMap<Identifier, V>>, id: &str) {
    table.remove(id);
    table.retain(|_, nested| {
        nested.remove(id);
        !nested.is_empty()
    });
}

/// Concurrent in-memory weighted graph
///
/// Every query returns a copy of the requested table taken under the read
/// lock. Nodes inside those copies are the graph's own immutable `Arc<Node>`
/// instances; edges are cloned values, i.e. weight snapshots.
#[derive(Debug)]
pub struct Graph {
    is_directed: bool,
    tables: RwLock<Tables>,
}

impl Graph {
    fn new(is_directed: bool) -> Self {
        Graph {
            is_directed,
            tables: RwLock::new(Tables::default()),
        }
    }

    /// Create an empty directed graph
    pub fn new_directed() -> Self {
        Self::new(true)
    }

    /// Create an empty undirected graph
    pub fn new_undirected() -> Self {
        Self::new(false)
    }

    pub fn is_directed(&self) -> bool {
        self.is_directed
    }

    // Validation always precedes mutation, so a poisoned lock still guards
    // consistent tables.
    fn read(&self) -> RwLockReadGuard<'_, Tables> {
        self.tables.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Tables> {
        self.tables.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Insert `node` unless a node with the same identifier exists.
    ///
    /// Returns `true` if the node was inserted. An existing node is never
    /// overwritten.
    pub fn add_node(&self, node: Node) -> bool {
        let mut tables = self.write();
        if tables.nodes.contains_key(node.id().as_str()) {
            return false;
        }
        debug!("Added node {}", node.id());
        tables.nodes.insert(node.id().clone(), Arc::new(node));
        true
    }

    /// Get a node by identifier
    pub fn get_node(&self, id: impl AsRef<str>) -> GraphResult<Arc<Node>> {
        self.read().node(id.as_ref()).cloned()
    }

    pub fn has_node(&self, id: impl AsRef<str>) -> bool {
        self.read().nodes.contains_key(id.as_ref())
    }

    /// All nodes, keyed by identifier
    pub fn get_nodes(&self) -> NodeMap {
        self.read().nodes.clone()
    }

    /// Remove a node together with every incident edge.
    ///
    /// Returns `false` (and changes nothing) if the node does not exist.
    pub fn remove_node(&self, id: impl AsRef<str>) -> bool {
        let id = id.as_ref();
        let mut tables = self.write();
        if tables.nodes.remove(id).is_none() {
            return false;
        }

        prune_everywhere(&mut tables.heads, id);
        prune_everywhere(&mut tables.tails, id);
        prune_everywhere(&mut tables.edges, id);

        debug!("Removed node {}", id);
        true
    }

    /// Nodes reachable from `tail` over one outgoing edge
    pub fn get_heads(&self, tail: impl AsRef<str>) -> GraphResult<NodeMap> {
        let tail = tail.as_ref();
        let tables = self.read();
        tables.node(tail)?;
        Ok(tables.heads.get(tail).cloned().unwrap_or_default())
    }

    /// Nodes that reach `head` over one incoming edge
    pub fn get_tails(&self, head: impl AsRef<str>) -> GraphResult<NodeMap> {
        let head = head.as_ref();
        let tables = self.read();
        tables.node(head)?;
        Ok(tables.tails.get(head).cloned().unwrap_or_default())
    }

    /// Get the edge from `tail` to `head`; both nodes must exist
    pub fn get_edge(&self, tail: impl AsRef<str>, head: impl AsRef<str>) -> GraphResult<Edge> {
        let (tail, head) = (tail.as_ref(), head.as_ref());
        let tables = self.read();
        tables.node(tail)?;
        tables.node(head)?;
        tables
            .edge(tail, head)
            .cloned()
            .ok_or_else(|| GraphError::EdgeNotExist {
                tail: tail.into(),
                head: head.into(),
            })
    }

    pub fn has_edge(&self, tail: impl AsRef<str>, head: impl AsRef<str>) -> bool {
        self.read().edge(tail.as_ref(), head.as_ref()).is_some()
    }

    /// Full edge table, tail-indexed then head-indexed.
    ///
    /// An undirected connection appears twice, once per direction.
    pub fn get_edges(&self) -> EdgeMap {
        self.read().edges.clone()
    }

    /// Add an edge from `tail` to `head`.
    ///
    /// Adding an edge that already exists adds `weight` to the stored weight
    /// instead of replacing it. On an undirected graph the reverse edge gets
    /// the same update in the same critical section.
    pub fn add_edge(
        &self,
        tail: impl AsRef<str>,
        head: impl AsRef<str>,
        weight: f64,
    ) -> GraphResult<()> {
        let (tail, head) = (tail.as_ref(), head.as_ref());
        if tail == head {
            return Err(GraphError::EdgeLooped(tail.into()));
        }

        let mut tables = self.write();
        let tail_node = Arc::clone(tables.node(tail)?);
        let head_node = Arc::clone(tables.node(head)?);

        tables.link(self.is_directed, &tail_node, &head_node, weight);
        if !self.is_directed {
            tables.link(false, &head_node, &tail_node, weight);
        }

        debug!("Added edge {} -> {} (weight {})", tail, head, weight);
        Ok(())
    }

    /// Remove the edge from `tail` to `head` (and its mirror if undirected).
    ///
    /// Returns `Ok(false)` if both nodes exist but the edge does not.
    pub fn remove_edge(&self, tail: impl AsRef<str>, head: impl AsRef<str>) -> GraphResult<bool> {
        let (tail, head) = (tail.as_ref(), head.as_ref());
        let mut tables = self.write();
        tables.node(tail)?;
        tables.node(head)?;

        let removed = tables.unlink(tail, head);
        if !self.is_directed {
            tables.unlink(head, tail);
        }

        if removed {
            debug!("Removed edge {} -> {}", tail, head);
        }
        Ok(removed)
    }

    /// In-degree of every node, isolated nodes counting as degree 0
    pub fn get_indegree_distribution(&self) -> DegreeDistribution {
        let tables = self.read();
        tables.degree_distribution(&tables.tails)
    }

    /// Out-degree of every node, isolated nodes counting as degree 0
    pub fn get_outdegree_distribution(&self) -> DegreeDistribution {
        let tables = self.read();
        tables.degree_distribution(&tables.heads)
    }

    pub fn node_count(&self) -> usize {
        self.read().nodes.len()
    }

    /// Number of distinct connections (an undirected pair counts once)
    pub fn edge_count(&self) -> usize {
        let instances = self.read().edge_instances();
        if self.is_directed {
            instances
        } else {
            instances / 2
        }
    }

    pub fn statistics(&self) -> GraphStatistics {
        let tables = self.read();
        let instances = tables.edge_instances();
        let weight: f64 = tables
            .edges
            .values()
            .flat_map(HashMap::values)
            .map(Edge::weight)
            .sum();
        let (edge_count, total_weight) = if self.is_directed {
            (instances, weight)
        } else {
            (instances / 2, weight / 2.0)
        };

        GraphStatistics {
            is_directed: self.is_directed,
            node_count: tables.nodes.len(),
            edge_count,
            total_weight,
        }
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new_directed()
    }
}
