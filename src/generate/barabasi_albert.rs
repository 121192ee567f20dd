//! Barabási-Albert preferential attachment

use super::{rng_from_seed, GenerateError, GenerateResult};
use crate::graph::{Graph, Identifier, Node};
use rand::distributions::{Distribution, WeightedIndex};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use tracing::info;

/// Barabási-Albert generator settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BarabasiAlbertConfig {
    /// Total number of nodes in the generated graph
    pub nodes: usize,
    /// Size of the seed ring (m0)
    pub initial_nodes: usize,
    /// Edges attached from every new node (m)
    pub edges_per_node: usize,
    /// RNG seed; `None` seeds from OS entropy
    pub seed: Option<u64>,
}

impl Default for BarabasiAlbertConfig {
    fn default() -> Self {
        Self {
            nodes: 100,
            initial_nodes: 3,
            edges_per_node: 2,
            seed: None,
        }
    }
}

impl BarabasiAlbertConfig {
    pub fn validate(&self) -> GenerateResult<()> {
        if self.initial_nodes < 2 {
            return Err(GenerateError::InvalidConfig(format!(
                "initial_nodes must be at least 2, got {}",
                self.initial_nodes
            )));
        }
        if self.edges_per_node == 0 || self.edges_per_node > self.initial_nodes {
            return Err(GenerateError::InvalidConfig(format!(
                "edges_per_node must be in 1..={}, got {}",
                self.initial_nodes, self.edges_per_node
            )));
        }
        if self.nodes < self.initial_nodes {
            return Err(GenerateError::InvalidConfig(format!(
                "nodes ({}) must not be smaller than initial_nodes ({})",
                self.nodes, self.initial_nodes
            )));
        }
        Ok(())
    }
}

/// Grow an undirected scale-free graph.
///
/// Starts from a ring over `initial_nodes` nodes, then adds the remaining
/// nodes one by one, each linked to `edges_per_node` distinct existing nodes
/// picked with probability proportional to their degree.
pub fn barabasi_albert(config: &BarabasiAlbertConfig) -> GenerateResult<Graph> {
    config.validate()?;
    let mut rng = rng_from_seed(config.seed);
    let graph = Graph::new_undirected();

    let m0 = config.initial_nodes;
    for i in 0..m0 {
        graph.add_node(Node::new(i));
    }
    // Two seed nodes form a single edge rather than a doubled one
    let ring_edges = if m0 == 2 { 1 } else { m0 };
    for i in 0..ring_edges {
        graph.add_edge(Identifier::from(i), Identifier::from((i + 1) % m0), 1.0)?;
    }

    for i in m0..config.nodes {
        let targets = preferential_targets(&graph, config.edges_per_node, &mut rng)?;

        let node = Node::new(i);
        let id = node.id().clone();
        graph.add_node(node);
        for target in &targets {
            graph.add_edge(&id, target, 1.0)?;
        }
    }

    info!(
        "Generated Barabási-Albert graph: {} nodes, {} edges",
        graph.node_count(),
        graph.edge_count()
    );
    Ok(graph)
}

/// Pick `m` distinct nodes, each with probability proportional to its degree
fn preferential_targets<R: Rng>(
    graph: &Graph,
    m: usize,
    rng: &mut R,
) -> GenerateResult<BTreeSet<Identifier>> {
    // Nodes without edges are absent from the edge table and never picked
    let mut adjacency: Vec<(Identifier, usize)> = graph
        .get_edges()
        .into_iter()
        .map(|(id, heads)| (id, heads.len()))
        .collect();
    adjacency.sort();
    let (candidates, degrees): (Vec<Identifier>, Vec<usize>) = adjacency.into_iter().unzip();

    if candidates.len() < m {
        return Err(GenerateError::InvalidConfig(format!(
            "only {} connected nodes available, need {}",
            candidates.len(),
            m
        )));
    }

    let weights = WeightedIndex::new(&degrees)
        .map_err(|e| GenerateError::InvalidConfig(e.to_string()))?;
    let mut picked = BTreeSet::new();
    while picked.len() < m {
        picked.insert(candidates[weights.sample(rng)].clone());
    }
    Ok(picked)
}
