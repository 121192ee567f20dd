//! Watts-Strogatz small-world rewiring

use super::{choose_sorted, rng_from_seed, GenerateError, GenerateResult};
use crate::graph::{Graph, Identifier, Node};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Watts-Strogatz generator settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WattsStrogatzConfig {
    /// Number of nodes on the ring
    pub nodes: usize,
    /// Lattice degree k; every node links to k/2 neighbours on each side
    pub mean_degree: usize,
    /// Fraction p of lattice edges that get rewired
    pub rewire_probability: f64,
    /// RNG seed; `None` seeds from OS entropy
    pub seed: Option<u64>,
}

impl Default for WattsStrogatzConfig {
    fn default() -> Self {
        Self {
            nodes: 100,
            mean_degree: 4,
            rewire_probability: 0.1,
            seed: None,
        }
    }
}

impl WattsStrogatzConfig {
    pub fn validate(&self) -> GenerateResult<()> {
        if self.mean_degree == 0 || self.mean_degree % 2 != 0 {
            return Err(GenerateError::InvalidConfig(format!(
                "mean_degree must be a positive even number, got {}",
                self.mean_degree
            )));
        }
        if self.mean_degree >= self.nodes {
            return Err(GenerateError::InvalidConfig(format!(
                "mean_degree ({}) must be smaller than nodes ({})",
                self.mean_degree, self.nodes
            )));
        }
        if !(0.0..=1.0).contains(&self.rewire_probability) {
            return Err(GenerateError::InvalidConfig(format!(
                "rewire_probability must be within [0, 1], got {}",
                self.rewire_probability
            )));
        }
        Ok(())
    }

    /// Number of lattice edges that get rewired: floor(n * k/2 * p)
    pub fn rewired_edges(&self) -> usize {
        ((self.nodes * (self.mean_degree / 2)) as f64 * self.rewire_probability).floor() as usize
    }
}

/// Build an undirected small-world graph.
///
/// Builds a ring lattice, selects `floor(n * k/2 * p)` distinct lattice edges
/// uniformly, and moves the head of each selected edge to a random node that
/// is neither its tail nor already adjacent to it. The number of connections
/// stays `n * k/2`.
pub fn watts_strogatz(config: &WattsStrogatzConfig) -> GenerateResult<Graph> {
    config.validate()?;
    let mut rng = rng_from_seed(config.seed);
    let graph = Graph::new_undirected();

    let n = config.nodes;
    let ids: Vec<Identifier> = (0..n).map(Identifier::from).collect();
    for id in &ids {
        graph.add_node(Node::new(id.clone()));
    }
    for i in 0..n {
        for j in 1..=config.mean_degree / 2 {
            graph.add_edge(&ids[i], &ids[(i + j) % n], 1.0)?;
        }
    }

    let selected = select_edges(&graph, &ids, config.rewired_edges(), &mut rng)?;

    for (tail, old_head) in selected {
        let heads = graph.get_heads(&tail)?;
        let candidates: Vec<&Identifier> = ids
            .iter()
            .filter(|id| **id != tail && !heads.contains_key(id.as_str()))
            .collect();

        let Some(&new_head) = candidates.choose(&mut rng) else {
            warn!(
                "Node {} is adjacent to every other node, keeping {} -- {}",
                tail, tail, old_head
            );
            continue;
        };

        graph.remove_edge(&tail, &old_head)?;
        graph.add_edge(&tail, new_head, 1.0)?;
        debug!("Rewired {} -- {} to {} -- {}", tail, old_head, tail, new_head);
    }

    info!(
        "Generated Watts-Strogatz graph: {} nodes, {} edges",
        graph.node_count(),
        graph.edge_count()
    );
    Ok(graph)
}

/// Pick `count` distinct existing edges, never the same pair in either orientation
fn select_edges<R: Rng>(
    graph: &Graph,
    ids: &[Identifier],
    count: usize,
    rng: &mut R,
) -> GenerateResult<Vec<(Identifier, Identifier)>> {
    let mut seen: HashSet<(Identifier, Identifier)> = HashSet::with_capacity(count);
    let mut selected = Vec::with_capacity(count);

    while selected.len() < count {
        let Some(tail) = ids.choose(rng).cloned() else {
            break;
        };
        let Some(head) = choose_sorted(graph.get_heads(&tail)?.into_keys(), rng) else {
            continue;
        };

        let pair = (tail, head);
        let mirrored = (pair.1.clone(), pair.0.clone());
        if seen.contains(&pair) || seen.contains(&mirrored) {
            continue;
        }
        seen.insert(pair.clone());
        selected.push(pair);
    }

    Ok(selected)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seeded(nodes: usize, mean_degree: usize, rewire_probability: f64) -> WattsStrogatzConfig {
        WattsStrogatzConfig {
            nodes,
            mean_degree,
            rewire_probability,
            seed: Some(7),
        }
    }

    #[test]
    fn test_validate() {
        assert!(WattsStrogatzConfig::default().validate().is_ok());
        assert!(seeded(10, 3, 0.1).validate().is_err());
        assert!(seeded(10, 0, 0.1).validate().is_err());
        assert!(seeded(4, 4, 0.1).validate().is_err());
        assert!(seeded(10, 2, 1.5).validate().is_err());
        assert!(seeded(10, 2, f64::NAN).validate().is_err());
    }

    #[test]
    fn test_rewired_edges() {
        assert_eq!(WattsStrogatzConfig::default().rewired_edges(), 20);
        assert_eq!(seeded(10, 2, 0.0).rewired_edges(), 0);
        assert_eq!(seeded(10, 4, 1.0).rewired_edges(), 20);
    }

    #[test]
    fn test_ring_lattice_without_rewiring() {
        let graph = watts_strogatz(&seeded(10, 4, 0.0)).unwrap();
        assert_eq!(graph.node_count(), 10);
        assert_eq!(graph.edge_count(), 20);

        for i in 0..10usize {
            let id = Identifier::from(i);
            assert_eq!(graph.get_heads(&id).unwrap().len(), 4);
            assert!(graph.has_edge(&id, Identifier::from((i + 1) % 10)));
            assert!(graph.has_edge(&id, Identifier::from((i + 2) % 10)));
        }
    }

    #[test]
    fn test_rewiring_preserves_edge_count() {
        let graph = watts_strogatz(&seeded(30, 4, 0.5)).unwrap();
        assert_eq!(graph.edge_count(), 60);

        for (tail, heads) in graph.get_edges() {
            assert!(!heads.contains_key(tail.as_str()));
        }
    }

    #[test]
    fn test_select_edges_are_distinct_pairs() {
        let graph = watts_strogatz(&seeded(12, 2, 0.0)).unwrap();
        let ids: Vec<Identifier> = (0..12usize).map(Identifier::from).collect();
        let selected = select_edges(&graph, &ids, 12, &mut rng_from_seed(Some(1))).unwrap();

        assert_eq!(selected.len(), 12);
        let mut unordered: Vec<_> = selected
            .iter()
            .map(|(a, b)| if a < b { (a, b) } else { (b, a) })
            .collect();
        unordered.sort();
        unordered.dedup();
        assert_eq!(unordered.len(), 12);
        for (a, b) in &selected {
            assert!(graph.has_edge(a, b));
        }
    }
}
