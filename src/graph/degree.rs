//! Degree distributions
//!
//! A [`DegreeDistribution`] is a histogram of degree -> number of nodes with
//! that degree. Keys keep the order in which they were first seen until
//! [`DegreeDistribution::sort`] is called. Distributions are snapshots built
//! per query and are never shared with the graph that produced them.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Histogram of node degrees
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DegreeDistribution {
    /// degree -> count, in first-seen (or sorted) key order
    counts: IndexMap<usize, usize>,
}

impl DegreeDistribution {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one node with degree `k`
    pub fn add(&mut self, k: usize) {
        *self.counts.entry(k).or_insert(0) += 1;
    }

    /// Number of nodes observed with degree `k` (0 if never observed)
    pub fn get_num(&self, k: usize) -> usize {
        self.counts.get(&k).copied().unwrap_or(0)
    }

    /// Observed degrees in their current order
    pub fn get_degrees(&self) -> Vec<usize> {
        self.counts.keys().copied().collect()
    }

    /// Reorder the observed degrees ascending
    pub fn sort(&mut self) {
        self.counts.sort_keys();
    }

    /// Iterate `(degree, count)` pairs in the current order
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.counts.iter().map(|(&k, &n)| (k, n))
    }

    /// Number of distinct degrees
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Total number of nodes recorded
    pub fn node_count(&self) -> usize {
        self.counts.values().sum()
    }

    pub fn max_degree(&self) -> Option<usize> {
        self.counts.keys().copied().max()
    }

    /// Mean degree over all recorded nodes, `None` for an empty distribution
    pub fn average_degree(&self) -> Option<f64> {
        let total = self.node_count();
        if total == 0 {
            return None;
        }
        let weighted: usize = self.counts.iter().map(|(&k, &n)| k * n).sum();
        Some(weighted as f64 / total as f64)
    }
}

impl FromIterator<usize> for DegreeDistribution {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut dist = DegreeDistribution::new();
        for k in iter {
            dist.add(k);
        }
        dist
    }
}
