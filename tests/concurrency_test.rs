//! Concurrent access to a shared graph
//!
//! Each call is atomic under the graph-wide lock; these tests hammer one
//! `Arc<Graph>` from several threads and check the tables stay consistent.

use nebula::graph::{Graph, Identifier, Node};
use std::sync::Arc;
use std::thread;

const THREADS: usize = 8;
const ROUNDS: usize = 200;

#[test]
fn test_concurrent_weight_accumulation() {
    let graph = Arc::new(Graph::new_undirected());
    graph.add_node(Node::new("a"));
    graph.add_node(Node::new("b"));

    let handles: Vec<_> = (0..THREADS)
        .map(|i| {
            let graph = Arc::clone(&graph);
            thread::spawn(move || {
                for _ in 0..ROUNDS {
                    // Alternate sides; both hit the same connection
                    if i % 2 == 0 {
                        graph.add_edge("a", "b", 1.0).unwrap();
                    } else {
                        graph.add_edge("b", "a", 1.0).unwrap();
                    }
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    let expected = (THREADS * ROUNDS) as f64;
    assert_eq!(graph.get_edge("a", "b").unwrap().weight(), expected);
    assert_eq!(graph.get_edge("b", "a").unwrap().weight(), expected);
}

#[test]
fn test_readers_see_symmetric_snapshots() {
    let graph = Arc::new(Graph::new_undirected());
    for i in 0..10usize {
        graph.add_node(Node::new(i));
    }

    thread::scope(|scope| {
        for w in 0..THREADS / 2 {
            let graph = &graph;
            scope.spawn(move || {
                for round in 0..ROUNDS {
                    let tail = Identifier::from((w + round) % 10);
                    let head = Identifier::from((w + round + 1 + w) % 10);
                    if tail == head {
                        continue;
                    }
                    if round % 3 == 0 {
                        graph.remove_edge(&tail, &head).unwrap();
                    } else {
                        graph.add_edge(&tail, &head, 0.5).unwrap();
                    }
                }
            });
        }
        for _ in 0..THREADS / 2 {
            let graph = &graph;
            scope.spawn(move || {
                for _ in 0..ROUNDS {
                    let edges = graph.get_edges();
                    for (tail, heads) in &edges {
                        for (head, edge) in heads {
                            let mirror = &edges[head][tail];
                            assert_eq!(mirror.weight(), edge.weight());
                        }
                    }
                }
            });
        }
    });

    let in_total: usize = graph
        .get_indegree_distribution()
        .iter()
        .map(|(k, n)| k * n)
        .sum();
    assert_eq!(in_total, graph.edge_count() * 2);
}

#[test]
fn test_concurrent_node_removal() {
    let graph = Arc::new(Graph::new_directed());
    for i in 0..50usize {
        graph.add_node(Node::new(i));
    }
    for i in 0..50usize {
        graph
            .add_edge(Identifier::from(i), Identifier::from((i + 1) % 50), 1.0)
            .unwrap();
    }

    thread::scope(|scope| {
        for t in 0..5usize {
            let graph = &graph;
            scope.spawn(move || {
                for i in (t..50).step_by(5).filter(|i| i % 2 == 0) {
                    graph.remove_node(Identifier::from(i));
                }
            });
        }
    });

    assert_eq!(graph.node_count(), 25);
    for (tail, heads) in graph.get_edges() {
        assert!(graph.has_node(&tail));
        for head in heads.keys() {
            assert!(graph.has_node(head));
        }
    }
    // Only odd->even edges existed; every even node is gone
    assert_eq!(graph.edge_count(), 0);
}
