use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use nebula::graph::{Graph, Identifier, Node};
use nebula::{barabasi_albert, watts_strogatz, BarabasiAlbertConfig, WattsStrogatzConfig};

fn ring(size: usize, directed: bool) -> Graph {
    let graph = if directed {
        Graph::new_directed()
    } else {
        Graph::new_undirected()
    };
    for i in 0..size {
        graph.add_node(Node::new(i));
    }
    for i in 0..size {
        graph
            .add_edge(Identifier::from(i), Identifier::from((i + 1) % size), 1.0)
            .unwrap();
    }
    graph
}

/// Benchmark node insertion throughput
fn bench_node_insertion(c: &mut Criterion) {
    let mut group = c.benchmark_group("node_insertion");

    for size in [100, 1000, 10_000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            b.iter(|| {
                let graph = Graph::new_directed();
                for i in 0..size {
                    graph.add_node(Node::new(i));
                }
                criterion::black_box(graph.node_count());
            });
        });
    }
    group.finish();
}

/// Benchmark undirected edge insertion (two instances per connection)
fn bench_edge_insertion(c: &mut Criterion) {
    let mut group = c.benchmark_group("edge_insertion");

    for size in [100, 1000, 10_000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, &size| {
            b.iter(|| criterion::black_box(ring(size, false).edge_count()));
        });
    }
    group.finish();
}

/// Benchmark adjacency lookups on a fixed graph
fn bench_heads_lookup(c: &mut Criterion) {
    let graph = ring(10_000, true);
    let ids: Vec<Identifier> = (0..10_000usize).map(Identifier::from).collect();

    c.bench_function("heads_lookup", |b| {
        let mut i = 0;
        b.iter(|| {
            let heads = graph.get_heads(&ids[i % ids.len()]).unwrap();
            i += 1;
            criterion::black_box(heads.len());
        });
    });
}

/// Benchmark degree distribution computation
fn bench_degree_distribution(c: &mut Criterion) {
    let mut group = c.benchmark_group("degree_distribution");

    for size in [1000, 10_000].iter() {
        let graph = ring(*size, false);
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| {
                let mut dist = graph.get_indegree_distribution();
                dist.sort();
                criterion::black_box(dist.average_degree());
            });
        });
    }
    group.finish();
}

/// Benchmark the random graph generators at their default sizes
fn bench_generators(c: &mut Criterion) {
    let ba = BarabasiAlbertConfig {
        seed: Some(1),
        ..Default::default()
    };
    let ws = WattsStrogatzConfig {
        seed: Some(1),
        ..Default::default()
    };

    c.bench_function("barabasi_albert_100", |b| {
        b.iter(|| criterion::black_box(barabasi_albert(&ba).unwrap().edge_count()))
    });
    c.bench_function("watts_strogatz_100", |b| {
        b.iter(|| criterion::black_box(watts_strogatz(&ws).unwrap().edge_count()))
    });
}

criterion_group!(
    benches,
    bench_node_insertion,
    bench_edge_insertion,
    bench_heads_lookup,
    bench_degree_distribution,
    bench_generators
);
criterion_main!(benches);
