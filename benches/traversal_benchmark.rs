use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use jgralab::algorithms::{
    BreadthFirstSearch, DepthFirstSearch, GraphAlgorithm, SearchAlgorithm, TopologicalOrderWithDfs,
    WeakComponentsWithBfs,
};
use jgralab::graph::TGraph;
use petgraph::graph::DiGraph;

/// Deterministic sparse graph: `n` vertices, `n * degree` edges.
fn random_edges(n: usize, degree: usize, seed: u64) -> Vec<(usize, usize)> {
    let mut state = seed;
    let mut next = move || {
        state = state.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        (state >> 33) as usize
    };
    (0..n * degree).map(|_| (next() % n, next() % n)).collect()
}

/// Forward edges only, so the graph is acyclic.
fn random_dag(n: usize, degree: usize, seed: u64) -> Vec<(usize, usize)> {
    random_edges(n, degree, seed)
        .into_iter()
        .filter(|&(a, b)| a != b)
        .map(|(a, b)| (a.min(b), a.max(b)))
        .collect()
}

fn bench_searches(c: &mut Criterion) {
    let mut group = c.benchmark_group("traversal_search");

    for &n in &[1_000usize, 50_000] {
        let edges = random_edges(n, 4, 42);
        let graph = TGraph::from_edges(n, &edges).unwrap();
        let petgraph = DiGraph::<(), ()>::from_edges(edges.iter().map(|&(a, b)| (a as u32, b as u32)));
        group.throughput(Throughput::Elements((n + edges.len()) as u64));

        group.bench_with_input(BenchmarkId::new("bfs", n), &graph, |b, graph| {
            b.iter(|| {
                let mut bfs = BreadthFirstSearch::new(graph);
                bfs.execute().unwrap();
                black_box(bfs.vertex_order().unwrap().len())
            });
        });

        group.bench_with_input(BenchmarkId::new("dfs", n), &graph, |b, graph| {
            b.iter(|| {
                let mut dfs = DepthFirstSearch::new(graph);
                dfs.execute().unwrap();
                black_box(dfs.rorder().unwrap().len())
            });
        });

        group.bench_with_input(BenchmarkId::new("petgraph_bfs", n), &petgraph, |b, g| {
            b.iter(|| {
                let mut visited = 0;
                let mut bfs = petgraph::visit::Bfs::new(g, 0.into());
                while bfs.next(g).is_some() {
                    visited += 1;
                }
                black_box(visited)
            });
        });
    }

    group.finish();
}

fn bench_components(c: &mut Criterion) {
    let mut group = c.benchmark_group("traversal_components");
    let n = 20_000;

    let sparse = TGraph::from_edges(n, &random_edges(n, 1, 7)).unwrap();
    group.bench_function("weak_components", |b| {
        b.iter(|| {
            let mut components = WeakComponentsWithBfs::new(&sparse);
            components.execute().unwrap();
            black_box(components.kappa().unwrap())
        });
    });

    let dag = TGraph::from_edges(n, &random_dag(n, 3, 11)).unwrap();
    group.bench_function("topological_order", |b| {
        b.iter(|| {
            let mut topo = TopologicalOrderWithDfs::new(&dag);
            topo.execute().unwrap();
            black_box(topo.is_acyclic().unwrap())
        });
    });

    group.bench_function("reset_and_rerun", |b| {
        let mut bfs = BreadthFirstSearch::new(&dag);
        b.iter(|| {
            bfs.reset();
            bfs.execute().unwrap();
            black_box(bfs.state())
        });
    });

    group.finish();
}

criterion_group!(benches, bench_searches, bench_components);
criterion_main!(benches);
