use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use jgralab::graph::{TGraph, VertexId};
use jgralab::markers::{ArrayVertexMarker, BitSetVertexMarker, DoubleVertexMarker, HashVertexMarker, Marker};
use std::collections::HashMap;

const SIZES: &[usize] = &[1_000, 100_000];

fn bench_mark_all(c: &mut Criterion) {
    let mut group = c.benchmark_group("markers_mark_all");

    for &n in SIZES {
        let graph = TGraph::from_edges(n, &[]).unwrap();
        group.throughput(Throughput::Elements(n as u64));

        group.bench_with_input(BenchmarkId::new("std_hash_map", n), &n, |b, &n| {
            b.iter(|| {
                let mut map = HashMap::with_capacity(n);
                for i in 0..n {
                    map.insert(i, black_box(i as f64));
                }
                map
            });
        });

        group.bench_with_input(BenchmarkId::new("array", n), &n, |b, &n| {
            b.iter(|| {
                let mut marker: ArrayVertexMarker<f64> = Marker::new(&graph);
                for i in 0..n {
                    marker.mark(VertexId::new(i), black_box(i as f64));
                }
                marker
            });
        });

        group.bench_with_input(BenchmarkId::new("double", n), &n, |b, &n| {
            b.iter(|| {
                let mut marker: DoubleVertexMarker = Marker::new(&graph);
                for i in 0..n {
                    marker.mark(VertexId::new(i), black_box(i as f64));
                }
                marker
            });
        });

        group.bench_with_input(BenchmarkId::new("hash", n), &n, |b, &n| {
            b.iter(|| {
                let mut marker: HashVertexMarker<f64> = Marker::new(&graph);
                for i in 0..n {
                    marker.mark(VertexId::new(i), black_box(i as f64));
                }
                marker
            });
        });

        group.bench_with_input(BenchmarkId::new("bit_set", n), &n, |b, &n| {
            b.iter(|| {
                let mut marker: BitSetVertexMarker = Marker::new(&graph);
                for i in 0..n {
                    marker.try_mark(VertexId::new(black_box(i)));
                }
                marker
            });
        });
    }

    group.finish();
}

fn bench_iterate_sparse(c: &mut Criterion) {
    let mut group = c.benchmark_group("markers_iterate_sparse");
    let n = 100_000;
    let graph = TGraph::from_edges(n, &[]).unwrap();

    // every 64th vertex marked
    let mut array: ArrayVertexMarker<u32> = Marker::new(&graph);
    let mut hash: HashVertexMarker<u32> = Marker::new(&graph);
    let mut bits: BitSetVertexMarker = Marker::new(&graph);
    for i in (0..n).step_by(64) {
        array.mark(VertexId::new(i), i as u32);
        hash.mark(VertexId::new(i), i as u32);
        bits.mark(VertexId::new(i), ());
    }
    group.throughput(Throughput::Elements(array.size() as u64));

    group.bench_function("array", |b| b.iter(|| array.marked_elements().count()));
    group.bench_function("hash", |b| b.iter(|| hash.marked_elements().count()));
    group.bench_function("bit_set", |b| b.iter(|| bits.marked_elements().count()));

    group.finish();
}

fn bench_growth(c: &mut Criterion) {
    c.bench_function("markers_follow_graph_growth", |b| {
        b.iter(|| {
            let mut graph = TGraph::new();
            let mut marker: DoubleVertexMarker = Marker::new(&graph);
            for i in 0..10_000 {
                let vertex = graph.add_vertex();
                marker.mark(vertex, black_box(i as f64));
            }
            marker.size()
        });
    });
}

criterion_group!(benches, bench_mark_all, bench_iterate_sparse, bench_growth);
criterion_main!(benches);
