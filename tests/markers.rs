use std::collections::BTreeMap;
use std::fmt::Debug;

use jgralab::functions::BooleanFunction;
use jgralab::graph::{AnyElement, EdgeId, Graph, TGraph, VertexId};
use jgralab::markers::{
    ArrayStorage, BitSetStorage, GraphMarker, HashStorage, MarkStorage, Marker, PrimitiveStorage,
    SubgraphMarker,
};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Operation {
    Mark(usize),
    Unmark(usize),
    AddVertices(usize),
    DeleteVertex(usize),
}

fn operation() -> impl Strategy<Value = Operation> {
    prop_oneof![
        4 => (0..64usize).prop_map(Operation::Mark),
        2 => (0..64usize).prop_map(Operation::Unmark),
        1 => (1..40usize).prop_map(Operation::AddVertices),
        1 => (0..64usize).prop_map(Operation::DeleteVertex),
    ]
}

/// Replays `ops` against a marker and a `BTreeMap` model of it.
fn replay<S>(ops: &[Operation], value: impl Fn(usize) -> S::Value)
where
    S: MarkStorage,
    S::Value: PartialEq + Debug,
{
    let mut graph = TGraph::with_capacity(2, 2);
    for _ in 0..8 {
        graph.add_vertex();
    }
    let mut marker: Marker<VertexId, S> = Marker::new(&graph);
    let mut model: BTreeMap<VertexId, S::Value> = BTreeMap::new();

    for (step, op) in ops.iter().enumerate() {
        match *op {
            Operation::Mark(i) => {
                let vertex = VertexId::new(i);
                if graph.contains_vertex(vertex) {
                    let previous = marker.mark(vertex, value(step));
                    assert_eq!(previous, model.insert(vertex, value(step)));
                }
            }
            Operation::Unmark(i) => {
                let vertex = VertexId::new(i);
                assert_eq!(marker.remove_mark(vertex), model.remove(&vertex).is_some());
                assert!(!marker.remove_mark(vertex), "second removal reports unmarked");
            }
            Operation::AddVertices(count) => {
                let size = marker.size();
                for _ in 0..count {
                    graph.add_vertex();
                }
                assert_eq!(marker.size(), size, "growth alone never changes size");
                assert!(marker.capacity() >= graph.max_vertex_count());
            }
            Operation::DeleteVertex(i) => {
                let vertex = VertexId::new(i);
                let size = marker.size();
                let was_marked = model.remove(&vertex).is_some();
                if graph.delete_vertex(vertex) {
                    assert!(!marker.is_marked(vertex));
                    assert_eq!(marker.size(), size - usize::from(was_marked));
                }
            }
        }

        assert_eq!(marker.size(), model.len());
        for (vertex, expected) in &model {
            assert_eq!(marker.get_mark(*vertex).as_ref(), Some(expected));
        }
    }

    let mut marked: Vec<VertexId> = marker.marked_elements().collect();
    marked.sort();
    assert_eq!(marked, model.keys().copied().collect::<Vec<_>>());
}

proptest! {
    #[test]
    fn array_marker_matches_model(ops in prop::collection::vec(operation(), 1..120)) {
        replay::<ArrayStorage<String>>(&ops, |step| format!("mark {step}"));
    }

    #[test]
    fn option_values_are_real_marks(ops in prop::collection::vec(operation(), 1..120)) {
        replay::<ArrayStorage<Option<u8>>>(&ops, |step| (step % 3 == 0).then_some(step as u8));
    }

    #[test]
    fn bit_set_marker_matches_model(ops in prop::collection::vec(operation(), 1..120)) {
        replay::<BitSetStorage>(&ops, |_| ());
    }

    #[test]
    fn integer_marker_matches_model(ops in prop::collection::vec(operation(), 1..120)) {
        // zero and MIN are ordinary values
        replay::<PrimitiveStorage<i32>>(&ops, |step| if step % 2 == 0 { 0 } else { i32::MIN });
    }

    #[test]
    fn double_marker_matches_model(ops in prop::collection::vec(operation(), 1..120)) {
        replay::<PrimitiveStorage<f64>>(&ops, |step| step as f64 - 0.5);
    }

    #[test]
    fn hash_marker_matches_model(ops in prop::collection::vec(operation(), 1..120)) {
        replay::<HashStorage<u64>>(&ops, |step| step as u64 * 31);
    }
}

#[test]
fn nan_mark_is_distinguishable_from_unmarked() {
    let graph = TGraph::from_edges(2, &[]).unwrap();
    let mut marker: Marker<VertexId, PrimitiveStorage<f64>> = Marker::new(&graph);
    marker.mark(VertexId::new(0), f64::NAN);
    assert!(marker.is_marked(VertexId::new(0)));
    assert!(marker.get_mark(VertexId::new(0)).is_some_and(f64::is_nan));
    assert!(!marker.is_marked(VertexId::new(1)));
}

#[test]
fn markers_are_usable_through_the_trait() {
    fn fill(marker: &mut dyn GraphMarker<VertexId, Value = u32>, graph: &TGraph) {
        for vertex in graph.vertices() {
            marker.mark(vertex, vertex.index() as u32 * 10);
        }
    }

    let graph = TGraph::from_edges(3, &[]).unwrap();
    let mut array: Marker<VertexId, ArrayStorage<u32>> = Marker::new(&graph);
    let mut hash: Marker<VertexId, HashStorage<u32>> = Marker::new(&graph);
    fill(&mut array, &graph);
    fill(&mut hash, &graph);
    assert_eq!(array.get_mark(VertexId::new(2)), Some(20));
    assert_eq!(hash.size(), 3);
}

#[test]
fn subgraph_marker_drops_deleted_elements() {
    let mut graph = TGraph::from_edges(3, &[(0, 1), (1, 2)]).unwrap();
    let mut subgraph = SubgraphMarker::induced(&graph, [VertexId::new(0), VertexId::new(1)]);
    assert!(subgraph.get(AnyElement::Edge(EdgeId::new(0))));
    assert!(!subgraph.get(AnyElement::Edge(EdgeId::new(1))));

    graph.delete_vertex(VertexId::new(1));
    assert_eq!(subgraph.vertex_count(), 1);
    assert_eq!(subgraph.edge_count(), 0);

    subgraph.add_vertex(VertexId::new(2));
    assert!(subgraph.get(AnyElement::Vertex(VertexId::new(2))));
}
