use std::cell::RefCell;
use std::ops::ControlFlow;
use std::rc::Rc;

use jgralab::algorithms::{
    AlgorithmKind, AlgorithmState, BreadthFirstSearch, DepthFirstSearch, DijkstraSearch,
    GraphAlgorithm, IsTree, SearchAlgorithm, ShortestPathAlgorithm, WeightedAlgorithm,
};
use jgralab::graph::{EdgeId, Incidence, TGraph, VertexId};
use jgralab::visitors::{DfsVisitor, GraphVisitor, SearchVisitor, Visitor};
use jgralab::{Direction, Error};

fn abcd() -> TGraph {
    TGraph::from_edges(4, &[(0, 1), (1, 2), (0, 2), (2, 3)]).unwrap()
}

#[test]
fn weighted_distance_requires_a_run() {
    let graph = abcd();
    let mut dijkstra = DijkstraSearch::new(&graph);
    assert_eq!(dijkstra.state(), AlgorithmState::Pristine);
    assert!(matches!(
        dijkstra.weighted_distance(),
        Err(Error::IllegalState {
            state: AlgorithmState::Pristine,
            operation: "weighted_distance",
        })
    ));

    dijkstra.execute_from(VertexId::new(0)).unwrap();
    assert_eq!(dijkstra.state(), AlgorithmState::Finished);
    let distance = dijkstra.weighted_distance().unwrap();
    assert_eq!(distance.get_mark(VertexId::new(3)), Some(2.0));
}

#[test]
fn parameters_are_frozen_after_a_run() {
    let graph = abcd();
    let mut dijkstra = DijkstraSearch::new(&graph);
    dijkstra.execute_from(VertexId::new(0)).unwrap();

    assert!(dijkstra.set_edge_weight(|_: EdgeId| 2.0).is_err());
    assert!(dijkstra.set_traversal_direction(Direction::In).is_err());
    assert!(dijkstra.set_navigable(|_: EdgeId| true).is_err());
    assert!(dijkstra.execute_from(VertexId::new(1)).is_err());
    assert_eq!(dijkstra.state(), AlgorithmState::Finished);

    dijkstra.reset();
    assert_eq!(dijkstra.state(), AlgorithmState::ParamsSet);
    assert!(dijkstra.weighted_distance().is_err());
    dijkstra
        .set_edge_weight(|_: EdgeId| 2.0)
        .unwrap()
        .execute_from(VertexId::new(0))
        .unwrap();
    assert_eq!(dijkstra.distance_to(VertexId::new(3)).unwrap(), 4.0);
}

#[test]
fn rejected_arguments_leave_the_state_alone() {
    let graph = abcd();
    let mut bfs = BreadthFirstSearch::new(&graph);
    assert!(matches!(
        bfs.execute_from(VertexId::new(17)),
        Err(Error::InvalidArgument(_))
    ));
    assert_eq!(bfs.state(), AlgorithmState::Pristine);

    let mut tree = IsTree::new(&graph);
    assert!(matches!(
        tree.set_traversal_direction(Direction::Out),
        Err(Error::Unsupported(_))
    ));
    assert_eq!(tree.traversal_direction(), Direction::InOut);
    assert!(!tree.is_hybrid());
}

#[derive(Default)]
struct Recorder {
    vertices: Vec<VertexId>,
    roots: usize,
    resets: usize,
    stop_after: Option<usize>,
}

impl Visitor for Recorder {
    fn reset(&mut self) {
        self.vertices.clear();
        self.roots = 0;
        self.resets += 1;
    }
}

impl GraphVisitor for Recorder {
    fn visit_vertex(&mut self, vertex: VertexId) -> ControlFlow<()> {
        self.vertices.push(vertex);
        match self.stop_after {
            Some(limit) if self.vertices.len() >= limit => ControlFlow::Break(()),
            _ => ControlFlow::Continue(()),
        }
    }
}

impl SearchVisitor for Recorder {
    fn visit_root(&mut self, _vertex: VertexId) -> ControlFlow<()> {
        self.roots += 1;
        ControlFlow::Continue(())
    }
}

impl DfsVisitor for Recorder {}

#[test]
fn visitors_terminate_a_search_early() {
    let graph = TGraph::from_edges(5, &[(0, 1), (1, 2), (2, 3), (3, 4)]).unwrap();
    let recorder = Rc::new(RefCell::new(Recorder {
        stop_after: Some(3),
        ..Recorder::default()
    }));

    let mut dfs = DepthFirstSearch::new(&graph);
    dfs.add_visitor(recorder.clone()).unwrap();
    dfs.execute().unwrap();

    assert_eq!(dfs.state(), AlgorithmState::Terminated);
    assert_eq!(recorder.borrow().vertices.len(), 3);
    // Partial results stay readable.
    assert_eq!(dfs.vertex_order().unwrap().len(), 3);
    assert!(dfs.add_visitor(recorder.clone()).is_ok());

    dfs.reset();
    assert!(recorder.borrow().vertices.is_empty());
    assert!(recorder.borrow().resets >= 1);
}

#[test]
fn one_visitor_serves_several_algorithms() {
    let graph = TGraph::from_edges(4, &[(0, 1), (2, 3)]).unwrap();
    let recorder = Rc::new(RefCell::new(Recorder::default()));

    let mut bfs = BreadthFirstSearch::new(&graph);
    bfs.add_visitor(recorder.clone()).unwrap();
    bfs.execute().unwrap();
    assert_eq!(recorder.borrow().roots, 2);
    assert_eq!(recorder.borrow().vertices.len(), 4);

    let mut dijkstra = DijkstraSearch::new(&graph);
    dijkstra.add_visitor(recorder.clone()).unwrap();
    dijkstra.execute_from(VertexId::new(2)).unwrap();
    // Starting a pristine algorithm resets its visitors.
    assert_eq!(recorder.borrow().vertices, [VertexId::new(2), VertexId::new(3)]);
    assert_eq!(recorder.borrow().roots, 0);

    let as_search: Rc<RefCell<dyn SearchVisitor>> = recorder.clone();
    assert!(bfs.remove_visitor(&as_search).unwrap());
    assert!(!bfs.remove_visitor(&as_search).unwrap());
}

struct DepthFirstOnly;

impl Visitor for DepthFirstOnly {
    fn set_algorithm(&mut self, algorithm: AlgorithmKind) -> jgralab::Result<()> {
        match algorithm {
            AlgorithmKind::DepthFirstSearch => Ok(()),
            other => Err(Error::IncompatibleAlgorithm {
                visitor: "depth-first search",
                algorithm: other,
            }),
        }
    }
}

impl GraphVisitor for DepthFirstOnly {}
impl SearchVisitor for DepthFirstOnly {
    fn visit_frond(&mut self, _edge: Incidence) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }
}

#[test]
fn visitors_may_refuse_an_algorithm() {
    let graph = abcd();
    let mut bfs = BreadthFirstSearch::new(&graph);
    let err = bfs
        .add_visitor(Rc::new(RefCell::new(DepthFirstOnly)))
        .unwrap_err();
    assert!(matches!(
        err,
        Error::IncompatibleAlgorithm {
            algorithm: AlgorithmKind::BreadthFirstSearch,
            ..
        }
    ));
    bfs.execute().unwrap();
    assert_eq!(bfs.vertex_order().unwrap().len(), 4);
}
