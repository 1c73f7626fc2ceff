//! `DijkstraSearch`: single-source shortest paths for non-negative weights.

use std::cell::RefCell;
use std::ops::ControlFlow;
use std::rc::Rc;

use crate::algorithms::{AlgorithmBase, AlgorithmKind, GraphAlgorithm};
use crate::collections::PriorityQueue;
use crate::error::Result;
use crate::graph::{Direction, Graph, VertexId};
use crate::markers::{BitSetVertexMarker, Marker};
use crate::visitors::{GraphVisitor, VisitorList};

use super::{EdgeWeights, PathState, ShortestPathAlgorithm, WeightedAlgorithm};

/// Dijkstra's algorithm over a graph or subgraph.
///
/// Vertices are settled in order of distance. `visit_vertex` fires when a
/// vertex is settled, `visit_edge` for every traversable incidence leading to
/// an unsettled vertex. Negative weights are not detected; use
/// [`FordMooreSearch`](super::FordMooreSearch) for them.
///
/// ### Performance Characteristics
/// | Operation | Complexity | Notes |
/// |-----------|------------|-------|
/// | `execute_from` | \(O((V + E) \log V)\) | Indexed heap with decrease-key |
/// | `execute_between` | \(O((V + E) \log V)\) | Stops once the target is settled |
#[derive(Debug)]
pub struct DijkstraSearch<'g, G> {
    base: AlgorithmBase<'g, G>,
    weights: EdgeWeights<'g>,
    paths: PathState,
    settled: BitSetVertexMarker,
    queue: PriorityQueue<f64>,
    visitors: VisitorList<dyn GraphVisitor>,
}

impl<'g, G: Graph> DijkstraSearch<'g, G> {
    /// Creates the search following outgoing edges.
    pub fn new(graph: &'g G) -> Self {
        Self {
            base: AlgorithmBase::new(graph, AlgorithmKind::Dijkstra, Direction::Out),
            weights: EdgeWeights::default(),
            paths: PathState::new(graph),
            settled: Marker::new(graph),
            queue: PriorityQueue::with_capacity(graph.max_vertex_count()),
            visitors: VisitorList::new(),
        }
    }

    /// Registers `visitor` for the following runs.
    ///
    /// # Errors
    /// [`Error::IllegalState`](crate::Error::IllegalState) while running;
    /// whatever the visitor's `set_algorithm` returns.
    pub fn add_visitor(&mut self, visitor: Rc<RefCell<dyn GraphVisitor>>) -> Result<()> {
        self.base.check_state_for_setting_visitors("add_visitor")?;
        visitor.borrow_mut().set_algorithm(self.base.kind())?;
        self.visitors.add(visitor);
        Ok(())
    }

    /// Unregisters `visitor`. Returns `true` if it was registered.
    ///
    /// # Errors
    /// [`Error::IllegalState`](crate::Error::IllegalState) while running.
    pub fn remove_visitor(&mut self, visitor: &Rc<RefCell<dyn GraphVisitor>>) -> Result<bool> {
        self.base.check_state_for_setting_visitors("remove_visitor")?;
        Ok(self.visitors.remove(visitor))
    }

    /// Unregisters every visitor.
    ///
    /// # Errors
    /// [`Error::IllegalState`](crate::Error::IllegalState) while running.
    pub fn clear_visitors(&mut self) -> Result<()> {
        self.base.check_state_for_setting_visitors("clear_visitors")?;
        self.visitors.clear();
        Ok(())
    }

    /// Computes distances from `start` to every reachable vertex.
    ///
    /// # Errors
    /// [`Error::InvalidArgument`](crate::Error::InvalidArgument) if `start` is
    /// not a vertex of the subgraph;
    /// [`Error::IllegalState`](crate::Error::IllegalState) unless `Pristine`
    /// or `ParamsSet`.
    pub fn execute_from(&mut self, start: VertexId) -> Result<&mut Self> {
        self.base.check_vertex(start, "start")?;
        self.start_running()?;
        let flow = self.run(start, None);
        self.base.finish(flow);
        Ok(self)
    }

    /// Computes distances from `start` until `target` is settled.
    ///
    /// Settling the target terminates the search; results are valid for every
    /// vertex settled so far.
    ///
    /// # Errors
    /// [`Error::InvalidArgument`](crate::Error::InvalidArgument) if `start` or
    /// `target` is not a vertex of the subgraph;
    /// [`Error::IllegalState`](crate::Error::IllegalState) unless `Pristine`
    /// or `ParamsSet`.
    pub fn execute_between(&mut self, start: VertexId, target: VertexId) -> Result<&mut Self> {
        self.base.check_vertex(start, "start")?;
        self.base.check_vertex(target, "target")?;
        self.start_running()?;
        let flow = self.run(start, Some(target));
        self.base.finish(flow);
        Ok(self)
    }

    /// Vertices whose distance is final.
    ///
    /// # Errors
    /// [`Error::IllegalState`](crate::Error::IllegalState) before execution.
    pub fn settled(&self) -> Result<&BitSetVertexMarker> {
        self.base.check_state_for_result("settled")?;
        Ok(&self.settled)
    }

    fn run(&mut self, start: VertexId, target: Option<VertexId>) -> ControlFlow<()> {
        self.paths.distance.mark(start, 0.0);
        self.queue.push_or_decrease(start.index(), 0.0);

        while let Some((index, distance)) = self.queue.pop() {
            let vertex = VertexId::new(index);
            self.settled.mark(vertex, ());
            self.visitors.fire(|v| v.visit_vertex(vertex))?;
            if target == Some(vertex) {
                return ControlFlow::Break(());
            }

            for incidence in self.base.traversable_incidences(vertex) {
                let next = incidence.that;
                if self.settled.is_marked(next) {
                    continue;
                }
                self.visitors.fire(|v| v.visit_edge(incidence))?;
                let candidate = distance + self.weights.weight(incidence.edge);
                if candidate < self.paths.distance_of(next) {
                    self.paths.improve(next, candidate, incidence.edge);
                    self.queue.push_or_decrease(next.index(), candidate);
                }
            }
        }
        ControlFlow::Continue(())
    }
}

impl<'g, G: Graph> GraphAlgorithm<'g, G> for DijkstraSearch<'g, G> {
    fn base(&self) -> &AlgorithmBase<'g, G> {
        &self.base
    }

    fn base_mut(&mut self) -> &mut AlgorithmBase<'g, G> {
        &mut self.base
    }

    fn reset(&mut self) {
        self.paths.clear();
        self.settled.clear();
        self.queue.clear();
        self.visitors.reset_all();
        self.base.reset_state();
    }
}

impl<'g, G: Graph> WeightedAlgorithm<'g, G> for DijkstraSearch<'g, G> {
    fn edge_weights(&self) -> &EdgeWeights<'g> {
        &self.weights
    }

    fn edge_weights_mut(&mut self) -> &mut EdgeWeights<'g> {
        &mut self.weights
    }
}

impl<'g, G: Graph> ShortestPathAlgorithm<'g, G> for DijkstraSearch<'g, G> {
    fn path_state(&self) -> &PathState {
        &self.paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::AlgorithmState;
    use crate::graph::{AnyElement, EdgeId, Incidence, TGraph};
    use crate::markers::DoubleEdgeMarker;
    use crate::visitors::Visitor;

    // A=0, B=1, C=2, D=3: A->B 1, B->C 2, A->C 5, C->D 1
    fn abcd() -> (TGraph, [f64; 4]) {
        let graph = TGraph::from_edges(4, &[(0, 1), (1, 2), (0, 2), (2, 3)]).unwrap();
        (graph, [1.0, 2.0, 5.0, 1.0])
    }

    #[test]
    fn abcd_distances_and_parents() {
        let (graph, weights) = abcd();
        let mut dijkstra = DijkstraSearch::new(&graph);
        dijkstra
            .set_edge_weight(move |edge: EdgeId| weights[edge.index()])
            .unwrap()
            .execute_from(VertexId::new(0))
            .unwrap();

        let distances: Vec<f64> = (0..4)
            .map(|v| dijkstra.distance_to(VertexId::new(v)).unwrap())
            .collect();
        assert_eq!(distances, vec![0.0, 1.0, 3.0, 4.0]);
        assert_eq!(dijkstra.parent().unwrap().get_mark(VertexId::new(2)), Some(EdgeId::new(1)));
        assert_eq!(dijkstra.parent().unwrap().get_mark(VertexId::new(0)), None);
        assert_eq!(
            dijkstra.path_to(VertexId::new(3)).unwrap(),
            Some(vec![EdgeId::new(0), EdgeId::new(1), EdgeId::new(3)])
        );
        assert_eq!(dijkstra.state(), AlgorithmState::Finished);
    }

    #[test]
    fn weights_from_a_marker() {
        let (graph, weights) = abcd();
        let mut marker: DoubleEdgeMarker = Marker::new(&graph);
        for (index, weight) in weights.iter().enumerate() {
            marker.mark(EdgeId::new(index), *weight);
        }
        // undefined weight falls back to 1.0
        marker.remove_mark(EdgeId::new(2));

        let mut dijkstra = DijkstraSearch::new(&graph);
        dijkstra.set_edge_weight(marker).unwrap();
        dijkstra.execute_from(VertexId::new(0)).unwrap();
        assert_eq!(dijkstra.distance_to(VertexId::new(2)).unwrap(), 1.0);
    }

    #[test]
    fn target_terminates() {
        let (graph, weights) = abcd();
        let mut dijkstra = DijkstraSearch::new(&graph);
        dijkstra.set_edge_weight(move |edge: EdgeId| weights[edge.index()]).unwrap();
        dijkstra.execute_between(VertexId::new(0), VertexId::new(1)).unwrap();

        assert_eq!(dijkstra.state(), AlgorithmState::Terminated);
        assert_eq!(dijkstra.distance_to(VertexId::new(1)).unwrap(), 1.0);
        assert!(!dijkstra.settled().unwrap().is_marked(VertexId::new(3)));
        assert_eq!(dijkstra.distance_to(VertexId::new(3)).unwrap(), f64::INFINITY);
    }

    #[test]
    fn unreachable_and_filtered_vertices_stay_infinite() {
        let (graph, _) = abcd();
        let mut dijkstra = DijkstraSearch::new(&graph);
        dijkstra
            .set_subgraph(|element: AnyElement| element != AnyElement::Vertex(VertexId::new(1)))
            .unwrap()
            .execute_from(VertexId::new(0))
            .unwrap();
        assert_eq!(dijkstra.distance_to(VertexId::new(1)).unwrap(), f64::INFINITY);
        assert_eq!(dijkstra.distance_to(VertexId::new(2)).unwrap(), 1.0);
        assert_eq!(dijkstra.path_to(VertexId::new(1)).unwrap(), None);
    }

    #[test]
    fn incoming_direction_walks_backwards() {
        let (graph, _) = abcd();
        let mut dijkstra = DijkstraSearch::new(&graph);
        dijkstra.set_traversal_direction(Direction::In).unwrap();
        dijkstra.execute_from(VertexId::new(3)).unwrap();
        assert_eq!(dijkstra.distance_to(VertexId::new(0)).unwrap(), 2.0);
    }

    #[test]
    fn repeated_searches_do_not_pile_up_listeners() {
        let (graph, _) = abcd();
        for _ in 0..10_000 {
            let _ = DijkstraSearch::new(&graph);
        }
        assert!(graph.listeners().is_empty());
        // At most the markers of the last search linger.
        assert!(graph.listeners().entry_count() <= 3);
    }

    #[derive(Default)]
    struct Settled {
        vertices: Vec<VertexId>,
        edges: usize,
    }

    impl Visitor for Settled {
        fn reset(&mut self) {
            self.vertices.clear();
            self.edges = 0;
        }
    }

    impl GraphVisitor for Settled {
        fn visit_vertex(&mut self, vertex: VertexId) -> ControlFlow<()> {
            self.vertices.push(vertex);
            ControlFlow::Continue(())
        }

        fn visit_edge(&mut self, _edge: Incidence) -> ControlFlow<()> {
            self.edges += 1;
            ControlFlow::Continue(())
        }
    }

    #[test]
    fn visitors_see_settle_order() {
        let (graph, weights) = abcd();
        let settled = Rc::new(RefCell::new(Settled::default()));
        let mut dijkstra = DijkstraSearch::new(&graph);
        dijkstra.set_edge_weight(move |edge: EdgeId| weights[edge.index()]).unwrap();
        dijkstra.add_visitor(settled.clone()).unwrap();
        dijkstra.execute_from(VertexId::new(0)).unwrap();

        let order: Vec<usize> = settled.borrow().vertices.iter().map(|v| v.index()).collect();
        assert_eq!(order, vec![0, 1, 2, 3]);
        assert_eq!(settled.borrow().edges, 4);

        dijkstra.reset();
        assert!(settled.borrow().vertices.is_empty());
    }

    #[test]
    fn invalid_start_leaves_state_untouched() {
        let (graph, _) = abcd();
        let mut dijkstra = DijkstraSearch::new(&graph);
        assert!(dijkstra.execute_from(VertexId::new(9)).is_err());
        assert_eq!(dijkstra.state(), AlgorithmState::Pristine);
    }
}
