//! `FordMooreSearch`: label-correcting shortest paths with negative weights.

use std::collections::VecDeque;
use std::ops::ControlFlow;

use crate::algorithms::{AlgorithmBase, AlgorithmKind, GraphAlgorithm};
use crate::error::Result;
use crate::graph::{Direction, Graph, VertexId};
use crate::markers::{BitSetVertexMarker, IntegerVertexMarker, Marker};

use super::{EdgeWeights, PathState, ShortestPathAlgorithm, WeightedAlgorithm};

/// Ford-Moore (queue-based Bellman-Ford) single-source search.
///
/// A vertex enters the FIFO worklist whenever its distance improves and it is
/// not queued already. Without a negative cycle no vertex is re-queued more
/// than `|V| - 1` times, `|V|` counting the vertices of the subgraph; passing
/// that bound proves a negative cycle reachable from the start and terminates
/// the run.
///
/// This algorithm has no visitor registration.
#[derive(Debug)]
pub struct FordMooreSearch<'g, G> {
    base: AlgorithmBase<'g, G>,
    weights: EdgeWeights<'g>,
    paths: PathState,
    queue: VecDeque<VertexId>,
    queued: BitSetVertexMarker,
    pushes: IntegerVertexMarker,
    negative_cycle: bool,
}

impl<'g, G: Graph> FordMooreSearch<'g, G> {
    /// Creates the search following outgoing edges.
    pub fn new(graph: &'g G) -> Self {
        Self {
            base: AlgorithmBase::new(graph, AlgorithmKind::FordMoore, Direction::Out),
            weights: EdgeWeights::default(),
            paths: PathState::new(graph),
            queue: VecDeque::new(),
            queued: Marker::new(graph),
            pushes: Marker::new(graph),
            negative_cycle: false,
        }
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
        let flow = self.run(start);
        self.base.finish(flow);
        Ok(self)
    }

    /// Returns `true` if a negative cycle reachable from the start was found.
    ///
    /// Distances are meaningless in that case.
    ///
    /// # Errors
    /// [`Error::IllegalState`](crate::Error::IllegalState) before execution.
    pub fn has_negative_cycle(&self) -> Result<bool> {
        self.base.check_state_for_result("has_negative_cycle")?;
        Ok(self.negative_cycle)
    }

    fn run(&mut self, start: VertexId) -> ControlFlow<()> {
        let limit = self.base.subgraph_vertices().count().saturating_sub(1);
        self.paths.distance.mark(start, 0.0);
        self.queue.push_back(start);
        self.queued.mark(start, ());

        while let Some(vertex) = self.queue.pop_front() {
            self.queued.remove_mark(vertex);
            let distance = self.paths.distance_of(vertex);
            for incidence in self.base.traversable_incidences(vertex) {
                let next = incidence.that;
                let candidate = distance + self.weights.weight(incidence.edge);
                if candidate >= self.paths.distance_of(next) {
                    continue;
                }
                self.paths.improve(next, candidate, incidence.edge);
                if self.queued.try_mark(next) {
                    let pushes = self.pushes.get_mark_or(next, 0) + 1;
                    self.pushes.mark(next, pushes);
                    if pushes as usize > limit {
                        self.negative_cycle = true;
                        tracing::warn!(vertex = %next, "negative cycle detected");
                        return ControlFlow::Break(());
                    }
                    self.queue.push_back(next);
                }
            }
        }
        ControlFlow::Continue(())
    }
}

impl<'g, G: Graph> GraphAlgorithm<'g, G> for FordMooreSearch<'g, G> {
    fn base(&self) -> &AlgorithmBase<'g, G> {
        &self.base
    }

    fn base_mut(&mut self) -> &mut AlgorithmBase<'g, G> {
        &mut self.base
    }

    fn reset(&mut self) {
        self.paths.clear();
        self.queue.clear();
        self.queued.clear();
        self.pushes.clear();
        self.negative_cycle = false;
        self.base.reset_state();
    }
}

impl<'g, G: Graph> WeightedAlgorithm<'g, G> for FordMooreSearch<'g, G> {
    fn edge_weights(&self) -> &EdgeWeights<'g> {
        &self.weights
    }

    fn edge_weights_mut(&mut self) -> &mut EdgeWeights<'g> {
        &mut self.weights
    }
}

impl<'g, G: Graph> ShortestPathAlgorithm<'g, G> for FordMooreSearch<'g, G> {
    fn path_state(&self) -> &PathState {
        &self.paths
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::AlgorithmState;
    use crate::graph::{EdgeId, TGraph};

    #[test]
    fn negative_edges_without_cycle() {
        // 0->1 4, 0->2 2, 2->1 -3, 1->3 1
        let graph = TGraph::from_edges(4, &[(0, 1), (0, 2), (2, 1), (1, 3)]).unwrap();
        let weights = [4.0, 2.0, -3.0, 1.0];
        let mut ford_moore = FordMooreSearch::new(&graph);
        ford_moore
            .set_edge_weight(move |edge: EdgeId| weights[edge.index()])
            .unwrap()
            .execute_from(VertexId::new(0))
            .unwrap();

        assert!(!ford_moore.has_negative_cycle().unwrap());
        assert_eq!(ford_moore.state(), AlgorithmState::Finished);
        assert_eq!(ford_moore.distance_to(VertexId::new(1)).unwrap(), -1.0);
        assert_eq!(ford_moore.distance_to(VertexId::new(3)).unwrap(), 0.0);
        assert_eq!(
            ford_moore.path_to(VertexId::new(3)).unwrap(),
            Some(vec![EdgeId::new(1), EdgeId::new(2), EdgeId::new(3)])
        );
    }

    #[test]
    fn detects_reachable_negative_cycle() {
        let graph = TGraph::from_edges(3, &[(0, 1), (1, 2), (2, 1)]).unwrap();
        let weights = [1.0, -2.0, 1.0];
        let mut ford_moore = FordMooreSearch::new(&graph);
        ford_moore.set_edge_weight(move |edge: EdgeId| weights[edge.index()]).unwrap();
        ford_moore.execute_from(VertexId::new(0)).unwrap();

        assert!(ford_moore.has_negative_cycle().unwrap());
        assert_eq!(ford_moore.state(), AlgorithmState::Terminated);
    }

    #[test]
    fn negative_self_loop_on_a_single_vertex() {
        let graph = TGraph::from_edges(1, &[(0, 0)]).unwrap();
        let mut ford_moore = FordMooreSearch::new(&graph);
        ford_moore.set_edge_weight(|_: EdgeId| -1.0).unwrap();
        ford_moore.execute_from(VertexId::new(0)).unwrap();
        assert!(ford_moore.has_negative_cycle().unwrap());
    }

    #[test]
    fn unreachable_cycle_is_ignored() {
        let graph = TGraph::from_edges(3, &[(0, 1), (2, 2)]).unwrap();
        let mut ford_moore = FordMooreSearch::new(&graph);
        ford_moore.set_edge_weight(|_: EdgeId| -1.0).unwrap();
        ford_moore.execute_from(VertexId::new(0)).unwrap();
        assert!(!ford_moore.has_negative_cycle().unwrap());
        assert_eq!(ford_moore.distance_to(VertexId::new(1)).unwrap(), -1.0);
        assert_eq!(ford_moore.distance_to(VertexId::new(2)).unwrap(), f64::INFINITY);
    }
}
