//! `AStarSearch`: single-pair shortest path guided by a heuristic.

use std::cell::RefCell;
use std::fmt;
use std::ops::ControlFlow;
use std::rc::Rc;

use crate::algorithms::{AlgorithmBase, AlgorithmKind, GraphAlgorithm};
use crate::collections::PriorityQueue;
use crate::error::Result;
use crate::functions::BinaryFunction;
use crate::graph::{Direction, Graph, VertexId};
use crate::markers::{BitSetVertexMarker, Marker};
use crate::visitors::{GraphVisitor, VisitorList};

use super::{EdgeWeights, PathState, ShortestPathAlgorithm, WeightedAlgorithm};

/// A* search from a start to a target vertex.
///
/// The queue is ordered by `distance(v) + heuristic(v, target)`. With an
/// admissible and consistent heuristic the distance of the target is optimal;
/// without a heuristic the search degenerates to Dijkstra's.
///
/// Popping the target ends the run as `Terminated`; if the target is
/// unreachable the queue drains and the run is `Finished`.
pub struct AStarSearch<'g, G> {
    base: AlgorithmBase<'g, G>,
    weights: EdgeWeights<'g>,
    heuristic: Option<Box<dyn BinaryFunction<VertexId, VertexId, f64> + 'g>>,
    paths: PathState,
    closed: BitSetVertexMarker,
    queue: PriorityQueue<f64>,
    visitors: VisitorList<dyn GraphVisitor>,
}

impl<'g, G: Graph> AStarSearch<'g, G> {
    /// Creates the search following outgoing edges.
    pub fn new(graph: &'g G) -> Self {
        Self {
            base: AlgorithmBase::new(graph, AlgorithmKind::AStar, Direction::Out),
            weights: EdgeWeights::default(),
            heuristic: None,
            paths: PathState::new(graph),
            closed: Marker::new(graph),
            queue: PriorityQueue::with_capacity(graph.max_vertex_count()),
            visitors: VisitorList::new(),
        }
    }

    /// Uses `heuristic(v, target)` as the estimated remaining distance.
    /// Undefined estimates count as `0`.
    ///
    /// # Errors
    /// [`Error::IllegalState`](crate::Error::IllegalState) unless `Pristine`
    /// or `ParamsSet`.
    pub fn set_heuristic(
        &mut self,
        heuristic: impl BinaryFunction<VertexId, VertexId, f64> + 'g,
    ) -> Result<&mut Self> {
        self.base.check_state_for_setting_parameters("set_heuristic")?;
        self.heuristic = Some(Box::new(heuristic));
        self.base.params_set();
        Ok(self)
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

    /// Searches a shortest path from `start` to `target`.
    ///
    /// # Errors
    /// [`Error::InvalidArgument`](crate::Error::InvalidArgument) if `start` or
    /// `target` is not a vertex of the subgraph;
    /// [`Error::IllegalState`](crate::Error::IllegalState) unless `Pristine`
    /// or `ParamsSet`.
    pub fn execute(&mut self, start: VertexId, target: VertexId) -> Result<&mut Self> {
        self.base.check_vertex(start, "start")?;
        self.base.check_vertex(target, "target")?;
        self.start_running()?;
        let flow = self.run(start, target);
        self.base.finish(flow);
        Ok(self)
    }

    /// Vertices removed from the open queue.
    ///
    /// # Errors
    /// [`Error::IllegalState`](crate::Error::IllegalState) before execution.
    pub fn closed(&self) -> Result<&BitSetVertexMarker> {
        self.base.check_state_for_result("closed")?;
        Ok(&self.closed)
    }

    fn estimate(&self, vertex: VertexId, target: VertexId) -> f64 {
        self.heuristic
            .as_ref()
            .and_then(|heuristic| heuristic.get(vertex, target))
            .unwrap_or(0.0)
    }

    fn run(&mut self, start: VertexId, target: VertexId) -> ControlFlow<()> {
        self.paths.distance.mark(start, 0.0);
        self.queue.push_or_decrease(start.index(), self.estimate(start, target));

        while let Some((index, _)) = self.queue.pop() {
            let vertex = VertexId::new(index);
            self.closed.mark(vertex, ());
            self.visitors.fire(|v| v.visit_vertex(vertex))?;
            if vertex == target {
                return ControlFlow::Break(());
            }

            let distance = self.paths.distance_of(vertex);
            for incidence in self.base.traversable_incidences(vertex) {
                let next = incidence.that;
                if self.closed.is_marked(next) {
                    continue;
                }
                self.visitors.fire(|v| v.visit_edge(incidence))?;
                let candidate = distance + self.weights.weight(incidence.edge);
                if candidate < self.paths.distance_of(next) {
                    self.paths.improve(next, candidate, incidence.edge);
                    let priority = candidate + self.estimate(next, target);
                    self.queue.push_or_decrease(next.index(), priority);
                }
            }
        }
        ControlFlow::Continue(())
    }
}

impl<G> fmt::Debug for AStarSearch<'_, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AStarSearch")
            .field("base", &self.base)
            .field("weights", &self.weights)
            .field("heuristic", &self.heuristic.is_some())
            .field("paths", &self.paths)
            .field("queue", &self.queue)
            .finish_non_exhaustive()
    }
}

impl<'g, G: Graph> GraphAlgorithm<'g, G> for AStarSearch<'g, G> {
    fn base(&self) -> &AlgorithmBase<'g, G> {
        &self.base
    }

    fn base_mut(&mut self) -> &mut AlgorithmBase<'g, G> {
        &mut self.base
    }

    fn reset(&mut self) {
        self.paths.clear();
        self.closed.clear();
        self.queue.clear();
        self.visitors.reset_all();
        self.base.reset_state();
    }
}

impl<'g, G: Graph> WeightedAlgorithm<'g, G> for AStarSearch<'g, G> {
    fn edge_weights(&self) -> &EdgeWeights<'g> {
        &self.weights
    }

    fn edge_weights_mut(&mut self) -> &mut EdgeWeights<'g> {
        &mut self.weights
    }
}

impl<'g, G: Graph> ShortestPathAlgorithm<'g, G> for AStarSearch<'g, G> {
    fn path_state(&self) -> &PathState {
        &self.paths
    }
}
