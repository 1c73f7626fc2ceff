//! `TopologicalOrderWithDfs`: reverse finish order of a DFS sweep.

use core::ops::ControlFlow;
use std::cell::RefCell;
use std::rc::Rc;

use crate::algorithms::search::{DepthFirstSearch, SearchAlgorithm, SearchState};
use crate::algorithms::{AlgorithmBase, AlgorithmKind, GraphAlgorithm};
use crate::error::Result;
use crate::graph::{Direction, Graph, Incidence, VertexId};
use crate::visitors::{DfsVisitor, GraphVisitor, SearchVisitor, Visitor};

#[derive(Debug, Default)]
struct CycleDetector {
    backward_arc: Option<Incidence>,
}

impl Visitor for CycleDetector {
    fn reset(&mut self) {
        self.backward_arc = None;
    }
}

impl GraphVisitor for CycleDetector {}
impl SearchVisitor for CycleDetector {}

impl DfsVisitor for CycleDetector {
    fn visit_backward_arc(&mut self, edge: Incidence) -> ControlFlow<()> {
        self.backward_arc = Some(edge);
        ControlFlow::Break(())
    }
}

/// Topological order of a directed acyclic (sub)graph.
///
/// Follows outgoing edges only. The first backward arc proves a cycle and
/// terminates the search.
#[derive(Debug)]
pub struct TopologicalOrderWithDfs<'g, G> {
    dfs: DepthFirstSearch<'g, G>,
    detector: Rc<RefCell<CycleDetector>>,
    order: Vec<VertexId>,
}

impl<'g, G: Graph> TopologicalOrderWithDfs<'g, G> {
    /// Creates the algorithm for `graph`.
    pub fn new(graph: &'g G) -> Self {
        let detector = Rc::new(RefCell::new(CycleDetector::default()));
        let mut dfs = DepthFirstSearch::with_kind(graph, AlgorithmKind::TopologicalOrder, Direction::Out);
        dfs.register(detector.clone());
        Self {
            dfs,
            detector,
            order: Vec::new(),
        }
    }

    /// Computes the order.
    ///
    /// # Errors
    /// [`Error::IllegalState`](crate::Error::IllegalState) unless `Pristine`
    /// or `ParamsSet`.
    pub fn execute(&mut self) -> Result<&mut Self> {
        self.start_running()?;
        let flow = self.dfs.sweep();
        if flow.is_continue() {
            self.order = self.dfs.finish_order().iter().rev().copied().collect();
        }
        self.dfs.base_mut().finish(flow);
        Ok(self)
    }

    /// `false` iff a cycle was found.
    ///
    /// # Errors
    /// [`Error::IllegalState`](crate::Error::IllegalState) before execution.
    pub fn is_acyclic(&self) -> Result<bool> {
        self.base().check_state_for_result("is_acyclic")?;
        Ok(self.detector.borrow().backward_arc.is_none())
    }

    /// An edge closing a cycle, if one was found.
    ///
    /// # Errors
    /// [`Error::IllegalState`](crate::Error::IllegalState) before execution.
    pub fn cycle_edge(&self) -> Result<Option<Incidence>> {
        self.base().check_state_for_result("cycle_edge")?;
        Ok(self.detector.borrow().backward_arc)
    }

    /// Vertices such that every edge leads forward; `None` for cyclic graphs.
    ///
    /// # Errors
    /// [`Error::IllegalState`](crate::Error::IllegalState) before execution.
    pub fn topological_order(&self) -> Result<Option<&[VertexId]>> {
        Ok(self.is_acyclic()?.then_some(self.order.as_slice()))
    }
}

impl<'g, G: Graph> GraphAlgorithm<'g, G> for TopologicalOrderWithDfs<'g, G> {
    fn base(&self) -> &AlgorithmBase<'g, G> {
        self.dfs.base()
    }

    fn base_mut(&mut self) -> &mut AlgorithmBase<'g, G> {
        self.dfs.base_mut()
    }

    fn reset(&mut self) {
        self.order.clear();
        self.dfs.reset();
    }

    fn is_direction_supported(&self, direction: Direction) -> bool {
        direction == Direction::Out
    }
}

impl<'g, G: Graph> SearchAlgorithm<'g, G> for TopologicalOrderWithDfs<'g, G> {
    fn search_state(&self) -> &SearchState {
        self.dfs.search_state()
    }
}
