//! `BreadthFirstSearch` with visitor events and levels.
//!
//! Event order:
//! - a root fires `visit_root`, then `visit_vertex`;
//! - every edge fires `visit_edge`, then either `visit_tree_edge` followed by
//!   `visit_vertex` for the newly discovered vertex, or `visit_frond`.

use core::ops::ControlFlow;
use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::algorithms::{AlgorithmBase, AlgorithmKind, GraphAlgorithm};
use crate::error::Result;
use crate::graph::{Direction, Graph, VertexId};
use crate::markers::{IntegerVertexMarker, Marker};
use crate::visitors::{SearchVisitor, VisitorList};

use super::{SearchAlgorithm, SearchState};

/// Breadth-first search over a graph or subgraph.
///
/// ### Performance Characteristics
/// | Operation | Complexity | Notes |
/// |-----------|------------|-------|
/// | `execute` | \(O(V + E)\) | Sweeps every vertex of the subgraph |
/// | `execute_from` | \(O(V_r + E_r)\) | Reachable part only |
/// | `reset` | \(O(V + E)\) | Clears markers |
#[derive(Debug)]
pub struct BreadthFirstSearch<'g, G> {
    base: AlgorithmBase<'g, G>,
    search: SearchState,
    level: IntegerVertexMarker,
    queue: VecDeque<VertexId>,
    visitors: VisitorList<dyn SearchVisitor>,
}

impl<'g, G: Graph> BreadthFirstSearch<'g, G> {
    /// Creates a search following outgoing edges.
    pub fn new(graph: &'g G) -> Self {
        Self::with_kind(graph, AlgorithmKind::BreadthFirstSearch, Direction::Out)
    }

    pub(crate) fn with_kind(graph: &'g G, kind: AlgorithmKind, direction: Direction) -> Self {
        Self {
            base: AlgorithmBase::new(graph, kind, direction),
            search: SearchState::new(graph),
            level: Marker::new(graph),
            queue: VecDeque::new(),
            visitors: VisitorList::new(),
        }
    }

    /// Registers `visitor` for the following runs.
    ///
    /// # Errors
    /// [`Error::IllegalState`](crate::Error::IllegalState) while running;
    /// whatever the visitor's `set_algorithm` returns.
    pub fn add_visitor(&mut self, visitor: Rc<RefCell<dyn SearchVisitor>>) -> Result<()> {
        self.base.check_state_for_setting_visitors("add_visitor")?;
        visitor.borrow_mut().set_algorithm(self.base.kind())?;
        self.visitors.add(visitor);
        Ok(())
    }

    /// Registration for visitors owned by a wrapping algorithm.
    pub(crate) fn register(&mut self, visitor: Rc<RefCell<dyn SearchVisitor>>) {
        self.visitors.add(visitor);
    }

    /// Unregisters `visitor`. Returns `true` if it was registered.
    ///
    /// # Errors
    /// [`Error::IllegalState`](crate::Error::IllegalState) while running.
    pub fn remove_visitor(&mut self, visitor: &Rc<RefCell<dyn SearchVisitor>>) -> Result<bool> {
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

    /// Searches the whole subgraph, starting a new tree at every vertex not
    /// reached from an earlier root.
    ///
    /// # Errors
    /// [`Error::IllegalState`](crate::Error::IllegalState) unless `Pristine`
    /// or `ParamsSet`.
    pub fn execute(&mut self) -> Result<&mut Self> {
        self.start_running()?;
        let flow = self.sweep();
        self.base.finish(flow);
        Ok(self)
    }

    /// Searches the tree rooted at `root`.
    ///
    /// # Errors
    /// [`Error::InvalidArgument`](crate::Error::InvalidArgument) if `root` is
    /// not a vertex of the subgraph;
    /// [`Error::IllegalState`](crate::Error::IllegalState) unless `Pristine`
    /// or `ParamsSet`.
    pub fn execute_from(&mut self, root: VertexId) -> Result<&mut Self> {
        self.base.check_vertex(root, "root")?;
        self.start_running()?;
        let flow = self.search_from(root);
        self.base.finish(flow);
        Ok(self)
    }

    /// Distance in edges from the root of each visited vertex's tree.
    ///
    /// # Errors
    /// [`Error::IllegalState`](crate::Error::IllegalState) before the search
    /// has finished.
    pub fn level(&self) -> Result<&IntegerVertexMarker> {
        self.base.check_state_for_result("level")?;
        Ok(&self.level)
    }

    pub(crate) fn sweep(&mut self) -> ControlFlow<()> {
        let vertices: Vec<VertexId> = self.base.subgraph_vertices().collect();
        for vertex in vertices {
            if !self.search.is_visited(vertex) {
                self.search_from(vertex)?;
            }
        }
        ControlFlow::Continue(())
    }

    fn search_from(&mut self, root: VertexId) -> ControlFlow<()> {
        tracing::trace!(%root, "breadth-first search from new root");
        self.search.discover(root, None);
        self.level.mark(root, 0);
        self.visitors.fire(|v| v.visit_root(root))?;
        self.visitors.fire(|v| v.visit_vertex(root))?;
        self.queue.push_back(root);

        while let Some(vertex) = self.queue.pop_front() {
            let next_level = self.level.get_mark_or(vertex, 0) + 1;
            for incidence in self.base.traversable_incidences(vertex) {
                if !self.search.take_edge(incidence.edge) {
                    continue;
                }
                self.visitors.fire(|v| v.visit_edge(incidence))?;
                let target = incidence.that;
                if self.search.is_visited(target) {
                    self.visitors.fire(|v| v.visit_frond(incidence))?;
                } else {
                    self.search.discover(target, Some(incidence.edge));
                    self.level.mark(target, next_level);
                    self.queue.push_back(target);
                    self.visitors.fire(|v| v.visit_tree_edge(incidence))?;
                    self.visitors.fire(|v| v.visit_vertex(target))?;
                }
            }
        }
        ControlFlow::Continue(())
    }
}

impl<'g, G: Graph> GraphAlgorithm<'g, G> for BreadthFirstSearch<'g, G> {
    fn base(&self) -> &AlgorithmBase<'g, G> {
        &self.base
    }

    fn base_mut(&mut self) -> &mut AlgorithmBase<'g, G> {
        &mut self.base
    }

    fn reset(&mut self) {
        self.search.clear();
        self.level.clear();
        self.queue.clear();
        self.visitors.reset_all();
        self.base.reset_state();
    }
}

impl<'g, G: Graph> SearchAlgorithm<'g, G> for BreadthFirstSearch<'g, G> {
    fn search_state(&self) -> &SearchState {
        &self.search
    }
}
