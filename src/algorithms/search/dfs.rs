//! `DepthFirstSearch` with an explicit stack.
//!
//! Besides the search events shared with BFS, every frond is classified by
//! discovery and finish numbers:
//! - target not finished yet: backward arc (self loops included);
//! - target finished and discovered after the current vertex: forward arc;
//! - otherwise: crosslink.
//!
//! When all edges of a vertex are processed `leave_vertex` fires, followed by
//! `leave_tree_edge` for the tree edge it was discovered through.

use core::ops::ControlFlow;
use std::cell::RefCell;
use std::rc::Rc;

use crate::algorithms::{AlgorithmBase, AlgorithmKind, GraphAlgorithm};
use crate::error::Result;
use crate::graph::{Direction, Graph, Incidence, VertexId};
use crate::markers::{IntegerVertexMarker, Marker};
use crate::visitors::{DfsVisitor, VisitorList};

use super::{SearchAlgorithm, SearchState};

#[derive(Debug)]
struct Frame {
    vertex: VertexId,
    via: Option<Incidence>,
    incidences: Vec<Incidence>,
    cursor: usize,
}

/// Depth-first search over a graph or subgraph.
#[derive(Debug)]
pub struct DepthFirstSearch<'g, G> {
    base: AlgorithmBase<'g, G>,
    search: SearchState,
    rnumber: IntegerVertexMarker,
    rorder: Vec<VertexId>,
    stack: Vec<Frame>,
    visitors: VisitorList<dyn DfsVisitor>,
}

impl<'g, G: Graph> DepthFirstSearch<'g, G> {
    /// Creates a search following outgoing edges.
    pub fn new(graph: &'g G) -> Self {
        Self::with_kind(graph, AlgorithmKind::DepthFirstSearch, Direction::Out)
    }

    pub(crate) fn with_kind(graph: &'g G, kind: AlgorithmKind, direction: Direction) -> Self {
        Self {
            base: AlgorithmBase::new(graph, kind, direction),
            search: SearchState::new(graph),
            rnumber: Marker::new(graph),
            rorder: Vec::new(),
            stack: Vec::new(),
            visitors: VisitorList::new(),
        }
    }

    /// Registers `visitor` for the following runs.
    ///
    /// # Errors
    /// [`Error::IllegalState`](crate::Error::IllegalState) while running;
    /// whatever the visitor's `set_algorithm` returns.
    pub fn add_visitor(&mut self, visitor: Rc<RefCell<dyn DfsVisitor>>) -> Result<()> {
        self.base.check_state_for_setting_visitors("add_visitor")?;
        visitor.borrow_mut().set_algorithm(self.base.kind())?;
        self.visitors.add(visitor);
        Ok(())
    }

    /// Registration for visitors owned by a wrapping algorithm.
    pub(crate) fn register(&mut self, visitor: Rc<RefCell<dyn DfsVisitor>>) {
        self.visitors.add(visitor);
    }

    /// Unregisters `visitor`. Returns `true` if it was registered.
    ///
    /// # Errors
    /// [`Error::IllegalState`](crate::Error::IllegalState) while running.
    pub fn remove_visitor(&mut self, visitor: &Rc<RefCell<dyn DfsVisitor>>) -> Result<bool> {
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

    /// Finish number of every finished vertex, starting at 0.
    ///
    /// # Errors
    /// [`Error::IllegalState`](crate::Error::IllegalState) before the search
    /// has finished.
    pub fn rnumber(&self) -> Result<&IntegerVertexMarker> {
        self.base.check_state_for_result("rnumber")?;
        Ok(&self.rnumber)
    }

    /// Vertices in finish order.
    ///
    /// # Errors
    /// [`Error::IllegalState`](crate::Error::IllegalState) before the search
    /// has finished.
    pub fn rorder(&self) -> Result<&[VertexId]> {
        self.base.check_state_for_result("rorder")?;
        Ok(&self.rorder)
    }

    pub(crate) fn finish_order(&self) -> &[VertexId] {
        &self.rorder
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

    fn enter(&mut self, vertex: VertexId, via: Option<Incidence>) {
        self.search.discover(vertex, via.map(|incidence| incidence.edge));
        let incidences = self.base.traversable_incidences(vertex).collect();
        self.stack.push(Frame {
            vertex,
            via,
            incidences,
            cursor: 0,
        });
    }

    fn classify_frond(&mut self, incidence: Incidence) -> ControlFlow<()> {
        let target = incidence.that;
        if !self.rnumber.is_marked(target) {
            self.visitors.fire(|v| v.visit_backward_arc(incidence))
        } else if self.search.number.get_mark(target) > self.search.number.get_mark(incidence.this) {
            self.visitors.fire(|v| v.visit_forward_arc(incidence))
        } else {
            self.visitors.fire(|v| v.visit_crosslink(incidence))
        }
    }

    fn search_from(&mut self, root: VertexId) -> ControlFlow<()> {
        tracing::trace!(%root, "depth-first search from new root");
        self.enter(root, None);
        self.visitors.fire(|v| v.visit_root(root))?;
        self.visitors.fire(|v| v.visit_vertex(root))?;

        while let Some(frame) = self.stack.last_mut() {
            let Some(&incidence) = frame.incidences.get(frame.cursor) else {
                let (vertex, via) = (frame.vertex, frame.via);
                self.stack.pop();
                self.rnumber.mark(vertex, self.rorder.len() as i32);
                self.rorder.push(vertex);
                self.visitors.fire(|v| v.leave_vertex(vertex))?;
                if let Some(tree_edge) = via {
                    self.visitors.fire(|v| v.leave_tree_edge(tree_edge))?;
                }
                continue;
            };
            frame.cursor += 1;

            if !self.search.take_edge(incidence.edge) {
                continue;
            }
            self.visitors.fire(|v| v.visit_edge(incidence))?;
            let target = incidence.that;
            if self.search.is_visited(target) {
                self.visitors.fire(|v| v.visit_frond(incidence))?;
                self.classify_frond(incidence)?;
            } else {
                self.enter(target, Some(incidence));
                self.visitors.fire(|v| v.visit_tree_edge(incidence))?;
                self.visitors.fire(|v| v.visit_vertex(target))?;
            }
        }
        ControlFlow::Continue(())
    }
}

impl<'g, G: Graph> GraphAlgorithm<'g, G> for DepthFirstSearch<'g, G> {
    fn base(&self) -> &AlgorithmBase<'g, G> {
        &self.base
    }

    fn base_mut(&mut self) -> &mut AlgorithmBase<'g, G> {
        &mut self.base
    }

    fn reset(&mut self) {
        self.search.clear();
        self.rnumber.clear();
        self.rorder.clear();
        self.stack.clear();
        self.visitors.reset_all();
        self.base.reset_state();
    }
}

impl<'g, G: Graph> SearchAlgorithm<'g, G> for DepthFirstSearch<'g, G> {
    fn search_state(&self) -> &SearchState {
        &self.search
    }
}
