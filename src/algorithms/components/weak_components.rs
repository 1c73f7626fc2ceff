//! `WeakComponentsWithBfs`: connected components ignoring edge direction.

use core::ops::ControlFlow;
use std::cell::RefCell;
use std::rc::Rc;

use crate::algorithms::search::{BreadthFirstSearch, SearchAlgorithm, SearchState};
use crate::algorithms::{AlgorithmBase, AlgorithmKind, GraphAlgorithm};
use crate::error::Result;
use crate::graph::{Direction, Graph, VertexId};
use crate::markers::{ArrayVertexMarker, Marker};
use crate::visitors::{GraphVisitor, SearchVisitor, Visitor};

/// Counts roots and maps every vertex to the root of its tree.
#[derive(Debug)]
struct ComponentCollector {
    kappa: usize,
    root: Option<VertexId>,
    representatives: ArrayVertexMarker<VertexId>,
}

impl Visitor for ComponentCollector {
    fn reset(&mut self) {
        self.kappa = 0;
        self.root = None;
    }
}

impl GraphVisitor for ComponentCollector {
    fn visit_vertex(&mut self, vertex: VertexId) -> ControlFlow<()> {
        if let Some(root) = self.root {
            self.representatives.mark(vertex, root);
        }
        ControlFlow::Continue(())
    }
}

impl SearchVisitor for ComponentCollector {
    fn visit_root(&mut self, vertex: VertexId) -> ControlFlow<()> {
        self.kappa += 1;
        self.root = Some(vertex);
        ControlFlow::Continue(())
    }
}

/// Weakly connected components through an undirected BFS sweep.
///
/// Every BFS root starts a new component and becomes its representative.
/// Only [`Direction::InOut`] is supported.
#[derive(Debug)]
pub struct WeakComponentsWithBfs<'g, G> {
    bfs: BreadthFirstSearch<'g, G>,
    collector: Rc<RefCell<ComponentCollector>>,
    representatives: ArrayVertexMarker<VertexId>,
}

impl<'g, G: Graph> WeakComponentsWithBfs<'g, G> {
    /// Creates the algorithm for `graph`.
    pub fn new(graph: &'g G) -> Self {
        let representatives: ArrayVertexMarker<VertexId> = Marker::new(graph);
        let collector = Rc::new(RefCell::new(ComponentCollector {
            kappa: 0,
            root: None,
            representatives: representatives.share(),
        }));
        let mut bfs = BreadthFirstSearch::with_kind(graph, AlgorithmKind::WeakComponents, Direction::InOut);
        bfs.register(collector.clone());
        Self {
            bfs,
            collector,
            representatives,
        }
    }

    /// Registers an additional observer of the underlying BFS.
    ///
    /// # Errors
    /// See [`BreadthFirstSearch::add_visitor`].
    pub fn add_visitor(&mut self, visitor: Rc<RefCell<dyn SearchVisitor>>) -> Result<()> {
        self.bfs.add_visitor(visitor)
    }

    /// Unregisters an observer added with [`add_visitor`](Self::add_visitor).
    ///
    /// # Errors
    /// See [`BreadthFirstSearch::remove_visitor`].
    pub fn remove_visitor(&mut self, visitor: &Rc<RefCell<dyn SearchVisitor>>) -> Result<bool> {
        self.bfs.remove_visitor(visitor)
    }

    /// Unregisters every observer added with [`add_visitor`](Self::add_visitor).
    ///
    /// # Errors
    /// See [`BreadthFirstSearch::clear_visitors`].
    pub fn clear_visitors(&mut self) -> Result<()> {
        self.bfs.clear_visitors()?;
        self.bfs.register(self.collector.clone());
        Ok(())
    }

    /// Computes the components of the (sub)graph.
    ///
    /// # Errors
    /// [`Error::IllegalState`](crate::Error::IllegalState) unless `Pristine`
    /// or `ParamsSet`.
    pub fn execute(&mut self) -> Result<&mut Self> {
        self.start_running()?;
        let flow = self.bfs.sweep();
        self.bfs.base_mut().finish(flow);
        Ok(self)
    }

    /// The number of components, κ.
    ///
    /// # Errors
    /// [`Error::IllegalState`](crate::Error::IllegalState) before execution.
    pub fn kappa(&self) -> Result<usize> {
        self.base().check_state_for_result("kappa")?;
        Ok(self.collector.borrow().kappa)
    }

    /// Maps every vertex to the representative of its component.
    ///
    /// # Errors
    /// [`Error::IllegalState`](crate::Error::IllegalState) before execution.
    pub fn representatives(&self) -> Result<&ArrayVertexMarker<VertexId>> {
        self.base().check_state_for_result("representatives")?;
        Ok(&self.representatives)
    }

    /// The representative of `vertex`'s component.
    ///
    /// # Errors
    /// [`Error::IllegalState`](crate::Error::IllegalState) before execution.
    pub fn representative(&self, vertex: VertexId) -> Result<Option<VertexId>> {
        Ok(self.representatives()?.get_mark(vertex))
    }

    /// The underlying search, for its orders and tree parents.
    pub fn search(&self) -> &BreadthFirstSearch<'g, G> {
        &self.bfs
    }
}

impl<'g, G: Graph> GraphAlgorithm<'g, G> for WeakComponentsWithBfs<'g, G> {
    fn base(&self) -> &AlgorithmBase<'g, G> {
        self.bfs.base()
    }

    fn base_mut(&mut self) -> &mut AlgorithmBase<'g, G> {
        self.bfs.base_mut()
    }

    fn reset(&mut self) {
        self.representatives.clear();
        self.bfs.reset();
    }

    fn is_direction_supported(&self, direction: Direction) -> bool {
        direction == Direction::InOut
    }
}

impl<'g, G: Graph> SearchAlgorithm<'g, G> for WeakComponentsWithBfs<'g, G> {
    fn search_state(&self) -> &SearchState {
        self.bfs.search_state()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::graph::TGraph;

    #[test]
    fn counts_components_ignoring_direction() {
        // {0, 1, 2} via 0->1 and 2->1, {3}, {4, 5}
        let graph = TGraph::from_edges(6, &[(0, 1), (2, 1), (5, 4)]).unwrap();
        let mut components = WeakComponentsWithBfs::new(&graph);
        components.execute().unwrap();

        assert_eq!(components.kappa().unwrap(), 3);
        let rep = |v| components.representative(VertexId::new(v)).unwrap();
        assert_eq!(rep(2), Some(VertexId::new(0)));
        assert_eq!(rep(3), Some(VertexId::new(3)));
        assert_eq!(rep(5), rep(4));
        assert_ne!(rep(4), rep(0));
    }

    #[test]
    fn only_undirected_traversal() {
        let graph = TGraph::from_edges(1, &[]).unwrap();
        let mut components = WeakComponentsWithBfs::new(&graph);
        assert!(matches!(
            components.set_traversal_direction(Direction::Out),
            Err(Error::Unsupported(_))
        ));
        assert!(components.set_traversal_direction(Direction::InOut).is_ok());
    }

    #[test]
    fn reset_allows_rerun_on_a_changed_graph() {
        let graph = TGraph::from_edges(3, &[(0, 1)]).unwrap();
        let mut components = WeakComponentsWithBfs::new(&graph);
        assert!(components.kappa().is_err());
        components.execute().unwrap();
        assert_eq!(components.kappa().unwrap(), 2);

        components.reset();
        components.clear_visitors().unwrap();
        components.execute().unwrap();
        assert_eq!(components.kappa().unwrap(), 2);
        assert_eq!(components.representatives().unwrap().size(), 3);
    }
}
