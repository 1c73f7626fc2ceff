//! Observer protocol for traversals.
//!
//! A visitor implements only the capability traits for the events it cares
//! about; every event method has a no-op default. Events return
//! [`ControlFlow`]: `Break(())` asks the running algorithm to stop after the
//! current event, which it reports as [`AlgorithmState::Terminated`].
//!
//! Capabilities, from general to specific:
//! - [`Visitor`]: lifecycle hooks
//! - [`GraphVisitor`]: vertices and edges
//! - [`SearchVisitor`]: roots, tree edges and fronds
//! - [`DfsVisitor`]: arc classification and post-order events
//!
//! [`VisitorList`] and [`VisitorSet`] fan one event out to many observers.
//!
//! [`AlgorithmState::Terminated`]: crate::algorithms::AlgorithmState::Terminated

pub mod list;

use core::ops::ControlFlow;

use crate::algorithms::AlgorithmKind;
use crate::error::Result;
use crate::graph::{Incidence, VertexId};

pub use list::{VisitorList, VisitorSet};

/// Lifecycle hooks shared by every visitor.
pub trait Visitor {
    /// Clears state accumulated during a previous run.
    fn reset(&mut self) {}

    /// Binds the visitor to the algorithm it is registered with.
    ///
    /// # Errors
    /// A visitor that only works with specific algorithms returns
    /// [`Error::IncompatibleAlgorithm`](crate::Error::IncompatibleAlgorithm).
    fn set_algorithm(&mut self, _algorithm: AlgorithmKind) -> Result<()> {
        Ok(())
    }
}

/// Observes vertices and edges, each at most once per run.
pub trait GraphVisitor: Visitor {
    /// A vertex was reached.
    fn visit_vertex(&mut self, _vertex: VertexId) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }

    /// An edge was examined, seen from the vertex it was reached through.
    fn visit_edge(&mut self, _edge: Incidence) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }
}

/// Observes the forest built by a search.
pub trait SearchVisitor: GraphVisitor {
    /// A new search tree starts at `vertex`.
    fn visit_root(&mut self, _vertex: VertexId) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }

    /// `edge` discovered its far vertex.
    fn visit_tree_edge(&mut self, _edge: Incidence) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }

    /// `edge` leads to an already visited vertex.
    fn visit_frond(&mut self, _edge: Incidence) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }
}

/// Depth-first specific events.
///
/// Every frond is additionally classified as exactly one of forward arc,
/// backward arc or crosslink.
pub trait DfsVisitor: SearchVisitor {
    /// Frond to an already finished descendant.
    fn visit_forward_arc(&mut self, _edge: Incidence) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }

    /// Frond to an unfinished ancestor (or a self loop).
    fn visit_backward_arc(&mut self, _edge: Incidence) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }

    /// Frond to a finished vertex outside the current subtree.
    fn visit_crosslink(&mut self, _edge: Incidence) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }

    /// All edges of `vertex` have been processed.
    fn leave_vertex(&mut self, _vertex: VertexId) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }

    /// The subtree below tree edge `edge` is finished.
    fn leave_tree_edge(&mut self, _edge: Incidence) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::graph::EdgeId;

    struct Silent;
    impl Visitor for Silent {}
    impl GraphVisitor for Silent {}
    impl SearchVisitor for Silent {}
    impl DfsVisitor for Silent {}

    struct DijkstraOnly;
    impl Visitor for DijkstraOnly {
        fn set_algorithm(&mut self, algorithm: AlgorithmKind) -> Result<()> {
            match algorithm {
                AlgorithmKind::Dijkstra => Ok(()),
                other => Err(Error::IncompatibleAlgorithm {
                    visitor: "DijkstraOnly",
                    algorithm: other,
                }),
            }
        }
    }

    #[test]
    fn defaults_continue() {
        let mut visitor = Silent;
        let inc = Incidence {
            edge: EdgeId::new(0),
            this: VertexId::new(0),
            that: VertexId::new(1),
            outgoing: true,
        };
        assert!(visitor.visit_vertex(VertexId::new(0)).is_continue());
        assert!(visitor.visit_frond(inc).is_continue());
        assert!(visitor.visit_crosslink(inc).is_continue());
        assert!(visitor.leave_tree_edge(inc).is_continue());
        assert!(visitor.set_algorithm(AlgorithmKind::FordMoore).is_ok());
    }

    #[test]
    fn visitors_may_reject_algorithms() {
        let mut visitor = DijkstraOnly;
        assert!(visitor.set_algorithm(AlgorithmKind::Dijkstra).is_ok());
        assert!(matches!(
            visitor.set_algorithm(AlgorithmKind::BreadthFirstSearch),
            Err(Error::IncompatibleAlgorithm { .. })
        ));
    }
}
