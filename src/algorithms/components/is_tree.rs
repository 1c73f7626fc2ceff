//! `IsTree`: tree test through an undirected BFS sweep.

use core::ops::ControlFlow;
use std::cell::RefCell;
use std::rc::Rc;

use crate::algorithms::search::{BreadthFirstSearch, SearchAlgorithm, SearchState};
use crate::algorithms::{AlgorithmBase, AlgorithmKind, GraphAlgorithm};
use crate::error::Result;
use crate::graph::{Direction, Graph, Incidence, VertexId};
use crate::visitors::{GraphVisitor, SearchVisitor, Visitor};

#[derive(Debug, Default)]
struct FrondDetector {
    roots: usize,
    fronds: usize,
}

impl Visitor for FrondDetector {
    fn reset(&mut self) {
        self.roots = 0;
        self.fronds = 0;
    }
}

impl GraphVisitor for FrondDetector {}

impl SearchVisitor for FrondDetector {
    fn visit_root(&mut self, _vertex: VertexId) -> ControlFlow<()> {
        self.roots += 1;
        ControlFlow::Continue(())
    }

    fn visit_frond(&mut self, _edge: Incidence) -> ControlFlow<()> {
        self.fronds += 1;
        ControlFlow::Break(())
    }
}

/// Decides whether the (sub)graph, with edge direction ignored, is a tree.
///
/// The sweep stops at the first frond: a frond closes a cycle, so the graph
/// cannot be a forest. Without fronds the graph is a tree iff it has at most
/// one component.
#[derive(Debug)]
pub struct IsTree<'g, G> {
    bfs: BreadthFirstSearch<'g, G>,
    detector: Rc<RefCell<FrondDetector>>,
}

impl<'g, G: Graph> IsTree<'g, G> {
    /// Creates the test for `graph`.
    pub fn new(graph: &'g G) -> Self {
        let detector = Rc::new(RefCell::new(FrondDetector::default()));
        let mut bfs = BreadthFirstSearch::with_kind(graph, AlgorithmKind::IsTree, Direction::InOut);
        bfs.register(detector.clone());
        Self { bfs, detector }
    }

    /// Runs the test.
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

    /// `true` iff no frond was seen and there is at most one component.
    ///
    /// # Errors
    /// [`Error::IllegalState`](crate::Error::IllegalState) before execution.
    pub fn is_tree(&self) -> Result<bool> {
        self.base().check_state_for_result("is_tree")?;
        let detector = self.detector.borrow();
        Ok(detector.fronds == 0 && detector.roots <= 1)
    }

    /// Number of fronds seen before the sweep stopped (0 or 1).
    ///
    /// # Errors
    /// [`Error::IllegalState`](crate::Error::IllegalState) before execution.
    pub fn frond_count(&self) -> Result<usize> {
        self.base().check_state_for_result("frond_count")?;
        Ok(self.detector.borrow().fronds)
    }

    /// Number of search roots seen before the sweep stopped.
    ///
    /// # Errors
    /// [`Error::IllegalState`](crate::Error::IllegalState) before execution.
    pub fn root_count(&self) -> Result<usize> {
        self.base().check_state_for_result("root_count")?;
        Ok(self.detector.borrow().roots)
    }
}

impl<'g, G: Graph> GraphAlgorithm<'g, G> for IsTree<'g, G> {
    fn base(&self) -> &AlgorithmBase<'g, G> {
        self.bfs.base()
    }

    fn base_mut(&mut self) -> &mut AlgorithmBase<'g, G> {
        self.bfs.base_mut()
    }

    fn reset(&mut self) {
        self.bfs.reset();
    }

    fn is_direction_supported(&self, direction: Direction) -> bool {
        direction == Direction::InOut
    }
}

impl<'g, G: Graph> SearchAlgorithm<'g, G> for IsTree<'g, G> {
    fn search_state(&self) -> &SearchState {
        self.bfs.search_state()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::AlgorithmState;
    use crate::graph::TGraph;

    #[test]
    fn path_is_a_tree() {
        let mut graph = TGraph::from_edges(4, &[(0, 1), (2, 1), (2, 3)]).unwrap();
        {
            let mut test = IsTree::new(&graph);
            test.execute().unwrap();
            assert!(test.is_tree().unwrap());
            assert_eq!(test.frond_count().unwrap(), 0);
            assert_eq!(test.state(), AlgorithmState::Finished);
        }

        graph.add_edge(VertexId::new(3), VertexId::new(0)).unwrap();
        let mut test = IsTree::new(&graph);
        test.execute().unwrap();
        assert!(!test.is_tree().unwrap());
        assert_eq!(test.frond_count().unwrap(), 1);
        assert_eq!(test.state(), AlgorithmState::Terminated);
    }

    #[test]
    fn forest_is_not_a_tree() {
        let graph = TGraph::from_edges(3, &[(0, 1)]).unwrap();
        let mut test = IsTree::new(&graph);
        test.execute().unwrap();
        assert!(!test.is_tree().unwrap());
        assert_eq!(test.root_count().unwrap(), 2);
    }

    #[test]
    fn self_loop_and_parallel_edges_are_fronds() {
        for edges in [&[(0, 0)][..], &[(0, 1), (1, 0)][..]] {
            let graph = TGraph::from_edges(2, edges).unwrap();
            let mut test = IsTree::new(&graph);
            test.execute().unwrap();
            assert!(!test.is_tree().unwrap());
        }
    }

    #[test]
    fn empty_graph_is_a_tree() {
        let graph = TGraph::new();
        let mut test = IsTree::new(&graph);
        test.execute().unwrap();
        assert!(test.is_tree().unwrap());
    }
}
