//! `ReachabilityWithWarshall`: reflexive transitive closure.

use crate::algorithms::{AlgorithmBase, AlgorithmKind, GraphAlgorithm};
use crate::error::Result;
use crate::functions::{Relation, VertexMatrix};
use crate::graph::{Direction, EdgeId, Graph, VertexId};

use super::{empty_permutation, successor_path, vertex_permutation};

/// All-pairs reachability by Warshall's algorithm.
///
/// Every vertex reaches itself. The result is a [`Relation`] over vertex
/// pairs plus, for every reachable pair, the first edge of a path.
#[derive(Debug)]
pub struct ReachabilityWithWarshall<'g, G> {
    base: AlgorithmBase<'g, G>,
    reachable: VertexMatrix<bool>,
    successors: VertexMatrix<EdgeId>,
}

impl<'g, G: Graph> ReachabilityWithWarshall<'g, G> {
    /// Creates the algorithm following outgoing edges.
    pub fn new(graph: &'g G) -> Self {
        let permutation = empty_permutation();
        Self {
            base: AlgorithmBase::new(graph, AlgorithmKind::Warshall, Direction::Out),
            reachable: VertexMatrix::new(permutation.clone()),
            successors: VertexMatrix::new(permutation),
        }
    }

    /// Computes the closure.
    ///
    /// # Errors
    /// [`Error::IllegalState`](crate::Error::IllegalState) unless `Pristine`
    /// or `ParamsSet`.
    pub fn execute(&mut self) -> Result<&mut Self> {
        self.start_running()?;
        let permutation = vertex_permutation(&self.base)?;
        self.reachable = VertexMatrix::new(permutation.clone());
        self.successors = VertexMatrix::new(permutation.clone());

        for (row, vertex) in permutation.iter() {
            *self.reachable.cell_mut(row, row) = Some(true);
            for incidence in self.base.traversable_incidences(vertex) {
                let Some(col) = permutation.index_of(&incidence.that) else {
                    continue;
                };
                let cell = self.reachable.cell_mut(row, col);
                if cell.is_none() {
                    *cell = Some(true);
                    *self.successors.cell_mut(row, col) = Some(incidence.edge);
                }
            }
        }

        let n = permutation.len();
        for k in 0..n {
            for i in 0..n {
                if self.reachable.cell(i, k).is_none() {
                    continue;
                }
                let first = self.successors.cell(i, k).copied();
                for j in 0..n {
                    if self.reachable.cell(k, j).is_some() && self.reachable.cell(i, j).is_none() {
                        *self.reachable.cell_mut(i, j) = Some(true);
                        *self.successors.cell_mut(i, j) = first;
                    }
                }
            }
        }

        self.base.done();
        Ok(self)
    }

    /// The reachability relation.
    ///
    /// # Errors
    /// [`Error::IllegalState`](crate::Error::IllegalState) before execution.
    pub fn reachability(&self) -> Result<&VertexMatrix<bool>> {
        self.base.check_state_for_result("reachability")?;
        Ok(&self.reachable)
    }

    /// Returns `true` if `to` is reachable from `from`.
    ///
    /// # Errors
    /// [`Error::IllegalState`](crate::Error::IllegalState) before execution.
    pub fn is_reachable(&self, from: VertexId, to: VertexId) -> Result<bool> {
        Ok(self.reachability()?.get(from, to))
    }

    /// First edge of a path for every reachable pair.
    ///
    /// # Errors
    /// [`Error::IllegalState`](crate::Error::IllegalState) before execution.
    pub fn successors(&self) -> Result<&VertexMatrix<EdgeId>> {
        self.base.check_state_for_result("successors")?;
        Ok(&self.successors)
    }

    /// Edges of a path from `from` to `to`, `None` if unreachable.
    ///
    /// # Errors
    /// [`Error::IllegalState`](crate::Error::IllegalState) before execution.
    pub fn path(&self, from: VertexId, to: VertexId) -> Result<Option<Vec<EdgeId>>> {
        Ok(successor_path(self.base.graph(), self.successors()?, from, to))
    }
}

impl<'g, G: Graph> GraphAlgorithm<'g, G> for ReachabilityWithWarshall<'g, G> {
    fn base(&self) -> &AlgorithmBase<'g, G> {
        &self.base
    }

    fn base_mut(&mut self) -> &mut AlgorithmBase<'g, G> {
        &mut self.base
    }

    fn reset(&mut self) {
        let permutation = empty_permutation();
        self.reachable = VertexMatrix::new(permutation.clone());
        self.successors = VertexMatrix::new(permutation);
        self.base.reset_state();
    }
}
