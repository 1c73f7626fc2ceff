//! `FloydAlgorithm`: all-pairs shortest paths over dense matrices.

use std::ops::ControlFlow;
use std::rc::Rc;

use crate::algorithms::{AlgorithmBase, AlgorithmKind, GraphAlgorithm};
use crate::error::Result;
use crate::functions::{BinaryFunction, Permutation, VertexMatrix};
use crate::graph::{Direction, EdgeId, Graph, VertexId};

use super::{empty_permutation, successor_path, vertex_permutation, EdgeWeights, WeightedAlgorithm};

/// Floyd's all-pairs shortest paths.
///
/// Vertices of the subgraph are linearized by a [`Permutation`]; distances
/// and first edges of shortest paths live in flat `n × n` matrices. Cells of
/// unreachable pairs are undefined. A negative diagonal entry proves a
/// negative cycle and terminates the run.
///
/// ### Performance Characteristics
/// | Operation | Complexity | Notes |
/// |-----------|------------|-------|
/// | `execute` | \(O(V^3)\) | Plus \(O(V + E)\) to fill the matrices |
/// | memory | \(O(V^2)\) | Two matrices |
/// | `path` | \(O(V)\) | Follows successor cells |
#[derive(Debug)]
pub struct FloydAlgorithm<'g, G> {
    base: AlgorithmBase<'g, G>,
    weights: EdgeWeights<'g>,
    distances: VertexMatrix<f64>,
    successors: VertexMatrix<EdgeId>,
    negative_cycles: bool,
}

impl<'g, G: Graph> FloydAlgorithm<'g, G> {
    /// Creates the algorithm following outgoing edges.
    pub fn new(graph: &'g G) -> Self {
        let permutation = empty_permutation();
        Self {
            base: AlgorithmBase::new(graph, AlgorithmKind::Floyd, Direction::Out),
            weights: EdgeWeights::default(),
            distances: VertexMatrix::new(permutation.clone()),
            successors: VertexMatrix::new(permutation),
            negative_cycles: false,
        }
    }

    /// Computes all distances.
    ///
    /// # Errors
    /// [`Error::IllegalState`](crate::Error::IllegalState) unless `Pristine`
    /// or `ParamsSet`.
    pub fn execute(&mut self) -> Result<&mut Self> {
        self.start_running()?;
        let permutation = vertex_permutation(&self.base)?;
        self.distances = VertexMatrix::new(permutation.clone());
        self.successors = VertexMatrix::new(permutation.clone());

        for (row, vertex) in permutation.iter() {
            *self.distances.cell_mut(row, row) = Some(0.0);
            for incidence in self.base.traversable_incidences(vertex) {
                let Some(col) = permutation.index_of(&incidence.that) else {
                    continue;
                };
                let weight = self.weights.weight(incidence.edge);
                let cell = self.distances.cell_mut(row, col);
                if cell.map_or(true, |current| weight < current) {
                    *cell = Some(weight);
                    *self.successors.cell_mut(row, col) = Some(incidence.edge);
                }
            }
        }

        let flow = self.relax_all();
        self.base.finish(flow);
        Ok(self)
    }

    fn relax_all(&mut self) -> ControlFlow<()> {
        let n = self.distances.size();
        for k in 0..n {
            for i in 0..n {
                let Some(&via) = self.distances.cell(i, k) else {
                    continue;
                };
                let first = self.successors.cell(i, k).copied();
                for j in 0..n {
                    let Some(&rest) = self.distances.cell(k, j) else {
                        continue;
                    };
                    let candidate = via + rest;
                    let cell = self.distances.cell_mut(i, j);
                    if cell.map_or(true, |current| candidate < current) {
                        *cell = Some(candidate);
                        *self.successors.cell_mut(i, j) = first;
                    }
                }
            }
            if (0..n).any(|i| self.distances.cell(i, i).map_or(false, |&d| d < 0.0)) {
                self.negative_cycles = true;
                tracing::warn!(pivot = k, "negative cycle detected");
                return ControlFlow::Break(());
            }
        }
        ControlFlow::Continue(())
    }

    /// Returns `true` if the (sub)graph contains a negative cycle.
    ///
    /// # Errors
    /// [`Error::IllegalState`](crate::Error::IllegalState) before execution.
    pub fn has_negative_cycles(&self) -> Result<bool> {
        self.base.check_state_for_result("has_negative_cycles")?;
        Ok(self.negative_cycles)
    }

    /// The vertex linearization shared by both matrices.
    ///
    /// # Errors
    /// [`Error::IllegalState`](crate::Error::IllegalState) before execution.
    pub fn permutation(&self) -> Result<&Rc<Permutation<VertexId>>> {
        self.base.check_state_for_result("permutation")?;
        Ok(self.distances.permutation())
    }

    /// Row/column index of `vertex`, `None` outside the subgraph.
    ///
    /// # Errors
    /// [`Error::IllegalState`](crate::Error::IllegalState) before execution.
    pub fn index_of(&self, vertex: VertexId) -> Result<Option<usize>> {
        Ok(self.permutation()?.index_of(&vertex))
    }

    /// Distance matrix; undefined cells are unreachable pairs.
    ///
    /// # Errors
    /// [`Error::IllegalState`](crate::Error::IllegalState) before execution.
    pub fn distances(&self) -> Result<&VertexMatrix<f64>> {
        self.base.check_state_for_result("distances")?;
        Ok(&self.distances)
    }

    /// First edge of a shortest path for every reachable pair.
    ///
    /// # Errors
    /// [`Error::IllegalState`](crate::Error::IllegalState) before execution.
    pub fn successors(&self) -> Result<&VertexMatrix<EdgeId>> {
        self.base.check_state_for_result("successors")?;
        Ok(&self.successors)
    }

    /// Distance from `from` to `to`, `+∞` if unreachable.
    ///
    /// # Errors
    /// [`Error::IllegalState`](crate::Error::IllegalState) before execution.
    pub fn distance(&self, from: VertexId, to: VertexId) -> Result<f64> {
        Ok(self.distances()?.get(from, to).unwrap_or(f64::INFINITY))
    }

    /// Edges of a shortest path from `from` to `to`; empty for `from == to`.
    ///
    /// # Errors
    /// [`Error::IllegalState`](crate::Error::IllegalState) before execution.
    pub fn path(&self, from: VertexId, to: VertexId) -> Result<Option<Vec<EdgeId>>> {
        Ok(successor_path(self.base.graph(), self.successors()?, from, to))
    }
}

impl<'g, G: Graph> GraphAlgorithm<'g, G> for FloydAlgorithm<'g, G> {
    fn base(&self) -> &AlgorithmBase<'g, G> {
        &self.base
    }

    fn base_mut(&mut self) -> &mut AlgorithmBase<'g, G> {
        &mut self.base
    }

    fn reset(&mut self) {
        let permutation = empty_permutation();
        self.distances = VertexMatrix::new(permutation.clone());
        self.successors = VertexMatrix::new(permutation);
        self.negative_cycles = false;
        self.base.reset_state();
    }
}

impl<'g, G: Graph> WeightedAlgorithm<'g, G> for FloydAlgorithm<'g, G> {
    fn edge_weights(&self) -> &EdgeWeights<'g> {
        &self.weights
    }

    fn edge_weights_mut(&mut self) -> &mut EdgeWeights<'g> {
        &mut self.weights
    }
}
