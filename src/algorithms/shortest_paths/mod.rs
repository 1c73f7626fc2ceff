//! Weighted shortest paths and all-pairs reachability.
//!
//! - `dijkstra`: [`DijkstraSearch`], single source, non-negative weights
//! - `a_star`: [`AStarSearch`], single pair, guided by a heuristic
//! - `ford_moore`: [`FordMooreSearch`], single source, negative weights,
//!   negative-cycle detection
//! - `floyd`: [`FloydAlgorithm`], all pairs over a vertex permutation
//! - `warshall`: [`ReachabilityWithWarshall`], all-pairs reachability
//!
//! Edge weights come from a [`Function<EdgeId, f64>`]. Without one every edge
//! weighs `1.0`; an edge on which the function is undefined weighs `1.0` too.

pub mod a_star;
pub mod dijkstra;
pub mod floyd;
pub mod ford_moore;
pub mod warshall;

use std::fmt;
use std::rc::Rc;

use crate::error::Result;
use crate::functions::{Function, Permutation, PermutationBuilder, VertexMatrix};
use crate::graph::{AnyElement, Direction, EdgeId, Graph, VertexId};
use crate::markers::{ArrayVertexMarker, DoubleVertexMarker, Marker};

use super::search::{BreadthFirstSearch, SearchAlgorithm};
use super::{AlgorithmBase, GraphAlgorithm};

pub use a_star::AStarSearch;
pub use dijkstra::DijkstraSearch;
pub use floyd::FloydAlgorithm;
pub use ford_moore::FordMooreSearch;
pub use warshall::ReachabilityWithWarshall;

/// Weight used for edges without an explicit one.
pub const DEFAULT_EDGE_WEIGHT: f64 = 1.0;

/// Optional edge weight function with the uniform default.
#[derive(Default)]
pub struct EdgeWeights<'g> {
    function: Option<Box<dyn Function<EdgeId, f64> + 'g>>,
}

impl<'g> EdgeWeights<'g> {
    /// The weight of `edge`.
    #[inline]
    pub fn weight(&self, edge: EdgeId) -> f64 {
        self.function
            .as_ref()
            .and_then(|function| function.get(edge))
            .unwrap_or(DEFAULT_EDGE_WEIGHT)
    }

    /// Returns `true` if a weight function is set.
    pub fn is_set(&self) -> bool {
        self.function.is_some()
    }

    fn replace(&mut self, function: Option<Box<dyn Function<EdgeId, f64> + 'g>>) {
        self.function = function;
    }
}

impl fmt::Debug for EdgeWeights<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EdgeWeights")
            .field("is_set", &self.is_set())
            .finish()
    }
}

/// Algorithms parameterized by edge weights.
pub trait WeightedAlgorithm<'g, G: Graph + 'g>: GraphAlgorithm<'g, G> {
    /// The current weights.
    fn edge_weights(&self) -> &EdgeWeights<'g>;

    #[doc(hidden)]
    fn edge_weights_mut(&mut self) -> &mut EdgeWeights<'g>;

    /// Uses `weight` for edge weights.
    ///
    /// # Errors
    /// [`Error::IllegalState`](crate::Error::IllegalState) unless `Pristine`
    /// or `ParamsSet`.
    fn set_edge_weight(&mut self, weight: impl Function<EdgeId, f64> + 'g) -> Result<&mut Self>
    where
        Self: Sized,
    {
        self.base().check_state_for_setting_parameters("set_edge_weight")?;
        self.edge_weights_mut().replace(Some(Box::new(weight)));
        self.base_mut().params_set();
        Ok(self)
    }

    /// Falls back to uniform weights.
    ///
    /// # Errors
    /// [`Error::IllegalState`](crate::Error::IllegalState) unless `Pristine`
    /// or `ParamsSet`.
    fn clear_edge_weight(&mut self) -> Result<&mut Self>
    where
        Self: Sized,
    {
        self.base().check_state_for_setting_parameters("clear_edge_weight")?;
        self.edge_weights_mut().replace(None);
        self.base_mut().params_set();
        Ok(self)
    }
}

/// Distances and tree parents of a single-source search.
#[derive(Debug)]
pub struct PathState {
    pub(crate) distance: DoubleVertexMarker,
    pub(crate) parent: ArrayVertexMarker<EdgeId>,
}

impl PathState {
    /// Creates empty storage for `graph`.
    pub fn new<G: Graph>(graph: &G) -> Self {
        Self {
            distance: Marker::new(graph),
            parent: Marker::new(graph),
        }
    }

    /// Clears every distance and parent.
    pub fn clear(&mut self) {
        self.distance.clear();
        self.parent.clear();
    }

    /// Tentative or final distance of `vertex`, `+∞` if undiscovered.
    #[inline]
    pub(crate) fn distance_of(&self, vertex: VertexId) -> f64 {
        self.distance.get_mark_or(vertex, f64::INFINITY)
    }

    /// Records `distance` for `vertex`, reached through `edge`.
    #[inline]
    pub(crate) fn improve(&mut self, vertex: VertexId, distance: f64, edge: EdgeId) {
        self.distance.mark(vertex, distance);
        self.parent.mark(vertex, edge);
    }

    /// Parent edges from the start down to `vertex`.
    ///
    /// Returns `None` if `vertex` is undiscovered or the parent chain does not
    /// reach a root within `|V|` steps (a negative cycle).
    pub(crate) fn path_to<G: Graph>(&self, graph: &G, vertex: VertexId) -> Option<Vec<EdgeId>> {
        if !self.distance.is_marked(vertex) {
            return None;
        }
        let mut path = Vec::new();
        let mut current = vertex;
        while let Some(edge) = self.parent.get_mark(current) {
            if path.len() >= graph.vertex_count() {
                return None;
            }
            path.push(edge);
            current = graph.opposite(edge, current)?;
        }
        path.reverse();
        Some(path)
    }
}

/// Result accessors of the single-source algorithms.
///
/// Every accessor fails with [`Error::IllegalState`](crate::Error::IllegalState)
/// before the algorithm has finished or terminated.
pub trait ShortestPathAlgorithm<'g, G: Graph + 'g>: GraphAlgorithm<'g, G> {
    /// The shared result storage.
    fn path_state(&self) -> &PathState;

    /// Distance of every discovered vertex from the start.
    fn weighted_distance(&self) -> Result<&DoubleVertexMarker> {
        self.base().check_state_for_result("weighted_distance")?;
        Ok(&self.path_state().distance)
    }

    /// Edge through which every discovered vertex other than the start was
    /// reached.
    fn parent(&self) -> Result<&ArrayVertexMarker<EdgeId>> {
        self.base().check_state_for_result("parent")?;
        Ok(&self.path_state().parent)
    }

    /// Distance of `vertex` from the start, `+∞` if it was not reached.
    fn distance_to(&self, vertex: VertexId) -> Result<f64> {
        self.base().check_state_for_result("distance_to")?;
        Ok(self.path_state().distance_of(vertex))
    }

    /// Edges of a shortest path from the start to `vertex`.
    fn path_to(&self, vertex: VertexId) -> Result<Option<Vec<EdgeId>>> {
        self.base().check_state_for_result("path_to")?;
        Ok(self.path_state().path_to(self.graph(), vertex))
    }
}

pub(crate) fn empty_permutation() -> Rc<Permutation<VertexId>> {
    Rc::new(PermutationBuilder::new().build())
}

/// Linearizes the subgraph's vertices in BFS sweep order.
pub(crate) fn vertex_permutation<'g, G: Graph + 'g>(
    base: &AlgorithmBase<'g, G>,
) -> Result<Rc<Permutation<VertexId>>> {
    let mut bfs = BreadthFirstSearch::new(base.graph());
    bfs.set_traversal_direction(Direction::InOut)?;
    bfs.set_subgraph(|element: AnyElement| match element {
        AnyElement::Vertex(vertex) => base.is_vertex_in_subgraph(vertex),
        AnyElement::Edge(edge) => base.is_edge_in_subgraph(edge),
    })?;
    bfs.execute()?;
    let builder: PermutationBuilder<VertexId> = bfs.vertex_order()?.iter().copied().collect();
    Ok(Rc::new(builder.build()))
}

/// Follows a first-edge successor matrix from `from` to `to`.
pub(crate) fn successor_path<G: Graph>(
    graph: &G,
    successors: &VertexMatrix<EdgeId>,
    from: VertexId,
    to: VertexId,
) -> Option<Vec<EdgeId>> {
    let permutation = successors.permutation();
    let target = permutation.index_of(&to)?;
    let mut current = from;
    let mut row = permutation.index_of(&from)?;
    let mut path = Vec::new();
    while row != target {
        if path.len() >= successors.size() {
            return None;
        }
        let edge = *successors.cell(row, target)?;
        path.push(edge);
        current = graph.opposite(edge, current)?;
        row = permutation.index_of(&current)?;
    }
    Some(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::AlgorithmKind;
    use crate::graph::TGraph;

    #[test]
    fn weights_default_to_one() {
        let mut weights = EdgeWeights::default();
        assert_eq!(weights.weight(EdgeId::new(7)), 1.0);

        weights.replace(Some(Box::new(|edge: EdgeId| edge.index() as f64 * 2.0)));
        assert_eq!(weights.weight(EdgeId::new(3)), 6.0);
    }

    #[test]
    fn permutation_follows_the_subgraph() {
        let graph = TGraph::from_edges(4, &[(0, 1), (2, 3)]).unwrap();
        let mut base = AlgorithmBase::new(&graph, AlgorithmKind::Floyd, Direction::Out);
        base.set_subgraph(Some(Box::new(|element: AnyElement| {
            element != AnyElement::Vertex(VertexId::new(2))
        })))
        .unwrap();

        let permutation = vertex_permutation(&base).unwrap();
        assert_eq!(
            permutation.values(),
            &[VertexId::new(0), VertexId::new(1), VertexId::new(3)]
        );
    }

    #[test]
    fn negative_cycle_parent_chains_yield_no_path() {
        let graph = TGraph::from_edges(2, &[(0, 1), (1, 0)]).unwrap();
        let mut state = PathState::new(&graph);
        state.improve(VertexId::new(0), -2.0, EdgeId::new(1));
        state.improve(VertexId::new(1), -1.0, EdgeId::new(0));
        assert_eq!(state.path_to(&graph, VertexId::new(1)), None);
    }
}
