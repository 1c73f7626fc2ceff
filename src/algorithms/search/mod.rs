//! Breadth-first and depth-first search.
//!
//! Both searches share [`SearchState`]: visited markers for vertices and
//! edges, discovery numbers, tree parents and the discovery orders. Every
//! edge is processed at most once, so an undirected (`InOut`) search sees
//! each edge, self loops included, exactly once.
//!
//! - `bfs`: [`BreadthFirstSearch`], additionally computing levels
//! - `dfs`: [`DepthFirstSearch`], additionally computing finish numbers and
//!   classifying fronds

pub mod bfs;
pub mod dfs;

use crate::error::Result;
use crate::graph::{EdgeId, Graph, VertexId};
use crate::markers::{ArrayVertexMarker, BitSetEdgeMarker, BitSetVertexMarker, IntegerVertexMarker, Marker};

use super::GraphAlgorithm;

pub use bfs::BreadthFirstSearch;
pub use dfs::DepthFirstSearch;

/// Working storage and results shared by the searches.
#[derive(Debug)]
pub struct SearchState {
    pub(crate) visited_vertices: BitSetVertexMarker,
    pub(crate) visited_edges: BitSetEdgeMarker,
    pub(crate) number: IntegerVertexMarker,
    pub(crate) parent: ArrayVertexMarker<EdgeId>,
    pub(crate) vertex_order: Vec<VertexId>,
    pub(crate) edge_order: Vec<EdgeId>,
}

impl SearchState {
    /// Creates empty storage sized for `graph`.
    pub fn new<G: Graph>(graph: &G) -> Self {
        Self {
            visited_vertices: Marker::new(graph),
            visited_edges: Marker::new(graph),
            number: Marker::new(graph),
            parent: Marker::new(graph),
            vertex_order: Vec::new(),
            edge_order: Vec::new(),
        }
    }

    /// Forgets everything from the previous run.
    pub fn clear(&mut self) {
        self.visited_vertices.clear();
        self.visited_edges.clear();
        self.number.clear();
        self.parent.clear();
        self.vertex_order.clear();
        self.edge_order.clear();
    }

    /// Marks `vertex` visited, numbering it in discovery order.
    #[inline]
    pub(crate) fn discover(&mut self, vertex: VertexId, via: Option<EdgeId>) {
        self.visited_vertices.mark(vertex, ());
        self.number.mark(vertex, self.vertex_order.len() as i32);
        self.vertex_order.push(vertex);
        if let Some(edge) = via {
            self.parent.mark(vertex, edge);
        }
    }

    /// Marks `edge` processed. Returns `false` if it was processed before.
    #[inline]
    pub(crate) fn take_edge(&mut self, edge: EdgeId) -> bool {
        if self.visited_edges.try_mark(edge) {
            self.edge_order.push(edge);
            true
        } else {
            false
        }
    }

    #[inline]
    pub(crate) fn is_visited(&self, vertex: VertexId) -> bool {
        self.visited_vertices.is_marked(vertex)
    }

    /// Tree edges from the root of `vertex`'s tree down to `vertex`.
    pub(crate) fn path_to<G: Graph>(&self, graph: &G, vertex: VertexId) -> Option<Vec<EdgeId>> {
        if !self.is_visited(vertex) {
            return None;
        }
        let mut path = Vec::new();
        let mut current = vertex;
        while let Some(edge) = self.parent.get_mark(current) {
            path.push(edge);
            current = graph.opposite(edge, current)?;
        }
        path.reverse();
        Some(path)
    }
}

/// Result accessors shared by [`BreadthFirstSearch`] and [`DepthFirstSearch`].
///
/// Every accessor fails with [`Error::IllegalState`](crate::Error::IllegalState)
/// before the search has finished or terminated.
pub trait SearchAlgorithm<'g, G: Graph + 'g>: GraphAlgorithm<'g, G> {
    /// The shared search storage.
    fn search_state(&self) -> &SearchState;

    /// Vertices in discovery order.
    fn vertex_order(&self) -> Result<&[VertexId]> {
        self.base().check_state_for_result("vertex_order")?;
        Ok(&self.search_state().vertex_order)
    }

    /// Edges in the order they were first examined.
    fn edge_order(&self) -> Result<&[EdgeId]> {
        self.base().check_state_for_result("edge_order")?;
        Ok(&self.search_state().edge_order)
    }

    /// Discovery number of every visited vertex, starting at 0.
    fn number(&self) -> Result<&IntegerVertexMarker> {
        self.base().check_state_for_result("number")?;
        Ok(&self.search_state().number)
    }

    /// Tree edge through which every non-root vertex was discovered.
    fn parent(&self) -> Result<&ArrayVertexMarker<EdgeId>> {
        self.base().check_state_for_result("parent")?;
        Ok(&self.search_state().parent)
    }

    /// The visited vertices.
    fn visited_vertices(&self) -> Result<&BitSetVertexMarker> {
        self.base().check_state_for_result("visited_vertices")?;
        Ok(&self.search_state().visited_vertices)
    }

    /// Tree path from the root of `vertex`'s tree, `None` if unvisited.
    fn path_to(&self, vertex: VertexId) -> Result<Option<Vec<EdgeId>>> {
        self.base().check_state_for_result("path_to")?;
        Ok(self.search_state().path_to(self.graph(), vertex))
    }
}
