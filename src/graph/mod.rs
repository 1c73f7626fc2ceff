//! The graph interface consumed by the algorithm core.
//!
//! The core never mutates graph structure. It reads vertices, edges and
//! incidences through [`Graph`] and attaches auxiliary data through markers,
//! which stay consistent with the graph by subscribing to its
//! [`ListenerRegistry`].
//!
//! - `element`: dense element ids, [`Incidence`] and [`AnyElement`]
//! - `listener`: structural-change notifications
//! - `tgraph`: a minimal in-memory reference implementation

pub mod element;
pub mod listener;
pub mod tgraph;

use core::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

pub use element::{AnyElement, EdgeClass, EdgeId, ElementKind, GraphElement, Incidence, VertexId};
pub use listener::{ListenerRegistry, StructureListener};
pub use tgraph::TGraph;

/// Which incidences of a vertex a traversal may follow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Only incoming incidences (`omega == this`).
    In,
    /// Only outgoing incidences (`alpha == this`).
    #[default]
    Out,
    /// Both, i.e. edge direction is ignored.
    InOut,
}

impl Direction {
    /// Returns `true` if an incidence with the given orientation is accepted.
    #[inline]
    pub fn accepts(self, outgoing: bool) -> bool {
        match self {
            Direction::In => !outgoing,
            Direction::Out => outgoing,
            Direction::InOut => true,
        }
    }

    /// The direction seen from the other end of an edge.
    pub fn reversed(self) -> Self {
        match self {
            Direction::In => Direction::Out,
            Direction::Out => Direction::In,
            Direction::InOut => Direction::InOut,
        }
    }
}

/// Process-unique identity of a graph instance.
///
/// Markers record the id of the graph they were created for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct GraphId(u64);

impl GraphId {
    /// Allocates a fresh id.
    pub fn next() -> Self {
        static NEXT: AtomicU64 = AtomicU64::new(1);
        GraphId(NEXT.fetch_add(1, Ordering::Relaxed))
    }

    /// The raw numeric id.
    pub fn get(self) -> u64 {
        self.0
    }
}

/// Read access to a directed multigraph with dense element ids.
///
/// Indices of live vertices are always `< max_vertex_count()` and indices of
/// live edges `< max_edge_count()`. When a capacity grows, implementations
/// must notify their listeners *before* handing out the new ids.
pub trait Graph {
    /// Identity of this graph instance.
    fn id(&self) -> GraphId;

    /// Number of live vertices.
    fn vertex_count(&self) -> usize;

    /// Number of live edges.
    fn edge_count(&self) -> usize;

    /// Exclusive upper bound of vertex indices.
    fn max_vertex_count(&self) -> usize;

    /// Exclusive upper bound of edge indices.
    fn max_edge_count(&self) -> usize;

    /// Returns `true` if `vertex` is a live vertex of this graph.
    fn contains_vertex(&self, vertex: VertexId) -> bool;

    /// Returns `true` if `edge` is a live edge of this graph.
    fn contains_edge(&self, edge: EdgeId) -> bool;

    /// Live vertices in ascending id order.
    fn vertices(&self) -> impl Iterator<Item = VertexId> + '_;

    /// Live edges in ascending id order.
    fn edges(&self) -> impl Iterator<Item = EdgeId> + '_;

    /// Start vertex of `edge`.
    fn alpha(&self, edge: EdgeId) -> Option<VertexId>;

    /// End vertex of `edge`.
    fn omega(&self, edge: EdgeId) -> Option<VertexId>;

    /// Class of `edge`.
    fn edge_class(&self, edge: EdgeId) -> Option<EdgeClass>;

    /// Incidences of `vertex` accepted by `direction`, in insertion order.
    ///
    /// A self loop yields two incidences under [`Direction::InOut`].
    fn incidences(&self, vertex: VertexId, direction: Direction) -> impl Iterator<Item = Incidence> + '_;

    /// The registry structural listeners subscribe to.
    fn listeners(&self) -> &ListenerRegistry;

    /// The endpoint of `edge` that is not `vertex`.
    fn opposite(&self, edge: EdgeId, vertex: VertexId) -> Option<VertexId> {
        let (alpha, omega) = (self.alpha(edge)?, self.omega(edge)?);
        if alpha == vertex {
            Some(omega)
        } else if omega == vertex {
            Some(alpha)
        } else {
            None
        }
    }

    /// Number of incidences of `vertex` in `direction`, optionally restricted
    /// to one edge class.
    fn degree(&self, vertex: VertexId, class: Option<EdgeClass>, direction: Direction) -> usize {
        self.incidences(vertex, direction)
            .filter(|inc| class.map_or(true, |c| self.edge_class(inc.edge) == Some(c)))
            .count()
    }
}
