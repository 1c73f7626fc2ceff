//! Dense element ids.

use core::fmt;
use core::hash::Hash;

use serde::{Deserialize, Serialize};

use super::Graph;

/// Distinguishes vertex-keyed from edge-keyed containers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ElementKind {
    /// Vertices.
    Vertex,
    /// Edges.
    Edge,
}

/// A graph element addressed by a dense, 0-based index.
pub trait GraphElement: Copy + Eq + Ord + Hash + fmt::Debug + 'static {
    /// Whether this is a vertex or an edge id.
    const KIND: ElementKind;

    /// Builds the id with the given index.
    fn from_index(index: usize) -> Self;

    /// The dense index of this id.
    fn index(self) -> usize;

    /// Current index capacity of `graph` for this element kind.
    fn capacity_in<G: Graph>(graph: &G) -> usize;

    /// Returns `true` if this element is live in `graph`.
    fn is_live_in<G: Graph>(self, graph: &G) -> bool;
}

/// Id of a vertex.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VertexId(usize);

impl VertexId {
    /// Creates the id for `index`.
    #[inline]
    pub const fn new(index: usize) -> Self {
        VertexId(index)
    }

    /// The dense index.
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Debug for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

impl fmt::Display for VertexId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.0)
    }
}

impl GraphElement for VertexId {
    const KIND: ElementKind = ElementKind::Vertex;

    #[inline]
    fn from_index(index: usize) -> Self {
        VertexId(index)
    }

    #[inline]
    fn index(self) -> usize {
        self.0
    }

    fn capacity_in<G: Graph>(graph: &G) -> usize {
        graph.max_vertex_count()
    }

    fn is_live_in<G: Graph>(self, graph: &G) -> bool {
        graph.contains_vertex(self)
    }
}

/// Id of an edge.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EdgeId(usize);

impl EdgeId {
    /// Creates the id for `index`.
    #[inline]
    pub const fn new(index: usize) -> Self {
        EdgeId(index)
    }

    /// The dense index.
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Debug for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "e{}", self.0)
    }
}

impl GraphElement for EdgeId {
    const KIND: ElementKind = ElementKind::Edge;

    #[inline]
    fn from_index(index: usize) -> Self {
        EdgeId(index)
    }

    #[inline]
    fn index(self) -> usize {
        self.0
    }

    fn capacity_in<G: Graph>(graph: &G) -> usize {
        graph.max_edge_count()
    }

    fn is_live_in<G: Graph>(self, graph: &G) -> bool {
        graph.contains_edge(self)
    }
}

/// Either kind of element; the key type of subgraph filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AnyElement {
    /// A vertex.
    Vertex(VertexId),
    /// An edge.
    Edge(EdgeId),
}

impl From<VertexId> for AnyElement {
    fn from(v: VertexId) -> Self {
        AnyElement::Vertex(v)
    }
}

impl From<EdgeId> for AnyElement {
    fn from(e: EdgeId) -> Self {
        AnyElement::Edge(e)
    }
}

/// Class tag of an edge, used to filter degrees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EdgeClass(pub u16);

impl EdgeClass {
    /// The class of edges created without an explicit class.
    pub const DEFAULT: EdgeClass = EdgeClass(0);
}

/// An edge as seen from one of its endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Incidence {
    /// The edge.
    pub edge: EdgeId,
    /// The endpoint the incidence belongs to.
    pub this: VertexId,
    /// The other endpoint (equal to `this` for self loops).
    pub that: VertexId,
    /// `true` if `this` is the alpha vertex of `edge`.
    pub outgoing: bool,
}

impl Incidence {
    /// The incidence of the same edge at the other endpoint.
    pub fn reversed(self) -> Self {
        Incidence {
            edge: self.edge,
            this: self.that,
            that: self.this,
            outgoing: !self.outgoing,
        }
    }

    /// Returns `true` for an edge whose endpoints coincide.
    pub fn is_self_loop(self) -> bool {
        self.this == self.that
    }
}
