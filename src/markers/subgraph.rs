//! `SubgraphMarker`: a vertex and an edge bit set forming one element filter.

use crate::functions::BooleanFunction;
use crate::graph::{AnyElement, EdgeId, Graph, GraphId, VertexId};

use super::{BitSetEdgeMarker, BitSetVertexMarker, Marker};

/// Marks a subset of the vertices and edges of one graph.
///
/// Usable directly as the subgraph filter of any algorithm. Marking an edge
/// does not mark its endpoints; the algorithms check both.
#[derive(Debug)]
pub struct SubgraphMarker {
    vertices: BitSetVertexMarker,
    edges: BitSetEdgeMarker,
}

impl SubgraphMarker {
    /// Creates an empty subgraph of `graph`.
    pub fn new<G: Graph>(graph: &G) -> Self {
        Self {
            vertices: Marker::new(graph),
            edges: Marker::new(graph),
        }
    }

    /// Creates the subgraph induced by `vertices`: the given vertices plus
    /// every edge with both endpoints among them.
    pub fn induced<G: Graph>(graph: &G, vertices: impl IntoIterator<Item = VertexId>) -> Self {
        let mut subgraph = Self::new(graph);
        for vertex in vertices {
            if graph.contains_vertex(vertex) {
                subgraph.vertices.mark(vertex, ());
            }
        }
        for edge in graph.edges() {
            let inside = |v: Option<VertexId>| v.map_or(false, |v| subgraph.vertices.is_marked(v));
            if inside(graph.alpha(edge)) && inside(graph.omega(edge)) {
                subgraph.edges.mark(edge, ());
            }
        }
        subgraph
    }

    /// Adds `vertex`. Returns `true` if it was not contained before.
    pub fn add_vertex(&mut self, vertex: VertexId) -> bool {
        self.vertices.try_mark(vertex)
    }

    /// Adds `edge`. Returns `true` if it was not contained before.
    pub fn add_edge(&mut self, edge: EdgeId) -> bool {
        self.edges.try_mark(edge)
    }

    /// Removes `vertex`. Returns `true` if it was contained.
    pub fn remove_vertex(&mut self, vertex: VertexId) -> bool {
        self.vertices.remove_mark(vertex)
    }

    /// Removes `edge`. Returns `true` if it was contained.
    pub fn remove_edge(&mut self, edge: EdgeId) -> bool {
        self.edges.remove_mark(edge)
    }

    /// Returns `true` if `vertex` belongs to the subgraph.
    #[inline]
    pub fn contains_vertex(&self, vertex: VertexId) -> bool {
        self.vertices.is_marked(vertex)
    }

    /// Returns `true` if `edge` belongs to the subgraph.
    #[inline]
    pub fn contains_edge(&self, edge: EdgeId) -> bool {
        self.edges.is_marked(edge)
    }

    /// Number of vertices in the subgraph.
    pub fn vertex_count(&self) -> usize {
        self.vertices.size()
    }

    /// Number of edges in the subgraph.
    pub fn edge_count(&self) -> usize {
        self.edges.size()
    }

    /// Empties the subgraph.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.edges.clear();
    }

    /// The vertex part.
    pub fn vertex_marker(&self) -> &BitSetVertexMarker {
        &self.vertices
    }

    /// The edge part.
    pub fn edge_marker(&self) -> &BitSetEdgeMarker {
        &self.edges
    }

    /// The graph this subgraph belongs to.
    pub fn graph_id(&self) -> GraphId {
        self.vertices.graph_id()
    }
}

impl BooleanFunction<AnyElement> for SubgraphMarker {
    fn get(&self, element: AnyElement) -> bool {
        match element {
            AnyElement::Vertex(vertex) => self.contains_vertex(vertex),
            AnyElement::Edge(edge) => self.contains_edge(edge),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::TGraph;

    #[test]
    fn induced_subgraph() {
        let graph = TGraph::from_edges(4, &[(0, 1), (1, 2), (2, 3), (0, 0)]).unwrap();
        let subgraph = SubgraphMarker::induced(&graph, [VertexId::new(0), VertexId::new(1)]);
        assert_eq!(subgraph.vertex_count(), 2);
        assert!(subgraph.contains_edge(EdgeId::new(0)));
        assert!(subgraph.contains_edge(EdgeId::new(3)));
        assert!(!subgraph.contains_edge(EdgeId::new(1)));
        assert!(BooleanFunction::get(&subgraph, AnyElement::Vertex(VertexId::new(1))));
        assert!(!BooleanFunction::get(&subgraph, AnyElement::Vertex(VertexId::new(2))));
    }

    #[test]
    fn deleted_elements_leave_the_subgraph() {
        let mut graph = TGraph::from_edges(3, &[(0, 1), (1, 2)]).unwrap();
        let mut subgraph = SubgraphMarker::induced(&graph, graph.vertices().collect::<Vec<_>>());
        assert_eq!(subgraph.edge_count(), 2);
        graph.delete_vertex(VertexId::new(2));
        assert_eq!(subgraph.vertex_count(), 2);
        assert_eq!(subgraph.edge_count(), 1);
        assert!(subgraph.remove_edge(EdgeId::new(0)));
        assert!(subgraph.add_edge(EdgeId::new(0)));
        assert!(!subgraph.add_edge(EdgeId::new(0)));
    }
}
