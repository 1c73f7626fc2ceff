//! `TGraph`: a minimal in-memory directed multigraph.
//!
//! This is the reference [`Graph`] implementation used to drive the algorithm
//! core. It has no attributes, schema or persistence; it only maintains the
//! structure, dense ids and listener notifications.
//!
//! ### Performance Characteristics
//! | Operation | Complexity | Notes |
//! |-----------|------------|-------|
//! | `add_vertex` | \(O(1)\) amortized | Reuses freed ids first |
//! | `add_edge` | \(O(1)\) amortized | Appends to both incidence lists |
//! | `delete_edge` | \(O(\deg(\alpha) + \deg(\omega))\) | Scans the two incidence lists |
//! | `delete_vertex` | \(O(\sum \deg)\) over its neighbours | Deletes incident edges first |
//! | `incidences` | \(O(\deg)\) | Filtered by direction |

use super::{
    Direction, EdgeClass, EdgeId, Graph, GraphId, Incidence, ListenerRegistry, VertexId,
};
use crate::error::{Error, Result};

const DEFAULT_CAPACITY: usize = 16;

#[derive(Debug, Clone, Copy)]
struct IncidenceEntry {
    edge: EdgeId,
    that: VertexId,
    outgoing: bool,
}

#[derive(Debug, Default)]
struct VertexData {
    incidences: Vec<IncidenceEntry>,
}

#[derive(Debug, Clone, Copy)]
struct EdgeData {
    alpha: VertexId,
    omega: VertexId,
    class: EdgeClass,
}

/// A dynamic directed multigraph with dense, reusable ids.
///
/// Capacities (`max_vertex_count`, `max_edge_count`) double when exhausted and
/// every growth is announced to the registered listeners before the new id is
/// handed out.
#[derive(Debug)]
pub struct TGraph {
    id: GraphId,
    vertices: Vec<Option<VertexData>>,
    edges: Vec<Option<EdgeData>>,
    free_vertices: Vec<usize>,
    free_edges: Vec<usize>,
    vertex_count: usize,
    edge_count: usize,
    max_vertices: usize,
    max_edges: usize,
    listeners: ListenerRegistry,
}

impl TGraph {
    /// Creates an empty graph with default capacities.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY, DEFAULT_CAPACITY)
    }

    /// Creates an empty graph with the given initial index capacities.
    pub fn with_capacity(vertices: usize, edges: usize) -> Self {
        Self {
            id: GraphId::next(),
            vertices: Vec::with_capacity(vertices),
            edges: Vec::with_capacity(edges),
            free_vertices: Vec::new(),
            free_edges: Vec::new(),
            vertex_count: 0,
            edge_count: 0,
            max_vertices: vertices.max(1),
            max_edges: edges.max(1),
            listeners: ListenerRegistry::new(),
        }
    }

    /// Creates a graph with `vertex_count` vertices `v0..` and the given
    /// `(alpha, omega)` edges, created in order as `e0..`.
    ///
    /// # Errors
    /// Returns [`Error::InvalidArgument`] if an endpoint index is out of range.
    pub fn from_edges(vertex_count: usize, edges: &[(usize, usize)]) -> Result<Self> {
        let mut graph = Self::with_capacity(vertex_count.max(1), edges.len().max(1));
        let ids: Vec<VertexId> = (0..vertex_count).map(|_| graph.add_vertex()).collect();
        for &(alpha, omega) in edges {
            let (a, o) = match (ids.get(alpha), ids.get(omega)) {
                (Some(&a), Some(&o)) => (a, o),
                _ => {
                    return Err(Error::InvalidArgument(format!(
                        "edge {alpha}->{omega} out of bounds for n={vertex_count}"
                    )))
                }
            };
            graph.add_edge(a, o)?;
        }
        Ok(graph)
    }

    /// Adds a vertex and returns its id.
    pub fn add_vertex(&mut self) -> VertexId {
        let index = match self.free_vertices.pop() {
            Some(index) => index,
            None => {
                let index = self.vertices.len();
                self.vertices.push(None);
                index
            }
        };
        if index >= self.max_vertices {
            while index >= self.max_vertices {
                self.max_vertices *= 2;
            }
            let new_max = self.max_vertices;
            self.listeners.notify(|l| l.max_vertex_count_increased(new_max));
        }
        self.vertices[index] = Some(VertexData::default());
        self.vertex_count += 1;
        let vertex = VertexId::new(index);
        self.listeners.notify(|l| l.vertex_added(vertex));
        vertex
    }

    /// Adds an edge of the default class from `alpha` to `omega`.
    ///
    /// # Errors
    /// Returns [`Error::InvalidArgument`] if an endpoint is not a live vertex.
    pub fn add_edge(&mut self, alpha: VertexId, omega: VertexId) -> Result<EdgeId> {
        self.add_edge_with_class(alpha, omega, EdgeClass::DEFAULT)
    }

    /// Adds an edge of `class` from `alpha` to `omega`.
    ///
    /// # Errors
    /// Returns [`Error::InvalidArgument`] if an endpoint is not a live vertex.
    pub fn add_edge_with_class(
        &mut self,
        alpha: VertexId,
        omega: VertexId,
        class: EdgeClass,
    ) -> Result<EdgeId> {
        for endpoint in [alpha, omega] {
            if !self.contains_vertex(endpoint) {
                return Err(Error::InvalidArgument(format!("{endpoint} is not a vertex of this graph")));
            }
        }

        let index = match self.free_edges.pop() {
            Some(index) => index,
            None => {
                let index = self.edges.len();
                self.edges.push(None);
                index
            }
        };
        if index >= self.max_edges {
            while index >= self.max_edges {
                self.max_edges *= 2;
            }
            let new_max = self.max_edges;
            self.listeners.notify(|l| l.max_edge_count_increased(new_max));
        }

        let edge = EdgeId::new(index);
        self.edges[index] = Some(EdgeData { alpha, omega, class });
        self.vertex_data_mut(alpha).incidences.push(IncidenceEntry {
            edge,
            that: omega,
            outgoing: true,
        });
        self.vertex_data_mut(omega).incidences.push(IncidenceEntry {
            edge,
            that: alpha,
            outgoing: false,
        });
        self.edge_count += 1;
        self.listeners.notify(|l| l.edge_added(edge));
        Ok(edge)
    }

    /// Deletes `edge`. Returns `false` if it was not a live edge.
    pub fn delete_edge(&mut self, edge: EdgeId) -> bool {
        let Some(data) = self.edges.get_mut(edge.index()).and_then(Option::take) else {
            return false;
        };
        for endpoint in [data.alpha, data.omega] {
            self.vertex_data_mut(endpoint)
                .incidences
                .retain(|entry| entry.edge != edge);
        }
        self.free_edges.push(edge.index());
        self.edge_count -= 1;
        self.listeners.notify(|l| l.edge_deleted(edge));
        true
    }

    /// Deletes `vertex` and all its incident edges. Returns `false` if it was
    /// not a live vertex.
    pub fn delete_vertex(&mut self, vertex: VertexId) -> bool {
        if !self.contains_vertex(vertex) {
            return false;
        }
        let mut incident: Vec<EdgeId> = self
            .vertex_data_mut(vertex)
            .incidences
            .iter()
            .map(|entry| entry.edge)
            .collect();
        incident.sort_unstable();
        incident.dedup();
        for edge in incident {
            self.delete_edge(edge);
        }
        self.vertices[vertex.index()] = None;
        self.free_vertices.push(vertex.index());
        self.vertex_count -= 1;
        self.listeners.notify(|l| l.vertex_deleted(vertex));
        true
    }

    fn vertex_data(&self, vertex: VertexId) -> Option<&VertexData> {
        self.vertices.get(vertex.index()).and_then(Option::as_ref)
    }

    // Callers check liveness first.
    fn vertex_data_mut(&mut self, vertex: VertexId) -> &mut VertexData {
        match self.vertices.get_mut(vertex.index()).and_then(Option::as_mut) {
            Some(data) => data,
            None => unreachable!("{vertex} is not live"),
        }
    }

    fn edge_data(&self, edge: EdgeId) -> Option<&EdgeData> {
        self.edges.get(edge.index()).and_then(Option::as_ref)
    }
}

impl Default for TGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl Graph for TGraph {
    fn id(&self) -> GraphId {
        self.id
    }

    fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    fn edge_count(&self) -> usize {
        self.edge_count
    }

    fn max_vertex_count(&self) -> usize {
        self.max_vertices
    }

    fn max_edge_count(&self) -> usize {
        self.max_edges
    }

    fn contains_vertex(&self, vertex: VertexId) -> bool {
        self.vertex_data(vertex).is_some()
    }

    fn contains_edge(&self, edge: EdgeId) -> bool {
        self.edge_data(edge).is_some()
    }

    fn vertices(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.vertices
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_some())
            .map(|(index, _)| VertexId::new(index))
    }

    fn edges(&self) -> impl Iterator<Item = EdgeId> + '_ {
        self.edges
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_some())
            .map(|(index, _)| EdgeId::new(index))
    }

    fn alpha(&self, edge: EdgeId) -> Option<VertexId> {
        self.edge_data(edge).map(|data| data.alpha)
    }

    fn omega(&self, edge: EdgeId) -> Option<VertexId> {
        self.edge_data(edge).map(|data| data.omega)
    }

    fn edge_class(&self, edge: EdgeId) -> Option<EdgeClass> {
        self.edge_data(edge).map(|data| data.class)
    }

    fn incidences(&self, vertex: VertexId, direction: Direction) -> impl Iterator<Item = Incidence> + '_ {
        self.vertex_data(vertex)
            .into_iter()
            .flat_map(|data| data.incidences.iter())
            .filter(move |entry| direction.accepts(entry.outgoing))
            .map(move |entry| Incidence {
                edge: entry.edge,
                this: vertex,
                that: entry.that,
                outgoing: entry.outgoing,
            })
    }

    fn listeners(&self) -> &ListenerRegistry {
        &self.listeners
    }
}
