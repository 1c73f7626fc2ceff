//! Graph algorithms sharing one lifecycle.
//!
//! Every algorithm owns an [`AlgorithmBase`] holding the graph, the optional
//! subgraph and navigability filters, the traversal direction and the
//! [`AlgorithmState`]. The lifecycle is:
//!
//! ```text
//! Pristine ──set_*──▶ ParamsSet ──execute*──▶ Running ──▶ Finished | Terminated
//!     ▲                   ▲                                        │
//!     └───────────────────┴────────────────reset───────────────────┘
//! ```
//!
//! - parameter setters are legal in `Pristine` and `ParamsSet`;
//! - `execute*` is legal in `Pristine` (after an implicit reset) and `ParamsSet`;
//! - result accessors are legal in `Finished` and `Terminated`;
//! - visitors may be (un)registered whenever the algorithm is not running.
//!
//! Submodules:
//! - `search`: breadth-first and depth-first search
//! - `components`: weak components, tree test, topological order
//! - `shortest_paths`: Dijkstra, A*, Ford-Moore, Floyd, Warshall

pub mod components;
pub mod search;
pub mod shortest_paths;

use core::fmt;
use core::ops::ControlFlow;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::functions::BooleanFunction;
use crate::graph::{AnyElement, Direction, EdgeId, Graph, Incidence, VertexId};

pub use components::{IsTree, TopologicalOrderWithDfs, WeakComponentsWithBfs};
pub use search::{BreadthFirstSearch, DepthFirstSearch, SearchAlgorithm, SearchState};
pub use shortest_paths::{
    AStarSearch, DijkstraSearch, EdgeWeights, FloydAlgorithm, FordMooreSearch, PathState,
    ReachabilityWithWarshall, ShortestPathAlgorithm, WeightedAlgorithm,
};

/// Lifecycle state of an algorithm instance.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlgorithmState {
    /// Freshly constructed.
    #[default]
    Pristine,
    /// Parameters set or reset; ready to execute.
    ParamsSet,
    /// Executing.
    Running,
    /// Ran to completion.
    Finished,
    /// Stopped early: by a visitor, on reaching a target, or on a negative cycle.
    Terminated,
}

impl AlgorithmState {
    /// Returns `true` for `Finished` and `Terminated`.
    #[inline]
    pub fn has_result(self) -> bool {
        matches!(self, AlgorithmState::Finished | AlgorithmState::Terminated)
    }
}

/// Identifies an algorithm, e.g. for [`Visitor::set_algorithm`].
///
/// [`Visitor::set_algorithm`]: crate::visitors::Visitor::set_algorithm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AlgorithmKind {
    /// [`BreadthFirstSearch`].
    BreadthFirstSearch,
    /// [`DepthFirstSearch`].
    DepthFirstSearch,
    /// [`WeakComponentsWithBfs`].
    WeakComponents,
    /// [`IsTree`].
    IsTree,
    /// [`TopologicalOrderWithDfs`].
    TopologicalOrder,
    /// [`DijkstraSearch`].
    Dijkstra,
    /// [`AStarSearch`].
    AStar,
    /// [`FordMooreSearch`].
    FordMoore,
    /// [`FloydAlgorithm`].
    Floyd,
    /// [`ReachabilityWithWarshall`].
    Warshall,
}

impl fmt::Display for AlgorithmKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AlgorithmKind::BreadthFirstSearch => "breadth-first search",
            AlgorithmKind::DepthFirstSearch => "depth-first search",
            AlgorithmKind::WeakComponents => "weak components",
            AlgorithmKind::IsTree => "tree test",
            AlgorithmKind::TopologicalOrder => "topological order",
            AlgorithmKind::Dijkstra => "Dijkstra",
            AlgorithmKind::AStar => "A*",
            AlgorithmKind::FordMoore => "Ford-Moore",
            AlgorithmKind::Floyd => "Floyd",
            AlgorithmKind::Warshall => "Warshall",
        })
    }
}

/// State and parameters shared by all algorithms.
pub struct AlgorithmBase<'g, G> {
    graph: &'g G,
    kind: AlgorithmKind,
    subgraph: Option<Box<dyn BooleanFunction<AnyElement> + 'g>>,
    navigable: Option<Box<dyn BooleanFunction<EdgeId> + 'g>>,
    direction: Direction,
    state: AlgorithmState,
}

impl<'g, G: Graph> AlgorithmBase<'g, G> {
    /// Creates a pristine base over `graph` traversing in `direction`.
    pub fn new(graph: &'g G, kind: AlgorithmKind, direction: Direction) -> Self {
        Self {
            graph,
            kind,
            subgraph: None,
            navigable: None,
            direction,
            state: AlgorithmState::Pristine,
        }
    }

    /// The graph.
    #[inline]
    pub fn graph(&self) -> &'g G {
        self.graph
    }

    /// Which algorithm this base belongs to.
    #[inline]
    pub fn kind(&self) -> AlgorithmKind {
        self.kind
    }

    /// The current state.
    #[inline]
    pub fn state(&self) -> AlgorithmState {
        self.state
    }

    /// The traversal direction.
    #[inline]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    fn illegal(&self, operation: &'static str) -> Error {
        Error::IllegalState {
            state: self.state,
            operation,
        }
    }

    /// Fails unless parameters may be changed (`Pristine`/`ParamsSet`).
    pub fn check_state_for_setting_parameters(&self, operation: &'static str) -> Result<()> {
        match self.state {
            AlgorithmState::Pristine | AlgorithmState::ParamsSet => Ok(()),
            _ => Err(self.illegal(operation)),
        }
    }

    /// Fails while the algorithm is running.
    pub fn check_state_for_setting_visitors(&self, operation: &'static str) -> Result<()> {
        match self.state {
            AlgorithmState::Running => Err(self.illegal(operation)),
            _ => Ok(()),
        }
    }

    /// Fails unless results are available (`Finished`/`Terminated`).
    pub fn check_state_for_result(&self, operation: &'static str) -> Result<()> {
        if self.state.has_result() {
            Ok(())
        } else {
            Err(self.illegal(operation))
        }
    }

    /// Records that a parameter was set.
    pub fn params_set(&mut self) {
        if self.state == AlgorithmState::Pristine {
            self.state = AlgorithmState::ParamsSet;
        }
    }

    /// Replaces the subgraph filter. `None` admits every element.
    pub fn set_subgraph(&mut self, subgraph: Option<Box<dyn BooleanFunction<AnyElement> + 'g>>) -> Result<()> {
        self.check_state_for_setting_parameters("set_subgraph")?;
        self.subgraph = subgraph;
        self.params_set();
        Ok(())
    }

    /// Replaces the navigability filter. `None` makes every edge navigable.
    pub fn set_navigable(&mut self, navigable: Option<Box<dyn BooleanFunction<EdgeId> + 'g>>) -> Result<()> {
        self.check_state_for_setting_parameters("set_navigable")?;
        self.navigable = navigable;
        self.params_set();
        Ok(())
    }

    /// Replaces the traversal direction. Support is checked by the caller.
    pub fn set_direction(&mut self, direction: Direction) -> Result<()> {
        self.check_state_for_setting_parameters("set_traversal_direction")?;
        self.direction = direction;
        self.params_set();
        Ok(())
    }

    /// Moves to `ParamsSet` after working storage has been cleared.
    pub fn reset_state(&mut self) {
        self.state = AlgorithmState::ParamsSet;
    }

    /// Moves to `Running`. Callers reset a `Pristine` algorithm first.
    pub fn start_running(&mut self, operation: &'static str) -> Result<()> {
        if self.state != AlgorithmState::ParamsSet {
            return Err(self.illegal(operation));
        }
        self.state = AlgorithmState::Running;
        tracing::debug!(algorithm = %self.kind, direction = ?self.direction, "algorithm started");
        Ok(())
    }

    /// Moves to `Finished`.
    pub fn done(&mut self) {
        self.state = AlgorithmState::Finished;
        tracing::debug!(algorithm = %self.kind, "algorithm finished");
    }

    /// Moves to `Terminated`.
    pub fn terminate(&mut self) {
        self.state = AlgorithmState::Terminated;
        tracing::debug!(algorithm = %self.kind, "algorithm terminated early");
    }

    /// Moves to `Finished` or `Terminated` depending on how the run ended.
    pub fn finish(&mut self, flow: ControlFlow<()>) {
        match flow {
            ControlFlow::Continue(()) => self.done(),
            ControlFlow::Break(()) => self.terminate(),
        }
    }

    /// Returns `true` if `vertex` is live and admitted by the subgraph filter.
    #[inline]
    pub fn is_vertex_in_subgraph(&self, vertex: VertexId) -> bool {
        self.graph.contains_vertex(vertex)
            && self
                .subgraph
                .as_ref()
                .map_or(true, |subgraph| subgraph.get(AnyElement::Vertex(vertex)))
    }

    /// Returns `true` if `edge` is live and admitted by the subgraph filter.
    #[inline]
    pub fn is_edge_in_subgraph(&self, edge: EdgeId) -> bool {
        self.graph.contains_edge(edge)
            && self
                .subgraph
                .as_ref()
                .map_or(true, |subgraph| subgraph.get(AnyElement::Edge(edge)))
    }

    /// Returns `true` if `edge` passes the navigability filter.
    #[inline]
    pub fn is_navigable(&self, edge: EdgeId) -> bool {
        self.navigable.as_ref().map_or(true, |navigable| navigable.get(edge))
    }

    /// An incidence may be followed iff its edge and far vertex are in the
    /// subgraph and the edge is navigable.
    #[inline]
    pub fn is_traversable(&self, incidence: Incidence) -> bool {
        self.is_edge_in_subgraph(incidence.edge)
            && self.is_vertex_in_subgraph(incidence.that)
            && self.is_navigable(incidence.edge)
    }

    /// Traversable incidences of `vertex` in the configured direction.
    pub fn traversable_incidences(&self, vertex: VertexId) -> impl Iterator<Item = Incidence> + '_ {
        self.graph
            .incidences(vertex, self.direction)
            .filter(move |&incidence| self.is_traversable(incidence))
    }

    /// Vertices of the subgraph in ascending id order.
    pub fn subgraph_vertices(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.graph
            .vertices()
            .filter(move |&vertex| self.is_vertex_in_subgraph(vertex))
    }

    /// Fails with [`Error::InvalidArgument`] unless `vertex` is a live vertex
    /// of the subgraph.
    pub fn check_vertex(&self, vertex: VertexId, role: &str) -> Result<()> {
        if self.is_vertex_in_subgraph(vertex) {
            Ok(())
        } else {
            Err(Error::InvalidArgument(format!(
                "{role} {vertex} is not a vertex of the subgraph"
            )))
        }
    }
}

impl<G> fmt::Debug for AlgorithmBase<'_, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AlgorithmBase")
            .field("kind", &self.kind)
            .field("state", &self.state)
            .field("direction", &self.direction)
            .field("subgraph", &self.subgraph.is_some())
            .field("navigable", &self.navigable.is_some())
            .finish()
    }
}

/// The lifecycle contract implemented by every algorithm.
pub trait GraphAlgorithm<'g, G: Graph + 'g> {
    /// Shared state.
    fn base(&self) -> &AlgorithmBase<'g, G>;

    /// Shared state, mutably.
    fn base_mut(&mut self) -> &mut AlgorithmBase<'g, G>;

    /// Clears working storage and visitor state; moves to `ParamsSet`.
    /// Legal in every state.
    fn reset(&mut self);

    /// Which algorithm this is.
    fn kind(&self) -> AlgorithmKind {
        self.base().kind()
    }

    /// The current state.
    fn state(&self) -> AlgorithmState {
        self.base().state()
    }

    /// The graph.
    fn graph(&self) -> &'g G {
        self.base().graph()
    }

    /// The traversal direction.
    fn traversal_direction(&self) -> Direction {
        self.base().direction()
    }

    /// Whether results may be queried before the run ends. Always `false` here.
    fn is_hybrid(&self) -> bool {
        false
    }

    /// Whether the algorithm can traverse in `direction`.
    fn is_direction_supported(&self, _direction: Direction) -> bool {
        true
    }

    /// Restricts the algorithm to the elements admitted by `subgraph`.
    ///
    /// # Errors
    /// [`Error::IllegalState`] unless `Pristine` or `ParamsSet`.
    fn set_subgraph(&mut self, subgraph: impl BooleanFunction<AnyElement> + 'g) -> Result<&mut Self>
    where
        Self: Sized,
    {
        self.base_mut().set_subgraph(Some(Box::new(subgraph)))?;
        Ok(self)
    }

    /// Removes the subgraph restriction.
    ///
    /// # Errors
    /// [`Error::IllegalState`] unless `Pristine` or `ParamsSet`.
    fn clear_subgraph(&mut self) -> Result<&mut Self>
    where
        Self: Sized,
    {
        self.base_mut().set_subgraph(None)?;
        Ok(self)
    }

    /// Only edges admitted by `navigable` are followed.
    ///
    /// # Errors
    /// [`Error::IllegalState`] unless `Pristine` or `ParamsSet`.
    fn set_navigable(&mut self, navigable: impl BooleanFunction<EdgeId> + 'g) -> Result<&mut Self>
    where
        Self: Sized,
    {
        self.base_mut().set_navigable(Some(Box::new(navigable)))?;
        Ok(self)
    }

    /// Sets the traversal direction.
    ///
    /// # Errors
    /// [`Error::Unsupported`] if the algorithm cannot traverse in `direction`;
    /// [`Error::IllegalState`] unless `Pristine` or `ParamsSet`.
    fn set_traversal_direction(&mut self, direction: Direction) -> Result<&mut Self>
    where
        Self: Sized,
    {
        if !self.is_direction_supported(direction) {
            return Err(Error::Unsupported("traversal direction not supported by this algorithm"));
        }
        self.base_mut().set_direction(direction)?;
        Ok(self)
    }

    /// Enters `Running`, resetting first if the algorithm is still pristine.
    ///
    /// # Errors
    /// [`Error::IllegalState`] from `Running`, `Finished` or `Terminated`.
    fn start_running(&mut self) -> Result<()> {
        if self.state() == AlgorithmState::Pristine {
            self.reset();
        }
        self.base_mut().start_running("execute")
    }
}
