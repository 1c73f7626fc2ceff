//! # `jgralab` - Graph Algorithm Core
//!
//! Markers, functions, visitors and algorithms over TGraphs: directed graphs
//! whose vertices and edges are addressed by dense ids and whose incidences
//! are ordered per vertex.
//!
//! ## Key Features
//!
//! - **Graph markers**: associative arrays keyed by vertex or edge id, in
//!   dense, bit-set, primitive and hash encodings, kept consistent with graph
//!   growth and element deletion.
//! - **Functions**: typed mappings and predicates; closures, markers and
//!   matrices all plug into the same traits.
//! - **Visitors**: narrow capability traits for traversal events with
//!   cooperative early termination through [`ControlFlow`](core::ops::ControlFlow).
//! - **Algorithms**: BFS, DFS, weak components, tree test, topological order,
//!   Dijkstra, A*, Ford-Moore, Floyd and Warshall, all restricted by optional
//!   subgraph and navigability filters and driven by one lifecycle.
//!
//! ## Architecture
//!
//! Modules from the leaves up:
//!
//! 1. [`graph`]: element ids, the [`Graph`] trait, structural-change
//!    listeners and the reference graph [`TGraph`].
//! 2. [`markers`]: [`Marker`](markers::Marker) over pluggable storages and
//!    [`SubgraphMarker`](markers::SubgraphMarker).
//! 3. [`functions`]: [`Function`](functions::Function),
//!    [`BooleanFunction`](functions::BooleanFunction), binary variants,
//!    [`Permutation`](functions::Permutation) and
//!    [`VertexMatrix`](functions::VertexMatrix).
//! 4. [`visitors`]: visitor traits and their compositions.
//! 5. [`algorithms`]: the state machine and every algorithm.
//! 6. [`collections`]: the indexed priority queue behind Dijkstra and A*.
//!
//! Everything is single-threaded: markers share storage through
//! `Rc<RefCell<_>>` and are therefore neither `Send` nor `Sync`.
//!
//! ### Lifecycle
//!
//! Algorithms move through [`AlgorithmState`](algorithms::AlgorithmState):
//! parameters may only change before a run, results may only be read after
//! one, and `reset()` is required before running again. Violations are
//! reported as [`Error::IllegalState`].
//!
//! ## Example
//!
//! ```rust
//! use jgralab::algorithms::{DijkstraSearch, GraphAlgorithm, ShortestPathAlgorithm, WeightedAlgorithm};
//! use jgralab::graph::{EdgeId, TGraph, VertexId};
//!
//! # fn main() -> jgralab::Result<()> {
//! // A->B 1, B->C 2, A->C 5, C->D 1
//! let graph = TGraph::from_edges(4, &[(0, 1), (1, 2), (0, 2), (2, 3)])?;
//! let weights = [1.0, 2.0, 5.0, 1.0];
//!
//! let mut dijkstra = DijkstraSearch::new(&graph);
//! dijkstra
//!     .set_edge_weight(move |edge: EdgeId| weights[edge.index()])?
//!     .execute_from(VertexId::new(0))?;
//!
//! assert_eq!(dijkstra.distance_to(VertexId::new(3))?, 4.0);
//! assert_eq!(dijkstra.path_to(VertexId::new(3))?.map(|path| path.len()), Some(3));
//!
//! // Results are frozen until reset.
//! assert!(dijkstra.execute_from(VertexId::new(1)).is_err());
//! dijkstra.reset();
//! dijkstra.execute_from(VertexId::new(1))?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs, clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

pub mod algorithms;
pub mod collections;
pub mod error;
pub mod functions;
pub mod graph;
pub mod markers;
pub mod visitors;

pub use error::{Error, Result};
pub use graph::{Direction, Graph, TGraph};

// Compile-time assertions for memory layout
const _: () = {
    use core::mem;

    // Ids are plain indices.
    assert!(mem::size_of::<graph::VertexId>() == mem::size_of::<usize>());
    assert!(mem::size_of::<graph::EdgeId>() == mem::size_of::<usize>());

    // An incidence is three ids and a flag.
    assert!(mem::size_of::<graph::Incidence>() <= mem::size_of::<usize>() * 4);
    assert!(mem::size_of::<graph::Direction>() == 1);
};
