//! Thin compositions of a search and a visitor.
//!
//! - `weak_components`: [`WeakComponentsWithBfs`]
//! - `is_tree`: [`IsTree`]
//! - `topological_order`: [`TopologicalOrderWithDfs`]
//!
//! Each wraps one search, registers its own collecting visitor with it and
//! shares the search's [`AlgorithmBase`](super::AlgorithmBase), so the
//! lifecycle guards behave exactly as for the plain search.

pub mod is_tree;
pub mod topological_order;
pub mod weak_components;

pub use is_tree::IsTree;
pub use topological_order::TopologicalOrderWithDfs;
pub use weak_components::WeakComponentsWithBfs;
