//! Support collections for the algorithms.
//!
//! - `priority_queue`: indexed binary min-heap with decrease-key

pub mod priority_queue;

pub use priority_queue::PriorityQueue;
