//! Error type shared by markers, functions and algorithms.
//!
//! Early termination and negative cycles are *not* errors: they are terminal
//! algorithm states reported through [`AlgorithmState::Terminated`] and
//! boolean result flags.

use thiserror::Error;

use crate::algorithms::{AlgorithmKind, AlgorithmState};

/// Errors raised by the algorithm core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// An operation was called in a state that does not allow it.
    #[error("operation `{operation}` is illegal in state {state:?}")]
    IllegalState {
        /// The state the algorithm was in.
        state: AlgorithmState,
        /// The rejected operation.
        operation: &'static str,
    },

    /// The implementation does not offer this capability.
    #[error("unsupported operation: {0}")]
    Unsupported(&'static str),

    /// An argument was rejected before any state was changed.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A visitor refused to be attached to an algorithm.
    #[error("visitor requires {visitor} but was attached to {algorithm}")]
    IncompatibleAlgorithm {
        /// What the visitor needs.
        visitor: &'static str,
        /// The algorithm it was offered.
        algorithm: AlgorithmKind,
    },
}

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn illegal_state_message_names_operation() {
        let err = Error::IllegalState {
            state: AlgorithmState::Pristine,
            operation: "weighted_distance",
        };
        let msg = err.to_string();
        assert!(msg.contains("weighted_distance"));
        assert!(msg.contains("Pristine"));
    }

    #[test]
    fn errors_are_std_errors() {
        fn assert_error<E: std::error::Error>(_: &E) {}
        assert_error(&Error::Unsupported("set"));
    }

    #[test]
    fn incompatible_algorithm_names_both_sides() {
        let err = Error::IncompatibleAlgorithm {
            visitor: "a shortest-path search",
            algorithm: AlgorithmKind::DepthFirstSearch,
        };
        assert_eq!(
            err.to_string(),
            "visitor requires a shortest-path search but was attached to depth-first search"
        );
    }
}
