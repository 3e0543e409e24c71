//! Crate-level error type.

use thiserror::Error;

/// Errors surfaced by configuration validation and the optimiser run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Requirements or parameters rejected by `validate`.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A non-empty population was required.
    #[error("population is empty")]
    EmptyPopulation,

    /// The objective produced a fitness of the wrong shape for the run mode.
    #[error("objective returned a {actual} fitness where a {expected} fitness was expected")]
    FitnessShape {
        /// Shape required by the configured mode.
        expected: &'static str,
        /// Shape the objective actually produced.
        actual: &'static str,
    },

    /// Multi-objective vectors changed length during the run.
    #[error("objective count changed from {expected} to {actual}")]
    ObjectiveCountMismatch {
        /// Objective count established by the first evaluated vector.
        expected: usize,
        /// Conflicting count produced later.
        actual: usize,
    },

    /// A best-individual query found no validly evaluated member.
    #[error("no individual with a valid fitness")]
    NoValidFitness,
}

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;
