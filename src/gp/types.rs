//! Optimiser-facing seams: individuals, objectives, and constraints.

use serde::{Deserialize, Serialize};

use crate::chain::{Fitness, Graph};

/// A candidate chain together with its evaluation state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Individual<G> {
    /// The chain structure under evolution.
    pub chain: G,
    /// Latest evaluation result; `Invalid` until evaluated.
    pub fitness: Fitness,
}

impl<G: Graph> Individual<G> {
    /// Wraps a chain, not yet evaluated.
    pub fn new(chain: G) -> Self {
        Self {
            chain,
            fitness: Fitness::Invalid,
        }
    }

    /// Number of nodes in the underlying chain.
    pub fn node_count(&self) -> usize {
        self.chain.node_count()
    }
}

/// Quality measure for chains. Lower fitness is better.
///
/// Returning `None` signals an evaluation failure; the individual keeps the
/// invalid sentinel and stays in the population rather than aborting the
/// run. Implementations must be callable from multiple threads. Closures of
/// type `Fn(&G) -> Option<Fitness>` implement this automatically.
pub trait Objective<G>: Send + Sync {
    /// Evaluates one chain.
    fn evaluate(&self, chain: &G) -> Option<Fitness>;
}

impl<G, F> Objective<G> for F
where
    F: Fn(&G) -> Option<Fitness> + Send + Sync,
{
    fn evaluate(&self, chain: &G) -> Option<Fitness> {
        self(chain)
    }
}

/// Structural admissibility predicate, applied to freshly generated chains
/// and to reproduction products. Closures of type `Fn(&G) -> bool` implement
/// this automatically.
pub trait Constraint<G>: Send + Sync {
    /// Whether the chain is admissible.
    fn is_valid(&self, chain: &G) -> bool;
}

impl<G, F> Constraint<G> for F
where
    F: Fn(&G) -> bool + Send + Sync,
{
    fn is_valid(&self, chain: &G) -> bool {
        self(chain)
    }
}

/// Constraint that admits every chain.
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl<G> Constraint<G> for AcceptAll {
    fn is_valid(&self, _chain: &G) -> bool {
        true
    }
}
