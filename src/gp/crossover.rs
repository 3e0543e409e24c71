//! Subtree crossover between parent chains.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::chain::{Graph, NodeId};

/// Node pairings tried before falling back to plain parent copies.
const MAX_ATTEMPTS: usize = 10;

/// Crossover strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CrossoverType {
    /// Swap randomly chosen non-root subtrees between the parents.
    Subtree,
    /// Copy the parents unchanged.
    None,
}

/// Produces exactly two offspring chains from two parents.
///
/// A strategy is drawn uniformly from `types` and applied with probability
/// `prob`; otherwise, and whenever no depth-respecting swap is found, the
/// offspring are plain copies of the parents.
///
/// # Panics
///
/// Panics when `types` is empty.
pub fn crossover<G: Graph, R: Rng>(
    types: &[CrossoverType],
    first: &G,
    second: &G,
    prob: f64,
    max_depth: usize,
    rng: &mut R,
) -> (G, G) {
    assert!(!types.is_empty(), "crossover types must not be empty");
    let kind = types[rng.random_range(0..types.len())];
    if rng.random_range(0.0..1.0) >= prob {
        return (first.clone(), second.clone());
    }
    match kind {
        CrossoverType::None => (first.clone(), second.clone()),
        CrossoverType::Subtree => subtree_crossover(first, second, max_depth, rng),
    }
}

fn subtree_crossover<G: Graph, R: Rng>(
    first: &G,
    second: &G,
    max_depth: usize,
    rng: &mut R,
) -> (G, G) {
    for _ in 0..MAX_ATTEMPTS {
        let (Some(at_first), Some(at_second)) =
            (random_non_root_node(first, rng), random_non_root_node(second, rng))
        else {
            break;
        };
        let mut child_a = first.clone();
        child_a.replace_subtree(at_first, second, at_second);
        let mut child_b = second.clone();
        child_b.replace_subtree(at_second, first, at_first);
        if child_a.depth() <= max_depth && child_b.depth() <= max_depth {
            return (child_a, child_b);
        }
    }
    (first.clone(), second.clone())
}

fn random_non_root_node<G: Graph, R: Rng>(chain: &G, rng: &mut R) -> Option<NodeId> {
    let candidates: Vec<NodeId> = chain
        .node_ids()
        .into_iter()
        .filter(|&id| chain.parent(id).is_some())
        .collect();
    if candidates.is_empty() {
        None
    } else {
        Some(candidates[rng.random_range(0..candidates.len())])
    }
}
