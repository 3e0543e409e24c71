//! Constrained random chain generation.

use rand::Rng;

use crate::chain::{ChainNode, Graph, NodeId};

use super::config::Requirements;
use super::types::{Constraint, Individual};

pub(crate) fn random_operator<'a, R: Rng>(pool: &'a [String], rng: &mut R) -> &'a str {
    &pool[rng.random_range(0..pool.len())]
}

fn grow<G: Graph, R: Rng>(
    requirements: &Requirements,
    max_depth: usize,
    rng: &mut R,
) -> (G, NodeId) {
    let mut chain = G::empty();
    let root = chain.add_node(
        None,
        ChainNode::new(random_operator(&requirements.secondary, rng)),
    );
    let mut frontier = vec![(root, 0usize)];
    while let Some((parent, depth)) = frontier.pop() {
        let arity = rng.random_range(2..=requirements.max_arity);
        for _ in 0..arity {
            let child_depth = depth + 1;
            if child_depth >= max_depth || rng.random_bool(0.5) {
                chain.add_node(
                    Some(parent),
                    ChainNode::new(random_operator(&requirements.primary, rng)),
                );
            } else {
                let child = chain.add_node(
                    Some(parent),
                    ChainNode::new(random_operator(&requirements.secondary, rng)),
                );
                frontier.push((child, child_depth));
            }
        }
    }
    (chain, root)
}

/// Grows one random chain of depth at most `max_depth` (at least 1).
///
/// The root is drawn from the secondary pool and expanded with
/// `2..=max_arity` children per node. A child at the depth bound is always a
/// primary leaf; above the bound it becomes a leaf on a fair coin flip.
pub fn random_chain<G: Graph, R: Rng>(
    requirements: &Requirements,
    max_depth: usize,
    rng: &mut R,
) -> G {
    let (chain, _) = grow(requirements, max_depth, rng);
    chain
}

/// Grows a random donor subtree of height at most `height_bound`, or a
/// single primary leaf when the bound is zero. Returns the donor and its
/// root id.
pub(crate) fn random_subtree<G: Graph, R: Rng>(
    requirements: &Requirements,
    height_bound: usize,
    rng: &mut R,
) -> (G, NodeId) {
    if height_bound == 0 {
        let mut leaf = G::empty();
        let root = leaf.add_node(
            None,
            ChainNode::new(random_operator(&requirements.primary, rng)),
        );
        return (leaf, root);
    }
    grow(requirements, height_bound, rng)
}

/// Accumulates `count` constraint-passing random chains.
///
/// Rejected chains are regenerated until the count is met, so a constraint
/// that admits nothing blocks the run instead of producing an inadmissible
/// population.
pub fn generate_population<G, C, R>(
    requirements: &Requirements,
    max_depth: usize,
    constraint: &C,
    count: usize,
    rng: &mut R,
) -> Vec<Individual<G>>
where
    G: Graph,
    C: Constraint<G>,
    R: Rng,
{
    let mut population = Vec::with_capacity(count);
    while population.len() < count {
        let chain: G = random_chain(requirements, max_depth, rng);
        if constraint.is_valid(&chain) {
            population.push(Individual::new(chain));
        } else {
            log::debug!("generated chain rejected by constraint, retrying");
        }
    }
    population
}
