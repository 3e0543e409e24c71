//! Structural mutations applied to offspring chains.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::chain::{ChainNode, Graph, NodeId};

use super::config::Requirements;
use super::generator::{random_operator, random_subtree};

/// Mutation strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MutationType {
    /// Replace one node's operator with another from the matching pool.
    Simple,
    /// Replace a random subtree with a freshly grown one that fits the
    /// remaining depth budget.
    Growth,
    /// Collapse a random non-root secondary subtree into a primary leaf.
    Reduce,
}

/// Mutates `chain` with one strategy drawn uniformly from `types`.
///
/// Chains already at the depth bound drop `Growth` from the draw, falling
/// back to `Simple` when it was the only entry, so mutation never grows a
/// chain past `max_depth`.
///
/// # Panics
///
/// Panics when `types` is empty or `chain` has no nodes.
pub fn mutation<G: Graph, R: Rng>(
    types: &[MutationType],
    chain: &G,
    requirements: &Requirements,
    max_depth: usize,
    rng: &mut R,
) -> G {
    assert!(!types.is_empty(), "mutation types must not be empty");
    assert!(chain.root().is_some(), "mutated chain must not be empty");
    let at_bound = chain.depth() >= max_depth;
    let candidates: Vec<MutationType> = if at_bound {
        let non_growing: Vec<MutationType> = types
            .iter()
            .copied()
            .filter(|kind| *kind != MutationType::Growth)
            .collect();
        if non_growing.is_empty() {
            vec![MutationType::Simple]
        } else {
            non_growing
        }
    } else {
        types.to_vec()
    };
    let kind = candidates[rng.random_range(0..candidates.len())];
    match kind {
        MutationType::Simple => simple_mutation(chain, requirements, rng),
        MutationType::Growth => growth_mutation(chain, requirements, max_depth, rng),
        MutationType::Reduce => reduce_mutation(chain, requirements, rng),
    }
}

fn simple_mutation<G: Graph, R: Rng>(chain: &G, requirements: &Requirements, rng: &mut R) -> G {
    let mut out = chain.clone();
    let ids = out.node_ids();
    let id = ids[rng.random_range(0..ids.len())];
    let pool = if out.is_primary(id) {
        &requirements.primary
    } else {
        &requirements.secondary
    };
    let operator = random_operator(pool, rng).to_string();
    out.update_node(id, &operator);
    out
}

fn growth_mutation<G: Graph, R: Rng>(
    chain: &G,
    requirements: &Requirements,
    max_depth: usize,
    rng: &mut R,
) -> G {
    let mut out = chain.clone();
    let ids = out.node_ids();
    let at = ids[rng.random_range(0..ids.len())];
    let height_budget = max_depth.saturating_sub(out.depth_of(at));
    let (donor, donor_root): (G, NodeId) = random_subtree(requirements, height_budget, rng);
    out.replace_subtree(at, &donor, donor_root);
    out
}

fn reduce_mutation<G: Graph, R: Rng>(chain: &G, requirements: &Requirements, rng: &mut R) -> G {
    let mut out = chain.clone();
    let candidates: Vec<NodeId> = out
        .node_ids()
        .into_iter()
        .filter(|&id| out.parent(id).is_some() && !out.is_primary(id))
        .collect();
    if candidates.is_empty() {
        return out;
    }
    let at = candidates[rng.random_range(0..candidates.len())];
    let mut leaf = G::empty();
    let leaf_root = leaf.add_node(
        None,
        ChainNode::new(random_operator(&requirements.primary, rng)),
    );
    out.replace_subtree(at, &leaf, leaf_root);
    out
}
