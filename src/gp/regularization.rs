//! Pre-selection regularization of the parent pool.

use serde::{Deserialize, Serialize};

use crate::chain::Graph;
use crate::error::Result;

use super::runner::evaluate_individuals;
use super::types::{Constraint, Individual, Objective};

/// Pool regularization strategy applied before selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RegularizationType {
    /// Pass the population through unchanged.
    None,
    /// Extract every non-root secondary subtree as a standalone candidate,
    /// evaluate the admissible ones, and append them to the pool.
    Decremental,
}

/// Builds the selection pool for one generation.
///
/// The input population is always retained in full and its fitness values
/// are never touched; strategies may only append extra candidates.
pub fn regularized_population<G, O, C>(
    kind: RegularizationType,
    population: &[Individual<G>],
    objective: &O,
    constraint: &C,
    multi_objective: bool,
    parallel: bool,
    objective_count: &mut Option<usize>,
) -> Result<Vec<Individual<G>>>
where
    G: Graph,
    O: Objective<G>,
    C: Constraint<G>,
{
    let mut pool = population.to_vec();
    match kind {
        RegularizationType::None => {}
        RegularizationType::Decremental => {
            let mut extras = decremental_candidates(population, constraint);
            evaluate_individuals(&mut extras, objective, multi_objective, parallel, objective_count)?;
            log::debug!("decremental regularization added {} candidates", extras.len());
            pool.extend(extras);
        }
    }
    Ok(pool)
}

fn decremental_candidates<G: Graph, C: Constraint<G>>(
    population: &[Individual<G>],
    constraint: &C,
) -> Vec<Individual<G>> {
    let mut extras = Vec::new();
    for individual in population {
        for id in individual.chain.node_ids() {
            if individual.chain.parent(id).is_none() || individual.chain.is_primary(id) {
                continue;
            }
            let sub = individual.chain.subtree(id);
            if constraint.is_valid(&sub) {
                extras.push(Individual::new(sub));
            }
        }
    }
    extras
}
