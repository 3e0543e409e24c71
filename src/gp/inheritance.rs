//! Next-generation assembly.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::chain::Graph;

use super::types::Individual;

/// Population replacement scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GeneticScheme {
    /// Offspring replace the whole generation.
    Generational,
    /// Offspring replace only their own count; the best of the prior
    /// generation survive unchanged.
    SteadyState,
}

/// Builds the next population of exactly `target` individuals from the
/// prior generation and its offspring.
///
/// Under `Generational`, offspring fill the population in their input
/// order; a shortfall is topped up with the best prior individuals. Under
/// `SteadyState`, the best `target - offspring` prior individuals survive
/// and the offspring are appended.
pub fn inheritance<G: Graph>(
    scheme: GeneticScheme,
    prev: &[Individual<G>],
    mut offspring: Vec<Individual<G>>,
    target: usize,
) -> Vec<Individual<G>> {
    offspring.truncate(target);
    match scheme {
        GeneticScheme::Generational => {
            if offspring.len() < target {
                let shortfall = target - offspring.len();
                offspring.extend(best_of(prev, shortfall));
            }
            offspring
        }
        GeneticScheme::SteadyState => {
            let survivors = target - offspring.len();
            let mut next = best_of(prev, survivors);
            next.append(&mut offspring);
            next
        }
    }
}

/// Clones the `count` best individuals of `population`, keeping input order
/// on ties.
fn best_of<G: Graph>(population: &[Individual<G>], count: usize) -> Vec<Individual<G>> {
    let mut order: Vec<usize> = (0..population.len()).collect();
    order.sort_by(|&a, &b| {
        population[a]
            .fitness
            .partial_cmp(&population[b].fitness)
            .unwrap_or(Ordering::Equal)
    });
    order
        .into_iter()
        .take(count)
        .map(|i| population[i].clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::{Chain, ChainNode, Fitness, Graph};

    fn individual(operator: &str, fitness: f64) -> Individual<Chain> {
        let mut chain = Chain::empty();
        chain.add_node(None, ChainNode::new(operator));
        let mut individual = Individual::new(chain);
        individual.fitness = Fitness::single(fitness);
        individual
    }

    fn operators(population: &[Individual<Chain>]) -> Vec<String> {
        population
            .iter()
            .map(|ind| ind.chain.node(ind.chain.root().unwrap()).operator.clone())
            .collect()
    }

    #[test]
    fn generational_keeps_offspring_order() {
        let prev = vec![individual("a", 0.1), individual("b", 0.2)];
        let offspring = vec![individual("x", 0.9), individual("y", 0.8)];
        let next = inheritance(GeneticScheme::Generational, &prev, offspring, 2);
        assert_eq!(operators(&next), vec!["x", "y"]);
    }

    #[test]
    fn generational_tops_up_a_shortfall_with_the_best() {
        let prev = vec![individual("worst", 0.9), individual("best", 0.1)];
        let offspring = vec![individual("x", 0.5)];
        let next = inheritance(GeneticScheme::Generational, &prev, offspring, 2);
        assert_eq!(operators(&next), vec!["x", "best"]);
    }

    #[test]
    fn generational_truncates_surplus_offspring() {
        let prev = vec![individual("a", 0.1)];
        let offspring = vec![
            individual("x", 0.5),
            individual("y", 0.6),
            individual("z", 0.7),
        ];
        let next = inheritance(GeneticScheme::Generational, &prev, offspring, 2);
        assert_eq!(operators(&next), vec!["x", "y"]);
    }

    #[test]
    fn steady_state_keeps_the_best_survivors() {
        let prev = vec![
            individual("mid", 0.5),
            individual("best", 0.1),
            individual("worst", 0.9),
        ];
        let offspring = vec![individual("x", 0.4)];
        let next = inheritance(GeneticScheme::SteadyState, &prev, offspring, 3);
        assert_eq!(operators(&next), vec!["best", "mid", "x"]);
    }

    #[test]
    fn steady_state_ties_keep_input_order() {
        let prev = vec![
            individual("first", 0.5),
            individual("second", 0.5),
            individual("third", 0.5),
        ];
        let next = inheritance(GeneticScheme::SteadyState, &prev, Vec::new(), 2);
        assert_eq!(operators(&next), vec!["first", "second"]);
    }

    #[test]
    fn output_size_matches_the_target() {
        let prev: Vec<Individual<Chain>> =
            (0..6).map(|i| individual("p", i as f64 / 10.0)).collect();
        let offspring: Vec<Individual<Chain>> =
            (0..4).map(|i| individual("o", i as f64 / 10.0)).collect();
        for target in 1..=6 {
            for scheme in [GeneticScheme::Generational, GeneticScheme::SteadyState] {
                let next = inheritance(scheme, &prev, offspring.clone(), target);
                assert_eq!(next.len(), target);
            }
        }
    }
}
