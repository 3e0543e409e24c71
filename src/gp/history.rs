//! Per-generation run history.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::chain::{Fitness, Graph};

use super::types::Individual;

/// Snapshot of one completed generation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRecord<G> {
    /// The population after the generation completed.
    pub population: Vec<Individual<G>>,
    /// Pareto archive members at the same point; empty in single-objective
    /// runs.
    pub archive: Vec<Individual<G>>,
}

/// Append-only log of generation snapshots, starting with the initial
/// population. The optimiser writes it and never reads it back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct History<G> {
    /// One record per completed generation.
    pub generations: Vec<GenerationRecord<G>>,
}

impl<G: Graph> History<G> {
    pub(crate) fn new() -> Self {
        Self {
            generations: Vec::new(),
        }
    }

    /// Number of recorded generations.
    pub fn len(&self) -> usize {
        self.generations.len()
    }

    /// Whether nothing has been recorded yet.
    pub fn is_empty(&self) -> bool {
        self.generations.is_empty()
    }

    pub(crate) fn record(&mut self, population: &[Individual<G>], archive: &[Individual<G>]) {
        self.generations.push(GenerationRecord {
            population: population.to_vec(),
            archive: archive.to_vec(),
        });
    }

    /// Best valid fitness per generation; `Invalid` where a generation had
    /// no validly evaluated individual.
    pub fn best_fitness_per_generation(&self) -> Vec<Fitness> {
        self.generations
            .iter()
            .map(|record| {
                record
                    .population
                    .iter()
                    .map(|individual| &individual.fitness)
                    .filter(|fitness| fitness.is_valid())
                    .min_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal))
                    .cloned()
                    .unwrap_or(Fitness::Invalid)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::{Chain, ChainNode};

    fn individual(fitness: Fitness) -> Individual<Chain> {
        let mut chain = Chain::empty();
        chain.add_node(None, ChainNode::new("logit"));
        let mut individual = Individual::new(chain);
        individual.fitness = fitness;
        individual
    }

    #[test]
    fn records_accumulate_in_order() {
        let mut history: History<Chain> = History::new();
        assert!(history.is_empty());
        history.record(&[individual(Fitness::single(0.5))], &[]);
        history.record(&[individual(Fitness::single(0.3))], &[]);
        assert_eq!(history.len(), 2);
        assert_eq!(history.generations[0].population.len(), 1);
    }

    #[test]
    fn best_fitness_tracks_each_generation() {
        let mut history: History<Chain> = History::new();
        history.record(
            &[individual(Fitness::single(0.5)), individual(Fitness::single(0.2))],
            &[],
        );
        history.record(
            &[individual(Fitness::single(0.4)), individual(Fitness::Invalid)],
            &[],
        );
        history.record(&[individual(Fitness::Invalid)], &[]);
        assert_eq!(
            history.best_fitness_per_generation(),
            vec![
                Fitness::single(0.2),
                Fitness::single(0.4),
                Fitness::Invalid
            ]
        );
    }

    #[test]
    fn snapshots_are_frozen_copies() {
        let mut history: History<Chain> = History::new();
        let mut population = vec![individual(Fitness::single(0.5))];
        history.record(&population, &[]);
        population[0].fitness = Fitness::single(0.1);
        assert_eq!(
            history.generations[0].population[0].fitness,
            Fitness::single(0.5)
        );
    }
}
