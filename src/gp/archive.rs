//! Bounded Pareto archive for multi-objective runs.

use std::cmp::Ordering;
use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::chain::{Fitness, Graph};

use super::multi_objective::{crowding_distance, non_dominated_indices};
use super::types::Individual;

/// Non-dominated individuals retained across generations.
///
/// Members are clones frozen at update time, so later population rewrites
/// cannot touch them. Only individuals carrying a vector fitness are
/// admitted; a member whose objective count differs from the first admitted
/// one is skipped. Capacity overflow keeps the most crowding-diverse
/// members, so updates are deterministic for a given input sequence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParetoArchive<G> {
    capacity: usize,
    items: Vec<Individual<G>>,
}

impl<G: Graph> ParetoArchive<G> {
    /// Creates an empty archive holding at most `capacity` members.
    ///
    /// # Panics
    ///
    /// Panics when `capacity` is zero.
    pub fn new(capacity: usize) -> Self {
        assert!(capacity > 0, "archive capacity must be at least 1");
        Self {
            capacity,
            items: Vec::new(),
        }
    }

    /// Current members, mutually non-dominated.
    pub fn items(&self) -> &[Individual<G>] {
        &self.items
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the archive has no members.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Maximum number of members.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Folds the population into the archive: drops newly dominated
    /// members, collapses duplicate objective vectors to their first
    /// occurrence, and trims overflow by descending crowding distance.
    pub fn update(&mut self, population: &[Individual<G>]) {
        let mut candidates: Vec<(Individual<G>, Vec<f64>)> = Vec::new();
        let mut expected_len: Option<usize> = None;
        for individual in self.items.drain(..).chain(population.iter().cloned()) {
            let Fitness::Multi(vector) = individual.fitness.clone() else {
                continue;
            };
            if *expected_len.get_or_insert(vector.len()) != vector.len() {
                continue;
            }
            if candidates.iter().any(|(_, kept)| *kept == vector) {
                continue;
            }
            candidates.push((individual, vector));
        }
        let vectors: Vec<Vec<f64>> = candidates.iter().map(|(_, v)| v.clone()).collect();
        let mut front = non_dominated_indices(&vectors);
        if front.len() > self.capacity {
            let front_vectors: Vec<Vec<f64>> =
                front.iter().map(|&i| vectors[i].clone()).collect();
            let distance = crowding_distance(&front_vectors);
            let mut by_distance: Vec<usize> = (0..front.len()).collect();
            by_distance.sort_by(|&a, &b| {
                distance[b].partial_cmp(&distance[a]).unwrap_or(Ordering::Equal)
            });
            by_distance.truncate(self.capacity);
            front = by_distance.into_iter().map(|i| front[i]).collect();
        }
        let keep: HashSet<usize> = front.into_iter().collect();
        self.items = candidates
            .into_iter()
            .enumerate()
            .filter(|(i, _)| keep.contains(i))
            .map(|(_, (individual, _))| individual)
            .collect();
    }

    /// Objective vectors of the current members, sorted lexicographically.
    /// Two archives holding the same front report equal vectors regardless
    /// of member order.
    pub fn fitness_front(&self) -> Vec<Vec<f64>> {
        let mut front: Vec<Vec<f64>> = self
            .items
            .iter()
            .filter_map(|member| member.fitness.values().map(<[f64]>::to_vec))
            .collect();
        front.sort_by(|a, b| a.partial_cmp(b).unwrap_or(Ordering::Equal));
        front
    }

    /// Members whose objective vectors are not already present in `pool`,
    /// cloned for selection-pool merging.
    pub fn non_duplicate_members(&self, pool: &[Individual<G>]) -> Vec<Individual<G>> {
        self.items
            .iter()
            .filter(|member| !pool.iter().any(|ind| ind.fitness == member.fitness))
            .cloned()
            .collect()
    }
}
