//! Parent selection strategies.

use std::cmp::Ordering;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::chain::Graph;

use super::types::Individual;

/// Parent selection strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionType {
    /// Sample the given number of candidates with replacement and keep the
    /// best one.
    Tournament(usize),
}

impl Default for SelectionType {
    fn default() -> Self {
        SelectionType::Tournament(3)
    }
}

impl SelectionType {
    /// Picks one parent index from `pool`. Ties resolve to the earliest
    /// sampled candidate.
    ///
    /// # Panics
    ///
    /// Panics when `pool` is empty or the tournament size is zero.
    pub fn select_one<G: Graph, R: Rng>(&self, pool: &[Individual<G>], rng: &mut R) -> usize {
        match *self {
            SelectionType::Tournament(size) => tournament(pool, size, rng),
        }
    }
}

/// Draws exactly `count` parent indices from `pool`, picking a strategy
/// uniformly from `types` for each draw.
///
/// # Panics
///
/// Panics when `types` or `pool` is empty.
pub fn selection<G: Graph, R: Rng>(
    types: &[SelectionType],
    pool: &[Individual<G>],
    count: usize,
    rng: &mut R,
) -> Vec<usize> {
    assert!(!types.is_empty(), "selection types must not be empty");
    (0..count)
        .map(|_| {
            let strategy = types[rng.random_range(0..types.len())];
            strategy.select_one(pool, rng)
        })
        .collect()
}

fn tournament<G: Graph, R: Rng>(pool: &[Individual<G>], size: usize, rng: &mut R) -> usize {
    assert!(!pool.is_empty(), "selection pool must not be empty");
    assert!(size > 0, "tournament size must be at least 1");
    let mut best = rng.random_range(0..pool.len());
    for _ in 1..size {
        let challenger = rng.random_range(0..pool.len());
        let ord = pool[challenger]
            .fitness
            .partial_cmp(&pool[best].fitness)
            .unwrap_or(Ordering::Equal);
        if ord == Ordering::Less {
            best = challenger;
        }
    }
    best
}
