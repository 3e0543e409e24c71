//! Run configuration: structural requirements and optimiser parameters.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

use super::crossover::CrossoverType;
use super::inheritance::GeneticScheme;
use super::mutation::MutationType;
use super::regularization::RegularizationType;
use super::selection::SelectionType;

/// Structural requirements for one optimisation run.
///
/// # Examples
///
/// ```
/// use evochain::gp::Requirements;
///
/// let requirements = Requirements::new(
///     vec!["logit".into(), "knn".into()],
///     vec!["xgboost".into(), "rf".into()],
/// )
/// .with_pop_size(20)
/// .with_max_depth(4)
/// .with_num_of_generations(30);
/// assert!(requirements.validate().is_ok());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Requirements {
    /// Operators admissible as primary (leaf) nodes.
    pub primary: Vec<String>,
    /// Operators admissible as secondary (internal) nodes.
    pub secondary: Vec<String>,
    /// Population size, constant across generations.
    pub pop_size: usize,
    /// Hard maximum chain depth.
    pub max_depth: usize,
    /// Maximum children per secondary node.
    pub max_arity: usize,
    /// Depth bound for the initial population, and the starting working
    /// bound under adaptive depth. Defaults to `max_depth`.
    pub start_depth: Option<usize>,
    /// Probability that a parent pair undergoes crossover.
    pub crossover_prob: f64,
    /// Total number of generations, counting the initial population.
    pub num_of_generations: usize,
    /// Wall-clock budget, checked at generation boundaries.
    pub max_lead_time: Option<Duration>,
    /// Evaluate every primary operator as a single-node chain before the
    /// run, keep the best as a result baseline, and narrow the working
    /// primary pool to the strongest operators.
    pub add_single_model_chains: bool,
}

impl Requirements {
    /// Creates requirements for the given operator pools, with defaults for
    /// everything else.
    pub fn new(primary: Vec<String>, secondary: Vec<String>) -> Self {
        Self {
            primary,
            secondary,
            pop_size: 10,
            max_depth: 3,
            max_arity: 2,
            start_depth: None,
            crossover_prob: 0.8,
            num_of_generations: 20,
            max_lead_time: None,
            add_single_model_chains: true,
        }
    }

    /// Sets the population size.
    pub fn with_pop_size(mut self, pop_size: usize) -> Self {
        self.pop_size = pop_size;
        self
    }

    /// Sets the hard maximum chain depth.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Sets the maximum children per secondary node.
    pub fn with_max_arity(mut self, max_arity: usize) -> Self {
        self.max_arity = max_arity;
        self
    }

    /// Sets the initial-population depth bound.
    pub fn with_start_depth(mut self, start_depth: usize) -> Self {
        self.start_depth = Some(start_depth);
        self
    }

    /// Sets the crossover probability, clamped to `[0, 1]`.
    pub fn with_crossover_prob(mut self, prob: f64) -> Self {
        self.crossover_prob = prob.clamp(0.0, 1.0);
        self
    }

    /// Sets the total number of generations.
    pub fn with_num_of_generations(mut self, generations: usize) -> Self {
        self.num_of_generations = generations;
        self
    }

    /// Sets the wall-clock budget.
    pub fn with_max_lead_time(mut self, budget: Duration) -> Self {
        self.max_lead_time = Some(budget);
        self
    }

    /// Enables or disables the single-operator baseline scan.
    pub fn with_add_single_model_chains(mut self, enabled: bool) -> Self {
        self.add_single_model_chains = enabled;
        self
    }

    /// Checks the requirements for internal consistency.
    pub fn validate(&self) -> Result<()> {
        if self.primary.is_empty() {
            return Err(Error::InvalidConfiguration(
                "primary operator pool must not be empty".to_string(),
            ));
        }
        if self.secondary.is_empty() {
            return Err(Error::InvalidConfiguration(
                "secondary operator pool must not be empty".to_string(),
            ));
        }
        if self.pop_size == 0 {
            return Err(Error::InvalidConfiguration(
                "pop_size must be at least 1".to_string(),
            ));
        }
        if self.max_depth == 0 {
            return Err(Error::InvalidConfiguration(
                "max_depth must be at least 1".to_string(),
            ));
        }
        if self.max_arity < 2 {
            return Err(Error::InvalidConfiguration(
                "max_arity must be at least 2".to_string(),
            ));
        }
        if self.num_of_generations == 0 {
            return Err(Error::InvalidConfiguration(
                "num_of_generations must be at least 1".to_string(),
            ));
        }
        if !(0.0..=1.0).contains(&self.crossover_prob) {
            return Err(Error::InvalidConfiguration(
                "crossover_prob must be within [0, 1]".to_string(),
            ));
        }
        if let Some(start_depth) = self.start_depth {
            if start_depth == 0 || start_depth > self.max_depth {
                return Err(Error::InvalidConfiguration(
                    "start_depth must be within [1, max_depth]".to_string(),
                ));
            }
        }
        if self.max_lead_time == Some(Duration::ZERO) {
            return Err(Error::InvalidConfiguration(
                "max_lead_time must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// Strategy choices and mode switches for the optimiser.
///
/// # Examples
///
/// ```
/// use evochain::gp::{GeneticScheme, OptimiserParameters, SelectionType};
///
/// let parameters = OptimiserParameters::default()
///     .with_selection_types(vec![SelectionType::Tournament(5)])
///     .with_genetic_scheme(GeneticScheme::SteadyState)
///     .with_seed(42);
/// assert!(parameters.validate().is_ok());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimiserParameters {
    /// Selection strategies, drawn uniformly per parent pick.
    pub selection_types: Vec<SelectionType>,
    /// Crossover strategies, drawn uniformly per pair.
    pub crossover_types: Vec<CrossoverType>,
    /// Mutation strategies, drawn uniformly per offspring.
    pub mutation_types: Vec<MutationType>,
    /// Pre-selection pool regularization.
    pub regularization_type: RegularizationType,
    /// Population replacement scheme.
    pub genetic_scheme: GeneticScheme,
    /// Multi-objective mode: vector fitness and a Pareto archive.
    pub multi_objective: bool,
    /// Grow the working depth bound on prolonged stagnation.
    pub auto_depth: bool,
    /// Stagnation length that triggers a depth increase.
    pub depth_increase_step: usize,
    /// Offspring per generation under the steady-state scheme, as a
    /// fraction of the population size.
    pub offspring_rate: f64,
    /// Maximum number of archive members in multi-objective mode.
    pub archive_capacity: usize,
    /// Evaluate populations on the rayon thread pool.
    pub parallel: bool,
    /// Seed for the run's random generator; `None` draws one from the OS.
    pub seed: Option<u64>,
}

impl Default for OptimiserParameters {
    fn default() -> Self {
        Self {
            selection_types: vec![SelectionType::default()],
            crossover_types: vec![CrossoverType::Subtree],
            mutation_types: vec![MutationType::Simple],
            regularization_type: RegularizationType::None,
            genetic_scheme: GeneticScheme::Generational,
            multi_objective: false,
            auto_depth: false,
            depth_increase_step: 3,
            offspring_rate: 0.5,
            archive_capacity: 32,
            parallel: true,
            seed: None,
        }
    }
}

impl OptimiserParameters {
    /// Sets the selection strategies.
    pub fn with_selection_types(mut self, types: Vec<SelectionType>) -> Self {
        self.selection_types = types;
        self
    }

    /// Sets the crossover strategies.
    pub fn with_crossover_types(mut self, types: Vec<CrossoverType>) -> Self {
        self.crossover_types = types;
        self
    }

    /// Sets the mutation strategies.
    pub fn with_mutation_types(mut self, types: Vec<MutationType>) -> Self {
        self.mutation_types = types;
        self
    }

    /// Sets the pool regularization strategy.
    pub fn with_regularization(mut self, regularization: RegularizationType) -> Self {
        self.regularization_type = regularization;
        self
    }

    /// Sets the population replacement scheme.
    pub fn with_genetic_scheme(mut self, scheme: GeneticScheme) -> Self {
        self.genetic_scheme = scheme;
        self
    }

    /// Switches multi-objective mode on or off.
    pub fn with_multi_objective(mut self, enabled: bool) -> Self {
        self.multi_objective = enabled;
        self
    }

    /// Switches adaptive depth on or off.
    pub fn with_auto_depth(mut self, enabled: bool) -> Self {
        self.auto_depth = enabled;
        self
    }

    /// Sets the stagnation length that triggers a depth increase.
    pub fn with_depth_increase_step(mut self, step: usize) -> Self {
        self.depth_increase_step = step;
        self
    }

    /// Sets the steady-state offspring fraction, clamped to `[0, 1]`.
    pub fn with_offspring_rate(mut self, rate: f64) -> Self {
        self.offspring_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the archive capacity for multi-objective mode.
    pub fn with_archive_capacity(mut self, capacity: usize) -> Self {
        self.archive_capacity = capacity;
        self
    }

    /// Switches parallel evaluation on or off.
    pub fn with_parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    /// Fixes the random seed for a reproducible run.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Checks the parameters for internal consistency.
    pub fn validate(&self) -> Result<()> {
        if self.selection_types.is_empty() {
            return Err(Error::InvalidConfiguration(
                "selection_types must not be empty".to_string(),
            ));
        }
        for selection in &self.selection_types {
            let SelectionType::Tournament(size) = selection;
            if *size == 0 {
                return Err(Error::InvalidConfiguration(
                    "tournament size must be at least 1".to_string(),
                ));
            }
        }
        if self.crossover_types.is_empty() {
            return Err(Error::InvalidConfiguration(
                "crossover_types must not be empty".to_string(),
            ));
        }
        if self.mutation_types.is_empty() {
            return Err(Error::InvalidConfiguration(
                "mutation_types must not be empty".to_string(),
            ));
        }
        if self.depth_increase_step == 0 {
            return Err(Error::InvalidConfiguration(
                "depth_increase_step must be at least 1".to_string(),
            ));
        }
        if !(self.offspring_rate > 0.0 && self.offspring_rate <= 1.0) {
            return Err(Error::InvalidConfiguration(
                "offspring_rate must be within (0, 1]".to_string(),
            ));
        }
        if self.archive_capacity == 0 {
            return Err(Error::InvalidConfiguration(
                "archive_capacity must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
