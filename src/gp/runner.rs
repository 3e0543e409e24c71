//! Evolutionary chain optimiser: the generational loop.

use std::cmp::Ordering;
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};
use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::SeedableRng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::chain::{ChainNode, Fitness, Graph};
use crate::error::{Error, Result};

use super::archive::ParetoArchive;
use super::config::{OptimiserParameters, Requirements};
use super::crossover::crossover;
use super::generator;
use super::history::History;
use super::inheritance::{inheritance, GeneticScheme};
use super::mutation::mutation;
use super::regularization::regularized_population;
use super::selection::selection;
use super::timer::BudgetTimer;
use super::types::{AcceptAll, Constraint, Individual, Objective};

/// Mutation retries before an inadmissible offspring falls back to its
/// parent.
const REPRODUCTION_ATTEMPTS: usize = 10;

/// Primary operators kept after the single-operator baseline scan.
const BASELINE_POOL_SIZE: usize = 7;

/// Initial population source.
#[derive(Debug, Clone)]
pub enum InitialPopulation<G> {
    /// Generate constraint-passing random chains.
    Generated,
    /// Clone one chain across the whole starting population.
    Replicate(G),
    /// Start from the given chains as-is; later generations are sized by
    /// `pop_size`.
    Provided(Vec<G>),
}

/// How a finished run reports its winner.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum OptimisationOutcome<G> {
    /// Best individual of a single-objective run.
    Best(Individual<G>),
    /// Final archive members of a multi-objective run.
    ParetoFront(Vec<Individual<G>>),
}

/// Outcome of [`ChainOptimiser::optimise`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GpResult<G> {
    /// Winner(s) of the run.
    pub outcome: OptimisationOutcome<G>,
    /// Generations completed, counting the initial population.
    pub generations: usize,
    /// Wall-clock time spent.
    pub elapsed: Duration,
    /// Whether the run stopped on the lead-time budget.
    pub stopped_by_time_limit: bool,
    /// Whether the run stopped on the cancel flag.
    pub cancelled: bool,
    /// Per-generation snapshots.
    pub history: History<G>,
}

impl<G: Graph> GpResult<G> {
    /// Best individual of a single-objective run; `None` in
    /// multi-objective mode.
    pub fn best(&self) -> Option<&Individual<G>> {
        match &self.outcome {
            OptimisationOutcome::Best(individual) => Some(individual),
            OptimisationOutcome::ParetoFront(_) => None,
        }
    }

    /// Final Pareto front of a multi-objective run; `None` in
    /// single-objective mode.
    pub fn pareto_front(&self) -> Option<&[Individual<G>]> {
        match &self.outcome {
            OptimisationOutcome::Best(_) => None,
            OptimisationOutcome::ParetoFront(front) => Some(front),
        }
    }
}

/// Population-based genetic-programming search over chain structures.
///
/// The optimiser owns a working copy of the requirements (the baseline scan
/// may narrow the primary pool) and a seeded random generator, so one
/// configured instance performs exactly one run.
#[derive(Debug)]
pub struct ChainOptimiser<G: Graph> {
    requirements: Requirements,
    parameters: OptimiserParameters,
    initial: InitialPopulation<G>,
    population: Vec<Individual<G>>,
    archive: ParetoArchive<G>,
    history: History<G>,
    max_depth: usize,
    generation_depth: usize,
    stagnation: usize,
    prev_best: Option<Individual<G>>,
    prev_front: Option<Vec<Vec<f64>>>,
    best_baseline: Option<Individual<G>>,
    objective_count: Option<usize>,
    rng: StdRng,
}

impl<G: Graph> ChainOptimiser<G> {
    /// Validates the configuration and prepares a run.
    pub fn new(
        initial: InitialPopulation<G>,
        requirements: Requirements,
        parameters: OptimiserParameters,
    ) -> Result<Self> {
        requirements.validate()?;
        parameters.validate()?;
        match &initial {
            InitialPopulation::Provided(chains) => {
                if chains.is_empty() {
                    return Err(Error::EmptyPopulation);
                }
                if chains.iter().any(|chain| chain.root().is_none()) {
                    return Err(Error::InvalidConfiguration(
                        "provided initial chains must have at least one node".to_string(),
                    ));
                }
            }
            InitialPopulation::Replicate(chain) => {
                if chain.root().is_none() {
                    return Err(Error::InvalidConfiguration(
                        "replicated initial chain must have at least one node".to_string(),
                    ));
                }
            }
            InitialPopulation::Generated => {}
        }
        let max_depth = if parameters.auto_depth {
            requirements.start_depth.unwrap_or(requirements.max_depth)
        } else {
            requirements.max_depth
        };
        let generation_depth = requirements.start_depth.unwrap_or(max_depth);
        let rng = match parameters.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let archive = ParetoArchive::new(parameters.archive_capacity);
        Ok(Self {
            requirements,
            parameters,
            initial,
            population: Vec::new(),
            archive,
            history: History::new(),
            max_depth,
            generation_depth,
            stagnation: 0,
            prev_best: None,
            prev_front: None,
            best_baseline: None,
            objective_count: None,
            rng,
        })
    }

    /// Runs the search with no structural constraint.
    pub fn optimise<O: Objective<G>>(self, objective: &O) -> Result<GpResult<G>> {
        self.optimise_with_cancel(objective, &AcceptAll, None)
    }

    /// Runs the search, filtering generated chains and reproduction
    /// products through `constraint`.
    pub fn optimise_with_constraint<O, C>(
        self,
        objective: &O,
        constraint: &C,
    ) -> Result<GpResult<G>>
    where
        O: Objective<G>,
        C: Constraint<G>,
    {
        self.optimise_with_cancel(objective, constraint, None)
    }

    /// Runs the search with an external cancel flag, checked once per
    /// generation boundary together with the time budget.
    pub fn optimise_with_cancel<O, C>(
        mut self,
        objective: &O,
        constraint: &C,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<GpResult<G>>
    where
        O: Objective<G>,
        C: Constraint<G>,
    {
        let timer = BudgetTimer::start(self.requirements.max_lead_time);
        info!(
            "chain optimisation started: pop_size={}, generations={}",
            self.requirements.pop_size, self.requirements.num_of_generations
        );

        if self.requirements.add_single_model_chains {
            self.scan_single_model_baselines(objective)?;
        }
        self.seed_population(constraint);
        evaluate_individuals(
            &mut self.population,
            objective,
            self.parameters.multi_objective,
            self.parameters.parallel,
            &mut self.objective_count,
        )?;
        self.history.record(&self.population, self.archive.items());

        let mut stopped_by_time_limit = false;
        let mut cancelled = false;
        for generation in 1..self.requirements.num_of_generations {
            info!("Generation num: {generation}");

            if self.parameters.multi_objective {
                self.archive.update(&self.population);
            }
            self.update_stagnation_counter();
            info!(
                "max_depth: {}, no improvements: {}",
                self.max_depth, self.stagnation
            );
            if self.parameters.auto_depth {
                self.max_depth_recount();
            }

            let mut pool = regularized_population(
                self.parameters.regularization_type,
                &self.population,
                objective,
                constraint,
                self.parameters.multi_objective,
                self.parameters.parallel,
                &mut self.objective_count,
            )?;
            if self.parameters.multi_objective {
                let merged = self.archive.non_duplicate_members(&pool);
                pool.extend(merged);
            }

            let parent_count = self.offspring_count();
            let parents = selection(
                &self.parameters.selection_types,
                &pool,
                parent_count,
                &mut self.rng,
            );
            let mut offspring: Vec<Individual<G>> = Vec::with_capacity(parent_count);
            let mut pairs = parents.chunks_exact(2);
            for pair in pairs.by_ref() {
                let (a, b) = self.reproduce_pair(&pool[pair[0]].chain, &pool[pair[1]].chain, constraint);
                offspring.push(a);
                offspring.push(b);
            }
            if let [unpaired] = pairs.remainder() {
                let child = self.reproduce_single(&pool[*unpaired].chain, constraint);
                offspring.push(child);
            }

            evaluate_individuals(
                &mut offspring,
                objective,
                self.parameters.multi_objective,
                self.parameters.parallel,
                &mut self.objective_count,
            )?;

            if self.parameters.multi_objective {
                self.prev_front = Some(self.archive.fitness_front());
            } else {
                self.prev_best = best_of_population(&self.population).ok().cloned();
            }
            let elite = if self.with_elitism() {
                self.prev_best.clone()
            } else {
                None
            };
            let target = self.requirements.pop_size - usize::from(elite.is_some());
            let prev_population = std::mem::take(&mut self.population);
            self.population = inheritance(
                self.parameters.genetic_scheme,
                &prev_population,
                offspring,
                target,
            );
            if let Some(elite) = elite {
                self.population.push(elite);
            }

            self.history.record(&self.population, self.archive.items());
            if let Ok(best) = best_of_population(&self.population) {
                info!("Best metric is {}", best.fitness);
            }
            info!("spent time: {:.1} min", timer.minutes_from_start());

            if let Some(flag) = &cancel {
                if flag.load(AtomicOrdering::Relaxed) {
                    info!("optimisation cancelled");
                    cancelled = true;
                    break;
                }
            }
            if timer.is_time_limit_reached() {
                info!("optimisation stopped: time limit reached");
                stopped_by_time_limit = true;
                break;
            }
        }

        if self.parameters.multi_objective {
            self.archive.update(&self.population);
        }
        let outcome = self.result_outcome()?;
        let generations = self.history.len();
        info!("chain optimisation finished after {generations} generations");
        Ok(GpResult {
            outcome,
            generations,
            elapsed: timer.elapsed(),
            stopped_by_time_limit,
            cancelled,
            history: self.history,
        })
    }

    fn seed_population<C: Constraint<G>>(&mut self, constraint: &C) {
        let pop_size = self.requirements.pop_size;
        let initial = std::mem::replace(&mut self.initial, InitialPopulation::Generated);
        self.population = match initial {
            InitialPopulation::Generated => generator::generate_population(
                &self.requirements,
                self.generation_depth,
                constraint,
                pop_size,
                &mut self.rng,
            ),
            InitialPopulation::Replicate(chain) => {
                (0..pop_size).map(|_| Individual::new(chain.clone())).collect()
            }
            InitialPopulation::Provided(chains) => {
                chains.into_iter().map(Individual::new).collect()
            }
        };
    }

    /// Evaluates every primary operator as a single-node chain, keeps the
    /// best as a result baseline, and narrows the working primary pool to
    /// the strongest operators. Disabled with a warning when every
    /// baseline fails.
    fn scan_single_model_baselines<O: Objective<G>>(&mut self, objective: &O) -> Result<()> {
        let mut singles: Vec<Individual<G>> = self
            .requirements
            .primary
            .iter()
            .map(|operator| {
                let mut chain = G::empty();
                chain.add_node(None, ChainNode::new(operator.as_str()));
                Individual::new(chain)
            })
            .collect();
        evaluate_individuals(
            &mut singles,
            objective,
            self.parameters.multi_objective,
            self.parameters.parallel,
            &mut self.objective_count,
        )?;

        let mut order: Vec<usize> = (0..singles.len())
            .filter(|&i| singles[i].fitness.is_valid())
            .collect();
        if order.is_empty() {
            warn!("every single-operator baseline failed evaluation; baseline disabled");
            return Ok(());
        }
        order.sort_by(|&a, &b| {
            singles[a]
                .fitness
                .partial_cmp(&singles[b].fitness)
                .unwrap_or(Ordering::Equal)
        });
        let narrowed: Vec<String> = order
            .iter()
            .take(BASELINE_POOL_SIZE)
            .map(|&i| self.requirements.primary[i].clone())
            .collect();
        info!(
            "single-operator baseline: kept {} of {} primary operators, best fitness {}",
            narrowed.len(),
            singles.len(),
            singles[order[0]].fitness
        );
        self.best_baseline = Some(singles[order[0]].clone());
        self.requirements.primary = narrowed;
        Ok(())
    }

    fn reproduce_pair<C: Constraint<G>>(
        &mut self,
        first: &G,
        second: &G,
        constraint: &C,
    ) -> (Individual<G>, Individual<G>) {
        let (mut a, mut b) = crossover(
            &self.parameters.crossover_types,
            first,
            second,
            self.requirements.crossover_prob,
            self.max_depth,
            &mut self.rng,
        );
        if !constraint.is_valid(&a) {
            a = first.clone();
        }
        if !constraint.is_valid(&b) {
            b = second.clone();
        }
        (
            Individual::new(self.mutate_admissible(&a, constraint)),
            Individual::new(self.mutate_admissible(&b, constraint)),
        )
    }

    /// Asexual reproduction for the final unpaired parent of an odd draw.
    fn reproduce_single<C: Constraint<G>>(&mut self, parent: &G, constraint: &C) -> Individual<G> {
        Individual::new(self.mutate_admissible(parent, constraint))
    }

    fn mutate_admissible<C: Constraint<G>>(&mut self, chain: &G, constraint: &C) -> G {
        for _ in 0..REPRODUCTION_ATTEMPTS {
            let mutated = mutation(
                &self.parameters.mutation_types,
                chain,
                &self.requirements,
                self.max_depth,
                &mut self.rng,
            );
            if constraint.is_valid(&mutated) {
                return mutated;
            }
            debug!("mutated chain rejected by constraint, retrying");
        }
        chain.clone()
    }

    fn offspring_count(&self) -> usize {
        match self.parameters.genetic_scheme {
            GeneticScheme::SteadyState => {
                (self.requirements.pop_size as f64 * self.parameters.offspring_rate).ceil() as usize
            }
            GeneticScheme::Generational => self.requirements.pop_size.saturating_sub(1).max(1),
        }
    }

    fn with_elitism(&self) -> bool {
        !self.parameters.multi_objective && self.requirements.pop_size > 1
    }

    /// Counts generations whose best fitness (single-objective) or archive
    /// front (multi-objective) repeated exactly; any change resets the
    /// counter.
    fn update_stagnation_counter(&mut self) {
        let stagnant = if self.parameters.multi_objective {
            self.prev_front
                .as_ref()
                .is_some_and(|front| *front == self.archive.fitness_front())
        } else {
            match (&self.prev_best, best_of_population(&self.population)) {
                (Some(prev), Ok(best)) => prev.fitness == best.fitness,
                _ => false,
            }
        };
        if stagnant {
            self.stagnation += 1;
        } else {
            self.stagnation = 0;
        }
    }

    fn max_depth_recount(&mut self) {
        if self.stagnation == self.parameters.depth_increase_step
            && self.max_depth + 1 <= self.requirements.max_depth
        {
            self.max_depth += 1;
            info!("max depth increased to {}", self.max_depth);
        }
    }

    fn result_outcome(&self) -> Result<OptimisationOutcome<G>> {
        if self.parameters.multi_objective {
            return Ok(OptimisationOutcome::ParetoFront(self.archive.items().to_vec()));
        }
        match (best_of_population(&self.population), &self.best_baseline) {
            (Ok(best), Some(baseline)) => {
                let ord = baseline
                    .fitness
                    .partial_cmp(&best.fitness)
                    .unwrap_or(Ordering::Equal);
                if ord == Ordering::Greater {
                    Ok(OptimisationOutcome::Best(best.clone()))
                } else {
                    Ok(OptimisationOutcome::Best(baseline.clone()))
                }
            }
            (Ok(best), None) => Ok(OptimisationOutcome::Best(best.clone())),
            (Err(_), Some(baseline)) => Ok(OptimisationOutcome::Best(baseline.clone())),
            (Err(error), None) => Err(error),
        }
    }
}

/// Best validly evaluated individual: minimum fitness, first-encountered on
/// ties, then the fewest-node representative among exact fitness ties.
fn best_of_population<G: Graph>(population: &[Individual<G>]) -> Result<&Individual<G>> {
    let mut best: Option<&Individual<G>> = None;
    for individual in population {
        if !individual.fitness.is_valid() {
            continue;
        }
        let better = match best {
            None => true,
            Some(current) => {
                individual
                    .fitness
                    .partial_cmp(&current.fitness)
                    .unwrap_or(Ordering::Equal)
                    == Ordering::Less
            }
        };
        if better {
            best = Some(individual);
        }
    }
    let mut best = best.ok_or(Error::NoValidFitness)?;
    for individual in population {
        if individual.fitness == best.fitness && individual.node_count() < best.node_count() {
            best = individual;
        }
    }
    Ok(best)
}

/// Assigns fresh fitness to every individual, on the rayon pool when
/// `parallel` is set. A failed evaluation leaves the invalid sentinel in
/// place; a fitness of the wrong shape for the run mode, or a vector whose
/// length disagrees with `objective_count`, aborts with an error.
pub(crate) fn evaluate_individuals<G, O>(
    individuals: &mut [Individual<G>],
    objective: &O,
    multi_objective: bool,
    parallel: bool,
    objective_count: &mut Option<usize>,
) -> Result<()>
where
    G: Graph,
    O: Objective<G>,
{
    if parallel {
        individuals.par_iter_mut().for_each(|individual| {
            individual.fitness = objective.evaluate(&individual.chain).unwrap_or(Fitness::Invalid);
        });
    } else {
        for individual in individuals.iter_mut() {
            individual.fitness = objective.evaluate(&individual.chain).unwrap_or(Fitness::Invalid);
        }
    }
    for individual in individuals.iter() {
        match (&individual.fitness, multi_objective) {
            (Fitness::Invalid, _) => {}
            (Fitness::Single(_), false) => {}
            (Fitness::Multi(values), true) => match *objective_count {
                None => *objective_count = Some(values.len()),
                Some(expected) if expected == values.len() => {}
                Some(expected) => {
                    return Err(Error::ObjectiveCountMismatch {
                        expected,
                        actual: values.len(),
                    });
                }
            },
            (Fitness::Single(_), true) => {
                return Err(Error::FitnessShape {
                    expected: "multi-objective",
                    actual: "single-objective",
                });
            }
            (Fitness::Multi(_), false) => {
                return Err(Error::FitnessShape {
                    expected: "single-objective",
                    actual: "multi-objective",
                });
            }
        }
    }
    Ok(())
}
