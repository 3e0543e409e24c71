//! Genetic-programming optimiser over pipeline chains.
//!
//! One generation flows through a fixed pipeline: archive update
//! (multi-objective), stagnation bookkeeping, adaptive depth, pool
//! regularization, selection, crossover and mutation, offspring evaluation,
//! inheritance with an elitism slot, and a history snapshot. Budget and
//! cancellation are checked once per generation boundary.
//!
//! Strategies are picked in [`OptimiserParameters`]; structural bounds and
//! operator pools live in [`Requirements`]; [`ChainOptimiser`] drives the
//! run.

pub mod archive;
pub mod config;
pub mod crossover;
pub mod generator;
pub mod history;
pub mod inheritance;
pub mod multi_objective;
pub mod mutation;
pub mod regularization;
pub mod runner;
pub mod selection;
pub mod timer;
pub mod types;

pub use archive::ParetoArchive;
pub use config::{OptimiserParameters, Requirements};
pub use crossover::CrossoverType;
pub use history::{GenerationRecord, History};
pub use inheritance::GeneticScheme;
pub use mutation::MutationType;
pub use regularization::RegularizationType;
pub use runner::{ChainOptimiser, GpResult, InitialPopulation, OptimisationOutcome};
pub use selection::SelectionType;
pub use timer::BudgetTimer;
pub use types::{AcceptAll, Constraint, Individual, Objective};
