//! Evolutionary optimisation of machine-learning pipeline chains.
//!
//! Searches over tree-shaped pipeline structures ("chains") with genetic
//! programming: a population of candidate chains evolves through selection,
//! subtree crossover, and structural mutation under depth and arity bounds,
//! with optional pool regularization, an elitism slot, a Pareto archive for
//! multi-objective runs, and stagnation-driven adaptive depth.
//!
//! - [`chain`]: the structure model — [`chain::Chain`], the [`chain::Graph`]
//!   capability trait, and [`chain::Fitness`].
//! - [`gp`]: the optimiser — configuration, strategy modules, Pareto
//!   archive, run history, and the [`gp::ChainOptimiser`] driver.
//!
//! The optimiser never executes pipelines itself; fitness comes from a
//! caller-supplied [`gp::Objective`], so any structure satisfying
//! [`chain::Graph`] can be evolved against any measure.
//!
//! # Examples
//!
//! ```
//! use evochain::chain::{Chain, Fitness, Graph};
//! use evochain::gp::{ChainOptimiser, InitialPopulation, OptimiserParameters, Requirements};
//!
//! let requirements = Requirements::new(
//!     vec!["logit".into(), "knn".into()],
//!     vec!["xgboost".into(), "rf".into()],
//! )
//! .with_pop_size(10)
//! .with_num_of_generations(5);
//! let parameters = OptimiserParameters::default().with_seed(7);
//!
//! let optimiser = ChainOptimiser::<Chain>::new(
//!     InitialPopulation::Generated,
//!     requirements,
//!     parameters,
//! )?;
//! let objective = |chain: &Chain| Some(Fitness::single(chain.node_count() as f64));
//! let result = optimiser.optimise(&objective)?;
//!
//! let best = result.best().expect("single-objective run has a winner");
//! assert!(best.fitness.is_valid());
//! # Ok::<(), evochain::Error>(())
//! ```

pub mod chain;
pub mod error;
pub mod gp;

pub use error::{Error, Result};
