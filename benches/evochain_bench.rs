//! Criterion benchmarks for the evochain optimiser.
//!
//! Uses a node-count objective to measure pure framework overhead
//! independent of any real pipeline evaluation.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use evochain::chain::{Chain, Fitness, Graph};
use evochain::gp::crossover::crossover;
use evochain::gp::generator::random_chain;
use evochain::gp::{
    ChainOptimiser, CrossoverType, InitialPopulation, MutationType, OptimiserParameters,
    Requirements,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn base_requirements() -> Requirements {
    Requirements::new(
        vec!["logit".into(), "knn".into(), "lda".into(), "svm".into()],
        vec!["xgboost".into(), "rf".into(), "boosting".into()],
    )
}

fn node_count_objective(chain: &Chain) -> Option<Fitness> {
    Some(Fitness::single(chain.node_count() as f64))
}

// ===========================================================================
// Chain generation
// ===========================================================================

fn bench_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("chain_generation");

    for &depth in &[2usize, 3, 4] {
        let requirements = base_requirements().with_max_depth(depth).with_max_arity(3);
        group.bench_with_input(
            BenchmarkId::from_parameter(depth),
            &requirements,
            |b, req| {
                let mut rng = StdRng::seed_from_u64(42);
                b.iter(|| {
                    let chain: Chain = random_chain(black_box(req), depth, &mut rng);
                    black_box(chain)
                })
            },
        );
    }
    group.finish();
}

// ===========================================================================
// Subtree crossover
// ===========================================================================

fn bench_crossover(c: &mut Criterion) {
    let mut group = c.benchmark_group("subtree_crossover");

    for &depth in &[3usize, 4] {
        let requirements = base_requirements().with_max_depth(depth).with_max_arity(3);
        let mut rng = StdRng::seed_from_u64(7);
        let first: Chain = random_chain(&requirements, depth, &mut rng);
        let second: Chain = random_chain(&requirements, depth, &mut rng);
        group.bench_with_input(
            BenchmarkId::from_parameter(depth),
            &(first, second),
            |b, (f, s)| {
                let mut rng = StdRng::seed_from_u64(42);
                b.iter(|| {
                    let children = crossover(
                        &[CrossoverType::Subtree],
                        black_box(f),
                        black_box(s),
                        1.0,
                        depth,
                        &mut rng,
                    );
                    black_box(children)
                })
            },
        );
    }
    group.finish();
}

// ===========================================================================
// Full optimisation runs
// ===========================================================================

fn bench_optimise(c: &mut Criterion) {
    let mut group = c.benchmark_group("optimise_node_count");
    group.sample_size(10);

    for (pop, generations) in [(10usize, 10usize), (20, 20), (50, 10)] {
        let requirements = base_requirements()
            .with_pop_size(pop)
            .with_num_of_generations(generations);
        let parameters = OptimiserParameters::default()
            .with_mutation_types(vec![
                MutationType::Simple,
                MutationType::Growth,
                MutationType::Reduce,
            ])
            .with_parallel(false)
            .with_seed(42);
        group.bench_with_input(
            BenchmarkId::new(format!("p{}_g{}", pop, generations), pop),
            &(requirements, parameters),
            |b, (req, par)| {
                b.iter(|| {
                    let optimiser = ChainOptimiser::<Chain>::new(
                        InitialPopulation::Generated,
                        req.clone(),
                        par.clone(),
                    )
                    .expect("valid configuration");
                    let result = optimiser
                        .optimise(&node_count_objective)
                        .expect("run succeeds");
                    black_box(result)
                })
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_generation, bench_crossover, bench_optimise);
criterion_main!(benches);
