//! Experiment batch execution.

use super::config::ExperimentConfig;
use super::report::{ExperimentReport, Sheet, SheetRow};
use crate::ais::ImmuneSystem;
use crate::error::Result;
use crate::problem::PricingProblem;
use crate::pso::Swarm;
use crate::random::create_rng;
use crate::search::{Algorithm, RandomSearch, SearchOutcome, SearchRunner};
use tracing::info;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Runs every configured algorithm over every seed.
///
/// For each seed, each algorithm gets its own generator seeded from that
/// seed; the market is drawn first and the search continues on the same
/// generator. All algorithms therefore face the same market for a seed,
/// and a run's result does not depend on whether seeds run in parallel.
///
/// # Usage
///
/// ```
/// use u_pricing::experiment::{ExperimentConfig, ExperimentRunner};
/// use u_pricing::search::SearchConfig;
///
/// let config = ExperimentConfig::default()
///     .with_num_goods(5)
///     .with_seeds(0..3)
///     .with_search(SearchConfig::iterations(20));
/// let report = ExperimentRunner::run(&config).unwrap();
/// assert_eq!(report.sheets.len(), 3);
/// assert!(report.sheets.iter().all(|s| s.rows.len() == 3));
/// ```
pub struct ExperimentRunner;

impl ExperimentRunner {
    pub fn run(config: &ExperimentConfig) -> Result<ExperimentReport> {
        config.validate()?;

        let seeds: Vec<u64> = if config.use_random_seed {
            config.seeds.iter().map(|_| rand::random()).collect()
        } else {
            config.seeds.clone()
        };

        let per_seed = run_seeds(config, &seeds)?;

        let mut sheets: Vec<Sheet> = config.algorithms.iter().copied().map(Sheet::new).collect();
        for rows in per_seed {
            for (sheet, row) in sheets.iter_mut().zip(rows) {
                sheet.rows.push(row);
            }
        }
        Ok(ExperimentReport { sheets })
    }

    /// Runs a single algorithm on an existing market.
    pub fn run_algorithm<R: rand::Rng>(
        algorithm: Algorithm,
        problem: &PricingProblem,
        config: &ExperimentConfig,
        rng: &mut R,
    ) -> Result<SearchOutcome> {
        match algorithm {
            Algorithm::RandomSearch => {
                let mut engine = RandomSearch::new(problem, rng)?;
                SearchRunner::run(&mut engine, &config.search, rng)
            }
            Algorithm::ParticleSwarm => {
                let mut engine = Swarm::new(problem, config.pso.clone(), rng)?;
                SearchRunner::run(&mut engine, &config.search, rng)
            }
            Algorithm::ImmuneSystem => {
                let mut engine = ImmuneSystem::new(problem, config.ais.clone(), rng)?;
                SearchRunner::run(&mut engine, &config.search, rng)
            }
        }
    }
}

#[cfg(feature = "parallel")]
fn run_seeds(config: &ExperimentConfig, seeds: &[u64]) -> Result<Vec<Vec<SheetRow>>> {
    if config.parallel {
        seeds.par_iter().map(|&seed| run_seed(config, seed)).collect()
    } else {
        seeds.iter().map(|&seed| run_seed(config, seed)).collect()
    }
}

#[cfg(not(feature = "parallel"))]
fn run_seeds(config: &ExperimentConfig, seeds: &[u64]) -> Result<Vec<Vec<SheetRow>>> {
    if config.parallel {
        tracing::debug!("`parallel` feature disabled; running seeds sequentially");
    }
    seeds.iter().map(|&seed| run_seed(config, seed)).collect()
}

/// One row per configured algorithm, in configuration order.
fn run_seed(config: &ExperimentConfig, seed: u64) -> Result<Vec<SheetRow>> {
    config
        .algorithms
        .iter()
        .map(|&algorithm| {
            let mut rng = create_rng(seed);
            let problem = PricingProblem::generate(config.num_goods, &mut rng)?;
            let outcome = ExperimentRunner::run_algorithm(algorithm, &problem, config, &mut rng)?;
            info!(
                %algorithm,
                seed,
                best_revenue = outcome.best_revenue,
                "experiment run complete"
            );
            Ok(SheetRow {
                seed,
                best_revenue: outcome.best_revenue,
                iterations: outcome.iterations,
                trace: outcome.trace,
            })
        })
        .collect()
}
