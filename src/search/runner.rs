//! Search loop execution.

use super::config::{Budget, SearchConfig, TraceSampling};
use super::types::{Algorithm, SearchEngine};
use crate::error::Result;
use rand::Rng;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::info;

/// Result of one search run.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchOutcome {
    /// Strategy that produced this outcome.
    pub algorithm: Algorithm,

    /// Best revenue at the end of the run.
    pub best_revenue: f64,

    /// Copy of the prices achieving `best_revenue`.
    pub best_prices: Vec<f64>,

    /// Sampled best revenue; the last entry is always the final value.
    pub trace: Vec<f64>,

    /// Number of completed `update` calls.
    pub iterations: usize,

    /// Wall-clock time spent in the loop.
    pub elapsed: Duration,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,
}

/// Drives a [`SearchEngine`] until its budget runs out.
///
/// # Usage
///
/// ```
/// use u_pricing::problem::PricingProblem;
/// use u_pricing::pso::{PsoConfig, Swarm};
/// use u_pricing::random::create_rng;
/// use u_pricing::search::{SearchConfig, SearchRunner};
///
/// let mut rng = create_rng(42);
/// let problem = PricingProblem::generate(10, &mut rng).unwrap();
/// let mut swarm = Swarm::new(&problem, PsoConfig::default(), &mut rng).unwrap();
/// let outcome = SearchRunner::run(&mut swarm, &SearchConfig::iterations(100), &mut rng).unwrap();
/// assert_eq!(outcome.iterations, 100);
/// ```
pub struct SearchRunner;

impl SearchRunner {
    /// Runs the search loop.
    pub fn run<E: SearchEngine, R: Rng>(
        engine: &mut E,
        config: &SearchConfig,
        rng: &mut R,
    ) -> Result<SearchOutcome> {
        Self::run_with_cancel(engine, config, rng, None)
    }

    /// Runs the search loop with an optional cancellation token.
    ///
    /// The flag is checked before every `update`; a cancelled run returns
    /// the last completed best snapshot.
    pub fn run_with_cancel<E: SearchEngine, R: Rng>(
        engine: &mut E,
        config: &SearchConfig,
        rng: &mut R,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<SearchOutcome> {
        config.validate()?;

        let start = Instant::now();
        let mut trace = Vec::new();
        let mut iterations = 0usize;
        let mut cancelled = false;
        let mut next_tick = match config.sampling {
            TraceSampling::Interval(d) => Some(start + d),
            _ => None,
        };

        loop {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }

            let exhausted = match config.budget {
                Budget::Iterations(n) => iterations >= n,
                Budget::Timeout(limit) => start.elapsed() >= limit,
            };
            if exhausted {
                break;
            }

            if let (Some(tick), TraceSampling::Interval(d)) = (next_tick.as_mut(), config.sampling)
            {
                let now = Instant::now();
                if now >= *tick {
                    trace.push(engine.best_revenue());
                    while *tick <= now {
                        *tick += d;
                    }
                }
            }

            engine.update(rng)?;
            iterations += 1;

            if let TraceSampling::EveryIterations(k) = config.sampling {
                if iterations.is_multiple_of(k) {
                    trace.push(engine.best_revenue());
                }
            }
        }

        let best_revenue = engine.best_revenue();
        trace.push(best_revenue);
        let elapsed = start.elapsed();

        info!(
            algorithm = %engine.algorithm(),
            iterations,
            best_revenue,
            cancelled,
            "search finished"
        );

        Ok(SearchOutcome {
            algorithm: engine.algorithm(),
            best_revenue,
            best_prices: engine.best_prices().to_vec(),
            trace,
            iterations,
            elapsed,
            cancelled,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ais::{AisConfig, ImmuneSystem};
    use crate::problem::PricingProblem;
    use crate::pso::{PsoConfig, Swarm};
    use crate::random::create_rng;
    use crate::search::RandomSearch;

    #[test]
    fn test_iteration_budget() {
        let mut rng = create_rng(42);
        let problem = PricingProblem::generate(10, &mut rng).unwrap();
        let mut search = RandomSearch::new(&problem, &mut rng).unwrap();

        let outcome = SearchRunner::run(&mut search, &SearchConfig::iterations(250), &mut rng)
            .unwrap();

        assert_eq!(outcome.algorithm, Algorithm::RandomSearch);
        assert_eq!(outcome.iterations, 250);
        assert_eq!(search.iteration(), 250);
        assert_eq!(outcome.trace, vec![outcome.best_revenue]);
        assert!(!outcome.cancelled);
    }

    #[test]
    fn test_trace_every_iterations() {
        let mut rng = create_rng(42);
        let problem = PricingProblem::generate(10, &mut rng).unwrap();
        let mut swarm = Swarm::new(&problem, PsoConfig::default(), &mut rng).unwrap();
        let config =
            SearchConfig::iterations(100).with_sampling(TraceSampling::EveryIterations(10));

        let outcome = SearchRunner::run(&mut swarm, &config, &mut rng).unwrap();

        // 10 samples plus the final value.
        assert_eq!(outcome.trace.len(), 11);
        for pair in outcome.trace.windows(2) {
            assert!(pair[1] >= pair[0], "trace should be non-decreasing");
        }
        assert_eq!(*outcome.trace.last().unwrap(), outcome.best_revenue);
        assert_eq!(outcome.best_prices, swarm.best_prices());
    }

    #[test]
    fn test_timeout_budget() {
        let mut rng = create_rng(42);
        let problem = PricingProblem::generate(5, &mut rng).unwrap();
        let config = AisConfig::default()
            .with_population_size(5)
            .with_replacement(1)
            .with_clone_factor(1);
        let mut ais = ImmuneSystem::new(&problem, config, &mut rng).unwrap();
        let search = SearchConfig::timeout(Duration::from_millis(30))
            .with_sampling(TraceSampling::Interval(Duration::from_millis(5)));

        let outcome = SearchRunner::run(&mut ais, &search, &mut rng).unwrap();

        assert!(outcome.elapsed >= Duration::from_millis(30));
        assert!(outcome.iterations > 0);
        assert!(!outcome.trace.is_empty());
        for pair in outcome.trace.windows(2) {
            assert!(pair[1] >= pair[0]);
        }
        assert_eq!(outcome.best_revenue, ais.best_cell().revenue());
    }

    #[test]
    fn test_cancelled_before_start() {
        let mut rng = create_rng(42);
        let problem = PricingProblem::generate(5, &mut rng).unwrap();
        let mut search = RandomSearch::new(&problem, &mut rng).unwrap();
        let cancel = Arc::new(AtomicBool::new(true));

        let outcome = SearchRunner::run_with_cancel(
            &mut search,
            &SearchConfig::iterations(1_000_000),
            &mut rng,
            Some(cancel),
        )
        .unwrap();

        assert!(outcome.cancelled);
        assert_eq!(outcome.iterations, 0);
        assert_eq!(outcome.trace.len(), 1);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut rng = create_rng(42);
        let problem = PricingProblem::generate(5, &mut rng).unwrap();
        let mut search = RandomSearch::new(&problem, &mut rng).unwrap();
        assert!(SearchRunner::run(&mut search, &SearchConfig::iterations(0), &mut rng).is_err());
    }

    #[test]
    fn test_seeded_runs_reproducible() {
        let run = || {
            let mut rng = create_rng(77);
            let problem = PricingProblem::generate(8, &mut rng).unwrap();
            let mut swarm = Swarm::new(&problem, PsoConfig::default(), &mut rng).unwrap();
            SearchRunner::run(&mut swarm, &SearchConfig::iterations(40), &mut rng).unwrap()
        };
        let a = run();
        let b = run();
        assert_eq!(a.best_revenue, b.best_revenue);
        assert_eq!(a.best_prices, b.best_prices);
    }
}
