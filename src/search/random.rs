//! Random-restart baseline.

use super::types::{Algorithm, SearchEngine};
use crate::error::Result;
use crate::problem::{PricingProblem, SAMPLE_CEILING};
use rand::Rng;

/// Draws a fresh uniform price vector every step and keeps the best.
///
/// Draws are not rejection-sampled; an infeasible draw simply scores
/// zero and is never kept over a positive best.
#[derive(Debug, Clone)]
pub struct RandomSearch<'p> {
    problem: &'p PricingProblem,
    candidate: Vec<f64>,
    best_prices: Vec<f64>,
    best_revenue: f64,
    iteration: usize,
}

impl<'p> RandomSearch<'p> {
    pub fn new<R: Rng>(problem: &'p PricingProblem, rng: &mut R) -> Result<Self> {
        let mut best_prices = vec![0.0; problem.num_goods()];
        fill_uniform(&mut best_prices, rng);
        let best_revenue = problem.evaluate(&best_prices)?;

        Ok(Self {
            problem,
            candidate: vec![0.0; problem.num_goods()],
            best_prices,
            best_revenue,
            iteration: 0,
        })
    }

    /// Draws and scores one candidate, keeping it on strict improvement.
    pub fn update<R: Rng>(&mut self, rng: &mut R) -> Result<()> {
        fill_uniform(&mut self.candidate, rng);
        let revenue = self.problem.evaluate(&self.candidate)?;
        if revenue > self.best_revenue {
            self.best_prices.copy_from_slice(&self.candidate);
            self.best_revenue = revenue;
        }
        self.iteration += 1;
        Ok(())
    }

    pub fn best_prices(&self) -> &[f64] {
        &self.best_prices
    }

    pub fn best_revenue(&self) -> f64 {
        self.best_revenue
    }

    pub fn iteration(&self) -> usize {
        self.iteration
    }
}

impl SearchEngine for RandomSearch<'_> {
    fn algorithm(&self) -> Algorithm {
        Algorithm::RandomSearch
    }

    fn update<R: Rng>(&mut self, rng: &mut R) -> Result<()> {
        RandomSearch::update(self, rng)
    }

    fn best_revenue(&self) -> f64 {
        self.best_revenue
    }

    fn best_prices(&self) -> &[f64] {
        &self.best_prices
    }
}

fn fill_uniform<R: Rng>(prices: &mut [f64], rng: &mut R) {
    for p in prices.iter_mut() {
        *p = rng.random::<f64>() * SAMPLE_CEILING;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::create_rng;

    #[test]
    fn test_best_non_decreasing() {
        let mut rng = create_rng(42);
        let problem = PricingProblem::generate(10, &mut rng).unwrap();
        let mut search = RandomSearch::new(&problem, &mut rng).unwrap();

        let mut previous = search.best_revenue();
        for _ in 0..200 {
            search.update(&mut rng).unwrap();
            assert!(search.best_revenue() >= previous);
            previous = search.best_revenue();
        }
        assert_eq!(search.iteration(), 200);
        assert_eq!(
            search.best_revenue(),
            problem.evaluate(search.best_prices()).unwrap()
        );
    }

    #[test]
    fn test_best_prices_not_aliased_to_candidate() {
        let mut rng = create_rng(1);
        let problem = PricingProblem::generate(4, &mut rng).unwrap();
        let mut search = RandomSearch::new(&problem, &mut rng).unwrap();
        for _ in 0..50 {
            search.update(&mut rng).unwrap();
        }
        let kept = search.best_prices().to_vec();
        let revenue = search.best_revenue();
        // A losing draw must not disturb the stored best.
        search.update(&mut rng).unwrap();
        if search.best_revenue() == revenue {
            assert_eq!(search.best_prices(), kept.as_slice());
        }
    }
}
