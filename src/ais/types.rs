//! AIS population member.

use crate::error::Result;
use crate::problem::PricingProblem;

/// One candidate solution: a price vector and its revenue.
///
/// Fields are private so the revenue can only come from the oracle's
/// evaluation of the prices it sits next to. `Clone` copies the price
/// vector, so clones never share storage with their origin.
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    prices: Vec<f64>,
    revenue: f64,
}

impl Cell {
    /// Evaluates `prices` and wraps them in a cell.
    pub fn evaluate(prices: Vec<f64>, problem: &PricingProblem) -> Result<Self> {
        let revenue = problem.evaluate(&prices)?;
        Ok(Self { prices, revenue })
    }

    pub fn prices(&self) -> &[f64] {
        &self.prices
    }

    pub fn revenue(&self) -> f64 {
        self.revenue
    }
}
