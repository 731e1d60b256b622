//! Revenue oracle.

use super::config::ProblemConfig;
use super::types::{PriceBounds, ResponseCurve};
use crate::error::{PricingError, Result};
use crate::random::run_rng;
use rand::Rng;
use tracing::debug;

/// Upper end (exclusive) of the uniform draw used for random prices.
pub const SAMPLE_CEILING: f64 = 10.0;

/// Rejection-sampling budget for [`PricingProblem::random_prices`].
///
/// With [`PriceBounds::MARKET`] and draws in `[0, SAMPLE_CEILING)` a draw
/// is rejected only when some coordinate falls below one penny, so the
/// first attempt succeeds with probability ≈ 1 for realistic good counts.
pub const MAX_SAMPLING_ATTEMPTS: usize = 10_000;

/// Synthetic multi-good market.
///
/// Immutable after construction. `impact[j][g]` is the fraction of good
/// `j`'s own demand that spills over into good `g`; the diagonal is zero.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PricingProblem {
    curves: Vec<ResponseCurve>,
    impact: Vec<Vec<f64>>,
    bounds: Vec<PriceBounds>,
}

impl PricingProblem {
    /// Generates a market of `num_goods` goods.
    ///
    /// Deterministic for a given `seed` unless `use_random_seed` is set,
    /// in which case the draw is seeded from system entropy.
    pub fn make(num_goods: usize, seed: u64, use_random_seed: bool) -> Result<Self> {
        let mut rng = run_rng(seed, use_random_seed);
        Self::generate(num_goods, &mut rng)
    }

    /// Generates a market from a [`ProblemConfig`].
    pub fn from_config(config: &ProblemConfig) -> Result<Self> {
        config.validate()?;
        Self::make(config.num_goods, config.seed, config.use_random_seed)
    }

    /// Generates a market by drawing from a caller-owned generator.
    ///
    /// Per good: a type roll `t` picks linear (`t <= 0.4`), constant
    /// elasticity (`0.4 < t < 0.9`) or fixed demand; then the curve
    /// parameters; then a full row of impact weights in `[0, 0.1)` with
    /// the diagonal zeroed.
    pub fn generate<R: Rng>(num_goods: usize, rng: &mut R) -> Result<Self> {
        if num_goods == 0 {
            return Err(PricingError::invalid("num_goods must be at least 1"));
        }

        let mut curves = Vec::with_capacity(num_goods);
        let mut impact = Vec::with_capacity(num_goods);

        for g in 0..num_goods {
            let t: f64 = rng.random();
            let curve = if t <= 0.4 {
                ResponseCurve::Linear {
                    total_demand: random_total_demand(rng),
                    satiating_price: rng.random::<f64>() * 10.0,
                }
            } else if t < 0.9 {
                ResponseCurve::ConstantElasticity {
                    total_demand: random_total_demand(rng),
                    elasticity: rng.random(),
                }
            } else {
                ResponseCurve::FixedDemand {
                    total_demand: random_total_demand(rng),
                }
            };
            debug!(good = g, curve = %curve, "generated response curve");
            curves.push(curve);

            let mut row: Vec<f64> = (0..num_goods).map(|_| rng.random::<f64>() * 0.1).collect();
            row[g] = 0.0;
            impact.push(row);
        }

        Ok(Self {
            curves,
            impact,
            bounds: vec![PriceBounds::MARKET; num_goods],
        })
    }

    /// Builds a market from known curves and impact weights.
    ///
    /// `impact` must be square with one row per curve, non-negative, and
    /// zero on the diagonal.
    pub fn from_parts(curves: Vec<ResponseCurve>, impact: Vec<Vec<f64>>) -> Result<Self> {
        let n = curves.len();
        if n == 0 {
            return Err(PricingError::invalid("at least one good is required"));
        }
        if impact.len() != n || impact.iter().any(|row| row.len() != n) {
            return Err(PricingError::invalid(format!(
                "impact must be a {n}x{n} matrix"
            )));
        }
        for (g, row) in impact.iter().enumerate() {
            if row.iter().any(|&w| w.is_nan() || w < 0.0) {
                return Err(PricingError::invalid(format!(
                    "impact row {g} has a negative or NaN weight"
                )));
            }
            if row[g] != 0.0 {
                return Err(PricingError::invalid(format!(
                    "good {g} must not impact itself"
                )));
            }
        }

        Ok(Self {
            curves,
            impact,
            bounds: vec![PriceBounds::MARKET; n],
        })
    }

    pub fn num_goods(&self) -> usize {
        self.curves.len()
    }

    pub fn curves(&self) -> &[ResponseCurve] {
        &self.curves
    }

    pub fn impact(&self) -> &[Vec<f64>] {
        &self.impact
    }

    pub fn bounds(&self) -> &[PriceBounds] {
        &self.bounds
    }

    /// Whether `prices` has one in-bounds entry per good.
    pub fn is_valid(&self, prices: &[f64]) -> bool {
        prices.len() == self.bounds.len()
            && prices
                .iter()
                .zip(&self.bounds)
                .all(|(&p, bounds)| bounds.contains(p))
    }

    /// Total revenue of `prices`, rounded to two decimal places.
    ///
    /// Infeasible (out-of-bounds) vectors score `0.0`; only a length
    /// mismatch is an error.
    pub fn evaluate(&self, prices: &[f64]) -> Result<f64> {
        if prices.len() != self.num_goods() {
            return Err(PricingError::DimensionMismatch {
                expected: self.num_goods(),
                actual: prices.len(),
            });
        }
        if !self.is_valid(prices) {
            return Ok(0.0);
        }

        let revenue: f64 = prices
            .iter()
            .enumerate()
            .map(|(g, &price)| self.demand(g, prices) as f64 * price)
            .sum();

        Ok((revenue * 100.0).round() / 100.0)
    }

    /// Units sold of good `g`: own plus residual demand, capped at the
    /// market size.
    pub fn demand(&self, g: usize, prices: &[f64]) -> u64 {
        let demand = self.own_demand(g, prices[g]) + self.residual_demand(g, prices);
        let market = self.curves[g].total_demand();
        if demand as f64 > market {
            market.round() as u64
        } else {
            demand
        }
    }

    /// Units of good `g` demanded at `price` from its own curve alone.
    pub fn own_demand(&self, g: usize, price: f64) -> u64 {
        self.curves[g].units_at(price)
    }

    /// Demand for good `g` spilled over from every other good.
    pub fn residual_demand(&self, g: usize, prices: &[f64]) -> u64 {
        let spill: f64 = (0..self.num_goods())
            .filter(|&j| j != g)
            .map(|j| self.own_demand(j, prices[j]) as f64 * self.impact[j][g])
            .sum();
        spill.round() as u64
    }

    /// Draws a valid price vector by rejection sampling in `[0, 10)`.
    ///
    /// # Errors
    /// [`PricingError::SamplingExhausted`] after
    /// [`MAX_SAMPLING_ATTEMPTS`] rejected draws.
    pub fn random_prices<R: Rng>(&self, rng: &mut R) -> Result<Vec<f64>> {
        let mut prices = vec![0.0; self.num_goods()];
        for _ in 0..MAX_SAMPLING_ATTEMPTS {
            for p in prices.iter_mut() {
                *p = rng.random::<f64>() * SAMPLE_CEILING;
            }
            if self.is_valid(&prices) {
                return Ok(prices);
            }
        }
        Err(PricingError::SamplingExhausted {
            attempts: MAX_SAMPLING_ATTEMPTS,
        })
    }
}

fn random_total_demand<R: Rng>(rng: &mut R) -> f64 {
    rng.random::<f64>() * 100.0
}
