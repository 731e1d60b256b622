//! Demand curves and price bounds.

use std::fmt;

/// Price-response curve of a single good.
///
/// Every variant carries the total market size `total_demand` (`D0`).
/// The curve never reports more than `D0` units or fewer than zero.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ResponseCurve {
    /// `D0 - (D0 / P_sat) * price`: demand falls to zero at `satiating_price`.
    Linear {
        total_demand: f64,
        satiating_price: f64,
    },

    /// `D0 / price^elasticity`.
    ConstantElasticity { total_demand: f64, elasticity: f64 },

    /// Demand is `D0` regardless of price.
    FixedDemand { total_demand: f64 },
}

impl ResponseCurve {
    /// Total market size `D0`.
    pub fn total_demand(&self) -> f64 {
        match *self {
            ResponseCurve::Linear { total_demand, .. }
            | ResponseCurve::ConstantElasticity { total_demand, .. }
            | ResponseCurve::FixedDemand { total_demand } => total_demand,
        }
    }

    /// Units demanded at `price`, clamped to `[0, D0]` and rounded to a
    /// whole unit count.
    pub fn units_at(&self, price: f64) -> u64 {
        let d0 = self.total_demand();
        let raw = match *self {
            ResponseCurve::Linear {
                satiating_price, ..
            } => d0 - (d0 / satiating_price) * price,
            ResponseCurve::ConstantElasticity { elasticity, .. } => d0 / price.powf(elasticity),
            ResponseCurve::FixedDemand { .. } => d0,
        };

        let clamped = if raw > d0 {
            d0
        } else if raw < 0.0 {
            0.0
        } else {
            raw
        };
        // NaN (e.g. 0/0 on a degenerate curve) saturates to zero units.
        clamped.round() as u64
    }
}

impl fmt::Display for ResponseCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResponseCurve::Linear {
                total_demand,
                satiating_price,
            } => write!(f, "L ({total_demand}/{satiating_price})"),
            ResponseCurve::ConstantElasticity {
                total_demand,
                elasticity,
            } => write!(f, "CE ({total_demand}/{elasticity})"),
            ResponseCurve::FixedDemand { total_demand } => write!(f, "FD ({total_demand})"),
        }
    }
}

/// Inclusive price range `[low, high]` for one good.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PriceBounds {
    pub low: f64,
    pub high: f64,
}

impl PriceBounds {
    /// Bounds every good uses in this market: one penny to ten pounds.
    pub const MARKET: PriceBounds = PriceBounds {
        low: 0.01,
        high: 10.0,
    };

    /// Whether `price` lies in `[low, high]`. NaN is never contained.
    pub fn contains(&self, price: f64) -> bool {
        (self.low..=self.high).contains(&price)
    }
}

impl Default for PriceBounds {
    fn default() -> Self {
        PriceBounds::MARKET
    }
}
