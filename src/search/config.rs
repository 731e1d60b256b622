//! Driver configuration: loop bound and trace sampling.

use crate::error::{PricingError, Result};
use std::time::Duration;

/// When a search loop stops calling `update`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Budget {
    /// A fixed number of `update` calls.
    Iterations(usize),

    /// Keep stepping until the wall-clock limit has passed.
    Timeout(Duration),
}

/// How the best revenue is sampled into the trace while the loop runs.
///
/// The final best revenue is appended to the trace regardless.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TraceSampling {
    /// Record only the final value.
    Off,

    /// Record after every `k` completed updates.
    EveryIterations(usize),

    /// Record on a fixed wall-clock cadence. Missed ticks are dropped.
    Interval(Duration),
}

/// Configuration for [`super::SearchRunner`].
///
/// The default matches a three-second timed run sampled every 5 ms.
///
/// # Examples
///
/// ```
/// use u_pricing::search::{Budget, SearchConfig, TraceSampling};
///
/// let config = SearchConfig::iterations(500).with_sampling(TraceSampling::EveryIterations(10));
/// assert_eq!(config.budget, Budget::Iterations(500));
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchConfig {
    pub budget: Budget,
    pub sampling: TraceSampling,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            budget: Budget::Timeout(Duration::from_secs(3)),
            sampling: TraceSampling::Interval(Duration::from_millis(5)),
        }
    }
}

impl SearchConfig {
    /// A run of exactly `n` updates with no intermediate sampling.
    pub fn iterations(n: usize) -> Self {
        Self {
            budget: Budget::Iterations(n),
            sampling: TraceSampling::Off,
        }
    }

    /// A timed run with no intermediate sampling.
    pub fn timeout(limit: Duration) -> Self {
        Self {
            budget: Budget::Timeout(limit),
            sampling: TraceSampling::Off,
        }
    }

    pub fn with_budget(mut self, budget: Budget) -> Self {
        self.budget = budget;
        self
    }

    pub fn with_sampling(mut self, sampling: TraceSampling) -> Self {
        self.sampling = sampling;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        match self.budget {
            Budget::Iterations(0) => {
                return Err(PricingError::invalid("iteration budget must be at least 1"))
            }
            Budget::Timeout(limit) if limit.is_zero() => {
                return Err(PricingError::invalid("timeout must be non-zero"))
            }
            _ => {}
        }
        match self.sampling {
            TraceSampling::EveryIterations(0) => Err(PricingError::invalid(
                "sampling every 0 iterations is not allowed",
            )),
            TraceSampling::Interval(d) if d.is_zero() => {
                Err(PricingError::invalid("sampling interval must be non-zero"))
            }
            _ => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SearchConfig::default();
        assert_eq!(config.budget, Budget::Timeout(Duration::from_secs(3)));
        assert_eq!(
            config.sampling,
            TraceSampling::Interval(Duration::from_millis(5))
        );
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_zero_budget() {
        assert!(SearchConfig::iterations(0).validate().is_err());
        assert!(SearchConfig::timeout(Duration::ZERO).validate().is_err());
    }

    #[test]
    fn test_validate_zero_sampling() {
        let config = SearchConfig::iterations(10).with_sampling(TraceSampling::EveryIterations(0));
        assert!(config.validate().is_err());
        let config =
            SearchConfig::iterations(10).with_sampling(TraceSampling::Interval(Duration::ZERO));
        assert!(config.validate().is_err());
    }
}
