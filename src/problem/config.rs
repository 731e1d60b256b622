//! Problem generation parameters.

use crate::error::{PricingError, Result};

/// Configuration for generating a [`super::PricingProblem`].
///
/// # Examples
///
/// ```
/// use u_pricing::problem::{PricingProblem, ProblemConfig};
///
/// let config = ProblemConfig::new(20).with_seed(3);
/// let problem = PricingProblem::from_config(&config).unwrap();
/// assert_eq!(problem.num_goods(), 20);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ProblemConfig {
    /// Number of goods in the market.
    pub num_goods: usize,

    /// Seed for the market draw. Ignored when `use_random_seed` is set.
    pub seed: u64,

    /// Seed from system entropy instead of `seed`.
    pub use_random_seed: bool,
}

impl Default for ProblemConfig {
    fn default() -> Self {
        Self {
            num_goods: 20,
            seed: 0,
            use_random_seed: false,
        }
    }
}

impl ProblemConfig {
    pub fn new(num_goods: usize) -> Self {
        Self {
            num_goods,
            ..Self::default()
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_random_seed(mut self, random: bool) -> Self {
        self.use_random_seed = random;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.num_goods == 0 {
            return Err(PricingError::invalid("num_goods must be at least 1"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ProblemConfig::default();
        assert_eq!(config.num_goods, 20);
        assert_eq!(config.seed, 0);
        assert!(!config.use_random_seed);
    }

    #[test]
    fn test_validate_zero_goods() {
        assert!(ProblemConfig::new(0).validate().is_err());
    }
}
