//! AIS configuration.

use crate::error::{PricingError, Result};

/// Configuration for the clonal-selection immune system.
///
/// # Examples
///
/// ```
/// use u_pricing::ais::AisConfig;
///
/// let config = AisConfig::default()
///     .with_population_size(30)
///     .with_replacement(5)
///     .with_clone_factor(4);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AisConfig {
    /// Number of cells kept after every generation.
    pub population_size: usize,

    /// Lowest-ranked cells refreshed with random price vectors each
    /// generation, in addition to the boundary cell just above them.
    ///
    /// Must be strictly less than `population_size`.
    pub replacement: usize,

    /// Each cell receives `population_size * clone_factor` clones.
    pub clone_factor: usize,

    /// Normalisation constant of the mutation probability
    /// `exp(-revenue / best_fitness_constant)`.
    pub best_fitness_constant: f64,
}

impl Default for AisConfig {
    fn default() -> Self {
        Self {
            population_size: 20,
            replacement: 10,
            clone_factor: 10,
            best_fitness_constant: 6000.0,
        }
    }
}

impl AisConfig {
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    pub fn with_replacement(mut self, n: usize) -> Self {
        self.replacement = n;
        self
    }

    pub fn with_clone_factor(mut self, n: usize) -> Self {
        self.clone_factor = n;
        self
    }

    pub fn with_best_fitness_constant(mut self, c: f64) -> Self {
        self.best_fitness_constant = c;
        self
    }

    /// Clones produced per cell in one generation.
    pub fn clones_per_cell(&self) -> usize {
        self.population_size * self.clone_factor
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.population_size == 0 {
            return Err(PricingError::invalid("population_size must be at least 1"));
        }
        if self.replacement >= self.population_size {
            return Err(PricingError::invalid(format!(
                "replacement ({}) must be less than population_size ({})",
                self.replacement, self.population_size
            )));
        }
        if self.clone_factor == 0 {
            return Err(PricingError::invalid("clone_factor must be at least 1"));
        }
        if !(self.best_fitness_constant.is_finite() && self.best_fitness_constant > 0.0) {
            return Err(PricingError::invalid(format!(
                "best_fitness_constant must be positive and finite, got {}",
                self.best_fitness_constant
            )));
        }
        Ok(())
    }
}
