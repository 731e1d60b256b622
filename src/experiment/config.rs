//! Experiment configuration.

use crate::ais::AisConfig;
use crate::error::{PricingError, Result};
use crate::pso::PsoConfig;
use crate::search::{Algorithm, SearchConfig};

/// Configuration for an [`super::ExperimentRunner`] batch.
///
/// # Examples
///
/// ```
/// use u_pricing::experiment::ExperimentConfig;
/// use u_pricing::search::{Algorithm, SearchConfig};
///
/// let config = ExperimentConfig::default()
///     .with_seeds(0..5)
///     .with_search(SearchConfig::iterations(50))
///     .with_algorithms(vec![Algorithm::ParticleSwarm]);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExperimentConfig {
    /// Number of goods in each generated market.
    pub num_goods: usize,

    /// One run of every algorithm per seed.
    pub seeds: Vec<u64>,

    /// Replace each seed with a fresh entropy seed. The seed actually
    /// used is recorded in the report.
    pub use_random_seed: bool,

    /// Loop bound and trace sampling for every run.
    pub search: SearchConfig,

    pub ais: AisConfig,

    pub pso: PsoConfig,

    /// Strategies to run, in report order.
    pub algorithms: Vec<Algorithm>,

    /// Run seeds on the rayon pool (requires the `parallel` feature).
    pub parallel: bool,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            num_goods: 20,
            seeds: (0..30).collect(),
            use_random_seed: false,
            search: SearchConfig::default(),
            ais: AisConfig::default(),
            pso: PsoConfig::default(),
            algorithms: Algorithm::ALL.to_vec(),
            parallel: false,
        }
    }
}

impl ExperimentConfig {
    pub fn with_num_goods(mut self, n: usize) -> Self {
        self.num_goods = n;
        self
    }

    pub fn with_seeds(mut self, seeds: impl IntoIterator<Item = u64>) -> Self {
        self.seeds = seeds.into_iter().collect();
        self
    }

    pub fn with_random_seed(mut self, random: bool) -> Self {
        self.use_random_seed = random;
        self
    }

    pub fn with_search(mut self, search: SearchConfig) -> Self {
        self.search = search;
        self
    }

    pub fn with_ais(mut self, ais: AisConfig) -> Self {
        self.ais = ais;
        self
    }

    pub fn with_pso(mut self, pso: PsoConfig) -> Self {
        self.pso = pso;
        self
    }

    pub fn with_algorithms(mut self, algorithms: Vec<Algorithm>) -> Self {
        self.algorithms = algorithms;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validates this configuration and every nested one.
    pub fn validate(&self) -> Result<()> {
        if self.num_goods == 0 {
            return Err(PricingError::invalid("num_goods must be at least 1"));
        }
        if self.seeds.is_empty() {
            return Err(PricingError::invalid("at least one seed is required"));
        }
        if self.algorithms.is_empty() {
            return Err(PricingError::invalid("at least one algorithm is required"));
        }
        self.search.validate()?;
        if self.algorithms.contains(&Algorithm::ImmuneSystem) {
            self.ais.validate()?;
        }
        if self.algorithms.contains(&Algorithm::ParticleSwarm) {
            self.pso.validate()?;
        }
        Ok(())
    }
}
