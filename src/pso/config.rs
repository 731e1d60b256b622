//! PSO configuration.

use crate::error::{PricingError, Result};

/// Configuration for the particle swarm.
///
/// Defaults are the usual constriction-derived weights
/// (`w = 0.721`, `c1 = c2 = 1.1193`).
///
/// # Examples
///
/// ```
/// use u_pricing::pso::PsoConfig;
///
/// let config = PsoConfig::default().with_num_particles(25);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PsoConfig {
    /// Number of particles in the swarm.
    pub num_particles: usize,

    /// Share of the previous velocity kept between steps.
    pub inertia: f64,

    /// Pull toward the particle's personal best.
    pub cognitive_weight: f64,

    /// Pull toward the swarm's global best.
    pub social_weight: f64,
}

impl Default for PsoConfig {
    fn default() -> Self {
        Self {
            num_particles: 10,
            inertia: 0.721,
            cognitive_weight: 1.1193,
            social_weight: 1.1193,
        }
    }
}

impl PsoConfig {
    pub fn with_num_particles(mut self, n: usize) -> Self {
        self.num_particles = n;
        self
    }

    pub fn with_inertia(mut self, w: f64) -> Self {
        self.inertia = w;
        self
    }

    pub fn with_cognitive_weight(mut self, c: f64) -> Self {
        self.cognitive_weight = c;
        self
    }

    pub fn with_social_weight(mut self, c: f64) -> Self {
        self.social_weight = c;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.num_particles == 0 {
            return Err(PricingError::invalid("num_particles must be at least 1"));
        }
        for (name, value) in [
            ("inertia", self.inertia),
            ("cognitive_weight", self.cognitive_weight),
            ("social_weight", self.social_weight),
        ] {
            if !value.is_finite() {
                return Err(PricingError::invalid(format!(
                    "{name} must be finite, got {value}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PsoConfig::default();
        assert_eq!(config.num_particles, 10);
        assert!((config.inertia - 0.721).abs() < 1e-10);
        assert!((config.cognitive_weight - 1.1193).abs() < 1e-10);
        assert!((config.social_weight - 1.1193).abs() < 1e-10);
    }

    #[test]
    fn test_validate_zero_particles() {
        let config = PsoConfig::default().with_num_particles(0);
        assert!(matches!(
            config.validate(),
            Err(PricingError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_validate_non_finite_weight() {
        let config = PsoConfig::default().with_social_weight(f64::INFINITY);
        assert!(config.validate().is_err());
    }
}
