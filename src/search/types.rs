//! Engine contract consumed by the drivers.

use crate::ais::ImmuneSystem;
use crate::error::Result;
use crate::pso::Swarm;
use rand::Rng;
use std::fmt;

/// The three competing search strategies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Algorithm {
    RandomSearch,
    ParticleSwarm,
    ImmuneSystem,
}

impl Algorithm {
    pub const ALL: [Algorithm; 3] = [
        Algorithm::RandomSearch,
        Algorithm::ParticleSwarm,
        Algorithm::ImmuneSystem,
    ];
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::RandomSearch => write!(f, "random"),
            Algorithm::ParticleSwarm => write!(f, "pso"),
            Algorithm::ImmuneSystem => write!(f, "ais"),
        }
    }
}

/// A step-based search engine.
///
/// `update` runs to completion before returning, so the best snapshot
/// read between calls is always consistent.
pub trait SearchEngine {
    /// Which strategy this engine implements.
    fn algorithm(&self) -> Algorithm;

    /// Advances the search by one step.
    fn update<R: Rng>(&mut self, rng: &mut R) -> Result<()>;

    /// Best revenue found so far.
    fn best_revenue(&self) -> f64;

    /// Prices achieving [`best_revenue`](Self::best_revenue).
    fn best_prices(&self) -> &[f64];
}

impl SearchEngine for ImmuneSystem<'_> {
    fn algorithm(&self) -> Algorithm {
        Algorithm::ImmuneSystem
    }

    fn update<R: Rng>(&mut self, rng: &mut R) -> Result<()> {
        ImmuneSystem::update(self, rng)
    }

    fn best_revenue(&self) -> f64 {
        self.best_cell().revenue()
    }

    fn best_prices(&self) -> &[f64] {
        self.best_cell().prices()
    }
}

impl SearchEngine for Swarm<'_> {
    fn algorithm(&self) -> Algorithm {
        Algorithm::ParticleSwarm
    }

    fn update<R: Rng>(&mut self, rng: &mut R) -> Result<()> {
        Swarm::update(self, rng)
    }

    fn best_revenue(&self) -> f64 {
        Swarm::best_revenue(self)
    }

    fn best_prices(&self) -> &[f64] {
        Swarm::best_prices(self)
    }
}
