//! Swarm engine.

use super::config::PsoConfig;
use super::types::Particle;
use crate::error::Result;
use crate::problem::PricingProblem;
use rand::Rng;
use tracing::{debug, trace};

/// A swarm of [`Particle`]s with a global best.
///
/// Particles move one at a time within a step. As soon as a particle
/// beats the global best, the next particle in the same step is pulled
/// toward the new point.
///
/// # Usage
///
/// ```
/// use u_pricing::problem::PricingProblem;
/// use u_pricing::pso::{PsoConfig, Swarm};
/// use u_pricing::random::create_rng;
///
/// let mut rng = create_rng(42);
/// let problem = PricingProblem::generate(10, &mut rng).unwrap();
/// let mut swarm = Swarm::new(&problem, PsoConfig::default(), &mut rng).unwrap();
/// let before = swarm.best_revenue();
/// swarm.update(&mut rng).unwrap();
/// assert!(swarm.best_revenue() >= before);
/// ```
#[derive(Debug, Clone)]
pub struct Swarm<'p> {
    problem: &'p PricingProblem,
    config: PsoConfig,
    particles: Vec<Particle>,
    best_position: Vec<f64>,
    best_revenue: f64,
    iteration: usize,
}

impl<'p> Swarm<'p> {
    /// Creates `num_particles` particles at random valid positions.
    ///
    /// The first particle seeds the global best; later particles replace
    /// it only on a strict improvement.
    pub fn new<R: Rng>(
        problem: &'p PricingProblem,
        config: PsoConfig,
        rng: &mut R,
    ) -> Result<Self> {
        config.validate()?;

        let particles = (0..config.num_particles)
            .map(|_| Particle::new(problem, rng))
            .collect::<Result<Vec<_>>>()?;

        let mut best = &particles[0];
        for particle in &particles[1..] {
            if particle.best_revenue() > best.best_revenue() {
                best = particle;
            }
        }
        let best_position = best.best_position().to_vec();
        let best_revenue = best.best_revenue();
        debug!(particles = particles.len(), best_revenue, "swarm initialised");

        Ok(Self {
            problem,
            config,
            particles,
            best_position,
            best_revenue,
            iteration: 0,
        })
    }

    /// Moves every particle once, in order.
    pub fn update<R: Rng>(&mut self, rng: &mut R) -> Result<()> {
        for particle in self.particles.iter_mut() {
            particle.step(&self.best_position, &self.config, self.problem, rng)?;

            if particle.current_revenue() > self.best_revenue {
                self.best_position.copy_from_slice(particle.position());
                self.best_revenue = particle.current_revenue();
                trace!(
                    iteration = self.iteration,
                    best_revenue = self.best_revenue,
                    "new global best"
                );
            }
        }
        self.iteration += 1;
        Ok(())
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Position of the best revenue seen by any particle.
    pub fn best_prices(&self) -> &[f64] {
        &self.best_position
    }

    pub fn best_revenue(&self) -> f64 {
        self.best_revenue
    }

    /// Number of completed steps.
    pub fn iteration(&self) -> usize {
        self.iteration
    }

    pub fn config(&self) -> &PsoConfig {
        &self.config
    }
}
