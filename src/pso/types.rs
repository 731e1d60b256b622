//! Particle state and movement rules.

use super::config::PsoConfig;
use crate::error::Result;
use crate::problem::PricingProblem;
use rand::Rng;

/// One particle of the swarm.
///
/// `current_revenue` is always the oracle's score of `position` and
/// `best_revenue` the score of `best_position`. Each vector is owned
/// exclusively by the particle.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    position: Vec<f64>,
    velocity: Vec<f64>,
    best_position: Vec<f64>,
    current_revenue: f64,
    best_revenue: f64,
}

impl Particle {
    /// Creates a particle at a random valid position.
    ///
    /// The initial velocity points halfway toward a second, independent
    /// random valid vector.
    pub fn new<R: Rng>(problem: &PricingProblem, rng: &mut R) -> Result<Self> {
        let position = problem.random_prices(rng)?;
        let target = problem.random_prices(rng)?;
        let velocity = initial_velocity(&position, &target);
        let current_revenue = problem.evaluate(&position)?;

        Ok(Self {
            best_position: position.clone(),
            position,
            velocity,
            current_revenue,
            best_revenue: current_revenue,
        })
    }

    /// Particle at `position` with the given velocity and no history.
    #[cfg(test)]
    pub(crate) fn at(
        position: Vec<f64>,
        velocity: Vec<f64>,
        problem: &PricingProblem,
    ) -> Result<Self> {
        let current_revenue = problem.evaluate(&position)?;
        Ok(Self {
            best_position: position.clone(),
            position,
            velocity,
            current_revenue,
            best_revenue: current_revenue,
        })
    }

    /// Moves the particle one step and updates its personal best.
    ///
    /// The personal best is replaced only on a strict revenue increase.
    pub fn step<R: Rng>(
        &mut self,
        global_best: &[f64],
        config: &PsoConfig,
        problem: &PricingProblem,
        rng: &mut R,
    ) -> Result<()> {
        self.velocity = next_velocity(
            config,
            &self.velocity,
            &self.position,
            &self.best_position,
            global_best,
            rng,
        );
        advance_position(&mut self.position, &self.velocity);
        self.current_revenue = problem.evaluate(&self.position)?;

        if self.current_revenue > self.best_revenue {
            self.best_position.copy_from_slice(&self.position);
            self.best_revenue = self.current_revenue;
        }
        Ok(())
    }

    pub fn position(&self) -> &[f64] {
        &self.position
    }

    pub fn velocity(&self) -> &[f64] {
        &self.velocity
    }

    pub fn best_position(&self) -> &[f64] {
        &self.best_position
    }

    pub fn current_revenue(&self) -> f64 {
        self.current_revenue
    }

    pub fn best_revenue(&self) -> f64 {
        self.best_revenue
    }
}

/// `(second - first) / 2`, elementwise.
pub fn initial_velocity(first: &[f64], second: &[f64]) -> Vec<f64> {
    first
        .iter()
        .zip(second)
        .map(|(a, b)| (b - a) / 2.0)
        .collect()
}

/// Canonical PSO velocity update.
///
/// `v' = w*v + c1*r1*(pbest - x) + c2*r2*(gbest - x)` with fresh
/// `r1, r2 ~ U[0, 1)` drawn for every coordinate.
pub fn next_velocity<R: Rng>(
    config: &PsoConfig,
    velocity: &[f64],
    position: &[f64],
    personal_best: &[f64],
    global_best: &[f64],
    rng: &mut R,
) -> Vec<f64> {
    (0..velocity.len())
        .map(|i| {
            let r1: f64 = rng.random();
            let r2: f64 = rng.random();
            config.inertia * velocity[i]
                + config.cognitive_weight * r1 * (personal_best[i] - position[i])
                + config.social_weight * r2 * (global_best[i] - position[i])
        })
        .collect()
}

/// `x += v`, elementwise. No clamping to bounds.
pub fn advance_position(position: &mut [f64], velocity: &[f64]) {
    for (x, v) in position.iter_mut().zip(velocity) {
        *x += v;
    }
}
