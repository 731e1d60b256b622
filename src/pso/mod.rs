//! Particle Swarm Optimization (PSO).
//!
//! Particles fly through price space pulled toward their own best find
//! and the swarm's best find. Positions are never clamped: a particle
//! that leaves the feasible box scores zero revenue until the pull of the
//! best-known valid points brings it back.
//!
//! # Key Types
//!
//! - [`PsoConfig`]: swarm size and movement weights
//! - [`Particle`]: position, velocity, and personal best
//! - [`Swarm`]: the swarm engine, advanced by `update`
//!
//! # References
//!
//! - Kennedy & Eberhart (1995), "Particle Swarm Optimization"
//! - Clerc & Kennedy (2002), "The Particle Swarm: Explosion, Stability,
//!   and Convergence in a Multidimensional Complex Space"

mod config;
mod swarm;
mod types;

pub use config::PsoConfig;
pub use swarm::Swarm;
pub use types::{advance_position, initial_velocity, next_velocity, Particle};
