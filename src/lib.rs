//! Revenue-maximizing price search over a synthetic multi-good market.
//!
//! Three competing strategies search the same revenue oracle:
//!
//! - **Random search**: draw uniform price vectors and keep the best.
//! - **Particle Swarm Optimization (PSO)**: particles pulled toward their
//!   personal best and the swarm's global best.
//! - **Artificial Immune System (AIS)**: clonal selection with
//!   revenue-dependent contiguous-inversion hypermutation.
//!
//! # Architecture
//!
//! [`problem::PricingProblem`] is the only fitness function; both
//! population engines ([`ais::ImmuneSystem`], [`pso::Swarm`]) depend on it
//! and on nothing else. The [`search`] drivers step any engine under an
//! iteration or wall-clock budget, and [`experiment`] batches runs over
//! seeds into per-algorithm sheets.
//!
//! Every run owns a single generator ([`random::create_rng`]) that is
//! passed by `&mut` through market generation and every engine step, so
//! seeded runs are reproducible.

pub mod ais;
pub mod error;
pub mod experiment;
pub mod problem;
pub mod pso;
pub mod random;
pub mod search;

pub use error::{PricingError, Result};
