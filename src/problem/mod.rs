//! The pricing problem: a synthetic multi-good market and its revenue oracle.
//!
//! Each good has a price-response curve (linear, constant elasticity, or
//! fixed demand) and a row of cross-impact weights describing how much of
//! its own demand spills over into every other good. The oracle maps a
//! price vector to total revenue and is the only fitness function the
//! search engines see.
//!
//! # Key Types
//!
//! - [`PricingProblem`]: the immutable oracle (`is_valid`, `evaluate`)
//! - [`ResponseCurve`]: closed set of demand curves, one per good
//! - [`ProblemConfig`]: good count and seeding for generated problems

mod config;
mod oracle;
mod types;

pub use config::ProblemConfig;
pub use oracle::{PricingProblem, MAX_SAMPLING_ATTEMPTS, SAMPLE_CEILING};
pub use types::{PriceBounds, ResponseCurve};
