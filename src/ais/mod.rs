//! Artificial Immune System (AIS) with clonal selection.
//!
//! Every generation each cell is cloned, clones are hypermutated with a
//! probability that falls as revenue rises, and the merged population is
//! cut back to size by revenue before the tail is refreshed with random
//! cells.
//!
//! # Key Types
//!
//! - [`AisConfig`]: population size, replacement count, clone factor
//! - [`Cell`]: a price vector and its revenue
//! - [`ImmuneSystem`]: the population engine, advanced by `update`
//!
//! # References
//!
//! - de Castro & Von Zuben (2002), "Learning and Optimization Using the
//!   Clonal Selection Principle"
//! - Cutello, Nicosia & Pavone (2004), "Exploring the Capability of
//!   Immune Algorithms: A Characterization of Hypermutation Operators"

mod config;
pub mod operators;
mod system;
mod types;

pub use config::AisConfig;
pub use system::ImmuneSystem;
pub use types::Cell;
