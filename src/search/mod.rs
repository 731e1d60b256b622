//! Search drivers.
//!
//! Wraps any engine in a step loop bounded by an iteration count or a
//! wall-clock timeout, optionally sampling the best revenue into a trace.
//!
//! # Key Types
//!
//! - [`SearchEngine`]: the step/best contract the drivers consume
//! - [`RandomSearch`]: random-restart baseline engine
//! - [`SearchConfig`], [`Budget`], [`TraceSampling`]: loop bounds and sampling
//! - [`SearchRunner`]: executes the loop, returning a [`SearchOutcome`]

mod config;
mod random;
mod runner;
mod types;

pub use config::{Budget, SearchConfig, TraceSampling};
pub use random::RandomSearch;
pub use runner::{SearchOutcome, SearchRunner};
pub use types::{Algorithm, SearchEngine};
