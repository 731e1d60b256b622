//! Error type shared by the oracle, the engines, and the drivers.

use thiserror::Error;

/// Errors raised while building or running a price search.
///
/// Out-of-bounds price vectors are deliberately **not** an error: the
/// oracle prices them at zero revenue and lets selection pressure pull
/// the search back into the feasible region.
#[derive(Debug, Error)]
pub enum PricingError {
    /// A price vector's length does not match the number of goods.
    #[error("price vector has {actual} entries, expected {expected}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// A configuration value was rejected at construction time.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// Rejection sampling failed to produce a valid price vector.
    #[error("no valid price vector found after {attempts} attempts")]
    SamplingExhausted { attempts: usize },

    /// A report sink failed to write.
    #[error("report sink failed: {0}")]
    Io(#[from] std::io::Error),

    /// A delimited report record could not be written.
    #[error("report record failed: {0}")]
    Csv(#[from] csv::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PricingError>;

impl PricingError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        PricingError::InvalidConfiguration(msg.into())
    }
}
