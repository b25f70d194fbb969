//! Engine error types

use shared::gateway::GatewayError;
use thiserror::Error;

/// Simulation error type
///
/// Transient gateway failures are handled at the call site and never
/// surface through this type; what propagates here is either a fatal
/// precondition or a caller contract violation.
#[derive(Debug, Error)]
pub enum SimError {
    /// The merchant is missing data the run cannot start without
    /// (items, employees, or tenders)
    #[error("fatal precondition: {0}")]
    Precondition(String),

    /// Caller constructed invalid input (programmer error)
    #[error("invalid input: {0}")]
    Invalid(String),

    /// A gateway failure that occurred outside per-order error containment
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// Seed data could not be read or parsed
    #[error("seed data error: {0}")]
    SeedData(String),
}

/// Result type for engine operations
pub type SimResult<T> = Result<T, SimError>;

impl From<serde_json::Error> for SimError {
    fn from(err: serde_json::Error) -> Self {
        SimError::SeedData(err.to_string())
    }
}

impl From<std::io::Error> for SimError {
    fn from(err: std::io::Error) -> Self {
        SimError::SeedData(err.to_string())
    }
}
