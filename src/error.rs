//! Crate-wide error type.
//!
//! Every fallible public operation returns [`Result`]. The five kinds below
//! mirror the propagation policy of the permutation-group engine: argument
//! and domain violations are surfaced immediately, timeouts may be retried
//! by a caller, and capability failures degrade callers to an "unavailable"
//! result rather than panicking.

use thiserror::Error as ThisError;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// The five error kinds produced by the permutation-group engine and the
/// architecture-graph layer built on top of it.
#[derive(Debug, ThisError)]
pub enum Error {
    /// Mismatched degrees, out-of-range PE indices, malformed generators,
    /// an empty generating set where one is required, or an unknown enum
    /// value passed through an options struct.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A membership test against a group of the wrong degree, or a
    /// transversal query for a point outside the relevant orbit.
    #[error("domain violation: {0}")]
    DomainViolation(String),

    /// BSGS construction was aborted by a cancellation flag or exceeded its
    /// wall-clock deadline.
    #[error("construction aborted: {0}")]
    Aborted(String),

    /// An orbit or group order exceeds a representable range, or an
    /// allocation failed during optional orbit enumeration.
    #[error("capacity exceeded: {0}")]
    Capacity(String),

    /// A requested construction path is not implemented.
    #[error("unsupported: {0}")]
    Unsupported(String),
}

impl Error {
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    pub fn domain_violation(msg: impl Into<String>) -> Self {
        Self::DomainViolation(msg.into())
    }

    pub fn aborted(msg: impl Into<String>) -> Self {
        Self::Aborted(msg.into())
    }

    pub fn capacity(msg: impl Into<String>) -> Self {
        Self::Capacity(msg.into())
    }

    pub fn unsupported(msg: impl Into<String>) -> Self {
        Self::Unsupported(msg.into())
    }
}
