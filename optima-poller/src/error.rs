//! Poller error types

use thiserror::Error;

/// Misuse of the poller API
///
/// Operational conditions (unknown key, double start, double stop, failed
/// status checks) are never errors; failures reach the poll's callback instead.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PollerError {
    /// Poll keys must contain at least one non-whitespace character
    #[error("poll key cannot be empty")]
    EmptyKey,
}
