//! Repository layer
//!
//! Repositories are stateless transports that issue status-check requests
//! against the remote API. They carry no polling logic.
//!
//! All repositories are trait-based to enable testing and mocking.

mod status;

// Re-export traits
pub use status::StatusRepository;

// Re-export implementations
pub use status::HttpStatusRepository;
