//! Optima Task Poller
//!
//! Tracks long-running server-side tasks (calibrations, optimizations, ...)
//! by polling their status until the server reports a terminal state.
//!
//! Architecture:
//! - Configuration: API URL and polling interval
//! - Repository: status-check transport over HTTP, mockable in tests
//! - Scheduler: registry of named polling loops
//!
//! # Example
//!
//! ```no_run
//! use optima_client::OptimaClient;
//! use optima_core::dto::status::StatusRequest;
//! use optima_poller::{HttpStatusRepository, PollerConfig, TaskPoller};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = PollerConfig::default();
//!     let client = Arc::new(OptimaClient::new(config.api_url.clone()));
//!     let poller = TaskPoller::new(Arc::new(HttpStatusRepository::new(client)), &config);
//!
//!     poller.start_poll("proj1:task9", StatusRequest::check_task("task9"), |result| {
//!         println!("{:?}", result);
//!     })?;
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod repository;
pub mod scheduler;

pub use config::PollerConfig;
pub use error::PollerError;
pub use repository::{HttpStatusRepository, StatusRepository};
pub use scheduler::{PollCallback, PollResult, TaskPoller, WeakTaskPoller};
