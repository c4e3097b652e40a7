//! Scheduler layer
//!
//! Tracks named polling loops against server-side tasks. Each loop issues a
//! status check, hands the response to its callback, and schedules the next
//! check while the server keeps reporting the task as started.

mod poller;
mod registry;

pub use poller::{PollCallback, PollResult, TaskPoller, WeakTaskPoller};
