//! Core domain types
//!
//! Types describing server-side asynchronous tasks as seen by the client.
//! They are shared between the HTTP client (decodes them) and the poller
//! (inspects them to drive its polling loops).

pub mod task;
