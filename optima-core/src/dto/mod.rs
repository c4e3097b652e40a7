//! Data Transfer Objects for the remote API
//!
//! Request payloads and descriptors understood by the Optima server.

pub mod procedure;
pub mod status;
