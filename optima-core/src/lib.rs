//! Optima Core
//!
//! Shared wire types for the Optima task-tracking client.
//!
//! This crate contains:
//! - Domain types: task status responses and poll keys
//! - DTOs: request descriptors sent to the remote API

pub mod domain;
pub mod dto;
