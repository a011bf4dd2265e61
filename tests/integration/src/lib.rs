//! Integration test utilities for the family hub
//!
//! Spawns the REST API on a loopback port over the in-memory backend and
//! offers typed request helpers.

pub mod fixtures;
pub mod helpers;

pub use fixtures::*;
pub use helpers::*;
