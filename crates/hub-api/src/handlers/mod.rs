//! HTTP request handlers
//!
//! Handlers build a service over the shared context and translate its
//! results into JSON responses.

pub mod auth;
pub mod comments;
pub mod events;
pub mod families;
pub mod health;
pub mod news;
pub mod reactions;
