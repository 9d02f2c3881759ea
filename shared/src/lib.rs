//! Shared types for the performance management client
//!
//! Data models, wire envelopes, and auth DTOs used by both the API
//! client crate and the console application.

pub mod client;
pub mod models;
pub mod response;

// Re-exports
pub use serde::{Deserialize, Serialize};
