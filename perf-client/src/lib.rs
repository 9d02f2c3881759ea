//! Perf Client - HTTP client for the performance management backend
//!
//! Provides the remote API calls for every resource plus the session
//! store and its durable storage.

pub mod config;
pub mod error;
pub mod http;
pub mod session;

pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::HttpClient;
pub use session::{Session, SessionContext, SessionState, SessionStorage};

// Re-export shared types for convenience
pub use shared::client::{AuthEnvelope, RegisterRequest};
