//! Auth DTOs shared between the console and the API client
//!
//! The backend signals login/registration outcomes inconsistently: a
//! numeric `status` on some paths, a boolean `success` on others, and
//! sometimes both. The envelope here accepts either.

use crate::models::Employee;
use serde::{Deserialize, Serialize};

/// Registration request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub is_admin: bool,
}

/// Envelope returned by the login and registration endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct AuthEnvelope {
    #[serde(default)]
    pub status: Option<i64>,
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<Employee>,
}

impl AuthEnvelope {
    /// True when either success signal is present and positive.
    pub fn is_success(&self) -> bool {
        self.success.unwrap_or(false) || self.status == Some(200)
    }

    /// Server-provided message, or the given default when none came back.
    pub fn message_or(&self, default: &str) -> String {
        match &self.message {
            Some(message) if !message.is_empty() => message.clone(),
            _ => default.to_string(),
        }
    }
}
