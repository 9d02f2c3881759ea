//! Wire envelopes for the performance API
//!
//! The backend is not consistent about response shapes: list endpoints
//! answer either `{"data": [...]}` or a bare array, single-record
//! endpoints either `{"data": {...}}` or the bare record. Anything else
//! is a contract violation and is surfaced as an error instead of being
//! treated as an empty list.

use serde::Deserialize;
use thiserror::Error;

/// A list response body received from the backend.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ListBody<T> {
    /// Envelope shape: `{"data": [...]}`
    Envelope { data: Vec<T> },
    /// Bare array shape: `[...]`
    Bare(Vec<T>),
    /// Neither shape matched
    Other(serde_json::Value),
}

/// A single-record response body, enveloped or bare.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum OneBody<T> {
    Envelope { data: T },
    Bare(T),
}

/// The response body matched none of the shapes the backend is known
/// to produce.
#[derive(Debug, Error)]
#[error("unexpected response shape: {0}")]
pub struct UnexpectedShape(pub String);

impl<T> ListBody<T> {
    /// Extract the list items, rejecting unknown shapes.
    pub fn into_items(self) -> Result<Vec<T>, UnexpectedShape> {
        match self {
            ListBody::Envelope { data } => Ok(data),
            ListBody::Bare(items) => Ok(items),
            ListBody::Other(value) => Err(UnexpectedShape(preview(&value))),
        }
    }
}

impl<T> OneBody<T> {
    pub fn into_inner(self) -> T {
        match self {
            OneBody::Envelope { data } => data,
            OneBody::Bare(record) => record,
        }
    }
}

/// Short excerpt of an offending body, enough to diagnose without
/// dumping a whole payload into an error banner.
fn preview(value: &serde_json::Value) -> String {
    let mut text = value.to_string();
    if text.len() > 120 {
        text.truncate(117);
        text.push_str("...");
    }
    text
}
