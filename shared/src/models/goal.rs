//! Goal Model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Goal lifecycle status. Wire values are lowercase with spaces,
/// exactly as the backend stores them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GoalStatus {
    #[default]
    #[serde(rename = "in progress")]
    InProgress,
    #[serde(rename = "completed")]
    Completed,
    #[serde(rename = "on hold")]
    OnHold,
    #[serde(rename = "cancelled")]
    Cancelled,
}

impl GoalStatus {
    pub const ALL: [GoalStatus; 4] = [
        GoalStatus::InProgress,
        GoalStatus::Completed,
        GoalStatus::OnHold,
        GoalStatus::Cancelled,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            GoalStatus::InProgress => "in progress",
            GoalStatus::Completed => "completed",
            GoalStatus::OnHold => "on hold",
            GoalStatus::Cancelled => "cancelled",
        }
    }
}

/// Goal entity as returned by the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Goal {
    #[serde(default)]
    pub id: Option<i64>,
    pub title: String,
    #[serde(rename = "descriptionText", default)]
    pub description_text: String,
    #[serde(default)]
    pub status: GoalStatus,
    /// Free text, not a validated employee reference
    #[serde(default)]
    pub created_by: String,
    /// Owning employee reference
    pub emp_id: i64,
    /// Display name cached at assignment time; not re-derived if the
    /// employee is later renamed
    #[serde(default)]
    pub emp_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Server-set
    #[serde(default)]
    pub created_at: Option<String>,
}

/// Create/update payload for goals
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoalPayload {
    pub title: String,
    #[serde(rename = "descriptionText")]
    pub description_text: String,
    pub status: GoalStatus,
    pub created_by: String,
    pub emp_id: i64,
    pub emp_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}
