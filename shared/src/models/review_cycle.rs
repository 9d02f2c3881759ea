//! Review Cycle Model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Review-cycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CycleStatus {
    #[default]
    #[serde(rename = "planned")]
    Planned,
    #[serde(rename = "in progress")]
    InProgress,
    #[serde(rename = "completed")]
    Completed,
}

impl CycleStatus {
    pub const ALL: [CycleStatus; 3] = [
        CycleStatus::Planned,
        CycleStatus::InProgress,
        CycleStatus::Completed,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            CycleStatus::Planned => "planned",
            CycleStatus::InProgress => "in progress",
            CycleStatus::Completed => "completed",
        }
    }
}

/// Review cycle entity as returned by the backend.
/// The start < end ordering is enforced client-side before submission
/// only; the backend does not guarantee it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewCycle {
    #[serde(default)]
    pub id: Option<i64>,
    pub cycle_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub status: CycleStatus,
    #[serde(default)]
    pub description: String,
}

/// Create/update payload for review cycles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CyclePayload {
    pub cycle_name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub status: CycleStatus,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_backend_row() {
        let cycle: ReviewCycle = serde_json::from_value(json!({
            "id": 2,
            "cycle_name": "H1 2025",
            "start_date": "2025-01-01",
            "end_date": "2025-06-30",
            "status": "in progress",
            "description": "First half of 2025"
        }))
        .unwrap();
        assert_eq!(cycle.status, CycleStatus::InProgress);
        assert_eq!(cycle.cycle_name, "H1 2025");
    }

    #[test]
    fn status_defaults_to_planned() {
        let cycle: ReviewCycle = serde_json::from_value(json!({
            "cycle_name": "H2 2025",
            "start_date": "2025-07-01",
            "end_date": "2025-12-31"
        }))
        .unwrap();
        assert_eq!(cycle.status, CycleStatus::Planned);
    }
}
