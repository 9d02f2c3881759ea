//! Completion messages posted back to the UI loop
//!
//! Every async request ends as exactly one of these. Messages are data
//! about what happened; the views decide what it means.

use shared::client::AuthEnvelope;
use shared::models::{Employee, EmployeePayload, Goal, Review, ReviewCycle};

/// Which resource a mutation touched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Employees,
    Goals,
    Cycles,
    Reviews,
}

/// What kind of mutation finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MutationKind {
    Create,
    Update,
    Delete,
}

/// Which view a dropdown-options fetch feeds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionsTarget {
    Goals,
    Reviews,
}

/// Async completion messages
#[derive(Debug)]
pub enum Net {
    EmployeeList { seq: u64, result: Result<Vec<Employee>, String> },
    GoalList { seq: u64, result: Result<Vec<Goal>, String> },
    CycleList { seq: u64, result: Result<Vec<ReviewCycle>, String> },
    ReviewList { seq: u64, result: Result<Vec<Review>, String> },

    /// Employee dropdown feed for the goals/reviews forms
    EmployeeOptions { target: OptionsTarget, result: Result<Vec<Employee>, String> },
    /// Cycle dropdown feed for the reviews form
    CycleOptions { result: Result<Vec<ReviewCycle>, String> },
    /// Reviews backing the per-cycle statistics on the cycles view
    CycleReviews { seq: u64, result: Result<Vec<Review>, String> },

    ProfileRecord { seq: u64, result: Result<Employee, String> },
    ProfileGoals { seq: u64, result: Result<Vec<Goal>, String> },
    ProfileReviews { seq: u64, result: Result<Vec<Review>, String> },
    ProfileSaved { payload: EmployeePayload, result: Result<serde_json::Value, String> },

    MutationDone { resource: Resource, kind: MutationKind, result: Result<(), String> },

    LoginDone(Result<AuthEnvelope, String>),
    RegisterDone(Result<AuthEnvelope, String>),
}
