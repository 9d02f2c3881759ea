//! Effects returned by the views and the runtime that executes them
//!
//! Views describe I/O as `Cmd` values; the runtime spawns one task per
//! command and posts the completion back through the channel. Nothing
//! is cancellable once started.

use crate::msg::{MutationKind, Net, OptionsTarget, Resource};
use perf_client::HttpClient;
use shared::client::RegisterRequest;
use shared::models::{CyclePayload, EmployeePayload, GoalPayload, ReviewPayload};
use tokio::sync::mpsc::UnboundedSender;

/// A described side effect awaiting execution
#[derive(Debug, Clone, PartialEq)]
pub enum Cmd {
    LoadEmployees { seq: u64 },
    LoadGoals { seq: u64 },
    LoadCycles { seq: u64 },
    LoadReviews { seq: u64 },
    LoadEmployeeOptions { target: OptionsTarget },
    LoadCycleOptions,
    LoadCycleReviews { seq: u64 },
    LoadProfile { seq: u64, user_id: i64 },

    CreateEmployee(EmployeePayload),
    UpdateEmployee { id: i64, payload: EmployeePayload },
    DeleteEmployee { id: i64 },

    CreateGoal(GoalPayload),
    UpdateGoal { id: i64, payload: GoalPayload },
    DeleteGoal { id: i64 },

    CreateCycle(CyclePayload),
    UpdateCycle { id: i64, payload: CyclePayload },
    DeleteCycle { id: i64 },

    CreateReview(ReviewPayload),
    UpdateReview { id: i64, payload: ReviewPayload },
    DeleteReview { id: i64 },

    UpdateProfile { id: i64, payload: EmployeePayload },

    Login { email: String, password: String },
    Register(RegisterRequest),
}

/// Spawn the task for one command. Completion always arrives as a
/// single `Net` message (profile loads emit three).
pub fn execute(cmd: Cmd, client: &HttpClient, tx: &UnboundedSender<Net>) {
    let client = client.clone();
    let tx = tx.clone();

    tokio::spawn(async move {
        match cmd {
            Cmd::LoadEmployees { seq } => {
                let result = client.list_employees().await.map_err(|e| e.to_string());
                let _ = tx.send(Net::EmployeeList { seq, result });
            }
            Cmd::LoadGoals { seq } => {
                let result = client.list_goals().await.map_err(|e| e.to_string());
                let _ = tx.send(Net::GoalList { seq, result });
            }
            Cmd::LoadCycles { seq } => {
                let result = client.list_review_cycles().await.map_err(|e| e.to_string());
                let _ = tx.send(Net::CycleList { seq, result });
            }
            Cmd::LoadReviews { seq } => {
                let result = client.list_reviews().await.map_err(|e| e.to_string());
                let _ = tx.send(Net::ReviewList { seq, result });
            }
            Cmd::LoadEmployeeOptions { target } => {
                let result = client.list_employees().await.map_err(|e| e.to_string());
                let _ = tx.send(Net::EmployeeOptions { target, result });
            }
            Cmd::LoadCycleOptions => {
                let result = client.list_review_cycles().await.map_err(|e| e.to_string());
                let _ = tx.send(Net::CycleOptions { result });
            }
            Cmd::LoadCycleReviews { seq } => {
                let result = client.list_reviews().await.map_err(|e| e.to_string());
                let _ = tx.send(Net::CycleReviews { seq, result });
            }
            Cmd::LoadProfile { seq, user_id } => {
                let record = client.get_employee(user_id).await.map_err(|e| e.to_string());
                let _ = tx.send(Net::ProfileRecord { seq, result: record });
                let goals = client.list_goals().await.map_err(|e| e.to_string());
                let _ = tx.send(Net::ProfileGoals { seq, result: goals });
                let reviews = client.list_reviews().await.map_err(|e| e.to_string());
                let _ = tx.send(Net::ProfileReviews { seq, result: reviews });
            }

            Cmd::CreateEmployee(payload) => {
                mutation(&tx, Resource::Employees, MutationKind::Create, client.create_employee(&payload).await);
            }
            Cmd::UpdateEmployee { id, payload } => {
                mutation(&tx, Resource::Employees, MutationKind::Update, client.update_employee(id, &payload).await);
            }
            Cmd::DeleteEmployee { id } => {
                mutation(&tx, Resource::Employees, MutationKind::Delete, client.delete_employee(id).await);
            }

            Cmd::CreateGoal(payload) => {
                mutation(&tx, Resource::Goals, MutationKind::Create, client.create_goal(&payload).await);
            }
            Cmd::UpdateGoal { id, payload } => {
                mutation(&tx, Resource::Goals, MutationKind::Update, client.update_goal(id, &payload).await);
            }
            Cmd::DeleteGoal { id } => {
                mutation(&tx, Resource::Goals, MutationKind::Delete, client.delete_goal(id).await);
            }

            Cmd::CreateCycle(payload) => {
                mutation(&tx, Resource::Cycles, MutationKind::Create, client.create_review_cycle(&payload).await);
            }
            Cmd::UpdateCycle { id, payload } => {
                mutation(&tx, Resource::Cycles, MutationKind::Update, client.update_review_cycle(id, &payload).await);
            }
            Cmd::DeleteCycle { id } => {
                mutation(&tx, Resource::Cycles, MutationKind::Delete, client.delete_review_cycle(id).await);
            }

            Cmd::CreateReview(payload) => {
                mutation(&tx, Resource::Reviews, MutationKind::Create, client.create_review(&payload).await);
            }
            Cmd::UpdateReview { id, payload } => {
                mutation(&tx, Resource::Reviews, MutationKind::Update, client.update_review(id, &payload).await);
            }
            Cmd::DeleteReview { id } => {
                mutation(&tx, Resource::Reviews, MutationKind::Delete, client.delete_review(id).await);
            }

            Cmd::UpdateProfile { id, payload } => {
                let result = client.update_employee(id, &payload).await.map_err(|e| e.to_string());
                let _ = tx.send(Net::ProfileSaved { payload, result });
            }

            Cmd::Login { email, password } => {
                let result = client.login(&email, &password).await.map_err(|e| e.to_string());
                let _ = tx.send(Net::LoginDone(result));
            }
            Cmd::Register(request) => {
                let result = client.register(&request).await.map_err(|e| e.to_string());
                let _ = tx.send(Net::RegisterDone(result));
            }
        }
    });
}

fn mutation(
    tx: &UnboundedSender<Net>,
    resource: Resource,
    kind: MutationKind,
    result: perf_client::ClientResult<serde_json::Value>,
) {
    let result = result.map(|_| ()).map_err(|e| e.to_string());
    let _ = tx.send(Net::MutationDone { resource, kind, result });
}
