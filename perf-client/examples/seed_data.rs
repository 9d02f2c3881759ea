//! Seed a development backend with sample data
//!
//! Issues the creation endpoints sequentially with a fixed delay so a
//! fresh backend has employees, review cycles, goals, and reviews to
//! click through. Operator convenience only, not part of the runtime.
//!
//! Run: cargo run --example seed_data [-- BASE_URL]

use chrono::NaiveDate;
use perf_client::ClientConfig;
use shared::models::{
    ActiveFlag, CyclePayload, CycleStatus, EmployeePayload, Gender, GoalPayload, GoalStatus,
    ReviewPayload, ReviewStatus,
};
use std::time::Duration;

const REQUEST_DELAY: Duration = Duration::from_millis(300);

fn date(text: &str) -> NaiveDate {
    NaiveDate::parse_from_str(text, "%Y-%m-%d").expect("valid seed date")
}

fn employees() -> Vec<EmployeePayload> {
    vec![
        EmployeePayload {
            emp_code: "EM001".to_string(),
            first_name: "Rajesh".to_string(),
            last_name: "Kumar".to_string(),
            gender: Some(Gender::Male),
            phone_no: "9876543210".to_string(),
            email: "rajesh.kumar@company.com".to_string(),
            password: Some("Password@123".to_string()),
            manager_id: None,
            department: "IT".to_string(),
            job_title: "Senior Developer".to_string(),
            active: ActiveFlag::Yes,
        },
        EmployeePayload {
            emp_code: "EM002".to_string(),
            first_name: "Priya".to_string(),
            last_name: "Singh".to_string(),
            gender: Some(Gender::Female),
            phone_no: "9876543211".to_string(),
            email: "priya.singh@company.com".to_string(),
            password: Some("Password@123".to_string()),
            manager_id: Some(1),
            department: "HR".to_string(),
            job_title: "HR Manager".to_string(),
            active: ActiveFlag::Yes,
        },
        EmployeePayload {
            emp_code: "EM003".to_string(),
            first_name: "Amit".to_string(),
            last_name: "Patel".to_string(),
            gender: Some(Gender::Male),
            phone_no: "9876543212".to_string(),
            email: "amit.patel@company.com".to_string(),
            password: Some("Password@123".to_string()),
            manager_id: Some(1),
            department: "Sales".to_string(),
            job_title: "Sales Executive".to_string(),
            active: ActiveFlag::Yes,
        },
    ]
}

fn cycles() -> Vec<CyclePayload> {
    vec![
        CyclePayload {
            cycle_name: "H1 2025".to_string(),
            start_date: date("2025-01-01"),
            end_date: date("2025-06-30"),
            status: CycleStatus::Completed,
            description: "First-half performance cycle".to_string(),
        },
        CyclePayload {
            cycle_name: "H2 2025".to_string(),
            start_date: date("2025-07-01"),
            end_date: date("2025-12-31"),
            status: CycleStatus::InProgress,
            description: "Second-half performance cycle".to_string(),
        },
    ]
}

fn goals() -> Vec<GoalPayload> {
    vec![
        GoalPayload {
            title: "Ship payment integration".to_string(),
            description_text: "Deliver the gateway integration with full test coverage".to_string(),
            status: GoalStatus::InProgress,
            created_by: "Priya Singh".to_string(),
            emp_id: 1,
            emp_name: "Rajesh Kumar".to_string(),
            start_date: date("2025-07-01"),
            end_date: date("2025-09-30"),
        },
        GoalPayload {
            title: "Close 20 enterprise accounts".to_string(),
            description_text: "Quarterly enterprise sales target".to_string(),
            status: GoalStatus::InProgress,
            created_by: "Priya Singh".to_string(),
            emp_id: 3,
            emp_name: "Amit Patel".to_string(),
            start_date: date("2025-07-01"),
            end_date: date("2025-09-30"),
        },
        GoalPayload {
            title: "Complete security training".to_string(),
            description_text: "Annual secure-coding certification".to_string(),
            status: GoalStatus::Completed,
            created_by: "Priya Singh".to_string(),
            emp_id: 1,
            emp_name: "Rajesh Kumar".to_string(),
            start_date: date("2025-01-15"),
            end_date: date("2025-03-31"),
        },
    ]
}

fn reviews() -> Vec<ReviewPayload> {
    vec![
        ReviewPayload {
            emp_id: 1,
            emp_name: "Rajesh Kumar".to_string(),
            reviewer_id: 2,
            reviewer_name: "Priya".to_string(),
            review_cycle_id: 1,
            cycle_name: "H1 2025".to_string(),
            rating: 4.5,
            comments: "Consistently strong delivery across the half".to_string(),
            status: ReviewStatus::Completed,
            created_date: date("2025-06-20"),
        },
        ReviewPayload {
            emp_id: 3,
            emp_name: "Amit Patel".to_string(),
            reviewer_id: 2,
            reviewer_name: "Priya".to_string(),
            review_cycle_id: 1,
            cycle_name: "H1 2025".to_string(),
            rating: 3.5,
            comments: "Good pipeline, conversion needs work".to_string(),
            status: ReviewStatus::Submitted,
            created_date: date("2025-06-21"),
        },
    ]
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    let base_url = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "http://localhost:8080".to_string());
    let client = ClientConfig::new(&base_url).build_http_client();

    tracing::info!("Seeding backend at {}", base_url);

    for employee in employees() {
        match client.create_employee(&employee).await {
            Ok(_) => tracing::info!("Created employee {}", employee.emp_code),
            Err(e) => tracing::warn!("Employee {} failed: {}", employee.emp_code, e),
        }
        tokio::time::sleep(REQUEST_DELAY).await;
    }

    for cycle in cycles() {
        match client.create_review_cycle(&cycle).await {
            Ok(_) => tracing::info!("Created cycle {}", cycle.cycle_name),
            Err(e) => tracing::warn!("Cycle {} failed: {}", cycle.cycle_name, e),
        }
        tokio::time::sleep(REQUEST_DELAY).await;
    }

    for goal in goals() {
        match client.create_goal(&goal).await {
            Ok(_) => tracing::info!("Created goal {}", goal.title),
            Err(e) => tracing::warn!("Goal {} failed: {}", goal.title, e),
        }
        tokio::time::sleep(REQUEST_DELAY).await;
    }

    for review in reviews() {
        match client.create_review(&review).await {
            Ok(_) => tracing::info!("Created review for {}", review.emp_name),
            Err(e) => tracing::warn!("Review for {} failed: {}", review.emp_name, e),
        }
        tokio::time::sleep(REQUEST_DELAY).await;
    }

    tracing::info!("Seeding complete");
    Ok(())
}
