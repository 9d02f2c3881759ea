//! Profile view
//!
//! The session identity's own record plus the goals and reviews that
//! reference it, with simple aggregates. Association is strictly by
//! employee identifier. Saving the profile merges the server's response
//! over the submitted payload over the local copy and pushes the merged
//! record back into the session.

use crate::cmd::Cmd;
use crate::views::Banner;
use crate::views::employees::EmployeeForm;
use shared::models::{Employee, EmployeePayload, Goal, GoalStatus, Review, review::average_rating};
use std::time::Instant;

#[derive(Debug)]
pub struct ProfileView {
    /// Identifier the goals/reviews are associated against
    user_id: i64,
    /// Freshest known copy of the record; falls back to the session
    /// copy when the fetch fails
    pub user: Option<Employee>,
    pub goals: Vec<Goal>,
    pub reviews: Vec<Review>,
    pub loading: bool,
    pub error: Option<String>,
    pub success: Option<Banner>,
    pub form: Option<EmployeeForm>,
    fetch_seq: u64,
}

impl Default for ProfileView {
    fn default() -> Self {
        Self {
            user_id: 0,
            user: None,
            goals: Vec::new(),
            reviews: Vec::new(),
            loading: false,
            error: None,
            success: None,
            form: None,
            fetch_seq: 0,
        }
    }
}

impl ProfileView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount-time fetch. The session copy is shown until the record
    /// fetch lands (or instead of it, when the fetch fails).
    pub fn enter(&mut self, session_user: &Employee) -> Vec<Cmd> {
        self.user_id = session_user.id.unwrap_or_default();
        self.user = Some(session_user.clone());
        self.begin_reload(false)
    }

    /// Reload without flashing the loader (used after a save)
    pub fn reload_quiet(&mut self) -> Vec<Cmd> {
        self.begin_reload(true)
    }

    fn begin_reload(&mut self, quiet: bool) -> Vec<Cmd> {
        self.fetch_seq += 1;
        if !quiet {
            self.loading = true;
        }
        vec![Cmd::LoadProfile {
            seq: self.fetch_seq,
            user_id: self.user_id,
        }]
    }

    pub fn apply_record(&mut self, seq: u64, result: Result<Employee, String>) {
        if seq != self.fetch_seq {
            return;
        }
        // a failed record fetch keeps the session copy, silently
        if let Ok(record) = result {
            self.user = Some(record);
        }
    }

    pub fn apply_goals(&mut self, seq: u64, result: Result<Vec<Goal>, String>) {
        if seq != self.fetch_seq {
            return;
        }
        self.loading = false;
        match result {
            Ok(goals) => {
                self.goals = goals.into_iter().filter(|goal| goal.emp_id == self.user_id).collect();
            }
            Err(_) => self.error = Some("Failed to load profile data".to_string()),
        }
    }

    pub fn apply_reviews(&mut self, seq: u64, result: Result<Vec<Review>, String>) {
        if seq != self.fetch_seq {
            return;
        }
        self.loading = false;
        match result {
            Ok(reviews) => {
                self.reviews = reviews
                    .into_iter()
                    .filter(|review| review.emp_id == self.user_id)
                    .collect();
            }
            Err(_) => self.error = Some("Failed to load profile data".to_string()),
        }
    }

    // ---- aggregates ----

    pub fn total_goals(&self) -> usize {
        self.goals.len()
    }

    pub fn completed_goals(&self) -> usize {
        self.goals
            .iter()
            .filter(|goal| goal.status == GoalStatus::Completed)
            .count()
    }

    pub fn in_progress_goals(&self) -> usize {
        self.goals
            .iter()
            .filter(|goal| goal.status == GoalStatus::InProgress)
            .count()
    }

    /// Mean rating across the associated reviews, two decimals, 0.0
    /// when there are none
    pub fn average_rating(&self) -> f64 {
        average_rating(&self.reviews)
    }

    // ---- profile edit ----

    pub fn open_edit(&mut self) {
        if let Some(user) = &self.user {
            self.form = Some(EmployeeForm::edit(user));
        }
    }

    pub fn cancel_form(&mut self) {
        self.form = None;
    }

    /// Same required-field validation as the employees form; a blank
    /// password stays out of the payload.
    pub fn submit_form(&mut self) -> Option<Cmd> {
        let id = self.user.as_ref().and_then(|user| user.id)?;
        let form = self.form.as_mut()?;
        match form.to_payload() {
            Err(message) => {
                form.error = Some(message);
                None
            }
            Ok(payload) => Some(Cmd::UpdateProfile { id, payload }),
        }
    }

    /// Fold the server's update response into the held record. Returns
    /// the merged identity so the shell can re-persist the session.
    pub fn apply_saved(
        &mut self,
        payload: &EmployeePayload,
        server: &serde_json::Value,
    ) -> Option<Employee> {
        let current = self.user.as_ref()?;
        match current.merged_with(payload, server) {
            Ok(merged) => {
                self.user = Some(merged.clone());
                self.form = None;
                self.success = Some(Banner::new("Profile updated successfully"));
                Some(merged)
            }
            Err(err) => {
                if let Some(form) = self.form.as_mut() {
                    form.error = Some(format!("Failed to update profile: {err}"));
                }
                None
            }
        }
    }

    pub fn save_failed(&mut self, message: String) {
        if let Some(form) = self.form.as_mut() {
            form.error = Some(message);
        } else {
            self.error = Some(message);
        }
    }

    pub fn tick(&mut self, now: Instant) {
        if self.success.as_ref().is_some_and(|banner| banner.expired(now)) {
            self.success = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;
    use shared::models::{ActiveFlag, ReviewStatus};

    fn me() -> Employee {
        Employee {
            id: Some(7),
            emp_code: "EM007".to_string(),
            first_name: "Rajesh".to_string(),
            last_name: "Kumar".to_string(),
            gender: None,
            phone_no: "9876543210".to_string(),
            email: "rajesh@company.com".to_string(),
            password: None,
            manager_id: None,
            department: "IT".to_string(),
            job_title: "Senior Developer".to_string(),
            active: ActiveFlag::Yes,
            hire_date: None,
            is_admin: false,
        }
    }

    fn goal(emp_id: i64, emp_name: &str, status: GoalStatus) -> Goal {
        Goal {
            id: Some(1),
            title: "t".to_string(),
            description_text: "d".to_string(),
            status,
            created_by: String::new(),
            emp_id,
            emp_name: emp_name.to_string(),
            start_date: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
            end_date: NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
            created_at: None,
        }
    }

    fn review(emp_id: i64, rating: f64) -> Review {
        Review {
            id: Some(1),
            emp_id,
            emp_name: String::new(),
            reviewer_id: 2,
            reviewer_name: String::new(),
            review_cycle_id: 1,
            cycle_name: String::new(),
            rating,
            comments: String::new(),
            status: ReviewStatus::Completed,
            created_date: None,
        }
    }

    fn entered() -> (ProfileView, u64) {
        let mut view = ProfileView::new();
        let cmds = view.enter(&me());
        let seq = match cmds.as_slice() {
            [Cmd::LoadProfile { seq, user_id: 7 }] => *seq,
            other => panic!("unexpected effects: {other:?}"),
        };
        (view, seq)
    }

    #[test]
    fn goals_associate_by_identifier_not_by_name() {
        let (mut view, seq) = entered();
        // a different employee who happens to share the display name
        view.apply_goals(
            seq,
            Ok(vec![
                goal(7, "Rajesh Kumar", GoalStatus::Completed),
                goal(99, "Rajesh Kumar", GoalStatus::InProgress),
                goal(7, "Old Cached Name", GoalStatus::InProgress),
            ]),
        );
        assert_eq!(view.total_goals(), 2);
        assert_eq!(view.completed_goals(), 1);
        assert_eq!(view.in_progress_goals(), 1);
    }

    #[test]
    fn average_rating_matches_spec_examples() {
        let (mut view, seq) = entered();
        view.apply_reviews(seq, Ok(vec![]));
        assert_eq!(view.average_rating(), 0.0);

        let (mut view, seq) = entered();
        view.apply_reviews(
            seq,
            Ok(vec![review(7, 4.5), review(7, 4.0), review(7, 3.5), review(8, 0.5)]),
        );
        // the other employee's review is excluded from the mean
        assert_eq!(view.average_rating(), 4.0);
    }

    #[test]
    fn failed_record_fetch_keeps_session_copy() {
        let (mut view, seq) = entered();
        view.apply_record(seq, Err("API error (404): gone".to_string()));
        assert_eq!(view.user.as_ref().unwrap().emp_code, "EM007");
        assert!(view.error.is_none());
    }

    #[test]
    fn stale_profile_responses_are_discarded() {
        let (mut view, seq) = entered();
        let _ = view.reload_quiet();
        view.apply_goals(seq, Ok(vec![goal(7, "x", GoalStatus::Completed)]));
        assert_eq!(view.total_goals(), 0);
    }

    #[test]
    fn saved_profile_merges_server_over_payload_over_local() {
        let (mut view, _) = entered();
        view.open_edit();
        let payload = EmployeePayload {
            emp_code: "EM007".to_string(),
            first_name: "Rajesh".to_string(),
            last_name: "Kumar".to_string(),
            gender: None,
            phone_no: "1110002222".to_string(),
            email: "rajesh@company.com".to_string(),
            password: None,
            manager_id: None,
            department: "Platform".to_string(),
            job_title: "Senior Developer".to_string(),
            active: ActiveFlag::Yes,
        };
        let server = json!({"department": "Platform Engineering"});

        let merged = view.apply_saved(&payload, &server).unwrap();
        assert_eq!(merged.department, "Platform Engineering");
        assert_eq!(merged.phone_no, "1110002222");
        assert_eq!(merged.id, Some(7));
        assert!(view.form.is_none());
        assert!(view.success.is_some());
    }

    #[test]
    fn save_failure_lands_in_the_open_form() {
        let (mut view, _) = entered();
        view.open_edit();
        view.save_failed("API error (500): boom".to_string());
        assert_eq!(
            view.form.as_ref().unwrap().error.as_deref(),
            Some("API error (500): boom")
        );
    }
}
