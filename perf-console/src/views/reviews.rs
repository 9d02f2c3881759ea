//! Performance reviews view
//!
//! Any authenticated identity may create a review. Editing and deleting
//! are gated per-row on the current identity being that review's
//! reviewer (elevated identities pass both gates). Client-side filters
//! narrow the table by cycle, reviewed employee, or reviewer, and the
//! summary line shows the average rating over the filtered set.

use crate::cmd::Cmd;
use crate::msg::{MutationKind, OptionsTarget};
use crate::views::ListCore;
use chrono::Local;
use crossterm::event::{Event, KeyCode, KeyEvent};
use shared::models::{Employee, Review, ReviewCycle, ReviewPayload, ReviewStatus};
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;

pub const FIELDS: [&str; 5] = [
    "Employee *",
    "Review Cycle *",
    "Rating",
    "Comments *",
    "Status *",
];

const EMPLOYEE: usize = 0;
const CYCLE: usize = 1;
const RATING: usize = 2;
const STATUS: usize = 4;

#[derive(Debug)]
pub struct ReviewForm {
    pub editing_id: Option<i64>,
    pub emp_id: Option<i64>,
    pub emp_name: String,
    pub reviewer_id: i64,
    pub reviewer_name: String,
    pub review_cycle_id: Option<i64>,
    pub cycle_name: String,
    pub rating: f64,
    pub comments: Input,
    pub status: ReviewStatus,
    pub created_date: chrono::NaiveDate,
    pub focus: usize,
    pub error: Option<String>,
}

impl ReviewForm {
    /// New review defaults: the session identity is the reviewer,
    /// rating 4.0, status draft, created today.
    pub fn create(user: &Employee) -> Self {
        Self {
            editing_id: None,
            emp_id: None,
            emp_name: String::new(),
            reviewer_id: user.id.unwrap_or_default(),
            reviewer_name: user.first_name.clone(),
            review_cycle_id: None,
            cycle_name: String::new(),
            rating: 4.0,
            comments: Input::default(),
            status: ReviewStatus::Draft,
            created_date: Local::now().date_naive(),
            focus: 0,
            error: None,
        }
    }

    pub fn edit(review: &Review) -> Self {
        Self {
            editing_id: review.id,
            emp_id: Some(review.emp_id),
            emp_name: review.emp_name.clone(),
            reviewer_id: review.reviewer_id,
            reviewer_name: review.reviewer_name.clone(),
            review_cycle_id: Some(review.review_cycle_id),
            cycle_name: review.cycle_name.clone(),
            rating: review.rating,
            comments: Input::new(review.comments.clone()),
            status: review.status,
            created_date: review.created_date.unwrap_or_else(|| Local::now().date_naive()),
            focus: 0,
            error: None,
        }
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % FIELDS.len();
    }

    pub fn focus_prev(&mut self) {
        self.focus = (self.focus + FIELDS.len() - 1) % FIELDS.len();
    }

    fn cycle_employee(&mut self, options: &[Employee], step: i32) {
        if options.is_empty() {
            return;
        }
        let current = self
            .emp_id
            .and_then(|id| options.iter().position(|employee| employee.id == Some(id)));
        let next = match current {
            Some(index) => (index as i32 + step).rem_euclid(options.len() as i32) as usize,
            None => 0,
        };
        let chosen = &options[next];
        self.emp_id = chosen.id;
        self.emp_name = chosen.display_name();
    }

    fn cycle_review_cycle(&mut self, options: &[ReviewCycle], step: i32) {
        if options.is_empty() {
            return;
        }
        let current = self
            .review_cycle_id
            .and_then(|id| options.iter().position(|cycle| cycle.id == Some(id)));
        let next = match current {
            Some(index) => (index as i32 + step).rem_euclid(options.len() as i32) as usize,
            None => 0,
        };
        let chosen = &options[next];
        self.review_cycle_id = chosen.id;
        self.cycle_name = chosen.cycle_name.clone();
    }

    fn cycle_status(&mut self, step: i32) {
        let index = ReviewStatus::ALL
            .iter()
            .position(|status| *status == self.status)
            .unwrap_or(0) as i32;
        let next = (index + step).rem_euclid(ReviewStatus::ALL.len() as i32) as usize;
        self.status = ReviewStatus::ALL[next];
    }

    fn adjust_rating(&mut self, step: f64) {
        self.rating = (self.rating + step).clamp(0.0, 5.0);
    }

    pub fn handle_key(&mut self, key: KeyEvent, employees: &[Employee], cycles: &[ReviewCycle]) {
        match (self.focus, key.code) {
            (EMPLOYEE, KeyCode::Left) => self.cycle_employee(employees, -1),
            (EMPLOYEE, KeyCode::Right) => self.cycle_employee(employees, 1),
            (CYCLE, KeyCode::Left) => self.cycle_review_cycle(cycles, -1),
            (CYCLE, KeyCode::Right) => self.cycle_review_cycle(cycles, 1),
            (RATING, KeyCode::Left) => self.adjust_rating(-0.5),
            (RATING, KeyCode::Right) => self.adjust_rating(0.5),
            (STATUS, KeyCode::Left) => self.cycle_status(-1),
            (STATUS, KeyCode::Right) => self.cycle_status(1),
            _ => {
                if self.focus == 3 {
                    self.comments.handle_event(&Event::Key(key));
                }
            }
        }
    }

    pub fn to_payload(&self) -> Result<ReviewPayload, String> {
        let (Some(emp_id), Some(review_cycle_id)) = (self.emp_id, self.review_cycle_id) else {
            return Err("Please fill in all required fields".to_string());
        };
        if self.comments.value().trim().is_empty() {
            return Err("Please fill in all required fields".to_string());
        }

        Ok(ReviewPayload {
            emp_id,
            emp_name: self.emp_name.clone(),
            reviewer_id: self.reviewer_id,
            reviewer_name: self.reviewer_name.clone(),
            review_cycle_id,
            cycle_name: self.cycle_name.clone(),
            rating: self.rating,
            comments: self.comments.value().trim().to_string(),
            status: self.status,
            created_date: self.created_date,
        })
    }
}

/// Which relationship filter a key press cycles
#[derive(Debug, Clone, Copy)]
pub enum FilterKind {
    Cycle,
    Employee,
    Reviewer,
}

#[derive(Debug, Default)]
pub struct ReviewsView {
    pub core: ListCore<Review>,
    pub employees: Vec<Employee>,
    pub cycles: Vec<ReviewCycle>,
    pub filter_cycle: Option<i64>,
    pub filter_employee: Option<i64>,
    pub filter_reviewer: Option<i64>,
    pub form: Option<ReviewForm>,
}

impl ReviewsView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enter(&mut self) -> Vec<Cmd> {
        vec![
            Cmd::LoadReviews {
                seq: self.core.begin_reload(),
            },
            Cmd::LoadEmployeeOptions {
                target: OptionsTarget::Reviews,
            },
            Cmd::LoadCycleOptions,
        ]
    }

    pub fn reload(&mut self) -> Cmd {
        Cmd::LoadReviews {
            seq: self.core.begin_reload(),
        }
    }

    /// Reviews passing every active relationship filter
    pub fn filtered(&self) -> Vec<&Review> {
        self.core
            .items
            .iter()
            .filter(|review| {
                self.filter_cycle.is_none_or(|id| review.review_cycle_id == id)
                    && self.filter_employee.is_none_or(|id| review.emp_id == id)
                    && self.filter_reviewer.is_none_or(|id| review.reviewer_id == id)
            })
            .collect()
    }

    /// Average rating over the filtered set, None when it is empty
    pub fn filtered_average(&self) -> Option<f64> {
        let filtered = self.filtered();
        if filtered.is_empty() {
            return None;
        }
        let sum: f64 = filtered.iter().map(|review| review.rating).sum();
        Some(sum / filtered.len() as f64)
    }

    pub fn selected_review(&self) -> Option<&Review> {
        self.filtered().get(self.core.selected).copied()
    }

    pub fn cycle_name(&self, cycle_id: i64) -> String {
        self.cycles
            .iter()
            .find(|cycle| cycle.id == Some(cycle_id))
            .map(|cycle| cycle.cycle_name.clone())
            .unwrap_or_else(|| "Unknown".to_string())
    }

    /// Step one of the three filters through "all" and each option
    pub fn cycle_filter(&mut self, kind: FilterKind) {
        fn advance(current: Option<i64>, ids: &[i64]) -> Option<i64> {
            match current {
                None => ids.first().copied(),
                Some(id) => {
                    let index = ids.iter().position(|candidate| *candidate == id);
                    match index {
                        Some(i) if i + 1 < ids.len() => Some(ids[i + 1]),
                        _ => None,
                    }
                }
            }
        }

        match kind {
            FilterKind::Cycle => {
                let ids: Vec<i64> = self.cycles.iter().filter_map(|cycle| cycle.id).collect();
                self.filter_cycle = advance(self.filter_cycle, &ids);
            }
            FilterKind::Employee => {
                let ids: Vec<i64> = self.employees.iter().filter_map(|employee| employee.id).collect();
                self.filter_employee = advance(self.filter_employee, &ids);
            }
            FilterKind::Reviewer => {
                let ids: Vec<i64> = self.employees.iter().filter_map(|employee| employee.id).collect();
                self.filter_reviewer = advance(self.filter_reviewer, &ids);
            }
        }
        self.core.clamp_selection(self.filtered().len());
    }

    pub fn clear_filters(&mut self) {
        self.filter_cycle = None;
        self.filter_employee = None;
        self.filter_reviewer = None;
    }

    /// Edit is per-row: only the review's reviewer (or an elevated
    /// identity) may edit it.
    pub fn can_edit(review: &Review, user: &Employee) -> bool {
        user.is_admin || user.id == Some(review.reviewer_id)
    }

    /// Delete follows the same rule as edit.
    pub fn can_delete(review: &Review, user: &Employee) -> bool {
        Self::can_edit(review, user)
    }

    /// Creating a review is open to any authenticated identity
    pub fn open_create(&mut self, user: &Employee) {
        self.form = Some(ReviewForm::create(user));
    }

    pub fn open_edit(&mut self, user: &Employee) {
        if let Some(review) = self.selected_review().cloned() {
            if Self::can_edit(&review, user) {
                self.form = Some(ReviewForm::edit(&review));
            }
        }
    }

    pub fn cancel_form(&mut self) {
        self.form = None;
        self.core.error = None;
    }

    pub fn submit_form(&mut self) -> Option<Cmd> {
        let form = self.form.as_mut()?;
        match form.to_payload() {
            Err(message) => {
                form.error = Some(message);
                None
            }
            Ok(payload) => match form.editing_id {
                Some(id) => Some(Cmd::UpdateReview { id, payload }),
                None => Some(Cmd::CreateReview(payload)),
            },
        }
    }

    pub fn request_delete(&mut self, user: &Employee) {
        let target = self
            .selected_review()
            .filter(|review| Self::can_delete(review, user))
            .and_then(|review| review.id);
        if let Some(id) = target {
            self.core.request_delete(id);
        }
    }

    pub fn confirm_delete(&mut self) -> Option<Cmd> {
        self.core.take_delete_target().map(|id| Cmd::DeleteReview { id })
    }

    pub fn on_mutation(&mut self, kind: MutationKind, result: Result<(), String>) -> Vec<Cmd> {
        match result {
            Ok(()) => {
                let banner = match kind {
                    MutationKind::Create => "Review created successfully",
                    MutationKind::Update => "Review updated successfully",
                    MutationKind::Delete => "Review deleted successfully",
                };
                self.core.set_success(banner);
                if !matches!(kind, MutationKind::Delete) {
                    self.form = None;
                }
                vec![self.reload()]
            }
            Err(message) => {
                match kind {
                    MutationKind::Delete => {
                        self.core.alert = Some(format!("Failed to delete review: {message}"));
                        self.core.error = Some(message);
                    }
                    _ => {
                        if let Some(form) = self.form.as_mut() {
                            form.error = Some(message);
                        } else {
                            self.core.error = Some(message);
                        }
                    }
                }
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::ActiveFlag;

    fn user(id: i64, is_admin: bool) -> Employee {
        Employee {
            id: Some(id),
            emp_code: format!("EM{id:03}"),
            first_name: "Priya".to_string(),
            last_name: "Singh".to_string(),
            gender: None,
            phone_no: String::new(),
            email: "priya@company.com".to_string(),
            password: None,
            manager_id: None,
            department: "HR".to_string(),
            job_title: "Manager".to_string(),
            active: ActiveFlag::Yes,
            hire_date: None,
            is_admin,
        }
    }

    fn review(id: i64, emp_id: i64, reviewer_id: i64, cycle_id: i64, rating: f64) -> Review {
        Review {
            id: Some(id),
            emp_id,
            emp_name: String::new(),
            reviewer_id,
            reviewer_name: String::new(),
            review_cycle_id: cycle_id,
            cycle_name: String::new(),
            rating,
            comments: "fine".to_string(),
            status: ReviewStatus::Draft,
            created_date: None,
        }
    }

    fn loaded_view() -> ReviewsView {
        let mut view = ReviewsView::new();
        let seq = view.core.begin_reload();
        view.core.apply_loaded(
            seq,
            Ok(vec![
                review(1, 10, 2, 1, 4.0),
                review(2, 11, 2, 1, 5.0),
                review(3, 10, 3, 2, 2.0),
            ]),
        );
        view
    }

    #[test]
    fn filters_compose_and_average_follows_them() {
        let mut view = loaded_view();
        assert_eq!(view.filtered().len(), 3);

        view.filter_cycle = Some(1);
        assert_eq!(view.filtered().len(), 2);
        assert_eq!(view.filtered_average(), Some(4.5));

        view.filter_employee = Some(10);
        assert_eq!(view.filtered().len(), 1);
        assert_eq!(view.filtered_average(), Some(4.0));

        view.filter_reviewer = Some(99);
        assert!(view.filtered().is_empty());
        assert_eq!(view.filtered_average(), None);

        view.clear_filters();
        assert_eq!(view.filtered().len(), 3);
    }

    #[test]
    fn edit_is_gated_on_being_the_reviewer() {
        let target = review(1, 10, 2, 1, 4.0);
        assert!(ReviewsView::can_edit(&target, &user(2, false)));
        assert!(!ReviewsView::can_edit(&target, &user(3, false)));
        // elevated identities pass the gate
        assert!(ReviewsView::can_edit(&target, &user(3, true)));
    }

    #[test]
    fn delete_follows_the_same_gate_as_edit() {
        let target = review(1, 10, 2, 1, 4.0);
        assert!(ReviewsView::can_delete(&target, &user(2, false)));
        assert!(!ReviewsView::can_delete(&target, &user(3, false)));
    }

    #[test]
    fn non_reviewer_cannot_stage_a_delete() {
        let mut view = loaded_view();
        view.request_delete(&user(9, false));
        assert_eq!(view.core.delete_target(), None);

        view.request_delete(&user(2, false));
        assert_eq!(view.core.delete_target(), Some(1));
    }

    #[test]
    fn create_defaults_come_from_the_session_identity() {
        let form = ReviewForm::create(&user(2, false));
        assert_eq!(form.reviewer_id, 2);
        assert_eq!(form.reviewer_name, "Priya");
        assert_eq!(form.rating, 4.0);
        assert_eq!(form.status, ReviewStatus::Draft);
    }

    #[test]
    fn missing_employee_or_cycle_blocks_submit() {
        let mut form = ReviewForm::create(&user(2, false));
        form.comments = Input::new("great work".to_string());
        assert_eq!(form.to_payload().unwrap_err(), "Please fill in all required fields");

        form.emp_id = Some(10);
        form.emp_name = "Rajesh Kumar".to_string();
        assert!(form.to_payload().is_err());

        form.review_cycle_id = Some(1);
        form.cycle_name = "H1 2025".to_string();
        let payload = form.to_payload().unwrap();
        assert_eq!(payload.emp_id, 10);
        assert_eq!(payload.rating, 4.0);
    }

    #[test]
    fn rating_steps_by_half_and_clamps() {
        let mut form = ReviewForm::create(&user(2, false));
        form.adjust_rating(0.5);
        assert_eq!(form.rating, 4.5);
        form.adjust_rating(0.5);
        form.adjust_rating(0.5);
        assert_eq!(form.rating, 5.0);
        for _ in 0..20 {
            form.adjust_rating(-0.5);
        }
        assert_eq!(form.rating, 0.0);
    }

    #[test]
    fn filter_cycles_through_all_then_back_to_none() {
        let mut view = loaded_view();
        view.cycles = vec![
            ReviewCycle {
                id: Some(1),
                cycle_name: "H1".to_string(),
                start_date: chrono::NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
                end_date: chrono::NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
                status: Default::default(),
                description: String::new(),
            },
            ReviewCycle {
                id: Some(2),
                cycle_name: "H2".to_string(),
                start_date: chrono::NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
                end_date: chrono::NaiveDate::from_ymd_opt(2025, 12, 31).unwrap(),
                status: Default::default(),
                description: String::new(),
            },
        ];

        assert_eq!(view.filter_cycle, None);
        view.cycle_filter(FilterKind::Cycle);
        assert_eq!(view.filter_cycle, Some(1));
        view.cycle_filter(FilterKind::Cycle);
        assert_eq!(view.filter_cycle, Some(2));
        view.cycle_filter(FilterKind::Cycle);
        assert_eq!(view.filter_cycle, None);
    }
}
