//! Review cycles view
//!
//! Carries the reviews list alongside the cycles so each row can show
//! its review count and average rating. The start-before-end rule is
//! checked here, before any network call; the backend does not enforce
//! it.

use crate::cmd::Cmd;
use crate::msg::MutationKind;
use crate::views::ListCore;
use crate::views::goals::parse_date;
use crossterm::event::{Event, KeyCode, KeyEvent};
use shared::models::{CyclePayload, CycleStatus, Review, ReviewCycle};
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;

pub const FIELDS: [&str; 5] = [
    "Cycle Name *",
    "Start Date *",
    "End Date *",
    "Status *",
    "Description",
];

const STATUS: usize = 3;

#[derive(Debug, Default)]
pub struct CycleForm {
    pub editing_id: Option<i64>,
    pub cycle_name: Input,
    pub start_date: Input,
    pub end_date: Input,
    pub status: CycleStatus,
    pub description: Input,
    pub focus: usize,
    pub error: Option<String>,
}

impl CycleForm {
    pub fn create() -> Self {
        Self::default()
    }

    pub fn edit(cycle: &ReviewCycle) -> Self {
        Self {
            editing_id: cycle.id,
            cycle_name: Input::new(cycle.cycle_name.clone()),
            start_date: Input::new(cycle.start_date.to_string()),
            end_date: Input::new(cycle.end_date.to_string()),
            status: cycle.status,
            description: Input::new(cycle.description.clone()),
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

    fn focused_input_mut(&mut self) -> Option<&mut Input> {
        match self.focus {
            0 => Some(&mut self.cycle_name),
            1 => Some(&mut self.start_date),
            2 => Some(&mut self.end_date),
            4 => Some(&mut self.description),
            _ => None,
        }
    }

    fn cycle_status(&mut self, step: i32) {
        let index = CycleStatus::ALL
            .iter()
            .position(|status| *status == self.status)
            .unwrap_or(0) as i32;
        let next = (index + step).rem_euclid(CycleStatus::ALL.len() as i32) as usize;
        self.status = CycleStatus::ALL[next];
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        match (self.focus, key.code) {
            (STATUS, KeyCode::Left) => self.cycle_status(-1),
            (STATUS, KeyCode::Right) => self.cycle_status(1),
            _ => {
                if let Some(input) = self.focused_input_mut() {
                    input.handle_event(&Event::Key(key));
                }
            }
        }
    }

    pub fn to_payload(&self) -> Result<CyclePayload, String> {
        if self.cycle_name.value().trim().is_empty()
            || self.start_date.value().trim().is_empty()
            || self.end_date.value().trim().is_empty()
        {
            return Err("Please fill in all required fields".to_string());
        }

        let start_date = parse_date(self.start_date.value())?;
        let end_date = parse_date(self.end_date.value())?;
        if start_date >= end_date {
            return Err("Start date must be before end date".to_string());
        }

        Ok(CyclePayload {
            cycle_name: self.cycle_name.value().trim().to_string(),
            start_date,
            end_date,
            status: self.status,
            description: self.description.value().trim().to_string(),
        })
    }
}

#[derive(Debug, Default)]
pub struct CyclesView {
    pub core: ListCore<ReviewCycle>,
    /// Reviews backing the per-cycle statistics
    pub reviews: Vec<Review>,
    reviews_seq: u64,
    pub form: Option<CycleForm>,
}

impl CyclesView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enter(&mut self) -> Vec<Cmd> {
        self.reviews_seq += 1;
        vec![
            Cmd::LoadCycles {
                seq: self.core.begin_reload(),
            },
            Cmd::LoadCycleReviews {
                seq: self.reviews_seq,
            },
        ]
    }

    pub fn reload(&mut self) -> Vec<Cmd> {
        self.enter()
    }

    pub fn apply_reviews(&mut self, seq: u64, result: Result<Vec<Review>, String>) {
        if seq != self.reviews_seq {
            return;
        }
        match result {
            Ok(reviews) => self.reviews = reviews,
            Err(message) => self.core.error = Some(message),
        }
    }

    pub fn selected_cycle(&self) -> Option<&ReviewCycle> {
        self.core.items.get(self.core.selected)
    }

    pub fn cycle_reviews(&self, cycle_id: i64) -> Vec<&Review> {
        self.reviews
            .iter()
            .filter(|review| review.review_cycle_id == cycle_id)
            .collect()
    }

    pub fn cycle_review_count(&self, cycle_id: i64) -> usize {
        self.cycle_reviews(cycle_id).len()
    }

    /// Average rating across the cycle's reviews, 0.0 when it has none
    pub fn cycle_average_rating(&self, cycle_id: i64) -> f64 {
        let reviews = self.cycle_reviews(cycle_id);
        if reviews.is_empty() {
            return 0.0;
        }
        let sum: f64 = reviews.iter().map(|review| review.rating).sum();
        sum / reviews.len() as f64
    }

    pub fn open_create(&mut self, is_admin: bool) {
        if is_admin {
            self.form = Some(CycleForm::create());
        }
    }

    pub fn open_edit(&mut self, is_admin: bool) {
        if !is_admin {
            return;
        }
        if let Some(cycle) = self.selected_cycle().cloned() {
            self.form = Some(CycleForm::edit(&cycle));
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
                Some(id) => Some(Cmd::UpdateCycle { id, payload }),
                None => Some(Cmd::CreateCycle(payload)),
            },
        }
    }

    pub fn request_delete(&mut self, is_admin: bool) {
        if !is_admin {
            return;
        }
        if let Some(id) = self.selected_cycle().and_then(|cycle| cycle.id) {
            self.core.request_delete(id);
        }
    }

    pub fn confirm_delete(&mut self) -> Option<Cmd> {
        self.core.take_delete_target().map(|id| Cmd::DeleteCycle { id })
    }

    pub fn on_mutation(&mut self, kind: MutationKind, result: Result<(), String>) -> Vec<Cmd> {
        match result {
            Ok(()) => {
                let banner = match kind {
                    MutationKind::Create => "Review cycle created successfully",
                    MutationKind::Update => "Review cycle updated successfully",
                    MutationKind::Delete => "Review cycle deleted successfully",
                };
                self.core.set_success(banner);
                if !matches!(kind, MutationKind::Delete) {
                    self.form = None;
                }
                self.reload()
            }
            Err(message) => {
                match kind {
                    MutationKind::Delete => {
                        self.core.alert = Some(format!("Failed to delete review cycle: {message}"));
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
    use shared::models::ReviewStatus;

    fn filled_form(start: &str, end: &str) -> CycleForm {
        let mut form = CycleForm::create();
        form.cycle_name = Input::new("H1 2025".to_string());
        form.start_date = Input::new(start.to_string());
        form.end_date = Input::new(end.to_string());
        form
    }

    fn review(cycle_id: i64, rating: f64) -> Review {
        Review {
            id: Some(1),
            emp_id: 1,
            emp_name: String::new(),
            reviewer_id: 2,
            reviewer_name: String::new(),
            review_cycle_id: cycle_id,
            cycle_name: String::new(),
            rating,
            comments: String::new(),
            status: ReviewStatus::Submitted,
            created_date: None,
        }
    }

    #[test]
    fn reversed_dates_are_rejected_client_side() {
        let mut view = CyclesView::new();
        view.form = Some(filled_form("2025-04-01", "2025-01-01"));

        // no network effect, inline error, form stays open
        assert!(view.submit_form().is_none());
        assert_eq!(
            view.form.as_ref().unwrap().error.as_deref(),
            Some("Start date must be before end date")
        );
    }

    #[test]
    fn equal_dates_are_rejected_too() {
        let form = filled_form("2025-04-01", "2025-04-01");
        assert_eq!(form.to_payload().unwrap_err(), "Start date must be before end date");
    }

    #[test]
    fn ordered_dates_pass_validation() {
        let mut view = CyclesView::new();
        view.form = Some(filled_form("2025-01-01", "2025-06-30"));
        assert!(matches!(view.submit_form(), Some(Cmd::CreateCycle(_))));
    }

    #[test]
    fn per_cycle_stats_cover_only_that_cycle() {
        let mut view = CyclesView::new();
        view.reviews = vec![review(1, 4.0), review(1, 5.0), review(2, 2.0)];

        assert_eq!(view.cycle_review_count(1), 2);
        assert_eq!(view.cycle_average_rating(1), 4.5);
        assert_eq!(view.cycle_review_count(3), 0);
        assert_eq!(view.cycle_average_rating(3), 0.0);
    }

    #[test]
    fn stale_review_stats_are_discarded() {
        let mut view = CyclesView::new();
        let _ = view.enter();
        let first = 1;
        let _ = view.reload(); // bumps reviews_seq to 2

        view.apply_reviews(2, Ok(vec![review(1, 3.0)]));
        view.apply_reviews(first, Ok(vec![review(1, 5.0), review(1, 5.0)]));
        assert_eq!(view.reviews.len(), 1);
    }
}
