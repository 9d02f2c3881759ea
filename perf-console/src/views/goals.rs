//! Goals view
//!
//! The employee dropdown is fed from the already-loaded employee list;
//! the owner's display name is cached onto the goal at assignment time
//! and not re-derived afterwards.

use crate::cmd::Cmd;
use crate::msg::{MutationKind, OptionsTarget};
use crate::views::ListCore;
use chrono::NaiveDate;
use crossterm::event::{Event, KeyCode, KeyEvent};
use shared::models::{Employee, Goal, GoalPayload, GoalStatus};
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;

pub const FIELDS: [&str; 7] = [
    "Goal Title *",
    "Description *",
    "Employee *",
    "Created By",
    "Status *",
    "Start Date *",
    "End Date *",
];

const EMPLOYEE: usize = 2;
const STATUS: usize = 4;

#[derive(Debug, Default)]
pub struct GoalForm {
    pub editing_id: Option<i64>,
    pub title: Input,
    pub description: Input,
    /// Selected owner; survives edits even when the employee no longer
    /// appears in the dropdown options
    pub emp_id: Option<i64>,
    pub emp_name: String,
    pub created_by: Input,
    pub status: GoalStatus,
    pub start_date: Input,
    pub end_date: Input,
    pub focus: usize,
    pub error: Option<String>,
}

impl GoalForm {
    pub fn create() -> Self {
        Self::default()
    }

    pub fn edit(goal: &Goal) -> Self {
        Self {
            editing_id: goal.id,
            title: Input::new(goal.title.clone()),
            description: Input::new(goal.description_text.clone()),
            emp_id: Some(goal.emp_id),
            emp_name: goal.emp_name.clone(),
            created_by: Input::new(goal.created_by.clone()),
            status: goal.status,
            start_date: Input::new(goal.start_date.to_string()),
            end_date: Input::new(goal.end_date.to_string()),
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
            0 => Some(&mut self.title),
            1 => Some(&mut self.description),
            3 => Some(&mut self.created_by),
            5 => Some(&mut self.start_date),
            6 => Some(&mut self.end_date),
            _ => None,
        }
    }

    /// Move the employee selection and cache the display name at
    /// assignment time.
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

    fn cycle_status(&mut self, step: i32) {
        let index = GoalStatus::ALL
            .iter()
            .position(|status| *status == self.status)
            .unwrap_or(0) as i32;
        let next = (index + step).rem_euclid(GoalStatus::ALL.len() as i32) as usize;
        self.status = GoalStatus::ALL[next];
    }

    pub fn handle_key(&mut self, key: KeyEvent, options: &[Employee]) {
        match (self.focus, key.code) {
            (EMPLOYEE, KeyCode::Left) => self.cycle_employee(options, -1),
            (EMPLOYEE, KeyCode::Right) => self.cycle_employee(options, 1),
            (STATUS, KeyCode::Left) => self.cycle_status(-1),
            (STATUS, KeyCode::Right) => self.cycle_status(1),
            _ => {
                if let Some(input) = self.focused_input_mut() {
                    input.handle_event(&Event::Key(key));
                }
            }
        }
    }

    pub fn to_payload(&self) -> Result<GoalPayload, String> {
        if self.title.value().trim().is_empty()
            || self.description.value().trim().is_empty()
            || self.start_date.value().trim().is_empty()
            || self.end_date.value().trim().is_empty()
        {
            return Err("Please fill in all required fields".to_string());
        }
        let emp_id = self
            .emp_id
            .ok_or_else(|| "Please fill in all required fields".to_string())?;

        let start_date = parse_date(self.start_date.value())?;
        let end_date = parse_date(self.end_date.value())?;

        Ok(GoalPayload {
            title: self.title.value().trim().to_string(),
            description_text: self.description.value().trim().to_string(),
            status: self.status,
            created_by: self.created_by.value().trim().to_string(),
            emp_id,
            emp_name: self.emp_name.clone(),
            start_date,
            end_date,
        })
    }
}

pub(crate) fn parse_date(text: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(text.trim(), "%Y-%m-%d")
        .map_err(|_| "Enter dates as YYYY-MM-DD".to_string())
}

#[derive(Debug, Default)]
pub struct GoalsView {
    pub core: ListCore<Goal>,
    /// Dropdown options for the owner field
    pub employees: Vec<Employee>,
    pub form: Option<GoalForm>,
}

impl GoalsView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enter(&mut self) -> Vec<Cmd> {
        vec![
            Cmd::LoadGoals {
                seq: self.core.begin_reload(),
            },
            Cmd::LoadEmployeeOptions {
                target: OptionsTarget::Goals,
            },
        ]
    }

    pub fn reload(&mut self) -> Cmd {
        Cmd::LoadGoals {
            seq: self.core.begin_reload(),
        }
    }

    pub fn selected_goal(&self) -> Option<&Goal> {
        self.core.items.get(self.core.selected)
    }

    pub fn open_create(&mut self, is_admin: bool) {
        if is_admin {
            self.form = Some(GoalForm::create());
        }
    }

    pub fn open_edit(&mut self, is_admin: bool) {
        if !is_admin {
            return;
        }
        if let Some(goal) = self.selected_goal().cloned() {
            self.form = Some(GoalForm::edit(&goal));
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
                Some(id) => Some(Cmd::UpdateGoal { id, payload }),
                None => Some(Cmd::CreateGoal(payload)),
            },
        }
    }

    pub fn request_delete(&mut self, is_admin: bool) {
        if !is_admin {
            return;
        }
        if let Some(id) = self.selected_goal().and_then(|goal| goal.id) {
            self.core.request_delete(id);
        }
    }

    pub fn confirm_delete(&mut self) -> Option<Cmd> {
        self.core.take_delete_target().map(|id| Cmd::DeleteGoal { id })
    }

    pub fn on_mutation(&mut self, kind: MutationKind, result: Result<(), String>) -> Vec<Cmd> {
        match result {
            Ok(()) => {
                let banner = match kind {
                    MutationKind::Create => "Goal created successfully",
                    MutationKind::Update => "Goal updated successfully",
                    MutationKind::Delete => "Goal deleted successfully",
                };
                self.core.set_success(banner);
                if !matches!(kind, MutationKind::Delete) {
                    self.form = None;
                }
                // reload the list and refresh the dropdown options
                vec![
                    self.reload(),
                    Cmd::LoadEmployeeOptions {
                        target: OptionsTarget::Goals,
                    },
                ]
            }
            Err(message) => {
                match kind {
                    MutationKind::Delete => {
                        self.core.alert = Some(format!("Failed to delete goal: {message}"));
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

    fn employee(id: i64, first: &str, last: &str) -> Employee {
        Employee {
            id: Some(id),
            emp_code: format!("EM{id:03}"),
            first_name: first.to_string(),
            last_name: last.to_string(),
            gender: None,
            phone_no: String::new(),
            email: format!("{first}@company.com"),
            password: None,
            manager_id: None,
            department: "IT".to_string(),
            job_title: "Dev".to_string(),
            active: ActiveFlag::Yes,
            hire_date: None,
            is_admin: false,
        }
    }

    fn filled_form() -> GoalForm {
        let mut form = GoalForm::create();
        form.title = Input::new("Ship it".to_string());
        form.description = Input::new("Ship the thing".to_string());
        form.emp_id = Some(3);
        form.emp_name = "Amit Patel".to_string();
        form.start_date = Input::new("2025-07-01".to_string());
        form.end_date = Input::new("2025-09-30".to_string());
        form
    }

    #[test]
    fn employee_selection_caches_display_name() {
        let options = vec![employee(1, "Rajesh", "Kumar"), employee(2, "Priya", "Singh")];
        let mut form = GoalForm::create();

        form.cycle_employee(&options, 1);
        assert_eq!(form.emp_id, Some(1));
        assert_eq!(form.emp_name, "Rajesh Kumar");

        form.cycle_employee(&options, 1);
        assert_eq!(form.emp_name, "Priya Singh");
    }

    #[test]
    fn cached_name_survives_a_rename_until_reassigned() {
        // the stored goal still carries the name cached at assignment
        let goal = Goal {
            id: Some(9),
            title: "t".to_string(),
            description_text: "d".to_string(),
            status: GoalStatus::InProgress,
            created_by: String::new(),
            emp_id: 1,
            emp_name: "Rajesh Kumar".to_string(),
            start_date: parse_date("2025-01-01").unwrap(),
            end_date: parse_date("2025-02-01").unwrap(),
            created_at: None,
        };
        let form = GoalForm::edit(&goal);
        assert_eq!(form.emp_name, "Rajesh Kumar");
        assert_eq!(form.to_payload().unwrap().emp_name, "Rajesh Kumar");
    }

    #[test]
    fn missing_owner_blocks_submit() {
        let mut form = filled_form();
        form.emp_id = None;
        assert_eq!(form.to_payload().unwrap_err(), "Please fill in all required fields");
    }

    #[test]
    fn malformed_date_is_rejected_before_any_network_call() {
        let mut view = GoalsView::new();
        view.form = Some(filled_form());
        view.form.as_mut().unwrap().start_date = Input::new("July 1st".to_string());

        assert!(view.submit_form().is_none());
        assert_eq!(
            view.form.as_ref().unwrap().error.as_deref(),
            Some("Enter dates as YYYY-MM-DD")
        );
    }

    #[test]
    fn valid_form_produces_create_effect() {
        let mut view = GoalsView::new();
        view.form = Some(filled_form());
        match view.submit_form() {
            Some(Cmd::CreateGoal(payload)) => {
                assert_eq!(payload.emp_id, 3);
                assert_eq!(payload.status, GoalStatus::InProgress);
            }
            other => panic!("expected create effect, got {other:?}"),
        }
    }

    #[test]
    fn role_gating_blocks_non_admin_actions() {
        let mut view = GoalsView::new();
        view.open_create(false);
        assert!(view.form.is_none());
        view.request_delete(false);
        assert_eq!(view.core.delete_target(), None);
    }
}
