//! Employees view
//!
//! List + create/edit form + two-step delete. Create, edit, delete and
//! the Actions column are reserved for elevated identities; the table
//! itself hides elevated rows.

use crate::cmd::Cmd;
use crate::msg::MutationKind;
use crate::views::ListCore;
use crossterm::event::{Event, KeyCode, KeyEvent};
use shared::models::{ActiveFlag, Employee, EmployeePayload, Gender};
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;

/// Form field order, top to bottom
pub const FIELDS: [&str; 11] = [
    "Employee Code *",
    "First Name *",
    "Last Name *",
    "Gender",
    "Phone Number *",
    "Email *",
    "Password",
    "Manager ID",
    "Department *",
    "Job Title *",
    "Active Status",
];

const GENDER: usize = 3;
const ACTIVE: usize = 10;

#[derive(Debug, Default)]
pub struct EmployeeForm {
    pub editing_id: Option<i64>,
    pub emp_code: Input,
    pub first_name: Input,
    pub last_name: Input,
    pub gender: Option<Gender>,
    pub phone_no: Input,
    pub email: Input,
    pub password: Input,
    pub manager_id: Input,
    pub department: Input,
    pub job_title: Input,
    pub active: ActiveFlag,
    pub focus: usize,
    pub error: Option<String>,
}

impl EmployeeForm {
    pub fn create() -> Self {
        Self::default()
    }

    /// Pre-populate from the row being edited. The password box starts
    /// blank; a stored password is never redisplayed.
    pub fn edit(employee: &Employee) -> Self {
        Self {
            editing_id: employee.id,
            emp_code: Input::new(employee.emp_code.clone()),
            first_name: Input::new(employee.first_name.clone()),
            last_name: Input::new(employee.last_name.clone()),
            gender: employee.gender,
            phone_no: Input::new(employee.phone_no.clone()),
            email: Input::new(employee.email.clone()),
            password: Input::default(),
            manager_id: Input::new(
                employee.manager_id.map(|id| id.to_string()).unwrap_or_default(),
            ),
            department: Input::new(employee.department.clone()),
            job_title: Input::new(employee.job_title.clone()),
            active: employee.active,
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
            0 => Some(&mut self.emp_code),
            1 => Some(&mut self.first_name),
            2 => Some(&mut self.last_name),
            4 => Some(&mut self.phone_no),
            5 => Some(&mut self.email),
            6 => Some(&mut self.password),
            7 => Some(&mut self.manager_id),
            8 => Some(&mut self.department),
            9 => Some(&mut self.job_title),
            _ => None,
        }
    }

    /// Route a key to the focused field. Left/Right cycle the choice
    /// fields; everything else goes to the focused text input.
    pub fn handle_key(&mut self, key: KeyEvent) {
        match (self.focus, key.code) {
            (GENDER, KeyCode::Left) => self.gender = cycle_gender(self.gender, -1),
            (GENDER, KeyCode::Right) => self.gender = cycle_gender(self.gender, 1),
            (ACTIVE, KeyCode::Left | KeyCode::Right) => self.active = self.active.toggled(),
            _ => {
                if let Some(input) = self.focused_input_mut() {
                    input.handle_event(&Event::Key(key));
                }
            }
        }
    }

    /// Client-side required-field validation, then the payload. A blank
    /// password is omitted so the backend keeps the current one.
    pub fn to_payload(&self) -> Result<EmployeePayload, String> {
        let required = [
            self.emp_code.value(),
            self.first_name.value(),
            self.last_name.value(),
            self.email.value(),
            self.phone_no.value(),
            self.department.value(),
            self.job_title.value(),
        ];
        if required.iter().any(|value| value.trim().is_empty()) {
            return Err("Please fill in all required fields".to_string());
        }

        let manager_id = match self.manager_id.value().trim() {
            "" => None,
            text => Some(
                text.parse::<i64>()
                    .map_err(|_| "Manager ID must be a number".to_string())?,
            ),
        };

        let password = match self.password.value() {
            "" => None,
            text => Some(text.to_string()),
        };

        Ok(EmployeePayload {
            emp_code: self.emp_code.value().trim().to_string(),
            first_name: self.first_name.value().trim().to_string(),
            last_name: self.last_name.value().trim().to_string(),
            gender: self.gender,
            phone_no: self.phone_no.value().trim().to_string(),
            email: self.email.value().trim().to_string(),
            password,
            manager_id,
            department: self.department.value().trim().to_string(),
            job_title: self.job_title.value().trim().to_string(),
            active: self.active,
        })
    }
}

fn cycle_gender(current: Option<Gender>, step: i32) -> Option<Gender> {
    // None sits before the three concrete options
    let order = [None, Some(Gender::Male), Some(Gender::Female), Some(Gender::Other)];
    let index = order.iter().position(|option| *option == current).unwrap_or(0) as i32;
    let next = (index + step).rem_euclid(order.len() as i32) as usize;
    order[next]
}

#[derive(Debug, Default)]
pub struct EmployeesView {
    pub core: ListCore<Employee>,
    pub form: Option<EmployeeForm>,
}

impl EmployeesView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mount-time fetch
    pub fn enter(&mut self) -> Cmd {
        Cmd::LoadEmployees {
            seq: self.core.begin_reload(),
        }
    }

    pub fn reload(&mut self) -> Cmd {
        self.enter()
    }

    /// Elevated identities are filtered out of the table
    pub fn visible_rows(&self) -> Vec<&Employee> {
        self.core.items.iter().filter(|employee| !employee.is_admin).collect()
    }

    pub fn selected_employee(&self) -> Option<&Employee> {
        self.visible_rows().get(self.core.selected).copied()
    }

    pub fn apply_loaded(&mut self, seq: u64, result: Result<Vec<Employee>, String>) {
        if self.core.apply_loaded(seq, result) {
            let visible = self.visible_rows().len();
            self.core.clamp_selection(visible);
        }
    }

    pub fn open_create(&mut self, is_admin: bool) {
        if is_admin {
            self.form = Some(EmployeeForm::create());
        }
    }

    pub fn open_edit(&mut self, is_admin: bool) {
        if !is_admin {
            return;
        }
        if let Some(employee) = self.selected_employee().cloned() {
            self.form = Some(EmployeeForm::edit(&employee));
        }
    }

    pub fn cancel_form(&mut self) {
        self.form = None;
        self.core.error = None;
    }

    /// Validate and describe the create-or-update call. Validation
    /// failures keep the form open and issue no network effect.
    pub fn submit_form(&mut self) -> Option<Cmd> {
        let form = self.form.as_mut()?;
        match form.to_payload() {
            Err(message) => {
                form.error = Some(message);
                None
            }
            Ok(payload) => match form.editing_id {
                Some(id) => Some(Cmd::UpdateEmployee { id, payload }),
                None => Some(Cmd::CreateEmployee(payload)),
            },
        }
    }

    pub fn request_delete(&mut self, is_admin: bool) {
        if !is_admin {
            return;
        }
        if let Some(id) = self.selected_employee().and_then(|employee| employee.id) {
            self.core.request_delete(id);
        }
    }

    pub fn confirm_delete(&mut self) -> Option<Cmd> {
        self.core
            .take_delete_target()
            .map(|id| Cmd::DeleteEmployee { id })
    }

    /// Apply a finished mutation: banner + reload on success, inline
    /// error (and a blocking alert for deletes) on failure.
    pub fn on_mutation(&mut self, kind: MutationKind, result: Result<(), String>) -> Option<Cmd> {
        match result {
            Ok(()) => {
                let banner = match kind {
                    MutationKind::Create => "Employee created successfully",
                    MutationKind::Update => "Employee updated successfully",
                    MutationKind::Delete => "Employee deleted successfully",
                };
                self.core.set_success(banner);
                if !matches!(kind, MutationKind::Delete) {
                    self.form = None;
                }
                Some(self.reload())
            }
            Err(message) => {
                match kind {
                    MutationKind::Delete => {
                        self.core.alert = Some(format!("Failed to delete employee: {message}"));
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
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn employee(id: i64, first: &str, is_admin: bool) -> Employee {
        Employee {
            id: Some(id),
            emp_code: format!("EM{id:03}"),
            first_name: first.to_string(),
            last_name: "Test".to_string(),
            gender: None,
            phone_no: "5550000".to_string(),
            email: format!("{first}@company.com"),
            password: None,
            manager_id: None,
            department: "IT".to_string(),
            job_title: "Dev".to_string(),
            active: ActiveFlag::Yes,
            hire_date: None,
            is_admin,
        }
    }

    fn filled_form() -> EmployeeForm {
        let mut form = EmployeeForm::create();
        form.emp_code = Input::new("EM095476".to_string());
        form.first_name = Input::new("Vinod".to_string());
        form.last_name = Input::new("Kumar".to_string());
        form.phone_no = Input::new("8657469542".to_string());
        form.email = Input::new("vinod@company.com".to_string());
        form.department = Input::new("IT".to_string());
        form.job_title = Input::new("Java Developer".to_string());
        form
    }

    #[test]
    fn missing_required_field_blocks_submit_without_network() {
        let mut view = EmployeesView::new();
        view.open_create(true);
        let form = view.form.as_mut().unwrap();
        form.first_name = Input::new("Vinod".to_string());

        assert!(view.submit_form().is_none());
        let form = view.form.as_ref().unwrap();
        assert_eq!(form.error.as_deref(), Some("Please fill in all required fields"));
    }

    #[test]
    fn valid_create_form_produces_create_effect() {
        let mut view = EmployeesView::new();
        view.form = Some(filled_form());

        match view.submit_form() {
            Some(Cmd::CreateEmployee(payload)) => {
                assert_eq!(payload.emp_code, "EM095476");
                assert!(payload.password.is_none());
            }
            other => panic!("expected create effect, got {other:?}"),
        }
        // the form closes only when the mutation lands
        assert!(view.form.is_some());
    }

    #[test]
    fn edit_form_targets_the_row_id_and_blanks_password() {
        let mut source = employee(4, "Neha", false);
        source.password = Some("stored-secret".to_string());
        let form = EmployeeForm::edit(&source);
        assert_eq!(form.editing_id, Some(4));
        assert_eq!(form.password.value(), "");
    }

    #[test]
    fn non_admin_cannot_open_form_or_delete() {
        let mut view = EmployeesView::new();
        let seq = view.core.begin_reload();
        view.apply_loaded(seq, Ok(vec![employee(1, "A", false)]));

        view.open_create(false);
        assert!(view.form.is_none());
        view.open_edit(false);
        assert!(view.form.is_none());
        view.request_delete(false);
        assert_eq!(view.core.delete_target(), None);
    }

    #[test]
    fn admin_rows_are_hidden_from_the_table() {
        let mut view = EmployeesView::new();
        let seq = view.core.begin_reload();
        view.apply_loaded(
            seq,
            Ok(vec![
                employee(1, "A", false),
                employee(2, "Boss", true),
                employee(3, "C", false),
            ]),
        );
        let names: Vec<&str> = view
            .visible_rows()
            .iter()
            .map(|employee| employee.first_name.as_str())
            .collect();
        assert_eq!(names, vec!["A", "C"]);
    }

    #[test]
    fn decline_delete_leaves_list_and_issues_nothing() {
        let mut view = EmployeesView::new();
        let seq = view.core.begin_reload();
        view.apply_loaded(seq, Ok(vec![employee(1, "A", false)]));

        view.request_delete(true);
        assert_eq!(view.core.delete_target(), Some(1));
        view.core.cancel_delete();
        assert_eq!(view.core.delete_target(), None);
        assert_eq!(view.core.items.len(), 1);
        // confirm after decline finds no target, so no effect
        assert!(view.confirm_delete().is_none());
    }

    #[test]
    fn confirm_delete_targets_exactly_the_requested_id() {
        let mut view = EmployeesView::new();
        let seq = view.core.begin_reload();
        view.apply_loaded(seq, Ok(vec![employee(1, "A", false), employee(5, "B", false)]));
        view.core.selected = 1;

        view.request_delete(true);
        assert_eq!(view.confirm_delete(), Some(Cmd::DeleteEmployee { id: 5 }));
    }

    #[test]
    fn delete_failure_raises_blocking_alert() {
        let mut view = EmployeesView::new();
        let reload = view.on_mutation(MutationKind::Delete, Err("API error (500): nope".to_string()));
        assert!(reload.is_none());
        assert!(view.core.alert.as_deref().unwrap().starts_with("Failed to delete employee"));
    }

    #[test]
    fn successful_mutation_closes_form_and_reloads() {
        let mut view = EmployeesView::new();
        view.form = Some(filled_form());
        let reload = view.on_mutation(MutationKind::Create, Ok(()));
        assert!(matches!(reload, Some(Cmd::LoadEmployees { .. })));
        assert!(view.form.is_none());
        assert!(view.core.success.is_some());
    }

    #[test]
    fn gender_cycles_through_blank_and_options() {
        assert_eq!(cycle_gender(None, 1), Some(Gender::Male));
        assert_eq!(cycle_gender(Some(Gender::Other), 1), None);
        assert_eq!(cycle_gender(None, -1), Some(Gender::Other));
    }
}
