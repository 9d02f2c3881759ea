//! Login and registration screens

use crate::cmd::Cmd;
use crossterm::event::{Event, KeyEvent};
use shared::client::RegisterRequest;
use tui_input::Input;
use tui_input::backend::crossterm::EventHandler;

#[derive(Debug, Default)]
pub struct LoginView {
    pub email: Input,
    pub password: Input,
    /// 0 = email, 1 = password
    pub focus: usize,
    pub error: Option<String>,
    /// Carried over from a completed registration
    pub notice: Option<String>,
    pub loading: bool,
}

impl LoginView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % 2;
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        let input = if self.focus == 0 { &mut self.email } else { &mut self.password };
        input.handle_event(&Event::Key(key));
    }

    /// Describe the login call, or stay put with an inline error
    pub fn submit(&mut self) -> Option<Cmd> {
        if self.loading {
            return None;
        }
        self.error = None;
        self.notice = None;
        if self.email.value().trim().is_empty() || self.password.value().is_empty() {
            self.error = Some("Please enter your email and password".to_string());
            return None;
        }
        self.loading = true;
        Some(Cmd::Login {
            email: self.email.value().trim().to_string(),
            password: self.password.value().to_string(),
        })
    }

    pub fn fail(&mut self, message: String) {
        self.loading = false;
        self.error = Some(message);
    }
}

pub const REGISTER_FIELDS: [&str; 5] = [
    "First Name *",
    "Last Name *",
    "Email *",
    "Password *",
    "Role",
];

const ROLE: usize = 4;

#[derive(Debug, Default)]
pub struct RegisterView {
    pub first_name: Input,
    pub last_name: Input,
    pub email: Input,
    pub password: Input,
    /// Elevated (admin/manager) account requested
    pub is_admin: bool,
    pub focus: usize,
    pub error: Option<String>,
    pub success: Option<String>,
    pub loading: bool,
}

impl RegisterView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % REGISTER_FIELDS.len();
    }

    pub fn focus_prev(&mut self) {
        self.focus = (self.focus + REGISTER_FIELDS.len() - 1) % REGISTER_FIELDS.len();
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        use crossterm::event::KeyCode;
        if self.focus == ROLE {
            if matches!(key.code, KeyCode::Left | KeyCode::Right) {
                self.is_admin = !self.is_admin;
            }
            return;
        }
        let input = match self.focus {
            0 => &mut self.first_name,
            1 => &mut self.last_name,
            2 => &mut self.email,
            _ => &mut self.password,
        };
        input.handle_event(&Event::Key(key));
    }

    pub fn submit(&mut self) -> Option<Cmd> {
        if self.loading {
            return None;
        }
        self.error = None;
        self.success = None;
        if self.first_name.value().trim().is_empty()
            || self.last_name.value().trim().is_empty()
            || self.email.value().trim().is_empty()
            || self.password.value().is_empty()
        {
            self.error = Some("Please fill in all required fields".to_string());
            return None;
        }
        self.loading = true;
        Some(Cmd::Register(RegisterRequest {
            first_name: self.first_name.value().trim().to_string(),
            last_name: self.last_name.value().trim().to_string(),
            email: self.email.value().trim().to_string(),
            password: self.password.value().to_string(),
            is_admin: self.is_admin,
        }))
    }

    pub fn fail(&mut self, message: String) {
        self.loading = false;
        self.error = Some(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_credentials_never_leave_the_form() {
        let mut view = LoginView::new();
        assert!(view.submit().is_none());
        assert!(view.error.is_some());
        assert!(!view.loading);
    }

    #[test]
    fn filled_credentials_produce_a_login_effect() {
        let mut view = LoginView::new();
        view.email = Input::new("priya.singh@company.com".to_string());
        view.password = Input::new("Password@123".to_string());

        match view.submit() {
            Some(Cmd::Login { email, .. }) => assert_eq!(email, "priya.singh@company.com"),
            other => panic!("expected login effect, got {other:?}"),
        }
        assert!(view.loading);
        // no double submit while a request is pending
        assert!(view.submit().is_none());
    }

    #[test]
    fn register_maps_role_to_the_elevated_flag() {
        let mut view = RegisterView::new();
        view.first_name = Input::new("HR".to_string());
        view.last_name = Input::new("Admin".to_string());
        view.email = Input::new("hr@company.com".to_string());
        view.password = Input::new("pw".to_string());
        view.is_admin = true;

        match view.submit() {
            Some(Cmd::Register(request)) => assert!(request.is_admin),
            other => panic!("expected register effect, got {other:?}"),
        }
    }

    #[test]
    fn register_requires_every_field() {
        let mut view = RegisterView::new();
        view.first_name = Input::new("HR".to_string());
        assert!(view.submit().is_none());
        assert_eq!(view.error.as_deref(), Some("Please fill in all required fields"));
    }
}
