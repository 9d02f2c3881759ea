//! Application shell
//!
//! Holds which screen is visible and whether the session is
//! authenticated, routes key events into the views, and applies async
//! completion messages. It composes the views but carries no resource
//! business rules of its own.

use crate::cmd::Cmd;
use crate::msg::{Net, OptionsTarget, Resource};
use crate::views::cycles::CyclesView;
use crate::views::employees::EmployeesView;
use crate::views::goals::GoalsView;
use crate::views::login::{LoginView, RegisterView};
use crate::views::profile::ProfileView;
use crate::views::reviews::{FilterKind, ReviewsView};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use perf_client::SessionContext;
use std::time::Instant;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Login,
    Register,
    Employees,
    Goals,
    Cycles,
    Reviews,
    Profile,
}

/// Navigation order of the authenticated screens
pub const NAV: [Screen; 5] = [
    Screen::Employees,
    Screen::Goals,
    Screen::Cycles,
    Screen::Reviews,
    Screen::Profile,
];

pub struct App {
    pub screen: Screen,
    pub session: SessionContext,
    pub login: LoginView,
    pub register: RegisterView,
    pub employees: EmployeesView,
    pub goals: GoalsView,
    pub cycles: CyclesView,
    pub reviews: ReviewsView,
    pub profile: ProfileView,
    pub show_logs: bool,
    pub should_quit: bool,
}

impl App {
    /// A restored session skips the login screen; the stored identity
    /// is trusted until a request fails.
    pub fn new(session: SessionContext) -> Self {
        let screen = if session.is_authenticated() {
            Screen::Employees
        } else {
            Screen::Login
        };
        Self {
            screen,
            session,
            login: LoginView::new(),
            register: RegisterView::new(),
            employees: EmployeesView::new(),
            goals: GoalsView::new(),
            cycles: CyclesView::new(),
            reviews: ReviewsView::new(),
            profile: ProfileView::new(),
            show_logs: false,
            should_quit: false,
        }
    }

    /// Effects to run at startup (the mount-time fetch of the first
    /// visible screen)
    pub fn initial_cmds(&mut self) -> Vec<Cmd> {
        if self.session.is_authenticated() {
            self.enter_screen(Screen::Employees)
        } else {
            Vec::new()
        }
    }

    fn enter_screen(&mut self, screen: Screen) -> Vec<Cmd> {
        self.screen = screen;
        match screen {
            Screen::Login | Screen::Register => Vec::new(),
            Screen::Employees => vec![self.employees.enter()],
            Screen::Goals => self.goals.enter(),
            Screen::Cycles => self.cycles.enter(),
            Screen::Reviews => self.reviews.enter(),
            Screen::Profile => match self.session.user().cloned() {
                Some(user) => self.profile.enter(&user),
                None => Vec::new(),
            },
        }
    }

    fn nav_step(&mut self, step: i32) -> Vec<Cmd> {
        let index = NAV.iter().position(|screen| *screen == self.screen).unwrap_or(0) as i32;
        let next = (index + step).rem_euclid(NAV.len() as i32) as usize;
        self.enter_screen(NAV[next])
    }

    fn logout(&mut self) {
        if let Err(err) = self.session.logout() {
            tracing::warn!("Failed to clear stored session: {err}");
        }
        self.login = LoginView::new();
        self.register = RegisterView::new();
        self.employees = EmployeesView::new();
        self.goals = GoalsView::new();
        self.cycles = CyclesView::new();
        self.reviews = ReviewsView::new();
        self.profile = ProfileView::new();
        self.screen = Screen::Login;
    }

    pub fn tick(&mut self, now: Instant) {
        self.employees.core.tick(now);
        self.goals.core.tick(now);
        self.cycles.core.tick(now);
        self.reviews.core.tick(now);
        self.profile.tick(now);
    }

    // ---- key routing ----

    pub fn on_key(&mut self, key: KeyEvent) -> Vec<Cmd> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return Vec::new();
        }
        if self.show_logs {
            if matches!(key.code, KeyCode::Esc | KeyCode::Char('g')) {
                self.show_logs = false;
            }
            return Vec::new();
        }

        match self.screen {
            Screen::Login => self.on_login_key(key),
            Screen::Register => self.on_register_key(key),
            Screen::Employees => self.on_employees_key(key),
            Screen::Goals => self.on_goals_key(key),
            Screen::Cycles => self.on_cycles_key(key),
            Screen::Reviews => self.on_reviews_key(key),
            Screen::Profile => self.on_profile_key(key),
        }
    }

    fn on_login_key(&mut self, key: KeyEvent) -> Vec<Cmd> {
        match key.code {
            KeyCode::Esc => {
                self.should_quit = true;
                Vec::new()
            }
            KeyCode::Char('r') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.register = RegisterView::new();
                self.screen = Screen::Register;
                Vec::new()
            }
            KeyCode::Enter => {
                if let Some(cmd) = self.login.submit() {
                    self.session.begin_authentication();
                    vec![cmd]
                } else {
                    Vec::new()
                }
            }
            KeyCode::Tab | KeyCode::Down | KeyCode::Up | KeyCode::BackTab => {
                self.login.focus_next();
                Vec::new()
            }
            _ => {
                self.login.handle_key(key);
                Vec::new()
            }
        }
    }

    fn on_register_key(&mut self, key: KeyEvent) -> Vec<Cmd> {
        match key.code {
            KeyCode::Esc => {
                self.screen = Screen::Login;
                Vec::new()
            }
            KeyCode::Enter => {
                if let Some(cmd) = self.register.submit() {
                    self.session.begin_authentication();
                    vec![cmd]
                } else {
                    Vec::new()
                }
            }
            KeyCode::Tab | KeyCode::Down => {
                self.register.focus_next();
                Vec::new()
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.register.focus_prev();
                Vec::new()
            }
            _ => {
                self.register.handle_key(key);
                Vec::new()
            }
        }
    }

    /// Keys shared by every authenticated list screen. Returns None
    /// when the key was not a shell-level action.
    fn shell_key(&mut self, key: KeyEvent) -> Option<Vec<Cmd>> {
        match key.code {
            KeyCode::Char('q') => {
                self.should_quit = true;
                Some(Vec::new())
            }
            KeyCode::Char('g') => {
                self.show_logs = true;
                Some(Vec::new())
            }
            KeyCode::Char('x') => {
                self.logout();
                Some(Vec::new())
            }
            KeyCode::Tab => Some(self.nav_step(1)),
            KeyCode::BackTab => Some(self.nav_step(-1)),
            KeyCode::Char('1') => Some(self.enter_screen(Screen::Employees)),
            KeyCode::Char('2') => Some(self.enter_screen(Screen::Goals)),
            KeyCode::Char('3') => Some(self.enter_screen(Screen::Cycles)),
            KeyCode::Char('4') => Some(self.enter_screen(Screen::Reviews)),
            KeyCode::Char('5') => Some(self.enter_screen(Screen::Profile)),
            _ => None,
        }
    }

    fn on_employees_key(&mut self, key: KeyEvent) -> Vec<Cmd> {
        if self.employees.core.alert.is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.employees.core.alert = None;
            }
            return Vec::new();
        }
        if self.employees.core.delete_target().is_some() {
            return match key.code {
                KeyCode::Char('y') | KeyCode::Enter => {
                    self.employees.confirm_delete().into_iter().collect()
                }
                KeyCode::Char('n') | KeyCode::Esc => {
                    self.employees.core.cancel_delete();
                    Vec::new()
                }
                _ => Vec::new(),
            };
        }
        if self.employees.form.is_some() {
            return match key.code {
                KeyCode::Esc => {
                    self.employees.cancel_form();
                    Vec::new()
                }
                KeyCode::Enter => self.employees.submit_form().into_iter().collect(),
                KeyCode::Tab | KeyCode::Down => {
                    if let Some(form) = self.employees.form.as_mut() {
                        form.focus_next();
                    }
                    Vec::new()
                }
                KeyCode::BackTab | KeyCode::Up => {
                    if let Some(form) = self.employees.form.as_mut() {
                        form.focus_prev();
                    }
                    Vec::new()
                }
                _ => {
                    if let Some(form) = self.employees.form.as_mut() {
                        form.handle_key(key);
                    }
                    Vec::new()
                }
            };
        }
        if let Some(cmds) = self.shell_key(key) {
            return cmds;
        }

        let is_admin = self.session.is_admin();
        match key.code {
            KeyCode::Up => self.employees.core.select_prev(),
            KeyCode::Down => {
                let len = self.employees.visible_rows().len();
                self.employees.core.select_next(len);
            }
            KeyCode::Char('r') => return vec![self.employees.reload()],
            KeyCode::Char('a') => self.employees.open_create(is_admin),
            KeyCode::Char('e') => self.employees.open_edit(is_admin),
            KeyCode::Char('d') => self.employees.request_delete(is_admin),
            _ => {}
        }
        Vec::new()
    }

    fn on_goals_key(&mut self, key: KeyEvent) -> Vec<Cmd> {
        if self.goals.core.alert.is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.goals.core.alert = None;
            }
            return Vec::new();
        }
        if self.goals.core.delete_target().is_some() {
            return match key.code {
                KeyCode::Char('y') | KeyCode::Enter => {
                    self.goals.confirm_delete().into_iter().collect()
                }
                KeyCode::Char('n') | KeyCode::Esc => {
                    self.goals.core.cancel_delete();
                    Vec::new()
                }
                _ => Vec::new(),
            };
        }
        if self.goals.form.is_some() {
            return match key.code {
                KeyCode::Esc => {
                    self.goals.cancel_form();
                    Vec::new()
                }
                KeyCode::Enter => self.goals.submit_form().into_iter().collect(),
                KeyCode::Tab | KeyCode::Down => {
                    if let Some(form) = self.goals.form.as_mut() {
                        form.focus_next();
                    }
                    Vec::new()
                }
                KeyCode::BackTab | KeyCode::Up => {
                    if let Some(form) = self.goals.form.as_mut() {
                        form.focus_prev();
                    }
                    Vec::new()
                }
                _ => {
                    let options = std::mem::take(&mut self.goals.employees);
                    if let Some(form) = self.goals.form.as_mut() {
                        form.handle_key(key, &options);
                    }
                    self.goals.employees = options;
                    Vec::new()
                }
            };
        }
        if let Some(cmds) = self.shell_key(key) {
            return cmds;
        }

        let is_admin = self.session.is_admin();
        match key.code {
            KeyCode::Up => self.goals.core.select_prev(),
            KeyCode::Down => {
                let len = self.goals.core.items.len();
                self.goals.core.select_next(len);
            }
            KeyCode::Char('r') => return self.goals.enter(),
            KeyCode::Char('a') => self.goals.open_create(is_admin),
            KeyCode::Char('e') => self.goals.open_edit(is_admin),
            KeyCode::Char('d') => self.goals.request_delete(is_admin),
            _ => {}
        }
        Vec::new()
    }

    fn on_cycles_key(&mut self, key: KeyEvent) -> Vec<Cmd> {
        if self.cycles.core.alert.is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.cycles.core.alert = None;
            }
            return Vec::new();
        }
        if self.cycles.core.delete_target().is_some() {
            return match key.code {
                KeyCode::Char('y') | KeyCode::Enter => {
                    self.cycles.confirm_delete().into_iter().collect()
                }
                KeyCode::Char('n') | KeyCode::Esc => {
                    self.cycles.core.cancel_delete();
                    Vec::new()
                }
                _ => Vec::new(),
            };
        }
        if self.cycles.form.is_some() {
            return match key.code {
                KeyCode::Esc => {
                    self.cycles.cancel_form();
                    Vec::new()
                }
                KeyCode::Enter => self.cycles.submit_form().into_iter().collect(),
                KeyCode::Tab | KeyCode::Down => {
                    if let Some(form) = self.cycles.form.as_mut() {
                        form.focus_next();
                    }
                    Vec::new()
                }
                KeyCode::BackTab | KeyCode::Up => {
                    if let Some(form) = self.cycles.form.as_mut() {
                        form.focus_prev();
                    }
                    Vec::new()
                }
                _ => {
                    if let Some(form) = self.cycles.form.as_mut() {
                        form.handle_key(key);
                    }
                    Vec::new()
                }
            };
        }
        if let Some(cmds) = self.shell_key(key) {
            return cmds;
        }

        let is_admin = self.session.is_admin();
        match key.code {
            KeyCode::Up => self.cycles.core.select_prev(),
            KeyCode::Down => {
                let len = self.cycles.core.items.len();
                self.cycles.core.select_next(len);
            }
            KeyCode::Char('r') => return self.cycles.reload(),
            KeyCode::Char('a') => self.cycles.open_create(is_admin),
            KeyCode::Char('e') => self.cycles.open_edit(is_admin),
            KeyCode::Char('d') => self.cycles.request_delete(is_admin),
            _ => {}
        }
        Vec::new()
    }

    fn on_reviews_key(&mut self, key: KeyEvent) -> Vec<Cmd> {
        if self.reviews.core.alert.is_some() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.reviews.core.alert = None;
            }
            return Vec::new();
        }
        if self.reviews.core.delete_target().is_some() {
            return match key.code {
                KeyCode::Char('y') | KeyCode::Enter => {
                    self.reviews.confirm_delete().into_iter().collect()
                }
                KeyCode::Char('n') | KeyCode::Esc => {
                    self.reviews.core.cancel_delete();
                    Vec::new()
                }
                _ => Vec::new(),
            };
        }
        if self.reviews.form.is_some() {
            return match key.code {
                KeyCode::Esc => {
                    self.reviews.cancel_form();
                    Vec::new()
                }
                KeyCode::Enter => self.reviews.submit_form().into_iter().collect(),
                KeyCode::Tab | KeyCode::Down => {
                    if let Some(form) = self.reviews.form.as_mut() {
                        form.focus_next();
                    }
                    Vec::new()
                }
                KeyCode::BackTab | KeyCode::Up => {
                    if let Some(form) = self.reviews.form.as_mut() {
                        form.focus_prev();
                    }
                    Vec::new()
                }
                _ => {
                    let employees = std::mem::take(&mut self.reviews.employees);
                    let cycles = std::mem::take(&mut self.reviews.cycles);
                    if let Some(form) = self.reviews.form.as_mut() {
                        form.handle_key(key, &employees, &cycles);
                    }
                    self.reviews.employees = employees;
                    self.reviews.cycles = cycles;
                    Vec::new()
                }
            };
        }
        if let Some(cmds) = self.shell_key(key) {
            return cmds;
        }

        let Some(user) = self.session.user().cloned() else {
            return Vec::new();
        };
        match key.code {
            KeyCode::Up => self.reviews.core.select_prev(),
            KeyCode::Down => {
                let len = self.reviews.filtered().len();
                self.reviews.core.select_next(len);
            }
            KeyCode::Char('r') => return vec![self.reviews.reload()],
            KeyCode::Char('a') => self.reviews.open_create(&user),
            KeyCode::Char('e') => self.reviews.open_edit(&user),
            KeyCode::Char('d') => self.reviews.request_delete(&user),
            KeyCode::Char('c') => self.reviews.cycle_filter(FilterKind::Cycle),
            KeyCode::Char('m') => self.reviews.cycle_filter(FilterKind::Employee),
            KeyCode::Char('w') => self.reviews.cycle_filter(FilterKind::Reviewer),
            KeyCode::Char('0') => self.reviews.clear_filters(),
            _ => {}
        }
        Vec::new()
    }

    fn on_profile_key(&mut self, key: KeyEvent) -> Vec<Cmd> {
        if self.profile.form.is_some() {
            return match key.code {
                KeyCode::Esc => {
                    self.profile.cancel_form();
                    Vec::new()
                }
                KeyCode::Enter => self.profile.submit_form().into_iter().collect(),
                KeyCode::Tab | KeyCode::Down => {
                    if let Some(form) = self.profile.form.as_mut() {
                        form.focus_next();
                    }
                    Vec::new()
                }
                KeyCode::BackTab | KeyCode::Up => {
                    if let Some(form) = self.profile.form.as_mut() {
                        form.focus_prev();
                    }
                    Vec::new()
                }
                _ => {
                    if let Some(form) = self.profile.form.as_mut() {
                        form.handle_key(key);
                    }
                    Vec::new()
                }
            };
        }
        if let Some(cmds) = self.shell_key(key) {
            return cmds;
        }
        match key.code {
            KeyCode::Char('e') => {
                self.profile.open_edit();
                Vec::new()
            }
            KeyCode::Char('r') => match self.session.user().cloned() {
                Some(user) => self.profile.enter(&user),
                None => Vec::new(),
            },
            _ => Vec::new(),
        }
    }

    // ---- completion routing ----

    pub fn on_net(&mut self, net: Net) -> Vec<Cmd> {
        match net {
            Net::EmployeeList { seq, result } => {
                self.employees.apply_loaded(seq, result);
                Vec::new()
            }
            Net::GoalList { seq, result } => {
                self.goals.core.apply_loaded(seq, result);
                Vec::new()
            }
            Net::CycleList { seq, result } => {
                self.cycles.core.apply_loaded(seq, result);
                Vec::new()
            }
            Net::ReviewList { seq, result } => {
                if self.reviews.core.apply_loaded(seq, result) {
                    let len = self.reviews.filtered().len();
                    self.reviews.core.clamp_selection(len);
                }
                Vec::new()
            }
            Net::EmployeeOptions { target, result } => {
                match result {
                    Ok(employees) => match target {
                        OptionsTarget::Goals => self.goals.employees = employees,
                        OptionsTarget::Reviews => self.reviews.employees = employees,
                    },
                    Err(message) => match target {
                        OptionsTarget::Goals => self.goals.core.error = Some(message),
                        OptionsTarget::Reviews => self.reviews.core.error = Some(message),
                    },
                }
                Vec::new()
            }
            Net::CycleOptions { result } => {
                match result {
                    Ok(cycles) => self.reviews.cycles = cycles,
                    Err(message) => self.reviews.core.error = Some(message),
                }
                Vec::new()
            }
            Net::CycleReviews { seq, result } => {
                self.cycles.apply_reviews(seq, result);
                Vec::new()
            }
            Net::ProfileRecord { seq, result } => {
                self.profile.apply_record(seq, result);
                Vec::new()
            }
            Net::ProfileGoals { seq, result } => {
                self.profile.apply_goals(seq, result);
                Vec::new()
            }
            Net::ProfileReviews { seq, result } => {
                self.profile.apply_reviews(seq, result);
                Vec::new()
            }
            Net::ProfileSaved { payload, result } => match result {
                Ok(server) => {
                    if let Some(merged) = self.profile.apply_saved(&payload, &server) {
                        if let Err(err) = self.session.profile_updated(merged) {
                            tracing::warn!("Failed to persist session: {err}");
                        }
                        self.profile.reload_quiet()
                    } else {
                        Vec::new()
                    }
                }
                Err(message) => {
                    self.profile.save_failed(message);
                    Vec::new()
                }
            },
            Net::MutationDone { resource, kind, result } => match resource {
                Resource::Employees => self.employees.on_mutation(kind, result).into_iter().collect(),
                Resource::Goals => self.goals.on_mutation(kind, result),
                Resource::Cycles => self.cycles.on_mutation(kind, result),
                Resource::Reviews => self.reviews.on_mutation(kind, result),
            },
            Net::LoginDone(result) => self.on_login_done(result),
            Net::RegisterDone(result) => {
                self.register.loading = false;
                match result {
                    Ok(envelope) if envelope.is_success() => {
                        self.session.login_failed(); // registration does not authenticate
                        self.register = RegisterView::new();
                        self.login = LoginView::new();
                        self.login.notice =
                            Some("Registration successful! You can now log in.".to_string());
                        self.screen = Screen::Login;
                        Vec::new()
                    }
                    Ok(envelope) => {
                        self.session.login_failed();
                        self.register.fail(envelope.message_or("Registration failed"));
                        Vec::new()
                    }
                    Err(message) => {
                        self.session.login_failed();
                        self.register.fail(message);
                        Vec::new()
                    }
                }
            }
        }
    }

    fn on_login_done(&mut self, result: Result<shared::client::AuthEnvelope, String>) -> Vec<Cmd> {
        self.login.loading = false;
        match result {
            Ok(envelope) => {
                let success = envelope.is_success();
                let fail_message = envelope.message_or("Login failed");
                match (success, envelope.data) {
                    (true, Some(user)) => {
                        if let Err(err) = self.session.login_succeeded(user) {
                            tracing::warn!("Failed to persist session: {err}");
                        }
                        self.login = LoginView::new();
                        self.enter_screen(Screen::Employees)
                    }
                    _ => {
                        self.session.login_failed();
                        self.login.fail(fail_message);
                        Vec::new()
                    }
                }
            }
            Err(message) => {
                self.session.login_failed();
                self.login.fail(message);
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use perf_client::SessionStorage;
    use shared::client::AuthEnvelope;
    use shared::models::{ActiveFlag, Employee};
    use tempfile::TempDir;

    fn anonymous_app(dir: &TempDir) -> App {
        App::new(SessionContext::new(SessionStorage::new(dir.path())))
    }

    fn identity(is_admin: bool) -> Employee {
        Employee {
            id: Some(2),
            emp_code: "EM002".to_string(),
            first_name: "Priya".to_string(),
            last_name: "Singh".to_string(),
            gender: None,
            phone_no: "9876543211".to_string(),
            email: "priya.singh@company.com".to_string(),
            password: None,
            manager_id: None,
            department: "HR".to_string(),
            job_title: "HR Manager".to_string(),
            active: ActiveFlag::Yes,
            hire_date: None,
            is_admin,
        }
    }

    fn envelope(value: serde_json::Value) -> AuthEnvelope {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn failed_login_leaves_session_anonymous_with_server_message() {
        let dir = TempDir::new().unwrap();
        let mut app = anonymous_app(&dir);
        app.session.begin_authentication();

        let cmds = app.on_net(Net::LoginDone(Ok(envelope(
            serde_json::json!({"status": 401, "message": "Invalid credentials"}),
        ))));
        assert!(cmds.is_empty());
        assert!(!app.session.is_authenticated());
        assert_eq!(app.screen, Screen::Login);
        assert_eq!(app.login.error.as_deref(), Some("Invalid credentials"));
    }

    #[test]
    fn login_without_success_signal_uses_default_message() {
        let dir = TempDir::new().unwrap();
        let mut app = anonymous_app(&dir);
        app.session.begin_authentication();

        app.on_net(Net::LoginDone(Ok(envelope(serde_json::json!({})))));
        assert!(!app.session.is_authenticated());
        assert_eq!(app.login.error.as_deref(), Some("Login failed"));
    }

    #[test]
    fn successful_login_persists_session_and_loads_employees() {
        let dir = TempDir::new().unwrap();
        let mut app = anonymous_app(&dir);
        app.session.begin_authentication();

        let cmds = app.on_net(Net::LoginDone(Ok(envelope(serde_json::json!({
            "status": 200,
            "data": {
                "id": 2,
                "first_name": "Priya",
                "last_name": "Singh",
                "email": "priya.singh@company.com",
                "is_admin": true
            }
        })))));
        assert!(app.session.is_authenticated());
        assert!(app.session.storage().exists());
        assert_eq!(app.screen, Screen::Employees);
        assert!(matches!(cmds.as_slice(), [Cmd::LoadEmployees { .. }]));
    }

    #[test]
    fn successful_registration_returns_to_login_unauthenticated() {
        let dir = TempDir::new().unwrap();
        let mut app = anonymous_app(&dir);
        app.screen = Screen::Register;
        app.session.begin_authentication();

        app.on_net(Net::RegisterDone(Ok(envelope(
            serde_json::json!({"success": true}),
        ))));
        assert_eq!(app.screen, Screen::Login);
        assert!(!app.session.is_authenticated());
        assert!(!app.session.storage().exists());
    }

    #[test]
    fn logout_clears_storage_and_returns_to_login() {
        let dir = TempDir::new().unwrap();
        let mut app = anonymous_app(&dir);
        app.session.login_succeeded(identity(false)).unwrap();
        app.screen = Screen::Goals;

        app.logout();
        assert_eq!(app.screen, Screen::Login);
        assert!(!app.session.is_authenticated());
        assert!(!app.session.storage().exists());
    }

    #[test]
    fn restored_session_starts_on_the_employees_screen() {
        let dir = TempDir::new().unwrap();
        SessionStorage::new(dir.path()).save(&identity(false)).unwrap();

        let mut context = SessionContext::new(SessionStorage::new(dir.path()));
        context.restore();
        let mut app = App::new(context);
        assert_eq!(app.screen, Screen::Employees);
        assert!(matches!(app.initial_cmds().as_slice(), [Cmd::LoadEmployees { .. }]));
    }

    #[test]
    fn profile_save_updates_session_identity_and_storage() {
        let dir = TempDir::new().unwrap();
        let mut app = anonymous_app(&dir);
        app.session.login_succeeded(identity(false)).unwrap();
        let user = app.session.user().cloned().unwrap();
        let _ = app.profile.enter(&user);
        app.profile.open_edit();

        let mut payload_form = app.profile.form.as_ref().unwrap().to_payload().unwrap();
        payload_form.department = "People Ops".to_string();

        let cmds = app.on_net(Net::ProfileSaved {
            payload: payload_form,
            result: Ok(serde_json::json!({"job_title": "Head of HR"})),
        });
        // the shell identity follows the merged record
        let held = app.session.user().unwrap();
        assert_eq!(held.department, "People Ops");
        assert_eq!(held.job_title, "Head of HR");
        let stored = app.session.storage().load().unwrap();
        assert_eq!(stored.job_title, "Head of HR");
        assert!(matches!(cmds.as_slice(), [Cmd::LoadProfile { .. }]));
    }
}
