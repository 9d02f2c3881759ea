//! Session state and durable session storage
//!
//! The session is an explicit context object owned by the application
//! shell and handed to the components that need identity; nothing else
//! touches durable storage.

use shared::models::Employee;
use std::fs;
use std::path::{Path, PathBuf};

/// Filename of the persisted identity record
pub const SESSION_FILE: &str = "session.json";

/// Where the client is in the login lifecycle
#[derive(Debug, Clone, Default)]
pub enum SessionState {
    /// No identity held
    #[default]
    Anonymous,
    /// Login or registration submitted, awaiting the response
    Authenticating,
    /// Identity held in memory (and mirrored to durable storage)
    Authenticated(Employee),
}

/// In-memory session state machine
#[derive(Debug, Clone, Default)]
pub struct Session {
    state: SessionState,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self.state, SessionState::Authenticated(_))
    }

    pub fn is_authenticating(&self) -> bool {
        matches!(self.state, SessionState::Authenticating)
    }

    /// Current identity, if authenticated
    pub fn user(&self) -> Option<&Employee> {
        match &self.state {
            SessionState::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    /// Anonymous -> Authenticating. A failed attempt must call
    /// [`Session::fail_authentication`] to return to anonymous.
    pub fn begin_authentication(&mut self) {
        if !self.is_authenticated() {
            self.state = SessionState::Authenticating;
        }
    }

    pub fn fail_authentication(&mut self) {
        if self.is_authenticating() {
            self.state = SessionState::Anonymous;
        }
    }

    pub fn set_authenticated(&mut self, user: Employee) {
        self.state = SessionState::Authenticated(user);
    }

    pub fn clear(&mut self) {
        self.state = SessionState::Anonymous;
    }
}

/// Durable storage: one JSON file holding the serialized identity
#[derive(Debug, Clone)]
pub struct SessionStorage {
    path: PathBuf,
}

impl SessionStorage {
    /// Storage rooted at `base_dir`, using the fixed session filename
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        let path = base_dir.into().join(SESSION_FILE);
        Self { path }
    }

    fn ensure_dir(&self) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }

    /// Persist the identity
    pub fn save(&self, user: &Employee) -> std::io::Result<()> {
        self.ensure_dir()?;
        let json = serde_json::to_string_pretty(user)?;
        fs::write(&self.path, json)
    }

    /// Load the stored identity, if any. Unreadable or corrupt files
    /// read as absent.
    pub fn load(&self) -> Option<Employee> {
        if !self.path.exists() {
            return None;
        }
        let json = fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&json) {
            Ok(user) => Some(user),
            Err(err) => {
                tracing::warn!("Ignoring unreadable session file: {err}");
                None
            }
        }
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Remove the stored identity
    pub fn delete(&self) -> std::io::Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)?;
        }
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Explicit session context: in-memory state plus its durable mirror
#[derive(Debug)]
pub struct SessionContext {
    session: Session,
    storage: SessionStorage,
}

impl SessionContext {
    pub fn new(storage: SessionStorage) -> Self {
        Self {
            session: Session::new(),
            storage,
        }
    }

    /// Startup restore: presence of a stored identity is sufficient to
    /// mark the session authenticated. No freshness or server-side
    /// validation is performed; a stale identity is trusted until the
    /// next failing request.
    pub fn restore(&mut self) -> bool {
        match self.storage.load() {
            Some(user) => {
                self.session.set_authenticated(user);
                true
            }
            None => false,
        }
    }

    pub fn begin_authentication(&mut self) {
        self.session.begin_authentication();
    }

    /// Login (or restored registration) succeeded: hold the identity and
    /// mirror it to storage.
    pub fn login_succeeded(&mut self, user: Employee) -> std::io::Result<()> {
        self.storage.save(&user)?;
        self.session.set_authenticated(user);
        Ok(())
    }

    /// Login failed: back to anonymous, storage untouched.
    pub fn login_failed(&mut self) {
        self.session.fail_authentication();
    }

    /// Profile save merged a fresh record; keep memory and storage in
    /// step with what was just saved.
    pub fn profile_updated(&mut self, user: Employee) -> std::io::Result<()> {
        self.storage.save(&user)?;
        self.session.set_authenticated(user);
        Ok(())
    }

    /// Explicit logout: clear memory and remove the stored identity.
    pub fn logout(&mut self) -> std::io::Result<()> {
        self.session.clear();
        self.storage.delete()
    }

    pub fn user(&self) -> Option<&Employee> {
        self.session.user()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn is_authenticating(&self) -> bool {
        self.session.is_authenticating()
    }

    /// Elevated-authorization flag of the current identity
    pub fn is_admin(&self) -> bool {
        self.session.user().map(|user| user.is_admin).unwrap_or(false)
    }

    pub fn storage(&self) -> &SessionStorage {
        &self.storage
    }
}
