// perf-client/tests/client_integration.rs

use perf_client::{ClientConfig, SessionContext, SessionStorage};
use shared::models::{ActiveFlag, Employee};
use tempfile::TempDir;

fn sample_user(is_admin: bool) -> Employee {
    Employee {
        id: Some(6),
        emp_code: "EM006".to_string(),
        first_name: "HR".to_string(),
        last_name: "Admin".to_string(),
        gender: None,
        phone_no: "9876543215".to_string(),
        email: "hr.admin@company.com".to_string(),
        password: None,
        manager_id: None,
        department: "HR".to_string(),
        job_title: "HR Administrator".to_string(),
        active: ActiveFlag::Yes,
        hire_date: None,
        is_admin,
    }
}

#[test]
fn session_storage_round_trip() {
    let temp_dir = TempDir::new().unwrap();
    let storage = SessionStorage::new(temp_dir.path());

    assert!(!storage.exists());
    assert!(storage.load().is_none());

    storage.save(&sample_user(true)).unwrap();
    assert!(storage.exists());

    let loaded = storage.load().unwrap();
    assert_eq!(loaded.email, "hr.admin@company.com");
    assert!(loaded.is_admin);

    storage.delete().unwrap();
    assert!(!storage.exists());
    assert!(storage.load().is_none());
}

#[test]
fn session_storage_tolerates_corrupt_file() {
    let temp_dir = TempDir::new().unwrap();
    let storage = SessionStorage::new(temp_dir.path());
    std::fs::write(storage.path(), "not json").unwrap();
    assert!(storage.load().is_none());
}

#[test]
fn context_restores_stored_identity_without_validation() {
    let temp_dir = TempDir::new().unwrap();
    SessionStorage::new(temp_dir.path()).save(&sample_user(false)).unwrap();

    let mut context = SessionContext::new(SessionStorage::new(temp_dir.path()));
    assert!(context.restore());
    assert!(context.is_authenticated());
    assert_eq!(context.user().unwrap().id, Some(6));
    assert!(!context.is_admin());
}

#[test]
fn context_login_lifecycle() {
    let temp_dir = TempDir::new().unwrap();
    let mut context = SessionContext::new(SessionStorage::new(temp_dir.path()));

    assert!(!context.restore());
    context.begin_authentication();
    assert!(context.is_authenticating());

    // a failed attempt returns to anonymous without touching storage
    context.login_failed();
    assert!(!context.is_authenticated());
    assert!(!context.storage().exists());

    context.begin_authentication();
    context.login_succeeded(sample_user(true)).unwrap();
    assert!(context.is_authenticated());
    assert!(context.is_admin());
    assert!(context.storage().exists());

    context.logout().unwrap();
    assert!(!context.is_authenticated());
    assert!(!context.storage().exists());
}

#[test]
fn profile_update_rewrites_storage() {
    let temp_dir = TempDir::new().unwrap();
    let mut context = SessionContext::new(SessionStorage::new(temp_dir.path()));
    context.login_succeeded(sample_user(false)).unwrap();

    let mut updated = sample_user(false);
    updated.department = "People Ops".to_string();
    context.profile_updated(updated).unwrap();

    assert_eq!(context.user().unwrap().department, "People Ops");
    let on_disk = context.storage().load().unwrap();
    assert_eq!(on_disk.department, "People Ops");
}

#[test]
fn client_config_builder() {
    let config = ClientConfig::new("http://localhost:9090").with_timeout(5);
    assert_eq!(config.base_url, "http://localhost:9090");
    assert_eq!(config.timeout, 5);

    let client = config.build_http_client();
    assert_eq!(client.base_url(), "http://localhost:9090");
}
