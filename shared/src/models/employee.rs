//! Employee Model

use serde::{Deserialize, Serialize};

/// Gender as the backend stores it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    pub fn label(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
            Gender::Other => "other",
        }
    }
}

/// Active flag, string-valued on the wire ("yes" / "no")
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActiveFlag {
    #[default]
    Yes,
    No,
}

impl ActiveFlag {
    pub fn is_yes(&self) -> bool {
        matches!(self, ActiveFlag::Yes)
    }

    pub fn toggled(&self) -> ActiveFlag {
        match self {
            ActiveFlag::Yes => ActiveFlag::No,
            ActiveFlag::No => ActiveFlag::Yes,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ActiveFlag::Yes => "yes",
            ActiveFlag::No => "no",
        }
    }
}

/// Employee entity as returned by the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Employee {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub emp_code: String,
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub gender: Option<Gender>,
    #[serde(rename = "phoneNo", default)]
    pub phone_no: String,
    pub email: String,
    /// Write-only; normally absent from responses and never redisplayed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    /// Optional self-reference; the backend does no cycle checking
    #[serde(default)]
    pub manager_id: Option<i64>,
    #[serde(default)]
    pub department: String,
    #[serde(default)]
    pub job_title: String,
    #[serde(default)]
    pub active: ActiveFlag,
    /// Server-set on creation
    #[serde(default)]
    pub hire_date: Option<String>,
    /// Elevated-authorization flag (manager/admin identities)
    #[serde(default)]
    pub is_admin: bool,
}

impl Employee {
    /// Display name as cached on goals and reviews at assignment time.
    pub fn display_name(&self) -> String {
        if self.last_name.is_empty() {
            self.first_name.clone()
        } else {
            format!("{} {}", self.first_name, self.last_name)
        }
    }

    /// Merge an update-form payload and the server's update response over
    /// this record. Later sources win field-by-field: payload over local,
    /// server over both. The result is what the session should hold after
    /// a profile save.
    pub fn merged_with(
        &self,
        payload: &EmployeePayload,
        server: &serde_json::Value,
    ) -> Result<Employee, serde_json::Error> {
        let mut merged = serde_json::to_value(self)?;
        overlay(&mut merged, &serde_json::to_value(payload)?);
        overlay(&mut merged, server);
        serde_json::from_value(merged)
    }
}

/// Create/update payload for employees. The password field is omitted
/// from the serialized body when left blank so the backend keeps the
/// current one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmployeePayload {
    pub emp_code: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<Gender>,
    #[serde(rename = "phoneNo")]
    pub phone_no: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manager_id: Option<i64>,
    pub department: String,
    pub job_title: String,
    pub active: ActiveFlag,
}

/// Copy object fields of `patch` over `base`. Keys present in `patch`
/// win, including explicit nulls; absent keys leave `base` untouched.
fn overlay(base: &mut serde_json::Value, patch: &serde_json::Value) {
    if let (Some(base_map), Some(patch_map)) = (base.as_object_mut(), patch.as_object()) {
        for (key, value) in patch_map {
            base_map.insert(key.clone(), value.clone());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Employee {
        Employee {
            id: Some(4),
            emp_code: "EM004".to_string(),
            first_name: "Neha".to_string(),
            last_name: "Desai".to_string(),
            gender: Some(Gender::Female),
            phone_no: "9876543213".to_string(),
            email: "neha.desai@company.com".to_string(),
            password: None,
            manager_id: Some(2),
            department: "Finance".to_string(),
            job_title: "Accountant".to_string(),
            active: ActiveFlag::Yes,
            hire_date: Some("2023-01-10".to_string()),
            is_admin: false,
        }
    }

    #[test]
    fn wire_names_match_backend() {
        let value = serde_json::to_value(sample()).unwrap();
        assert_eq!(value["phoneNo"], "9876543213");
        assert_eq!(value["active"], "yes");
        assert_eq!(value["gender"], "female");
        // blank password must not appear on the wire
        assert!(value.get("password").is_none());
    }

    #[test]
    fn deserializes_sparse_record() {
        let employee: Employee = serde_json::from_value(json!({
            "first_name": "HR",
            "email": "hr@company.com"
        }))
        .unwrap();
        assert_eq!(employee.display_name(), "HR");
        assert!(employee.active.is_yes());
        assert!(!employee.is_admin);
    }

    #[test]
    fn display_name_concatenates_first_and_last() {
        assert_eq!(sample().display_name(), "Neha Desai");
    }

    #[test]
    fn merge_prefers_server_then_payload_then_local() {
        let local = sample();
        let payload = EmployeePayload {
            emp_code: local.emp_code.clone(),
            first_name: "Neha".to_string(),
            last_name: "Desai".to_string(),
            gender: local.gender,
            phone_no: "1112223333".to_string(),
            email: local.email.clone(),
            password: None,
            manager_id: local.manager_id,
            department: "Accounts".to_string(),
            job_title: local.job_title.clone(),
            active: local.active,
        };
        let server = json!({"department": "Finance Ops", "hire_date": "2023-01-10"});

        let merged = local.merged_with(&payload, &server).unwrap();
        // server wins where present
        assert_eq!(merged.department, "Finance Ops");
        // payload wins over local where the server is silent
        assert_eq!(merged.phone_no, "1112223333");
        // local survives where neither says anything
        assert_eq!(merged.id, Some(4));
        assert_eq!(merged.email, "neha.desai@company.com");
    }

    #[test]
    fn merge_ignores_non_object_server_body() {
        let local = sample();
        let payload = EmployeePayload {
            emp_code: local.emp_code.clone(),
            first_name: local.first_name.clone(),
            last_name: local.last_name.clone(),
            gender: local.gender,
            phone_no: local.phone_no.clone(),
            email: local.email.clone(),
            password: None,
            manager_id: local.manager_id,
            department: local.department.clone(),
            job_title: local.job_title.clone(),
            active: local.active,
        };
        let merged = local.merged_with(&payload, &json!("ok")).unwrap();
        assert_eq!(merged.department, "Finance");
    }
}
