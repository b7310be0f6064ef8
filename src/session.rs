use rand::Rng;

use crate::error::{PerdiemError, Result};
use crate::models::{generate_id, User};
use crate::storage::KvStore;

const SESSION_KEY: &str = "session";

/// Credential verification seam. The shipped implementation is a mock; a
/// real backend slots in here without touching the rest of the system.
pub trait Authenticator {
    fn login(&self, email: &str, password: &str) -> Result<User>;
    fn register(&self, name: &str, email: &str, password: &str) -> Result<User>;
}

/// Accepts any well-formed email with a non-empty password and fabricates a
/// profile, the way the mocked backend did.
pub struct MockAuthenticator;

fn check_email(email: &str) -> Result<()> {
    if !email.contains('@') || email.starts_with('@') {
        return Err(PerdiemError::InvalidCredentials(format!(
            "'{email}' is not an email address"
        )));
    }
    Ok(())
}

fn check_password(password: &str) -> Result<()> {
    if password.is_empty() {
        return Err(PerdiemError::InvalidCredentials(
            "password must not be empty".to_string(),
        ));
    }
    Ok(())
}

fn mock_employee_id() -> String {
    format!("EMP{}", rand::thread_rng().gen_range(10000..100000))
}

impl Authenticator for MockAuthenticator {
    fn login(&self, email: &str, password: &str) -> Result<User> {
        check_email(email)?;
        check_password(password)?;
        let name = email.split('@').next().unwrap_or(email).to_string();
        Ok(User {
            id: generate_id(),
            email: email.to_string(),
            name,
            position: None,
            department: None,
            employee_id: Some(mock_employee_id()),
            phone_number: None,
        })
    }

    fn register(&self, name: &str, email: &str, password: &str) -> Result<User> {
        check_email(email)?;
        check_password(password)?;
        if name.trim().is_empty() {
            return Err(PerdiemError::InvalidCredentials(
                "name must not be empty".to_string(),
            ));
        }
        Ok(User {
            id: generate_id(),
            email: email.to_string(),
            name: name.trim().to_string(),
            position: None,
            department: None,
            employee_id: Some(mock_employee_id()),
            phone_number: None,
        })
    }
}

/// Update payload for the stored profile; `None` fields are retained.
#[derive(Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub position: Option<String>,
    pub department: Option<String>,
    pub employee_id: Option<String>,
    pub phone_number: Option<String>,
}

pub fn current_user(kv: &dyn KvStore) -> Option<User> {
    kv.get(SESSION_KEY)
        .and_then(|raw| serde_json::from_str(&raw).ok())
}

/// Like [`current_user`] but maps an absent session to a typed error.
pub fn require_user(kv: &dyn KvStore) -> Result<User> {
    current_user(kv).ok_or(PerdiemError::NotAuthenticated)
}

pub fn save_session(kv: &dyn KvStore, user: &User) -> Result<()> {
    let json = serde_json::to_string_pretty(user)?;
    kv.set(SESSION_KEY, &json)
}

/// Removes only the session; persisted trip data stays on disk.
pub fn clear_session(kv: &dyn KvStore) -> Result<()> {
    kv.remove(SESSION_KEY)
}

pub fn update_profile(kv: &dyn KvStore, update: ProfileUpdate) -> Result<User> {
    let mut user = require_user(kv)?;
    if let Some(name) = update.name {
        user.name = name;
    }
    if let Some(position) = update.position {
        user.position = Some(position);
    }
    if let Some(department) = update.department {
        user.department = Some(department);
    }
    if let Some(employee_id) = update.employee_id {
        user.employee_id = Some(employee_id);
    }
    if let Some(phone_number) = update.phone_number {
        user.phone_number = Some(phone_number);
    }
    save_session(kv, &user)?;
    Ok(user)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryKv;

    #[test]
    fn test_mock_login_builds_profile_from_email() {
        let user = MockAuthenticator.login("carol@example.com", "hunter2").unwrap();
        assert_eq!(user.name, "carol");
        assert_eq!(user.email, "carol@example.com");
        let emp = user.employee_id.unwrap();
        assert!(emp.starts_with("EMP") && emp.len() == 8, "got: {emp}");
    }

    #[test]
    fn test_mock_login_rejects_bad_credentials() {
        assert!(MockAuthenticator.login("not-an-email", "pw").is_err());
        assert!(MockAuthenticator.login("a@b.com", "").is_err());
        assert!(MockAuthenticator.register("", "a@b.com", "pw").is_err());
    }

    #[test]
    fn test_session_round_trip_and_clear() {
        let kv = MemoryKv::new();
        assert!(current_user(&kv).is_none());
        assert!(matches!(require_user(&kv), Err(PerdiemError::NotAuthenticated)));

        let user = MockAuthenticator.register("Dana", "dana@example.com", "pw").unwrap();
        save_session(&kv, &user).unwrap();
        assert_eq!(current_user(&kv).unwrap(), user);

        clear_session(&kv).unwrap();
        assert!(current_user(&kv).is_none());
    }

    #[test]
    fn test_logout_leaves_trip_data() {
        let kv = MemoryKv::new();
        let user = MockAuthenticator.login("e@example.com", "pw").unwrap();
        save_session(&kv, &user).unwrap();
        kv.set(&format!("trips-{}", user.id), "[]").unwrap();
        clear_session(&kv).unwrap();
        assert!(kv.get(&format!("trips-{}", user.id)).is_some());
    }

    #[test]
    fn test_update_profile_merges_fields() {
        let kv = MemoryKv::new();
        let user = MockAuthenticator.login("f@example.com", "pw").unwrap();
        save_session(&kv, &user).unwrap();
        let updated = update_profile(
            &kv,
            ProfileUpdate {
                position: Some("Engineer".to_string()),
                ..ProfileUpdate::default()
            },
        )
        .unwrap();
        assert_eq!(updated.position.as_deref(), Some("Engineer"));
        assert_eq!(updated.name, "f");
        assert_eq!(current_user(&kv).unwrap(), updated);
    }

    #[test]
    fn test_update_profile_requires_session() {
        let kv = MemoryKv::new();
        let err = update_profile(&kv, ProfileUpdate::default());
        assert!(matches!(err, Err(PerdiemError::NotAuthenticated)));
    }
}
