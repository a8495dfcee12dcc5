use crate::api::schemas::present;
use crate::domain::user::NewUser;
use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Deserialize)]
pub struct Login {
    pub username: Option<String>,
    pub password: Option<String>,
}

impl Login {
    /// # Errors
    /// Returns `AppError::BadRequest` unless both fields are present.
    pub fn into_credentials(self) -> Result<(String, String)> {
        match (present(self.username), present(self.password)) {
            (Some(username), Some(password)) => Ok((username, password)),
            _ => Err(AppError::BadRequest("Username and password required".into())),
        }
    }
}

impl fmt::Debug for Login {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Login").field("username", &self.username).finish_non_exhaustive()
    }
}

#[derive(Deserialize)]
pub struct Registration {
    pub username: Option<String>,
    pub password: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub phone: Option<String>,
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration").field("username", &self.username).finish_non_exhaustive()
    }
}

impl TryFrom<Registration> for NewUser {
    type Error = AppError;

    fn try_from(payload: Registration) -> Result<Self> {
        let missing = || AppError::BadRequest("Missing required data".into());
        Ok(Self {
            username: present(payload.username).ok_or_else(missing)?,
            password: present(payload.password).ok_or_else(missing)?,
            first_name: present(payload.first_name).ok_or_else(missing)?,
            last_name: present(payload.last_name).ok_or_else(missing)?,
            phone: present(payload.phone).ok_or_else(missing)?,
        })
    }
}

#[derive(Debug, Serialize)]
pub struct Token {
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_login_requires_both_fields() {
        let login: Login = serde_json::from_value(json!({"username": "u1"})).unwrap();
        assert!(matches!(login.into_credentials(), Err(AppError::BadRequest(_))));

        let login: Login = serde_json::from_value(json!({"username": "u1", "password": ""})).unwrap();
        assert!(matches!(login.into_credentials(), Err(AppError::BadRequest(_))));

        let login: Login = serde_json::from_value(json!({"username": "u1", "password": "pw"})).unwrap();
        assert_eq!(login.into_credentials().unwrap(), ("u1".to_string(), "pw".to_string()));
    }

    #[test]
    fn test_registration_missing_any_field() {
        let full = json!({
            "username": "u1",
            "password": "pw",
            "first_name": "Ada",
            "last_name": "Lovelace",
            "phone": "555-0100"
        });

        let registration: Registration = serde_json::from_value(full.clone()).unwrap();
        assert!(NewUser::try_from(registration).is_ok());

        for field in ["username", "password", "first_name", "last_name", "phone"] {
            let mut payload = full.clone();
            payload.as_object_mut().unwrap().remove(field);
            let registration: Registration = serde_json::from_value(payload).unwrap();
            assert!(
                matches!(NewUser::try_from(registration), Err(AppError::BadRequest(_))),
                "missing {field} should be rejected"
            );
        }
    }

    #[test]
    fn test_debug_hides_password() {
        let login: Login = serde_json::from_value(json!({"username": "u1", "password": "hunter2"})).unwrap();
        assert!(!format!("{login:?}").contains("hunter2"));
    }
}
