use crate::error::{AppError, Result};
use time::OffsetDateTime;

/// A stored account, including the credential hash. Never serialized directly.
#[derive(Debug, Clone)]
pub struct User {
    pub username: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub joined_at: OffsetDateTime,
    pub last_login_at: Option<OffsetDateTime>,
}

/// Public-facing subset of a user, as embedded in listings and messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserSummary {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
}

impl From<User> for UserSummary {
    fn from(user: User) -> Self {
        Self { username: user.username, first_name: user.first_name, last_name: user.last_name, phone: user.phone }
    }
}

/// Validated registration input. The password is still plaintext here.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
}

impl NewUser {
    /// # Errors
    /// Returns `AppError::BadRequest` if any field is empty.
    pub fn validate(&self) -> Result<()> {
        let fields = [&self.username, &self.password, &self.first_name, &self.last_name, &self.phone];
        if fields.iter().any(|f| f.is_empty()) {
            return Err(AppError::BadRequest("Missing required data".into()));
        }
        Ok(())
    }
}
