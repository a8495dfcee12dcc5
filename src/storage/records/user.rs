use crate::domain::user::{User, UserSummary};
use time::OffsetDateTime;

#[derive(sqlx::FromRow)]
pub(crate) struct UserRecord {
    pub username: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub joined_at: OffsetDateTime,
    pub last_login_at: Option<OffsetDateTime>,
}

impl From<UserRecord> for User {
    fn from(record: UserRecord) -> Self {
        Self {
            username: record.username,
            password_hash: record.password_hash,
            first_name: record.first_name,
            last_name: record.last_name,
            phone: record.phone,
            joined_at: record.joined_at,
            last_login_at: record.last_login_at,
        }
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct UserSummaryRecord {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
}

impl From<UserSummaryRecord> for UserSummary {
    fn from(record: UserSummaryRecord) -> Self {
        Self {
            username: record.username,
            first_name: record.first_name,
            last_name: record.last_name,
            phone: record.phone,
        }
    }
}
