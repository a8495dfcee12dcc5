use crate::domain;
use serde::Serialize;
use time::OffsetDateTime;

#[derive(Debug, Serialize)]
pub struct UserSummary {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
}

impl From<domain::user::UserSummary> for UserSummary {
    fn from(user: domain::user::UserSummary) -> Self {
        Self { username: user.username, first_name: user.first_name, last_name: user.last_name, phone: user.phone }
    }
}

#[derive(Debug, Serialize)]
pub struct UserProfile {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    #[serde(with = "time::serde::rfc3339")]
    pub joined_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub last_login_at: Option<OffsetDateTime>,
}

impl From<domain::user::User> for UserProfile {
    fn from(user: domain::user::User) -> Self {
        Self {
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
            phone: user.phone,
            joined_at: user.joined_at,
            last_login_at: user.last_login_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UserList {
    pub users: Vec<UserSummary>,
}

#[derive(Debug, Serialize)]
pub struct UserEnvelope {
    pub user: UserProfile,
}

#[derive(Debug, Serialize)]
pub struct InboxMessage {
    pub id: i64,
    pub body: String,
    #[serde(with = "time::serde::rfc3339")]
    pub sent_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub read_at: Option<OffsetDateTime>,
    pub from_user: UserSummary,
}

impl From<domain::message::InboxMessage> for InboxMessage {
    fn from(m: domain::message::InboxMessage) -> Self {
        Self { id: m.id, body: m.body, sent_at: m.sent_at, read_at: m.read_at, from_user: m.from_user.into() }
    }
}

#[derive(Debug, Serialize)]
pub struct OutboxMessage {
    pub id: i64,
    pub body: String,
    #[serde(with = "time::serde::rfc3339")]
    pub sent_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub read_at: Option<OffsetDateTime>,
    pub to_user: UserSummary,
}

impl From<domain::message::OutboxMessage> for OutboxMessage {
    fn from(m: domain::message::OutboxMessage) -> Self {
        Self { id: m.id, body: m.body, sent_at: m.sent_at, read_at: m.read_at, to_user: m.to_user.into() }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageList<T> {
    pub messages: Vec<T>,
}
