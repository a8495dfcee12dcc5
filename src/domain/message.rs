use crate::domain::user::UserSummary;
use time::OffsetDateTime;

/// A message row as created. `read_at` moves from `None` to `Some` once and stays there.
#[derive(Debug, Clone)]
pub struct Message {
    pub id: i64,
    pub from_username: String,
    pub to_username: String,
    pub body: String,
    pub sent_at: OffsetDateTime,
    pub read_at: Option<OffsetDateTime>,
}

/// A message with both participants resolved.
#[derive(Debug, Clone)]
pub struct MessageDetail {
    pub id: i64,
    pub body: String,
    pub sent_at: OffsetDateTime,
    pub read_at: Option<OffsetDateTime>,
    pub from_user: UserSummary,
    pub to_user: UserSummary,
}

/// A message in someone's inbox, annotated with its sender.
#[derive(Debug, Clone)]
pub struct InboxMessage {
    pub id: i64,
    pub body: String,
    pub sent_at: OffsetDateTime,
    pub read_at: Option<OffsetDateTime>,
    pub from_user: UserSummary,
}

/// A message someone sent, annotated with its recipient.
#[derive(Debug, Clone)]
pub struct OutboxMessage {
    pub id: i64,
    pub body: String,
    pub sent_at: OffsetDateTime,
    pub read_at: Option<OffsetDateTime>,
    pub to_user: UserSummary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadReceipt {
    pub id: i64,
    pub read_at: OffsetDateTime,
}
