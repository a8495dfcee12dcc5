use crate::domain::message::{InboxMessage, Message, MessageDetail, OutboxMessage, ReadReceipt};
use crate::domain::user::UserSummary;
use time::OffsetDateTime;

#[derive(sqlx::FromRow)]
pub(crate) struct MessageRecord {
    pub id: i64,
    pub from_username: String,
    pub to_username: String,
    pub body: String,
    pub sent_at: OffsetDateTime,
    pub read_at: Option<OffsetDateTime>,
}

impl From<MessageRecord> for Message {
    fn from(record: MessageRecord) -> Self {
        Self {
            id: record.id,
            from_username: record.from_username,
            to_username: record.to_username,
            body: record.body,
            sent_at: record.sent_at,
            read_at: record.read_at,
        }
    }
}

/// Message joined against both participants; columns are prefixed `from_` / `to_`.
#[derive(sqlx::FromRow)]
pub(crate) struct MessageDetailRecord {
    pub id: i64,
    pub body: String,
    pub sent_at: OffsetDateTime,
    pub read_at: Option<OffsetDateTime>,
    pub from_username: String,
    pub from_first_name: String,
    pub from_last_name: String,
    pub from_phone: String,
    pub to_username: String,
    pub to_first_name: String,
    pub to_last_name: String,
    pub to_phone: String,
}

impl From<MessageDetailRecord> for MessageDetail {
    fn from(record: MessageDetailRecord) -> Self {
        Self {
            id: record.id,
            body: record.body,
            sent_at: record.sent_at,
            read_at: record.read_at,
            from_user: UserSummary {
                username: record.from_username,
                first_name: record.from_first_name,
                last_name: record.from_last_name,
                phone: record.from_phone,
            },
            to_user: UserSummary {
                username: record.to_username,
                first_name: record.to_first_name,
                last_name: record.to_last_name,
                phone: record.to_phone,
            },
        }
    }
}

/// Message joined against the other party. Shared by inbox and outbox queries.
#[derive(sqlx::FromRow)]
pub(crate) struct CounterpartMessageRecord {
    pub id: i64,
    pub body: String,
    pub sent_at: OffsetDateTime,
    pub read_at: Option<OffsetDateTime>,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
}

impl CounterpartMessageRecord {
    fn into_parts(self) -> (i64, String, OffsetDateTime, Option<OffsetDateTime>, UserSummary) {
        let counterpart = UserSummary {
            username: self.username,
            first_name: self.first_name,
            last_name: self.last_name,
            phone: self.phone,
        };
        (self.id, self.body, self.sent_at, self.read_at, counterpart)
    }
}

impl From<CounterpartMessageRecord> for InboxMessage {
    fn from(record: CounterpartMessageRecord) -> Self {
        let (id, body, sent_at, read_at, from_user) = record.into_parts();
        Self { id, body, sent_at, read_at, from_user }
    }
}

impl From<CounterpartMessageRecord> for OutboxMessage {
    fn from(record: CounterpartMessageRecord) -> Self {
        let (id, body, sent_at, read_at, to_user) = record.into_parts();
        Self { id, body, sent_at, read_at, to_user }
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct ReadReceiptRecord {
    pub id: i64,
    pub read_at: OffsetDateTime,
}

impl From<ReadReceiptRecord> for ReadReceipt {
    fn from(record: ReadReceiptRecord) -> Self {
        Self { id: record.id, read_at: record.read_at }
    }
}
