use crate::api::schemas::present;
use crate::api::schemas::users::UserSummary;
use crate::domain;
use crate::error::{AppError, Result};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Deserialize)]
pub struct SendMessage {
    pub to_username: Option<String>,
    pub body: Option<String>,
}

impl SendMessage {
    /// # Errors
    /// Returns `AppError::BadRequest` unless both fields are present.
    pub fn into_parts(self) -> Result<(String, String)> {
        match (present(self.to_username), present(self.body)) {
            (Some(to_username), Some(body)) => Ok((to_username, body)),
            _ => Err(AppError::BadRequest("Missing required data".into())),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageEnvelope<T> {
    pub message: T,
}

#[derive(Debug, Serialize)]
pub struct MessageDetail {
    pub id: i64,
    pub body: String,
    #[serde(with = "time::serde::rfc3339")]
    pub sent_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub read_at: Option<OffsetDateTime>,
    pub from_user: UserSummary,
    pub to_user: UserSummary,
}

impl From<domain::message::MessageDetail> for MessageDetail {
    fn from(m: domain::message::MessageDetail) -> Self {
        Self {
            id: m.id,
            body: m.body,
            sent_at: m.sent_at,
            read_at: m.read_at,
            from_user: m.from_user.into(),
            to_user: m.to_user.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SentMessage {
    pub id: i64,
    pub from_username: String,
    pub to_username: String,
    pub body: String,
    #[serde(with = "time::serde::rfc3339")]
    pub sent_at: OffsetDateTime,
}

impl From<domain::message::Message> for SentMessage {
    fn from(m: domain::message::Message) -> Self {
        Self { id: m.id, from_username: m.from_username, to_username: m.to_username, body: m.body, sent_at: m.sent_at }
    }
}

#[derive(Debug, Serialize)]
pub struct ReadReceipt {
    pub id: i64,
    #[serde(with = "time::serde::rfc3339")]
    pub read_at: OffsetDateTime,
}

impl From<domain::message::ReadReceipt> for ReadReceipt {
    fn from(r: domain::message::ReadReceipt) -> Self {
        Self { id: r.id, read_at: r.read_at }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_send_message_requires_recipient_and_body() {
        let payload: SendMessage = serde_json::from_value(json!({"body": "hi"})).unwrap();
        assert!(matches!(payload.into_parts(), Err(AppError::BadRequest(_))));

        let payload: SendMessage = serde_json::from_value(json!({"to_username": "u2", "body": ""})).unwrap();
        assert!(matches!(payload.into_parts(), Err(AppError::BadRequest(_))));

        let payload: SendMessage = serde_json::from_value(json!({"to_username": "u2", "body": "hi"})).unwrap();
        assert_eq!(payload.into_parts().unwrap(), ("u2".to_string(), "hi".to_string()));
    }

    #[test]
    fn test_unread_message_serializes_null_read_at() {
        let detail = MessageDetail {
            id: 7,
            body: "hi".to_string(),
            sent_at: OffsetDateTime::UNIX_EPOCH,
            read_at: None,
            from_user: UserSummary {
                username: "u1".into(),
                first_name: "A".into(),
                last_name: "B".into(),
                phone: "1".into(),
            },
            to_user: UserSummary {
                username: "u2".into(),
                first_name: "C".into(),
                last_name: "D".into(),
                phone: "2".into(),
            },
        };

        let value = serde_json::to_value(MessageEnvelope { message: detail }).unwrap();
        assert_eq!(value["message"]["id"], 7);
        assert!(value["message"]["read_at"].is_null());
        assert_eq!(value["message"]["sent_at"], "1970-01-01T00:00:00Z");
        assert_eq!(value["message"]["from_user"]["username"], "u1");
        assert_eq!(value["message"]["to_user"]["username"], "u2");
    }
}
