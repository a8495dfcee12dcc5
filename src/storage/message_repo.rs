use crate::domain::message::{InboxMessage, Message, MessageDetail, OutboxMessage, ReadReceipt};
use crate::error::Result;
use crate::storage::records::{CounterpartMessageRecord, MessageDetailRecord, MessageRecord, ReadReceiptRecord};
use sqlx::PgConnection;

#[derive(Clone, Debug, Default)]
pub struct MessageRepository {}

impl MessageRepository {
    #[must_use]
    pub const fn new() -> Self {
        Self {}
    }

    /// # Errors
    /// Returns `AppError::Database` if the insert fails.
    pub async fn create(
        &self,
        conn: &mut PgConnection,
        from_username: &str,
        to_username: &str,
        body: &str,
    ) -> Result<Message> {
        let record = sqlx::query_as::<_, MessageRecord>(
            r"
            INSERT INTO messages (from_username, to_username, body, sent_at)
            VALUES ($1, $2, $3, NOW())
            RETURNING id, from_username, to_username, body, sent_at, read_at
            ",
        )
        .bind(from_username)
        .bind(to_username)
        .bind(body)
        .fetch_one(conn)
        .await?;

        Ok(record.into())
    }

    /// # Errors
    /// Returns `AppError::Database` if the query fails.
    pub async fn find_detail(&self, conn: &mut PgConnection, id: i64) -> Result<Option<MessageDetail>> {
        let record = sqlx::query_as::<_, MessageDetailRecord>(
            r"
            SELECT m.id, m.body, m.sent_at, m.read_at,
                   f.username AS from_username, f.first_name AS from_first_name,
                   f.last_name AS from_last_name, f.phone AS from_phone,
                   t.username AS to_username, t.first_name AS to_first_name,
                   t.last_name AS to_last_name, t.phone AS to_phone
            FROM messages AS m
            JOIN users AS f ON f.username = m.from_username
            JOIN users AS t ON t.username = m.to_username
            WHERE m.id = $1
            ",
        )
        .bind(id)
        .fetch_optional(conn)
        .await?;

        Ok(record.map(Into::into))
    }

    /// # Errors
    /// Returns `AppError::Database` if the query fails.
    pub async fn fetch_to(&self, conn: &mut PgConnection, to_username: &str) -> Result<Vec<InboxMessage>> {
        let records = sqlx::query_as::<_, CounterpartMessageRecord>(
            r"
            SELECT m.id, m.body, m.sent_at, m.read_at,
                   u.username, u.first_name, u.last_name, u.phone
            FROM messages AS m
            JOIN users AS u ON u.username = m.from_username
            WHERE m.to_username = $1
            ORDER BY m.id
            ",
        )
        .bind(to_username)
        .fetch_all(conn)
        .await?;

        Ok(records.into_iter().map(Into::into).collect())
    }

    /// # Errors
    /// Returns `AppError::Database` if the query fails.
    pub async fn fetch_from(&self, conn: &mut PgConnection, from_username: &str) -> Result<Vec<OutboxMessage>> {
        let records = sqlx::query_as::<_, CounterpartMessageRecord>(
            r"
            SELECT m.id, m.body, m.sent_at, m.read_at,
                   u.username, u.first_name, u.last_name, u.phone
            FROM messages AS m
            JOIN users AS u ON u.username = m.to_username
            WHERE m.from_username = $1
            ORDER BY m.id
            ",
        )
        .bind(from_username)
        .fetch_all(conn)
        .await?;

        Ok(records.into_iter().map(Into::into).collect())
    }

    /// Sets `read_at` if it is still unset. An existing timestamp is kept as is.
    ///
    /// # Errors
    /// Returns `AppError::Database` if the update fails.
    pub async fn mark_read(&self, conn: &mut PgConnection, id: i64) -> Result<Option<ReadReceipt>> {
        let record = sqlx::query_as::<_, ReadReceiptRecord>(
            r"
            UPDATE messages
            SET read_at = COALESCE(read_at, NOW())
            WHERE id = $1
            RETURNING id, read_at
            ",
        )
        .bind(id)
        .fetch_optional(conn)
        .await?;

        Ok(record.map(Into::into))
    }
}
