use crate::domain::access;
use crate::domain::auth::Identity;
use crate::domain::message::{Message, MessageDetail, ReadReceipt};
use crate::error::{AppError, Result};
use crate::storage::DbPool;
use crate::storage::message_repo::MessageRepository;
use crate::storage::user_repo::UserRepository;
use opentelemetry::{global, metrics::Counter};
use sqlx::PgConnection;

#[derive(Clone, Debug)]
struct Metrics {
    sent_total: Counter<u64>,
    read_total: Counter<u64>,
}

impl Metrics {
    fn new() -> Self {
        let meter = global::meter("messagely-server");
        Self {
            sent_total: meter
                .u64_counter("messagely_messages_sent_total")
                .with_description("Total messages successfully sent")
                .build(),
            read_total: meter
                .u64_counter("messagely_messages_read_total")
                .with_description("Total messages marked read for the first time")
                .build(),
        }
    }
}

#[derive(Clone, Debug)]
pub struct MessageService {
    pool: DbPool,
    repo: MessageRepository,
    user_repo: UserRepository,
    metrics: Metrics,
}

impl MessageService {
    #[must_use]
    pub fn new(pool: DbPool, repo: MessageRepository, user_repo: UserRepository) -> Self {
        Self { pool, repo, user_repo, metrics: Metrics::new() }
    }

    async fn load(&self, conn: &mut PgConnection, id: i64) -> Result<MessageDetail> {
        self.repo.find_detail(conn, id).await?.ok_or_else(|| AppError::NotFound("No such message".into()))
    }

    /// Visible only to the sender and the recipient.
    ///
    /// # Errors
    /// Returns `AppError::NotFound` for an unknown id and `AppError::Unauthorized`
    /// for anyone outside the conversation.
    #[tracing::instrument(skip(self, caller), fields(caller = %caller.username()), err(level = "warn"))]
    pub async fn get(&self, caller: &Identity, id: i64) -> Result<MessageDetail> {
        let mut conn = self.pool.acquire().await?;
        let message = self.load(&mut conn, id).await?;
        access::ensure_participant(caller, &message)?;
        Ok(message)
    }

    /// Sends `body` from the caller to `to_username`.
    ///
    /// # Errors
    /// Returns `AppError::BadRequest` for an empty field or an unknown recipient.
    #[tracing::instrument(skip(self, caller, body), fields(caller = %caller.username()), err(level = "warn"))]
    pub async fn send(&self, caller: &Identity, to_username: &str, body: &str) -> Result<Message> {
        if to_username.is_empty() || body.is_empty() {
            return Err(AppError::BadRequest("Missing required data".into()));
        }

        let mut conn = self.pool.acquire().await?;
        if !self.user_repo.exists(&mut conn, to_username).await? {
            return Err(AppError::BadRequest("Unknown recipient".into()));
        }

        let message = self.repo.create(&mut conn, caller.username(), to_username, body).await?;

        tracing::debug!(message_id = message.id, "Message sent");
        self.metrics.sent_total.add(1, &[]);
        Ok(message)
    }

    /// Marks the message read. Only the recipient may do this; the first
    /// read timestamp is kept on repeated calls.
    ///
    /// # Errors
    /// Returns `AppError::NotFound` for an unknown id and `AppError::Unauthorized`
    /// for anyone but the recipient.
    #[tracing::instrument(skip(self, caller), fields(caller = %caller.username()), err(level = "warn"))]
    pub async fn mark_read(&self, caller: &Identity, id: i64) -> Result<ReadReceipt> {
        let mut conn = self.pool.acquire().await?;
        let message = self.load(&mut conn, id).await?;
        access::ensure_recipient(caller, &message)?;

        let receipt =
            self.repo.mark_read(&mut conn, id).await?.ok_or_else(|| AppError::NotFound("No such message".into()))?;

        if message.read_at.is_none() {
            self.metrics.read_total.add(1, &[]);
        }
        Ok(receipt)
    }
}
