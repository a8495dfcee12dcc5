use crate::domain::access;
use crate::domain::auth::Identity;
use crate::domain::message::{InboxMessage, OutboxMessage};
use crate::domain::user::{User, UserSummary};
use crate::error::{AppError, Result};
use crate::storage::DbPool;
use crate::storage::message_repo::MessageRepository;
use crate::storage::user_repo::UserRepository;

#[derive(Clone, Debug)]
pub struct UserService {
    pool: DbPool,
    user_repo: UserRepository,
    message_repo: MessageRepository,
}

impl UserService {
    #[must_use]
    pub const fn new(pool: DbPool, user_repo: UserRepository, message_repo: MessageRepository) -> Self {
        Self { pool, user_repo, message_repo }
    }

    /// # Errors
    /// Returns `AppError::Database` if the query fails.
    #[tracing::instrument(skip(self, caller), fields(caller = %caller.username()), err(level = "warn"))]
    pub async fn list(&self, caller: &Identity) -> Result<Vec<UserSummary>> {
        let mut conn = self.pool.acquire().await?;
        self.user_repo.list_all(&mut conn).await
    }

    /// Full profile, only for the user themself.
    ///
    /// # Errors
    /// Returns `AppError::Unauthorized` for anyone but `username`.
    #[tracing::instrument(skip(self, caller), fields(caller = %caller.username()), err(level = "warn"))]
    pub async fn profile(&self, caller: &Identity, username: &str) -> Result<User> {
        access::ensure_self(caller, username)?;

        let mut conn = self.pool.acquire().await?;
        self.user_repo
            .find_by_username(&mut conn, username)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("No such user: {username}")))
    }

    /// # Errors
    /// Returns `AppError::Unauthorized` for anyone but `username`.
    #[tracing::instrument(skip(self, caller), fields(caller = %caller.username()), err(level = "warn"))]
    pub async fn messages_to(&self, caller: &Identity, username: &str) -> Result<Vec<InboxMessage>> {
        access::ensure_self(caller, username)?;

        let mut conn = self.pool.acquire().await?;
        self.message_repo.fetch_to(&mut conn, username).await
    }

    /// # Errors
    /// Returns `AppError::Unauthorized` for anyone but `username`.
    #[tracing::instrument(skip(self, caller), fields(caller = %caller.username()), err(level = "warn"))]
    pub async fn messages_from(&self, caller: &Identity, username: &str) -> Result<Vec<OutboxMessage>> {
        access::ensure_self(caller, username)?;

        let mut conn = self.pool.acquire().await?;
        self.message_repo.fetch_from(&mut conn, username).await
    }
}
