use crate::domain::user::{User, UserSummary};
use crate::error::{AppError, Result};
use crate::storage::records::{UserRecord, UserSummaryRecord};
use sqlx::PgConnection;
use time::OffsetDateTime;

#[derive(Clone, Debug, Default)]
pub struct UserRepository {}

impl UserRepository {
    #[must_use]
    pub const fn new() -> Self {
        Self {}
    }

    /// Inserts a new user with an already-hashed password.
    ///
    /// # Errors
    /// Returns `AppError::Conflict` if the username is taken.
    /// Returns `AppError::Database` for any other database failure.
    pub async fn create(
        &self,
        conn: &mut PgConnection,
        username: &str,
        password_hash: &str,
        first_name: &str,
        last_name: &str,
        phone: &str,
    ) -> Result<User> {
        let res = sqlx::query_as::<_, UserRecord>(
            r"
            INSERT INTO users (username, password_hash, first_name, last_name, phone, joined_at, last_login_at)
            VALUES ($1, $2, $3, $4, $5, NOW(), NOW())
            RETURNING username, password_hash, first_name, last_name, phone, joined_at, last_login_at
            ",
        )
        .bind(username)
        .bind(password_hash)
        .bind(first_name)
        .bind(last_name)
        .bind(phone)
        .fetch_one(conn)
        .await;

        match res {
            Ok(record) => Ok(record.into()),
            Err(sqlx::Error::Database(e)) if e.is_unique_violation() => {
                Err(AppError::Conflict("Username already exists".into()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// # Errors
    /// Returns `AppError::Database` if the query fails.
    pub async fn find_by_username(&self, conn: &mut PgConnection, username: &str) -> Result<Option<User>> {
        let record = sqlx::query_as::<_, UserRecord>(
            r"
            SELECT username, password_hash, first_name, last_name, phone, joined_at, last_login_at
            FROM users
            WHERE username = $1
            ",
        )
        .bind(username)
        .fetch_optional(conn)
        .await?;

        Ok(record.map(Into::into))
    }

    /// # Errors
    /// Returns `AppError::Database` if the query fails.
    pub async fn exists(&self, conn: &mut PgConnection, username: &str) -> Result<bool> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)")
            .bind(username)
            .fetch_one(conn)
            .await?;

        Ok(exists)
    }

    /// # Errors
    /// Returns `AppError::Database` if the query fails.
    pub async fn list_all(&self, conn: &mut PgConnection) -> Result<Vec<UserSummary>> {
        let records = sqlx::query_as::<_, UserSummaryRecord>(
            r"
            SELECT username, first_name, last_name, phone
            FROM users
            ORDER BY username
            ",
        )
        .fetch_all(conn)
        .await?;

        Ok(records.into_iter().map(Into::into).collect())
    }

    /// Stamps `last_login_at` with the current time and returns the stored value.
    /// The stored value never moves backwards, even if the database clock does.
    ///
    /// # Errors
    /// Returns `AppError::NotFound` if the user does not exist.
    /// Returns `AppError::Database` if the query fails.
    pub async fn touch_last_login(&self, conn: &mut PgConnection, username: &str) -> Result<OffsetDateTime> {
        let stamped: Option<OffsetDateTime> = sqlx::query_scalar(
            r"
            UPDATE users
            SET last_login_at = GREATEST(NOW(), COALESCE(last_login_at, NOW()))
            WHERE username = $1
            RETURNING last_login_at
            ",
        )
        .bind(username)
        .fetch_optional(conn)
        .await?;

        stamped.ok_or_else(|| AppError::NotFound(format!("No such user: {username}")))
    }
}
