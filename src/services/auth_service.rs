use crate::config::AuthConfig;
use crate::domain::auth::{Claims, Identity};
use crate::domain::user::{NewUser, User};
use crate::error::{AppError, Result};
use crate::storage::DbPool;
use crate::storage::user_repo::UserRepository;
use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
};
use opentelemetry::{global, metrics::Counter};
use rand::rngs::OsRng;
use time::OffsetDateTime;

#[derive(Clone, Debug)]
struct Metrics {
    logins_total: Counter<u64>,
    login_failures_total: Counter<u64>,
    users_registered_total: Counter<u64>,
}

impl Metrics {
    fn new() -> Self {
        let meter = global::meter("messagely-server");
        Self {
            logins_total: meter
                .u64_counter("messagely_logins_total")
                .with_description("Total number of successful logins")
                .build(),
            login_failures_total: meter
                .u64_counter("messagely_login_failures_total")
                .with_description("Total number of rejected login attempts")
                .build(),
            users_registered_total: meter
                .u64_counter("messagely_users_registered_total")
                .with_description("Total number of successful user registrations")
                .build(),
        }
    }
}

/// Verifies credentials, registers users and issues identity tokens.
#[derive(Clone, Debug)]
pub struct AuthService {
    config: AuthConfig,
    pool: DbPool,
    user_repo: UserRepository,
    metrics: Metrics,
}

impl AuthService {
    #[must_use]
    pub fn new(config: AuthConfig, pool: DbPool, user_repo: UserRepository) -> Self {
        Self { config, pool, user_repo, metrics: Metrics::new() }
    }

    /// Checks a username/password pair. Unknown users and wrong passwords both yield `false`.
    ///
    /// # Errors
    /// Returns an error only if the store is unreachable or the stored hash is corrupt.
    #[tracing::instrument(skip(self, password), err(level = "warn"))]
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<bool> {
        let mut conn = self.pool.acquire().await?;
        let Some(user) = self.user_repo.find_by_username(&mut conn, username).await? else {
            tracing::debug!("Authentication failed: user not found");
            return Ok(false);
        };

        self.verify_password(password, &user.password_hash).await
    }

    /// Stores a new user with a salted argon2 hash of their password.
    ///
    /// # Errors
    /// Returns `AppError::BadRequest` if a field is missing and
    /// `AppError::Conflict` if the username is taken.
    #[tracing::instrument(skip(self, new_user), fields(username = %new_user.username), err(level = "warn"))]
    pub async fn register(&self, new_user: NewUser) -> Result<User> {
        new_user.validate()?;

        let password_hash = self.hash_password(&new_user.password).await?;

        let mut conn = self.pool.acquire().await?;
        let user = self
            .user_repo
            .create(
                &mut conn,
                &new_user.username,
                &password_hash,
                &new_user.first_name,
                &new_user.last_name,
                &new_user.phone,
            )
            .await?;

        tracing::info!("User registered");
        self.metrics.users_registered_total.add(1, &[]);
        Ok(user)
    }

    /// # Errors
    /// Returns `AppError::NotFound` if the user does not exist.
    #[tracing::instrument(skip(self), err(level = "warn"))]
    pub async fn update_login_timestamp(&self, username: &str) -> Result<OffsetDateTime> {
        let mut conn = self.pool.acquire().await?;
        self.user_repo.touch_last_login(&mut conn, username).await
    }

    /// # Errors
    /// Returns `AppError::Internal` if signing fails.
    pub fn issue_token(&self, username: &str) -> Result<String> {
        Claims::new(username, self.config.token_ttl_secs).encode(&self.config.jwt_secret)
    }

    /// # Errors
    /// Returns `AppError::Unauthorized` if the token is malformed, forged or expired.
    pub fn verify_token(&self, token: &str) -> Result<Identity> {
        Claims::decode(token, &self.config.jwt_secret).map(Identity::from)
    }

    /// Authenticates, stamps the login time and returns a fresh token.
    ///
    /// # Errors
    /// Returns `AppError::BadRequest` on bad credentials.
    #[tracing::instrument(skip(self, password), err(level = "warn"))]
    pub async fn login(&self, username: &str, password: &str) -> Result<String> {
        if !self.authenticate(username, password).await? {
            self.metrics.login_failures_total.add(1, &[]);
            return Err(AppError::BadRequest("Invalid username/password".into()));
        }

        self.update_login_timestamp(username).await?;
        let token = self.issue_token(username)?;

        tracing::info!("User logged in");
        self.metrics.logins_total.add(1, &[]);
        Ok(token)
    }

    /// Registers the user and returns a token. The insert already stamps the first login.
    ///
    /// # Errors
    /// See [`AuthService::register`].
    pub async fn sign_up(&self, new_user: NewUser) -> Result<String> {
        let user = self.register(new_user).await?;
        self.issue_token(&user.username)
    }

    /// # Errors
    /// Returns `AppError::Internal` if hashing fails.
    #[tracing::instrument(err, skip(self, password))]
    pub async fn hash_password(&self, password: &str) -> Result<String> {
        let password = password.to_string();
        tokio::task::spawn_blocking(move || {
            let salt = SaltString::generate(&mut OsRng);
            Argon2::default()
                .hash_password(password.as_bytes(), &salt)
                .map_err(|_| AppError::Internal)
                .map(|h| h.to_string())
        })
        .await
        .map_err(|_| AppError::Internal)?
    }

    /// # Errors
    /// Returns `AppError::Internal` if the stored hash cannot be parsed.
    #[tracing::instrument(err, skip(self, password, password_hash))]
    pub async fn verify_password(&self, password: &str, password_hash: &str) -> Result<bool> {
        let password = password.to_string();
        let password_hash = password_hash.to_string();
        tokio::task::spawn_blocking(move || {
            let parsed_hash = PasswordHash::new(&password_hash).map_err(|_| AppError::Internal)?;
            Ok(Argon2::default().verify_password(password.as_bytes(), &parsed_hash).is_ok())
        })
        .await
        .map_err(|_| AppError::Internal)?
    }
}
