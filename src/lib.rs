#![forbid(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::todo)]
#![warn(clippy::panic)]
#![warn(clippy::dbg_macro)]
#![warn(clippy::print_stdout)]
#![warn(clippy::print_stderr)]
#![warn(clippy::clone_on_ref_ptr)]
#![warn(unreachable_pub)]
#![warn(missing_debug_implementations)]
#![warn(unused_qualifications)]
#![deny(unused_must_use)]

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod services;
pub mod storage;
pub mod telemetry;

use crate::api::ServiceContainer;
use crate::config::Config;
use crate::services::auth_service::AuthService;
use crate::services::health_service::HealthService;
use crate::services::message_service::MessageService;
use crate::services::user_service::UserService;
use crate::storage::DbPool;
use crate::storage::message_repo::MessageRepository;
use crate::storage::user_repo::UserRepository;
use tokio::sync::watch;

/// Everything `main` needs to start serving.
#[derive(Debug)]
pub struct App {
    pub services: ServiceContainer,
    pub health_service: HealthService,
}

/// Wires repositories and services together over a shared pool.
#[derive(Debug)]
pub struct AppBuilder {
    config: Config,
    pool: Option<DbPool>,
}

impl AppBuilder {
    #[must_use]
    pub const fn new(config: Config) -> Self {
        Self { config, pool: None }
    }

    #[must_use]
    pub fn with_database(mut self, pool: DbPool) -> Self {
        self.pool = Some(pool);
        self
    }

    /// # Errors
    /// Returns an error if no database pool was supplied.
    pub fn build(self) -> anyhow::Result<App> {
        let pool = self.pool.ok_or_else(|| anyhow::anyhow!("Database pool is required"))?;

        let user_repo = UserRepository::new();
        let message_repo = MessageRepository::new();

        let auth_service = AuthService::new(self.config.auth.clone(), pool.clone(), user_repo.clone());
        let user_service = UserService::new(pool.clone(), user_repo.clone(), message_repo.clone());
        let message_service = MessageService::new(pool.clone(), message_repo, user_repo);
        let health_service = HealthService::new(pool, self.config.health);

        Ok(App { services: ServiceContainer { auth_service, user_service, message_service }, health_service })
    }
}

/// Applies pending schema migrations.
///
/// # Errors
/// Returns an error if a migration fails to apply.
pub async fn run_migrations(pool: &DbPool) -> anyhow::Result<()> {
    sqlx::migrate!().run(pool).await?;
    tracing::info!("Database migrations applied");
    Ok(())
}

/// Flips the shutdown flag on SIGINT or SIGTERM.
pub fn spawn_signal_handler(shutdown_tx: watch::Sender<bool>) {
    tokio::spawn(async move {
        let ctrl_c = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            }
        };

        #[cfg(unix)]
        let terminate = async {
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(mut signal) => {
                    signal.recv().await;
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to listen for SIGTERM");
                    std::future::pending::<()>().await;
                }
            }
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            () = ctrl_c => tracing::info!("Received Ctrl+C, shutting down"),
            () = terminate => tracing::info!("Received SIGTERM, shutting down"),
        }

        let _ = shutdown_tx.send(true);
    });
}

/// Routes panics through tracing so they reach structured logs.
pub fn setup_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        let location = info.location().map(|l| format!("{}:{}", l.file(), l.line())).unwrap_or_default();
        let payload = info
            .payload()
            .downcast_ref::<&str>()
            .map(ToString::to_string)
            .or_else(|| info.payload().downcast_ref::<String>().cloned())
            .unwrap_or_default();
        tracing::error!(panic.location = %location, panic.payload = %payload, "Panic occurred");
    }));
}
