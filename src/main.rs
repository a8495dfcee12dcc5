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

use messagely_server::api::MgmtState;
use messagely_server::config::Config;
use messagely_server::{AppBuilder, storage, telemetry};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::sync::watch;
use tracing::Instrument;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load();
    let telemetry_guard = telemetry::init_telemetry(&config.telemetry)?;

    messagely_server::setup_panic_hook();

    let boot_span = tracing::info_span!("boot_server");
    let (api_listener, mgmt_listener, app_router, mgmt_app, shutdown_rx) = async {
        let pool = storage::init_pool(&config.database_url, config.db_max_connections).await?;
        messagely_server::run_migrations(&pool).await?;

        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        messagely_server::spawn_signal_handler(shutdown_tx);

        let app = AppBuilder::new(config.clone()).with_database(pool).build()?;

        let app_router = messagely_server::api::app_router(app.services);
        let mgmt_app = messagely_server::api::mgmt_router(MgmtState { health_service: app.health_service });

        let api_addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
        let mgmt_addr: SocketAddr = format!("{}:{}", config.server.host, config.server.mgmt_port).parse()?;

        let api_listener = tokio::net::TcpListener::bind(api_addr).await?;
        let mgmt_listener = tokio::net::TcpListener::bind(mgmt_addr).await?;

        tracing::info!(address = %api_addr, "listening");
        tracing::info!(address = %mgmt_addr, "management server listening");

        Ok::<_, anyhow::Error>((api_listener, mgmt_listener, app_router, mgmt_app, shutdown_rx))
    }
    .instrument(boot_span)
    .await?;

    let mut api_rx = shutdown_rx.clone();
    let api_server = axum::serve(api_listener, app_router).with_graceful_shutdown(async move {
        let _ = api_rx.wait_for(|&s| s).await;
    });

    let mut mgmt_rx = shutdown_rx.clone();
    let mgmt_server = axum::serve(mgmt_listener, mgmt_app).with_graceful_shutdown(async move {
        let _ = mgmt_rx.wait_for(|&s| s).await;
    });

    let drain = async {
        if let Err(e) = tokio::try_join!(api_server, mgmt_server) {
            tracing::error!(error = %e, "Server error");
        }
    };

    let mut timeout_rx = shutdown_rx;
    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_secs);
    tokio::select! {
        () = drain => tracing::info!("Servers stopped"),
        () = async {
            let _ = timeout_rx.wait_for(|&s| s).await;
            tokio::time::sleep(shutdown_timeout).await;
        } => tracing::warn!("Timeout waiting for in-flight requests to finish"),
    }

    telemetry_guard.shutdown();
    Ok(())
}
