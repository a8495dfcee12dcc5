use clap::{Args, Parser, ValueEnum};

#[derive(Clone, Debug, Parser)]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Database connection URL
    #[arg(long, env = "MESSAGELY_DATABASE_URL")]
    pub database_url: String,

    /// Maximum number of pooled database connections
    #[arg(long, env = "MESSAGELY_DB_MAX_CONNECTIONS", default_value_t = 10)]
    pub db_max_connections: u32,

    #[command(flatten)]
    pub server: ServerConfig,

    #[command(flatten)]
    pub auth: AuthConfig,

    #[command(flatten)]
    pub telemetry: TelemetryConfig,

    #[command(flatten)]
    pub health: HealthConfig,
}

#[derive(Clone, Debug, Args)]
pub struct ServerConfig {
    /// Host to listen on
    #[arg(long, env = "MESSAGELY_HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "MESSAGELY_PORT", default_value_t = 3000)]
    pub port: u16,

    /// Port for the management (health probe) server
    #[arg(long, env = "MESSAGELY_MGMT_PORT", default_value_t = 9090)]
    pub mgmt_port: u16,

    /// Seconds to wait for in-flight work during shutdown
    #[arg(long, env = "MESSAGELY_SHUTDOWN_TIMEOUT_SECS", default_value_t = 5)]
    pub shutdown_timeout_secs: u64,
}

#[derive(Clone, Debug, Args)]
pub struct AuthConfig {
    /// Secret key for JWT signing
    #[arg(long, env = "MESSAGELY_JWT_SECRET")]
    pub jwt_secret: String,

    /// Identity token time-to-live in seconds
    #[arg(long, env = "MESSAGELY_TOKEN_TTL_SECS", default_value_t = 86_400)]
    pub token_ttl_secs: u64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Clone, Debug, Args)]
pub struct TelemetryConfig {
    /// Log output format
    #[arg(long, env = "MESSAGELY_LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,

    /// OTLP collector endpoint; export is disabled when unset
    #[arg(long, env = "MESSAGELY_OTLP_ENDPOINT")]
    pub otlp_endpoint: Option<String>,
}

#[derive(Clone, Debug, Args)]
pub struct HealthConfig {
    /// Timeout for the readiness database check
    #[arg(long = "health-db-timeout-ms", env = "MESSAGELY_HEALTH_DB_TIMEOUT_MS", default_value_t = 2000)]
    pub db_timeout_ms: u64,
}

impl Config {
    #[must_use]
    pub fn load() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_args() {
        let config = Config::try_parse_from([
            "messagely-server",
            "--database-url",
            "postgres://localhost/messagely",
            "--jwt-secret",
            "s3cret",
        ])
        .unwrap();

        assert_eq!(config.server.port, 3000);
        assert_eq!(config.server.mgmt_port, 9090);
        assert_eq!(config.auth.token_ttl_secs, 86_400);
        assert_eq!(config.telemetry.log_format, LogFormat::Text);
        assert!(config.telemetry.otlp_endpoint.is_none());
        assert_eq!(config.health.db_timeout_ms, 2000);
    }

    #[test]
    fn test_log_format_json() {
        let config = Config::try_parse_from([
            "messagely-server",
            "--database-url",
            "postgres://localhost/messagely",
            "--jwt-secret",
            "s3cret",
            "--log-format",
            "json",
        ])
        .unwrap();

        assert_eq!(config.telemetry.log_format, LogFormat::Json);
    }
}
