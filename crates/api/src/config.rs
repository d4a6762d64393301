//! Server configuration loaded from environment variables.

/// Rate limiter settings.
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Master switch. When false the limiter admits everything and keeps
    /// no per-client state (trusted internal traffic).
    pub enabled: bool,
    /// Steady refill rate in tokens per second.
    pub requests_per_second: f64,
    /// Bucket capacity: the burst a quiet client may spend at once.
    pub burst: f64,
}

/// Server configuration.
///
/// All fields have defaults suitable for local development. In production,
/// override via environment variables.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `4000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Rate limiter settings.
    pub rate_limit: RateLimitConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                 |
    /// |---------------------------|-------------------------|
    /// | `HOST`                    | `0.0.0.0`               |
    /// | `PORT`                    | `4000`                  |
    /// | `CORS_ORIGINS`            | `http://localhost:5173` |
    /// | `REQUEST_TIMEOUT_SECS`    | `30`                    |
    /// | `RATE_LIMIT_ENABLED`      | `true`                  |
    /// | `RATE_LIMIT_RPS`          | `2`                     |
    /// | `RATE_LIMIT_BURST`        | `4`                     |
    ///
    /// # Panics
    ///
    /// Panics on malformed values; misconfiguration should fail at startup.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "4000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let rate_limit = RateLimitConfig {
            enabled: std::env::var("RATE_LIMIT_ENABLED")
                .unwrap_or_else(|_| "true".into())
                .parse()
                .expect("RATE_LIMIT_ENABLED must be true or false"),
            requests_per_second: std::env::var("RATE_LIMIT_RPS")
                .unwrap_or_else(|_| "2".into())
                .parse()
                .expect("RATE_LIMIT_RPS must be a valid number"),
            burst: std::env::var("RATE_LIMIT_BURST")
                .unwrap_or_else(|_| "4".into())
                .parse()
                .expect("RATE_LIMIT_BURST must be a valid number"),
        };

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            rate_limit,
        }
    }
}
