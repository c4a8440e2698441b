/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS` env var.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Upper bound on concurrently mounted matching views (default: `256`).
    pub max_matching_sessions: usize,
    /// Sessions untouched for this many seconds are evicted (default: `1800`).
    pub session_idle_timeout_secs: u64,
    /// How often the idle-session sweep runs, in seconds (default: `60`).
    pub session_sweep_interval_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                 | Default                    |
    /// |-------------------------|----------------------------|
    /// | `HOST`                  | `0.0.0.0`                  |
    /// | `PORT`                  | `3000`                     |
    /// | `CORS_ORIGINS`          | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`  | `30`                       |
    /// | `MAX_MATCHING_SESSIONS` | `256`                      |
    /// | `SESSION_IDLE_TIMEOUT_SECS` | `1800`                 |
    /// | `SESSION_SWEEP_INTERVAL_SECS` | `60`                 |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins = parse_origins(
            &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| "http://localhost:5173".into()),
        );

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let max_matching_sessions: usize = std::env::var("MAX_MATCHING_SESSIONS")
            .unwrap_or_else(|_| "256".into())
            .parse()
            .expect("MAX_MATCHING_SESSIONS must be a valid usize");

        let session_idle_timeout_secs: u64 = std::env::var("SESSION_IDLE_TIMEOUT_SECS")
            .unwrap_or_else(|_| "1800".into())
            .parse()
            .expect("SESSION_IDLE_TIMEOUT_SECS must be a valid u64");

        let session_sweep_interval_secs: u64 = std::env::var("SESSION_SWEEP_INTERVAL_SECS")
            .unwrap_or_else(|_| "60".into())
            .parse()
            .expect("SESSION_SWEEP_INTERVAL_SECS must be a valid u64");
        assert!(
            session_sweep_interval_secs > 0,
            "SESSION_SWEEP_INTERVAL_SECS must be greater than zero"
        );

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            max_matching_sessions,
            session_idle_timeout_secs,
            session_sweep_interval_secs,
        }
    }
}

/// Split a comma-separated origin list, dropping blanks.
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}
