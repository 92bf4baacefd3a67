use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins from comma-separated `CORS_ORIGINS`. `*` allows any.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Public URL of the web app, used to build password reset links.
    pub app_base_url: String,
    /// Shared secret accepted in `x-cron-secret` by scheduled endpoints.
    pub cron_secret: Option<String>,
    /// Period of the in-process option expiry job. `0` disables it.
    pub option_expiry_interval_secs: u64,
    pub jwt: JwtConfig,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                       | Default                 |
    /// |-------------------------------|-------------------------|
    /// | `HOST`                        | `0.0.0.0`               |
    /// | `PORT`                        | `3000`                  |
    /// | `CORS_ORIGINS`                | `*`                     |
    /// | `REQUEST_TIMEOUT_SECS`        | `30`                    |
    /// | `APP_BASE_URL`                | `http://localhost:5173` |
    /// | `CRON_SECRET`                 | unset                   |
    /// | `OPTION_EXPIRY_INTERVAL_SECS` | `900`                   |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "*".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let app_base_url = std::env::var("APP_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .trim_end_matches('/')
            .to_string();

        let cron_secret = std::env::var("CRON_SECRET").ok().filter(|s| !s.is_empty());

        let option_expiry_interval_secs: u64 = std::env::var("OPTION_EXPIRY_INTERVAL_SECS")
            .unwrap_or_else(|_| "900".into())
            .parse()
            .expect("OPTION_EXPIRY_INTERVAL_SECS must be a valid u64");

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            app_base_url,
            cron_secret,
            option_expiry_interval_secs,
            jwt: JwtConfig::from_env(),
        }
    }

    /// Link emailed to a user who asked for a password reset.
    pub fn reset_link(&self, token: &str) -> String {
        format!("{}/reset-password?token={token}", self.app_base_url)
    }
}
