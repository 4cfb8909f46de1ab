use crate::auth::jwt::JwtConfig;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
/// In production, override via environment variables.
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
    /// Base URL of the frontend, used to build activation/reset links.
    pub frontend_url: String,
    /// JWT token configuration (secret, expiry).
    pub jwt: JwtConfig,
    /// Outbound email configuration.
    pub mail: MailConfig,
    /// Per-IP fixed-window rate limiter configuration.
    pub rate_limit: RateLimitConfig,
}

/// Outbound email (SMTP) configuration.
#[derive(Debug, Clone)]
pub struct MailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub smtp_username: String,
    pub smtp_password: String,
    /// Sender address for all outbound mail.
    pub from_address: String,
    /// Invitation token lifetime in days (default: `3`).
    pub invitation_expiry_days: i64,
    /// Password-reset token lifetime in minutes (default: `60`).
    pub reset_expiry_mins: i64,
    /// When set, mail is logged instead of delivered. Defaults to `true` so
    /// local development never needs a mail server.
    pub sandbox: bool,
}

/// Fixed-window rate limiter configuration.
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    pub enabled: bool,
    /// Requests allowed per window per client IP (default: `20`).
    pub requests_per_window: u32,
    /// Window length in seconds (default: `5`).
    pub window_secs: u64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default                    |
    /// |----------------------------|----------------------------|
    /// | `HOST`                     | `0.0.0.0`                  |
    /// | `PORT`                     | `3000`                     |
    /// | `CORS_ORIGINS`             | `http://localhost:5173`    |
    /// | `REQUEST_TIMEOUT_SECS`     | `30`                       |
    /// | `FRONTEND_URL`             | `http://localhost:5173`    |
    /// | `SMTP_HOST`                | `localhost`                |
    /// | `SMTP_PORT`                | `587`                      |
    /// | `SMTP_USERNAME`            | (empty)                    |
    /// | `SMTP_PASSWORD`            | (empty)                    |
    /// | `MAIL_FROM`                | `no-reply@timeclock.local` |
    /// | `MAIL_INVITATION_EXP_DAYS` | `3`                        |
    /// | `MAIL_RESET_EXP_MINS`      | `60`                       |
    /// | `MAIL_SANDBOX`             | `true`                     |
    /// | `RATE_LIMIT_ENABLED`       | `true`                     |
    /// | `RATE_LIMIT_REQUESTS`      | `20`                       |
    /// | `RATE_LIMIT_WINDOW_SECS`   | `5`                        |
    ///
    /// JWT variables are documented on [`JwtConfig::from_env`].
    ///
    /// # Panics
    ///
    /// Panics on unparseable numeric values and on a missing `JWT_SECRET`,
    /// which is the desired behaviour -- misconfiguration should fail fast
    /// at startup.
    pub fn from_env() -> Self {
        let host = env_or("HOST", "0.0.0.0");

        let port: u16 = env_or("PORT", "3000")
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = env_or("CORS_ORIGINS", "http://localhost:5173")
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = env_or("REQUEST_TIMEOUT_SECS", "30")
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let frontend_url = env_or("FRONTEND_URL", "http://localhost:5173");

        let mail = MailConfig {
            smtp_host: env_or("SMTP_HOST", "localhost"),
            smtp_port: env_or("SMTP_PORT", "587")
                .parse()
                .expect("SMTP_PORT must be a valid u16"),
            smtp_username: env_or("SMTP_USERNAME", ""),
            smtp_password: env_or("SMTP_PASSWORD", ""),
            from_address: env_or("MAIL_FROM", "no-reply@timeclock.local"),
            invitation_expiry_days: env_or("MAIL_INVITATION_EXP_DAYS", "3")
                .parse()
                .expect("MAIL_INVITATION_EXP_DAYS must be a valid i64"),
            reset_expiry_mins: env_or("MAIL_RESET_EXP_MINS", "60")
                .parse()
                .expect("MAIL_RESET_EXP_MINS must be a valid i64"),
            sandbox: env_or("MAIL_SANDBOX", "true")
                .parse()
                .expect("MAIL_SANDBOX must be true or false"),
        };

        let rate_limit = RateLimitConfig {
            enabled: env_or("RATE_LIMIT_ENABLED", "true")
                .parse()
                .expect("RATE_LIMIT_ENABLED must be true or false"),
            requests_per_window: env_or("RATE_LIMIT_REQUESTS", "20")
                .parse()
                .expect("RATE_LIMIT_REQUESTS must be a valid u32"),
            window_secs: env_or("RATE_LIMIT_WINDOW_SECS", "5")
                .parse()
                .expect("RATE_LIMIT_WINDOW_SECS must be a valid u64"),
        };

        let jwt = JwtConfig::from_env();

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            frontend_url,
            jwt,
            mail,
            rate_limit,
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.into())
}
