use std::sync::Arc;

use crate::config::ServerConfig;
use crate::mailer::Mailer;
use crate::ratelimit::FixedWindowLimiter;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: timeclock_db::DbPool,
    /// Server configuration (accessed by middleware and handlers).
    pub config: Arc<ServerConfig>,
    /// Outbound email sender.
    pub mailer: Arc<Mailer>,
    /// Per-IP fixed-window rate limiter.
    pub limiter: Arc<FixedWindowLimiter>,
}
