//! Per-client fixed-window rate limiting.
//!
//! Each client key (normally an IP address) gets a request counter that
//! resets when its window elapses. The window start is tracked per entry so
//! checking is synchronous and needs no background task.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

struct WindowState {
    count: u32,
    window_start: Instant,
}

/// A fixed-window rate limiter keyed by client identifier.
pub struct FixedWindowLimiter {
    clients: Mutex<HashMap<String, WindowState>>,
    limit: u32,
    window: Duration,
}

impl FixedWindowLimiter {
    pub fn new(limit: u32, window: Duration) -> Self {
        Self {
            clients: Mutex::new(HashMap::new()),
            limit,
            window,
        }
    }

    /// Check whether a request from `client` is allowed right now.
    ///
    /// Returns `Ok(())` when allowed, or `Err(retry_after)` with the time
    /// remaining in the client's current window.
    pub fn allow(&self, client: &str) -> Result<(), Duration> {
        self.allow_at(client, Instant::now())
    }

    fn allow_at(&self, client: &str, now: Instant) -> Result<(), Duration> {
        let mut clients = self.clients.lock().unwrap_or_else(|e| e.into_inner());

        let state = clients
            .entry(client.to_string())
            .or_insert_with(|| WindowState {
                count: 0,
                window_start: now,
            });

        let elapsed = now.duration_since(state.window_start);
        if elapsed >= self.window {
            state.count = 0;
            state.window_start = now;
        }

        if state.count < self.limit {
            state.count += 1;
            Ok(())
        } else {
            Err(self.window - now.duration_since(state.window_start))
        }
    }
}
