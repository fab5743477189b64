//! Fixed-window rate limiting, one counter per source name.
//!
//! Once a source has spent its per-minute budget, further attempts in the
//! same window fail fast — no queueing, no backoff — so resolution falls
//! through to the next source immediately.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Window length for all counters.
const WINDOW: Duration = Duration::from_secs(60);

struct Window {
    count: u32,
    started_at: Instant,
}

/// Per-source fixed-window request counters.
pub struct RateLimiter {
    window: Duration,
    counters: Mutex<HashMap<String, Window>>,
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new()
    }
}

impl RateLimiter {
    #[must_use]
    pub fn new() -> Self {
        Self::with_window(WINDOW)
    }

    /// Custom window length, for tests that cannot wait a real minute.
    #[must_use]
    pub fn with_window(window: Duration) -> Self {
        Self {
            window,
            counters: Mutex::new(HashMap::new()),
        }
    }

    /// Tries to spend one request from `name`'s budget of `limit` per
    /// window. Returns `false` when the budget is exhausted; the counter is
    /// not queued or deferred.
    #[must_use]
    pub fn try_acquire(&self, name: &str, limit: u32) -> bool {
        self.try_acquire_at(name, limit, Instant::now())
    }

    /// Resets every counter. Exposed for tests and the admin reset action.
    pub fn clear(&self) {
        self.counters
            .lock()
            .expect("rate limiter lock poisoned")
            .clear();
    }

    fn try_acquire_at(&self, name: &str, limit: u32, now: Instant) -> bool {
        let mut counters = self.counters.lock().expect("rate limiter lock poisoned");
        let window = counters.entry(name.to_string()).or_insert(Window {
            count: 0,
            started_at: now,
        });
        if now.duration_since(window.started_at) >= self.window {
            window.count = 0;
            window.started_at = now;
        }
        if window.count >= limit {
            return false;
        }
        window.count += 1;
        true
    }
}
