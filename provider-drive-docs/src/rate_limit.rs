//! Global request rate limiting
//!
//! The remote service enforces a quota on listing calls, so the crawler
//! funnels every outbound call through a single shared [`RateLimiter`],
//! regardless of how many branches the traversal has fanned out into. The
//! limiter is the only synchronization point between branches.

use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Calls permitted per window by default
pub const DEFAULT_MAX_CALLS: u32 = 10;

/// Default window length
pub const DEFAULT_WINDOW: Duration = Duration::from_millis(1500);

struct Window {
    started_at: Instant,
    calls: u32,
}

/// Token-bucket gate bounding outbound calls to `max_calls` per `window`.
///
/// Clone the `Arc` handle into every crawl branch; a per-branch limiter
/// would multiply the observed call rate by the fan-out degree. Waiters
/// queue on the internal mutex while sleeping toward the next window, which
/// serializes the permit count; the lock is never held across a remote
/// call.
pub struct RateLimiter {
    max_calls: u32,
    window: Duration,
    state: Mutex<Window>,
}

impl RateLimiter {
    pub fn new(max_calls: u32, window: Duration) -> Self {
        Self {
            max_calls,
            window,
            state: Mutex::new(Window {
                started_at: Instant::now(),
                calls: 0,
            }),
        }
    }

    /// Wait for a call slot.
    ///
    /// Returns the time spent waiting. The value is for observability only
    /// and has no correctness role.
    pub async fn acquire(&self) -> Duration {
        let requested_at = Instant::now();
        let mut window = self.state.lock().await;

        loop {
            let now = Instant::now();
            if now.duration_since(window.started_at) >= self.window {
                window.started_at = now;
                window.calls = 0;
            }

            if window.calls < self.max_calls {
                window.calls += 1;
                return requested_at.elapsed();
            }

            let reopens_at = window.started_at + self.window;
            tokio::time::sleep_until(reopens_at).await;
        }
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_CALLS, DEFAULT_WINDOW)
    }
}
