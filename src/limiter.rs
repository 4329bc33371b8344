//! Sliding-window admission control for oracle calls.
//!
//! A pure admission gate, not a scheduler: a denied call is never queued or
//! retried, it just routes the caller onto the heuristic fallback path.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Fixed-window request-rate guard.
///
/// Tracks the timestamps of admitted requests, oldest first. Not internally
/// synchronized — the owning service wraps it in a `Mutex` because request
/// handlers run concurrently.
#[derive(Debug)]
pub struct RateLimiter {
    max_requests: usize,
    time_window: Duration,
    /// Admitted-request timestamps, chronologically sorted (appended in call order).
    admitted: VecDeque<Instant>,
}

impl RateLimiter {
    /// Create a limiter admitting at most `max_requests` per `time_window`.
    pub fn new(max_requests: usize, time_window: Duration) -> Self {
        Self {
            max_requests,
            time_window,
            admitted: VecDeque::with_capacity(max_requests),
        }
    }

    /// Check whether a new request may proceed, recording it if admitted.
    pub fn allow_request(&mut self) -> bool {
        self.allow_at(Instant::now())
    }

    fn allow_at(&mut self, now: Instant) -> bool {
        // Evict timestamps that have fallen out of the window. The deque is
        // sorted, so eviction stops at the first still-valid entry.
        while let Some(&oldest) = self.admitted.front() {
            if now.duration_since(oldest) >= self.time_window {
                self.admitted.pop_front();
            } else {
                break;
            }
        }

        if self.admitted.len() >= self.max_requests {
            return false;
        }

        self.admitted.push_back(now);
        true
    }

    /// Number of admissions currently inside the window.
    pub fn in_flight(&self) -> usize {
        self.admitted.len()
    }
}
