//! Minimum-interval request spacing.
//!
//! Scryfall asks clients to leave 50-100ms between requests. The limiter
//! tracks the time of the last call and blocks the calling thread until the
//! configured interval has elapsed. It is owned by the client that needs it
//! and injected wherever that client goes; there is no global state.

use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing::trace;

/// Enforces a minimum interval between consecutive calls.
///
/// `acquire` holds the internal lock across the sleep, so concurrent callers
/// serialize and each one observes the full spacing relative to the caller
/// before it. State resets with the process.
#[derive(Debug)]
pub struct RateLimiter {
    min_interval: Duration,
    last_call: Mutex<Option<Instant>>,
}

impl RateLimiter {
    /// Create a limiter with the given minimum spacing between calls.
    pub fn new(min_interval: Duration) -> Self {
        Self {
            min_interval,
            last_call: Mutex::new(None),
        }
    }

    /// The configured minimum spacing.
    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    /// Block until the minimum interval since the previous call has elapsed,
    /// then record the new call time.
    pub fn acquire(&self) {
        let mut last_call = match self.last_call.lock() {
            Ok(guard) => guard,
            // A poisoned lock only means another caller panicked mid-acquire;
            // the timestamp itself is still usable.
            Err(poisoned) => poisoned.into_inner(),
        };

        if let Some(last) = *last_call {
            let elapsed = last.elapsed();
            if elapsed < self.min_interval {
                let wait = self.min_interval - elapsed;
                trace!("rate limiter sleeping {:?}", wait);
                std::thread::sleep(wait);
            }
        }

        *last_call = Some(Instant::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_first_call_does_not_wait() {
        let limiter = RateLimiter::new(Duration::from_millis(200));
        assert_eq!(limiter.min_interval(), Duration::from_millis(200));

        let start = Instant::now();
        limiter.acquire();
        assert!(start.elapsed() < Duration::from_millis(100));
    }

    #[test]
    fn test_consecutive_calls_are_spaced() {
        let interval = Duration::from_millis(50);
        let limiter = RateLimiter::new(interval);

        limiter.acquire();
        let start = Instant::now();
        limiter.acquire();
        limiter.acquire();

        // Two spaced calls after the first: at least two full intervals.
        assert!(start.elapsed() >= interval * 2);
    }

    #[test]
    fn test_concurrent_calls_are_spaced() {
        let interval = Duration::from_millis(30);
        let limiter = Arc::new(RateLimiter::new(interval));

        limiter.acquire();
        let start = Instant::now();

        let handles: Vec<_> = (0..3)
            .map(|_| {
                let limiter = limiter.clone();
                std::thread::spawn(move || limiter.acquire())
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        // Three more calls, each spaced a full interval from the previous.
        assert!(start.elapsed() >= interval * 3);
    }

    #[test]
    fn test_elapsed_interval_passes_through() {
        let interval = Duration::from_millis(20);
        let limiter = RateLimiter::new(interval);

        limiter.acquire();
        std::thread::sleep(interval * 2);

        let start = Instant::now();
        limiter.acquire();
        // Interval already elapsed, so no extra sleep.
        assert!(start.elapsed() < interval);
    }
}
