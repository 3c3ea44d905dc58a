use std::sync::Mutex;
use std::time::Duration;

use tokio::time::Instant;

/// Token bucket shared by every request an adapter makes.
///
/// Holds `capacity` tokens, refilled evenly so that a full bucket's worth
/// arrives every `window`. One instance per venue, injected into the fetcher.
#[derive(Debug)]
pub struct RateLimiter {
    capacity: f64,
    refill_per_sec: f64,
    state: Mutex<Bucket>,
}

#[derive(Debug)]
struct Bucket {
    tokens: f64,
    last_refill: Instant,
}

impl RateLimiter {
    pub fn new(capacity: u32, window: Duration) -> Self {
        let capacity = f64::from(capacity.max(1));
        let window_secs = window.as_secs_f64().max(f64::EPSILON);
        Self {
            capacity,
            refill_per_sec: capacity / window_secs,
            state: Mutex::new(Bucket {
                tokens: capacity,
                last_refill: Instant::now(),
            }),
        }
    }

    /// Take a token if one is available. On failure returns how long until the
    /// next token lands.
    pub fn try_acquire(&self) -> Result<(), Duration> {
        let mut bucket = self.state.lock().unwrap_or_else(|p| p.into_inner());

        let now = Instant::now();
        let elapsed = now.duration_since(bucket.last_refill).as_secs_f64();
        bucket.tokens = (bucket.tokens + elapsed * self.refill_per_sec).min(self.capacity);
        bucket.last_refill = now;

        if bucket.tokens >= 1.0 {
            bucket.tokens -= 1.0;
            Ok(())
        } else {
            let missing = 1.0 - bucket.tokens;
            Err(Duration::from_secs_f64(missing / self.refill_per_sec))
        }
    }

    /// Wait until a token is available, then take it.
    pub async fn acquire(&self) {
        while let Err(wait) = self.try_acquire() {
            tracing::debug!(wait_ms = wait.as_millis() as u64, "Rate limit reached, waiting");
            tokio::time::sleep(wait).await;
        }
    }

    pub fn available(&self) -> u32 {
        let bucket = self.state.lock().unwrap_or_else(|p| p.into_inner());
        bucket.tokens.floor() as u32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn bucket_drains_then_refills() {
        let limiter = RateLimiter::new(2, Duration::from_secs(10));
        assert!(limiter.try_acquire().is_ok());
        assert!(limiter.try_acquire().is_ok());

        let wait = limiter.try_acquire().unwrap_err();
        assert!(wait > Duration::from_secs(4) && wait < Duration::from_secs(6));

        tokio::time::advance(Duration::from_secs(6)).await;
        assert!(limiter.try_acquire().is_ok());
    }

    #[tokio::test(start_paused = true)]
    async fn acquire_waits_for_a_token() {
        let limiter = RateLimiter::new(1, Duration::from_secs(60));
        limiter.acquire().await;

        let start = Instant::now();
        limiter.acquire().await;
        assert!(start.elapsed() >= Duration::from_secs(59));
    }

    #[test]
    fn refill_never_exceeds_capacity() {
        let limiter = RateLimiter::new(3, Duration::from_millis(1));
        std::thread::sleep(Duration::from_millis(5));
        assert!(limiter.available() <= 3);
    }
}
