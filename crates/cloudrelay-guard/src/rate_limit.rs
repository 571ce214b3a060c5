//! Token-bucket admission control.
//!
//! Every outbound request calls [`RateLimiter::acquire`] before it is sent. The bucket
//! starts full, refills continuously at `refill_per_second` up to `capacity`, and each
//! admitted call consumes exactly one token.
//!
//! Waiters queue on a fair async mutex, so callers are admitted in arrival order. The
//! task at the head of the queue sleeps exactly as long as the bucket needs to accrue
//! its token instead of polling. Refill and decrement happen under one lock, so two
//! concurrent callers can never both spend the same token.
//!
//! Time is read from [`tokio::time::Instant`]; tests drive it with a paused runtime.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use log::{debug, trace};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::time::Instant;

/// Rate limiter settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateLimitConfig {
    /// Maximum number of tokens the bucket holds (default: 100)
    #[serde(default = "default_capacity")]
    pub capacity: u32,
    /// Tokens regenerated per second (default: 10)
    #[serde(default = "default_refill_per_second")]
    pub refill_per_second: f64,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
            refill_per_second: default_refill_per_second(),
        }
    }
}

const fn default_capacity() -> u32 {
    100
}

const fn default_refill_per_second() -> f64 {
    10.0
}

impl RateLimitConfig {
    /// Checks that the bucket can ever admit a call.
    ///
    /// # Errors
    ///
    /// Returns an error if the capacity is zero or the refill rate is not a positive,
    /// finite number.
    pub fn validate(&self) -> Result<(), RateLimitError> {
        if self.capacity == 0 {
            return Err(RateLimitError::ZeroCapacity);
        }
        if !self.refill_per_second.is_finite() || self.refill_per_second <= 0.0 {
            return Err(RateLimitError::InvalidRefillRate(self.refill_per_second));
        }
        Ok(())
    }

    /// The reference retry interval, `ceil(1000 / refill_per_second)` milliseconds.
    ///
    /// No single wait inside [`RateLimiter::acquire`] is longer than this.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn retry_interval(&self) -> Duration {
        Duration::from_millis((1000.0 / self.refill_per_second).ceil() as u64)
    }
}

/// Invalid rate limiter configuration.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum RateLimitError {
    #[error("rate limit capacity must be at least 1")]
    ZeroCapacity,

    #[error("rate limit refill rate must be a positive number, got {0}")]
    InvalidRefillRate(f64),
}

#[derive(Debug)]
struct Bucket {
    tokens: f64,
    last_refill: Instant,
}

impl Bucket {
    fn full(config: &RateLimitConfig, now: Instant) -> Self {
        Self {
            tokens: f64::from(config.capacity),
            last_refill: now,
        }
    }

    fn refill(&mut self, config: &RateLimitConfig, now: Instant) {
        let elapsed = now.saturating_duration_since(self.last_refill).as_secs_f64();
        self.tokens = elapsed
            .mul_add(config.refill_per_second, self.tokens)
            .min(f64::from(config.capacity));
        self.last_refill = now;
    }

    fn try_take(&mut self) -> bool {
        if self.tokens >= 1.0 {
            self.tokens -= 1.0;
            true
        } else {
            false
        }
    }

    /// Time until one whole token is available, rounded up to the millisecond.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn time_to_next_token(&self, config: &RateLimitConfig) -> Duration {
        let deficit = (1.0 - self.tokens).max(0.0);
        let millis = (deficit / config.refill_per_second * 1000.0).ceil() as u64;
        Duration::from_millis(millis.max(1)).min(config.retry_interval())
    }
}

/// Process-wide token bucket.
///
/// Share one instance behind an `Arc` between all request flows.
#[derive(Debug)]
pub struct RateLimiter {
    config: RateLimitConfig,
    bucket: Mutex<Bucket>,
    queue: tokio::sync::Mutex<()>,
}

impl RateLimiter {
    /// Creates a limiter with a full bucket.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(config: RateLimitConfig) -> Result<Self, RateLimitError> {
        config.validate()?;
        Ok(Self {
            config,
            bucket: Mutex::new(Bucket::full(&config, Instant::now())),
            queue: tokio::sync::Mutex::new(()),
        })
    }

    #[must_use]
    pub const fn config(&self) -> &RateLimitConfig {
        &self.config
    }

    /// Waits until a token is available, then consumes it.
    ///
    /// Never fails and has no timeout. Wrap it in [`tokio::time::timeout`] for bounded
    /// waiting; dropping the future while it waits consumes nothing.
    pub async fn acquire(&self) {
        let _turn = self.queue.lock().await;

        loop {
            let wait = {
                let mut bucket = self.lock_bucket();
                bucket.refill(&self.config, Instant::now());
                if bucket.try_take() {
                    trace!("Rate limiter admitted call, {:.2} tokens left", bucket.tokens);
                    return;
                }
                bucket.time_to_next_token(&self.config)
            };

            debug!("Rate limit reached, waiting {}ms for a token", wait.as_millis());
            tokio::time::sleep(wait).await;
        }
    }

    /// Consumes a token only if one is available right now and nobody is queued.
    pub fn try_acquire(&self) -> bool {
        let Ok(_turn) = self.queue.try_lock() else {
            return false;
        };

        let mut bucket = self.lock_bucket();
        bucket.refill(&self.config, Instant::now());
        bucket.try_take()
    }

    /// Whole tokens currently available, after refilling. Consumes nothing.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn available_tokens(&self) -> u32 {
        let mut bucket = self.lock_bucket();
        bucket.refill(&self.config, Instant::now());
        bucket.tokens.floor() as u32
    }

    fn lock_bucket(&self) -> std::sync::MutexGuard<'_, Bucket> {
        self.bucket.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::expect_used)]
    #![allow(clippy::float_cmp)]

    use std::sync::Arc;

    use proptest::prelude::*;

    use super::*;

    fn limiter(capacity: u32, refill_per_second: f64) -> RateLimiter {
        RateLimiter::new(RateLimitConfig {
            capacity,
            refill_per_second,
        })
        .unwrap()
    }

    #[test]
    fn test_default_config() {
        let config = RateLimitConfig::default();
        assert_eq!(config.capacity, 100);
        assert_eq!(config.refill_per_second, 10.0);
        assert_eq!(config.retry_interval(), Duration::from_millis(100));
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert_eq!(
            RateLimiter::new(RateLimitConfig {
                capacity: 0,
                refill_per_second: 1.0
            })
            .unwrap_err(),
            RateLimitError::ZeroCapacity
        );
        assert!(matches!(
            RateLimiter::new(RateLimitConfig {
                capacity: 10,
                refill_per_second: 0.0
            }),
            Err(RateLimitError::InvalidRefillRate(_))
        ));
        assert!(
            RateLimitConfig {
                capacity: 10,
                refill_per_second: f64::NAN
            }
            .validate()
            .is_err()
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_bucket_starts_full() {
        let limiter = limiter(100, 10.0);
        assert_eq!(limiter.available_tokens(), 100);
    }

    #[tokio::test(start_paused = true)]
    async fn test_acquire_consumes_one_token() {
        let limiter = limiter(5, 2.0);

        for expected in (0..5).rev() {
            limiter.acquire().await;
            assert_eq!(limiter.available_tokens(), expected);
        }
        assert!(!limiter.try_acquire());
    }

    #[tokio::test(start_paused = true)]
    async fn test_refill_is_proportional_and_capped() {
        let limiter = limiter(5, 2.0);
        while limiter.try_acquire() {}
        assert_eq!(limiter.available_tokens(), 0);

        tokio::time::advance(Duration::from_secs(1)).await;
        assert_eq!(limiter.available_tokens(), 2);

        limiter.acquire().await;
        assert_eq!(limiter.available_tokens(), 1);

        tokio::time::advance(Duration::from_secs(60)).await;
        assert_eq!(limiter.available_tokens(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_available_tokens_does_not_consume() {
        let limiter = limiter(3, 1.0);
        assert_eq!(limiter.available_tokens(), 3);
        assert_eq!(limiter.available_tokens(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_empty_bucket_releases_after_one_refill_interval() {
        let limiter = limiter(10, 10.0);
        while limiter.try_acquire() {}

        let start = Instant::now();
        limiter.acquire().await;
        let waited = start.elapsed();

        assert!(waited >= Duration::from_millis(100), "waited {waited:?}");
        assert!(waited < Duration::from_millis(110), "waited {waited:?}");
        assert_eq!(limiter.available_tokens(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_blocked_caller_is_not_admitted_early() {
        let limiter = Arc::new(limiter(1, 10.0));
        limiter.acquire().await;

        let waiter = tokio::spawn({
            let limiter = Arc::clone(&limiter);
            async move { limiter.acquire().await }
        });
        tokio::task::yield_now().await;

        tokio::time::advance(Duration::from_millis(50)).await;
        tokio::task::yield_now().await;
        assert!(!waiter.is_finished());

        waiter.await.unwrap();
        assert_eq!(limiter.available_tokens(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_try_acquire_refuses_while_callers_are_queued() {
        let limiter = Arc::new(limiter(1, 1.0));
        limiter.acquire().await;

        let waiter = tokio::spawn({
            let limiter = Arc::clone(&limiter);
            async move { limiter.acquire().await }
        });
        tokio::task::yield_now().await;

        tokio::time::advance(Duration::from_millis(1500)).await;
        assert!(!limiter.try_acquire());

        waiter.await.unwrap();
    }

    #[tokio::test(start_paused = true)]
    async fn test_concurrent_callers_never_overspend() {
        let limiter = Arc::new(limiter(4, 1.0));
        let start = Instant::now();

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let limiter = Arc::clone(&limiter);
                tokio::spawn(async move { limiter.acquire().await })
            })
            .collect();
        for handle in handles {
            handle.await.unwrap();
        }

        // 4 from the initial burst, the other 4 at one per second.
        assert!(start.elapsed() >= Duration::from_secs(4));
        assert_eq!(limiter.available_tokens(), 0);
    }

    #[test]
    fn test_wait_never_exceeds_retry_interval() {
        let config = RateLimitConfig {
            capacity: 1,
            refill_per_second: 4.0,
        };
        let bucket = Bucket {
            tokens: 0.0,
            last_refill: Instant::now(),
        };
        assert_eq!(bucket.time_to_next_token(&config), Duration::from_millis(250));

        let almost = Bucket {
            tokens: 0.999_999,
            last_refill: Instant::now(),
        };
        assert_eq!(almost.time_to_next_token(&config), Duration::from_millis(1));
    }

    proptest! {
        #[test]
        fn prop_tokens_follow_refill_formula(
            capacity in 1u32..200,
            rate in 0.5f64..50.0,
            steps in prop::collection::vec((0u64..5_000, any::<bool>()), 1..64),
        ) {
            let config = RateLimitConfig { capacity, refill_per_second: rate };
            let mut now = Instant::now();
            let mut bucket = Bucket::full(&config, now);

            for (elapsed_ms, take) in steps {
                let previous = bucket.tokens;
                now += Duration::from_millis(elapsed_ms);
                bucket.refill(&config, now);

                let expected = (previous + Duration::from_millis(elapsed_ms).as_secs_f64() * rate)
                    .min(f64::from(capacity));
                prop_assert!((bucket.tokens - expected).abs() < 1e-6);

                if take {
                    let refilled = bucket.tokens;
                    let admitted = bucket.try_take();
                    prop_assert_eq!(admitted, refilled >= 1.0);
                    if admitted {
                        prop_assert!((bucket.tokens - (refilled - 1.0)).abs() < 1e-9);
                    }
                }

                prop_assert!(bucket.tokens >= 0.0);
                prop_assert!(bucket.tokens <= f64::from(capacity));
            }
        }
    }
}
