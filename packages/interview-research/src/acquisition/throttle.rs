//! Minimum-interval gate for outbound provider requests.
//!
//! Built on a governor direct rate limiter with a quota of one cell per
//! interval and no burst, which is exactly "at most one request every
//! `min_interval`". The clock is a type parameter so tests can drive it with
//! `FakeRelativeClock`.

use std::fmt;
use std::time::Duration;

use governor::clock::{Clock, DefaultClock, ReasonablyRealtime};
use governor::middleware::NoOpMiddleware;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};

type DirectLimiter<C> =
    RateLimiter<NotKeyed, InMemoryState, C, NoOpMiddleware<<C as Clock>::Instant>>;

/// Spaces outbound requests at least `min_interval` apart.
///
/// Shared by every search and fetch of one [`ContentAcquisition`]; a zero
/// interval disables throttling.
///
/// [`ContentAcquisition`]: super::ContentAcquisition
pub struct Throttle<C: Clock = DefaultClock> {
    limiter: Option<DirectLimiter<C>>,
    clock: C,
    min_interval: Duration,
}

impl Throttle {
    /// Throttle on the real clock.
    pub fn new(min_interval: Duration) -> Self {
        Self::with_clock(min_interval, DefaultClock::default())
    }

    /// A throttle that never waits.
    pub fn disabled() -> Self {
        Self::new(Duration::ZERO)
    }
}

impl<C: Clock + Clone> Throttle<C> {
    /// Throttle on a custom clock.
    pub fn with_clock(min_interval: Duration, clock: C) -> Self {
        let limiter =
            Quota::with_period(min_interval).map(|quota| RateLimiter::direct_with_clock(quota, clock.clone()));

        Self {
            limiter,
            clock,
            min_interval,
        }
    }

    pub fn min_interval(&self) -> Duration {
        self.min_interval
    }

    pub fn is_enabled(&self) -> bool {
        self.limiter.is_some()
    }

    /// Take a permit without waiting.
    ///
    /// On refusal, returns how long until the next request is allowed.
    pub fn try_acquire(&self) -> Result<(), Duration> {
        match &self.limiter {
            Some(limiter) => limiter
                .check()
                .map_err(|not_until| not_until.wait_time_from(self.clock.now())),
            None => Ok(()),
        }
    }
}

impl<C: ReasonablyRealtime + Clone> Throttle<C> {
    /// Wait until a request is allowed, then take the permit.
    pub async fn wait(&self) {
        if let Some(limiter) = &self.limiter {
            limiter.until_ready().await;
        }
    }
}

impl<C: Clock + Clone> fmt::Debug for Throttle<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Throttle")
            .field("min_interval", &self.min_interval)
            .field("enabled", &self.is_enabled())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use governor::clock::FakeRelativeClock;
    use std::time::Instant;

    #[test]
    fn test_second_request_must_wait_full_interval() {
        let clock = FakeRelativeClock::default();
        let throttle = Throttle::with_clock(Duration::from_secs(2), clock.clone());

        assert!(throttle.try_acquire().is_ok());

        let wait = throttle.try_acquire().unwrap_err();
        assert!(wait > Duration::from_millis(1900), "wait was {:?}", wait);
        assert!(wait <= Duration::from_secs(2), "wait was {:?}", wait);
    }

    #[test]
    fn test_permit_after_interval_elapses() {
        let clock = FakeRelativeClock::default();
        let throttle = Throttle::with_clock(Duration::from_secs(2), clock.clone());

        assert!(throttle.try_acquire().is_ok());

        clock.advance(Duration::from_secs(1));
        assert!(throttle.try_acquire().is_err());

        clock.advance(Duration::from_secs(1));
        assert!(throttle.try_acquire().is_ok());
    }

    #[test]
    fn test_zero_interval_disables() {
        let clock = FakeRelativeClock::default();
        let throttle = Throttle::with_clock(Duration::ZERO, clock);

        assert!(!throttle.is_enabled());
        for _ in 0..10 {
            assert!(throttle.try_acquire().is_ok());
        }
    }

    #[test]
    fn test_debug_reports_interval() {
        let throttle = Throttle::with_clock(Duration::from_secs(2), FakeRelativeClock::default());
        let debug = format!("{:?}", throttle);
        assert!(debug.contains("min_interval: 2s"));
        assert!(debug.contains("enabled: true"));
    }

    #[tokio::test]
    async fn test_wait_spaces_requests() {
        let throttle = Throttle::new(Duration::from_millis(50));
        let start = Instant::now();

        for _ in 0..3 {
            throttle.wait().await;
        }

        // first is immediate, the next two wait one interval each
        assert!(
            start.elapsed() >= Duration::from_millis(90),
            "throttle not applied: {:?}",
            start.elapsed()
        );
    }

    #[tokio::test]
    async fn test_disabled_never_waits() {
        let throttle = Throttle::disabled();
        let start = Instant::now();

        for _ in 0..20 {
            throttle.wait().await;
        }

        assert!(start.elapsed() < Duration::from_millis(50));
    }
}
