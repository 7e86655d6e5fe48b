// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Rate limiting layer for RPC clients.
//!
//! The limiter hands out reservations on a virtual schedule: each request
//! moves the schedule forward by one emission interval (`period / requests`),
//! and up to `requests` calls may run ahead of it as a burst. A request whose
//! slot lies in the future sleeps until then. Reservation happens under the
//! lock and sleeping happens outside it, so waiting callers never block each
//! other.

use std::{
    future::Future,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
    time::Duration,
};

use tokio::sync::Mutex;
use tokio::time::Instant;
use tower::Layer;
use tracing::trace;

/// Tower layer limiting requests to `requests` per `period`.
#[derive(Clone, Debug)]
pub struct RateLimitLayer {
    schedule: Arc<Mutex<Schedule>>,
}

impl RateLimitLayer {
    /// Allow `requests` calls per `period`, with bursts up to `requests`.
    ///
    /// A zero request count is treated as one.
    ///
    /// ```rust
    /// use swapscan::transport::RateLimitLayer;
    /// use std::time::Duration;
    ///
    /// let per_minute = RateLimitLayer::new(100, Duration::from_secs(60));
    /// ```
    pub fn new(requests: u32, period: Duration) -> Self {
        Self {
            schedule: Arc::new(Mutex::new(Schedule::new(requests, period))),
        }
    }

    /// Allow `requests` calls per second
    pub fn per_second(requests: u32) -> Self {
        Self::new(requests, Duration::from_secs(1))
    }
}

impl<S> Layer<S> for RateLimitLayer {
    type Service = RateLimitService<S>;

    fn layer(&self, service: S) -> Self::Service {
        RateLimitService {
            service,
            schedule: Arc::clone(&self.schedule),
        }
    }
}

#[derive(Debug)]
struct Schedule {
    /// Time between two requests at the sustained rate
    interval: Duration,
    /// How far ahead of the schedule a burst may run
    burst: Duration,
    /// Theoretical time of the next request at the sustained rate
    next_slot: Option<Instant>,
}

impl Schedule {
    fn new(requests: u32, period: Duration) -> Self {
        let requests = requests.max(1);
        let interval = period / requests;
        Self {
            interval,
            burst: interval * (requests - 1),
            next_slot: None,
        }
    }

    /// Reserve a slot and return how long the caller must wait for it.
    fn reserve(&mut self, now: Instant) -> Duration {
        let slot = match self.next_slot {
            Some(slot) if slot > now => slot,
            _ => now,
        };
        let wait = slot
            .checked_sub(self.burst)
            .map(|earliest| earliest.saturating_duration_since(now))
            .unwrap_or(Duration::ZERO);
        self.next_slot = Some(slot + self.interval);
        wait
    }
}

/// Service produced by [`RateLimitLayer`].
#[derive(Clone, Debug)]
pub struct RateLimitService<S> {
    service: S,
    schedule: Arc<Mutex<Schedule>>,
}

impl<S, Request> tower::Service<Request> for RateLimitService<S>
where
    S: tower::Service<Request> + Clone + Send + 'static,
    S::Future: Send,
    Request: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&mut self, request: Request) -> Self::Future {
        let schedule = Arc::clone(&self.schedule);
        let mut service = self.service.clone();

        Box::pin(async move {
            let wait = schedule.lock().await.reserve(Instant::now());
            if !wait.is_zero() {
                trace!(wait_ms = wait.as_millis() as u64, "Rate limit reached, delaying request");
                tokio::time::sleep(wait).await;
            }
            service.call(request).await
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;
    use tower::{service_fn, ServiceExt};

    #[test]
    fn burst_is_free_then_requests_are_spaced() {
        let mut schedule = Schedule::new(4, Duration::from_secs(1));
        let now = Instant::now();

        for _ in 0..4 {
            assert_eq!(schedule.reserve(now), Duration::ZERO);
        }
        assert_eq!(schedule.reserve(now), Duration::from_millis(250));
        assert_eq!(schedule.reserve(now), Duration::from_millis(500));
    }

    #[test]
    fn idle_time_restores_burst() {
        let mut schedule = Schedule::new(2, Duration::from_secs(1));
        let start = Instant::now();

        schedule.reserve(start);
        schedule.reserve(start);
        assert!(!schedule.reserve(start).is_zero());

        let later = start + Duration::from_secs(5);
        assert_eq!(schedule.reserve(later), Duration::ZERO);
        assert_eq!(schedule.reserve(later), Duration::ZERO);
    }

    #[test]
    fn zero_requests_is_treated_as_one() {
        let mut schedule = Schedule::new(0, Duration::from_millis(100));
        let now = Instant::now();
        assert_eq!(schedule.reserve(now), Duration::ZERO);
        assert_eq!(schedule.reserve(now), Duration::from_millis(100));
    }

    #[tokio::test(start_paused = true)]
    async fn service_delays_requests_beyond_the_burst() {
        let layer = RateLimitLayer::per_second(5);
        let service = layer.layer(service_fn(|n: u32| async move { Ok::<_, Infallible>(n) }));

        let start = Instant::now();
        for i in 0..6 {
            let out = service.clone().oneshot(i).await.unwrap();
            assert_eq!(out, i);
        }

        assert!(start.elapsed() >= Duration::from_millis(200));
    }
}
