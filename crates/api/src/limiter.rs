//! Per-client token-bucket rate limiter.
//!
//! One bucket per remote IP, refilled continuously and consumed one token
//! per admitted request. The bucket map is the only mutable process-wide
//! state; a single mutex guards it (bucket math is O(1), contention is
//! light). A background sweep evicts buckets idle beyond a threshold so
//! memory stays bounded under churn of ephemeral clients.

use std::collections::HashMap;
use std::net::IpAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

use crate::config::RateLimitConfig;

/// How often the background sweep runs.
const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

/// Buckets untouched for longer than this are evicted.
const IDLE_THRESHOLD: Duration = Duration::from_secs(180);

/// Per-client bucket state.
#[derive(Debug)]
struct Bucket {
    /// Tokens remaining, fractional to keep refill math exact.
    tokens: f64,
    /// Last time this bucket was touched; drives both refill and eviction.
    last_seen: Instant,
}

/// Admits or rejects requests per originating client IP.
///
/// Constructed once at startup and shared via `Arc`; restart resets all
/// buckets (no persistence).
pub struct TokenBucketLimiter {
    config: RateLimitConfig,
    clients: Mutex<HashMap<IpAddr, Bucket>>,
}

impl TokenBucketLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        Self {
            config,
            clients: Mutex::new(HashMap::new()),
        }
    }

    /// Admit or reject one request from `client`.
    ///
    /// Refills `elapsed * rps` tokens capped at the burst capacity, then
    /// consumes one token when at least one is available. Rejection
    /// consumes nothing. When the limiter is disabled this always admits
    /// and does no bookkeeping.
    pub fn allow(&self, client: IpAddr) -> bool {
        if !self.config.enabled {
            return true;
        }

        let now = Instant::now();
        let mut clients = self.clients.lock().expect("limiter mutex poisoned");

        let bucket = clients.entry(client).or_insert(Bucket {
            tokens: self.config.burst,
            last_seen: now,
        });

        let elapsed = now.duration_since(bucket.last_seen).as_secs_f64();
        bucket.tokens = self
            .config
            .burst
            .min(bucket.tokens + elapsed * self.config.requests_per_second);
        bucket.last_seen = now;

        if bucket.tokens >= 1.0 {
            bucket.tokens -= 1.0;
            true
        } else {
            false
        }
    }

    /// Evict buckets idle beyond [`IDLE_THRESHOLD`]. Returns the number of
    /// entries removed.
    pub fn sweep_idle(&self) -> usize {
        let now = Instant::now();
        let mut clients = self.clients.lock().expect("limiter mutex poisoned");
        let before = clients.len();
        clients.retain(|_, bucket| now.duration_since(bucket.last_seen) < IDLE_THRESHOLD);
        before - clients.len()
    }

    /// Number of tracked clients. Used by tests and the sweep log line.
    pub fn tracked_clients(&self) -> usize {
        self.clients.lock().expect("limiter mutex poisoned").len()
    }

    /// Spawn the background sweep task, owned by this limiter.
    ///
    /// Runs every [`SWEEP_INTERVAL`] until `cancel` is triggered.
    pub fn start_sweeper(self: &Arc<Self>, cancel: CancellationToken) -> JoinHandle<()> {
        let limiter = Arc::clone(self);
        tokio::spawn(async move {
            tracing::info!(
                interval_secs = SWEEP_INTERVAL.as_secs(),
                idle_secs = IDLE_THRESHOLD.as_secs(),
                "rate limiter sweep started"
            );

            let mut interval = tokio::time::interval(SWEEP_INTERVAL);

            loop {
                tokio::select! {
                    _ = cancel.cancelled() => {
                        tracing::info!("rate limiter sweep stopping");
                        break;
                    }
                    _ = interval.tick() => {
                        let evicted = limiter.sweep_idle();
                        if evicted > 0 {
                            tracing::debug!(
                                evicted,
                                remaining = limiter.tracked_clients(),
                                "rate limiter sweep: evicted idle clients"
                            );
                        }
                    }
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use std::net::Ipv4Addr;

    use super::*;

    fn limiter(rps: f64, burst: f64) -> TokenBucketLimiter {
        TokenBucketLimiter::new(RateLimitConfig {
            enabled: true,
            requests_per_second: rps,
            burst,
        })
    }

    fn client(n: u8) -> IpAddr {
        IpAddr::V4(Ipv4Addr::new(10, 0, 0, n))
    }

    #[tokio::test(start_paused = true)]
    async fn burst_then_reject_until_refill() {
        let limiter = limiter(2.0, 4.0);
        let ip = client(1);

        // The full burst is available immediately.
        for _ in 0..4 {
            assert!(limiter.allow(ip));
        }
        // Exhausted: rejected, and rejection consumes nothing.
        assert!(!limiter.allow(ip));
        assert!(!limiter.allow(ip));

        // After 500ms at 2 tokens/sec exactly one token has refilled.
        tokio::time::advance(Duration::from_millis(500)).await;
        assert!(limiter.allow(ip));
        assert!(!limiter.allow(ip));
    }

    #[tokio::test(start_paused = true)]
    async fn bucket_never_exceeds_capacity() {
        let limiter = limiter(2.0, 4.0);
        let ip = client(2);

        assert!(limiter.allow(ip));

        // A long quiet period refills far more than the capacity would
        // hold; the cap limits the spendable burst to exactly 4.
        tokio::time::advance(Duration::from_secs(3600)).await;
        for _ in 0..4 {
            assert!(limiter.allow(ip));
        }
        assert!(!limiter.allow(ip));
    }

    #[tokio::test(start_paused = true)]
    async fn clients_have_independent_buckets() {
        let limiter = limiter(1.0, 1.0);

        assert!(limiter.allow(client(3)));
        assert!(!limiter.allow(client(3)));

        // A different client is unaffected by the first one's exhaustion.
        assert!(limiter.allow(client(4)));
    }

    #[tokio::test(start_paused = true)]
    async fn disabled_limiter_always_admits_without_state() {
        let limiter = TokenBucketLimiter::new(RateLimitConfig {
            enabled: false,
            requests_per_second: 1.0,
            burst: 1.0,
        });

        for _ in 0..100 {
            assert!(limiter.allow(client(5)));
        }
        assert_eq!(limiter.tracked_clients(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn sweep_evicts_only_idle_clients() {
        let limiter = limiter(2.0, 4.0);

        assert!(limiter.allow(client(6)));
        tokio::time::advance(Duration::from_secs(170)).await;
        assert!(limiter.allow(client(7)));
        assert_eq!(limiter.tracked_clients(), 2);

        // Client 6 is now idle for 180s, client 7 for only 10s.
        tokio::time::advance(Duration::from_secs(10)).await;
        assert_eq!(limiter.sweep_idle(), 1);
        assert_eq!(limiter.tracked_clients(), 1);

        // An evicted client starts over with a fresh full bucket.
        for _ in 0..4 {
            assert!(limiter.allow(client(6)));
        }
        assert!(!limiter.allow(client(6)));
    }
}
