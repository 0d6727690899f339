//! Token bucket shared by every outbound SRD request

use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

#[derive(Debug)]
struct Bucket {
    tokens: f64,
    last_refill: Instant,
}

/// Allows bursts of up to `capacity` requests and refills at
/// `per_second` tokens per second.
#[derive(Debug)]
pub struct RateLimiter {
    bucket: Mutex<Bucket>,
    capacity: f64,
    per_second: f64,
}

impl RateLimiter {
    pub fn new(capacity: u32, per_second: u32) -> Self {
        let capacity = f64::from(capacity.max(1));
        Self {
            bucket: Mutex::new(Bucket {
                tokens: capacity,
                last_refill: Instant::now(),
            }),
            capacity,
            per_second: f64::from(per_second.max(1)),
        }
    }

    /// Wait until a token is available and take it
    pub async fn acquire(&self) {
        loop {
            let wait = {
                let mut bucket = self.bucket.lock().await;
                let now = Instant::now();
                let elapsed = now.duration_since(bucket.last_refill).as_secs_f64();
                bucket.tokens = (bucket.tokens + elapsed * self.per_second).min(self.capacity);
                bucket.last_refill = now;

                if bucket.tokens >= 1.0 {
                    bucket.tokens -= 1.0;
                    return;
                }
                Duration::from_secs_f64((1.0 - bucket.tokens) / self.per_second)
            };
            tokio::time::sleep(wait).await;
        }
    }
}
