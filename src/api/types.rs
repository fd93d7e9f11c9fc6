//! Shared types for the HTTP layer.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::config::ServerConfig;
use crate::inference::DefaultSymptomAnalyzer;

/// Window for the general request limit.
pub const REQUEST_WINDOW: Duration = Duration::from_secs(15 * 60);
/// Window for the symptom analysis limit.
pub const ANALYSIS_WINDOW: Duration = Duration::from_secs(60 * 60);

// ═══════════════════════════════════════════════════════════
// API context: shared state for the router
// ═══════════════════════════════════════════════════════════

/// Shared context for all API routes and middleware.
#[derive(Clone)]
pub struct ApiContext {
    pub analyzer: Arc<DefaultSymptomAnalyzer>,
    pub client_url: String,
    /// Take the rate-limit key from `X-Forwarded-For` instead of the peer address.
    pub trust_proxy: bool,
    pub request_limiter: Arc<Mutex<RateLimiter>>,
    pub analysis_limiter: Arc<Mutex<RateLimiter>>,
}

impl ApiContext {
    pub fn new(analyzer: Arc<DefaultSymptomAnalyzer>, config: &ServerConfig) -> Self {
        Self {
            analyzer,
            client_url: config.client_url.clone(),
            trust_proxy: config.trust_proxy,
            request_limiter: Arc::new(Mutex::new(RateLimiter::new(
                config.requests_per_window,
                REQUEST_WINDOW,
            ))),
            analysis_limiter: Arc::new(Mutex::new(RateLimiter::new(
                config.analysis_per_hour,
                ANALYSIS_WINDOW,
            ))),
        }
    }
}

// ═══════════════════════════════════════════════════════════
// Rate limiter: sliding window per client key
// ═══════════════════════════════════════════════════════════

pub struct RateLimiter {
    windows: HashMap<String, Vec<Instant>>,
    limit: u32,
    window: Duration,
    last_sweep: Instant,
}

impl RateLimiter {
    pub fn new(limit: u32, window: Duration) -> Self {
        Self {
            windows: HashMap::new(),
            limit,
            window,
            last_sweep: Instant::now(),
        }
    }

    /// Check if a client is within its limit. Returns `Ok(())` or
    /// `Err(retry_after_secs)` if exceeded.
    pub fn check(&mut self, key: &str) -> Result<(), u64> {
        self.check_at(key, Instant::now())
    }

    fn check_at(&mut self, key: &str, now: Instant) -> Result<(), u64> {
        self.evict_expired(now);

        let window = self.window;
        let entries = self.windows.entry(key.to_string()).or_default();

        entries.retain(|ts| now.duration_since(*ts) < window);

        if entries.len() as u32 >= self.limit {
            let oldest = entries.first().copied().unwrap_or(now);
            let remaining = window.saturating_sub(now.duration_since(oldest));
            return Err(remaining.as_secs().max(1));
        }

        entries.push(now);
        Ok(())
    }

    /// Drop clients with no timestamps left in the window. Runs at most once per window.
    fn evict_expired(&mut self, now: Instant) {
        if now.duration_since(self.last_sweep) < self.window {
            return;
        }
        let window = self.window;
        let before = self.windows.len();
        self.windows.retain(|_, entries| {
            entries.retain(|ts| now.duration_since(*ts) < window);
            !entries.is_empty()
        });
        self.last_sweep = now;
        tracing::debug!(
            evicted = before - self.windows.len(),
            remaining = self.windows.len(),
            "Rate limiter swept"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn limiter_allows_up_to_limit() {
        let mut limiter = RateLimiter::new(3, Duration::from_secs(60));
        assert!(limiter.check("a").is_ok());
        assert!(limiter.check("a").is_ok());
        assert!(limiter.check("a").is_ok());
        let retry = limiter.check("a").unwrap_err();
        assert!(retry >= 1 && retry <= 60);
    }

    #[test]
    fn limiter_keys_are_independent() {
        let mut limiter = RateLimiter::new(1, Duration::from_secs(60));
        assert!(limiter.check("a").is_ok());
        assert!(limiter.check("b").is_ok());
        assert!(limiter.check("a").is_err());
    }

    #[test]
    fn limiter_window_slides() {
        let mut limiter = RateLimiter::new(1, Duration::from_secs(60));
        let start = Instant::now();
        assert!(limiter.check_at("a", start).is_ok());
        assert!(limiter.check_at("a", start + Duration::from_secs(30)).is_err());
        assert!(limiter.check_at("a", start + Duration::from_secs(61)).is_ok());
    }

    #[test]
    fn expired_clients_are_evicted() {
        let mut limiter = RateLimiter::new(5, Duration::from_secs(60));
        let start = Instant::now();
        for i in 0..10_000 {
            assert!(limiter.check_at(&format!("client-{i}"), start).is_ok());
        }
        assert_eq!(limiter.windows.len(), 10_000);

        let later = start + Duration::from_secs(3600);
        assert!(limiter.check_at("late", later).is_ok());
        assert_eq!(limiter.windows.len(), 1);
        assert!(limiter.windows.contains_key("late"));
    }

    #[test]
    fn active_clients_survive_a_sweep() {
        let mut limiter = RateLimiter::new(1, Duration::from_secs(60));
        let start = Instant::now();
        assert!(limiter.check_at("old", start).is_ok());
        assert!(limiter.check_at("recent", start + Duration::from_secs(50)).is_ok());

        // Sweep at 70s: "old" expired, "recent" still counts against its limit.
        assert!(limiter.check_at("other", start + Duration::from_secs(70)).is_ok());
        assert!(!limiter.windows.contains_key("old"));
        assert!(limiter.check_at("recent", start + Duration::from_secs(71)).is_err());
    }

    #[test]
    fn zero_limit_rejects_everything() {
        let mut limiter = RateLimiter::new(0, Duration::from_secs(60));
        assert!(limiter.check("a").is_err());
    }
}
