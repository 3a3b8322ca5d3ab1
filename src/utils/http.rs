//! HTTP utilities with rate limiting
//!
//! Provides the shared client builder, a per-endpoint rate limiter, and
//! helpers that keep upstream error details short and free of secrets.

use reqwest::Client;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::debug;

/// User agent sent with every outbound request
pub const USER_AGENT: &str = concat!(
    "paperprecision/",
    env!("CARGO_PKG_VERSION"),
    " (arXiv paper summarizer)"
);

/// Longest upstream body excerpt carried into an error message
pub const MAX_DETAIL_CHARS: usize = 300;

/// Build a client with a finite overall timeout
pub fn build_client(timeout: Duration) -> Result<Client, String> {
    Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
        .map_err(|e| format!("Failed to create HTTP client: {}", e))
}

/// Rate limiter for API endpoints
pub struct RateLimiter {
    /// Window size
    window: Duration,
    /// Maximum requests per window
    max_requests: u32,
    /// Request timestamps per endpoint
    requests: Arc<Mutex<HashMap<String, Vec<Instant>>>>,
}

impl RateLimiter {
    /// Create a new rate limiter
    ///
    /// # Arguments
    /// * `window` - Time window; a zero window never limits
    /// * `max_requests` - Maximum requests allowed per window
    pub fn new(window: Duration, max_requests: u32) -> Self {
        Self {
            window,
            max_requests: max_requests.max(1),
            requests: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Check if a request can be made and record it
    ///
    /// # Returns
    /// * `true` if request is allowed
    /// * `false` if rate limit exceeded
    pub async fn check_and_record(&self, endpoint: &str) -> bool {
        let mut requests = self.requests.lock().await;
        let now = Instant::now();
        let window = self.window;

        let timestamps = requests.entry(endpoint.to_string()).or_default();

        // Remove timestamps outside the window
        timestamps.retain(|t| now.duration_since(*t) < window);

        if timestamps.len() >= self.max_requests as usize {
            debug!(
                "Rate limit hit for {}: {} requests in {:?}",
                endpoint,
                timestamps.len(),
                self.window
            );
            return false;
        }

        timestamps.push(now);
        true
    }

    /// Wait until a request can be made
    pub async fn wait_for_slot(&self, endpoint: &str) {
        loop {
            if self.check_and_record(endpoint).await {
                return;
            }
            let pause = self
                .time_until_slot(endpoint)
                .await
                .unwrap_or(Duration::from_millis(100));
            tokio::time::sleep(pause.max(Duration::from_millis(10))).await;
        }
    }

    /// Get the time until next available slot
    ///
    /// # Returns
    /// * Duration until next slot is available, or None if slot available now
    pub async fn time_until_slot(&self, endpoint: &str) -> Option<Duration> {
        let requests = self.requests.lock().await;
        let now = Instant::now();
        let window = self.window;

        let timestamps = requests.get(endpoint)?;
        let valid: Vec<&Instant> = timestamps
            .iter()
            .filter(|t| now.duration_since(**t) < window)
            .collect();

        if valid.len() < self.max_requests as usize {
            return None;
        }

        // Oldest timestamp decides when the window frees up
        valid
            .iter()
            .min()
            .map(|oldest| window.saturating_sub(now.duration_since(**oldest)))
    }
}

/// Shorten an upstream body for display, on a character boundary
pub fn excerpt(body: &str, max_chars: usize) -> String {
    let trimmed = body.trim();
    if trimmed.chars().count() <= max_chars {
        return trimmed.to_string();
    }
    let mut out: String = trimmed.chars().take(max_chars).collect();
    out.push('…');
    out
}

/// Replace every occurrence of `secret` in `text`
pub fn scrub_secret(text: &str, secret: &str) -> String {
    if secret.is_empty() {
        return text.to_string();
    }
    text.replace(secret, "[redacted]")
}
