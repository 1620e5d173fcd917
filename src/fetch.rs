use std::time::Duration;

use tracing::{error, info, info_span, instrument, warn};

use crate::error::WatchError;

/// Source of the raw listing page.
pub trait Fetcher: Send + Sync {
    fn fetch(&self) -> Result<Vec<u8>, WatchError>;
}

/// Exponential backoff between fetch attempts, capped at `max_backoff`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            initial_backoff: Duration::from_secs(1),
            max_backoff: Duration::from_secs(30),
        }
    }
}

impl RetryPolicy {
    /// One attempt, no waiting.
    pub fn none() -> Self {
        Self { max_attempts: 1, initial_backoff: Duration::ZERO, max_backoff: Duration::ZERO }
    }

    /// Delay after the failed attempt numbered `attempt` (0-based).
    pub fn backoff(&self, attempt: u32) -> Duration {
        self.initial_backoff
            .saturating_mul(2u32.saturating_pow(attempt))
            .min(self.max_backoff)
    }

    /// Run `op` until it succeeds or attempts run out, calling `sleep`
    /// between failures. The last failure reason is kept in the error.
    pub fn run<T, F, S>(&self, mut op: F, mut sleep: S) -> Result<T, WatchError>
    where
        F: FnMut(u32) -> Result<T, String>,
        S: FnMut(Duration),
    {
        let attempts = self.max_attempts.max(1);
        let mut last_reason = String::new();
        for attempt in 0..attempts {
            match op(attempt) {
                Ok(value) => return Ok(value),
                Err(reason) => {
                    warn!(attempt = attempt + 1, max_attempts = attempts, error = %reason, "Fetch attempt failed");
                    last_reason = reason;
                    if attempt + 1 < attempts {
                        sleep(self.backoff(attempt));
                    }
                }
            }
        }
        Err(WatchError::Fetch { attempts, reason: last_reason })
    }
}

/// Blocking HTTP agent whose requests give up after `timeout` in total.
pub fn http_agent(timeout: Duration) -> ureq::Agent {
    ureq::Agent::config_builder()
        .timeout_global(Some(timeout))
        .build()
        .into()
}

/// Blocking HTTP fetcher for the registration page.
#[derive(Clone)]
pub struct HttpFetcher {
    url: String,
    agent: ureq::Agent,
    retry: RetryPolicy,
}

impl HttpFetcher {
    pub fn new(url: impl Into<String>, retry: RetryPolicy, timeout: Duration) -> Self {
        Self { url: url.into(), agent: http_agent(timeout), retry }
    }

    fn fetch_once(&self) -> Result<Vec<u8>, String> {
        let response = {
            let _span = info_span!("page_fetch", url = %self.url).entered();
            self.agent.get(&self.url).call()
        };
        let response = response.map_err(|e| format!("Request failed: {}", e))?;
        let mut body = response.into_body();
        body.read_to_vec().map_err(|e| format!("Failed to read response body: {}", e))
    }
}

impl Fetcher for HttpFetcher {
    #[instrument(level = "info", skip(self), fields(url = %self.url))]
    fn fetch(&self) -> Result<Vec<u8>, WatchError> {
        let result = self.retry.run(|_| self.fetch_once(), std::thread::sleep);
        match &result {
            Ok(body) => info!(bytes = body.len(), "Fetched listing page"),
            Err(e) => error!(error = %e, "Giving up on listing page"),
        }
        result
    }
}
