//! Profile page prober

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, REFERER};

use super::classifier::classify;
use crate::error::{JTokError, Result};
use crate::types::ScanConfig;

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";
const REFERER_URL: &str = "https://www.tiktok.com/";

/// Something that can decide whether a username is available.
///
/// Implementations are shared across worker threads and must not panic on
/// transport failures; a failed check is simply "not available".
pub trait Prober: Sync {
    fn probe(&self, username: &str) -> bool;
}

impl<F> Prober for F
where
    F: Fn(&str) -> bool + Sync,
{
    fn probe(&self, username: &str) -> bool {
        self(username)
    }
}

/// Blocking HTTP prober for `<base_url>/@<username>`
pub struct HttpProber {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl HttpProber {
    /// Create a prober from scan settings.
    ///
    /// Must be called outside of an async context; the blocking client owns
    /// its own runtime.
    pub fn new(config: &ScanConfig) -> Self {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(REFERER, HeaderValue::from_static(REFERER_URL));

        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .pool_max_idle_per_host(config.threads)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Failed to create configured HTTP client: {}. Using default.", e);
                Client::new()
            });

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout: config.timeout,
        }
    }

    /// Profile URL probed for a username
    pub fn profile_url(&self, username: &str) -> String {
        format!("{}/@{}", self.base_url, username)
    }

    /// Fetch the profile page and classify it, surfacing transport errors
    pub fn check(&self, username: &str) -> Result<bool> {
        let url = self.profile_url(username);
        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|e| self.transport_error(e))?;

        let status = response.status().as_u16();
        if status != 200 {
            return Ok(false);
        }

        let body = response.text().map_err(|e| {
            if e.is_timeout() {
                self.transport_error(e)
            } else {
                JTokError::network(e.to_string(), Some(status), Some(url))
            }
        })?;

        Ok(classify(username, status, &body))
    }

    fn transport_error(&self, err: reqwest::Error) -> JTokError {
        if err.is_timeout() {
            JTokError::timeout("Profile request", self.timeout.as_secs())
        } else {
            err.into()
        }
    }
}

impl Prober for HttpProber {
    fn probe(&self, username: &str) -> bool {
        match self.check(username) {
            Ok(available) => available,
            Err(e) if e.is_transport() => {
                tracing::debug!(username = %username, error = %e, "Profile check failed");
                false
            }
            Err(e) => {
                tracing::warn!(username = %username, error = %e, "Unexpected profile check error");
                false
            }
        }
    }
}
