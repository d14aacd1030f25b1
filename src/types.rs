//! Core types and structures for j-tok

use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::Result;
use crate::scan::Charset;
use crate::{config_error, validation_error};

/// Profile host probed by default
pub const DEFAULT_BASE_URL: &str = "https://www.tiktok.com";

/// Per-request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Worker threads used when nothing else is configured
pub const DEFAULT_THREADS: usize = 15;

pub const DEFAULT_MIN_LENGTH: usize = 2;
pub const DEFAULT_MAX_LENGTH: usize = 4;

/// Largest search space a scan will materialize
pub const MAX_CANDIDATES: u64 = 20_000_000;

/// Configuration for a username scan
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Number of worker threads (one static chunk each)
    pub threads: usize,
    /// Shortest candidate length
    pub min_length: usize,
    /// Longest candidate length
    pub max_length: usize,
    /// Alphabet candidates are drawn from
    pub charset: Charset,
    /// Scheme and host of the platform, without trailing slash
    pub base_url: String,
    /// Timeout for a single profile request
    pub timeout: Duration,
    /// Directory the results file is written to
    pub output_dir: PathBuf,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            threads: DEFAULT_THREADS,
            min_length: DEFAULT_MIN_LENGTH,
            max_length: DEFAULT_MAX_LENGTH,
            charset: Charset::Alphanumeric,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            output_dir: PathBuf::from("."),
        }
    }
}

impl ScanConfig {
    /// Reject settings that cannot produce a meaningful scan
    pub fn validate(&self) -> Result<()> {
        if self.threads == 0 {
            return Err(validation_error!("thread count must be at least 1"));
        }
        if self.min_length == 0 {
            return Err(validation_error!("min length must be at least 1"));
        }
        if self.min_length > self.max_length {
            return Err(validation_error!(
                "min length {} exceeds max length {}",
                self.min_length,
                self.max_length
            ));
        }
        match self.total_candidates() {
            Some(total) if total <= MAX_CANDIDATES => {}
            _ => {
                return Err(validation_error!(
                    "lengths {}-{} exceed the limit of {} candidates",
                    self.min_length,
                    self.max_length,
                    MAX_CANDIDATES
                ));
            }
        }
        if self.timeout.is_zero() {
            return Err(validation_error!("timeout must be greater than zero"));
        }
        reqwest::Url::parse(&self.base_url)
            .map_err(|e| config_error!("invalid base url '{}': {}", self.base_url, e))?;
        Ok(())
    }

    /// Number of candidates this configuration enumerates, `None` if it does
    /// not fit in a `u64`
    pub fn total_candidates(&self) -> Option<u64> {
        crate::scan::total_for_range(self.min_length, self.max_length, self.charset.chars().len())
    }
}

/// Outcome of a finished scan
#[derive(Debug, Clone, Serialize)]
pub struct ScanSummary {
    /// Candidates generated
    pub total: u64,
    /// Candidates probed
    pub checked: u64,
    /// Hits in completion order
    pub found: Vec<String>,
    pub elapsed: Duration,
}

impl ScanSummary {
    pub fn found_count(&self) -> usize {
        self.found.len()
    }
}
