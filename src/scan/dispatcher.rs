//! Static work partitioning across a fixed pool of worker threads

use std::ops::Range;
use std::thread;
use std::time::Instant;

use super::generator::generate_candidates;
use super::prober::{HttpProber, Prober};
use super::state::{SharedState, Tally};
use crate::error::{JTokError, Result};
use crate::types::{ScanConfig, ScanSummary};
use crate::validation_error;

/// One probe result as seen by the reporter
#[derive(Debug, Clone, Copy)]
pub struct ScanEvent<'a> {
    pub username: &'a str,
    pub available: bool,
    /// Candidates probed so far, this one included
    pub checked: u64,
    pub total: u64,
    /// Hits so far, this one included
    pub found: usize,
}

/// Split `len` items into `workers` contiguous ranges.
///
/// Every range but the last holds `len / workers` items; the last one also
/// takes the remainder. With more workers than items the leading ranges are
/// empty.
pub fn partition(len: usize, workers: usize) -> Vec<Range<usize>> {
    if workers == 0 {
        return Vec::new();
    }

    let chunk = len / workers;
    (0..workers)
        .map(|i| {
            let start = i * chunk;
            let end = if i + 1 == workers { len } else { start + chunk };
            start..end
        })
        .collect()
}

/// Probe every candidate on `threads` workers and return the final tally.
///
/// `on_event` is invoked under the shared lock after each probe.
pub fn dispatch<P, F>(candidates: &[String], threads: usize, prober: &P, on_event: F) -> Result<Tally>
where
    P: Prober + ?Sized,
    F: Fn(&ScanEvent<'_>) + Sync,
{
    if threads == 0 {
        return Err(validation_error!("thread count must be at least 1"));
    }

    let state = SharedState::new();
    let total = candidates.len() as u64;

    thread::scope(|s| -> Result<()> {
        for (worker, range) in partition(candidates.len(), threads).into_iter().enumerate() {
            let chunk = &candidates[range];
            let state = &state;
            let on_event = &on_event;

            thread::Builder::new()
                .name(format!("jtok-worker-{}", worker))
                .spawn_scoped(s, move || run_worker(chunk, prober, state, total, on_event))
                .map_err(|e| JTokError::internal(format!("Failed to spawn worker {}: {}", worker, e)))?;
        }
        Ok(())
    })?;

    Ok(state.into_inner())
}

fn run_worker<P, F>(chunk: &[String], prober: &P, state: &SharedState, total: u64, on_event: &F)
where
    P: Prober + ?Sized,
    F: Fn(&ScanEvent<'_>),
{
    for username in chunk {
        let available = prober.probe(username);
        state.record(username, available, |tally, available| {
            on_event(&ScanEvent {
                username,
                available,
                checked: tally.checked_count,
                total,
                found: tally.found.len(),
            });
        });
    }
}

/// Username scanner driven by a [`ScanConfig`]
pub struct UsernameSniper {
    config: ScanConfig,
}

impl UsernameSniper {
    /// Create a scanner, rejecting invalid settings
    pub fn new(config: ScanConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Every candidate for the configured length range
    pub fn candidates(&self) -> Vec<String> {
        generate_candidates(
            self.config.min_length,
            self.config.max_length,
            self.config.charset.chars(),
        )
    }

    /// Probe `candidates` with the given prober
    pub fn run<P, F>(&self, candidates: &[String], prober: &P, on_event: F) -> Result<ScanSummary>
    where
        P: Prober + ?Sized,
        F: Fn(&ScanEvent<'_>) + Sync,
    {
        let start_time = Instant::now();
        tracing::info!(
            candidates = candidates.len(),
            threads = self.config.threads,
            base_url = %self.config.base_url,
            "Starting username scan"
        );

        let tally = dispatch(candidates, self.config.threads, prober, on_event)?;
        let elapsed = start_time.elapsed();

        tracing::info!(
            checked = tally.checked_count,
            found = tally.found.len(),
            elapsed_ms = %elapsed.as_millis(),
            "Username scan completed"
        );

        Ok(ScanSummary {
            total: candidates.len() as u64,
            checked: tally.checked_count,
            found: tally.found,
            elapsed,
        })
    }

    /// Probe `candidates` against the configured platform over HTTP.
    ///
    /// Blocks the calling thread; do not call from inside an async task.
    pub fn run_http<F>(&self, candidates: &[String], on_event: F) -> Result<ScanSummary>
    where
        F: Fn(&ScanEvent<'_>) + Sync,
    {
        let prober = HttpProber::new(&self.config);
        self.run(candidates, &prober, on_event)
    }
}
