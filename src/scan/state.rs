//! Shared scan tally

use parking_lot::Mutex;

/// Counters and hits accumulated by all workers
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tally {
    /// Candidates probed so far
    pub checked_count: u64,
    /// Available usernames in completion order
    pub found: Vec<String>,
}

/// Tally shared by the worker pool, every update behind one lock
#[derive(Debug, Default)]
pub struct SharedState {
    inner: Mutex<Tally>,
}

impl SharedState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one probe result.
    ///
    /// `on_update` runs while the lock is held, so anything it prints is
    /// serialized with the update it describes.
    pub fn record<F>(&self, username: &str, available: bool, on_update: F)
    where
        F: FnOnce(&Tally, bool),
    {
        let mut tally = self.inner.lock();
        tally.checked_count += 1;
        if available {
            tally.found.push(username.to_string());
        }
        on_update(&tally, available);
    }

    pub fn into_inner(self) -> Tally {
        self.inner.into_inner()
    }
}
