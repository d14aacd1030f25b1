//! Username scanning - enumerate short names and probe each profile page
//!
//! Candidates are generated up front, split into static chunks and probed by
//! a fixed pool of worker threads that share one locked tally.

mod classifier;
mod dispatcher;
mod generator;
mod prober;
mod state;

pub use classifier::{classify, has_profile_marker, is_not_found_page};
pub use dispatcher::{dispatch, partition, ScanEvent, UsernameSniper};
pub use generator::{generate_candidates, UsernameGenerator};
pub use prober::{HttpProber, Prober};
pub use state::{SharedState, Tally};

/// Character set for username generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Charset {
    /// Only lowercase letters (a-z)
    Letters,
    /// Letters and digits (a-z, 0-9)
    #[default]
    Alphanumeric,
}

impl Charset {
    pub fn chars(&self) -> &'static [char] {
        match self {
            Charset::Letters => &[
                'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm',
                'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z',
            ],
            Charset::Alphanumeric => &[
                'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm',
                'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z',
                '0', '1', '2', '3', '4', '5', '6', '7', '8', '9',
            ],
        }
    }
}

/// `base^length`, or `None` if it does not fit in a `u64`
pub fn combinations(base: usize, length: usize) -> Option<u64> {
    let exp = u32::try_from(length).ok()?;
    (base as u64).checked_pow(exp)
}

/// Number of strings of every length in `min..=max` over an alphabet of
/// `base` symbols, or `None` on overflow
pub fn total_for_range(min_length: usize, max_length: usize, base: usize) -> Option<u64> {
    (min_length..=max_length).try_fold(0u64, |acc, len| acc.checked_add(combinations(base, len)?))
}
