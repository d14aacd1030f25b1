//! Candidate username generator

/// Index-addressable generator for every name of one length over an alphabet
pub struct UsernameGenerator<'a> {
    alphabet: &'a [char],
    length: usize,
    current_index: u64,
    total: u64,
}

impl<'a> UsernameGenerator<'a> {
    /// Create a new generator for names of given length
    pub fn new(length: usize, alphabet: &'a [char]) -> Self {
        // Spaces past u64 are clamped; every index below the clamp still maps
        // to the right name.
        let total = super::combinations(alphabet.len(), length).unwrap_or(u64::MAX);
        Self {
            alphabet,
            length,
            current_index: 0,
            total,
        }
    }

    /// Get total number of combinations
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Name at a position in lexicographic order, if in range
    pub fn name_at(&self, index: u64) -> Option<String> {
        if index >= self.total {
            return None;
        }

        let base = self.alphabet.len() as u64;
        let mut result = vec![' '; self.length];
        let mut n = index;

        for i in (0..self.length).rev() {
            result[i] = self.alphabet[(n % base) as usize];
            n /= base;
        }

        Some(result.into_iter().collect())
    }

    pub fn remaining(&self) -> u64 {
        self.total.saturating_sub(self.current_index)
    }
}

impl Iterator for UsernameGenerator<'_> {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        let name = self.name_at(self.current_index)?;
        self.current_index += 1;
        Some(name)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.remaining()).unwrap_or(usize::MAX);
        (remaining, Some(remaining))
    }
}

/// Materialize every candidate of length `min..=max`, shortest first
pub fn generate_candidates(min_length: usize, max_length: usize, alphabet: &[char]) -> Vec<String> {
    let capacity = super::total_for_range(min_length, max_length, alphabet.len())
        .and_then(|total| usize::try_from(total).ok())
        .unwrap_or(0);
    let mut candidates = Vec::with_capacity(capacity);

    for length in min_length..=max_length {
        candidates.extend(UsernameGenerator::new(length, alphabet));
    }

    candidates
}
