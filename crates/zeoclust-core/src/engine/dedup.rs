use super::stats::EnumerationStats;
use crate::core::models::combination::{CanonicalKey, Combination};
use std::collections::HashSet;

/// Canonical keys already recorded during one enumeration run.
#[derive(Debug, Clone, Default)]
pub struct SeenTable {
    keys: HashSet<CanonicalKey>,
}

impl SeenTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `key`, returning `true` if it had not been seen before.
    pub fn mark(&mut self, key: &CanonicalKey) -> bool {
        if self.keys.contains(key) {
            return false;
        }
        self.keys.insert(key.clone());
        true
    }

    pub fn contains(&self, key: &CanonicalKey) -> bool {
        self.keys.contains(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Merges per-unit candidate batches in batch order.
///
/// The first combination recorded for a canonical key wins; later ones are
/// counted as duplicates. Once `max_results` distinct combinations are kept,
/// further new keys are still marked but counted as truncated.
pub fn merge_candidates(
    batches: impl IntoIterator<Item = Vec<Combination>>,
    seen: &mut SeenTable,
    max_results: Option<usize>,
    stats: &mut EnumerationStats,
) -> Vec<Combination> {
    let limit = max_results.unwrap_or(usize::MAX);
    let mut kept = Vec::new();
    for combination in batches.into_iter().flatten() {
        if !seen.mark(combination.key()) {
            stats.duplicates += 1;
        } else if kept.len() >= limit {
            stats.truncated += 1;
        } else {
            kept.push(combination);
        }
    }
    kept
}
