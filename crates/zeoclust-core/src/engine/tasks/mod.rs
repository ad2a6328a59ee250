//! Computational units of a screening run.
//!
//! The enumeration tasks search for charge-balanced combinations, matching
//! pairs them with templates of the same slot count, and conformer building
//! turns each pairing into coordinates. Enumeration and building run over
//! independent work items and use rayon when the `parallel` feature is on.

pub mod conformer_build;
pub mod matching;
pub mod mixed_enumeration;
pub mod pure_enumeration;

use super::config::EnumerationConfig;
use super::dedup::{SeenTable, merge_candidates};
use super::stats::EnumerationStats;
use crate::core::models::combination::Combination;
use tracing::debug;

/// Distinct combinations produced by an enumeration task.
#[derive(Debug, Clone, Default)]
pub struct EnumerationOutcome {
    pub combinations: Vec<Combination>,
    pub stats: EnumerationStats,
}

/// Reduces per-unit batches into one deduplicated, ordered outcome.
pub(crate) fn collect_outcome(
    batches: Vec<(Vec<Combination>, EnumerationStats)>,
    config: &EnumerationConfig,
) -> EnumerationOutcome {
    let mut stats = EnumerationStats::default();
    let mut seen = SeenTable::new();
    let mut candidates = Vec::with_capacity(batches.len());
    for (batch, batch_stats) in batches {
        stats += batch_stats;
        candidates.push(batch);
    }
    let combinations = merge_candidates(candidates, &mut seen, config.max_results, &mut stats);

    debug!(
        units = stats.units,
        accepted = stats.accepted,
        duplicates = stats.duplicates,
        rejected = stats.rejected(),
        truncated = stats.truncated,
        "Enumeration candidates reduced."
    );
    EnumerationOutcome {
        combinations,
        stats,
    }
}
