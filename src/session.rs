use std::collections::{HashMap, HashSet};

use crate::category::Level;
use crate::sampler::SampleResult;

/// Session-scoped record of previously sampled values, keyed by level.
///
/// Created empty when the session starts, grown by union after every
/// non-empty draw, and cleared unconditionally on reset. Never persisted.
#[derive(Debug, Clone, Default)]
pub struct ExclusionSet {
    excluded: HashMap<Level, HashSet<String>>,
}

impl ExclusionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// True if `value` was already drawn at `level` in this session.
    pub fn is_excluded(&self, level: Level, value: &str) -> bool {
        self.excluded
            .get(&level)
            .is_some_and(|values| values.contains(value))
    }

    /// Values excluded so far at `level`, if any.
    pub fn excluded_at(&self, level: Level) -> Option<&HashSet<String>> {
        self.excluded.get(&level)
    }

    /// Add a single value to the excluded set for `level`.
    pub fn exclude(&mut self, level: Level, value: String) {
        self.excluded.entry(level).or_default().insert(value);
    }

    /// Union every distinct sampled-level value of `result` into the set for
    /// its level. Idempotent; calling again with the same result is a no-op.
    ///
    /// Callers invoke this only for non-empty results, after showing them.
    pub fn record_selection(&mut self, result: &SampleResult) {
        if result.is_empty() {
            return;
        }
        let values = self.excluded.entry(result.level()).or_default();
        for value in result.level_values() {
            values.insert(value.to_string());
        }
    }

    /// Drop all excluded values for every level.
    pub fn reset(&mut self) {
        self.excluded.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.excluded.values().all(HashSet::is_empty)
    }
}
