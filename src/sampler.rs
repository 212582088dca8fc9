use rand::Rng;
use rand::seq::SliceRandom;
use serde::Serialize;
use std::collections::HashSet;
use thiserror::Error;

use crate::category::{CategoryDataset, Level};
use crate::session::ExclusionSet;

/// Errors a calling UI can provoke with bad inputs.
///
/// Exhaustion (fewer distinct values available than requested) is not an
/// error; it yields an empty [`SampleResult`] so the caller can tell the
/// user to reset.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SampleError {
    #[error("invalid category level '{0}', expected 1 through 4")]
    InvalidLevel(String),
    #[error("sample size must be a positive integer, got {0}")]
    InvalidCount(i64),
}

/// Deduplicated rows matching a randomly chosen subset of values at one
/// level, projected onto the columns from level 1 through that level.
///
/// Ephemeral: recomputed on every draw, retained only for display and for
/// the download that immediately follows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SampleResult {
    level: Level,
    columns: Vec<&'static str>,
    rows: Vec<Vec<String>>,
}

impl SampleResult {
    fn new(level: Level, rows: Vec<Vec<String>>) -> Self {
        Self {
            level,
            columns: level.included_headers().to_vec(),
            rows,
        }
    }

    /// The level the draw was made at (its column is the last one).
    pub fn level(&self) -> Level {
        self.level
    }

    /// Ordered headers of the included columns.
    pub fn columns(&self) -> &[&'static str] {
        &self.columns
    }

    /// The projected, deduplicated rows.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct values at the sampled level, in row order.
    pub fn level_values(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.rows
            .iter()
            .filter_map(|row| row.last())
            .map(String::as_str)
            .filter(|value| seen.insert(*value))
            .collect()
    }
}

/// Validate the raw sample size coming from the UI.
pub fn validate_count(n: i64) -> Result<usize, SampleError> {
    if n < 1 {
        return Err(SampleError::InvalidCount(n));
    }
    Ok(n as usize)
}

/// Draw `n` distinct values at `level`, skipping excluded ones, and return
/// every matching row projected onto the columns up through `level`.
///
/// The draw is uniform without replacement: every size-`n` subset of the
/// still-available distinct values is equally likely. When fewer than `n`
/// distinct values remain, the result is empty (headers only) — the
/// "selection exhausted" outcome, which is not an error.
///
/// Pure with respect to the exclusion set: recording the selection is the
/// caller's job, via [`ExclusionSet::record_selection`]. Row order follows
/// dataset order after deduplication and is not part of the contract.
///
/// # Examples
/// ```
/// use catex::category::{CategoryDataset, CategoryRow, Level};
/// use catex::sampler::sample;
/// use catex::session::ExclusionSet;
/// use rand::SeedableRng;
/// use rand::rngs::StdRng;
///
/// let dataset = CategoryDataset::new(vec![
///     CategoryRow::new(["패션의류".into(), "여성의류".into(), "원피스".into(), "미니원피스".into()]),
///     CategoryRow::new(["식품".into(), "음료".into(), "커피".into(), "원두커피".into()]),
/// ]);
/// let exclusions = ExclusionSet::new();
/// let mut rng = StdRng::seed_from_u64(1);
///
/// let result = sample(&dataset, 1, Level::One, &exclusions, &mut rng).unwrap();
/// assert_eq!(result.columns(), &["대분류"]);
/// assert_eq!(result.rows().len(), 1);
/// ```
pub fn sample<R: Rng + ?Sized>(
    dataset: &CategoryDataset,
    n: usize,
    level: Level,
    exclusions: &ExclusionSet,
    rng: &mut R,
) -> Result<SampleResult, SampleError> {
    if n == 0 {
        return Err(SampleError::InvalidCount(0));
    }

    // Single net-effect exclusion filter: rows dropped here never contribute
    // to the available values or to the projected output.
    let candidates: Vec<_> = dataset
        .rows()
        .iter()
        .filter(|row| !exclusions.is_excluded(level, row.value_at(level)))
        .collect();

    // Distinct values at the target level, first-appearance order.
    let mut seen = HashSet::new();
    let mut available: Vec<&str> = Vec::new();
    for row in &candidates {
        let value = row.value_at(level);
        if seen.insert(value) {
            available.push(value);
        }
    }

    if n > available.len() {
        // Selection exhausted: empty result with the correct headers.
        return Ok(SampleResult::new(level, Vec::new()));
    }

    let chosen: HashSet<&str> = available.choose_multiple(rng, n).copied().collect();

    let mut dedup = HashSet::new();
    let mut rows = Vec::new();
    for row in candidates {
        if !chosen.contains(row.value_at(level)) {
            continue;
        }
        let projected = row.project(level);
        if dedup.insert(projected.clone()) {
            rows.push(projected);
        }
    }

    Ok(SampleResult::new(level, rows))
}
