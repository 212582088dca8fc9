use serde::Serialize;
use std::collections::HashSet;

use crate::sampler::SampleError;
use crate::session::ExclusionSet;

/// Column headers of the source spreadsheet, broadest level first.
///
/// These are the Naver DataLab taxonomy labels: 대분류 (main), 중분류 (middle),
/// 소분류 (minor), 세분류 (detailed).
pub const LEVEL_HEADERS: [&str; 4] = ["대분류", "중분류", "소분류", "세분류"];

/// One of the four fixed positions in the shopping-category hierarchy,
/// from broadest (`One`) to most specific (`Four`).
///
/// Representing the level as an enum means code past the UI parse boundary
/// cannot hold an invalid level; only [`Level::from_number`] can fail.
///
/// # Examples
/// ```
/// use catex::category::Level;
///
/// let level = Level::from_number(2).unwrap();
/// assert_eq!(level, Level::Two);
/// assert_eq!(level.included_headers(), &["대분류", "중분류"]);
/// assert!(Level::from_number(5).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum Level {
    One,
    Two,
    Three,
    Four,
}

impl Level {
    /// All levels in hierarchy order.
    pub const ALL: [Level; 4] = [Level::One, Level::Two, Level::Three, Level::Four];

    /// Parse the numeric selector value (1 through 4) used by the UI.
    pub fn from_number(number: u8) -> Result<Level, SampleError> {
        match number {
            1 => Ok(Level::One),
            2 => Ok(Level::Two),
            3 => Ok(Level::Three),
            4 => Ok(Level::Four),
            other => Err(SampleError::InvalidLevel(other.to_string())),
        }
    }

    /// Numeric form of this level (1 through 4).
    pub fn number(&self) -> u8 {
        self.index() as u8 + 1
    }

    /// Zero-based column index of this level in a [`CategoryRow`].
    pub fn index(&self) -> usize {
        match self {
            Level::One => 0,
            Level::Two => 1,
            Level::Three => 2,
            Level::Four => 3,
        }
    }

    /// Source-spreadsheet column header for this level.
    pub fn header(&self) -> &'static str {
        LEVEL_HEADERS[self.index()]
    }

    /// Ordered headers of all columns from level 1 up to and including this one.
    pub fn included_headers(&self) -> &'static [&'static str] {
        &LEVEL_HEADERS[..=self.index()]
    }
}

/// A single path down the 4-level taxonomy tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRow {
    levels: [String; 4],
}

impl CategoryRow {
    pub fn new(levels: [String; 4]) -> Self {
        Self { levels }
    }

    /// Value of this row at the given hierarchy level.
    pub fn value_at(&self, level: Level) -> &str {
        &self.levels[level.index()]
    }

    /// All four level values, broadest first.
    pub fn levels(&self) -> &[String; 4] {
        &self.levels
    }

    /// The row restricted to the columns from level 1 through `level`.
    pub fn project(&self, level: Level) -> Vec<String> {
        self.levels[..=level.index()].to_vec()
    }
}

/// Immutable, in-memory category table loaded once at startup.
///
/// Row order is the source-file order; the sampler relies on it only for
/// stable iteration, not for any contract with callers.
#[derive(Debug, Clone, Default)]
pub struct CategoryDataset {
    rows: Vec<CategoryRow>,
}

impl CategoryDataset {
    pub fn new(rows: Vec<CategoryRow>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[CategoryRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Number of distinct values at `level` across the whole dataset.
    pub fn distinct_count(&self, level: Level) -> usize {
        self.rows
            .iter()
            .map(|row| row.value_at(level))
            .collect::<HashSet<_>>()
            .len()
    }

    /// Number of distinct values at `level` still selectable under the
    /// given exclusion set. Drives the UI's "exhausted" messaging.
    pub fn available_count(&self, level: Level, exclusions: &ExclusionSet) -> usize {
        self.rows
            .iter()
            .map(|row| row.value_at(level))
            .filter(|value| !exclusions.is_excluded(level, value))
            .collect::<HashSet<_>>()
            .len()
    }
}
