/*!
# catex — Random Shopping Category Extractor

A small interactive utility for the Naver DataLab shopping-category taxonomy,
built in Rust.

## Overview

The application loads a spreadsheet of hierarchical shopping categories (four
nested levels: 대분류, 중분류, 소분류, 세분류) and lets a user draw a random,
non-repeating sample of categories at a chosen hierarchy level. Values drawn
earlier in the session are excluded from later draws until an explicit reset.
The current result can be downloaded as an Excel file.

## Architecture

- **Category Store** — an immutable, in-memory table of 4-level category rows,
  loaded once at startup from an `.xlsx`/`.xls`/`.csv` file.
- **Sampler** — a pure function that draws `n` distinct values at a level
  (uniformly, without replacement, skipping excluded values) and returns the
  matching rows projected onto the columns up through that level,
  deduplicated. Requesting more values than remain available yields an empty
  "selection exhausted" result, not an error.
- **Session state** — a per-level exclusion set, grown after each non-empty
  draw and cleared on reset. One session, serialized actions, no persistence.
- **Exporter** — encodes a sample result as a single-sheet XLSX workbook (or
  CSV text).

## Modules

- **category**: `Level`, `CategoryRow`, and the immutable `CategoryDataset`
- **session**: the session-scoped `ExclusionSet`
- **sampler**: the `sample` function, `SampleResult`, and the error taxonomy
- **loader**: dataset import (Excel via calamine, CSV)
- **downloader**: export functionality (XLSX, CSV)
- **app**: axum routing and handlers (requires the `web` feature)

## REST API Endpoints

- `GET /` - Serves the single-page UI
- `POST /api/sample` - Draws a sample (`{"n": 2, "level": 1}`)
- `POST /api/reset` - Clears the exclusion set
- `GET /api/exclusions` - Per-level excluded values
- `GET /api/export` - Downloads the last result as `random_categories.xlsx`
*/

// Re-export all modules so they appear in the documentation
pub mod category;
pub mod downloader;
pub mod loader;
pub mod sampler;
pub mod session;

#[cfg(feature = "web")]
pub mod app;

/// Re-export the core types to make them easier to use
pub use category::{CategoryDataset, CategoryRow, LEVEL_HEADERS, Level};
pub use sampler::{SampleError, SampleResult, sample, validate_count};
pub use session::ExclusionSet;
