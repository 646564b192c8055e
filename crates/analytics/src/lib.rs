//! # Gridiron Analytics Engine
//!
//! This crate turns a league's raw matchups and box scores into standings,
//! rivalries, season summaries and all-time records.
//!
//! ## Architectural Principles
//!
//! - **Layer 1 Logic:** This is a pure logic crate. It has no knowledge of external systems.
//!   It depends only on `core-types` (Layer 0).
//! - **Stateless Calculation:** Every function takes caller-owned slices and returns a fresh
//!   value. Identical input always produces identical output, so each component can be
//!   called concurrently from independent requests without locking.
//! - **Explicit Ordering:** Matchups are sorted by `(season, week)` internally before any
//!   streak or "last meeting" calculation.
//!
//! ## Public API
//!
//! - `compute_league_stats`, `compute_rivalries`, `compute_season_summary`,
//!   `find_league_records`: the four independent statistics components.
//! - `StatsEngine`: runs all four over a fetched season (or several) and assembles
//!   a `LeagueReport` / `LeagueHistory`.
//! - `rank_standings` and the `format` helpers for presentation layers.

// Declare the modules that constitute this crate.
pub mod engine;
pub mod error;
pub mod format;
pub mod ordering;
pub mod records;
pub mod report;
pub mod rivalries;
pub mod seasons;
pub mod standings;

#[cfg(test)]
mod test_support;

// Re-export the key components to create a clean, public-facing API.
pub use engine::StatsEngine;
pub use error::AnalyticsError;
pub use records::find_league_records;
pub use report::{LeagueHistory, LeagueReport};
pub use rivalries::compute_rivalries;
pub use seasons::compute_season_summary;
pub use standings::{compute_league_stats, rank_standings, StandingRow};
