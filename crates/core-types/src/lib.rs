pub mod enums;
pub mod error;
pub mod stats;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::{Outcome, Side};
pub use error::CoreError;
pub use stats::{
    BenchRecord, BlowoutRecord, LeagueRecords, LeagueStats, RivalryStats, ScoreRecord,
    SeasonSummary, StreakRecord,
};
pub use structs::{
    matchup_id, BoxScore, DraftPick, LeagueInfo, Matchup, MatchupKey, SeasonData, Team, TeamId,
};
