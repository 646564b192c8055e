use core_types::{LeagueRecords, LeagueStats, RivalryStats, SeasonSummary, Team};
use serde::Serialize;

/// The statistics block returned for a single season.
///
/// This struct is the output of `StatsEngine::report` and the `stats` field of
/// the league endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueReport {
    pub league_stats: Vec<LeagueStats>,
    pub rivalries: Vec<RivalryStats>,
    /// `None` when the season has no played matchups yet.
    pub season_summary: Option<SeasonSummary>,
    pub records: LeagueRecords,
}

/// Statistics over several seasons of the same league.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueHistory {
    /// One summary per season with data, oldest first.
    pub seasons: Vec<SeasonSummary>,
    /// Every team that appears in any season, with its latest name and owner.
    pub teams: Vec<Team>,
    pub all_time_stats: Vec<LeagueStats>,
    pub rivalries: Vec<RivalryStats>,
    pub records: LeagueRecords,
}
