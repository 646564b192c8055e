use crate::structs::{Team, TeamId};
use serde::{Deserialize, Serialize};

// Derived shapes. None of these are ever edited by hand; they are recomputed
// from the current matchups and box scores on every request.

/// Aggregated results of one team over the supplied matchups.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueStats {
    pub team_id: TeamId,
    pub wins: u32,
    pub losses: u32,
    pub ties: u32,
    pub points_for: f64,
    pub points_against: f64,
    pub average_score: f64,
    pub highest_score: f64,
    pub lowest_score: f64,
    pub biggest_win: f64,
    pub biggest_loss: f64,
    pub current_win_streak: u32,
    pub current_loss_streak: u32,
    pub longest_win_streak: u32,
    pub longest_loss_streak: u32,
    pub points_left_on_bench: f64,
    pub optimal_lineup_points: f64,
}

impl LeagueStats {
    pub fn games_played(&self) -> u32 {
        self.wins + self.losses + self.ties
    }
}

/// Head-to-head history between two teams.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RivalryStats {
    pub team1_id: TeamId,
    pub team2_id: TeamId,
    pub team1_wins: u32,
    pub team2_wins: u32,
    pub team1_points: f64,
    pub team2_points: f64,
    pub meetings: u32,
    pub average_margin: f64,
    /// "{season} Week {week}" of the most recent meeting, if they ever met.
    pub last_meeting: Option<String>,
}

/// The outcome of one season.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonSummary {
    pub season: u16,
    /// `None` when no final was played (or the final was tied).
    pub champion: Option<Team>,
    pub runner_up: Option<Team>,
    pub regular_season_champion: Option<Team>,
    pub total_teams: usize,
    pub total_weeks: u16,
    pub average_score: f64,
    pub highest_score: f64,
    pub lowest_score: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreRecord {
    pub team: Team,
    pub score: f64,
    pub week: u16,
    pub season: u16,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlowoutRecord {
    pub winner: Team,
    pub loser: Team,
    pub margin: f64,
    pub week: u16,
    pub season: u16,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BenchRecord {
    pub team: Team,
    pub points: f64,
    pub week: u16,
    pub season: u16,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreakRecord {
    pub team: Team,
    pub streak: u32,
    /// Distinct seasons the streak spans, ascending.
    pub seasons: Vec<u16>,
}

/// All-time single-game and streak superlatives.
///
/// Every entry is optional: a league with no qualifying matchups reports
/// `None` rather than a placeholder team.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueRecords {
    pub highest_single_week: Option<ScoreRecord>,
    pub lowest_winning_score: Option<ScoreRecord>,
    pub biggest_blowout: Option<BlowoutRecord>,
    pub longest_win_streak: Option<StreakRecord>,
    pub longest_loss_streak: Option<StreakRecord>,
    pub most_points_in_loss: Option<ScoreRecord>,
    pub most_points_left_on_bench: Option<BenchRecord>,
}
