use crate::enums::Side;
use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;

// All shapes serialize with camelCase keys, matching the JSON the dashboard consumes.

/// The league-unique identifier ESPN assigns to a fantasy team.
pub type TeamId = u32;

/// A fantasy team as seen by the statistics engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    /// Resolved display name of the (first) owner.
    pub owner: String,
    pub abbreviation: String,
    // Display-only passthrough fields; never read by any calculation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_color: Option<String>,
}

impl Team {
    pub fn new(id: TeamId, name: &str, owner: &str, abbreviation: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            owner: owner.to_string(),
            abbreviation: abbreviation.to_string(),
            logo: None,
            primary_color: None,
            secondary_color: None,
        }
    }
}

/// The (season, week) position of a matchup. Orders chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct MatchupKey {
    pub season: u16,
    pub week: u16,
}

impl MatchupKey {
    pub fn new(season: u16, week: u16) -> Self {
        Self { season, week }
    }

    /// Parses the `{season}-{week}-...` prefix shared by matchup and box-score ids.
    pub fn parse(matchup_id: &str) -> Result<Self, CoreError> {
        let mut parts = matchup_id.split('-');
        let mut next_number = |field: &str| -> Result<u16, CoreError> {
            parts
                .next()
                .and_then(|p| p.parse::<u16>().ok())
                .ok_or_else(|| {
                    CoreError::InvalidInput(
                        "matchup_id".to_string(),
                        format!("missing or invalid {field} in '{matchup_id}'"),
                    )
                })
        };
        let season = next_number("season")?;
        let week = next_number("week")?;
        Ok(Self { season, week })
    }
}

impl fmt::Display for MatchupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} Week {}", self.season, self.week)
    }
}

/// Builds the stable matchup id used as the foreign key of box scores.
pub fn matchup_id(season: u16, week: u16, source_id: u32) -> String {
    format!("{season}-{week}-{source_id}")
}

/// One scored head-to-head contest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Matchup {
    pub id: String,
    pub season: u16,
    pub week: u16,
    pub home_team: Team,
    pub away_team: Team,
    pub home_score: f64,
    pub away_score: f64,
    /// The side with the strictly higher score. `None` for a tie.
    pub winner: Option<Team>,
    pub is_playoff: bool,
    pub is_semifinal: bool,
    pub is_final: bool,
}

impl Matchup {
    /// Creates a regular-season matchup and derives its id and winner.
    pub fn new(
        season: u16,
        week: u16,
        source_id: u32,
        home_team: Team,
        away_team: Team,
        home_score: f64,
        away_score: f64,
    ) -> Self {
        let winner = if home_score > away_score {
            Some(home_team.clone())
        } else if away_score > home_score {
            Some(away_team.clone())
        } else {
            None
        };
        Self {
            id: matchup_id(season, week, source_id),
            season,
            week,
            home_team,
            away_team,
            home_score,
            away_score,
            winner,
            is_playoff: false,
            is_semifinal: false,
            is_final: false,
        }
    }

    pub fn with_playoff_flags(mut self, is_playoff: bool, is_semifinal: bool, is_final: bool) -> Self {
        self.is_playoff = is_playoff;
        self.is_semifinal = is_semifinal;
        self.is_final = is_final;
        self
    }

    pub fn key(&self) -> MatchupKey {
        MatchupKey::new(self.season, self.week)
    }

    /// A 0-0 matchup has not been played yet.
    pub fn is_played(&self) -> bool {
        !(self.home_score == 0.0 && self.away_score == 0.0)
    }

    pub fn side_of(&self, team_id: TeamId) -> Option<Side> {
        if self.home_team.id == team_id {
            Some(Side::Home)
        } else if self.away_team.id == team_id {
            Some(Side::Away)
        } else {
            None
        }
    }

    pub fn involves(&self, team_id: TeamId) -> bool {
        self.side_of(team_id).is_some()
    }

    /// True when the two teams met in this matchup, in either home/away assignment.
    pub fn is_between(&self, a: TeamId, b: TeamId) -> bool {
        (self.home_team.id == a && self.away_team.id == b)
            || (self.home_team.id == b && self.away_team.id == a)
    }

    /// Returns `(team_score, opponent_score)` for a participating team.
    pub fn scores_for(&self, team_id: TeamId) -> Option<(f64, f64)> {
        match self.side_of(team_id)? {
            Side::Home => Some((self.home_score, self.away_score)),
            Side::Away => Some((self.away_score, self.home_score)),
        }
    }

    pub fn opponent_of(&self, team_id: TeamId) -> Option<&Team> {
        match self.side_of(team_id)? {
            Side::Home => Some(&self.away_team),
            Side::Away => Some(&self.home_team),
        }
    }

    pub fn loser(&self) -> Option<&Team> {
        let winner = self.winner.as_ref()?;
        self.opponent_of(winner.id)
    }
}

/// One player-slot line within a matchup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoxScore {
    pub id: String,
    pub matchup_id: String,
    pub team_id: TeamId,
    pub slot: String,
    pub player_id: String,
    pub player_name: String,
    pub position: String,
    pub projected: f64,
    pub actual: f64,
    /// Bench slots do not count toward the team's realized score.
    pub on_bench: bool,
}

/// A single pick of a season's draft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftPick {
    pub id: String,
    pub season: u16,
    pub round: u16,
    pub pick_overall: u16,
    pub team_id: TeamId,
    pub player_id: String,
    pub player_name: String,
    pub position: String,
}

/// League-level metadata for one season.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueInfo {
    pub name: String,
    pub season: u16,
    pub total_teams: usize,
    pub total_weeks: u16,
}

/// Everything fetched for one season, already normalized and free of unplayed matchups.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonData {
    pub league_info: LeagueInfo,
    pub teams: Vec<Team>,
    pub matchups: Vec<Matchup>,
    pub box_scores: Vec<BoxScore>,
}
