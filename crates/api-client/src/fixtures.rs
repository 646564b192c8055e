use crate::error::ApiError;
use crate::LeagueDataSource;
use async_trait::async_trait;
use core_types::{DraftPick, LeagueInfo, SeasonData};

const LEAGUE_FIXTURE: &str = include_str!("../fixtures/league_2024.json");
const DRAFT_FIXTURE: &str = include_str!("../fixtures/draft_2024.json");
const FIXTURE_SEASON: u16 = 2024;

/// A built-in demo league used when ESPN is unreachable or no league is configured.
///
/// The embedded data is one 2024 season; any requested season is served as a
/// copy relabelled to that season.
#[derive(Debug, Clone, Default)]
pub struct FixtureSource;

impl FixtureSource {
    pub fn new() -> Self {
        Self
    }

    /// The fixture league relabelled to `season`.
    pub fn season_data(&self, season: u16) -> Result<SeasonData, ApiError> {
        let mut data: SeasonData = serde_json::from_str(LEAGUE_FIXTURE)
            .map_err(|e| ApiError::Deserialization(format!("league fixture: {e}")))?;

        data.league_info.season = season;
        for matchup in &mut data.matchups {
            matchup.season = season;
            matchup.id = relabel(&matchup.id, season);
        }
        for line in &mut data.box_scores {
            line.id = relabel(&line.id, season);
            line.matchup_id = relabel(&line.matchup_id, season);
        }
        Ok(data)
    }

    pub fn draft(&self, season: u16) -> Result<Vec<DraftPick>, ApiError> {
        let mut picks: Vec<DraftPick> = serde_json::from_str(DRAFT_FIXTURE)
            .map_err(|e| ApiError::Deserialization(format!("draft fixture: {e}")))?;
        for pick in &mut picks {
            pick.season = season;
            pick.id = relabel(&pick.id, season);
        }
        Ok(picks)
    }
}

fn relabel(id: &str, season: u16) -> String {
    match id.split_once('-') {
        Some((prefix, rest)) if prefix == FIXTURE_SEASON.to_string() => format!("{season}-{rest}"),
        _ => id.to_string(),
    }
}

#[async_trait]
impl LeagueDataSource for FixtureSource {
    async fn fetch_league_info(&self, season: u16) -> Result<LeagueInfo, ApiError> {
        Ok(self.season_data(season)?.league_info)
    }

    async fn fetch_season(&self, season: u16) -> Result<SeasonData, ApiError> {
        self.season_data(season)
    }

    async fn fetch_draft(&self, season: u16) -> Result<Vec<DraftPick>, ApiError> {
        self.draft(season)
    }
}
