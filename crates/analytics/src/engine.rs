use crate::report::{LeagueHistory, LeagueReport};
use crate::{compute_league_stats, compute_rivalries, compute_season_summary, find_league_records};
use core_types::{BoxScore, Matchup, SeasonData, Team};

/// A stateless facade that runs the four statistics components over fetched data.
#[derive(Debug, Default)]
pub struct StatsEngine {}

impl StatsEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Computes every statistic for one fetched season.
    pub fn report(&self, data: &SeasonData) -> LeagueReport {
        let season = data.league_info.season;
        tracing::debug!(
            season,
            teams = data.teams.len(),
            matchups = data.matchups.len(),
            box_scores = data.box_scores.len(),
            "Computing league report."
        );

        let season_summary =
            match compute_season_summary(season, &data.teams, &data.matchups, &data.box_scores) {
                Ok(summary) => Some(summary),
                Err(e) => {
                    tracing::debug!(error = %e, "No season summary.");
                    None
                }
            };

        LeagueReport {
            league_stats: compute_league_stats(&data.teams, &data.matchups, &data.box_scores),
            rivalries: compute_rivalries(&data.teams, &data.matchups),
            season_summary,
            records: find_league_records(&data.teams, &data.matchups, &data.box_scores),
        }
    }

    /// Computes all-time statistics over several fetched seasons.
    ///
    /// Teams are merged by id, keeping first-seen order; a later season's
    /// name, owner and display fields replace earlier ones, including on the
    /// matchups that record holders are read from. A season passed more than
    /// once counts once, using its last occurrence.
    pub fn history(&self, seasons: &[SeasonData]) -> LeagueHistory {
        let seasons = distinct_seasons(seasons);
        let teams = merge_teams(&seasons);
        let matchups: Vec<Matchup> = seasons
            .iter()
            .flat_map(|s| &s.matchups)
            .map(|m| with_current_teams(m, &teams))
            .collect();
        let box_scores: Vec<BoxScore> =
            seasons.iter().flat_map(|s| s.box_scores.iter().cloned()).collect();

        let summaries = seasons
            .iter()
            .filter_map(|data| {
                let season = data.league_info.season;
                compute_season_summary(season, &data.teams, &data.matchups, &data.box_scores)
                    .inspect_err(|e| tracing::debug!(season, error = %e, "Skipping season summary."))
                    .ok()
            })
            .collect();

        LeagueHistory {
            seasons: summaries,
            all_time_stats: compute_league_stats(&teams, &matchups, &box_scores),
            rivalries: compute_rivalries(&teams, &matchups),
            records: find_league_records(&teams, &matchups, &box_scores),
            teams,
        }
    }
}

/// Orders seasons by year, keeping only the last occurrence of each year.
fn distinct_seasons(seasons: &[SeasonData]) -> Vec<&SeasonData> {
    let mut ordered: Vec<&SeasonData> = seasons.iter().collect();
    ordered.sort_by_key(|s| s.league_info.season);

    let mut distinct: Vec<&SeasonData> = Vec::with_capacity(ordered.len());
    for data in ordered {
        match distinct.last_mut() {
            Some(last) if last.league_info.season == data.league_info.season => {
                tracing::warn!(
                    season = data.league_info.season,
                    "Duplicate season in history; keeping the last one."
                );
                *last = data;
            }
            _ => distinct.push(data),
        }
    }
    distinct
}

fn merge_teams(seasons: &[&SeasonData]) -> Vec<Team> {
    let mut merged: Vec<Team> = Vec::new();
    for team in seasons.iter().flat_map(|s| &s.teams) {
        match merged.iter_mut().find(|t| t.id == team.id) {
            Some(existing) => *existing = team.clone(),
            None => merged.push(team.clone()),
        }
    }
    merged
}

/// Replaces the team snapshots on a matchup with their merged versions.
fn with_current_teams(matchup: &Matchup, teams: &[Team]) -> Matchup {
    let current = |team: &Team| {
        teams
            .iter()
            .find(|t| t.id == team.id)
            .cloned()
            .unwrap_or_else(|| team.clone())
    };
    Matchup {
        home_team: current(&matchup.home_team),
        away_team: current(&matchup.away_team),
        winner: matchup.winner.as_ref().map(current),
        ..matchup.clone()
    }
}
