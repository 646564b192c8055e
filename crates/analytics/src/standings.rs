use crate::format::win_percentage;
use crate::ordering::chronological;
use core_types::{BoxScore, LeagueStats, Matchup, Outcome, Team, TeamId};
use serde::Serialize;
use std::cmp::Ordering;

/// Running win/loss streak counters for one team.
///
/// A tie resets both current counters. The longest counters are running maxima.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct StreakTracker {
    pub current_win: u32,
    pub current_loss: u32,
    pub longest_win: u32,
    pub longest_loss: u32,
}

impl StreakTracker {
    pub fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Win => {
                self.current_win += 1;
                self.current_loss = 0;
                self.longest_win = self.longest_win.max(self.current_win);
            }
            Outcome::Loss => {
                self.current_loss += 1;
                self.current_win = 0;
                self.longest_loss = self.longest_loss.max(self.current_loss);
            }
            Outcome::Tie => {
                self.current_win = 0;
                self.current_loss = 0;
            }
        }
    }

    /// The current run length in the given direction. Ties never form a run.
    pub fn current(&self, direction: Outcome) -> u32 {
        match direction {
            Outcome::Win => self.current_win,
            Outcome::Loss => self.current_loss,
            Outcome::Tie => 0,
        }
    }
}

/// Computes one `LeagueStats` per team, in the order the teams were supplied.
///
/// Matchups are walked in chronological order regardless of the order they
/// arrive in, so streaks are meaningful for unsorted input too.
pub fn compute_league_stats(
    teams: &[Team],
    matchups: &[Matchup],
    box_scores: &[BoxScore],
) -> Vec<LeagueStats> {
    let ordered = chronological(matchups);
    teams
        .iter()
        .map(|team| team_stats(team.id, &ordered, box_scores))
        .collect()
}

fn team_stats(team_id: TeamId, ordered: &[&Matchup], box_scores: &[BoxScore]) -> LeagueStats {
    let mut stats = LeagueStats {
        team_id,
        ..Default::default()
    };
    let mut streaks = StreakTracker::default();
    let mut highest: Option<f64> = None;
    let mut lowest: Option<f64> = None;

    for matchup in ordered {
        let Some((team_score, opponent_score)) = matchup.scores_for(team_id) else {
            continue;
        };

        stats.points_for += team_score;
        stats.points_against += opponent_score;
        highest = Some(highest.map_or(team_score, |h| h.max(team_score)));
        lowest = Some(lowest.map_or(team_score, |l| l.min(team_score)));

        let outcome = Outcome::from_scores(team_score, opponent_score);
        match outcome {
            Outcome::Win => {
                stats.wins += 1;
                stats.biggest_win = stats.biggest_win.max(team_score - opponent_score);
            }
            Outcome::Loss => {
                stats.losses += 1;
                stats.biggest_loss = stats.biggest_loss.max(opponent_score - team_score);
            }
            Outcome::Tie => stats.ties += 1,
        }
        streaks.record(outcome);
    }

    stats.highest_score = highest.unwrap_or(0.0);
    stats.lowest_score = lowest.unwrap_or(0.0);
    stats.current_win_streak = streaks.current_win;
    stats.current_loss_streak = streaks.current_loss;
    stats.longest_win_streak = streaks.longest_win;
    stats.longest_loss_streak = streaks.longest_loss;

    let games = stats.games_played();
    if games > 0 {
        stats.average_score = stats.points_for / f64::from(games);
    }

    // Bench and optimal lineup come from the player lines, not the matchup totals.
    for line in box_scores.iter().filter(|b| b.team_id == team_id) {
        if line.on_bench {
            stats.points_left_on_bench += line.actual;
        }
        stats.optimal_lineup_points += line.actual.max(0.0);
    }

    stats
}

/// One row of the ranked standings table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StandingRow {
    pub rank: usize,
    pub team: Team,
    pub win_percentage: f64,
    pub stats: LeagueStats,
}

/// Ranks teams by win percentage, then by points scored.
///
/// Win percentages are compared to the hundredth of a percent. Stats whose
/// team is not in `teams` are dropped.
pub fn rank_standings(teams: &[Team], stats: &[LeagueStats]) -> Vec<StandingRow> {
    let mut rows: Vec<StandingRow> = stats
        .iter()
        .filter_map(|s| {
            let team = teams.iter().find(|t| t.id == s.team_id)?;
            Some(StandingRow {
                rank: 0,
                team: team.clone(),
                win_percentage: win_percentage(s.wins, s.losses, s.ties),
                stats: s.clone(),
            })
        })
        .collect();

    rows.sort_by(|a, b| {
        let pct_a = (a.win_percentage * 100.0).round() as i64;
        let pct_b = (b.win_percentage * 100.0).round() as i64;
        pct_b.cmp(&pct_a).then_with(|| {
            b.stats
                .points_for
                .partial_cmp(&a.stats.points_for)
                .unwrap_or(Ordering::Equal)
        })
    });

    for (i, row) in rows.iter_mut().enumerate() {
        row.rank = i + 1;
    }
    rows
}
