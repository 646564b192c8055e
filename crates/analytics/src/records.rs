use crate::ordering::team_history;
use crate::standings::StreakTracker;
use core_types::{
    BenchRecord, BlowoutRecord, BoxScore, LeagueRecords, Matchup, MatchupKey, Outcome,
    ScoreRecord, StreakRecord, Team, TeamId,
};
use std::collections::HashMap;

/// Scans the full multi-season history for single-game and streak superlatives.
///
/// Equal values keep the record that was encountered first. Tied matchups have
/// no winner or loser and only count toward the highest single week.
pub fn find_league_records(
    teams: &[Team],
    matchups: &[Matchup],
    box_scores: &[BoxScore],
) -> LeagueRecords {
    let mut records = LeagueRecords::default();

    for matchup in matchups {
        for (team, score) in [
            (&matchup.home_team, matchup.home_score),
            (&matchup.away_team, matchup.away_score),
        ] {
            if records
                .highest_single_week
                .as_ref()
                .is_none_or(|r| score > r.score)
            {
                records.highest_single_week = Some(score_record(team, score, matchup));
            }
        }

        let (Some(winner), Some(loser)) = (matchup.winner.as_ref(), matchup.loser()) else {
            continue;
        };
        let winning_score = matchup.home_score.max(matchup.away_score);
        let losing_score = matchup.home_score.min(matchup.away_score);
        let margin = (matchup.home_score - matchup.away_score).abs();

        if records
            .lowest_winning_score
            .as_ref()
            .is_none_or(|r| winning_score < r.score)
        {
            records.lowest_winning_score = Some(score_record(winner, winning_score, matchup));
        }

        if records
            .biggest_blowout
            .as_ref()
            .is_none_or(|r| margin > r.margin)
        {
            records.biggest_blowout = Some(BlowoutRecord {
                winner: winner.clone(),
                loser: loser.clone(),
                margin,
                week: matchup.week,
                season: matchup.season,
            });
        }

        if records
            .most_points_in_loss
            .as_ref()
            .is_none_or(|r| losing_score > r.score)
        {
            records.most_points_in_loss = Some(score_record(loser, losing_score, matchup));
        }
    }

    records.most_points_left_on_bench = most_points_left_on_bench(teams, matchups, box_scores);
    records.longest_win_streak = longest_streak(teams, matchups, Outcome::Win);
    records.longest_loss_streak = longest_streak(teams, matchups, Outcome::Loss);

    records
}

fn score_record(team: &Team, score: f64, matchup: &Matchup) -> ScoreRecord {
    ScoreRecord {
        team: team.clone(),
        score,
        week: matchup.week,
        season: matchup.season,
    }
}

/// Largest bench total of one team in one matchup.
fn most_points_left_on_bench(
    teams: &[Team],
    matchups: &[Matchup],
    box_scores: &[BoxScore],
) -> Option<BenchRecord> {
    // Groups in first-seen order so equal totals resolve deterministically.
    let mut groups: Vec<((TeamId, &str), f64)> = Vec::new();
    let mut index: HashMap<(TeamId, &str), usize> = HashMap::new();
    for line in box_scores.iter().filter(|b| b.on_bench) {
        let key = (line.team_id, line.matchup_id.as_str());
        let slot = *index.entry(key).or_insert_with(|| {
            groups.push((key, 0.0));
            groups.len() - 1
        });
        groups[slot].1 += line.actual;
    }

    let by_id: HashMap<&str, &Matchup> = matchups.iter().map(|m| (m.id.as_str(), m)).collect();
    let mut best: Option<BenchRecord> = None;

    for ((team_id, matchup_id), points) in groups {
        if points <= 0.0 || best.as_ref().is_some_and(|b| points <= b.points) {
            continue;
        }
        let Some(team) = teams.iter().find(|t| t.id == team_id) else {
            tracing::debug!(team_id, matchup_id, "Skipping bench group for unknown team.");
            continue;
        };
        let key = match by_id.get(matchup_id) {
            Some(m) => m.key(),
            None => match MatchupKey::parse(matchup_id) {
                Ok(key) => key,
                Err(e) => {
                    tracing::debug!(error = %e, "Skipping bench group with unparseable matchup id.");
                    continue;
                }
            },
        };
        best = Some(BenchRecord {
            team: team.clone(),
            points,
            week: key.week,
            season: key.season,
        });
    }

    best
}

/// The league-wide longest run of wins (or losses) across each team's full
/// chronological history, spanning season boundaries.
fn longest_streak(teams: &[Team], matchups: &[Matchup], direction: Outcome) -> Option<StreakRecord> {
    let mut best: Option<StreakRecord> = None;

    for team in teams {
        let history = team_history(matchups, team.id);
        let mut tracker = StreakTracker::default();
        let mut run_start = 0;
        let mut team_best: Option<(u32, usize, usize)> = None;

        for (i, matchup) in history.iter().enumerate() {
            let Some((team_score, opponent_score)) = matchup.scores_for(team.id) else {
                continue;
            };
            tracker.record(Outcome::from_scores(team_score, opponent_score));
            let current = tracker.current(direction);
            if current == 1 {
                run_start = i;
            }
            if current > 0 && team_best.is_none_or(|(len, _, _)| current > len) {
                team_best = Some((current, run_start, i));
            }
        }

        let Some((streak, start, end)) = team_best else {
            continue;
        };
        if best.as_ref().is_none_or(|b| streak > b.streak) {
            let mut seasons: Vec<u16> = history[start..=end].iter().map(|m| m.season).collect();
            seasons.dedup();
            best = Some(StreakRecord {
                team: team.clone(),
                streak,
                seasons,
            });
        }
    }

    best
}
