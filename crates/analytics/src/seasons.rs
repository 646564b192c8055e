use crate::error::AnalyticsError;
use crate::standings::compute_league_stats;
use core_types::{BoxScore, LeagueStats, Matchup, SeasonSummary, Team};

/// Summarizes a single season: champion, runner-up, regular-season leader and
/// scoring extremes.
///
/// Returns `AnalyticsError::NotEnoughData` when the season has no matchups,
/// instead of producing a summary full of undefined averages.
pub fn compute_season_summary(
    season: u16,
    teams: &[Team],
    matchups: &[Matchup],
    box_scores: &[BoxScore],
) -> Result<SeasonSummary, AnalyticsError> {
    let season_matchups: Vec<Matchup> = matchups
        .iter()
        .filter(|m| m.season == season)
        .cloned()
        .collect();

    if season_matchups.is_empty() {
        return Err(AnalyticsError::NotEnoughData(format!(
            "season {season} has no played matchups"
        )));
    }

    let prefix = format!("{season}-");
    let season_box_scores: Vec<BoxScore> = box_scores
        .iter()
        .filter(|b| b.matchup_id.starts_with(&prefix))
        .cloned()
        .collect();
    let stats = compute_league_stats(teams, &season_matchups, &season_box_scores);

    let final_matchup = season_matchups.iter().find(|m| m.is_final);
    let champion = final_matchup.and_then(|m| m.winner.clone());
    let runner_up = final_matchup.and_then(|m| m.loser().cloned());

    let scores: Vec<f64> = season_matchups
        .iter()
        .flat_map(|m| [m.home_score, m.away_score])
        .collect();
    let average_score = scores.iter().sum::<f64>() / scores.len() as f64;
    let highest_score = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let lowest_score = scores.iter().copied().fold(f64::INFINITY, f64::min);

    Ok(SeasonSummary {
        season,
        champion,
        runner_up,
        regular_season_champion: regular_season_leader(teams, &stats),
        total_teams: teams.len(),
        total_weeks: season_matchups.iter().map(|m| m.week).max().unwrap_or(0),
        average_score,
        highest_score,
        lowest_score,
    })
}

/// Most wins, then most points for. Full ties go to the team listed first.
fn regular_season_leader(teams: &[Team], stats: &[LeagueStats]) -> Option<Team> {
    let mut leader: Option<(&Team, &LeagueStats)> = None;
    for (team, s) in teams.iter().zip(stats) {
        let better = match leader {
            None => true,
            Some((_, best)) => {
                s.wins > best.wins || (s.wins == best.wins && s.points_for > best.points_for)
            }
        };
        if better {
            leader = Some((team, s));
        }
    }
    leader.map(|(team, _)| team.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{played, teams};

    fn season_with_final() -> (Vec<Team>, Vec<Matchup>) {
        let t = teams(4);
        let matchups = vec![
            played(&t[0], &t[1], 2024, 1, 142.5, 118.3),
            played(&t[2], &t[3], 2024, 1, 156.8, 134.2),
            played(&t[0], &t[2], 2024, 2, 101.0, 99.0),
            played(&t[1], &t[3], 2024, 2, 88.0, 120.0),
            played(&t[3], &t[0], 2024, 3, 131.0, 125.0).with_playoff_flags(true, false, true),
            played(&t[0], &t[1], 2023, 1, 200.0, 50.0),
        ];
        (t, matchups)
    }

    #[test]
    fn test_champion_and_runner_up_from_final() {
        let (t, matchups) = season_with_final();
        let summary = compute_season_summary(2024, &t, &matchups, &[]).unwrap();

        assert_eq!(summary.season, 2024);
        assert_eq!(summary.champion.as_ref().map(|c| c.id), Some(4));
        assert_eq!(summary.runner_up.as_ref().map(|c| c.id), Some(1));
        assert_eq!(summary.total_teams, 4);
        assert_eq!(summary.total_weeks, 3);
    }

    #[test]
    fn test_regular_season_champion_by_wins() {
        let (t, matchups) = season_with_final();
        let summary = compute_season_summary(2024, &t, &matchups, &[]).unwrap();
        // Team 1 and team 4 both have two wins; team 4 scored more.
        assert_eq!(summary.regular_season_champion.map(|c| c.id), Some(4));
    }

    #[test]
    fn test_scoring_extremes_are_per_score_and_season_scoped() {
        let (t, matchups) = season_with_final();
        let summary = compute_season_summary(2024, &t, &matchups, &[]).unwrap();

        assert_eq!(summary.highest_score, 156.8);
        assert_eq!(summary.lowest_score, 88.0);
        let expected = (142.5 + 118.3 + 156.8 + 134.2 + 101.0 + 99.0 + 88.0 + 120.0 + 131.0 + 125.0) / 10.0;
        assert!((summary.average_score - expected).abs() < 1e-9);
    }

    #[test]
    fn test_no_final_means_no_champion() {
        let t = teams(2);
        let matchups = vec![played(&t[0], &t[1], 2024, 1, 100.0, 90.0)];
        let summary = compute_season_summary(2024, &t, &matchups, &[]).unwrap();
        assert!(summary.champion.is_none());
        assert!(summary.runner_up.is_none());
        assert_eq!(summary.regular_season_champion.map(|c| c.id), Some(1));
    }

    #[test]
    fn test_empty_season_is_an_error() {
        let (t, matchups) = season_with_final();
        let result = compute_season_summary(2019, &t, &matchups, &[]);
        assert!(matches!(result, Err(AnalyticsError::NotEnoughData(_))));
    }

    #[test]
    fn test_wins_tie_broken_by_points_then_team_order() {
        let t = teams(2);
        let matchups = vec![
            played(&t[0], &t[1], 2024, 1, 100.0, 90.0),
            played(&t[1], &t[0], 2024, 2, 100.0, 90.0),
        ];
        let summary = compute_season_summary(2024, &t, &matchups, &[]).unwrap();
        assert_eq!(summary.regular_season_champion.map(|c| c.id), Some(1));
    }

    #[test]
    fn test_tied_final_has_no_champion() {
        let t = teams(2);
        let matchups = vec![
            played(&t[0], &t[1], 2024, 1, 100.0, 90.0),
            played(&t[0], &t[1], 2024, 2, 110.5, 110.5).with_playoff_flags(true, false, true),
        ];
        let summary = compute_season_summary(2024, &t, &matchups, &[]).unwrap();
        assert!(summary.champion.is_none());
        assert!(summary.runner_up.is_none());
        assert_eq!(summary.total_weeks, 2);
    }

    #[test]
    fn test_idempotent() {
        let (t, matchups) = season_with_final();
        let first = compute_season_summary(2024, &t, &matchups, &[]).unwrap();
        let second = compute_season_summary(2024, &t, &matchups, &[]).unwrap();
        assert_eq!(first, second);
    }
}
