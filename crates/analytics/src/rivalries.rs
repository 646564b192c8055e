use crate::ordering::chronological;
use core_types::{Matchup, RivalryStats, Team};

/// Computes head-to-head history for every unordered pair of teams.
///
/// Pairs are emitted as `(teams[i], teams[j])` with `i < j`, so `n` teams always
/// yield `n * (n - 1) / 2` entries, including pairs that never met.
pub fn compute_rivalries(teams: &[Team], matchups: &[Matchup]) -> Vec<RivalryStats> {
    let ordered = chronological(matchups);
    let mut rivalries = Vec::with_capacity(teams.len() * teams.len().saturating_sub(1) / 2);

    for (i, team1) in teams.iter().enumerate() {
        for team2 in &teams[i + 1..] {
            rivalries.push(head_to_head(team1, team2, &ordered));
        }
    }

    rivalries
}

fn head_to_head(team1: &Team, team2: &Team, ordered: &[&Matchup]) -> RivalryStats {
    let mut rivalry = RivalryStats {
        team1_id: team1.id,
        team2_id: team2.id,
        team1_wins: 0,
        team2_wins: 0,
        team1_points: 0.0,
        team2_points: 0.0,
        meetings: 0,
        average_margin: 0.0,
        last_meeting: None,
    };

    for matchup in ordered.iter().filter(|m| m.is_between(team1.id, team2.id)) {
        let Some((team1_score, team2_score)) = matchup.scores_for(team1.id) else {
            continue;
        };

        rivalry.meetings += 1;
        rivalry.team1_points += team1_score;
        rivalry.team2_points += team2_score;

        if team1_score > team2_score {
            rivalry.team1_wins += 1;
        } else if team2_score > team1_score {
            rivalry.team2_wins += 1;
        }

        rivalry.last_meeting = Some(matchup.key().to_string());
    }

    if rivalry.meetings > 0 {
        rivalry.average_margin =
            (rivalry.team1_points - rivalry.team2_points).abs() / f64::from(rivalry.meetings);
    }

    rivalry
}
