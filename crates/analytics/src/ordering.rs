use core_types::{Matchup, TeamId};

/// Returns the matchups sorted by `(season, week)`.
///
/// The sort is stable: matchups sharing a week keep the order they were supplied in.
/// Streaks and "last meeting" labels are computed over this order, so callers
/// do not have to pre-sort what they fetch.
pub fn chronological(matchups: &[Matchup]) -> Vec<&Matchup> {
    let mut ordered: Vec<&Matchup> = matchups.iter().collect();
    ordered.sort_by_key(|m| m.key());
    ordered
}

/// The chronological history of a single team.
pub fn team_history(matchups: &[Matchup], team_id: TeamId) -> Vec<&Matchup> {
    chronological(matchups)
        .into_iter()
        .filter(|m| m.involves(team_id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{played, teams};

    #[test]
    fn test_sorts_across_seasons_and_weeks() {
        let t = teams(2);
        let matchups = vec![
            played(&t[0], &t[1], 2024, 2, 100.0, 90.0),
            played(&t[0], &t[1], 2023, 14, 100.0, 90.0),
            played(&t[0], &t[1], 2024, 1, 100.0, 90.0),
        ];
        let keys: Vec<(u16, u16)> = chronological(&matchups)
            .iter()
            .map(|m| (m.season, m.week))
            .collect();
        assert_eq!(keys, vec![(2023, 14), (2024, 1), (2024, 2)]);
    }

    #[test]
    fn test_same_week_keeps_supplied_order() {
        let t = teams(4);
        let matchups = vec![
            played(&t[2], &t[3], 2024, 1, 100.0, 90.0),
            played(&t[0], &t[1], 2024, 1, 100.0, 90.0),
        ];
        let ordered = chronological(&matchups);
        assert_eq!(ordered[0].home_team.id, t[2].id);
        assert_eq!(ordered[1].home_team.id, t[0].id);
    }

    #[test]
    fn test_team_history_filters() {
        let t = teams(3);
        let matchups = vec![
            played(&t[0], &t[1], 2024, 2, 100.0, 90.0),
            played(&t[1], &t[2], 2024, 1, 100.0, 90.0),
            played(&t[2], &t[0], 2024, 1, 100.0, 90.0),
        ];
        let history = team_history(&matchups, t[0].id);
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].week, 1);
    }
}
