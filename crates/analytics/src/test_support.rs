use core_types::{BoxScore, Matchup, Team};

const NAMES: [(&str, &str, &str); 6] = [
    ("The Dynasty", "Josh", "DYN"),
    ("Gridiron Gladiators", "Mike", "GG"),
    ("Fantasy Phenoms", "Sarah", "FP"),
    ("Touchdown Titans", "Alex", "TT"),
    ("End Zone Eagles", "Chris", "EZE"),
    ("Playoff Predators", "Jordan", "PP"),
];

pub fn teams(n: usize) -> Vec<Team> {
    NAMES
        .iter()
        .take(n)
        .enumerate()
        .map(|(i, (name, owner, abbrev))| Team::new(i as u32 + 1, name, owner, abbrev))
        .collect()
}

pub fn played(home: &Team, away: &Team, season: u16, week: u16, home_score: f64, away_score: f64) -> Matchup {
    let source_id = home.id * 100 + away.id;
    Matchup::new(season, week, source_id, home.clone(), away.clone(), home_score, away_score)
}

pub fn line(matchup: &Matchup, team: &Team, player: &str, actual: f64, on_bench: bool) -> BoxScore {
    BoxScore {
        id: format!("{}-{}", matchup.id, player),
        matchup_id: matchup.id.clone(),
        team_id: team.id,
        slot: if on_bench { "BE".to_string() } else { "RB".to_string() },
        player_id: player.to_string(),
        player_name: player.to_string(),
        position: "RB".to_string(),
        projected: 10.0,
        actual,
        on_bench,
    }
}
