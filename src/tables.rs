use analytics::format::{format_record, format_score, rank_suffix};
use analytics::StandingRow;
use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};
use core_types::{LeagueRecords, SeasonSummary, StreakRecord, Team};

fn table(header: Vec<&str>) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header);
    table
}

pub fn standings_table(rows: &[StandingRow]) -> Table {
    let mut table = table(vec![
        "Rank", "Team", "Owner", "Record", "Win %", "PF", "PA", "Streak", "Bench",
    ]);
    for row in rows {
        let s = &row.stats;
        let streak = match (s.current_win_streak, s.current_loss_streak) {
            (w, _) if w > 0 => format!("W{w}"),
            (_, l) if l > 0 => format!("L{l}"),
            _ => "-".to_string(),
        };
        table.add_row(vec![
            format!("{}{}", row.rank, rank_suffix(row.rank)),
            row.team.name.clone(),
            row.team.owner.clone(),
            format_record(s.wins, s.losses, s.ties),
            format!("{:.1}", row.win_percentage),
            format_score(s.points_for),
            format_score(s.points_against),
            streak,
            format_score(s.points_left_on_bench),
        ]);
    }
    table
}

pub fn seasons_table(seasons: &[SeasonSummary]) -> Table {
    let mut table = table(vec![
        "Season", "Champion", "Runner-up", "Regular season", "Avg", "High", "Low",
    ]);
    let name = |team: &Option<Team>| team.as_ref().map_or("-".to_string(), |t| t.name.clone());
    for s in seasons {
        table.add_row(vec![
            s.season.to_string(),
            name(&s.champion),
            name(&s.runner_up),
            name(&s.regular_season_champion),
            format_score(s.average_score),
            format_score(s.highest_score),
            format_score(s.lowest_score),
        ]);
    }
    table
}

pub fn records_table(records: &LeagueRecords) -> Table {
    let mut table = table(vec!["Record", "Holder", "Value", "When"]);
    for row in record_rows(records) {
        table.add_row(row.to_vec());
    }
    table
}

fn when(season: u16, week: u16) -> String {
    format!("{season} Week {week}")
}

fn streak_span(record: &StreakRecord) -> String {
    match (record.seasons.first(), record.seasons.last()) {
        (Some(first), Some(last)) if first != last => format!("{first}-{last}"),
        (Some(first), _) => first.to_string(),
        _ => "-".to_string(),
    }
}

/// One `[label, holder, value, when]` row per record that exists.
fn record_rows(records: &LeagueRecords) -> Vec<[String; 4]> {
    let mut rows = Vec::new();
    if let Some(r) = &records.highest_single_week {
        rows.push(["Highest single week".into(), r.team.name.clone(), format_score(r.score), when(r.season, r.week)]);
    }
    if let Some(r) = &records.lowest_winning_score {
        rows.push(["Lowest winning score".into(), r.team.name.clone(), format_score(r.score), when(r.season, r.week)]);
    }
    if let Some(r) = &records.biggest_blowout {
        rows.push([
            "Biggest blowout".into(),
            format!("{} over {}", r.winner.name, r.loser.name),
            format_score(r.margin),
            when(r.season, r.week),
        ]);
    }
    if let Some(r) = &records.most_points_in_loss {
        rows.push(["Most points in a loss".into(), r.team.name.clone(), format_score(r.score), when(r.season, r.week)]);
    }
    if let Some(r) = &records.most_points_left_on_bench {
        rows.push(["Most points on bench".into(), r.team.name.clone(), format_score(r.points), when(r.season, r.week)]);
    }
    if let Some(r) = &records.longest_win_streak {
        rows.push(["Longest win streak".into(), r.team.name.clone(), r.streak.to_string(), streak_span(r)]);
    }
    if let Some(r) = &records.longest_loss_streak {
        rows.push(["Longest losing streak".into(), r.team.name.clone(), r.streak.to_string(), streak_span(r)]);
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_types::ScoreRecord;

    #[test]
    fn test_record_rows_skip_missing_records() {
        let team = Team::new(1, "The Dynasty", "Josh", "DYN");
        let records = LeagueRecords {
            highest_single_week: Some(ScoreRecord { team: team.clone(), score: 162.1, week: 1, season: 2024 }),
            longest_win_streak: Some(StreakRecord { team, streak: 5, seasons: vec![2023, 2024] }),
            ..LeagueRecords::default()
        };
        let rows = record_rows(&records);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][2], "162.10");
        assert_eq!(rows[0][3], "2024 Week 1");
        assert_eq!(rows[1][3], "2023-2024");
    }
}
