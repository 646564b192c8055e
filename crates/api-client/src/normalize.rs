//! Translation of raw ESPN documents into the engine's domain types.
//!
//! Every function here is pure: the client fetches, these functions shape.

use crate::responses::{
    LeagueResponse, MemberResponse, OwnerRef, RosterResponse, ScheduleEntryResponse,
    ScheduleTeamResponse, TeamResponse,
};
use core_types::{matchup_id, BoxScore, DraftPick, LeagueInfo, Matchup, Team, TeamId};
use std::collections::{BTreeSet, HashMap};

/// Used when the league settings do not say how long the regular season is.
pub const DEFAULT_REGULAR_SEASON_WEEKS: u16 = 14;
const DEFAULT_TOTAL_WEEKS: u16 = 17;
const DEFAULT_LEAGUE_NAME: &str = "Fantasy League";
const WINNERS_BRACKET: &str = "WINNERS_BRACKET";

const BENCH_SLOT: u16 = 20;
const INJURED_RESERVE_SLOT: u16 = 21;
const PROJECTED_STAT_SOURCE: u8 = 1;

/// Maps member ids to display names. Built once per league document.
pub fn owner_directory(members: &[MemberResponse]) -> HashMap<&str, String> {
    members
        .iter()
        .map(|m| {
            let name = display_name(
                m.display_name.as_deref(),
                m.first_name.as_deref(),
                m.last_name.as_deref(),
            );
            (m.id.as_str(), name.unwrap_or_else(|| "Unknown".to_string()))
        })
        .collect()
}

fn display_name(display: Option<&str>, first: Option<&str>, last: Option<&str>) -> Option<String> {
    if let Some(display) = display.map(str::trim).filter(|d| !d.is_empty()) {
        return Some(display.to_string());
    }
    let full = format!("{} {}", first.unwrap_or(""), last.unwrap_or(""));
    let full = full.trim();
    (!full.is_empty()).then(|| full.to_string())
}

fn owner_name(team: &TeamResponse, directory: &HashMap<&str, String>) -> String {
    let resolved = team.owners.first().and_then(|owner| match owner {
        OwnerRef::Id(id) => directory.get(id.as_str()).cloned(),
        OwnerRef::Inline {
            display_name: display,
            first_name,
            last_name,
        } => display_name(display.as_deref(), first_name.as_deref(), last_name.as_deref()),
    });
    resolved.unwrap_or_else(|| "Unknown".to_string())
}

/// `"{location} {nickname}"` when both are set. Newer seasons drop `location`
/// and carry the full name in `name`, which then wins over a lone nickname.
fn team_name(team: &TeamResponse) -> String {
    fn non_empty(s: Option<&str>) -> Option<&str> {
        s.map(str::trim).filter(|s| !s.is_empty())
    }
    let location = non_empty(team.location.as_deref());
    let nickname = non_empty(team.nickname.as_deref());

    if let (Some(location), Some(nickname)) = (location, nickname) {
        return format!("{location} {nickname}");
    }
    non_empty(team.name.as_deref())
        .or(location)
        .or(nickname)
        .map_or_else(|| format!("Team {}", team.id), str::to_string)
}

fn abbreviation(team: &TeamResponse) -> String {
    if let Some(abbrev) = team.abbrev.as_deref().filter(|a| !a.is_empty()) {
        return abbrev.to_string();
    }
    match team.nickname.as_deref().filter(|n| !n.is_empty()) {
        Some(nickname) => nickname.chars().take(3).collect::<String>().to_uppercase(),
        None => format!("T{}", team.id),
    }
}

/// Normalizes the `mTeam` view into teams, resolving owners through `members`.
pub fn teams(doc: &LeagueResponse) -> Vec<Team> {
    let directory = owner_directory(&doc.members);
    doc.teams
        .iter()
        .map(|t| Team {
            id: t.id,
            name: team_name(t),
            owner: owner_name(t, &directory),
            abbreviation: abbreviation(t),
            logo: t.logo.clone(),
            primary_color: t.primary_color.clone(),
            secondary_color: t.secondary_color.clone(),
        })
        .collect()
}

/// Normalizes the `mSettings` view. `known_teams` is used when the settings omit the league size.
pub fn league_info(doc: &LeagueResponse, season: u16, known_teams: usize) -> LeagueInfo {
    let settings = doc.settings.as_ref();
    LeagueInfo {
        name: settings
            .and_then(|s| s.name.clone())
            .unwrap_or_else(|| DEFAULT_LEAGUE_NAME.to_string()),
        season: doc.season_id.unwrap_or(season),
        total_teams: settings.and_then(|s| s.size).unwrap_or(known_teams),
        total_weeks: regular_season_weeks(doc).unwrap_or(DEFAULT_TOTAL_WEEKS),
    }
}

/// The number of regular-season matchup periods, if the settings carry it.
pub fn regular_season_weeks(doc: &LeagueResponse) -> Option<u16> {
    doc.settings
        .as_ref()
        .and_then(|s| s.schedule_settings.as_ref())
        .and_then(|s| s.matchup_period_count)
}

/// Normalizes the `mMatchup` schedule into played matchups.
///
/// Byes, 0-0 (unplayed) matchups and matchups referencing unknown teams are dropped.
pub fn schedule(
    season: u16,
    entries: &[ScheduleEntryResponse],
    teams: &[Team],
    regular_season_weeks: u16,
) -> Vec<Matchup> {
    let by_id: HashMap<TeamId, &Team> = teams.iter().map(|t| (t.id, t)).collect();

    let bracket_weeks: BTreeSet<u16> = entries
        .iter()
        .filter(|e| is_winners_bracket(e))
        .map(|e| e.matchup_period_id)
        .collect();
    let mut latest = bracket_weeks.iter().rev();
    let final_week = latest.next().copied();
    let semifinal_week = latest.next().copied();

    entries
        .iter()
        .filter_map(|entry| {
            let (home, away) = (entry.home.as_ref()?, entry.away.as_ref()?);
            let (Some(home_team), Some(away_team)) = (by_id.get(&home.team_id), by_id.get(&away.team_id)) else {
                tracing::warn!(
                    matchup = entry.id,
                    home = home.team_id,
                    away = away.team_id,
                    "Dropping matchup with unknown team."
                );
                return None;
            };

            let week = entry.matchup_period_id;
            let winners_bracket = is_winners_bracket(entry);
            let matchup = Matchup::new(
                season,
                week,
                entry.id,
                (*home_team).clone(),
                (*away_team).clone(),
                home.total_points,
                away.total_points,
            )
            .with_playoff_flags(
                winners_bracket || week > regular_season_weeks,
                winners_bracket && Some(week) == semifinal_week,
                winners_bracket && Some(week) == final_week,
            );
            matchup.is_played().then_some(matchup)
        })
        .collect()
}

fn is_winners_bracket(entry: &ScheduleEntryResponse) -> bool {
    entry.playoff_tier_type.as_deref() == Some(WINNERS_BRACKET)
}

/// Normalizes the rosters of an `mBoxscore` document for one week.
pub fn box_scores(season: u16, week: u16, entries: &[ScheduleEntryResponse]) -> Vec<BoxScore> {
    let mut lines = Vec::new();
    for entry in entries.iter().filter(|e| e.matchup_period_id == week) {
        let matchup = matchup_id(season, week, entry.id);
        for side in [entry.home.as_ref(), entry.away.as_ref()].into_iter().flatten() {
            if let Some(roster) = &side.roster_for_current_scoring_period {
                roster_lines(&matchup, week, side, roster, &mut lines);
            }
        }
    }
    lines
}

fn roster_lines(
    matchup: &str,
    week: u16,
    side: &ScheduleTeamResponse,
    roster: &RosterResponse,
    out: &mut Vec<BoxScore>,
) {
    for entry in &roster.entries {
        let pool = entry.player_pool_entry.as_ref();
        let player = pool.and_then(|p| p.player.as_ref());
        let projected = player
            .and_then(|p| {
                p.stats
                    .iter()
                    .find(|s| s.scoring_period_id == week && s.stat_source_id == PROJECTED_STAT_SOURCE)
            })
            .map_or(0.0, |s| s.applied_total);

        out.push(BoxScore {
            id: format!("{matchup}-{}", entry.player_id),
            matchup_id: matchup.to_string(),
            team_id: side.team_id,
            slot: slot_label(entry.lineup_slot_id).to_string(),
            player_id: entry.player_id.to_string(),
            player_name: player_name(entry.player_id, player.and_then(|p| p.full_name.as_deref())),
            position: position_label(player.and_then(|p| p.default_position_id)).to_string(),
            projected,
            actual: pool.map_or(0.0, |p| p.applied_stat_total),
            on_bench: matches!(entry.lineup_slot_id, BENCH_SLOT | INJURED_RESERVE_SLOT),
        });
    }
}

fn player_name(player_id: i64, full_name: Option<&str>) -> String {
    full_name
        .filter(|n| !n.is_empty())
        .map_or_else(|| format!("Player {player_id}"), str::to_string)
}

/// ESPN lineup slot ids.
pub fn slot_label(slot_id: u16) -> &'static str {
    match slot_id {
        0 => "QB",
        2 => "RB",
        3 => "RB/WR",
        4 => "WR",
        5 => "WR/TE",
        6 => "TE",
        7 => "OP",
        16 => "D/ST",
        17 => "K",
        20 => "BE",
        21 => "IR",
        23 => "FLEX",
        _ => "UNK",
    }
}

/// ESPN default position ids.
pub fn position_label(position_id: Option<u16>) -> &'static str {
    match position_id {
        Some(1) => "QB",
        Some(2) => "RB",
        Some(3) => "WR",
        Some(4) => "TE",
        Some(5) => "K",
        Some(16) => "D/ST",
        _ => "UNK",
    }
}

/// Normalizes `mDraftDetail`. Player names come from the `mRoster` view of the
/// same document when present.
pub fn draft(season: u16, doc: &LeagueResponse) -> Vec<DraftPick> {
    let mut players: HashMap<i64, (Option<&str>, Option<u16>)> = HashMap::new();
    for team in &doc.teams {
        let Some(roster) = &team.roster else { continue };
        for entry in &roster.entries {
            if let Some(player) = entry.player_pool_entry.as_ref().and_then(|p| p.player.as_ref()) {
                players.insert(player.id, (player.full_name.as_deref(), player.default_position_id));
            }
        }
    }

    let Some(detail) = &doc.draft_detail else {
        return Vec::new();
    };
    detail
        .picks
        .iter()
        .map(|pick| {
            let (name, position) = players.get(&pick.player_id).copied().unwrap_or((None, None));
            DraftPick {
                id: format!("{season}-{}-{}", pick.round_id, pick.overall_pick_number),
                season,
                round: pick.round_id,
                pick_overall: pick.overall_pick_number,
                team_id: pick.team_id,
                player_id: pick.player_id.to_string(),
                player_name: player_name(pick.player_id, name),
                position: position_label(position).to_string(),
            }
        })
        .collect()
}
