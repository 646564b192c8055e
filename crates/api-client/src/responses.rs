use serde::Deserialize;

// Wire types for the ESPN fantasy v3 `leagues/{id}` endpoint. Which fields are
// populated depends on the `view` parameters of the request, so nearly
// everything defaults when absent.
//
// Using `#[serde(rename_all = "camelCase")]` to automatically map from JSON camelCase to Rust snake_case.

/// The league document returned for any combination of views.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueResponse {
    #[serde(default)]
    pub season_id: Option<u16>,
    #[serde(default)]
    pub settings: Option<SettingsResponse>,
    #[serde(default)]
    pub teams: Vec<TeamResponse>,
    #[serde(default)]
    pub members: Vec<MemberResponse>,
    #[serde(default)]
    pub schedule: Vec<ScheduleEntryResponse>,
    #[serde(default)]
    pub draft_detail: Option<DraftDetailResponse>,
}

/// `view=mSettings`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsResponse {
    pub name: Option<String>,
    pub size: Option<usize>,
    pub schedule_settings: Option<ScheduleSettingsResponse>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleSettingsResponse {
    /// Number of regular-season matchup periods.
    pub matchup_period_count: Option<u16>,
}

/// `view=mTeam`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamResponse {
    pub id: u32,
    pub location: Option<String>,
    pub nickname: Option<String>,
    /// Newer seasons carry a single combined name instead of location + nickname.
    pub name: Option<String>,
    pub abbrev: Option<String>,
    #[serde(default)]
    pub owners: Vec<OwnerRef>,
    pub logo: Option<String>,
    pub primary_color: Option<String>,
    pub secondary_color: Option<String>,
    /// Only present with `view=mRoster`.
    pub roster: Option<RosterResponse>,
}

/// Owners arrive either as member ids (SWIDs) or, from some proxies, inline.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum OwnerRef {
    Id(String),
    #[serde(rename_all = "camelCase")]
    Inline {
        display_name: Option<String>,
        first_name: Option<String>,
        last_name: Option<String>,
    },
}

/// A league member, referenced by `TeamResponse::owners`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberResponse {
    pub id: String,
    pub display_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// `view=mMatchup` / `view=mBoxscore`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleEntryResponse {
    pub id: u32,
    pub matchup_period_id: u16,
    pub home: Option<ScheduleTeamResponse>,
    /// Absent for bye weeks.
    pub away: Option<ScheduleTeamResponse>,
    /// "HOME", "AWAY", "TIE" or "UNDECIDED".
    pub winner: Option<String>,
    /// "NONE", "WINNERS_BRACKET", "LOSERS_CONSOLATION_LADDER", ...
    pub playoff_tier_type: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleTeamResponse {
    pub team_id: u32,
    #[serde(default)]
    pub total_points: f64,
    pub roster_for_current_scoring_period: Option<RosterResponse>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterResponse {
    #[serde(default)]
    pub entries: Vec<RosterEntryResponse>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RosterEntryResponse {
    pub player_id: i64,
    pub lineup_slot_id: u16,
    pub player_pool_entry: Option<PlayerPoolEntryResponse>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerPoolEntryResponse {
    #[serde(default)]
    pub applied_stat_total: f64,
    pub player: Option<PlayerResponse>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerResponse {
    pub id: i64,
    pub full_name: Option<String>,
    pub default_position_id: Option<u16>,
    #[serde(default)]
    pub stats: Vec<PlayerStatResponse>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerStatResponse {
    #[serde(default)]
    pub scoring_period_id: u16,
    /// 0 = actual, 1 = projected.
    #[serde(default)]
    pub stat_source_id: u8,
    #[serde(default)]
    pub applied_total: f64,
}

/// `view=mDraftDetail`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftDetailResponse {
    #[serde(default)]
    pub picks: Vec<DraftPickResponse>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftPickResponse {
    pub round_id: u16,
    #[serde(default)]
    pub overall_pick_number: u16,
    pub team_id: u32,
    pub player_id: i64,
}
