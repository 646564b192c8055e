use crate::error::ConfigError;
use chrono::{Datelike, NaiveDate, Utc};
use serde::Deserialize;

/// ESPN's read-only fantasy football endpoint.
pub const DEFAULT_ESPN_BASE_URL: &str = "https://lm-api-reads.fantasy.espn.com/apis/v3/games/ffl";

/// The root configuration structure for the entire application.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub league: LeagueConfig,
    #[serde(default)]
    pub espn: EspnConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

/// Identifies the league and carries the cookies private leagues require.
#[derive(Debug, Clone, Deserialize)]
pub struct LeagueConfig {
    /// The ESPN league id. 0 means "not configured".
    #[serde(default)]
    pub id: u32,
    /// The season served when a request does not name one.
    #[serde(default = "current_season")]
    pub season: u16,
    /// The `espn_s2` cookie of a league member.
    #[serde(default)]
    pub espn_s2: Option<String>,
    /// The `SWID` cookie of a league member.
    #[serde(default)]
    pub swid: Option<String>,
}

/// Settings for the ESPN HTTP client.
#[derive(Debug, Clone, Deserialize)]
pub struct EspnConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Caps how many completed weeks of box scores are fetched per season.
    /// `None` fetches every completed week.
    #[serde(default)]
    pub max_box_score_weeks: Option<u16>,
}

/// Settings for the HTTP server.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Serve the built-in fixture league when ESPN cannot be reached.
    #[serde(default = "default_true")]
    pub fallback_to_fixtures: bool,
}

impl LeagueConfig {
    pub fn is_configured(&self) -> bool {
        self.id != 0
    }

    /// Returns `(espn_s2, swid)` when both cookies are present.
    pub fn credentials(&self) -> Option<(&str, &str)> {
        match (self.espn_s2.as_deref(), self.swid.as_deref()) {
            (Some(s2), Some(swid)) if !s2.is_empty() && !swid.is_empty() => Some((s2, swid)),
            _ => None,
        }
    }
}

impl Config {
    /// Checks the invariants serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::ValidationError("server.port must not be 0".to_string()));
        }
        if self.espn.timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "espn.timeout_secs must be greater than 0".to_string(),
            ));
        }
        if self.espn.max_box_score_weeks == Some(0) {
            return Err(ConfigError::ValidationError(
                "espn.max_box_score_weeks must be at least 1 when set".to_string(),
            ));
        }
        let has_s2 = self.league.espn_s2.as_deref().is_some_and(|s| !s.is_empty());
        let has_swid = self.league.swid.as_deref().is_some_and(|s| !s.is_empty());
        if has_s2 != has_swid {
            return Err(ConfigError::ValidationError(
                "espn_s2 and swid must be set together".to_string(),
            ));
        }
        Ok(())
    }
}

// --- Default Implementations ---

impl Default for LeagueConfig {
    fn default() -> Self {
        Self {
            id: 0,
            season: current_season(),
            espn_s2: None,
            swid: None,
        }
    }
}

impl Default for EspnConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            max_box_score_weeks: None,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            fallback_to_fixtures: true,
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_ESPN_BASE_URL.to_string()
}
fn default_timeout_secs() -> u64 { 10 }
fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 { 3000 }
fn default_true() -> bool { true }

fn current_season() -> u16 {
    season_for_date(Utc::now().date_naive())
}

/// ESPN names a season after the year it kicks off in. Before August the
/// latest season is still last year's.
pub fn season_for_date(date: NaiveDate) -> u16 {
    let year = if date.month() >= 8 { date.year() } else { date.year() - 1 };
    u16::try_from(year).unwrap_or(u16::MAX)
}
