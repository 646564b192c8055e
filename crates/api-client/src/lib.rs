use crate::error::ApiError;
use crate::responses::LeagueResponse;
use async_trait::async_trait;
use configuration::{EspnConfig, LeagueConfig};
use core_types::{BoxScore, DraftPick, LeagueInfo, SeasonData};
use futures::future::join_all;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, COOKIE};
use std::collections::BTreeSet;
use std::time::Duration;

pub mod error;
pub mod fixtures;
pub mod normalize;
pub mod responses;

// --- Public API ---
pub use fixtures::FixtureSource;

/// The generic, abstract interface for anything that can produce league data.
/// This trait is the contract that the server and CLI use, allowing the
/// underlying implementation (live ESPN or the fixture league) to be swapped out.
#[async_trait]
pub trait LeagueDataSource: Send + Sync {
    /// Fetches the league's name, size and schedule length for a season.
    async fn fetch_league_info(&self, season: u16) -> Result<LeagueInfo, ApiError>;

    /// Fetches and normalizes a whole season: teams, played matchups and box scores.
    async fn fetch_season(&self, season: u16) -> Result<SeasonData, ApiError>;

    /// Fetches the draft board of a season.
    async fn fetch_draft(&self, season: u16) -> Result<Vec<DraftPick>, ApiError>;
}

/// A concrete implementation of `LeagueDataSource` backed by ESPN's fantasy API.
#[derive(Clone)]
pub struct EspnClient {
    client: reqwest::Client,
    base_url: String,
    league_id: u32,
    max_box_score_weeks: Option<u16>,
}

impl EspnClient {
    /// Builds a client for `league`. Private leagues need both cookies set.
    pub fn new(league: &LeagueConfig, espn: &EspnConfig) -> Result<Self, ApiError> {
        if !league.is_configured() {
            return Err(ApiError::NotConfigured("league id is 0".to_string()));
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        if let Some((espn_s2, swid)) = league.credentials() {
            let cookie = HeaderValue::from_str(&format!("espn_s2={espn_s2}; SWID={swid}"))
                .map_err(|e| ApiError::InvalidData(format!("Invalid ESPN cookies: {e}")))?;
            headers.insert(COOKIE, cookie);
        }

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(espn.timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: espn.base_url.trim_end_matches('/').to_string(),
            league_id: league.id,
            max_box_score_weeks: espn.max_box_score_weeks,
        })
    }

    fn league_url(&self, season: u16) -> String {
        format!(
            "{}/seasons/{}/segments/0/leagues/{}",
            self.base_url, season, self.league_id
        )
    }

    /// Requests the league document with the given views.
    async fn get_view(
        &self,
        season: u16,
        views: &[&str],
        scoring_period: Option<u16>,
    ) -> Result<LeagueResponse, ApiError> {
        let url = self.league_url(season);
        let mut query: Vec<(&str, String)> = views.iter().map(|v| ("view", v.to_string())).collect();
        if let Some(period) = scoring_period {
            query.push(("scoringPeriodId", period.to_string()));
        }
        tracing::debug!(%url, ?views, ?scoring_period, "Requesting ESPN league view.");

        let response = self.client.get(&url).query(&query).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                url,
            });
        }
        let text = response.text().await?;
        serde_json::from_str::<LeagueResponse>(&text)
            .map_err(|e| ApiError::Deserialization(e.to_string()))
    }

    async fn fetch_box_scores_for_week(&self, season: u16, week: u16) -> Result<Vec<BoxScore>, ApiError> {
        let doc = self.get_view(season, &["mBoxscore"], Some(week)).await?;
        Ok(normalize::box_scores(season, week, &doc.schedule))
    }

    /// Weeks with at least one played matchup, capped to the most recent
    /// `max_box_score_weeks` when configured.
    fn box_score_weeks(&self, played: BTreeSet<u16>) -> Vec<u16> {
        let weeks: Vec<u16> = played.into_iter().collect();
        match self.max_box_score_weeks {
            Some(max) if weeks.len() > max as usize => weeks[weeks.len() - max as usize..].to_vec(),
            _ => weeks,
        }
    }
}

#[async_trait]
impl LeagueDataSource for EspnClient {
    async fn fetch_league_info(&self, season: u16) -> Result<LeagueInfo, ApiError> {
        let doc = self.get_view(season, &["mSettings"], None).await?;
        Ok(normalize::league_info(&doc, season, doc.teams.len()))
    }

    async fn fetch_season(&self, season: u16) -> Result<SeasonData, ApiError> {
        let (settings_doc, team_doc, schedule_doc) = tokio::try_join!(
            self.get_view(season, &["mSettings"], None),
            self.get_view(season, &["mTeam"], None),
            self.get_view(season, &["mMatchup"], None),
        )?;

        let teams = normalize::teams(&team_doc);
        let league_info = normalize::league_info(&settings_doc, season, teams.len());
        let regular_season_weeks = normalize::regular_season_weeks(&settings_doc)
            .unwrap_or(normalize::DEFAULT_REGULAR_SEASON_WEEKS);
        let matchups = normalize::schedule(season, &schedule_doc.schedule, &teams, regular_season_weeks);

        let weeks = self.box_score_weeks(matchups.iter().map(|m| m.week).collect());
        let results = join_all(
            weeks
                .iter()
                .map(|&week| self.fetch_box_scores_for_week(season, week)),
        )
        .await;

        let mut box_scores = Vec::new();
        for (week, result) in weeks.iter().zip(results) {
            match result {
                Ok(lines) => box_scores.extend(lines),
                Err(e) => tracing::warn!(season, week, error = %e, "Skipping box scores for week."),
            }
        }

        tracing::info!(
            season,
            teams = teams.len(),
            matchups = matchups.len(),
            box_scores = box_scores.len(),
            "Fetched season from ESPN."
        );

        Ok(SeasonData {
            league_info,
            teams,
            matchups,
            box_scores,
        })
    }

    async fn fetch_draft(&self, season: u16) -> Result<Vec<DraftPick>, ApiError> {
        let doc = self.get_view(season, &["mDraftDetail", "mRoster"], None).await?;
        Ok(normalize::draft(season, &doc))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const LEAGUE_PATH: &str = "/seasons/2024/segments/0/leagues/123456";

    fn client_for(server: &MockServer, credentials: bool) -> EspnClient {
        let league = LeagueConfig {
            id: 123456,
            season: 2024,
            espn_s2: credentials.then(|| "s2cookie".to_string()),
            swid: credentials.then(|| "{SWID}".to_string()),
        };
        let espn = EspnConfig {
            base_url: server.uri(),
            timeout_secs: 5,
            max_box_score_weeks: None,
        };
        EspnClient::new(&league, &espn).unwrap()
    }

    async fn mount_view(server: &MockServer, view: &str, body: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path(LEAGUE_PATH))
            .and(query_param("view", view))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(server)
            .await;
    }

    fn settings() -> serde_json::Value {
        json!({
            "seasonId": 2024,
            "settings": { "name": "Dynasty League", "size": 2,
                          "scheduleSettings": { "matchupPeriodCount": 14 } }
        })
    }

    fn teams() -> serde_json::Value {
        json!({
            "members": [{ "id": "{A}", "displayName": "Josh" }, { "id": "{B}", "displayName": "Mike" }],
            "teams": [
                { "id": 1, "location": "The", "nickname": "Dynasty", "abbrev": "DYN", "owners": ["{A}"] },
                { "id": 2, "location": "Gridiron", "nickname": "Gladiators", "abbrev": "GG", "owners": ["{B}"] }
            ]
        })
    }

    fn schedule() -> serde_json::Value {
        json!({
            "schedule": [
                { "id": 1, "matchupPeriodId": 1,
                  "home": { "teamId": 1, "totalPoints": 142.5 },
                  "away": { "teamId": 2, "totalPoints": 118.3 } },
                { "id": 2, "matchupPeriodId": 2,
                  "home": { "teamId": 2, "totalPoints": 149.2 },
                  "away": { "teamId": 1, "totalPoints": 132.8 } },
                { "id": 3, "matchupPeriodId": 3,
                  "home": { "teamId": 1, "totalPoints": 0.0 },
                  "away": { "teamId": 2, "totalPoints": 0.0 } }
            ]
        })
    }

    fn box_score_week(week: u16, id: u32) -> serde_json::Value {
        json!({
            "schedule": [{
                "id": id,
                "matchupPeriodId": week,
                "home": { "teamId": 1, "totalPoints": 100.0, "rosterForCurrentScoringPeriod": { "entries": [
                    { "playerId": 10, "lineupSlotId": 20, "playerPoolEntry": { "appliedStatTotal": 12.0,
                      "player": { "id": 10, "fullName": "Bench Guy", "defaultPositionId": 2 } } }
                ] } },
                "away": { "teamId": 2, "totalPoints": 90.0 }
            }]
        })
    }

    #[tokio::test]
    async fn test_fetch_season_combines_views() {
        let server = MockServer::start().await;
        mount_view(&server, "mSettings", settings()).await;
        mount_view(&server, "mTeam", teams()).await;
        mount_view(&server, "mMatchup", schedule()).await;
        Mock::given(method("GET"))
            .and(path(LEAGUE_PATH))
            .and(query_param("view", "mBoxscore"))
            .and(query_param("scoringPeriodId", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(box_score_week(1, 1)))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(LEAGUE_PATH))
            .and(query_param("view", "mBoxscore"))
            .and(query_param("scoringPeriodId", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(box_score_week(2, 2)))
            .mount(&server)
            .await;

        let data = client_for(&server, false).fetch_season(2024).await.unwrap();

        assert_eq!(data.league_info.name, "Dynasty League");
        assert_eq!(data.league_info.total_weeks, 14);
        assert_eq!(data.teams.len(), 2);
        assert_eq!(data.teams[0].name, "The Dynasty");
        assert_eq!(data.teams[0].owner, "Josh");
        // The 0-0 week 3 matchup has not been played yet.
        assert_eq!(data.matchups.len(), 2);
        assert_eq!(data.box_scores.len(), 2);
        assert_eq!(data.box_scores[0].matchup_id, "2024-1-1");
        assert_eq!(data.box_scores[1].matchup_id, "2024-2-2");
    }

    #[tokio::test]
    async fn test_failed_box_score_week_is_skipped() {
        let server = MockServer::start().await;
        mount_view(&server, "mSettings", settings()).await;
        mount_view(&server, "mTeam", teams()).await;
        mount_view(&server, "mMatchup", schedule()).await;
        Mock::given(method("GET"))
            .and(path(LEAGUE_PATH))
            .and(query_param("view", "mBoxscore"))
            .and(query_param("scoringPeriodId", "1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(box_score_week(1, 1)))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path(LEAGUE_PATH))
            .and(query_param("view", "mBoxscore"))
            .and(query_param("scoringPeriodId", "2"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&server)
            .await;

        let data = client_for(&server, false).fetch_season(2024).await.unwrap();

        assert_eq!(data.matchups.len(), 2);
        assert_eq!(data.box_scores.len(), 1);
        assert_eq!(data.box_scores[0].matchup_id, "2024-1-1");
    }

    #[tokio::test]
    async fn test_sends_cookies_for_private_leagues() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(LEAGUE_PATH))
            .and(header("cookie", "espn_s2=s2cookie; SWID={SWID}"))
            .respond_with(ResponseTemplate::new(200).set_body_json(settings()))
            .mount(&server)
            .await;

        let info = client_for(&server, true).fetch_league_info(2024).await.unwrap();
        assert_eq!(info.name, "Dynasty League");
        assert_eq!(info.total_teams, 2);
    }

    #[tokio::test]
    async fn test_error_status_is_reported() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(LEAGUE_PATH))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let result = client_for(&server, false).fetch_league_info(2024).await;
        assert!(matches!(result, Err(ApiError::Status { status: 401, .. })));
    }

    #[tokio::test]
    async fn test_malformed_body_is_a_deserialization_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(LEAGUE_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>login</html>"))
            .mount(&server)
            .await;

        let result = client_for(&server, false).fetch_league_info(2024).await;
        assert!(matches!(result, Err(ApiError::Deserialization(_))));
    }

    #[tokio::test]
    async fn test_fetch_draft() {
        let server = MockServer::start().await;
        mount_view(
            &server,
            "mDraftDetail",
            json!({
                "draftDetail": { "picks": [
                    { "roundId": 1, "overallPickNumber": 1, "teamId": 2, "playerId": 7 }
                ] }
            }),
        )
        .await;

        let picks = client_for(&server, false).fetch_draft(2024).await.unwrap();
        assert_eq!(picks.len(), 1);
        assert_eq!((picks[0].team_id, picks[0].player_name.as_str()), (2, "Player 7"));
    }

    #[test]
    fn test_unconfigured_league_is_rejected() {
        let result = EspnClient::new(&LeagueConfig::default(), &EspnConfig::default());
        assert!(matches!(result, Err(ApiError::NotConfigured(_))));
    }

    #[test]
    fn test_box_score_weeks_keeps_most_recent() {
        let league = LeagueConfig { id: 1, ..LeagueConfig::default() };
        let espn = EspnConfig { max_box_score_weeks: Some(2), ..EspnConfig::default() };
        let client = EspnClient::new(&league, &espn).unwrap();
        assert_eq!(client.box_score_weeks(BTreeSet::from([1, 2, 3, 4])), vec![3, 4]);
    }
}
