use crate::{error::AppError, AppState};
use analytics::{LeagueHistory, LeagueReport};
use api_client::{EspnClient, LeagueDataSource};
use axum::{
    extract::{Query, State},
    Json,
};
use configuration::LeagueConfig;
use core_types::{BoxScore, DraftPick, LeagueInfo, Matchup, SeasonData, Team};
use futures_util::future::join_all;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Upper bound on the seasons a single history request may fan out to.
const MAX_HISTORY_SEASONS: u16 = 30;

/// Where a response's league data came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataSource {
    Espn,
    Fixture,
}

#[derive(Debug, Deserialize)]
pub struct SeasonQuery {
    pub season: Option<u16>,
}

#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub from: u16,
    pub to: u16,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueResponse {
    pub league_info: LeagueInfo,
    pub teams: Vec<Team>,
    pub schedule: Vec<Matchup>,
    pub box_scores: Vec<BoxScore>,
    pub stats: LeagueReport,
    pub source: DataSource,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeagueActionRequest {
    pub action: String,
    pub season: Option<u16>,
    pub league_id: Option<u32>,
    pub espn_s2: Option<String>,
    pub swid: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionTestResponse {
    pub success: bool,
    pub league_name: String,
    pub season: u16,
}

/// Fetches a season from the live league, falling back to the fixture league
/// when allowed.
async fn load_season(state: &AppState, season: u16) -> Result<(SeasonData, DataSource), AppError> {
    let fallback = state.config.server.fallback_to_fixtures;
    let Some(source) = &state.source else {
        if !fallback {
            return Err(AppError::BadRequest("League ID not configured".to_string()));
        }
        tracing::warn!(season, "League ID not configured; serving the fixture league.");
        return Ok((state.fixtures.fetch_season(season).await?, DataSource::Fixture));
    };

    match source.fetch_season(season).await {
        Ok(data) => Ok((data, DataSource::Espn)),
        Err(e) if fallback => {
            tracing::warn!(season, error = %e, "ESPN fetch failed; serving the fixture league.");
            Ok((state.fixtures.fetch_season(season).await?, DataSource::Fixture))
        }
        Err(e) => Err(e.into()),
    }
}

/// # GET /api/league?season=YYYY
/// Fetches one season with its computed statistics.
pub async fn get_league(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SeasonQuery>,
) -> Result<Json<LeagueResponse>, AppError> {
    let season = query.season.unwrap_or(state.config.league.season);
    let (data, source) = load_season(&state, season).await?;
    let stats = state.engine.report(&data);

    Ok(Json(LeagueResponse {
        league_info: data.league_info,
        teams: data.teams,
        schedule: data.matchups,
        box_scores: data.box_scores,
        stats,
        source,
    }))
}

/// # POST /api/league
/// Supports `{ "action": "test-connection", ... }` to validate league credentials.
pub async fn post_league(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LeagueActionRequest>,
) -> Result<Json<ConnectionTestResponse>, AppError> {
    if request.action != "test-connection" {
        return Err(AppError::BadRequest("Invalid action".to_string()));
    }

    let league = LeagueConfig {
        id: request.league_id.unwrap_or(state.config.league.id),
        season: request.season.unwrap_or(state.config.league.season),
        espn_s2: request.espn_s2,
        swid: request.swid,
    };
    if !league.is_configured() {
        return Err(AppError::BadRequest("League ID not configured".to_string()));
    }

    let client = EspnClient::new(&league, &state.config.espn)?;
    let info = client.fetch_league_info(league.season).await?;
    tracing::info!(league_id = league.id, season = league.season, "Connection test succeeded.");

    Ok(Json(ConnectionTestResponse {
        success: true,
        league_name: info.name,
        season: league.season,
    }))
}

/// # GET /api/league/history?from=YYYY&to=YYYY
/// Fetches every season in the range concurrently and computes all-time statistics.
pub async fn get_history(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<LeagueHistory>, AppError> {
    if query.from > query.to {
        return Err(AppError::BadRequest(format!(
            "'from' ({}) must not be after 'to' ({})",
            query.from, query.to
        )));
    }
    if query.to - query.from >= MAX_HISTORY_SEASONS {
        return Err(AppError::BadRequest(format!(
            "at most {MAX_HISTORY_SEASONS} seasons can be requested at once"
        )));
    }

    let results = join_all((query.from..=query.to).map(|season| {
        let state = &state;
        async move { (season, load_season(state, season).await) }
    }))
    .await;

    let mut seasons = Vec::new();
    for (season, result) in results {
        match result {
            Ok((data, _)) => seasons.push(data),
            // A bad request is the same for every season.
            Err(e @ AppError::BadRequest(_)) => return Err(e),
            Err(e) => tracing::warn!(season, error = %e, "Skipping season in history."),
        }
    }

    if seasons.is_empty() {
        return Err(AppError::Unavailable(format!(
            "no season between {} and {} could be fetched",
            query.from, query.to
        )));
    }

    Ok(Json(state.engine.history(&seasons)))
}

/// # GET /api/league/draft?season=YYYY
pub async fn get_draft(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SeasonQuery>,
) -> Result<Json<Vec<DraftPick>>, AppError> {
    let season = query.season.unwrap_or(state.config.league.season);
    let fallback = state.config.server.fallback_to_fixtures;

    let picks = match &state.source {
        Some(source) => match source.fetch_draft(season).await {
            Ok(picks) => picks,
            Err(e) if fallback => {
                tracing::warn!(season, error = %e, "ESPN draft fetch failed; serving the fixture draft.");
                state.fixtures.fetch_draft(season).await?
            }
            Err(e) => return Err(e.into()),
        },
        None if fallback => state.fixtures.fetch_draft(season).await?,
        None => return Err(AppError::BadRequest("League ID not configured".to_string())),
    };

    Ok(Json(picks))
}

#[cfg(test)]
mod tests {
    use crate::{app, AppState};
    use analytics::StatsEngine;
    use api_client::error::ApiError;
    use api_client::{FixtureSource, LeagueDataSource};
    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use axum::response::Response;
    use configuration::Config;
    use core_types::{DraftPick, LeagueInfo, SeasonData};
    use std::sync::Arc;
    use tower::ServiceExt;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    /// A live source that fails every season listed in `failing`.
    struct FlakySource {
        failing: Vec<u16>,
    }

    #[async_trait]
    impl LeagueDataSource for FlakySource {
        async fn fetch_league_info(&self, season: u16) -> Result<LeagueInfo, ApiError> {
            Ok(self.fetch_season(season).await?.league_info)
        }

        async fn fetch_season(&self, season: u16) -> Result<SeasonData, ApiError> {
            if self.failing.contains(&season) {
                return Err(ApiError::Status {
                    status: 503,
                    url: format!("https://espn.test/seasons/{season}"),
                });
            }
            FixtureSource::new().season_data(season)
        }

        async fn fetch_draft(&self, season: u16) -> Result<Vec<DraftPick>, ApiError> {
            FixtureSource::new().draft(season)
        }
    }

    fn state(source: Option<FlakySource>, fallback: bool) -> Arc<AppState> {
        let mut config = Config::default();
        config.server.fallback_to_fixtures = fallback;
        config.league.season = 2024;
        Arc::new(AppState {
            config,
            source: source.map(|s| Arc::new(s) as Arc<dyn LeagueDataSource>),
            fixtures: Arc::new(FixtureSource::new()),
            engine: StatsEngine::new(),
        })
    }

    async fn send(state: Arc<AppState>, request: Request<Body>) -> Response {
        app(state).oneshot(request).await.unwrap()
    }

    async fn get(state: Arc<AppState>, uri: &str) -> (StatusCode, serde_json::Value) {
        let response = send(state, Request::get(uri).body(Body::empty()).unwrap()).await;
        read_json(response).await
    }

    async fn post(state: Arc<AppState>, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
        let request = Request::post("/api/league")
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap();
        read_json(send(state, request).await).await
    }

    async fn read_json(response: Response) -> (StatusCode, serde_json::Value) {
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null))
    }

    #[tokio::test]
    async fn test_health() {
        let response = send(state(None, true), Request::get("/api/health").body(Body::empty()).unwrap()).await;
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], b"OK");
    }

    #[tokio::test]
    async fn test_league_from_live_source() {
        let (status, body) = get(state(Some(FlakySource { failing: vec![] }), false), "/api/league?season=2023").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["source"], "espn");
        assert_eq!(body["leagueInfo"]["season"], 2023);
        assert_eq!(body["teams"].as_array().unwrap().len(), 10);
        assert_eq!(body["schedule"].as_array().unwrap().len(), 10);
        assert_eq!(body["stats"]["leagueStats"].as_array().unwrap().len(), 10);
        assert_eq!(body["stats"]["rivalries"].as_array().unwrap().len(), 45);
        assert_eq!(body["stats"]["seasonSummary"]["season"], 2023);
    }

    #[tokio::test]
    async fn test_league_defaults_to_configured_season() {
        let (status, body) = get(state(Some(FlakySource { failing: vec![] }), false), "/api/league").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["leagueInfo"]["season"], 2024);
    }

    #[tokio::test]
    async fn test_league_falls_back_to_fixtures() {
        let (status, body) =
            get(state(Some(FlakySource { failing: vec![2024] }), true), "/api/league?season=2024").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["source"], "fixture");
    }

    #[tokio::test]
    async fn test_league_failure_without_fallback_is_bad_gateway() {
        let (status, body) =
            get(state(Some(FlakySource { failing: vec![2024] }), false), "/api/league?season=2024").await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"], "Failed to fetch league data");
    }

    #[tokio::test]
    async fn test_unconfigured_league() {
        let (status, body) = get(state(None, false), "/api/league").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "League ID not configured");

        let (status, body) = get(state(None, true), "/api/league").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["source"], "fixture");
    }

    #[tokio::test]
    async fn test_invalid_action() {
        let (status, body) = post(state(None, true), serde_json::json!({ "action": "delete-league" })).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "Invalid action");
    }

    #[tokio::test]
    async fn test_connection_test_against_espn() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/seasons/2023/segments/0/leagues/777"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "seasonId": 2023,
                "settings": { "name": "Dynasty League", "size": 10 }
            })))
            .mount(&server)
            .await;

        let mut config = Config::default();
        config.espn.base_url = server.uri();
        let state = Arc::new(AppState::from_config(config).unwrap());

        let (status, body) = post(
            state,
            serde_json::json!({ "action": "test-connection", "season": 2023, "leagueId": 777 }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["leagueName"], "Dynasty League");
        assert_eq!(body["season"], 2023);
    }

    #[tokio::test]
    async fn test_history_skips_failed_seasons() {
        let source = FlakySource { failing: vec![2022] };
        let (status, body) = get(state(Some(source), false), "/api/league/history?from=2021&to=2023").await;

        assert_eq!(status, StatusCode::OK);
        let seasons: Vec<u64> = body["seasons"]
            .as_array()
            .unwrap()
            .iter()
            .map(|s| s["season"].as_u64().unwrap())
            .collect();
        assert_eq!(seasons, vec![2021, 2023]);
        assert_eq!(body["allTimeStats"].as_array().unwrap().len(), 10);
    }

    #[tokio::test]
    async fn test_history_rejects_reversed_range() {
        let (status, _) = get(state(None, true), "/api/league/history?from=2024&to=2020").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_history_with_no_seasons_is_bad_gateway() {
        let source = FlakySource { failing: vec![2020, 2021] };
        let (status, _) = get(state(Some(source), false), "/api/league/history?from=2020&to=2021").await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
    }

    #[tokio::test]
    async fn test_draft() {
        let (status, body) = get(state(None, true), "/api/league/draft?season=2022").await;
        assert_eq!(status, StatusCode::OK);
        let picks = body.as_array().unwrap();
        assert_eq!(picks.len(), 10);
        assert_eq!(picks[0]["season"], 2022);
    }
}
