use analytics::StatsEngine;
use api_client::{EspnClient, FixtureSource, LeagueDataSource};
use api_client::error::ApiError;
use axum::{routing::get, Router};
use configuration::Config;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, Any, CorsLayer, ExposeHeaders},
    trace::TraceLayer,
};

pub mod error;
pub mod handlers;

/// The shared application state that all handlers can access.
pub struct AppState {
    pub config: Config,
    /// The live league. `None` when no league id is configured.
    pub source: Option<Arc<dyn LeagueDataSource>>,
    /// Served when the live league is missing or failing and fallback is enabled.
    pub fixtures: Arc<dyn LeagueDataSource>,
    pub engine: StatsEngine,
}

impl AppState {
    /// Builds the state with an ESPN client for the configured league.
    pub fn from_config(config: Config) -> Result<Self, ApiError> {
        let source: Option<Arc<dyn LeagueDataSource>> = if config.league.is_configured() {
            Some(Arc::new(EspnClient::new(&config.league, &config.espn)?))
        } else {
            tracing::warn!("No league id configured; only the fixture league can be served.");
            None
        };

        Ok(Self {
            config,
            source,
            fixtures: Arc::new(FixtureSource::new()),
            engine: StatsEngine::new(),
        })
    }
}

/// Assembles the router with all routes and middleware.
pub fn app(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::any())
        .allow_methods(Any)
        .allow_headers(AllowHeaders::any())
        .expose_headers(ExposeHeaders::any());

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .route("/api/league", get(handlers::get_league).post(handlers::post_league))
        .route("/api/league/history", get(handlers::get_history))
        .route("/api/league/draft", get(handlers::get_draft))
        .with_state(state)
        .layer(cors)
        // Logs every incoming request.
        .layer(TraceLayer::new_for_http())
}

/// The main function to configure and run the web server.
pub async fn run_server(config: Config) -> anyhow::Result<()> {
    // Tracing is initialized by the calling binary.
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let state = Arc::new(AppState::from_config(config)?);

    tracing::info!(
        league_id = state.config.league.id,
        season = state.config.league.season,
        fallback = state.config.server.fallback_to_fixtures,
        "Web server listening on http://{}",
        addr
    );

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app(state)).await?;

    Ok(())
}
