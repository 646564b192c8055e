use crate::error::ConfigError;
use config::builder::DefaultState;
use config::{ConfigBuilder, Environment};
use std::env;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{
    season_for_date, Config, EspnConfig, LeagueConfig, ServerConfig, DEFAULT_ESPN_BASE_URL,
};

/// Loads the application configuration from `config.toml` and the environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(Path::new("config.toml"))
}

/// Loads the application configuration, layering sources from lowest to highest priority:
///
/// 1. the TOML file at `path` (optional),
/// 2. `GRIDIRON__<SECTION>__<KEY>` environment variables,
/// 3. the `LEAGUE_ID`, `SEASON`, `ESPN_S2` and `SWID` variables, also read from `.env`.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    // A missing .env file is normal outside local development.
    dotenvy::dotenv().ok();

    let builder = config::Config::builder()
        .add_source(config::File::from(path).required(false))
        .add_source(
            Environment::with_prefix("GRIDIRON")
                .separator("__")
                .try_parsing(true),
        );

    let config = finish(with_league_env(builder)?)?;
    tracing::debug!(
        league_id = config.league.id,
        season = config.league.season,
        authenticated = config.league.credentials().is_some(),
        "Configuration loaded."
    );
    Ok(config)
}

fn with_league_env(
    builder: ConfigBuilder<DefaultState>,
) -> Result<ConfigBuilder<DefaultState>, ConfigError> {
    Ok(builder
        .set_override_option("league.id", env::var("LEAGUE_ID").ok())?
        .set_override_option("league.season", env::var("SEASON").ok())?
        .set_override_option("league.espn_s2", env::var("ESPN_S2").ok())?
        .set_override_option("league.swid", env::var("SWID").ok())?)
}

fn finish(builder: ConfigBuilder<DefaultState>) -> Result<Config, ConfigError> {
    let config = builder.build()?.try_deserialize::<Config>()?;
    config.validate()?;
    Ok(config)
}
