use analytics::{rank_standings, StatsEngine};
use api_client::{EspnClient, FixtureSource, LeagueDataSource};
use clap::{Parser, Subcommand};
use configuration::Config;
use core_types::SeasonData;
use futures::future::join_all;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::sync::Arc;

mod logging;
mod tables;

/// The main entry point for the Gridiron league dashboard.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command-line arguments
    let cli = Cli::parse();
    let _guard = logging::setup_logging(&cli.log_dir)?;

    let mut config = configuration::load_config_from(&cli.config)?;

    // Execute the appropriate command
    match cli.command {
        Commands::Serve(args) => {
            if let Some(host) = args.host {
                config.server.host = host;
            }
            if let Some(port) = args.port {
                config.server.port = port;
            }
            web_server::run_server(config).await
        }
        Commands::Standings(args) => handle_standings(args, config).await,
        Commands::History(args) => handle_history(args, config).await,
    }
}

// ==============================================================================
// CLI Structure
// ==============================================================================

/// Standings, rivalries and all-time records for an ESPN fantasy football league.
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(long, global = true, default_value = "config.toml")]
    config: PathBuf,

    /// Directory for the daily rolling log file.
    #[arg(long, global = true, default_value = "logs")]
    log_dir: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API server.
    Serve(ServeArgs),
    /// Print the ranked standings of one season.
    Standings(StandingsArgs),
    /// Fetch a range of seasons and print all-time records.
    History(HistoryArgs),
}

#[derive(Parser)]
struct ServeArgs {
    /// Overrides `server.host`.
    #[arg(long)]
    host: Option<String>,

    /// Overrides `server.port`.
    #[arg(long)]
    port: Option<u16>,
}

#[derive(Parser)]
struct StandingsArgs {
    /// The season to show. Defaults to `league.season`.
    #[arg(long)]
    season: Option<u16>,

    /// Use the built-in fixture league instead of ESPN.
    #[arg(long)]
    fixtures: bool,
}

#[derive(Parser)]
struct HistoryArgs {
    /// The first season (e.g., 2018).
    #[arg(long)]
    from: u16,

    /// The last season, inclusive.
    #[arg(long)]
    to: u16,

    /// Use the built-in fixture league instead of ESPN.
    #[arg(long)]
    fixtures: bool,
}

// ==============================================================================
// Command Logic
// ==============================================================================

fn data_source(config: &Config, fixtures: bool) -> anyhow::Result<Arc<dyn LeagueDataSource>> {
    if fixtures {
        return Ok(Arc::new(FixtureSource::new()));
    }
    if !config.league.is_configured() {
        anyhow::bail!("League ID not configured. Set LEAGUE_ID or [league] id, or pass --fixtures.");
    }
    Ok(Arc::new(EspnClient::new(&config.league, &config.espn)?))
}

/// Fetches one season and prints its standings and records.
async fn handle_standings(args: StandingsArgs, config: Config) -> anyhow::Result<()> {
    let season = args.season.unwrap_or(config.league.season);
    let source = data_source(&config, args.fixtures)?;

    tracing::info!(season, fixtures = args.fixtures, "Fetching season.");
    let data = source.fetch_season(season).await?;
    let report = StatsEngine::new().report(&data);
    let rows = rank_standings(&data.teams, &report.league_stats);

    println!("{} ({})", data.league_info.name, season);
    println!("{}", tables::standings_table(&rows));
    if let Some(summary) = &report.season_summary {
        println!("{}", tables::seasons_table(std::slice::from_ref(summary)));
    }
    println!("{}", tables::records_table(&report.records));

    Ok(())
}

/// Fetches every season in the range concurrently and prints all-time statistics.
async fn handle_history(args: HistoryArgs, config: Config) -> anyhow::Result<()> {
    if args.from > args.to {
        anyhow::bail!("--from ({}) must not be after --to ({})", args.from, args.to);
    }
    let source = data_source(&config, args.fixtures)?;
    let seasons: Vec<u16> = (args.from..=args.to).collect();

    // Set up the progress bar
    let progress_bar = ProgressBar::new(seasons.len() as u64);
    progress_bar.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta}) {msg}")?
            .progress_chars("#>-"),
    );

    // Create concurrent fetches for each season
    let tasks = seasons.iter().map(|&season| {
        let source = Arc::clone(&source);
        let pb = progress_bar.clone();
        async move {
            pb.set_message(format!("Fetching {season}..."));
            let result = source.fetch_season(season).await;
            pb.inc(1);
            (season, result)
        }
    });
    let results = join_all(tasks).await;
    progress_bar.finish_with_message("Fetch complete!");

    let mut fetched: Vec<SeasonData> = Vec::new();
    for (season, result) in results {
        match result {
            Ok(data) => fetched.push(data),
            Err(e) => tracing::warn!(season, error = %e, "Skipping season."),
        }
    }
    if fetched.is_empty() {
        anyhow::bail!("No season between {} and {} could be fetched.", args.from, args.to);
    }

    let history = StatsEngine::new().history(&fetched);

    println!("{}", tables::seasons_table(&history.seasons));
    println!(
        "{}",
        tables::standings_table(&rank_standings(&history.teams, &history.all_time_stats))
    );
    println!("{}", tables::records_table(&history.records));

    Ok(())
}
