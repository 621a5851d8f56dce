use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use cup_dashboard::api::state::AppState;
use cup_dashboard::calculate::{discipline, head_to_head, top_scorers, Scope};
use cup_dashboard::config::AppConfig;
use cup_dashboard::lookup::ReferenceLookups;
use cup_dashboard::models::CardType;
use cup_dashboard::storage::{load_dataset, StorageConfig};
use cup_dashboard::store::ReferenceStore;

#[derive(Parser)]
#[command(name = "cup-dashboard")]
#[command(about = "Interactive World Cup history dashboard")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "./config.toml")]
    config: PathBuf,

    /// Data directory holding the World Cup CSV files (overrides config)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,

    /// Output logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the API server
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on
        #[arg(long)]
        port: Option<u16>,
    },

    /// Print dataset counts and integrity exclusions
    Summary,

    /// Print a leaderboard as JSON
    Leaderboard {
        /// Restrict to one tournament year
        #[arg(long)]
        year: Option<u16>,

        /// Rank by cards (yellow or red) instead of goals
        #[arg(long)]
        card: Option<CardType>,
    },

    /// Print the all-time head-to-head record of two teams as JSON
    HeadToHead { team1: String, team2: String },
}

fn load_store(config: &AppConfig) -> Result<ReferenceStore> {
    let storage = StorageConfig::new(config.data_dir.clone());
    let dataset = load_dataset(&storage)
        .with_context(|| format!("loading data from {}", config.data_dir.display()))?;
    let lookups = ReferenceLookups::builtin(&config.dashboard.flag_cdn_base);
    Ok(ReferenceStore::build(dataset, lookups))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = AppConfig::load_or_default(&cli.config)?;
    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }

    // Initialize tracing
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level));
    let registry = tracing_subscriber::registry().with(filter);
    if cli.json_logs {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }

    tracing::info!("Starting cup-dashboard v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            config.validate()?;

            let store = Arc::new(load_store(&config)?);
            let addr = format!("{}:{}", config.server.host, config.server.port);
            let state = AppState::new(store, config);

            let sessions = state.sessions.clone();
            tokio::spawn(async move {
                let mut ticker = tokio::time::interval(Duration::from_secs(60));
                loop {
                    ticker.tick().await;
                    let pruned = sessions.prune_idle().await;
                    if pruned > 0 {
                        tracing::info!("Pruned {} idle sessions", pruned);
                    }
                }
            });

            let app = cup_dashboard::api::build_router(state);
            let listener = tokio::net::TcpListener::bind(&addr).await?;
            tracing::info!("Dashboard: http://{}", addr);
            axum::serve(listener, app).await?;
        }
        Commands::Summary => {
            let store = load_store(&config)?;
            let integrity = store.integrity();
            let years = store.years_desc();

            println!("\n=== Dataset Summary ===");
            println!("Tournaments:        {}", years.len());
            if let (Some(first), Some(last)) = (years.last(), years.first()) {
                println!("Years:              {}-{}", first, last);
            }
            println!("Matches:            {}", store.matches().len());
            println!("Player rows:        {}", store.player_events().len());
            println!("Teams:              {}", store.all_teams().len());
            println!("\n=== Excluded ===");
            println!("Orphaned matches:   {}", integrity.orphaned_matches);
            println!("Unresolved players: {}", integrity.unresolved_player_events);
        }
        Commands::Leaderboard { year, card } => {
            let store = load_store(&config)?;
            if let Some(y) = year {
                if store.tournament(y).is_none() {
                    bail!("No World Cup in {}", y);
                }
            }
            let scope = Scope::from_year(year);
            let size = config.dashboard.leaderboard_size;
            let board = match card {
                Some(card) => discipline(&store, scope, card, size),
                None => top_scorers(&store, scope, size),
            };
            println!("{}", serde_json::to_string_pretty(&board)?);
        }
        Commands::HeadToHead { team1, team2 } => {
            let store = load_store(&config)?;
            for team in [&team1, &team2] {
                if !store.all_teams().contains(team) {
                    bail!("Unknown team '{}'", team);
                }
            }
            let h2h = head_to_head(&store, &team1, &team2);
            println!("{}", serde_json::to_string_pretty(&h2h)?);
        }
    }

    Ok(())
}
