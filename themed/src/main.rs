//! Themed - Theme storage REST daemon

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use tokio::net::TcpListener;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, reload, util::SubscriberInitExt, EnvFilter};

use brand_theme::icons::{IconContext, IconLoader};
use themed::config::PORT_ENV;
use themed::{router, AppState, ThemeStore, ThemedConfig};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Themed - Theme storage REST daemon
#[derive(Parser, Debug)]
#[command(name = "themed", version, about)]
struct Args {
    /// Configuration file path
    #[arg(short, long, default_value = "/etc/themed/themed.toml")]
    config: PathBuf,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Create the schema and seed sample themes into an empty database
    InitDb,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging; the configured level replaces this one after load
    let initial_level = if args.debug { "debug" } else { "info" };
    let (filter, filter_handle) = reload::Layer::new(EnvFilter::new(initial_level));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer())
        .init();

    info!("Themed v{} starting", VERSION);

    let config = match load_config(&args.config) {
        Ok(config) => config,
        Err(e) => {
            error!("{:#}", e);
            return Err(e);
        }
    };
    info!("Configuration loaded from {:?}", args.config);

    if !args.debug {
        if let Err(e) = filter_handle.reload(EnvFilter::new(&config.daemon.log_level)) {
            warn!("Failed to apply log level {:?}: {}", config.daemon.log_level, e);
        }
    }

    match args.command.unwrap_or(Command::Serve) {
        Command::Serve => serve(config).await,
        Command::InitDb => init_db(&config),
    }
}

fn load_config(path: &Path) -> Result<ThemedConfig> {
    let mut config = ThemedConfig::load(path)
        .with_context(|| format!("Failed to load configuration from {:?}", path))?;
    config.apply_port_override(std::env::var(PORT_ENV).ok().as_deref())?;
    Ok(config)
}

fn init_db(config: &ThemedConfig) -> Result<()> {
    info!("Initializing database at {:?}", config.database.path);
    let store = ThemeStore::open(&config.database.path)?;
    if !store.seed_defaults()? {
        warn!("Database already holds {} themes", store.count()?);
    }
    info!("Database initialization complete");
    Ok(())
}

async fn serve(config: ThemedConfig) -> Result<()> {
    let store = ThemeStore::open(&config.database.path)
        .with_context(|| format!("Failed to open database {:?}", config.database.path))?;

    let icons = IconContext::new(IconLoader::with_builtins(config.icons.loader_config()));
    icons.mount();

    let app = router(AppState::new(store, icons), &config.server.cors_origins);

    let address = config.server.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;

    info!("Server running on http://{}", address);
    info!("API available at http://{}/api/v1/themes", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Themed stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}
