//! Loomi - mood playlists from a handful of liked songs
//!
//! Serves the playlist generator, catalog search, the playlist cart and
//! saved playlists over a small JSON API.

mod api;
mod config;
mod core;
mod db;
mod error;
mod models;
mod plugins;
mod stores;
mod utils;

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tracing::{info, warn};

/// Loomi - mood playlist generator
#[derive(Parser, Debug)]
#[command(name = "loomi")]
#[command(version)]
#[command(about = "Mood-based playlist generation from a handful of liked songs")]
struct Args {
    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Port to listen on
    #[arg(long, default_value_t = 8787)]
    port: u16,

    /// Enable debug mode
    #[arg(long)]
    debug: bool,

    /// Path to config directory
    #[arg(long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // RUST_LOG wins over --debug
    let log_level = if args.debug { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        tracing_subscriber::EnvFilter::new(format!(
            "{},sqlx=warn,actix_server=warn,hyper=warn,reqwest=warn",
            log_level
        ))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .init();

    info!("Loomi v{} starting...", env!("CARGO_PKG_VERSION"));

    let paths = config::Paths::init(args.config)?;
    info!("Config directory: {:?}", paths.config_dir());

    start_loomi(args.host, args.port, paths.carts_dir()).await
}

async fn start_loomi(host: String, port: u16, carts_dir: PathBuf) -> Result<()> {
    let config = run_setup().await?;

    let pool = db::DbEngine::get()?.pool().clone();
    let state = api::AppState::from_config(pool, &config, Some(carts_dir))?;
    info!("Playlist generator: {}", state.generator.backend_name());
    if !config.spotify.has_credentials() {
        warn!("Spotify credentials not set; enriched tracks will be placeholders");
    }

    let state = actix_web::web::Data::new(state);

    let addr = format!("{}:{}", host, port);
    info!("Server listening on http://{}", addr);

    use actix_web::{middleware, App, HttpServer};

    HttpServer::new(move || {
        App::new()
            .wrap(api::cors())
            .wrap(middleware::Logger::default())
            .wrap(middleware::Compress::default())
            .app_data(state.clone())
            .configure(api::configure)
    })
    .bind(addr)?
    .run()
    .await?;

    Ok(())
}

async fn run_setup() -> Result<config::UserConfig> {
    use crate::config::UserConfig;
    use crate::db::{run_migrations, setup_sqlite, DbEngine};

    let mut config = UserConfig::load()?;

    // Generate server ID if missing
    if config.server_id.is_empty() {
        config.server_id = uuid::Uuid::new_v4().to_string();
        config.save()?;
    }

    setup_sqlite().await?;
    run_migrations(DbEngine::get()?.pool()).await?;

    Ok(config)
}
