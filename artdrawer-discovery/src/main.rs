//! artdrawer-discovery - Art discovery and collection microservice
//!
//! Serves the discovery pipeline (search + enrichment → artist profile) and the
//! drawer collection over HTTP for the browser front end.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use artdrawer_common::config::{
    default_config_path, load_toml_config, resolve_root_folder, write_toml_config, RootFolderInitializer,
};
use artdrawer_discovery::config::ProviderSettings;
use artdrawer_discovery::services::{GeminiClient, GoogleSearchClient, HttpDocumentStore, HttpImageFetcher};
use artdrawer_discovery::types::RemoteDocumentStore;
use artdrawer_discovery::{AppState, Providers};

/// Command-line arguments for artdrawer-discovery
#[derive(Parser, Debug)]
#[command(name = "artdrawer-discovery")]
#[command(about = "Art discovery and collection microservice")]
#[command(version)]
struct Args {
    /// Port to listen on (default: TOML `port`, then 5790)
    #[arg(short, long, env = "ARTDRAWER_PORT")]
    port: Option<u16>,

    /// Root folder holding the local database
    #[arg(short, long)]
    root_folder: Option<PathBuf>,

    /// Path to artdrawer.toml
    #[arg(short, long, env = "ARTDRAWER_CONFIG")]
    config: Option<PathBuf>,

    /// Start with network-dependent features disabled
    #[arg(long)]
    offline: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config_path = args.config.clone().unwrap_or_else(default_config_path);
    let toml_config = load_toml_config(&config_path)
        .with_context(|| format!("Failed to load config {}", config_path.display()))?;

    // RUST_LOG wins over the TOML level
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("{},tower_http=info", toml_config.logging.level).into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting artdrawer-discovery microservice");
    info!("Version: {}", env!("CARGO_PKG_VERSION"));
    info!("Config: {}", config_path.display());

    // First run: leave a starter config next to the defaults (best-effort)
    if !config_path.exists() {
        match write_toml_config(&toml_config, &config_path) {
            Ok(()) => info!("Wrote default config to {}", config_path.display()),
            Err(e) => warn!("Could not write default config: {}", e),
        }
    }

    let root_folder = resolve_root_folder(args.root_folder.as_deref(), &toml_config);
    let initializer = RootFolderInitializer::new(root_folder);
    initializer
        .ensure_directory_exists()
        .context("Failed to initialize root folder")?;

    let db_path = initializer.database_path();
    info!("Database: {}", db_path.display());
    let db_pool = artdrawer_discovery::db::init_database_pool(&db_path)
        .await
        .context("Failed to open database")?;

    let settings = ProviderSettings::resolve(&toml_config);
    let providers = build_providers(&settings)?;

    let state = AppState::new(db_pool, providers, !args.offline)
        .await
        .context("Failed to load collection store")?;
    if args.offline {
        warn!("Starting offline: search, chat and daily recommendation are disabled");
    }

    let app = artdrawer_discovery::build_router(state);

    let port = args.port.unwrap_or_else(|| toml_config.port());
    let addr = SocketAddr::from(([127, 0, 0, 1], port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("Listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shutdown complete");
    Ok(())
}

fn build_providers(settings: &ProviderSettings) -> Result<Providers> {
    let search = GoogleSearchClient::new(settings.search_api_key.clone(), settings.search_engine_id.clone())
        .context("Failed to build search client")?;

    let enrichment = GeminiClient::new(
        settings.gemini_api_key.clone(),
        settings.profile_model.clone(),
        settings.chat_model.clone(),
    )
    .context("Failed to build enrichment client")?;

    let images = HttpImageFetcher::new().context("Failed to build image fetcher")?;

    let remote: Option<Arc<dyn RemoteDocumentStore>> = match &settings.remote {
        Some((base_url, api_key)) => {
            info!("Remote document store: {}", base_url);
            let store = HttpDocumentStore::new(base_url.clone(), api_key.clone())
                .context("Failed to build remote store client")?;
            Some(Arc::new(store))
        }
        None => {
            info!("No remote document store configured; collection stays local");
            None
        }
    };

    Ok(Providers {
        search: Arc::new(search),
        enrichment: Arc::new(enrichment),
        images: Arc::new(images),
        remote,
    })
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                warn!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down");
        },
        _ = terminate => {
            info!("Received terminate signal, shutting down");
        },
    }
}
