use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use autostream_core::{load_config, validate_config, CinemetaClient, Config, TitleResolver};
use autostream_server::{api::create_router, state::AppState};

const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[tokio::main]
async fn main() {
    init_tracing();

    if let Err(e) = run().await {
        error!("Fatal error: {:#}", e);
        std::process::exit(1);
    }
}

/// `RUST_LOG` filters (default `info,tower_http=debug`); set
/// `AUTOSTREAM_LOG_FORMAT=json` for one JSON object per line.
fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| "info,tower_http=debug".into());
    let json = std::env::var("AUTOSTREAM_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

fn load_service_config() -> Result<Config> {
    let path = std::env::var_os("AUTOSTREAM_CONFIG")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

    info!(path = %path.display(), "Loading configuration");
    let config = load_config(&path)
        .with_context(|| format!("Failed to load config from {}", path.display()))?;
    validate_config(&config).context("Invalid configuration")?;

    let selection = &config.selection;
    info!(
        prefer_lower = selection.prefer_lower_if_much_faster,
        ratio_need = selection.ratio_need,
        delta_need = selection.delta_need,
        rule = %selection.rule,
        two_outputs = selection.two_outputs,
        "Selection defaults"
    );
    Ok(config)
}

async fn run() -> Result<()> {
    let config = load_service_config()?;

    let resolver: Arc<dyn TitleResolver> = Arc::new(
        CinemetaClient::new(config.cinemeta.clone()).context("Failed to create Cinemeta client")?,
    );
    info!(
        resolver = resolver.name(),
        base_url = %config.cinemeta.base_url,
        timeout_secs = config.cinemeta.timeout_secs,
        "Title resolver ready"
    );

    let addr = SocketAddr::new(config.server.host, config.server.port);
    let app = create_router(Arc::new(AppState::new(config, resolver)));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind to {}", addr))?;
    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Server shut down");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM. A handler that cannot be installed
/// never resolves, leaving the other one in charge.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
