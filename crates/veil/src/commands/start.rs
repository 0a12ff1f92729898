//! Start command - runs the HTTP server until interrupted.

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context as _, Result};
use clap::Args;
use tracing::{info, warn};
use veil_config::{ConfigSource, LoadedConfig, VeilConfig};
use veil_server::{Server, ServerConfig};
use veil_session::{InMemoryStore, StoreConfig};

use super::Context;
use crate::logging;

/// Arguments for the start command.
#[derive(Args, Debug, Default)]
pub struct StartArgs {
    /// Config file to use instead of discovery
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Address to bind to (overrides config)
    #[arg(short, long)]
    pub bind: Option<String>,

    /// Port to listen on (overrides config)
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Session lifetime in seconds (overrides config)
    #[arg(long, value_name = "SECS")]
    pub max_session_age: Option<u64>,

    /// Seconds between sweeps of expired sessions (overrides config)
    #[arg(long, value_name = "SECS")]
    pub cleanup_interval: Option<u64>,
}

/// Run the start command.
pub async fn run(args: StartArgs, ctx: &Context) -> Result<()> {
    // ── Load configuration ──────────────────────────────────────────────

    let loaded = match args.config {
        Some(ref path) => {
            let config = veil_config::load_config_file(path)?;
            LoadedConfig {
                config,
                sources: vec![ConfigSource {
                    path: path.clone(),
                    loaded: true,
                }],
                warnings: Vec::new(),
            }
        }
        None => veil_config::load_config(None)?,
    };

    let mut config = loaded.config.clone();
    apply_overrides(&mut config, &args);
    config.validate()?;

    let _log_guard = logging::init(ctx, &config.logging())?;

    for warning in &loaded.warnings {
        warn!("{}", warning);
    }
    for source in loaded.loaded_from() {
        info!(path = %source.display(), "Loaded config");
    }

    // ── Build components ────────────────────────────────────────────────

    let server_section = config.server();
    let session_section = config.session();

    let ip: IpAddr = server_section
        .bind
        .parse()
        .with_context(|| format!("invalid bind address '{}'", server_section.bind))?;
    let addr = SocketAddr::new(ip, server_section.port);

    let store = Arc::new(InMemoryStore::new(
        StoreConfig::new()
            .with_max_session_age(session_section.max_session_age())
            .with_cleanup_task(session_section.cleanup_task)
            .with_cleanup_interval(session_section.cleanup_interval()),
    ));

    let server_config = ServerConfig::new()
        .with_bind_address(addr)
        .with_request_logging(server_section.request_logging)
        .with_max_body_size(server_section.max_body_size)
        .with_shutdown_timeout(server_section.shutdown_timeout());

    info!(
        addr = %addr,
        max_session_age_secs = session_section.max_session_age_secs,
        cleanup_interval_secs = session_section.cleanup_interval_secs,
        cleanup_task = session_section.cleanup_task,
        "Starting veil"
    );

    // ── Serve, then tear down the store ─────────────────────────────────

    let result = Server::new(store.clone(), server_config)
        .run_with_shutdown(shutdown_signal())
        .await;

    store.close().await;
    result?;

    info!("Shutdown complete");
    Ok(())
}

/// Fold CLI flags into the loaded config; flags win.
fn apply_overrides(config: &mut VeilConfig, args: &StartArgs) {
    if args.bind.is_some() || args.port.is_some() {
        let mut server = config.server();
        if let Some(ref bind) = args.bind {
            server.bind = bind.clone();
        }
        if let Some(port) = args.port {
            server.port = port;
        }
        config.server = Some(server);
    }

    if args.max_session_age.is_some() || args.cleanup_interval.is_some() {
        let mut session = config.session();
        if let Some(secs) = args.max_session_age {
            session.max_session_age_secs = secs;
        }
        if let Some(secs) = args.cleanup_interval {
            session.cleanup_interval_secs = secs;
        }
        config.session = Some(session);
    }
}

/// Resolve on SIGINT or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for SIGINT");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT, shutting down"),
        _ = terminate => info!("Received SIGTERM, shutting down"),
    }
}
