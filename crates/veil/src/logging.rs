//! Tracing setup: console output plus an optional rolling JSON file.

use anyhow::{Context as _, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{EnvFilter, fmt};
use veil_config::LoggingConfig;

use crate::commands::Context;

const CRATES: &[&str] = &["veil", "veil_server", "veil_session", "veil_config", "veil_cipher"];

/// Install the global subscriber.
///
/// `RUST_LOG` overrides the configured level for console output. The
/// returned guard flushes the file writer and must live until exit.
pub fn init(ctx: &Context, config: &LoggingConfig) -> Result<Option<WorkerGuard>> {
    let level = if ctx.verbose { "debug" } else { config.level.as_str() };
    let console_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(directives(level, ctx.verbose)))
        .with_context(|| format!("invalid log level '{}'", level))?;

    let console = if ctx.json_logs || config.json {
        fmt::layer()
            .json()
            .with_target(true)
            .with_filter(console_filter)
            .boxed()
    } else {
        fmt::layer()
            .with_target(true)
            .with_filter(console_filter)
            .boxed()
    };

    let (file, guard) = match &config.dir {
        Some(dir) => {
            let appender = RollingFileAppender::builder()
                .rotation(Rotation::DAILY)
                .filename_prefix("veil")
                .filename_suffix("log")
                .build(dir)
                .with_context(|| format!("cannot open log directory {}", dir.display()))?;
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .json()
                .with_writer(writer)
                .with_filter(EnvFilter::new(directives("debug", false)));
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(console)
        .with(file)
        .try_init()
        .context("failed to install tracing subscriber")?;

    Ok(guard)
}

/// Filter directives: `level` for our crates, `warn` for everything else.
fn directives(level: &str, include_http: bool) -> String {
    let mut parts: Vec<String> = CRATES
        .iter()
        .map(|krate| format!("{}={}", krate, level))
        .collect();
    if include_http {
        parts.push(format!("tower_http={}", level));
    }
    parts.push("warn".to_string());
    parts.join(",")
}
