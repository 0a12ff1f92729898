//! Configuration types mapping to the TOML schema.
//!
//! ```toml
//! [server]
//! bind = "127.0.0.1"
//! port = 8081
//!
//! [session]
//! max_session_age_secs = 600
//! cleanup_interval_secs = 60
//!
//! [logging]
//! level = "info"
//! json = true
//! ```

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Default values for every crate in the workspace.
///
/// The server and session crates build their own defaults from these.
pub mod defaults {
    use std::net::Ipv4Addr;

    pub const PORT: u16 = 8081;
    pub const BIND: Ipv4Addr = Ipv4Addr::LOCALHOST;
    pub const MAX_BODY_SIZE: usize = 1024 * 1024;
    pub const SHUTDOWN_TIMEOUT_SECS: u64 = 20;
    pub const MAX_SESSION_AGE_SECS: u64 = 600;
    pub const CLEANUP_INTERVAL_SECS: u64 = 60;
    pub const LOG_LEVEL: &str = "info";
}

// ─────────────────────────────────────────────────────────────────────────────
// Top-level Config
// ─────────────────────────────────────────────────────────────────────────────

/// Root configuration structure.
///
/// All sections are optional so that partial configs (e.g. project-local
/// overrides) can be loaded and merged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VeilConfig {
    /// HTTP server settings.
    pub server: Option<ServerConfig>,

    /// Session lifetime and sweeping.
    pub session: Option<SessionConfig>,

    /// Log output settings.
    pub logging: Option<LoggingConfig>,
}

impl VeilConfig {
    /// Create an empty config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Serialize to a TOML string.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Merge another config on top of this one (other takes priority).
    ///
    /// Merging is per section: a section present in `other` replaces the
    /// whole section here.
    pub fn merge(&mut self, other: VeilConfig) {
        if other.server.is_some() {
            self.server = other.server;
        }
        if other.session.is_some() {
            self.session = other.session;
        }
        if other.logging.is_some() {
            self.logging = other.logging;
        }
    }

    /// Server section, or defaults.
    pub fn server(&self) -> ServerConfig {
        self.server.clone().unwrap_or_default()
    }

    /// Session section, or defaults.
    pub fn session(&self) -> SessionConfig {
        self.session.clone().unwrap_or_default()
    }

    /// Logging section, or defaults.
    pub fn logging(&self) -> LoggingConfig {
        self.logging.clone().unwrap_or_default()
    }

    /// Check every section for values the service cannot run with.
    pub fn validate(&self) -> Result<()> {
        if let Some(ref session) = self.session {
            session.validate()?;
        }
        if let Some(ref server) = self.server {
            server.validate()?;
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Server Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Server configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Address to bind to.
    pub bind: String,
    /// Port to listen on.
    pub port: u16,
    /// Enable request logging.
    pub request_logging: bool,
    /// Maximum request body size in bytes.
    pub max_body_size: usize,
    /// Seconds to wait for in-flight requests during shutdown.
    pub shutdown_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: defaults::BIND.to_string(),
            port: defaults::PORT,
            request_logging: true,
            max_body_size: defaults::MAX_BODY_SIZE,
            shutdown_timeout_secs: defaults::SHUTDOWN_TIMEOUT_SECS,
        }
    }
}

impl ServerConfig {
    /// Graceful shutdown timeout as a duration.
    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout_secs)
    }

    fn validate(&self) -> Result<()> {
        if self.max_body_size == 0 {
            return Err(ConfigError::Invalid {
                field: "server.max_body_size".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Session Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Session lifetime configuration.
///
/// ```toml
/// [session]
/// max_session_age_secs = 600
/// cleanup_interval_secs = 60
/// cleanup_task = true
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Seconds a session stays valid after creation.
    pub max_session_age_secs: u64,
    /// Seconds between sweeps of expired sessions.
    pub cleanup_interval_secs: u64,
    /// Whether to run the background sweeper at all.
    pub cleanup_task: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_session_age_secs: defaults::MAX_SESSION_AGE_SECS,
            cleanup_interval_secs: defaults::CLEANUP_INTERVAL_SECS,
            cleanup_task: true,
        }
    }
}

impl SessionConfig {
    /// Session lifetime as a duration.
    pub fn max_session_age(&self) -> Duration {
        Duration::from_secs(self.max_session_age_secs)
    }

    /// Sweep interval as a duration.
    pub fn cleanup_interval(&self) -> Duration {
        Duration::from_secs(self.cleanup_interval_secs)
    }

    fn validate(&self) -> Result<()> {
        if self.max_session_age_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "session.max_session_age_secs".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.cleanup_interval_secs == 0 {
            return Err(ConfigError::Invalid {
                field: "session.cleanup_interval_secs".to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Logging Configuration
// ─────────────────────────────────────────────────────────────────────────────

/// Log output configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level directive (overridden by `RUST_LOG`).
    pub level: String,
    /// Emit console logs as JSON lines.
    pub json: bool,
    /// Directory for daily-rolling JSON log files. No file output if unset.
    pub dir: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::LOG_LEVEL.to_string(),
            json: false,
            dir: None,
        }
    }
}
