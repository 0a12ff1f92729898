//! Config command - inspect and initialise configuration files.

use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::{Args, Subcommand};
use veil_config::VeilConfig;

use super::Context;

/// Project-local config filename.
const LOCAL_CONFIG_FILE: &str = "veil.toml";

/// Arguments for the config command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print the effective configuration as TOML
    Show,

    /// Show which config files are checked and which were loaded
    Which,

    /// Write a config file populated with defaults
    Init {
        /// Create project-local config (./veil.toml) instead of user config
        #[arg(long)]
        local: bool,
    },

    /// Show the user configuration file path
    Path,
}

/// Run the config command.
pub fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => cmd_show(ctx),
        ConfigCommand::Which => cmd_which(),
        ConfigCommand::Init { local } => cmd_init(local),
        ConfigCommand::Path => cmd_path(),
    }
}

fn cmd_show(ctx: &Context) -> Result<()> {
    let loaded = veil_config::load_config(None)?;

    for warning in &loaded.warnings {
        eprintln!("warning: {}", warning);
    }
    if ctx.verbose {
        for source in loaded.loaded_from() {
            eprintln!("# loaded {}", source.display());
        }
    }

    print!("{}", effective(&loaded.config).to_toml()?);
    Ok(())
}

fn cmd_which() -> Result<()> {
    let loaded = veil_config::load_config(None)?;

    println!("Config files (lowest precedence first):");
    for source in &loaded.sources {
        let mark = if source.loaded { "loaded" } else { "not found" };
        println!("  {:<10} {}", mark, source.path.display());
    }
    for warning in &loaded.warnings {
        println!("warning: {}", warning);
    }
    Ok(())
}

fn cmd_init(local: bool) -> Result<()> {
    let path = if local {
        PathBuf::from(LOCAL_CONFIG_FILE)
    } else {
        veil_config::xdg_config_path()
            .ok_or_else(|| anyhow!("Could not determine config directory"))?
    };

    if path.exists() {
        println!("Config file already exists: {}", path.display());
        return Ok(());
    }

    veil_config::save_config(&effective(&VeilConfig::default()), &path)?;
    println!("Wrote {}", path.display());
    Ok(())
}

fn cmd_path() -> Result<()> {
    match veil_config::xdg_config_path() {
        Some(path) => println!("{}", path.display()),
        None => eprintln!("Could not determine config directory"),
    }
    Ok(())
}

/// Fill every section so the printed or written TOML is complete.
fn effective(config: &VeilConfig) -> VeilConfig {
    VeilConfig {
        server: Some(config.server()),
        session: Some(config.session()),
        logging: Some(config.logging()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use veil_config::{LoggingConfig, SessionConfig};

    #[test]
    fn test_effective_fills_sections() {
        let config = VeilConfig::from_toml(
            r#"
[server]
port = 9999
"#,
        )
        .unwrap();

        let full = effective(&config);
        assert_eq!(full.server.as_ref().unwrap().port, 9999);
        assert_eq!(full.session, Some(SessionConfig::default()));
        assert_eq!(full.logging, Some(LoggingConfig::default()));

        let text = full.to_toml().unwrap();
        assert!(text.contains("[session]"));
        assert!(text.contains("max_session_age_secs = 600"));
    }
}
