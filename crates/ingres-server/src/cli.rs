//! Command-line interface.

use clap::Parser;
use ingres_core::{IngresConfig, Result};
use std::path::{Path, PathBuf};

/// Environment variable overriding the listen address.
pub const ENV_SERVER_ADDR: &str = "INGRES_SERVER_ADDR";

/// Command-line arguments of `ingres-server`.
#[derive(Debug, Parser)]
#[command(name = "ingres-server")]
#[command(about = "Conversational assistant for groundwater assessment data", long_about = None)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Address to listen on (overrides config)
    #[arg(long, env = ENV_SERVER_ADDR)]
    pub addr: Option<String>,

    /// Answer with the rule-based classifier only
    #[arg(long)]
    pub no_upstream: bool,

    /// Write the effective config to this path and exit
    #[arg(long, value_name = "PATH")]
    pub write_config: Option<PathBuf>,
}

impl Cli {
    /// Listen address: the flag or environment first, then the config file.
    pub fn listen_addr(&self, config: &IngresConfig) -> String {
        self.addr
            .as_deref()
            .map(str::trim)
            .filter(|addr| !addr.is_empty())
            .map_or_else(|| config.server.addr.clone(), str::to_owned)
    }

    /// Writes `config` to the `--write-config` path, returning that path if one was given.
    ///
    /// # Errors
    ///
    /// Returns an error if the config cannot be serialized or the file cannot be written.
    pub fn export_config(&self, config: &IngresConfig) -> Result<Option<&Path>> {
        let Some(path) = self.write_config.as_deref() else {
            return Ok(None);
        };
        config.save_to_file(path)?;
        Ok(Some(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["ingres-server"]).expect("parses");
        assert!(cli.config.is_none());
        assert!(!cli.no_upstream);
        assert!(cli.write_config.is_none());
    }

    #[test]
    fn test_flags() {
        let cli = Cli::try_parse_from([
            "ingres-server",
            "--config",
            "ingres.toml",
            "--addr",
            "0.0.0.0:8080",
            "--no-upstream",
            "--write-config",
            "effective.toml",
        ])
        .expect("parses");
        assert_eq!(cli.config, Some(PathBuf::from("ingres.toml")));
        assert!(cli.no_upstream);
        assert_eq!(cli.write_config, Some(PathBuf::from("effective.toml")));
        assert_eq!(cli.listen_addr(&IngresConfig::default()), "0.0.0.0:8080");
    }

    #[test]
    fn test_addr_falls_back_to_config() {
        let cli = Cli {
            config: None,
            addr: None,
            no_upstream: false,
            write_config: None,
        };
        let mut config = IngresConfig::default();
        config.server.addr = "127.0.0.1:9999".to_owned();
        assert_eq!(cli.listen_addr(&config), "127.0.0.1:9999");
        assert!(cli.export_config(&config).expect("nothing to write").is_none());
    }

    #[test]
    fn test_export_config_writes_loadable_file() {
        let dir = tempfile::tempdir().expect("temp dir");
        let path = dir.path().join("effective.toml");
        let cli = Cli::try_parse_from(["ingres-server", "--write-config", &path.to_string_lossy()])
            .expect("parses");

        let mut config = IngresConfig::default();
        config.sessions.max_sessions = 7;
        assert_eq!(
            cli.export_config(&config).expect("written"),
            Some(path.as_path())
        );

        let loaded = IngresConfig::load(Some(&path)).expect("loads");
        assert_eq!(loaded.sessions.max_sessions, 7);
    }
}
