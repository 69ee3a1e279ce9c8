pub mod toml_config;

pub use toml_config::TomlConfig;

#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::Validate;
#[cfg(feature = "cli")]
use clap::Parser;
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "wedding-market")]
#[command(about = "Wedding vendor marketplace backend")]
pub struct CliConfig {
    #[arg(long, help = "Path to a TOML configuration file")]
    pub config: Option<PathBuf>,

    #[arg(long, help = "Interface to bind (default 0.0.0.0)")]
    pub host: Option<String>,

    #[arg(long, help = "Port to listen on (default 8080)")]
    pub port: Option<u16>,

    #[arg(long, help = "Directory holding the JSON collections (default ./data)")]
    pub data_dir: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Emit logs as JSON lines")]
    pub json_logs: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Loads the TOML file when given, then lets flags override it.
    pub fn resolve(&self) -> Result<TomlConfig> {
        let mut config = match &self.config {
            Some(path) => TomlConfig::from_file(path)?,
            None => TomlConfig::default(),
        };
        self.apply_overrides(&mut config);
        config.validate()?;
        Ok(config)
    }

    pub fn apply_overrides(&self, config: &mut TomlConfig) {
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(data_dir) = &self.data_dir {
            config.storage.data_dir = data_dir.clone();
        }
        if self.json_logs {
            config.logging.get_or_insert_with(Default::default).json = true;
        }
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_flags_override_file() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"[server]\nport = 9000\nhost = \"127.0.0.1\"\n[storage]\ndata_dir = \"./from-file\"\n")
            .unwrap();

        let cli = CliConfig::parse_from([
            "wedding-market",
            "--config",
            file.path().to_str().unwrap(),
            "--port",
            "9100",
            "--json-logs",
        ]);
        let config = cli.resolve().unwrap();
        assert_eq!(config.server.port, 9100);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.storage.data_dir, "./from-file");
        assert!(config.json_logs());
    }

    #[test]
    fn test_defaults_without_file() {
        let config = CliConfig::parse_from(["wedding-market", "--data-dir", "/srv/data"])
            .resolve()
            .unwrap();
        assert_eq!(config.server.port, toml_config::DEFAULT_PORT);
        assert_eq!(config.storage.data_dir, "/srv/data");
    }

    #[test]
    fn test_missing_config_file() {
        let cli = CliConfig {
            config: Some(PathBuf::from("/definitely/not/here.toml")),
            ..Default::default()
        };
        assert!(matches!(
            cli.resolve(),
            Err(crate::utils::error::MarketError::IoError(_))
        ));
    }
}
