use std::path::Path;

use anyhow::{Context, Result};
use directory::config::DirectoryConfig;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Yaml};
use serde::{Deserialize, Serialize};

/// Environment prefix; nested keys are separated by `__`,
/// e.g. `DIRECTORY__SERVER__BIND_ADDR`.
pub const ENV_PREFIX: &str = "DIRECTORY__";

/// Server configuration.
///
/// Layered as defaults, then the optional YAML file, then the environment.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub directory: DirectoryConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct ServerConfig {
    pub bind_addr: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_owned(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct DatabaseConfig {
    /// `SeaORM` connection URL
    pub url: String,
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://directory.db?mode=rwc".to_owned(),
            max_connections: 5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct LoggingConfig {
    /// Default filter directive; `RUST_LOG` overrides it
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: LogFormat::Text,
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults, an optional YAML file and the
    /// environment, in increasing priority.
    ///
    /// # Errors
    /// Returns an error if the file is missing or any layer fails to parse.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(path) = path {
            if !path.exists() {
                anyhow::bail!("config file not found: {}", path.display());
            }
            figment = figment.merge(Yaml::file(path));
        }
        figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context("failed to load configuration")
    }

    /// Apply command line overrides on top of the loaded layers.
    #[must_use]
    pub fn with_overrides(mut self, database_url: Option<String>, bind: Option<String>) -> Self {
        if let Some(url) = database_url {
            self.database.url = url;
        }
        if let Some(bind) = bind {
            self.server.bind_addr = bind;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn yaml_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.server.bind_addr, "0.0.0.0:8080");
        assert_eq!(cfg.logging.format, LogFormat::Text);
        assert_eq!(cfg.directory.api_version, "1.0.0");
    }

    #[test]
    fn test_yaml_layer_overrides_defaults() {
        let file = yaml_file(
            "server:\n  bind_addr: 127.0.0.1:9000\n\
             logging:\n  format: json\n\
             directory:\n  api_version: 2.0.0\n  cors:\n    allowed_origins: [\"https://console.example\"]\n",
        );

        let cfg = AppConfig::load(Some(file.path())).unwrap();

        assert_eq!(cfg.server.bind_addr, "127.0.0.1:9000");
        assert_eq!(cfg.logging.format, LogFormat::Json);
        assert_eq!(cfg.directory.api_version, "2.0.0");
        assert_eq!(
            cfg.directory.cors.allowed_origins,
            vec!["https://console.example"]
        );
        assert_eq!(cfg.database.max_connections, 5);
    }

    #[test]
    fn test_unknown_key_rejected() {
        let file = yaml_file("server:\n  bind_adr: 127.0.0.1:9000\n");
        assert!(AppConfig::load(Some(file.path())).is_err());
    }

    #[test]
    fn test_missing_file_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.yaml");
        assert!(AppConfig::load(Some(&missing)).is_err());
    }

    #[test]
    fn test_cli_overrides_win() {
        let cfg = AppConfig::default().with_overrides(
            Some("sqlite::memory:".to_owned()),
            Some("127.0.0.1:0".to_owned()),
        );
        assert_eq!(cfg.database.url, "sqlite::memory:");
        assert_eq!(cfg.server.bind_addr, "127.0.0.1:0");
    }
}
