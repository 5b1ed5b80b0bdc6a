use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

const CONFIG_DIR: &str = "strand";
const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Default, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// sea-orm connection URL, or `memory` for the in-process store.
    #[serde(default = "DatabaseConfig::default_url")]
    pub url: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: Self::default_url(),
        }
    }
}

impl DatabaseConfig {
    fn default_url() -> String {
        dirs::home_dir().map_or_else(
            || "sqlite://strings.db?mode=rwc".to_string(),
            |home| {
                format!(
                    "sqlite://{}?mode=rwc",
                    home.join(CONFIG_DIR).join("strings.db").display()
                )
            },
        )
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Default filter directive; `RUST_LOG` takes precedence.
    #[serde(default = "LoggingConfig::default_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Self::default_level(),
        }
    }
}

impl LoggingConfig {
    fn default_level() -> String {
        "info".to_string()
    }
}

impl Config {
    /// Read a config file; `Ok(None)` when it does not exist.
    ///
    /// Nothing is logged here, since the subscriber is configured from the
    /// result.
    pub fn read(path: &Path) -> anyhow::Result<Option<Self>> {
        if !path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Invalid config file {}: {e}", path.display()))?;

        Ok(Some(config))
    }

    /// `~/strand/config.json`.
    pub fn default_path() -> anyhow::Result<PathBuf> {
        Ok(dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Cannot find home directory"))?
            .join(CONFIG_DIR)
            .join(CONFIG_FILE))
    }

    /// Write the default configuration to `path`, creating its directory and
    /// refusing to overwrite.
    pub fn create_config_at(path: &Path) -> anyhow::Result<()> {
        if path.exists() {
            anyhow::bail!(
                "Config file already exists at: {}. Please edit it directly.",
                path.display()
            );
        }

        if let Some(dir) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir)?;
        }
        let content = serde_json::to_string_pretty(&Self::default())?;
        std::fs::write(path, content)?;
        info!("Created config file at: {}", path.display());
        Ok(())
    }
}
