//! Configuration management (TOML)

use crate::average::DEFAULT_WINDOW;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const APP_NAME: &str = "weight-watcher";
const DATA_FILE_NAME: &str = "weights.db";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub report: ReportConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneralConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_file: Option<PathBuf>,
    pub verbose: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub window: i64,
    pub format: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl Default for ReportConfig {
    fn default() -> Self {
        ReportConfig {
            window: DEFAULT_WINDOW,
            format: OutputFormat::Text,
        }
    }
}

impl ReportConfig {
    /// Settings for one report run; command-line values win over the config file.
    pub fn resolve(&self, window: Option<i64>, format: Option<OutputFormat>) -> ReportConfig {
        ReportConfig {
            window: window.unwrap_or(self.window),
            format: format.unwrap_or(self.format),
        }
    }
}

impl Config {
    pub fn load(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<(), Box<dyn std::error::Error>> {
        let content = toml::to_string_pretty(self)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("", "", APP_NAME)
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }

    /// The configured data file, or the per-user default location.
    pub fn data_file(&self) -> PathBuf {
        self.general.data_file.clone().unwrap_or_else(|| {
            directories::ProjectDirs::from("", "", APP_NAME)
                .map(|dirs| dirs.data_dir().join(DATA_FILE_NAME))
                .unwrap_or_else(|| PathBuf::from(DATA_FILE_NAME))
        })
    }
}
