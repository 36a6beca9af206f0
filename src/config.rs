use anyhow::{Context, Result};
use dirs::config_dir;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const APP_NAME: &str = "rally-codriver";
const CONFIG_FILE: &str = "config.json";
const PORT_ENV: &str = "CODRIVER_PORT";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodriverConfig {
    /// Field separator for pace note lines.
    pub separator: char,
    /// Start each session on the built-in sample route instead of an empty list.
    pub seed_sample_notes: bool,
    /// Port for `codriver serve`.
    pub port: u16,
}

impl Default for CodriverConfig {
    fn default() -> Self {
        Self {
            separator: ',',
            seed_sample_notes: true,
            port: 3000,
        }
    }
}

impl CodriverConfig {
    /// Load configuration from the user's config directory.
    /// Returns default config if file doesn't exist or fails to parse.
    pub fn load() -> Self {
        match get_config_path() {
            Ok(path) => Self::load_from(&path),
            Err(e) => {
                tracing::warn!("Failed to locate config, using defaults: {}", e);
                Self::default().with_overrides(env_var)
            }
        }
    }

    /// Load configuration from `path`, falling back to defaults.
    /// Environment overrides apply either way.
    pub fn load_from(path: &Path) -> Self {
        Self::load_with(path, env_var)
    }

    fn load_with(path: &Path, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let config = match Self::try_load(path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!("Failed to load config, using defaults: {:#}", e);
                Self::default()
            }
        };
        config.with_overrides(lookup)
    }

    fn try_load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).context("Failed to read config file")?;

        let config = serde_json::from_str(&content).context("Failed to parse config file")?;

        Ok(config)
    }

    fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(port) = lookup(PORT_ENV) {
            match port.parse() {
                Ok(port) => self.port = port,
                Err(_) => tracing::warn!("Ignoring invalid {}: {}", PORT_ENV, port),
            }
        }
        self
    }

    /// Save the current configuration to the user's config directory.
    pub fn save(&self) -> Result<()> {
        self.save_to(&get_config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = serde_json::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(path, content).context("Failed to write config file")?;

        Ok(())
    }
}

fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

pub fn get_config_path() -> Result<PathBuf> {
    let mut path =
        config_dir().ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
    path.push(APP_NAME);
    path.push(CONFIG_FILE);
    Ok(path)
}
