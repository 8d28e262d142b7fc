//! CLI configuration: where the month documents live and which agents the
//! roster offers.
//!
//! The store itself treats agent text as opaque; restricting it to a fixed
//! roster is a presentation-layer rule and lives here.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::PathBuf;

/// Environment override for the data directory; wins over the config file.
pub const DATA_DIR_ENV: &str = "DISPATCH_DATA_DIR";

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CliConfig {
    /// Directory holding the month-keyed ticket documents.
    pub data_dir: Option<PathBuf>,
    /// Agent roster accepted by `dsp add --agent`.
    pub agents: Vec<String>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            agents: default_agents(),
        }
    }
}

fn default_agents() -> Vec<String> {
    (1..=4).map(|n| format!("Agent {n}")).collect()
}

impl CliConfig {
    /// Resolve the data directory: `DISPATCH_DATA_DIR`, then the config
    /// file, then the platform data dir.
    ///
    /// # Errors
    ///
    /// Fails when no platform data directory can be determined and neither
    /// override is set.
    pub fn data_dir(&self) -> Result<PathBuf> {
        if let Ok(dir) = env::var(DATA_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }
        if let Some(ref dir) = self.data_dir {
            return Ok(dir.clone());
        }
        dirs::data_dir()
            .map(|dir| dir.join("dispatch"))
            .with_context(|| format!("no data directory found; set {DATA_DIR_ENV}"))
    }

    /// Whether `agent` is on the configured roster.
    #[must_use]
    pub fn is_known_agent(&self, agent: &str) -> bool {
        self.agents.iter().any(|known| known == agent)
    }
}

/// Path of the user config file, if a platform config dir exists.
#[must_use]
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("dispatch/config.toml"))
}

/// Load the user config, falling back to defaults when absent.
///
/// # Errors
///
/// Fails when the file exists but cannot be read or parsed.
pub fn load() -> Result<CliConfig> {
    let Some(path) = config_path() else {
        return Ok(CliConfig::default());
    };
    if !path.exists() {
        return Ok(CliConfig::default());
    }

    let text = fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    toml::from_str(&text).with_context(|| format!("failed to parse {}", path.display()))
}
