//! Configuration types for neutron

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// External decoder settings
///
/// Groups settings for locating and installing the `asar` executable.
/// Used as a nested sub-config within [`Config`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ToolsConfig {
    /// Path to asar executable (auto-detected if None)
    #[serde(default)]
    pub asar_path: Option<PathBuf>,

    /// Whether to search PATH for the asar binary if no explicit path is set (default: true)
    #[serde(default = "default_true")]
    pub search_path: bool,

    /// Install the decoder when its version probe fails (default: true)
    ///
    /// Installing is global to the machine. Turn this off to require a
    /// preinstalled `asar`.
    #[serde(default = "default_true")]
    pub auto_install: bool,

    /// Program and arguments used to install the decoder
    /// (default: `npm install -g asar`)
    #[serde(default = "default_install_command")]
    pub install_command: Vec<String>,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            asar_path: None,
            search_path: true,
            auto_install: true,
            install_command: default_install_command(),
        }
    }
}

/// Main configuration for [`Neutron`](crate::Neutron)
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    /// External decoder settings
    #[serde(default)]
    pub tools: ToolsConfig,

    /// Capacity of the event broadcast channel (default: 256)
    ///
    /// Slow subscribers that fall further behind than this miss events.
    #[serde(default = "default_event_channel_capacity")]
    pub event_channel_capacity: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tools: ToolsConfig::default(),
            event_channel_capacity: default_event_channel_capacity(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file
    ///
    /// Missing fields take their defaults. The result is validated before it is returned.
    pub async fn from_file(path: &Path) -> Result<Self> {
        let raw = tokio::fs::read_to_string(path).await?;
        let config: Config = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check settings that serde cannot express
    pub fn validate(&self) -> Result<()> {
        if self.event_channel_capacity == 0 {
            return Err(Error::Config {
                message: "event_channel_capacity must be greater than zero".to_string(),
                key: Some("event_channel_capacity".to_string()),
            });
        }
        if self.tools.auto_install && self.tools.install_command.is_empty() {
            return Err(Error::Config {
                message: "install_command must name a program when auto_install is enabled"
                    .to_string(),
                key: Some("install_command".to_string()),
            });
        }
        Ok(())
    }
}

fn default_true() -> bool {
    true
}

fn default_install_command() -> Vec<String> {
    vec![
        "npm".to_string(),
        "install".to_string(),
        "-g".to_string(),
        "asar".to_string(),
    ]
}

fn default_event_channel_capacity() -> usize {
    256
}
