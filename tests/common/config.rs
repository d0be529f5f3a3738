//! Test configuration helpers for creating inspectors

use neutron::{AsarTool, Config, Neutron, ToolsConfig};
use std::path::PathBuf;
use std::sync::Arc;

/// Configuration that never installs anything or searches PATH
pub fn offline_config() -> Config {
    Config {
        tools: ToolsConfig {
            asar_path: None,
            search_path: false,
            auto_install: false,
            ..ToolsConfig::default()
        },
        ..Config::default()
    }
}

/// Offline configuration pointing at an explicit decoder binary
pub fn config_with_asar(asar_path: PathBuf) -> Config {
    let mut config = offline_config();
    config.tools.asar_path = Some(asar_path);
    config
}

/// Inspector using an injected decoder
pub fn inspector_with(tool: Arc<dyn AsarTool>) -> Neutron {
    Neutron::with_tool(offline_config(), tool).unwrap()
}
