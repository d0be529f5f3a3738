//! Availability probe and auto-install for the decoder

use super::cli::failure_text;
use super::traits::AsarTool;
use crate::config::ToolsConfig;
use crate::types::Event;
use tokio::process::Command;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

/// What [`ensure_available`] found and did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolStatus {
    /// The version probe succeeded
    Available {
        /// Reported version
        version: String,
    },
    /// The probe failed and the installer ran successfully
    Installed,
    /// The probe failed and the installer failed too
    InstallFailed {
        /// Installer error
        error: String,
    },
    /// The probe failed and auto-install is disabled
    Missing {
        /// Probe error
        error: String,
    },
}

/// Probe the decoder and install it if the probe fails
///
/// Never returns an error: a failed install is logged and reported in the
/// returned status, and the extraction that follows surfaces its own error.
pub async fn ensure_available(
    tool: &dyn AsarTool,
    config: &ToolsConfig,
    event_tx: &broadcast::Sender<Event>,
) -> ToolStatus {
    let probe_error = match tool.version().await {
        Ok(version) => {
            debug!(tool = tool.name(), %version, "decoder available");
            return ToolStatus::Available { version };
        }
        Err(e) => e.to_string(),
    };

    warn!(tool = tool.name(), error = %probe_error, "decoder version probe failed");
    event_tx
        .send(Event::ToolMissing {
            tool: tool.name().to_string(),
            error: probe_error.clone(),
        })
        .ok();

    if !config.auto_install {
        return ToolStatus::Missing { error: probe_error };
    }

    let Some((program, args)) = config.install_command.split_first() else {
        return ToolStatus::InstallFailed {
            error: "install_command is empty".to_string(),
        };
    };

    let command_line = config.install_command.join(" ");
    warn!(command = %command_line, "installing decoder globally");
    event_tx
        .send(Event::ToolInstalling {
            command: command_line.clone(),
        })
        .ok();

    let error = match Command::new(program).args(args).output().await {
        Ok(output) if output.status.success() => {
            info!(command = %command_line, "decoder installed");
            return ToolStatus::Installed;
        }
        Ok(output) => failure_text(&output),
        Err(e) => format!("Failed to execute {}: {}", program, e),
    };

    warn!(command = %command_line, %error, "decoder install failed");
    event_tx
        .send(Event::ToolInstallFailed {
            error: error.clone(),
        })
        .ok();
    ToolStatus::InstallFailed { error }
}
