//! CLI-based decoder using the external asar binary

use super::traits::AsarTool;
use crate::config::ToolsConfig;
use crate::error::{ArchiveError, Error};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Output;
use tokio::process::Command;
use tracing::debug;

/// Program name looked up on `PATH`
pub const ASAR_PROGRAM: &str = "asar";

/// Decoder that executes the external `asar` binary
///
/// Arguments are passed to the process directly, never through a shell, so
/// bundle paths with spaces or quotes need no escaping.
pub struct CliAsarTool {
    binary_path: PathBuf,
}

impl CliAsarTool {
    /// Create a new CLI decoder with an explicit binary path
    ///
    /// # Arguments
    ///
    /// * `binary_path` - Path to the asar binary
    pub fn new(binary_path: PathBuf) -> Self {
        Self { binary_path }
    }

    /// Attempt to find asar in PATH
    ///
    /// Uses the `which` crate to search for the `asar` binary in the system PATH.
    ///
    /// # Returns
    ///
    /// `Some(CliAsarTool)` if the binary is found, `None` otherwise.
    pub fn from_path() -> Option<Self> {
        which::which(ASAR_PROGRAM).ok().map(Self::new)
    }

    /// Build the decoder described by `config`
    ///
    /// An explicit `asar_path` wins. Otherwise PATH is searched when
    /// `search_path` is set. If nothing is found the bare program name is used,
    /// so a decoder installed later is still picked up at spawn time.
    pub fn from_config(config: &ToolsConfig) -> Self {
        if let Some(path) = &config.asar_path {
            return Self::new(path.clone());
        }
        let found = if config.search_path {
            Self::from_path()
        } else {
            None
        };
        found.unwrap_or_else(|| Self::new(PathBuf::from(ASAR_PROGRAM)))
    }

    /// Path of the binary this decoder executes
    pub fn binary_path(&self) -> &Path {
        &self.binary_path
    }
}

#[async_trait]
impl AsarTool for CliAsarTool {
    async fn version(&self) -> crate::Result<String> {
        let output = Command::new(&self.binary_path)
            .arg("--version")
            .output()
            .await
            .map_err(|e| Error::ExternalTool(format!("Failed to execute asar: {}", e)))?;

        if !output.status.success() {
            return Err(Error::ExternalTool(format!(
                "asar --version failed: {}",
                failure_text(&output)
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }

    async fn extract(&self, archive: &Path, dest: &Path) -> crate::Result<()> {
        debug!(binary = ?self.binary_path, ?archive, ?dest, "running asar extract");

        let output = Command::new(&self.binary_path)
            .arg("extract")
            .arg(archive)
            .arg(dest)
            .output()
            .await
            .map_err(|e| ArchiveError::ExtractionFailed {
                archive: archive.to_path_buf(),
                reason: format!("Failed to execute asar: {}", e),
            })?;

        if !output.status.success() {
            return Err(ArchiveError::ExtractionFailed {
                archive: archive.to_path_buf(),
                reason: failure_text(&output),
            }
            .into());
        }

        Ok(())
    }

    fn name(&self) -> &'static str {
        "cli-asar"
    }
}

/// The tool's stderr, falling back to stdout and then the exit status
pub(crate) fn failure_text(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    if !stderr.trim().is_empty() {
        return stderr.trim().to_string();
    }
    let stdout = String::from_utf8_lossy(&output.stdout);
    if !stdout.trim().is_empty() {
        return stdout.trim().to_string();
    }
    format!("exited with {}", output.status)
}
