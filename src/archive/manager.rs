use super::paths::ArchivePaths;
use crate::config::ToolsConfig;
use crate::error::{ArchiveError, Result};
use crate::lease::OperationLeases;
use crate::tool::{AsarTool, ensure_available};
use crate::types::{Event, ExtractionState};
use std::path::Path;
use std::sync::Arc;
use tokio::fs;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

/// Extracts `app.asar` archives and restores them
///
/// All state lives on disk. While an archive is extracted its bytes sit in
/// `original-app.asar` and the decoded tree in `app`, both next to where
/// `app.asar` was.
#[derive(Clone)]
pub struct ArchiveManager {
    tool: Arc<dyn AsarTool>,
    tools_config: ToolsConfig,
    leases: OperationLeases,
    event_tx: broadcast::Sender<Event>,
}

impl ArchiveManager {
    /// Create a manager extracting with `tool`
    pub fn new(
        tool: Arc<dyn AsarTool>,
        tools_config: ToolsConfig,
        event_tx: broadcast::Sender<Event>,
    ) -> Self {
        Self {
            tool,
            tools_config,
            leases: OperationLeases::new(),
            event_tx,
        }
    }

    /// Lease table shared by this manager's operations
    pub fn leases(&self) -> &OperationLeases {
        &self.leases
    }

    /// Extract `archive_path` into its sibling `app` directory
    ///
    /// The archive is renamed to `original-app.asar` only after the decoder
    /// succeeds, so any failure before that leaves it untouched.
    ///
    /// # Errors
    ///
    /// - [`ArchiveError::OperationInProgress`] if the bundle is leased
    /// - [`ArchiveError::InvalidPath`] if the archive does not exist
    /// - [`ArchiveError::BackupExists`] if an earlier extraction was never restored
    /// - [`ArchiveError::ExtractTargetExists`] if `app` is already present
    /// - [`ArchiveError::ExtractionFailed`] if the decoder fails; any partial
    ///   output it left in `app` is removed
    /// - [`ArchiveError::MoveFailed`] if the archive cannot be renamed aside
    pub async fn extract(&self, archive_path: &Path) -> Result<ExtractionState> {
        self.event_tx
            .send(Event::Extracting {
                archive: archive_path.to_path_buf(),
            })
            .ok();

        let result = self.extract_inner(archive_path).await;
        match &result {
            Ok(state) => {
                info!(
                    ?archive_path,
                    extracted_path = ?state.extracted_path,
                    original_path = ?state.original_path,
                    "extracted archive"
                );
                self.event_tx
                    .send(Event::Extracted {
                        extracted_path: state.extracted_path.clone(),
                        original_path: state.original_path.clone(),
                    })
                    .ok();
            }
            Err(e) => {
                warn!(?archive_path, error = %e, "error extracting asar");
                self.event_tx
                    .send(Event::ExtractFailed {
                        archive: archive_path.to_path_buf(),
                        error: e.to_string(),
                    })
                    .ok();
            }
        }
        result
    }

    async fn extract_inner(&self, archive_path: &Path) -> Result<ExtractionState> {
        let paths = ArchivePaths::for_archive(archive_path)?;
        let _lease = self.leases.try_acquire(&paths.resources_dir)?;

        if !fs::try_exists(&paths.archive).await? {
            return Err(ArchiveError::InvalidPath {
                path: paths.archive,
                reason: "archive does not exist".to_string(),
            }
            .into());
        }
        if fs::try_exists(&paths.backup).await? {
            return Err(ArchiveError::BackupExists {
                backup: paths.backup,
            }
            .into());
        }
        if fs::symlink_metadata(&paths.extracted).await.is_ok() {
            return Err(ArchiveError::ExtractTargetExists {
                extracted: paths.extracted,
            }
            .into());
        }

        ensure_available(self.tool.as_ref(), &self.tools_config, &self.event_tx).await;

        debug!(
            tool = self.tool.name(),
            archive = ?paths.archive,
            dest = ?paths.extracted,
            "extracting archive"
        );
        if let Err(e) = self.tool.extract(&paths.archive, &paths.extracted).await {
            // `app` did not exist before the decoder ran, so anything there is partial output
            discard_partial_output(&paths.extracted).await;
            return Err(e);
        }

        fs::rename(&paths.archive, &paths.backup)
            .await
            .map_err(|e| ArchiveError::MoveFailed {
                source_path: paths.archive.clone(),
                dest_path: paths.backup.clone(),
                reason: e.to_string(),
            })?;

        Ok(ExtractionState {
            is_extracted: true,
            extracted_path: paths.extracted,
            original_path: paths.backup,
        })
    }

    /// Put the backup at `original_path` back to `app.asar` and remove `app`
    ///
    /// # Errors
    ///
    /// - [`ArchiveError::OperationInProgress`] if the bundle is leased
    /// - [`ArchiveError::BackupMissing`] if the backup is gone but `app` exists,
    ///   meaning an earlier extraction stopped before renaming the archive
    /// - [`ArchiveError::NothingToRestore`] if neither the backup nor `app` exists
    /// - [`ArchiveError::RestoreTargetExists`] if `app.asar` is already present
    /// - [`ArchiveError::MoveFailed`] if the rename fails
    /// - [`ArchiveError::CleanupFailed`] if the archive is back in place but
    ///   `app` cannot be removed
    pub async fn restore(&self, original_path: &Path) -> Result<()> {
        let result = self.restore_inner(original_path).await;
        match &result {
            Ok(archive) => {
                info!(?original_path, ?archive, "restored archive");
                self.event_tx
                    .send(Event::Restored {
                        archive: archive.clone(),
                    })
                    .ok();
            }
            Err(e) => {
                warn!(?original_path, error = %e, "error restoring asar");
                self.event_tx
                    .send(Event::RestoreFailed {
                        backup: original_path.to_path_buf(),
                        error: e.to_string(),
                    })
                    .ok();
            }
        }
        result.map(|_| ())
    }

    async fn restore_inner(&self, original_path: &Path) -> Result<std::path::PathBuf> {
        let paths = ArchivePaths::for_backup(original_path)?;
        let _lease = self.leases.try_acquire(&paths.resources_dir)?;

        if !fs::try_exists(&paths.backup).await? {
            let err = if fs::try_exists(&paths.extracted).await? {
                ArchiveError::BackupMissing {
                    backup: paths.backup,
                    extracted: paths.extracted,
                }
            } else {
                ArchiveError::NothingToRestore {
                    backup: paths.backup,
                }
            };
            return Err(err.into());
        }
        if fs::try_exists(&paths.archive).await? {
            return Err(ArchiveError::RestoreTargetExists {
                target: paths.archive,
            }
            .into());
        }

        fs::rename(&paths.backup, &paths.archive)
            .await
            .map_err(|e| ArchiveError::MoveFailed {
                source_path: paths.backup.clone(),
                dest_path: paths.archive.clone(),
                reason: e.to_string(),
            })?;

        match fs::remove_dir_all(&paths.extracted).await {
            Ok(()) => debug!(extracted = ?paths.extracted, "removed extracted directory"),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => {
                return Err(ArchiveError::CleanupFailed {
                    archive: paths.archive,
                    extracted: paths.extracted,
                    reason: e.to_string(),
                }
                .into());
            }
        }

        Ok(paths.archive)
    }
}

async fn discard_partial_output(extracted: &Path) {
    match fs::remove_dir_all(extracted).await {
        Ok(()) => debug!(?extracted, "removed partial extraction output"),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => warn!(?extracted, error = %e, "failed to remove partial extraction output"),
    }
}
