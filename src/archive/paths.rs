//! Sibling paths around an `app.asar` archive

use crate::bundle::layout::{ARCHIVE_NAME, BACKUP_NAME, EXTRACT_DIR};
use crate::error::{ArchiveError, Result};
use std::path::{Path, PathBuf};

/// The files one extract/restore cycle touches, all inside `resources_dir`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchivePaths {
    /// Parent directory of the archive
    pub resources_dir: PathBuf,
    /// `app.asar`
    pub archive: PathBuf,
    /// `original-app.asar`, or the backup path given to restore
    pub backup: PathBuf,
    /// `app`
    pub extracted: PathBuf,
}

impl ArchivePaths {
    /// Paths for extracting the archive at `archive_path`
    pub fn for_archive(archive_path: &Path) -> Result<Self> {
        let resources_dir = parent_of(archive_path)?;
        Ok(Self {
            archive: archive_path.to_path_buf(),
            backup: resources_dir.join(BACKUP_NAME),
            extracted: resources_dir.join(EXTRACT_DIR),
            resources_dir,
        })
    }

    /// Paths for restoring the backup archive at `backup_path`
    pub fn for_backup(backup_path: &Path) -> Result<Self> {
        let resources_dir = parent_of(backup_path)?;
        Ok(Self {
            archive: resources_dir.join(ARCHIVE_NAME),
            backup: backup_path.to_path_buf(),
            extracted: resources_dir.join(EXTRACT_DIR),
            resources_dir,
        })
    }
}

fn parent_of(path: &Path) -> Result<PathBuf> {
    match path.parent() {
        Some(parent) if path.file_name().is_some() => Ok(parent.to_path_buf()),
        _ => Err(ArchiveError::InvalidPath {
            path: path.to_path_buf(),
            reason: "path has no parent directory".to_string(),
        }
        .into()),
    }
}
