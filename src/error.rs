//! Error types for neutron
//!
//! This module provides error handling for the library, including:
//! - Domain-specific error types for archive extraction and restore
//! - Machine-readable error codes for the request/response boundary
//! - Context information (archive path, backup path, resources directory)

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for neutron operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for neutron
///
/// This is the primary error type used throughout the library. Public boundary
/// operations never surface it directly; they convert it into a failure shape
/// carrying [`Error::to_string`] and [`Error::error_code`].
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "install_command")
        key: Option<String>,
    },

    /// Archive extraction or restore error
    #[error("{0}")]
    Archive(#[from] ArchiveError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// External tool execution failed (asar, npm)
    #[error("external tool error: {0}")]
    ExternalTool(String),

    /// Operation not supported (missing binary, not implemented, etc.)
    #[error("not supported: {0}")]
    NotSupported(String),
}

/// Errors raised while extracting or restoring an `app.asar` archive
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// The decoder failed to extract the archive
    #[error("extraction failed for {}: {reason}", archive.display())]
    ExtractionFailed {
        /// The archive that failed to extract
        archive: PathBuf,
        /// The decoder's error output
        reason: String,
    },

    /// Renaming the archive or its backup failed
    #[error("failed to move {} to {}: {reason}", source_path.display(), dest_path.display())]
    MoveFailed {
        /// The path being renamed
        source_path: PathBuf,
        /// The rename destination
        dest_path: PathBuf,
        /// The reason the rename failed
        reason: String,
    },

    /// A backup archive from an earlier extraction is still present
    #[error("backup archive already exists at {}; restore it before extracting again", backup.display())]
    BackupExists {
        /// The existing backup archive
        backup: PathBuf,
    },

    /// The extraction target directory is already present
    ///
    /// Left behind by an extraction that stopped before renaming the archive
    /// aside, or by a restore that could not remove it.
    #[error("extracted directory {} already exists; remove it before extracting", extracted.display())]
    ExtractTargetExists {
        /// The directory in the way
        extracted: PathBuf,
    },

    /// The archive was restored but the extracted directory could not be removed
    #[error(
        "archive restored to {} but extracted directory {} could not be removed: {reason}",
        archive.display(),
        extracted.display()
    )]
    CleanupFailed {
        /// The restored archive
        archive: PathBuf,
        /// The directory left behind
        extracted: PathBuf,
        /// The removal error
        reason: String,
    },

    /// The extracted directory exists but the backup archive does not
    ///
    /// A previous extraction finished decoding but never renamed the archive aside.
    #[error(
        "backup archive {} is missing but extracted directory {} exists; the previous extraction did not complete",
        backup.display(),
        extracted.display()
    )]
    BackupMissing {
        /// The backup archive that was expected
        backup: PathBuf,
        /// The extracted directory left behind
        extracted: PathBuf,
    },

    /// No extraction was ever performed for this bundle
    #[error("nothing to restore: {} does not exist", backup.display())]
    NothingToRestore {
        /// The backup archive that was requested
        backup: PathBuf,
    },

    /// An archive already sits where the backup would be restored to
    #[error("cannot restore: {} already exists", target.display())]
    RestoreTargetExists {
        /// The archive path that is already occupied
        target: PathBuf,
    },

    /// A path without the structure the operation needs
    #[error("invalid path {}: {reason}", path.display())]
    InvalidPath {
        /// The offending path
        path: PathBuf,
        /// Why the path cannot be used
        reason: String,
    },

    /// Another extract or restore is running against the same bundle
    #[error("another operation is in progress for {}", resources_dir.display())]
    OperationInProgress {
        /// The `Resources` directory that is leased
        resources_dir: PathBuf,
    },
}

impl Error {
    /// Get the machine-readable error code
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::Config { .. } => "config_error",
            Error::Archive(e) => match e {
                ArchiveError::ExtractionFailed { .. } => "extraction_failed",
                ArchiveError::MoveFailed { .. } => "move_failed",
                ArchiveError::BackupExists { .. } => "backup_exists",
                ArchiveError::ExtractTargetExists { .. } => "extract_target_exists",
                ArchiveError::CleanupFailed { .. } => "cleanup_failed",
                ArchiveError::BackupMissing { .. } => "backup_missing",
                ArchiveError::NothingToRestore { .. } => "nothing_to_restore",
                ArchiveError::RestoreTargetExists { .. } => "restore_target_exists",
                ArchiveError::InvalidPath { .. } => "invalid_path",
                ArchiveError::OperationInProgress { .. } => "operation_in_progress",
            },
            Error::Io(_) => "io_error",
            Error::Serialization(_) => "serialization_error",
            Error::ExternalTool(_) => "external_tool_error",
            Error::NotSupported(_) => "not_supported",
        }
    }
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn archive_errors_have_distinct_codes() {
        let missing = Error::from(ArchiveError::BackupMissing {
            backup: PathBuf::from("/A.app/Contents/Resources/original-app.asar"),
            extracted: PathBuf::from("/A.app/Contents/Resources/app"),
        });
        let nothing = Error::from(ArchiveError::NothingToRestore {
            backup: PathBuf::from("/A.app/Contents/Resources/original-app.asar"),
        });

        assert_eq!(missing.error_code(), "backup_missing");
        assert_eq!(nothing.error_code(), "nothing_to_restore");
        assert_ne!(missing.to_string(), nothing.to_string());
    }

    #[test]
    fn cleanup_failure_names_both_paths() {
        let err = Error::from(ArchiveError::CleanupFailed {
            archive: PathBuf::from("/A.app/Contents/Resources/app.asar"),
            extracted: PathBuf::from("/A.app/Contents/Resources/app"),
            reason: "Not a directory".to_string(),
        });

        assert_eq!(err.error_code(), "cleanup_failed");
        let message = err.to_string();
        assert!(message.contains("archive restored to /A.app/Contents/Resources/app.asar"));
        assert!(message.contains("/A.app/Contents/Resources/app could not be removed"));
    }

    #[test]
    fn archive_error_display_is_not_prefixed() {
        let err = Error::from(ArchiveError::ExtractionFailed {
            archive: PathBuf::from("/A.app/Contents/Resources/app.asar"),
            reason: "invalid header".to_string(),
        });

        assert_eq!(
            err.to_string(),
            "extraction failed for /A.app/Contents/Resources/app.asar: invalid header"
        );
    }

    #[test]
    fn io_error_converts_with_code() {
        let err: Error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied").into();
        assert_eq!(err.error_code(), "io_error");
        assert!(err.to_string().contains("denied"));
    }

    #[test]
    fn external_tool_error_code() {
        let err = Error::ExternalTool("asar exited with status 1".into());
        assert_eq!(err.error_code(), "external_tool_error");
        assert_eq!(err.to_string(), "external tool error: asar exited with status 1");
    }
}
