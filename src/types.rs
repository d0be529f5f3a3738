//! Core types for neutron

use crate::error::Error;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Text carried in `asarPath` when a bundle ships only `app.asar.unpacked`
pub const UNPACKED_ARCHIVE_PLACEHOLDER: &str = "This app uses an unpacked asar archive";

/// Kind of a directory snapshot entry
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryType {
    /// Regular file (or anything that is not a directory)
    File,
    /// Directory
    Directory,
}

/// One entry of a directory snapshot
///
/// `has_children` is optimistic: it is `true` for every directory without
/// looking inside. Treat it as "worth trying to expand", not as a promise that
/// the directory is non-empty.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DirectoryNode {
    /// Entry name (last path component)
    pub name: String,
    /// Absolute path to the entry
    pub path: PathBuf,
    /// File or directory
    #[serde(rename = "type")]
    pub entry_type: EntryType,
    /// Whether the entry may be expanded
    pub has_children: bool,
    /// Children, populated only on the root node returned by classification
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<DirectoryNode>>,
}

impl DirectoryNode {
    /// Whether this entry is a directory
    pub fn is_dir(&self) -> bool {
        self.entry_type == EntryType::Directory
    }
}

/// Where a recognized bundle keeps its program assets
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ArchiveLocation {
    /// `Contents/Resources/app.asar`
    Packed(PathBuf),
    /// `Contents/Resources/app.asar.unpacked`, no archive file
    Unpacked(PathBuf),
}

/// Details of a bundle recognized as an Electron application
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecognizedApp {
    /// Archive or unpacked marker directory
    pub location: ArchiveLocation,
    /// Bundle file name without the `.app` suffix
    pub app_name: String,
    /// `electron.icns` or `app.icns`, if either exists
    pub icon_path: Option<PathBuf>,
    /// Snapshot of the bundle with the children of `Contents`
    pub structure: DirectoryNode,
}

impl RecognizedApp {
    /// The located `app.asar`, if the bundle ships one
    pub fn archive_path(&self) -> Option<&Path> {
        match &self.location {
            ArchiveLocation::Packed(path) => Some(path),
            ArchiveLocation::Unpacked(_) => None,
        }
    }

    /// The `app.asar.unpacked` directory, if no archive file was found
    pub fn unpacked_path(&self) -> Option<&Path> {
        match &self.location {
            ArchiveLocation::Packed(_) => None,
            ArchiveLocation::Unpacked(path) => Some(path),
        }
    }
}

/// Outcome of classifying a bundle path
///
/// Serializes to the `{ isElectronApp, ... }` shape consumed by the UI.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "ClassificationWire", try_from = "ClassificationWire")]
pub enum ClassificationResult {
    /// The path is not an Electron bundle, or could not be read
    NotRecognized {
        /// Human-readable reason
        message: String,
    },
    /// The path is an Electron bundle
    Recognized(Box<RecognizedApp>),
}

impl ClassificationResult {
    pub(crate) fn not_recognized(message: impl Into<String>) -> Self {
        Self::NotRecognized {
            message: message.into(),
        }
    }

    /// Whether the bundle was recognized
    pub fn is_recognized(&self) -> bool {
        matches!(self, Self::Recognized(_))
    }

    /// The recognized app details, if any
    pub fn recognized(&self) -> Option<&RecognizedApp> {
        match self {
            Self::Recognized(app) => Some(app),
            Self::NotRecognized { .. } => None,
        }
    }

    /// The not-recognized message, if any
    pub fn message(&self) -> Option<&str> {
        match self {
            Self::NotRecognized { message } => Some(message),
            Self::Recognized(_) => None,
        }
    }
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ClassificationWire {
    is_electron_app: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    asar_path: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    unpacked_path: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    app_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    app_icon_path: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    structure: Option<DirectoryNode>,
}

impl From<ClassificationResult> for ClassificationWire {
    fn from(result: ClassificationResult) -> Self {
        match result {
            ClassificationResult::NotRecognized { message } => Self {
                is_electron_app: false,
                message: Some(message),
                asar_path: None,
                unpacked_path: None,
                app_name: None,
                app_icon_path: None,
                structure: None,
            },
            ClassificationResult::Recognized(app) => {
                let app = *app;
                let (asar_path, unpacked_path) = match app.location {
                    ArchiveLocation::Packed(path) => {
                        (Some(path.to_string_lossy().into_owned()), None)
                    }
                    ArchiveLocation::Unpacked(path) => {
                        (Some(UNPACKED_ARCHIVE_PLACEHOLDER.to_string()), Some(path))
                    }
                };
                Self {
                    is_electron_app: true,
                    message: None,
                    asar_path,
                    unpacked_path,
                    app_name: Some(app.app_name),
                    app_icon_path: app.icon_path,
                    structure: Some(app.structure),
                }
            }
        }
    }
}

impl TryFrom<ClassificationWire> for ClassificationResult {
    type Error = String;

    fn try_from(wire: ClassificationWire) -> Result<Self, Self::Error> {
        if !wire.is_electron_app {
            return Ok(Self::not_recognized(wire.message.unwrap_or_default()));
        }

        let location = match (wire.unpacked_path, wire.asar_path) {
            (Some(unpacked), _) => ArchiveLocation::Unpacked(unpacked),
            (None, Some(asar)) => ArchiveLocation::Packed(PathBuf::from(asar)),
            (None, None) => return Err("recognized app needs asarPath or unpackedPath".into()),
        };
        let app_name = wire.app_name.ok_or("recognized app needs appName")?;
        let structure = wire.structure.ok_or("recognized app needs structure")?;

        Ok(Self::Recognized(Box::new(RecognizedApp {
            location,
            app_name,
            icon_path: wire.app_icon_path,
            structure,
        })))
    }
}

/// Filesystem state after a successful extraction
///
/// Held by the caller across one extract/restore cycle. The filesystem is the
/// only durable record: `original_path` names the renamed backup archive and
/// `extracted_path` the decoded directory.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionState {
    /// Whether the archive is currently extracted
    pub is_extracted: bool,
    /// `Resources/app`
    pub extracted_path: PathBuf,
    /// `Resources/original-app.asar`
    pub original_path: PathBuf,
}

/// Boundary shape for the extract operation
///
/// `{success: true, extractedPath, originalPath}` or `{success: false, error, code}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractOutcome {
    /// Whether extraction succeeded
    pub success: bool,
    /// Extracted directory on success
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extracted_path: Option<PathBuf>,
    /// Backup archive on success
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_path: Option<PathBuf>,
    /// Error message on failure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Machine-readable error code on failure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl ExtractOutcome {
    /// Successful extraction
    pub fn succeeded(state: &ExtractionState) -> Self {
        Self {
            success: true,
            extracted_path: Some(state.extracted_path.clone()),
            original_path: Some(state.original_path.clone()),
            error: None,
            code: None,
        }
    }

    /// Failed extraction
    pub fn failed(error: &Error) -> Self {
        Self {
            success: false,
            extracted_path: None,
            original_path: None,
            error: Some(error.to_string()),
            code: Some(error.error_code().to_string()),
        }
    }

    /// Rebuild the caller-side state from a successful outcome
    pub fn state(&self) -> Option<ExtractionState> {
        match (self.success, &self.extracted_path, &self.original_path) {
            (true, Some(extracted), Some(original)) => Some(ExtractionState {
                is_extracted: true,
                extracted_path: extracted.clone(),
                original_path: original.clone(),
            }),
            _ => None,
        }
    }
}

/// Boundary shape for the restore operation
///
/// `{success: true}` or `{success: false, error, code}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RestoreOutcome {
    /// Whether restore succeeded
    pub success: bool,
    /// Error message on failure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Machine-readable error code on failure
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

impl RestoreOutcome {
    /// Successful restore
    pub fn succeeded() -> Self {
        Self {
            success: true,
            error: None,
            code: None,
        }
    }

    /// Failed restore
    pub fn failed(error: &Error) -> Self {
        Self {
            success: false,
            error: Some(error.to_string()),
            code: Some(error.error_code().to_string()),
        }
    }
}

/// Event emitted while operations run
///
/// Subscribers receive these through [`Neutron::subscribe`](crate::Neutron::subscribe).
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// A bundle was classified
    Classified {
        /// Path that was classified
        path: PathBuf,
        /// Whether it is an Electron bundle
        recognized: bool,
    },

    /// The decoder's version probe failed
    ToolMissing {
        /// Decoder name
        tool: String,
        /// Probe error
        error: String,
    },

    /// The decoder is being installed
    ToolInstalling {
        /// Installer command line
        command: String,
    },

    /// Installing the decoder failed
    ToolInstallFailed {
        /// Installer error
        error: String,
    },

    /// Extraction started
    Extracting {
        /// Archive being extracted
        archive: PathBuf,
    },

    /// Extraction finished and the archive was renamed aside
    Extracted {
        /// Extracted directory
        extracted_path: PathBuf,
        /// Backup archive
        original_path: PathBuf,
    },

    /// Extraction failed
    ExtractFailed {
        /// Archive that failed
        archive: PathBuf,
        /// Error message
        error: String,
    },

    /// The backup archive was put back and the extracted directory removed
    Restored {
        /// Restored archive
        archive: PathBuf,
    },

    /// Restore failed
    RestoreFailed {
        /// Backup archive that was requested
        backup: PathBuf,
        /// Error message
        error: String,
    },
}
