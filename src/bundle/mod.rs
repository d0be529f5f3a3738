//! Bundle classification
//!
//! Decides whether a `.app` bundle is an Electron application and locates its
//! resource archive. Probes run in a fixed order because the order decides
//! which fields of the result are populated:
//!
//! 1. `Contents/Resources` (absent: not recognized, nothing else is probed)
//! 2. `Contents/Resources/electron.icns`, then `Contents/Resources/app.icns`
//! 3. one-level snapshot of `Contents`
//! 4. `Contents/Resources/app.asar`
//! 5. `Contents/Resources/app.asar.unpacked`
//!
//! Classification is read-only and never fails: I/O errors become
//! [`ClassificationResult::NotRecognized`] carrying the error message.

pub mod layout;
mod probe;


pub use probe::{FsProbe, PathProbe};

use crate::error::Result;
use crate::snapshot::list_one_level;
use crate::types::{
    ArchiveLocation, ClassificationResult, DirectoryNode, EntryType, RecognizedApp,
};
use layout::{
    ARCHIVE_NAME, BUNDLE_SUFFIX, CONTENTS_DIR, FALLBACK_ICON, RESOURCES_DIR, RUNTIME_ICON,
    UNPACKED_DIR,
};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Message returned when the bundle has no `Contents/Resources`
pub const NO_RESOURCES_MESSAGE: &str =
    "This is not an Electron application (no Resources directory found).";

/// Message returned when neither the archive nor its unpacked marker exists
pub const NO_ARCHIVE_MESSAGE: &str =
    "This is not an Electron application (no app.asar or app.asar.unpacked found).";

/// Classify `path` using the real filesystem
///
/// # Example
///
/// ```no_run
/// use neutron::bundle::classify;
/// use std::path::Path;
///
/// # #[tokio::main]
/// # async fn main() {
/// let result = classify(Path::new("/Applications/Slack.app")).await;
/// if let Some(app) = result.recognized() {
///     println!("{} uses {:?}", app.app_name, app.archive_path());
/// }
/// # }
/// ```
pub async fn classify(path: &Path) -> ClassificationResult {
    classify_with(&FsProbe, path).await
}

/// Classify `path`, routing every existence check through `probe`
pub async fn classify_with(probe: &dyn PathProbe, path: &Path) -> ClassificationResult {
    debug!(?path, "analyzing app");
    match probe_bundle(probe, path).await {
        Ok(result) => result,
        Err(e) => {
            warn!(?path, error = %e, "error analyzing application");
            ClassificationResult::not_recognized(format!("Error analyzing application: {e}"))
        }
    }
}

async fn probe_bundle(probe: &dyn PathProbe, path: &Path) -> Result<ClassificationResult> {
    let bundle_path = std::path::absolute(path)?;
    let contents_path = bundle_path.join(CONTENTS_DIR);
    let resources_path = contents_path.join(RESOURCES_DIR);
    debug!(?resources_path, "looking for Resources");

    if !probe.exists(&resources_path).await? {
        info!(?bundle_path, "Resources directory not found");
        return Ok(ClassificationResult::not_recognized(NO_RESOURCES_MESSAGE));
    }

    let icon_path = find_icon(probe, &resources_path).await?;

    let structure = DirectoryNode {
        name: file_name_of(&bundle_path),
        path: bundle_path.clone(),
        entry_type: EntryType::Directory,
        has_children: true,
        children: Some(list_one_level(&contents_path).await),
    };

    let archive_path = resources_path.join(ARCHIVE_NAME);
    let location = if probe.exists(&archive_path).await? {
        info!(?archive_path, "found app.asar");
        ArchiveLocation::Packed(archive_path)
    } else {
        let unpacked_path = resources_path.join(UNPACKED_DIR);
        if probe.exists(&unpacked_path).await? {
            info!(?unpacked_path, "found app.asar.unpacked");
            ArchiveLocation::Unpacked(unpacked_path)
        } else {
            info!(?bundle_path, "no asar files found");
            return Ok(ClassificationResult::not_recognized(NO_ARCHIVE_MESSAGE));
        }
    };

    Ok(ClassificationResult::Recognized(Box::new(RecognizedApp {
        location,
        app_name: app_name_of(&bundle_path),
        icon_path,
        structure,
    })))
}

async fn find_icon(probe: &dyn PathProbe, resources_path: &Path) -> Result<Option<PathBuf>> {
    for name in [RUNTIME_ICON, FALLBACK_ICON] {
        let candidate = resources_path.join(name);
        if probe.exists(&candidate).await? {
            return Ok(Some(candidate));
        }
    }
    Ok(None)
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Bundle file name with a trailing `.app` removed
pub fn app_name_of(bundle_path: &Path) -> String {
    let name = file_name_of(bundle_path);
    match name.strip_suffix(BUNDLE_SUFFIX) {
        Some(stripped) if !stripped.is_empty() => stripped.to_string(),
        _ => name,
    }
}
