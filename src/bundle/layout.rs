//! Names of the directories and files inside an Electron `.app` bundle

/// Bundle subdirectory holding everything else
pub const CONTENTS_DIR: &str = "Contents";
/// `Contents` subdirectory holding the archive and icons
pub const RESOURCES_DIR: &str = "Resources";
/// Icon shipped by the Electron runtime
pub const RUNTIME_ICON: &str = "electron.icns";
/// Generic icon name, tried after [`RUNTIME_ICON`]
pub const FALLBACK_ICON: &str = "app.icns";
/// The resource archive
pub const ARCHIVE_NAME: &str = "app.asar";
/// Marker directory for content unpacked at build time
pub const UNPACKED_DIR: &str = "app.asar.unpacked";
/// Name the archive is renamed to while extracted
pub const BACKUP_NAME: &str = "original-app.asar";
/// Directory the archive is extracted into
pub const EXTRACT_DIR: &str = "app";
/// Suffix stripped from the bundle name to form the app name
pub const BUNDLE_SUFFIX: &str = ".app";
