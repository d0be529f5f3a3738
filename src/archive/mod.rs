//! Archive extraction and restore
//!
//! Extraction delegates decoding to an [`AsarTool`](crate::tool::AsarTool)
//! and then renames the archive aside:
//!
//! ```text
//! Resources/app.asar            -> Resources/original-app.asar
//!                                  Resources/app/   (decoded contents)
//! ```
//!
//! Restore renames the backup back to `app.asar` and removes `app/`.

mod manager;
mod paths;


pub use manager::ArchiveManager;
pub use paths::ArchivePaths;
