//! # neutron
//!
//! Inspect macOS application bundles built on Electron and unpack their
//! `app.asar` archive for reading.
//!
//! ## Design Philosophy
//!
//! neutron is designed to be:
//! - **Stateless** - All durable state is the bundle on disk
//! - **Non-destructive** - A failed extraction never touches the archive
//! - **Library-first** - The `neutron` binary is a thin front end over [`Neutron`]
//! - **Event-driven** - Consumers subscribe to events, no polling required
//!
//! ## Quick Start
//!
//! ```no_run
//! use neutron::{Config, Neutron};
//! use std::path::Path;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let neutron = Neutron::new(Config::default())?;
//!
//!     let result = neutron.classify(Path::new("/Applications/Foo.app")).await;
//!     if let Some(app) = result.recognized() {
//!         println!("{} is an Electron app", app.app_name);
//!         if let Some(archive) = app.archive_path() {
//!             let state = neutron.extract_archive(archive).await?;
//!             println!("sources in {}", state.extracted_path.display());
//!             neutron.restore_archive(&state.original_path).await?;
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// Archive extraction and restore
pub mod archive;
/// Bundle classification
pub mod bundle;
/// Configuration types
pub mod config;
/// Error types
pub mod error;
/// The `Neutron` facade
pub mod inspector;
/// Per-bundle operation leases
pub mod lease;
/// One-level directory listings
pub mod snapshot;
/// External asar decoder
pub mod tool;
/// Core types and events
pub mod types;

// Re-export commonly used types
pub use archive::ArchiveManager;
pub use config::{Config, ToolsConfig};
pub use error::{ArchiveError, Error, Result};
pub use inspector::Neutron;
pub use tool::{AsarTool, CliAsarTool, NoOpAsarTool};
pub use types::{
    ArchiveLocation, ClassificationResult, DirectoryNode, EntryType, Event, ExtractOutcome,
    ExtractionState, RecognizedApp, RestoreOutcome,
};
