//! The `Neutron` facade
//!
//! Owns configuration, the decoder, the lease table and the event channel,
//! and exposes the four boundary operations:
//!
//! | Operation | Input | Output |
//! |---|---|---|
//! | [`Neutron::classify`] | bundle path | [`ClassificationResult`] |
//! | [`Neutron::list_directory`] | directory path | `Vec<DirectoryNode>` |
//! | [`Neutron::extract`] | archive path | [`ExtractOutcome`] |
//! | [`Neutron::restore`] | backup path | [`RestoreOutcome`] |
//!
//! None of the boundary operations return `Err`; failures are carried in
//! the result shapes.


use crate::archive::ArchiveManager;
use crate::bundle;
use crate::config::{Config, ToolsConfig};
use crate::error::Result;
use crate::snapshot;
use crate::tool::{AsarTool, CliAsarTool, NoOpAsarTool};
use crate::types::{
    ClassificationResult, DirectoryNode, Event, ExtractOutcome, ExtractionState, RestoreOutcome,
};
use std::path::Path;
use std::sync::Arc;
use tokio::sync::broadcast;

/// Electron bundle inspector (cloneable, all fields are shared)
#[derive(Clone)]
pub struct Neutron {
    /// Configuration
    config: Arc<Config>,
    /// Event broadcast channel sender (multiple subscribers supported)
    event_tx: broadcast::Sender<Event>,
    /// Extract/restore executor
    archives: ArchiveManager,
}

impl Neutron {
    /// Create an inspector using the decoder described by `config.tools`
    ///
    /// An explicit `asar_path` is always used. Otherwise the decoder is looked
    /// up on `PATH`; if it is not there and auto-install is enabled the bare
    /// program name is used so the installed binary is picked up later. With
    /// auto-install disabled and no binary found, extraction is unsupported.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`](crate::Error::Config) if the configuration is invalid.
    pub fn new(config: Config) -> Result<Self> {
        config.validate()?;
        let tool = select_tool(&config.tools);
        tracing::info!(tool = tool.name(), "Decoder initialized");
        Ok(Self::build(config, tool))
    }

    /// Create an inspector with an injected decoder
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`](crate::Error::Config) if the configuration is invalid.
    pub fn with_tool(config: Config, tool: Arc<dyn AsarTool>) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config, tool))
    }

    fn build(config: Config, tool: Arc<dyn AsarTool>) -> Self {
        let (event_tx, _rx) = broadcast::channel(config.event_channel_capacity);
        let archives = ArchiveManager::new(tool, config.tools.clone(), event_tx.clone());
        Self {
            config: Arc::new(config),
            event_tx,
            archives,
        }
    }

    /// Subscribe to operation events
    ///
    /// Each subscriber receives every event sent after it subscribed. One that
    /// falls more than `event_channel_capacity` events behind receives
    /// `RecvError::Lagged`.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use neutron::{Config, Neutron};
    /// use std::path::Path;
    ///
    /// #[tokio::main]
    /// async fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let neutron = Neutron::new(Config::default())?;
    ///
    ///     let mut events = neutron.subscribe();
    ///     tokio::spawn(async move {
    ///         while let Ok(event) = events.recv().await {
    ///             println!("{:?}", event);
    ///         }
    ///     });
    ///
    ///     neutron.classify(Path::new("/Applications/Foo.app")).await;
    ///     Ok(())
    /// }
    /// ```
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.event_tx.subscribe()
    }

    /// Get the configuration
    pub fn config(&self) -> Arc<Config> {
        Arc::clone(&self.config)
    }

    /// Decide whether `path` is an Electron bundle
    pub async fn classify(&self, path: &Path) -> ClassificationResult {
        let result = bundle::classify(path).await;
        self.event_tx
            .send(Event::Classified {
                path: path.to_path_buf(),
                recognized: result.is_recognized(),
            })
            .ok();
        result
    }

    /// List the immediate children of `dir`
    ///
    /// Unreadable directories yield an empty listing.
    pub async fn list_directory(&self, dir: &Path) -> Vec<DirectoryNode> {
        snapshot::list_one_level(dir).await
    }

    /// Extract `archive_path`, reporting the outcome as a boundary shape
    pub async fn extract(&self, archive_path: &Path) -> ExtractOutcome {
        match self.extract_archive(archive_path).await {
            Ok(state) => ExtractOutcome::succeeded(&state),
            Err(e) => ExtractOutcome::failed(&e),
        }
    }

    /// Restore the backup at `original_path`, reporting the outcome as a boundary shape
    pub async fn restore(&self, original_path: &Path) -> RestoreOutcome {
        match self.restore_archive(original_path).await {
            Ok(()) => RestoreOutcome::succeeded(),
            Err(e) => RestoreOutcome::failed(&e),
        }
    }

    /// Extract `archive_path` into its sibling `app` directory
    ///
    /// See [`ArchiveManager::extract`] for the error cases.
    pub async fn extract_archive(&self, archive_path: &Path) -> Result<ExtractionState> {
        self.archives.extract(archive_path).await
    }

    /// Put the backup at `original_path` back to `app.asar`
    ///
    /// See [`ArchiveManager::restore`] for the error cases.
    pub async fn restore_archive(&self, original_path: &Path) -> Result<()> {
        self.archives.restore(original_path).await
    }
}

fn select_tool(tools: &ToolsConfig) -> Arc<dyn AsarTool> {
    if tools.asar_path.is_some() || tools.auto_install {
        // Explicit path, PATH hit, or a bare name the installer will provide
        Arc::new(CliAsarTool::from_config(tools))
    } else if tools.search_path {
        CliAsarTool::from_path()
            .map(|t| Arc::new(t) as Arc<dyn AsarTool>)
            .unwrap_or_else(|| Arc::new(NoOpAsarTool))
    } else {
        Arc::new(NoOpAsarTool)
    }
}
