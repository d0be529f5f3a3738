//! Filesystem existence probes used by the classifier

use async_trait::async_trait;
use std::path::Path;

/// Existence check used for every classifier probe
///
/// The classifier never touches the filesystem for its probes except through
/// this trait, so a wrapping implementation can observe which paths were
/// checked and in what order.
#[async_trait]
pub trait PathProbe: Send + Sync {
    /// Whether `path` exists
    ///
    /// # Errors
    ///
    /// Returns the underlying error when existence cannot be determined
    /// (for example permission denied on a parent directory).
    async fn exists(&self, path: &Path) -> std::io::Result<bool>;
}

/// [`PathProbe`] backed by `tokio::fs`
#[derive(Debug, Clone, Copy, Default)]
pub struct FsProbe;

#[async_trait]
impl PathProbe for FsProbe {
    async fn exists(&self, path: &Path) -> std::io::Result<bool> {
        tokio::fs::try_exists(path).await
    }
}
