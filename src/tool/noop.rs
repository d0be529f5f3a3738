//! No-op decoder for graceful degradation

use super::traits::AsarTool;
use async_trait::async_trait;
use std::path::Path;

/// No-op decoder used when archive extraction is unavailable
///
/// Classification and directory listing keep working; extraction returns
/// `Error::NotSupported` and leaves the archive untouched.
///
/// # Examples
///
/// ```
/// use neutron::tool::{AsarTool, NoOpAsarTool};
/// use std::path::Path;
///
/// # #[tokio::main]
/// # async fn main() {
/// let tool = NoOpAsarTool;
/// assert!(tool.version().await.is_err());
/// assert!(tool.extract(Path::new("app.asar"), Path::new("app")).await.is_err());
/// # }
/// ```
pub struct NoOpAsarTool;

#[async_trait]
impl AsarTool for NoOpAsarTool {
    async fn version(&self) -> crate::Result<String> {
        Err(crate::Error::NotSupported(
            "asar extraction requires the external asar binary. \
             Configure asar_path in config or ensure asar is in PATH."
                .into(),
        ))
    }

    async fn extract(&self, _archive: &Path, _dest: &Path) -> crate::Result<()> {
        Err(crate::Error::NotSupported(
            "asar extraction requires the external asar binary. \
             Configure asar_path in config or ensure asar is in PATH."
                .into(),
        ))
    }

    fn name(&self) -> &'static str {
        "noop"
    }
}
