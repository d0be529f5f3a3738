//! Trait for the external asar decoder

use async_trait::async_trait;
use std::path::Path;

/// Interface to the program that decodes `app.asar` archives
///
/// The archive format is never parsed in-process; implementations delegate to
/// an external executable or refuse the operation.
///
/// # Examples
///
/// ```no_run
/// use neutron::tool::{AsarTool, CliAsarTool};
/// use std::path::Path;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let tool = CliAsarTool::from_path().expect("asar not found in PATH");
/// println!("asar {}", tool.version().await?);
/// tool.extract(
///     Path::new("/Applications/Foo.app/Contents/Resources/app.asar"),
///     Path::new("/Applications/Foo.app/Contents/Resources/app"),
/// )
/// .await?;
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait AsarTool: Send + Sync {
    /// Report the decoder version
    ///
    /// Used as the availability probe before extraction.
    ///
    /// # Errors
    ///
    /// Returns an error if the decoder cannot be executed or exits non-zero.
    async fn version(&self) -> crate::Result<String>;

    /// Extract `archive` into the directory `dest`
    ///
    /// # Errors
    ///
    /// Returns an extraction failure carrying the decoder's error output if
    /// it cannot be executed or exits non-zero.
    async fn extract(&self, archive: &Path, dest: &Path) -> crate::Result<()>;

    /// Human-readable name for logging
    fn name(&self) -> &'static str;
}
