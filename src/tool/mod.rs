//! External asar decoder
//!
//! The `app.asar` format is never decoded in-process. This module provides a
//! trait-based seam over the program that does it:
//!
//! - [`CliAsarTool`]: runs the external `asar` binary
//! - [`NoOpAsarTool`]: refuses extraction when no decoder is available
//!
//! [`ensure_available`] probes the decoder before extraction and, when
//! configured, installs it.
//!
//! ## Usage
//!
//! ```no_run
//! use neutron::config::ToolsConfig;
//! use neutron::tool::{AsarTool, CliAsarTool};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let tool = CliAsarTool::from_config(&ToolsConfig::default());
//!     println!("using asar {}", tool.version().await?);
//!     Ok(())
//! }
//! ```

mod cli;
mod install;
mod noop;
mod traits;

pub use cli::{ASAR_PROGRAM, CliAsarTool};
pub use install::{ToolStatus, ensure_available};
pub use noop::NoOpAsarTool;
pub use traits::AsarTool;
