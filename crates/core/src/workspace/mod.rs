//! Workspace management for conversion runs.
//!
//! The workspace is a pair of directories: the input directory, which is
//! scanned for source videos, and the output directory, which receives the
//! converted mp4 files. Both default to `./input` and `./output` relative to
//! the process working directory. This module creates the pair on startup
//! and enumerates the convertible files.
//!
//! # Example
//!
//! ```ignore
//! use convertino_core::workspace::{ensure_workspace, list_convertible_inputs, WorkspaceConfig};
//!
//! let config = WorkspaceConfig::default();
//! ensure_workspace(&config).await?;
//!
//! let inputs = list_convertible_inputs(&config.input_dir).await?;
//! println!("{} files to convert", inputs.len());
//! ```

mod config;
mod error;
mod scan;
mod setup;

pub use config::WorkspaceConfig;
pub use error::WorkspaceError;
pub use scan::{is_convertible, list_convertible_inputs, CONVERTIBLE_EXTENSIONS};
pub use setup::ensure_workspace;
