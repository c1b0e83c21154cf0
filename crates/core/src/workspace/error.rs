//! Error types for the workspace module.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while preparing or scanning the workspace.
#[derive(Debug, Error)]
pub enum WorkspaceError {
    /// Failed to create a workspace directory.
    #[error("Failed to create directory: {path}")]
    CreateFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to read the input directory.
    #[error("Failed to read directory: {path}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
