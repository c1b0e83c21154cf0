//! Workspace directory preparation.

use tokio::fs;

use super::config::WorkspaceConfig;
use super::error::WorkspaceError;

/// Creates the input and output directories if they do not exist.
///
/// Existing directories are left untouched together with their contents,
/// so this is safe to call on every run.
pub async fn ensure_workspace(config: &WorkspaceConfig) -> Result<(), WorkspaceError> {
    for dir in [&config.input_dir, &config.output_dir] {
        fs::create_dir_all(dir)
            .await
            .map_err(|e| WorkspaceError::CreateFailed {
                path: dir.clone(),
                source: e,
            })?;
    }

    Ok(())
}
