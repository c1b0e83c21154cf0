//! Configuration for the workspace module.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for the workspace directories.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkspaceConfig {
    /// Directory scanned for source videos.
    #[serde(default = "default_input_dir")]
    pub input_dir: PathBuf,

    /// Directory the converted mp4 files are written to.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_input_dir() -> PathBuf {
    PathBuf::from("./input")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("./output")
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            input_dir: default_input_dir(),
            output_dir: default_output_dir(),
        }
    }
}

impl WorkspaceConfig {
    /// Sets the input directory.
    pub fn with_input_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.input_dir = dir.into();
        self
    }

    /// Sets the output directory.
    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }
}
