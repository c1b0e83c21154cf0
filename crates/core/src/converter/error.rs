//! Error types for the converter module.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while probing or converting.
#[derive(Debug, Error)]
pub enum ConverterError {
    /// FFmpeg binary not found.
    #[error("FFmpeg not found at path: {path}")]
    FfmpegNotFound { path: PathBuf },

    /// FFprobe binary not found.
    #[error("FFprobe not found at path: {path}")]
    FfprobeNotFound { path: PathBuf },

    /// Input file not found.
    #[error("Input file not found: {path}")]
    InputNotFound { path: PathBuf },

    /// Querying the engine for its encoder list failed.
    #[error("Failed to query encoder capabilities: {reason}")]
    CapabilityProbeFailed { reason: String },

    /// The engine lacks an encoder the fixed profile requires.
    #[error("Required encoder not available: {encoder}")]
    MissingEncoder { encoder: String },

    /// Output directory does not exist and could not be created.
    #[error("Failed to create output directory: {path}")]
    OutputDirectoryFailed { path: PathBuf },

    /// Conversion process failed.
    #[error("Conversion failed: {reason}")]
    ConversionFailed {
        reason: String,
        stderr: Option<String>,
    },

    /// Failed to probe media file.
    #[error("Failed to probe media file: {reason}")]
    ProbeFailed { reason: String },

    /// I/O error during conversion.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse FFprobe output.
    #[error("Failed to parse media info: {reason}")]
    ParseError { reason: String },
}

impl ConverterError {
    /// Creates a new conversion failed error with stderr output.
    pub fn conversion_failed(reason: impl Into<String>, stderr: Option<String>) -> Self {
        Self::ConversionFailed {
            reason: reason.into(),
            stderr,
        }
    }

    /// Creates a new probe failed error.
    pub fn probe_failed(reason: impl Into<String>) -> Self {
        Self::ProbeFailed {
            reason: reason.into(),
        }
    }

    /// Creates a new capability probe failed error.
    pub fn capability_probe_failed(reason: impl Into<String>) -> Self {
        Self::CapabilityProbeFailed {
            reason: reason.into(),
        }
    }

    /// Whether this error means the engine itself is unusable, as opposed to
    /// one input file being bad.
    pub fn is_engine_unavailable(&self) -> bool {
        matches!(
            self,
            Self::FfmpegNotFound { .. }
                | Self::FfprobeNotFound { .. }
                | Self::CapabilityProbeFailed { .. }
                | Self::MissingEncoder { .. }
        )
    }
}
