//! Trait definitions for the converter module.

use async_trait::async_trait;
use std::path::Path;
use tokio::sync::mpsc;

use super::error::ConverterError;
use super::types::{ConversionJob, ConversionProgress, ConversionResult, MediaInfo};

/// A converter that can transcode video files.
#[async_trait]
pub trait Converter: Send + Sync {
    /// Returns the name of this converter implementation.
    fn name(&self) -> &str;

    /// Probes a media file to get its information.
    async fn probe(&self, path: &Path) -> Result<MediaInfo, ConverterError>;

    /// Converts a video file according to the job specification.
    async fn convert(&self, job: ConversionJob) -> Result<ConversionResult, ConverterError>;

    /// Converts a video file with progress reporting.
    ///
    /// The progress sender will receive updates during conversion.
    /// If the sender is dropped, conversion continues without progress reporting.
    async fn convert_with_progress(
        &self,
        job: ConversionJob,
        progress_tx: mpsc::Sender<ConversionProgress>,
    ) -> Result<ConversionResult, ConverterError>;

    /// Validates that the engine is installed and carries the encoders the
    /// fixed profile requires.
    ///
    /// This has no side effects. A failure here means no conversion can
    /// succeed, so callers abort before touching the filesystem.
    async fn validate(&self) -> Result<(), ConverterError>;
}
