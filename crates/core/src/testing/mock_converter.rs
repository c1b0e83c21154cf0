//! Mock converter for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, RwLock};

use crate::converter::{
    ConversionJob, ConversionProgress, ConversionResult, Converter, ConverterError, MediaInfo,
};

/// A recorded conversion job for test assertions.
#[derive(Debug, Clone)]
pub struct RecordedConversion {
    /// The job that was submitted.
    pub job: ConversionJob,
    /// Whether the conversion succeeded.
    pub success: bool,
}

/// Mock implementation of the Converter trait.
///
/// Provides controllable behavior for testing:
/// - Track conversion jobs for assertions
/// - Simulate success/failure, globally or per input path
/// - Control probe results
/// - Simulate progress updates
///
/// Clones share their state, so a clone kept outside the code under test
/// observes everything the original records.
///
/// # Example
///
/// ```rust,ignore
/// use convertino_core::testing::MockConverter;
///
/// let converter = MockConverter::new();
///
/// // Make one specific file fail
/// converter.fail_path("/input/broken.mkv", "invalid frame").await;
///
/// // Convert
/// let result = converter.convert(job).await?;
///
/// // Check what was converted
/// let conversions = converter.recorded_conversions().await;
/// assert_eq!(conversions.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct MockConverter {
    /// Recorded conversions.
    conversions: Arc<RwLock<Vec<RecordedConversion>>>,
    /// Pre-configured probe results by path.
    probe_results: Arc<RwLock<HashMap<PathBuf, MediaInfo>>>,
    /// If set, the next operation will fail with this error.
    next_error: Arc<RwLock<Option<ConverterError>>>,
    /// Input paths whose conversion always fails, with the failure reason.
    fail_paths: Arc<RwLock<HashMap<PathBuf, String>>>,
    /// Simulated conversion duration in milliseconds.
    conversion_duration_ms: Arc<RwLock<u64>>,
    /// Whether to send progress updates during conversion.
    send_progress: Arc<RwLock<bool>>,
    /// Default media info for probing unknown files.
    default_media_info: Arc<RwLock<Option<MediaInfo>>>,
}

impl Default for MockConverter {
    fn default() -> Self {
        Self::new()
    }
}

impl MockConverter {
    /// Create a new mock converter.
    pub fn new() -> Self {
        Self {
            conversions: Arc::new(RwLock::new(Vec::new())),
            probe_results: Arc::new(RwLock::new(HashMap::new())),
            next_error: Arc::new(RwLock::new(None)),
            fail_paths: Arc::new(RwLock::new(HashMap::new())),
            conversion_duration_ms: Arc::new(RwLock::new(100)),
            send_progress: Arc::new(RwLock::new(true)),
            default_media_info: Arc::new(RwLock::new(None)),
        }
    }

    /// Get all recorded conversions.
    pub async fn recorded_conversions(&self) -> Vec<RecordedConversion> {
        self.conversions.read().await.clone()
    }

    /// Clear recorded conversions.
    pub async fn clear_recorded(&self) {
        self.conversions.write().await.clear();
    }

    /// Get the number of conversions performed.
    pub async fn conversion_count(&self) -> usize {
        self.conversions.read().await.len()
    }

    /// Set a probe result for a specific path.
    pub async fn set_probe_result(&self, path: impl AsRef<Path>, info: MediaInfo) {
        self.probe_results
            .write()
            .await
            .insert(path.as_ref().to_path_buf(), info);
    }

    /// Set the default media info for probing unknown files.
    pub async fn set_default_media_info(&self, info: MediaInfo) {
        *self.default_media_info.write().await = Some(info);
    }

    /// Clear all probe results.
    pub async fn clear_probe_results(&self) {
        self.probe_results.write().await.clear();
    }

    /// Configure the next operation to fail with the given error.
    pub async fn set_next_error(&self, error: ConverterError) {
        *self.next_error.write().await = Some(error);
    }

    /// Clear any pending error.
    pub async fn clear_next_error(&self) {
        *self.next_error.write().await = None;
    }

    /// Make every conversion of the given input path fail.
    pub async fn fail_path(&self, path: impl AsRef<Path>, reason: impl Into<String>) {
        self.fail_paths
            .write()
            .await
            .insert(path.as_ref().to_path_buf(), reason.into());
    }

    /// Set the simulated conversion duration.
    pub async fn set_conversion_duration(&self, duration: Duration) {
        *self.conversion_duration_ms.write().await = duration.as_millis() as u64;
    }

    /// Enable or disable progress updates during conversion.
    pub async fn set_send_progress(&self, send: bool) {
        *self.send_progress.write().await = send;
    }

    /// Take the next error if set.
    async fn take_error(&self) -> Option<ConverterError> {
        self.next_error.write().await.take()
    }

    /// Create a default MediaInfo for testing.
    fn create_default_info(path: &Path) -> MediaInfo {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("unknown");

        MediaInfo {
            path: path.to_path_buf(),
            size_bytes: 100 * 1024 * 1024, // 100 MB
            duration_secs: 7200.0,
            format: extension.to_string(),
            video_codec: Some("h264".to_string()),
            video_width: Some(1920),
            video_height: Some(1080),
            video_fps: Some(24.0),
            audio_codec: Some("aac".to_string()),
        }
    }
}

#[async_trait]
impl Converter for MockConverter {
    fn name(&self) -> &str {
        "mock"
    }

    async fn probe(&self, path: &Path) -> Result<MediaInfo, ConverterError> {
        if let Some(err) = self.take_error().await {
            return Err(err);
        }

        // Check for pre-configured result
        if let Some(info) = self.probe_results.read().await.get(path) {
            return Ok(info.clone());
        }

        // Check for default media info
        if let Some(info) = self.default_media_info.read().await.as_ref() {
            let mut info = info.clone();
            info.path = path.to_path_buf();
            return Ok(info);
        }

        // Generate default info based on path
        Ok(Self::create_default_info(path))
    }

    async fn convert(&self, job: ConversionJob) -> Result<ConversionResult, ConverterError> {
        if let Some(err) = self.take_error().await {
            self.conversions.write().await.push(RecordedConversion {
                job,
                success: false,
            });
            return Err(err);
        }

        // Check for a scripted per-path failure
        if let Some(reason) = self.fail_paths.read().await.get(&job.input_path).cloned() {
            self.conversions.write().await.push(RecordedConversion {
                job,
                success: false,
            });
            return Err(ConverterError::conversion_failed(reason, None));
        }

        // Record the conversion
        self.conversions.write().await.push(RecordedConversion {
            job: job.clone(),
            success: true,
        });

        // Simulate conversion time
        let duration_ms = *self.conversion_duration_ms.read().await;
        if duration_ms > 0 {
            tokio::time::sleep(Duration::from_millis(duration_ms)).await;
        }

        Ok(ConversionResult {
            input_path: job.input_path,
            output_path: job.output_path,
            output_size_bytes: 50 * 1024 * 1024, // 50 MB (compressed)
            duration_ms,
        })
    }

    async fn convert_with_progress(
        &self,
        job: ConversionJob,
        progress_tx: mpsc::Sender<ConversionProgress>,
    ) -> Result<ConversionResult, ConverterError> {
        let send_progress = *self.send_progress.read().await;
        let duration_ms = *self.conversion_duration_ms.read().await;

        if send_progress && duration_ms > 0 {
            let input_path = job.input_path.clone();

            // Send progress updates
            let steps = 5;
            let step_duration = duration_ms / steps;

            for i in 0..steps {
                let percent = ((i + 1) as f32 / steps as f32) * 100.0;
                let _ = progress_tx
                    .send(ConversionProgress {
                        input_path: input_path.clone(),
                        percent,
                        time_secs: (i as f64 + 1.0) * (step_duration as f64 / 1000.0),
                        duration_secs: Some(duration_ms as f64 / 1000.0),
                        speed: Some("10x".to_string()),
                    })
                    .await;

                tokio::time::sleep(Duration::from_millis(step_duration)).await;
            }
        }

        self.convert(job).await
    }

    async fn validate(&self) -> Result<(), ConverterError> {
        if let Some(err) = self.take_error().await {
            return Err(err);
        }
        Ok(())
    }
}
