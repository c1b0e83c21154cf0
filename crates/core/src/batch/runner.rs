//! Sequential batch conversion runner.

use std::path::{Path, PathBuf};
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::converter::{
    ConversionJob, ConversionProgress, ConversionResult, Converter, ConverterError,
    EncodingProfile, OUTPUT_EXTENSION,
};
use crate::workspace::{ensure_workspace, list_convertible_inputs, WorkspaceConfig};

use super::summary::BatchSummary;

/// Drives a whole conversion run: engine validation, workspace setup, input
/// discovery and the sequential conversion of every discovered file.
pub struct BatchRunner<C: Converter> {
    workspace: WorkspaceConfig,
    profile: EncodingProfile,
    converter: C,
}

impl<C: Converter> BatchRunner<C> {
    /// Creates a runner with the default encoding profile.
    pub fn new(workspace: WorkspaceConfig, converter: C) -> Self {
        Self {
            workspace,
            profile: EncodingProfile::default(),
            converter,
        }
    }

    /// Replaces the encoding profile used for every conversion.
    pub fn with_profile(mut self, profile: EncodingProfile) -> Self {
        self.profile = profile;
        self
    }

    /// Derives the output path for an input file.
    ///
    /// The file keeps its base name and lands in the output directory with
    /// an mp4 extension, so `input/clip.webm` becomes `output/clip.mp4`.
    fn output_path_for(&self, input_path: &Path) -> PathBuf {
        let file_name = input_path
            .with_extension(OUTPUT_EXTENSION)
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();

        self.workspace.output_dir.join(file_name)
    }

    /// Converts a single input file, logging progress as it goes.
    async fn convert_one(&self, input_path: &Path) -> Result<ConversionResult, ConverterError> {
        let job = ConversionJob {
            input_path: input_path.to_path_buf(),
            output_path: self.output_path_for(input_path),
            profile: self.profile.clone(),
        };

        let file_name = input_path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        let (progress_tx, mut progress_rx) = mpsc::channel::<ConversionProgress>(32);

        let forwarder = tokio::spawn(async move {
            let mut next_info_percent = 10.0_f32;
            while let Some(progress) = progress_rx.recv().await {
                debug!(
                    "Converting {}: {:.1}% (speed {})",
                    file_name,
                    progress.percent,
                    progress.speed.as_deref().unwrap_or("?")
                );
                if progress.percent >= next_info_percent {
                    info!("Converting {}: {:.0}%", file_name, progress.percent);
                    next_info_percent = (progress.percent / 10.0).floor() * 10.0 + 10.0;
                }
            }
        });

        let result = self.converter.convert_with_progress(job, progress_tx).await;

        // The sender is gone once the conversion returns, so the forwarder
        // drains its channel and exits
        let _ = forwarder.await;

        result
    }

    /// Converts every convertible file in the input directory, one at a time.
    ///
    /// A failed file is recorded in the summary and does not stop the rest
    /// of the batch.
    pub async fn convert_all(&self) -> BatchSummary {
        let inputs = match list_convertible_inputs(&self.workspace.input_dir).await {
            Ok(inputs) => inputs,
            Err(e) => {
                warn!("{}", e);
                Vec::new()
            }
        };

        let mut summary = BatchSummary::default();

        if inputs.is_empty() {
            info!(
                "No convertible files found in {}",
                self.workspace.input_dir.display()
            );
            return summary;
        }

        info!("Found {} files to convert", inputs.len());

        for (idx, input_path) in inputs.iter().enumerate() {
            info!(
                "Converting file {} of {}: {}",
                idx + 1,
                inputs.len(),
                input_path.display()
            );

            match self.convert_one(input_path).await {
                Ok(result) => {
                    info!(
                        "Converted {} -> {} in {} ms",
                        result.input_path.display(),
                        result.output_path.display(),
                        result.duration_ms
                    );
                    summary.record_success(&result);
                }
                Err(e) => {
                    warn!("Failed to convert {}: {}", input_path.display(), e);
                    summary.record_failure(input_path.clone(), failure_message(&e));
                }
            }
        }

        summary
    }

    /// Runs a full batch.
    ///
    /// An unusable engine aborts the run before anything touches the
    /// filesystem. A workspace setup failure is reported but the run goes
    /// on, yielding an empty batch when the input directory is missing.
    pub async fn run(&self) -> Result<BatchSummary, ConverterError> {
        if let Err(e) = self.converter.validate().await {
            error!("Conversion engine unavailable: {}", e);
            return Err(e);
        }

        info!("Conversion engine ready: {}", self.converter.name());

        if let Err(e) = ensure_workspace(&self.workspace).await {
            warn!("{}", e);
        }

        let summary = self.convert_all().await;

        info!(
            "Batch finished: {} converted, {} failed",
            summary.success_count(),
            summary.failure_count()
        );
        for failure in &summary.failures {
            warn!("  {}: {}", failure.input_path.display(), failure.error);
        }

        Ok(summary)
    }
}

/// Builds the one-line failure message recorded in the summary.
///
/// For conversion failures the last line of captured ffmpeg output usually
/// names the actual problem, so it is appended to the exit status.
fn failure_message(error: &ConverterError) -> String {
    match error {
        ConverterError::ConversionFailed {
            stderr: Some(stderr),
            ..
        } => {
            let detail = stderr.lines().rev().find(|l| !l.trim().is_empty());
            match detail {
                Some(line) => format!("{} ({})", error, line.trim()),
                None => error.to_string(),
            }
        }
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MockConverter;
    use std::time::Duration;

    fn runner_with_dirs(input: &str, output: &str) -> BatchRunner<MockConverter> {
        let workspace = WorkspaceConfig::default()
            .with_input_dir(input)
            .with_output_dir(output);
        BatchRunner::new(workspace, MockConverter::new())
    }

    #[test]
    fn test_output_path_for() {
        let runner = runner_with_dirs("/media/input", "/media/output");

        assert_eq!(
            runner.output_path_for(Path::new("/media/input/clip.webm")),
            PathBuf::from("/media/output/clip.mp4")
        );
    }

    #[test]
    fn test_output_path_for_keeps_inner_dots() {
        let runner = runner_with_dirs("/media/input", "/media/output");

        // Only the final extension is replaced
        assert_eq!(
            runner.output_path_for(Path::new("/media/input/show.s01e02.mkv")),
            PathBuf::from("/media/output/show.s01e02.mp4")
        );
    }

    #[tokio::test]
    async fn test_with_profile_reaches_conversion_jobs() {
        let converter = MockConverter::new();
        converter.set_conversion_duration(Duration::ZERO).await;

        let workspace = WorkspaceConfig::default()
            .with_input_dir("/media/input")
            .with_output_dir("/media/output");
        let profile = EncodingProfile {
            preset: "slow".to_string(),
            crf: 18,
            ..EncodingProfile::default()
        };
        let runner = BatchRunner::new(workspace, converter.clone()).with_profile(profile.clone());

        runner
            .convert_one(Path::new("/media/input/clip.webm"))
            .await
            .unwrap();

        let conversions = converter.recorded_conversions().await;
        assert_eq!(conversions.len(), 1);
        assert_eq!(conversions[0].job.profile, profile);
    }

    #[test]
    fn test_failure_message_includes_stderr_detail() {
        let error = ConverterError::conversion_failed(
            "FFmpeg exited with code: Some(1)",
            Some("[matroska @ 0x1] Error while decoding: invalid frame\n".to_string()),
        );

        let message = failure_message(&error);
        assert!(message.contains("FFmpeg exited with code: Some(1)"));
        assert!(message.contains("invalid frame"));
    }

    #[test]
    fn test_failure_message_without_stderr() {
        let error = ConverterError::conversion_failed("Output file not created", None);

        assert_eq!(
            failure_message(&error),
            "Conversion failed: Output file not created"
        );
    }

    #[test]
    fn test_failure_message_other_error() {
        let error = ConverterError::MissingEncoder {
            encoder: "libx264".to_string(),
        };

        assert_eq!(failure_message(&error), error.to_string());
    }
}
