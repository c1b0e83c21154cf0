//! FFmpeg-based converter implementation.

use async_trait::async_trait;
use regex_lite::Regex;
use serde::Deserialize;
use std::path::Path;
use std::process::Stdio;
use std::time::{Duration, Instant};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::process::Command;
use tokio::sync::mpsc;

use super::capabilities::EncoderCapabilities;
use super::config::ConverterConfig;
use super::error::ConverterError;
use super::traits::Converter;
use super::types::{
    ConversionJob, ConversionProgress, ConversionResult, EncodingProfile, MediaInfo,
};

/// FFmpeg-based converter implementation.
pub struct FfmpegConverter {
    config: ConverterConfig,
}

impl FfmpegConverter {
    /// Creates a new FFmpeg converter with the given configuration.
    pub fn new(config: ConverterConfig) -> Self {
        Self { config }
    }

    /// Creates a converter with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(ConverterConfig::default())
    }

    /// Builds ffmpeg arguments for converting a video file to mp4.
    fn build_args(
        &self,
        input_path: &Path,
        output_path: &Path,
        profile: &EncodingProfile,
    ) -> Vec<String> {
        let mut args = vec![
            "-y".to_string(), // Overwrite output
            "-i".to_string(),
            input_path.to_string_lossy().to_string(),
        ];

        // Video codec and quality
        args.extend([
            "-c:v".to_string(),
            profile.video_codec.clone(),
            "-preset".to_string(),
            profile.preset.clone(),
            "-crf".to_string(),
            profile.crf.to_string(),
        ]);

        // Audio codec
        args.extend(["-c:a".to_string(), profile.audio_codec.clone()]);

        // Relocate the moov atom so playback can start before the whole
        // file has been read
        if profile.faststart {
            args.extend(["-movflags".to_string(), "+faststart".to_string()]);
        }

        // Log level and progress
        args.extend([
            "-loglevel".to_string(),
            self.config.ffmpeg_log_level.clone(),
            "-progress".to_string(),
            "pipe:2".to_string(),
        ]);

        // Extra args
        args.extend(self.config.extra_ffmpeg_args.iter().cloned());

        // Output
        args.push(output_path.to_string_lossy().to_string());

        args
    }

    /// Parses ffprobe JSON output into MediaInfo.
    fn parse_probe_output(path: &Path, output: &str) -> Result<MediaInfo, ConverterError> {
        #[derive(Deserialize)]
        struct ProbeOutput {
            format: ProbeFormat,
            streams: Vec<ProbeStream>,
        }

        #[derive(Deserialize)]
        struct ProbeFormat {
            format_name: String,
            duration: Option<String>,
            size: Option<String>,
        }

        #[derive(Deserialize)]
        struct ProbeStream {
            codec_type: String,
            codec_name: Option<String>,
            width: Option<u32>,
            height: Option<u32>,
            r_frame_rate: Option<String>,
        }

        let probe: ProbeOutput =
            serde_json::from_str(output).map_err(|e| ConverterError::ParseError {
                reason: format!("Failed to parse ffprobe output: {}", e),
            })?;

        let duration_secs = probe
            .format
            .duration
            .as_ref()
            .and_then(|d| d.parse::<f64>().ok())
            .unwrap_or(0.0);

        let size_bytes = probe
            .format
            .size
            .as_ref()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(0);

        // Find video stream
        let video_stream = probe.streams.iter().find(|s| s.codec_type == "video");

        // Find audio stream
        let audio_stream = probe.streams.iter().find(|s| s.codec_type == "audio");

        let format_name = probe
            .format
            .format_name
            .split(',')
            .next()
            .unwrap_or("unknown");

        Ok(MediaInfo {
            path: path.to_path_buf(),
            size_bytes,
            duration_secs,
            format: format_name.to_string(),
            video_codec: video_stream.and_then(|s| s.codec_name.clone()),
            video_width: video_stream.and_then(|s| s.width),
            video_height: video_stream.and_then(|s| s.height),
            video_fps: video_stream
                .and_then(|s| s.r_frame_rate.as_ref())
                .and_then(|r| {
                    // Parse frame rate like "24000/1001" or "30/1"
                    let parts: Vec<&str> = r.split('/').collect();
                    if parts.len() == 2 {
                        let num = parts[0].parse::<f32>().ok()?;
                        let den = parts[1].parse::<f32>().ok()?;
                        if den > 0.0 {
                            Some(num / den)
                        } else {
                            None
                        }
                    } else {
                        r.parse::<f32>().ok()
                    }
                }),
            audio_codec: audio_stream.and_then(|s| s.codec_name.clone()),
        })
    }

    /// Runs the conversion with optional progress reporting.
    ///
    /// The conversion runs for as long as ffmpeg needs. Large inputs are
    /// expected to take a while, so no deadline is applied.
    async fn run_conversion(
        &self,
        job: &ConversionJob,
        progress_tx: Option<mpsc::Sender<ConversionProgress>>,
    ) -> Result<ConversionResult, ConverterError> {
        let start = Instant::now();

        // Ensure output directory exists
        if let Some(parent) = job.output_path.parent() {
            tokio::fs::create_dir_all(parent).await.map_err(|_| {
                ConverterError::OutputDirectoryFailed {
                    path: parent.to_path_buf(),
                }
            })?;
        }

        // Get input duration for progress calculation
        let input_info = self.probe(&job.input_path).await.ok();
        let duration_secs = input_info.as_ref().map(|i| i.duration_secs);

        let args = self.build_args(&job.input_path, &job.output_path, &job.profile);
        tracing::debug!("{} {}", self.config.ffmpeg_path.display(), args.join(" "));

        // Run ffmpeg
        let mut child = Command::new(&self.config.ffmpeg_path)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    ConverterError::FfmpegNotFound {
                        path: self.config.ffmpeg_path.clone(),
                    }
                } else {
                    ConverterError::Io(e)
                }
            })?;

        let stderr = child.stderr.take().expect("stderr should be captured");
        let mut reader = BufReader::new(stderr).lines();

        // Track progress
        let mut current_time = 0.0;
        let mut current_speed = None;
        let time_regex = Regex::new(r"out_time_ms=(\d+)").ok();
        let speed_regex = Regex::new(r"speed=(\d+\.?\d*)x").ok();

        let mut last_progress_send = Instant::now();
        let progress_interval = Duration::from_secs(2);
        let mut error_output = String::new();

        // Read progress from stderr
        while let Ok(Some(line)) = reader.next_line().await {
            // Capture error output
            if line.contains("Error") || line.contains("error") {
                error_output.push_str(&line);
                error_output.push('\n');
            }

            // Parse progress
            if let Some(ref re) = time_regex {
                if let Some(caps) = re.captures(&line) {
                    if let Some(ms_str) = caps.get(1) {
                        if let Ok(ms) = ms_str.as_str().parse::<f64>() {
                            current_time = ms / 1_000_000.0; // Convert microseconds to seconds
                        }
                    }
                }
            }

            if let Some(ref re) = speed_regex {
                if let Some(caps) = re.captures(&line) {
                    if let Some(speed_str) = caps.get(1) {
                        current_speed = Some(format!("{}x", speed_str.as_str()));
                    }
                }
            }

            // Send progress update
            if let Some(ref tx) = progress_tx {
                if last_progress_send.elapsed() >= progress_interval {
                    let progress = ConversionProgress {
                        input_path: job.input_path.clone(),
                        percent: progress_percent(current_time, duration_secs),
                        time_secs: current_time,
                        duration_secs,
                        speed: current_speed.clone(),
                    };

                    // Non-blocking send
                    let _ = tx.try_send(progress);
                    last_progress_send = Instant::now();
                }
            }
        }

        // Wait for process to complete
        let status = child.wait().await?;

        if !status.success() {
            return Err(ConverterError::conversion_failed(
                format!("FFmpeg exited with code: {:?}", status.code()),
                if error_output.is_empty() {
                    None
                } else {
                    Some(error_output)
                },
            ));
        }

        // Verify output exists and get size
        let output_meta = tokio::fs::metadata(&job.output_path)
            .await
            .map_err(|_| ConverterError::conversion_failed("Output file not created", None))?;

        Ok(ConversionResult {
            input_path: job.input_path.clone(),
            output_path: job.output_path.clone(),
            output_size_bytes: output_meta.len(),
            duration_ms: start.elapsed().as_millis() as u64,
        })
    }
}

#[async_trait]
impl Converter for FfmpegConverter {
    fn name(&self) -> &str {
        "ffmpeg"
    }

    async fn probe(&self, path: &Path) -> Result<MediaInfo, ConverterError> {
        if !path.exists() {
            return Err(ConverterError::InputNotFound {
                path: path.to_path_buf(),
            });
        }

        let output = Command::new(&self.config.ffprobe_path)
            .args([
                "-v",
                "quiet",
                "-print_format",
                "json",
                "-show_format",
                "-show_streams",
            ])
            .arg(path)
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    ConverterError::FfprobeNotFound {
                        path: self.config.ffprobe_path.clone(),
                    }
                } else {
                    ConverterError::Io(e)
                }
            })?;

        if !output.status.success() {
            return Err(ConverterError::probe_failed(format!(
                "ffprobe failed: {}",
                String::from_utf8_lossy(&output.stderr)
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Self::parse_probe_output(path, &stdout)
    }

    async fn convert(&self, job: ConversionJob) -> Result<ConversionResult, ConverterError> {
        self.run_conversion(&job, None).await
    }

    async fn convert_with_progress(
        &self,
        job: ConversionJob,
        progress_tx: mpsc::Sender<ConversionProgress>,
    ) -> Result<ConversionResult, ConverterError> {
        self.run_conversion(&job, Some(progress_tx)).await
    }

    async fn validate(&self) -> Result<(), ConverterError> {
        // Check ffmpeg exists and carries the encoders the profile needs
        let capabilities = EncoderCapabilities::detect(&self.config).await?;
        if !capabilities.h264 {
            return Err(ConverterError::MissingEncoder {
                encoder: "libx264".to_string(),
            });
        }
        if !capabilities.aac {
            return Err(ConverterError::MissingEncoder {
                encoder: "aac".to_string(),
            });
        }

        // Check ffprobe exists
        let ffprobe_result = Command::new(&self.config.ffprobe_path)
            .arg("-version")
            .output()
            .await;

        if let Err(e) = ffprobe_result {
            if e.kind() == std::io::ErrorKind::NotFound {
                return Err(ConverterError::FfprobeNotFound {
                    path: self.config.ffprobe_path.clone(),
                });
            }
            return Err(ConverterError::capability_probe_failed(format!(
                "{} could not be started: {}",
                self.config.ffprobe_path.display(),
                e
            )));
        }

        Ok(())
    }
}

/// Progress percentage for a position in the stream, 0 when the input
/// duration is unknown.
fn progress_percent(current_time: f64, duration_secs: Option<f64>) -> f32 {
    match duration_secs {
        Some(dur) if dur > 0.0 => (current_time / dur * 100.0).min(100.0) as f32,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use tempfile::TempDir;

    #[test]
    fn test_build_args_default_profile() {
        let converter = FfmpegConverter::with_defaults();
        let profile = EncodingProfile::default();

        let args = converter.build_args(
            Path::new("/input/clip.webm"),
            Path::new("/output/clip.mp4"),
            &profile,
        );

        assert_eq!(args[0], "-y");
        assert!(args.contains(&"-c:v".to_string()));
        assert!(args.contains(&"libx264".to_string()));
        assert!(args.contains(&"-preset".to_string()));
        assert!(args.contains(&"medium".to_string()));
        assert!(args.contains(&"-crf".to_string()));
        assert!(args.contains(&"23".to_string()));
        assert!(args.contains(&"-c:a".to_string()));
        assert!(args.contains(&"aac".to_string()));
        assert!(args.contains(&"-movflags".to_string()));
        assert!(args.contains(&"+faststart".to_string()));
        assert_eq!(args.last(), Some(&"/output/clip.mp4".to_string()));
    }

    #[test]
    fn test_build_args_without_faststart() {
        let converter = FfmpegConverter::with_defaults();
        let profile = EncodingProfile {
            faststart: false,
            ..EncodingProfile::default()
        };

        let args = converter.build_args(
            Path::new("/input/clip.mkv"),
            Path::new("/output/clip.mp4"),
            &profile,
        );

        assert!(!args.contains(&"-movflags".to_string()));
        assert!(!args.contains(&"+faststart".to_string()));
    }

    #[test]
    fn test_build_args_extra_args() {
        let config = ConverterConfig {
            extra_ffmpeg_args: vec!["-threads".to_string(), "2".to_string()],
            ..ConverterConfig::default()
        };
        let converter = FfmpegConverter::new(config);

        let args = converter.build_args(
            Path::new("/input/clip.avi"),
            Path::new("/output/clip.mp4"),
            &EncodingProfile::default(),
        );

        assert!(args.contains(&"-threads".to_string()));
        assert!(args.contains(&"2".to_string()));
        // Extra args come before the output path
        assert_eq!(args.last(), Some(&"/output/clip.mp4".to_string()));
    }

    #[test]
    fn test_parse_probe_output_video() {
        let json = r#"{
            "format": {
                "filename": "test.mkv",
                "format_name": "matroska,webm",
                "duration": "7200.0",
                "size": "5000000000"
            },
            "streams": [
                {
                    "codec_type": "video",
                    "codec_name": "h264",
                    "width": 1920,
                    "height": 1080,
                    "r_frame_rate": "24000/1001"
                },
                {
                    "codec_type": "audio",
                    "codec_name": "aac",
                    "sample_rate": "48000",
                    "channels": 6
                }
            ]
        }"#;

        let info = FfmpegConverter::parse_probe_output(Path::new("test.mkv"), json).unwrap();
        assert_eq!(info.format, "matroska");
        assert!((info.duration_secs - 7200.0).abs() < 0.01);
        assert_eq!(info.size_bytes, 5000000000);
        assert_eq!(info.video_codec, Some("h264".to_string()));
        assert_eq!(info.video_width, Some(1920));
        assert_eq!(info.video_height, Some(1080));
        // 24000/1001 ≈ 23.976
        assert!(info.video_fps.is_some());
        let fps = info.video_fps.unwrap();
        assert!((fps - 23.976).abs() < 0.01);
        assert_eq!(info.audio_codec, Some("aac".to_string()));
    }

    #[test]
    fn test_parse_probe_output_missing_duration() {
        let json = r#"{
            "format": {
                "filename": "stream.webm",
                "format_name": "webm"
            },
            "streams": [
                {
                    "codec_type": "video",
                    "codec_name": "vp9",
                    "width": 640,
                    "height": 480,
                    "r_frame_rate": "30/1"
                }
            ]
        }"#;

        let info = FfmpegConverter::parse_probe_output(Path::new("stream.webm"), json).unwrap();
        assert_eq!(info.duration_secs, 0.0);
        assert_eq!(info.size_bytes, 0);
        assert_eq!(info.video_fps, Some(30.0));
        assert_eq!(info.audio_codec, None);
    }

    #[test]
    fn test_parse_probe_output_invalid_json() {
        let result = FfmpegConverter::parse_probe_output(Path::new("bad.mkv"), "not json");
        assert!(matches!(result, Err(ConverterError::ParseError { .. })));
    }

    #[test]
    fn test_progress_percent_midway() {
        assert_eq!(progress_percent(90.0, Some(180.0)), 50.0);
    }

    #[test]
    fn test_progress_percent_clamps_at_end() {
        assert_eq!(progress_percent(200.0, Some(180.0)), 100.0);
    }

    #[test]
    fn test_progress_percent_unknown_duration() {
        assert_eq!(progress_percent(90.0, None), 0.0);
        assert_eq!(progress_percent(90.0, Some(0.0)), 0.0);
    }

    /// Writes an executable shell script standing in for the ffmpeg binary.
    #[cfg(unix)]
    fn stub_engine(dir: &Path, body: &str) -> PathBuf {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join("ffmpeg");
        std::fs::write(&path, body).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o755)).unwrap();
        path
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_convert_succeeds_when_probing_fails() {
        let temp = TempDir::new().unwrap();
        // The stub touches its last argument, which is the output path
        let engine = stub_engine(
            temp.path(),
            "#!/bin/sh\nfor last; do :; done\n: > \"$last\"\n",
        );
        let input = temp.path().join("clip.webm");
        std::fs::write(&input, b"fake video data").unwrap();

        let config = ConverterConfig::with_paths(engine, temp.path().join("missing-ffprobe"));
        let converter = FfmpegConverter::new(config);
        let job = ConversionJob {
            input_path: input.clone(),
            output_path: temp.path().join("out").join("clip.mp4"),
            profile: EncodingProfile::default(),
        };

        let result = converter.convert(job).await.unwrap();
        assert_eq!(result.input_path, input);
        assert!(result.output_path.exists());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_convert_captures_engine_failure() {
        let temp = TempDir::new().unwrap();
        let engine = stub_engine(
            temp.path(),
            "#!/bin/sh\necho \"Error: invalid frame\" >&2\nexit 1\n",
        );
        let input = temp.path().join("clip.webm");
        std::fs::write(&input, b"fake video data").unwrap();

        let config = ConverterConfig::with_paths(engine, temp.path().join("missing-ffprobe"));
        let converter = FfmpegConverter::new(config);
        let job = ConversionJob {
            input_path: input,
            output_path: temp.path().join("out").join("clip.mp4"),
            profile: EncodingProfile::default(),
        };

        let err = converter.convert(job).await.unwrap_err();
        match err {
            ConverterError::ConversionFailed { reason, stderr } => {
                assert!(reason.contains("exited with code"));
                assert!(stderr.unwrap().contains("invalid frame"));
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
