//! Encoder capability detection.

use serde::{Deserialize, Serialize};
use std::process::Stdio;
use tokio::process::Command;

use super::config::ConverterConfig;
use super::error::ConverterError;

/// Encoders advertised by the installed FFmpeg build.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EncoderCapabilities {
    /// x264 software H.264 encoder available.
    pub h264: bool,
    /// Native AAC audio encoder available.
    pub aac: bool,
}

impl EncoderCapabilities {
    /// Detects available encoders by querying `ffmpeg -encoders`.
    ///
    /// This query is also the engine availability probe: a missing or broken
    /// ffmpeg binary surfaces here, before any other work happens.
    pub async fn detect(config: &ConverterConfig) -> Result<Self, ConverterError> {
        let output = Command::new(&config.ffmpeg_path)
            .args(["-encoders"])
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::null())
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    ConverterError::FfmpegNotFound {
                        path: config.ffmpeg_path.clone(),
                    }
                } else {
                    ConverterError::capability_probe_failed(format!(
                        "{} could not be started: {}",
                        config.ffmpeg_path.display(),
                        e
                    ))
                }
            })?;

        if !output.status.success() {
            return Err(ConverterError::capability_probe_failed(format!(
                "ffmpeg -encoders exited with code: {:?}",
                output.status.code()
            )));
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(Self::from_encoder_list(&stdout))
    }

    /// Parses the encoder listing. Each entry line is a flag column followed
    /// by the encoder name and a description.
    fn from_encoder_list(stdout: &str) -> Self {
        let has = |name: &str| {
            stdout
                .lines()
                .any(|line| line.split_whitespace().nth(1) == Some(name))
        };

        Self {
            h264: has("libx264"),
            aac: has("aac"),
        }
    }

    /// Whether the fixed H.264/AAC output profile can be produced.
    pub fn supports_h264_aac(&self) -> bool {
        self.h264 && self.aac
    }
}
