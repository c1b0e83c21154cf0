//! Types for the converter module.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// File extension of every produced output file.
pub const OUTPUT_EXTENSION: &str = "mp4";

/// The fixed encoding parameter set applied to every conversion in a batch.
///
/// These knobs are not exposed through the configuration file; every file in
/// a run is encoded the same way.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodingProfile {
    /// Target video encoder.
    pub video_codec: String,
    /// Target audio encoder.
    pub audio_codec: String,
    /// Encoder speed/efficiency preset.
    pub preset: String,
    /// Constant Rate Factor (quality, lower = better, 0-51 for x264).
    pub crf: u8,
    /// Relocate the container index to the front of the output file.
    pub faststart: bool,
}

impl Default for EncodingProfile {
    fn default() -> Self {
        Self {
            video_codec: "libx264".to_string(),
            audio_codec: "aac".to_string(),
            preset: "medium".to_string(),
            crf: 23,
            faststart: true,
        }
    }
}

/// A conversion job request.
#[derive(Debug, Clone)]
pub struct ConversionJob {
    /// Input file path.
    pub input_path: PathBuf,
    /// Output file path.
    pub output_path: PathBuf,
    /// Encoding parameters for this job.
    pub profile: EncodingProfile,
}

/// Result of a successful conversion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionResult {
    /// Input file path.
    pub input_path: PathBuf,
    /// Output file path.
    pub output_path: PathBuf,
    /// Output file size in bytes.
    pub output_size_bytes: u64,
    /// Conversion duration in milliseconds.
    pub duration_ms: u64,
}

/// Information about a media file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MediaInfo {
    /// File path.
    pub path: PathBuf,
    /// File size in bytes.
    pub size_bytes: u64,
    /// Duration in seconds.
    pub duration_secs: f64,
    /// Container format (e.g., "matroska", "avi").
    pub format: String,
    /// Video codec (if present).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_codec: Option<String>,
    /// Video width (if present).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_width: Option<u32>,
    /// Video height (if present).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_height: Option<u32>,
    /// Video frame rate (if present).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_fps: Option<f32>,
    /// Audio codec (if present).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_codec: Option<String>,
}

/// Progress update during conversion.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionProgress {
    /// Input file this update belongs to.
    pub input_path: PathBuf,
    /// Progress percentage (0.0 - 100.0).
    pub percent: f32,
    /// Current processing time in seconds.
    pub time_secs: f64,
    /// Total input duration in seconds, when known.
    pub duration_secs: Option<f64>,
    /// Current processing speed (e.g., "1.5x").
    pub speed: Option<String>,
}
