//! Converter module for transcoding video files.
//!
//! This module provides the `Converter` trait and the FFmpeg-backed
//! implementation that turns source videos into streaming-friendly mp4 files.
//!
//! # Features
//!
//! - H.264 video with AAC audio in an mp4 container
//! - Fixed quality profile (preset `medium`, CRF 23, faststart)
//! - Media probing via ffprobe
//! - Progress reporting during conversion
//!
//! # Example
//!
//! ```ignore
//! use convertino_core::converter::{Converter, ConversionJob, EncodingProfile, FfmpegConverter};
//!
//! let converter = FfmpegConverter::with_defaults();
//!
//! // Validate ffmpeg is available and carries the required encoders
//! converter.validate().await?;
//!
//! // Probe a media file
//! let info = converter.probe(Path::new("/path/to/file.mkv")).await?;
//! println!("Duration: {} seconds", info.duration_secs);
//!
//! // Convert to mp4
//! let job = ConversionJob {
//!     input_path: PathBuf::from("/path/to/input.mkv"),
//!     output_path: PathBuf::from("/path/to/output.mp4"),
//!     profile: EncodingProfile::default(),
//! };
//!
//! let result = converter.convert(job).await?;
//! println!("Converted in {} ms", result.duration_ms);
//! ```

mod capabilities;
mod config;
mod error;
mod ffmpeg;
mod traits;
mod types;

pub use capabilities::EncoderCapabilities;
pub use config::ConverterConfig;
pub use error::ConverterError;
pub use ffmpeg::FfmpegConverter;
pub use traits::Converter;
pub use types::{
    ConversionJob, ConversionProgress, ConversionResult, EncodingProfile, MediaInfo,
    OUTPUT_EXTENSION,
};
