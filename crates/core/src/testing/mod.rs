//! Testing utilities and mock implementations for E2E tests.
//!
//! This module provides a mock implementation of the [`Converter`] trait,
//! allowing comprehensive batch tests without FFmpeg installed.
//!
//! # Example
//!
//! ```rust,ignore
//! use convertino_core::testing::MockConverter;
//!
//! let converter = MockConverter::new();
//!
//! // Configure mock behavior
//! converter.fail_path("/input/broken.mkv", "invalid frame").await;
//!
//! // Use in a BatchRunner...
//! ```
//!
//! [`Converter`]: crate::converter::Converter

mod mock_converter;

pub use mock_converter::{MockConverter, RecordedConversion};
