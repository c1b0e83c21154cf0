//! Batch conversion of a workspace.
//!
//! A batch run validates the conversion engine, prepares the workspace
//! directories, then converts every convertible file in the input directory
//! one at a time. Individual failures are collected rather than aborting the
//! run, and the final [`BatchSummary`] lists both outcomes.
//!
//! # Example
//!
//! ```ignore
//! use convertino_core::batch::BatchRunner;
//! use convertino_core::converter::FfmpegConverter;
//! use convertino_core::workspace::WorkspaceConfig;
//!
//! let runner = BatchRunner::new(WorkspaceConfig::default(), FfmpegConverter::with_defaults());
//! let summary = runner.run().await?;
//! println!("{} converted, {} failed", summary.success_count(), summary.failure_count());
//! ```

mod runner;
mod summary;

pub use runner::BatchRunner;
pub use summary::{BatchSummary, ConversionRecord, FailureRecord};
