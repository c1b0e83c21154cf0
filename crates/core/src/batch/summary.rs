//! Types describing the outcome of a batch run.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::converter::ConversionResult;

/// A file that was converted successfully.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversionRecord {
    /// Path of the source file.
    pub input_path: PathBuf,
    /// Path of the converted mp4.
    pub output_path: PathBuf,
}

/// A file that could not be converted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FailureRecord {
    /// Path of the source file.
    pub input_path: PathBuf,
    /// What went wrong, in one line.
    pub error: String,
}

/// Outcome of a whole batch run.
///
/// Every discovered file ends up in exactly one of the two lists.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BatchSummary {
    /// Files converted successfully, in processing order.
    pub successes: Vec<ConversionRecord>,
    /// Files that failed, in processing order.
    pub failures: Vec<FailureRecord>,
}

impl BatchSummary {
    /// Records a successful conversion.
    pub fn record_success(&mut self, result: &ConversionResult) {
        self.successes.push(ConversionRecord {
            input_path: result.input_path.clone(),
            output_path: result.output_path.clone(),
        });
    }

    /// Records a failed conversion.
    pub fn record_failure(&mut self, input_path: PathBuf, error: impl Into<String>) {
        self.failures.push(FailureRecord {
            input_path,
            error: error.into(),
        });
    }

    /// Number of files converted successfully.
    pub fn success_count(&self) -> usize {
        self.successes.len()
    }

    /// Number of files that failed.
    pub fn failure_count(&self) -> usize {
        self.failures.len()
    }

    /// Number of files processed in total.
    pub fn total(&self) -> usize {
        self.successes.len() + self.failures.len()
    }

    /// Whether the batch had nothing to process.
    pub fn is_empty(&self) -> bool {
        self.successes.is_empty() && self.failures.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_summary() {
        let summary = BatchSummary::default();
        assert!(summary.is_empty());
        assert_eq!(summary.total(), 0);
    }

    #[test]
    fn test_record_outcomes() {
        let mut summary = BatchSummary::default();

        let result = ConversionResult {
            input_path: PathBuf::from("/input/clip.webm"),
            output_path: PathBuf::from("/output/clip.mp4"),
            output_size_bytes: 1024,
            duration_ms: 500,
        };
        summary.record_success(&result);
        summary.record_failure(PathBuf::from("/input/broken.mkv"), "invalid frame");

        assert_eq!(summary.success_count(), 1);
        assert_eq!(summary.failure_count(), 1);
        assert_eq!(summary.total(), 2);
        assert!(!summary.is_empty());
        assert_eq!(summary.successes[0].output_path, PathBuf::from("/output/clip.mp4"));
        assert_eq!(summary.failures[0].error, "invalid frame");
    }

    #[test]
    fn test_summary_serialization() {
        let mut summary = BatchSummary::default();
        summary.record_failure(PathBuf::from("/input/broken.mkv"), "invalid frame");

        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains("\"failures\""));
        assert!(json.contains("invalid frame"));
    }
}
