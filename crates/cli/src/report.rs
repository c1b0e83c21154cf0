//! Human-readable batch summary for the console.

use convertino_core::BatchSummary;

/// Render a finished batch as console output.
pub fn render(summary: &BatchSummary) -> String {
    if summary.is_empty() {
        return "Nothing to convert.".to_string();
    }

    let mut lines = vec![format!(
        "Converted {} of {} files.",
        summary.success_count(),
        summary.total()
    )];

    if !summary.failures.is_empty() {
        lines.push("Failed:".to_string());
        for failure in &summary.failures {
            lines.push(format!("  {}: {}", failure.input_path.display(), failure.error));
        }
    }

    lines.join("\n")
}
