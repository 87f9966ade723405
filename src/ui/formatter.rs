//! Pure formatting functions for UI output.

use crate::cli::orchestration::WorkflowResult;
use console::style;

/// Format and print an error message in red.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red().bold(), message);
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    eprintln!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    eprintln!("{} {}", style("→").yellow(), message);
}

/// One-line summary of a computed version.
pub fn format_result(result: &WorkflowResult) -> String {
    format!(
        "{}: {} -> {}",
        result.branch, result.current, result.new_version
    )
}

/// Display the computed version change.
pub fn display_result(result: &WorkflowResult) {
    display_success(&format_result(result));
}
