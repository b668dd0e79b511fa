//! CLI presentation: text formatters for generated test cases and run outcomes.

use crate::error::ValidationError;
use crate::pipeline::RunOutcome;
use crate::validate::{MissingFields, TestCase, ValidatedBatch};

const MISSING: &str = "N/A";

pub const SUCCESS_BANNER: &str = "Successfully generated and parsed test cases! \u{2728}";
pub const GENERATION_FAILED: &str = "Could not generate a valid response.";
pub const PROCESSING_FAILED: &str = "Failed to process the model's output.";

fn field(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or(MISSING)
}

pub fn format_test_case(tc: &TestCase) -> String {
    let mut s = format!(
        "--- Test Case: {} ({}) ---\nPriority: {} | Type: {}\nDescription: {}\nPreconditions: {}\nSteps:",
        field(&tc.title),
        field(&tc.id),
        field(&tc.priority),
        field(&tc.kind),
        field(&tc.description),
        field(&tc.preconditions),
    );
    for step in &tc.steps {
        s.push_str(&format!("\n  - {}", step));
    }
    s.push_str(&format!("\nExpected Result: {}", field(&tc.expected_result)));
    s
}

fn format_warning(warning: &MissingFields) -> String {
    match &warning.id {
        Some(id) => format!(
            "Warning: test case {} ({}) is missing required key(s): {}",
            warning.index,
            id,
            warning.missing.join(", ")
        ),
        None => format!(
            "Warning: test case {} is missing required key(s): {}",
            warning.index,
            warning.missing.join(", ")
        ),
    }
}

/// Full success report: banner, soft-validation warnings, then every test case.
pub fn format_report(batch: &ValidatedBatch) -> String {
    let mut sections = vec![SUCCESS_BANNER.to_string()];
    if !batch.warnings.is_empty() {
        let lines: Vec<String> = batch.warnings.iter().map(format_warning).collect();
        sections.push(lines.join("\n"));
    }
    sections.extend(batch.cases.iter().map(format_test_case));
    sections.join("\n\n")
}

fn format_validation_error(err: &ValidationError) -> String {
    match err {
        ValidationError::Decode { .. } => format!("Error: {}", err),
        _ => format!("Validation Error: {}", err),
    }
}

/// Text printed to stdout for any non-fatal outcome.
pub fn format_outcome(outcome: &RunOutcome) -> String {
    match outcome {
        RunOutcome::Generated(batch) if !batch.is_empty() => format_report(batch),
        RunOutcome::Generated(_) => format!("The model returned no test cases.\n\n{}", PROCESSING_FAILED),
        RunOutcome::GenerationFailed(_) => GENERATION_FAILED.to_string(),
        RunOutcome::ProcessingFailed(err) => {
            format!("{}\n\n{}", format_validation_error(err), PROCESSING_FAILED)
        }
    }
}
