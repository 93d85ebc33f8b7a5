//! Comparator - judge-style output comparison
//!
//! **Core Responsibility:**
//! Decide whether the output of a solution is an accepted answer for a sample.
//!
//! **Critical Properties:**
//! - Knows nothing about the network
//! - Knows nothing about how the solution was run
//! - Pure function: (expected, actual) → bool
//!
//! **Normalization Rules (applied to both sides, only at comparison time):**
//! - `\r\n` and lone `\r` become `\n`
//! - Leading/trailing whitespace of the whole text is dropped, which also
//!   drops leading and trailing blank lines
//! - Trailing whitespace of every line is dropped
//! - Whitespace inside a line is significant
//! - Case sensitive
//! - An expected output that is empty after trimming only accepts an empty
//!   actual output

use crate::types::{Sample, Verdict};

/// Normalize text into the lines that take part in a comparison.
pub fn normalize(text: &str) -> Vec<String> {
    let unified = text.replace("\r\n", "\n").replace('\r', "\n");
    let trimmed = unified.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }
    trimmed.split('\n').map(|line| line.trim_end().to_string()).collect()
}

/// Whether `actual` is accepted for `expected`.
pub fn compare(expected: &str, actual: &str) -> bool {
    if expected.trim().is_empty() {
        return actual.trim().is_empty();
    }
    normalize(expected) == normalize(actual)
}

/// Verdict for a sample given the solution's output, or its failure detail.
pub fn evaluate_sample(sample: &Sample, outcome: Result<String, String>) -> Verdict {
    match outcome {
        Err(detail) => Verdict::Error { detail },
        Ok(output) if compare(&sample.expected_output, &output) => Verdict::Pass { output },
        Ok(actual) => Verdict::Fail {
            actual,
            expected: sample.expected_output.clone(),
        },
    }
}
