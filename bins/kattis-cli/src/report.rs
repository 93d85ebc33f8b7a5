// Human-readable test run reports
use kattis_core::{RunResult, SampleSet, Verdict};

/// A label and a value, on one line when the value is a single line and on
/// consecutive lines otherwise.
pub fn format_with_value(message: &str, value: &str) -> String {
    let value = value.trim();
    let separator = if value.contains('\n') { '\n' } else { '\t' };
    format!("{}{}{}\n", message, separator, value)
}

pub fn format_report(samples: &SampleSet, result: &RunResult) -> String {
    let mut out = String::new();

    for (index, (sample, verdict)) in samples.iter().zip(&result.verdicts).enumerate() {
        out.push_str(&format!("Sample {}\n", index + 1));
        out.push_str(&format_with_value("Solving with input:", &sample.input));

        match verdict {
            Verdict::Pass { output } => {
                out.push_str(&format_with_value("Success! Output was:", output));
            }
            Verdict::Fail { actual, expected } => {
                out.push_str("Failure\n");
                out.push_str(&format_with_value("Expected answer:", expected));
                out.push_str(&format_with_value("Actual answer:", actual));
            }
            Verdict::Error { detail } => {
                out.push_str(&format_with_value("Error! Solution failed:", detail));
            }
        }
        out.push('\n');
    }

    out.push_str(&format!(
        "{} {}/{} samples passed\n",
        if result.all_passed() { "✅" } else { "❌" },
        result.pass_count,
        result.total()
    ));
    out
}
