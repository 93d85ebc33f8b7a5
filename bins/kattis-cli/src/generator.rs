// Template generation for new problem directories
use anyhow::{Context, Result};
use kattis_core::ProblemId;
use std::fs;
use std::path::Path;

const SOLUTION_TEMPLATE: &str = r#"//! Solution for the Kattis problem `{problem_id}`
//! {problem_url}
use std::io::{self, Read, Write};

fn solve(input: &str) -> String {
    let mut lines = input.lines();
    let _first = lines.next();
    todo!("solve {problem_id}")
}

fn main() {
    let mut input = String::new();
    io::stdin().read_to_string(&mut input).expect("failed to read stdin");
    let output = solve(&input);
    io::stdout().write_all(output.as_bytes()).expect("failed to write stdout");
}
"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateOutcome {
    Written,
    Kept,
}

pub struct TemplateGenerator {
    judge_url: String,
}

impl TemplateGenerator {
    pub fn new(judge_url: &str) -> Self {
        Self {
            judge_url: judge_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn render_solution(&self, problem_id: &ProblemId) -> String {
        let url = format!("{}/problems/{}", self.judge_url, problem_id);
        SOLUTION_TEMPLATE
            .replace("{problem_id}", problem_id.as_str())
            .replace("{problem_url}", &url)
    }

    /// Write the solution template unless a solution already exists.
    pub fn write_solution(
        &self,
        path: &Path,
        problem_id: &ProblemId,
        overwrite: bool,
    ) -> Result<TemplateOutcome> {
        if path.exists() && !overwrite {
            return Ok(TemplateOutcome::Kept);
        }

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        fs::write(path, self.render_solution(problem_id))
            .with_context(|| format!("Failed to write {}", path.display()))?;

        Ok(TemplateOutcome::Written)
    }
}
