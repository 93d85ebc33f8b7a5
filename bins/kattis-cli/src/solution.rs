// Solution provider: compiles a problem's solution.rs and hands it to the core
use anyhow::{bail, Context, Result};
use kattis_core::config::SolutionConfig;
use kattis_core::{ProblemId, ProcessSolution};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tracing::{debug, info};

pub struct SolutionBuild {
    pub source: PathBuf,
    pub binary: PathBuf,
    /// Compiler command the binary was last built with.
    pub stamp: PathBuf,
    command_line: String,
}

impl SolutionBuild {
    pub fn new(config: &SolutionConfig, problem_dir: &Path) -> Self {
        let binary_name = format!("solution{}", std::env::consts::EXE_SUFFIX);
        let target_dir = problem_dir.join("target");
        let mut command_line = vec![config.compiler.as_str()];
        command_line.extend(config.compiler_args.iter().map(String::as_str));

        Self {
            source: problem_dir.join(&config.file_name),
            binary: target_dir.join(binary_name),
            stamp: target_dir.join("solution.cmd"),
            command_line: command_line.join("\n"),
        }
    }

    /// True when the binary is missing, older than the source, or was built
    /// with a different compiler command.
    pub fn is_stale(&self) -> Result<bool> {
        let binary_modified = match fs::metadata(&self.binary).and_then(|m| m.modified()) {
            Ok(modified) => modified,
            Err(_) => return Ok(true),
        };
        match fs::read_to_string(&self.stamp) {
            Ok(recorded) if recorded == self.command_line => {}
            _ => return Ok(true),
        }
        let source_modified = fs::metadata(&self.source)
            .and_then(|m| m.modified())
            .with_context(|| format!("Failed to stat {}", self.source.display()))?;
        Ok(source_modified > binary_modified)
    }

    fn write_stamp(&self) -> Result<()> {
        fs::write(&self.stamp, &self.command_line)
            .with_context(|| format!("Failed to write {}", self.stamp.display()))
    }

    fn compile(&self, config: &SolutionConfig) -> Result<()> {
        if let Some(parent) = self.binary.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        info!(
            compiler = %config.compiler,
            source = %self.source.display(),
            "Compiling solution"
        );

        let output = Command::new(&config.compiler)
            .args(&config.compiler_args)
            .arg("-o")
            .arg(&self.binary)
            .arg(&self.source)
            .output()
            .with_context(|| format!("Failed to run compiler '{}'", config.compiler))?;

        if !output.status.success() {
            bail!(
                "Compilation of {} failed:\n{}",
                self.source.display(),
                String::from_utf8_lossy(&output.stderr).trim_end()
            );
        }

        self.write_stamp()
    }
}

/// Compile the problem's solution if needed and return it as a callable solution.
pub fn prepare_solution(
    config: &SolutionConfig,
    problem_dir: &Path,
    problem_id: &ProblemId,
) -> Result<ProcessSolution> {
    let build = SolutionBuild::new(config, problem_dir);

    if !build.source.is_file() {
        bail!(
            "No solution for problem '{}' (expected {})",
            problem_id,
            build.source.display()
        );
    }

    if build.is_stale()? {
        build.compile(config)?;
    } else {
        debug!(binary = %build.binary.display(), "Solution binary is up to date");
    }

    Ok(ProcessSolution::new(build.binary))
}
