//! Solution Invoker - calls the user's solve routine on one input
//!
//! The core never loads user code itself. Whatever the caller hands in as a
//! `Solution` is called with the input text; returned errors and panics both
//! come back as an `InvocationError` so a broken sample cannot take the rest
//! of a test run down with it.
use std::error::Error as StdError;
use std::ffi::OsString;
use std::fmt;
use std::io::Write;
use std::panic::{self, AssertUnwindSafe};
use std::path::PathBuf;
use std::process::{Command, Stdio};
use std::thread;

use tracing::{debug, warn};

pub type SolveError = Box<dyn StdError + Send + Sync>;

/// A user solution: a function from the whole input text to the whole output.
pub trait Solution {
    fn solve(&self, input: &str) -> Result<String, SolveError>;
}

impl<F, E> Solution for F
where
    F: Fn(&str) -> Result<String, E>,
    E: Into<SolveError>,
{
    fn solve(&self, input: &str) -> Result<String, SolveError> {
        self(input).map_err(Into::into)
    }
}

/// Why a single call of a solution produced no output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvocationError {
    pub detail: String,
}

impl fmt::Display for InvocationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.detail)
    }
}

impl StdError for InvocationError {}

/// Run `solution` on `input`, containing any failure.
pub fn invoke(solution: &dyn Solution, input: &str) -> Result<String, InvocationError> {
    match panic::catch_unwind(AssertUnwindSafe(|| solution.solve(input))) {
        Ok(Ok(output)) => Ok(output),
        Ok(Err(e)) => {
            debug!(error = %e, "Solution returned an error");
            Err(InvocationError {
                detail: e.to_string(),
            })
        }
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            warn!(panic = %message, "Solution panicked");
            Err(InvocationError {
                detail: format!("panicked: {}", message),
            })
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

/// A solution backed by an executable: input on stdin, output from stdout.
///
/// Each call spawns a new process.
#[derive(Debug, Clone)]
pub struct ProcessSolution {
    program: PathBuf,
    args: Vec<OsString>,
}

#[derive(Debug)]
struct ProcessFailure(String);

impl fmt::Display for ProcessFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl StdError for ProcessFailure {}

impl ProcessSolution {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn program(&self) -> &std::path::Path {
        &self.program
    }
}

impl Solution for ProcessSolution {
    fn solve(&self, input: &str) -> Result<String, SolveError> {
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| ProcessFailure(format!("failed to start {}: {}", self.program.display(), e)))?;

        // Feed stdin from another thread so a chatty child cannot deadlock us.
        let mut stdin = child
            .stdin
            .take()
            .ok_or_else(|| ProcessFailure("child stdin unavailable".to_string()))?;
        let input = input.to_owned();
        let writer = thread::spawn(move || stdin.write_all(input.as_bytes()));

        let output = child.wait_with_output()?;

        // A child that exits without reading all of its input is not an error.
        if let Ok(Err(e)) = writer.join() {
            debug!(error = %e, "Solution did not consume all of its input");
        }

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Box::new(ProcessFailure(format!(
                "{} ({})\n{}",
                self.program.display(),
                output.status,
                stderr.trim_end()
            ))));
        }

        String::from_utf8(output.stdout)
            .map_err(|e| ProcessFailure(format!("output is not valid UTF-8: {}", e)).into())
    }
}
