//! Sample Store - local persistence of sample sets
//!
//! One `samples.json` per problem, under that problem's directory. The file
//! is a pretty-printed JSON array of `{"input", "answer"}` objects.
//!
//! Writes go to a temporary file in the same directory which is then renamed
//! over the target, so a reader sees either the old set or the new one.
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::error::{KattisError, Result};
use crate::types::{ProblemId, SampleSet};

pub const SAMPLES_FILE_NAME: &str = "samples.json";

#[derive(Debug, Clone)]
pub struct SampleStore {
    root: PathBuf,
}

impl SampleStore {
    /// `root` is the directory holding one subdirectory per problem.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, problem_id: &ProblemId) -> PathBuf {
        self.root.join(problem_id.as_str()).join(SAMPLES_FILE_NAME)
    }

    pub fn exists(&self, problem_id: &ProblemId) -> bool {
        self.path_for(problem_id).is_file()
    }

    /// Replace the stored set for `problem_id` with `samples`.
    pub fn save(&self, problem_id: &ProblemId, samples: &SampleSet) -> Result<()> {
        let path = self.path_for(problem_id);
        let dir = path
            .parent()
            .ok_or_else(|| KattisError::InvalidProblemId(problem_id.to_string()))?;
        fs::create_dir_all(dir)?;

        if path.exists() {
            info!(problem_id = %problem_id, "Samples file exists, overwriting");
        }

        let mut tmp = NamedTempFile::new_in(dir)?;
        write_samples(&mut tmp, samples)?;
        tmp.as_file().sync_all()?;
        tmp.persist(&path).map_err(|e| KattisError::Io(e.error))?;

        debug!(
            problem_id = %problem_id,
            path = %path.display(),
            samples = samples.len(),
            "Saved samples"
        );
        Ok(())
    }

    pub fn load(&self, problem_id: &ProblemId) -> Result<SampleSet> {
        let path = self.path_for(problem_id);
        let content = match fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                return Err(KattisError::NotFound(format!(
                    "no samples downloaded for '{}' (expected {})",
                    problem_id,
                    path.display()
                )));
            }
            Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                return Err(KattisError::CorruptData {
                    path,
                    reason: e.to_string(),
                });
            }
            Err(e) => return Err(e.into()),
        };

        serde_json::from_str(&content).map_err(|e| KattisError::CorruptData {
            path,
            reason: e.to_string(),
        })
    }
}

/// Serialize `samples` in the on-disk representation to any writer.
pub fn write_samples<W: Write>(mut writer: W, samples: &SampleSet) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, samples).map_err(io::Error::from)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(())
}
