// Workspace configuration for the kattis tool
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::{KattisError, Result};
use crate::types::ProblemId;

pub const CONFIG_FILE_NAME: &str = "kattis.json";
pub const JUDGE_URL_ENV: &str = "KATTIS_JUDGE_URL";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct JudgeConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for JudgeConfig {
    fn default() -> Self {
        Self {
            base_url: "https://open.kattis.com".to_string(),
            timeout_secs: 30,
        }
    }
}

/// How the user's solution is found and compiled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolutionConfig {
    pub file_name: String,
    pub compiler: String,
    pub compiler_args: Vec<String>,
}

impl Default for SolutionConfig {
    fn default() -> Self {
        Self {
            file_name: "solution.rs".to_string(),
            compiler: "rustc".to_string(),
            compiler_args: vec!["-O".to_string(), "--edition".to_string(), "2021".to_string()],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkspaceConfig {
    pub problems_dir: PathBuf,
    pub judge: JudgeConfig,
    pub solution: SolutionConfig,
}

impl Default for WorkspaceConfig {
    fn default() -> Self {
        Self {
            problems_dir: PathBuf::from("problems"),
            judge: JudgeConfig::default(),
            solution: SolutionConfig::default(),
        }
    }
}

impl WorkspaceConfig {
    /// Load configuration from a JSON file. Missing fields take their defaults.
    pub fn load(config_path: &Path) -> Result<Self> {
        let content = fs::read_to_string(config_path).map_err(|e| {
            KattisError::Config(format!("failed to read {}: {}", config_path.display(), e))
        })?;

        serde_json::from_str(&content).map_err(|e| {
            KattisError::Config(format!("failed to parse {}: {}", config_path.display(), e))
        })
    }

    /// Load `kattis.json` from the workspace if present, otherwise use defaults.
    /// Environment overrides are applied in both cases.
    pub fn load_or_default(config_path: &Path) -> Result<Self> {
        let mut config = if config_path.exists() {
            Self::load(config_path)?
        } else {
            debug!(path = %config_path.display(), "No config file, using defaults");
            Self::default()
        };
        config.apply_env();
        Ok(config)
    }

    fn apply_env(&mut self) {
        if let Ok(url) = std::env::var(JUDGE_URL_ENV) {
            if !url.is_empty() {
                self.judge.base_url = url;
            }
        }
    }

    pub fn save(&self, config_path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| KattisError::Config(format!("failed to serialize config: {}", e)))?;
        fs::write(config_path, json + "\n")?;
        Ok(())
    }

    /// Root directory holding one subdirectory per problem.
    pub fn problems_root(&self, workspace: &Path) -> PathBuf {
        workspace.join(&self.problems_dir)
    }

    pub fn problem_dir(&self, workspace: &Path, problem_id: &ProblemId) -> PathBuf {
        self.problems_root(workspace).join(problem_id.as_str())
    }
}
