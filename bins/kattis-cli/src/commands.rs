// CLI commands for working on Kattis problems
use anyhow::{Context, Result};
use kattis_core::config::CONFIG_FILE_NAME;
use kattis_core::store;
use kattis_core::{
    download_samples, run_once, run_samples, KattisError, ProblemId, SampleSource, SampleStore,
    WorkspaceConfig,
};
use std::collections::HashSet;
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{error, info};

use crate::generator::{TemplateGenerator, TemplateOutcome};
use crate::report;
use crate::solution;

/// Where `create` and `download-samples` get their samples from.
pub type SharedSource = Arc<dyn SampleSource + Send + Sync>;

/// Everything a command needs to know about the workspace it runs in.
pub struct Workspace {
    pub root: PathBuf,
    pub config_path: PathBuf,
    pub config: WorkspaceConfig,
    pub store: SampleStore,
}

impl Workspace {
    pub fn open(root: PathBuf, config_path: Option<&Path>) -> Result<Self> {
        let config_path = config_path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| root.join(CONFIG_FILE_NAME));
        let config = WorkspaceConfig::load_or_default(&config_path)?;
        let store = SampleStore::new(config.problems_root(&root));

        Ok(Self {
            root,
            config_path,
            config,
            store,
        })
    }

    pub fn problem_dir(&self, problem_id: &ProblemId) -> PathBuf {
        self.config.problem_dir(&self.root, problem_id)
    }
}

/// Initialize a workspace: default config file and problems directory
pub fn init_workspace(workspace: &Workspace) -> Result<bool> {
    println!("🚀 Initializing Kattis workspace at: {}", workspace.root.display());

    let problems_root = workspace.config.problems_root(&workspace.root);
    fs::create_dir_all(&problems_root)
        .with_context(|| format!("Failed to create {}", problems_root.display()))?;
    println!("  ✅ Created: {}", problems_root.display());

    if workspace.config_path.exists() {
        println!("  ⚠️  Keeping existing {}", workspace.config_path.display());
    } else {
        workspace
            .config
            .save(&workspace.config_path)
            .context("Failed to write config")?;
        println!("  ✅ Created: {}", workspace.config_path.display());
    }

    println!("\n📋 Next steps:");
    println!("  1. Create a problem: kattis create <problem-id>");
    println!("  2. Test your solution: kattis test <problem-id>");

    Ok(true)
}

/// Scaffold each problem and download its samples.
///
/// Downloads run concurrently, one blocking task per distinct problem, so no
/// two tasks ever write the same sample file.
pub async fn create_problems(
    workspace: &Workspace,
    source: SharedSource,
    problem_ids: &[ProblemId],
    overwrite: bool,
) -> Result<bool> {
    let mut seen = HashSet::new();
    let problem_ids: Vec<ProblemId> = problem_ids
        .iter()
        .filter(|id| seen.insert((*id).clone()))
        .cloned()
        .collect();

    let generator = TemplateGenerator::new(&workspace.config.judge.base_url);
    for problem_id in &problem_ids {
        let solution_path = workspace
            .problem_dir(problem_id)
            .join(&workspace.config.solution.file_name);

        match generator.write_solution(&solution_path, problem_id, overwrite)? {
            TemplateOutcome::Written => {
                println!("📝 Writing template solution file '{}'", solution_path.display());
            }
            TemplateOutcome::Kept => {
                println!("⚠️  Solution '{}' already exists. Continuing...", solution_path.display());
            }
        }
    }

    let mut tasks = Vec::with_capacity(problem_ids.len());
    for problem_id in problem_ids {
        let source = Arc::clone(&source);
        let store = workspace.store.clone();
        let task_id = problem_id.clone();
        let handle = tokio::task::spawn_blocking(move || {
            download_samples(&*source, &store, &task_id)
        });
        tasks.push((problem_id, handle));
    }

    let mut all_ok = true;
    for (problem_id, handle) in tasks {
        let outcome = handle
            .await
            .with_context(|| format!("Download task for '{}' panicked", problem_id))?;

        match outcome {
            Ok(samples) => {
                info!(problem_id = %problem_id, samples = samples.len(), "Problem created");
                println!("✅ {}: saved {} sample(s)", problem_id, samples.len());
            }
            Err(e) => {
                error!(problem_id = %problem_id, error = %e, "Failed to download samples");
                eprintln!("❌ {}: {}", problem_id, e);
                all_ok = false;
            }
        }
    }

    Ok(all_ok)
}

/// Re-download a problem's samples into the workspace, or to `out`.
pub async fn download_problem_samples(
    workspace: &Workspace,
    source: SharedSource,
    problem_id: ProblemId,
    out: Option<&Path>,
) -> Result<bool> {
    let store = workspace.store.clone();
    let out = out.map(Path::to_path_buf);
    let task_id = problem_id.clone();

    tokio::task::spawn_blocking(move || -> Result<()> {
        match out {
            None => {
                let samples = download_samples(&*source, &store, &task_id)?;
                eprintln!(
                    "✅ Saved {} sample(s) to {}",
                    samples.len(),
                    store.path_for(&task_id).display()
                );
            }
            Some(path) if path.as_os_str() == "-" => {
                let samples = source.fetch(&task_id)?;
                store::write_samples(io::stdout().lock(), &samples)?;
            }
            Some(path) => {
                let samples = source.fetch(&task_id)?;
                let file = fs::File::create(&path)
                    .with_context(|| format!("Failed to create {}", path.display()))?;
                store::write_samples(io::BufWriter::new(file), &samples)?;
                eprintln!("✅ Wrote {} sample(s) to {}", samples.len(), path.display());
            }
        }
        Ok(())
    })
    .await
    .with_context(|| format!("Download task for '{}' panicked", problem_id))??;

    Ok(true)
}

/// Run the solution once on stdin or a file
pub fn run_solution(
    workspace: &Workspace,
    problem_id: &ProblemId,
    input_path: Option<&Path>,
) -> Result<bool> {
    let solution = solution::prepare_solution(
        &workspace.config.solution,
        &workspace.problem_dir(problem_id),
        problem_id,
    )?;

    let input = match input_path {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read input {}", path.display()))?,
        None => {
            let mut input = String::new();
            io::stdin()
                .read_to_string(&mut input)
                .context("Failed to read stdin")?;
            input
        }
    };

    match run_once(&solution, &input) {
        Ok(output) => {
            println!("{}", output.trim_end_matches('\n'));
            Ok(true)
        }
        Err(e) => {
            eprintln!("❌ Solution failed: {}", e);
            Ok(false)
        }
    }
}

/// Run the solution against every stored sample and print a report
pub fn test_solution(workspace: &Workspace, problem_id: &ProblemId) -> Result<bool> {
    let samples = match workspace.store.load(problem_id) {
        Ok(samples) => samples,
        Err(KattisError::NotFound(msg)) => {
            anyhow::bail!(
                "{}\nDownload them with: kattis download-samples {}",
                msg,
                problem_id
            );
        }
        Err(e) => return Err(e.into()),
    };

    let solution = solution::prepare_solution(
        &workspace.config.solution,
        &workspace.problem_dir(problem_id),
        problem_id,
    )?;

    let result = run_samples(problem_id, &samples, &solution);
    print!("{}", report::format_report(&samples, &result));

    Ok(result.all_passed())
}

#[cfg(test)]
mod tests {
    use super::*;
    use kattis_core::{Sample, SampleSet};
    use std::sync::Mutex;
    use tempfile::TempDir;

    fn workspace(dir: &TempDir) -> Workspace {
        Workspace::open(dir.path().to_path_buf(), None).unwrap()
    }

    /// Serves one fixed sample set for every problem except `missing`, and
    /// records each fetch.
    struct RecordingSource {
        fetched: Mutex<Vec<String>>,
    }

    impl RecordingSource {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                fetched: Mutex::new(Vec::new()),
            })
        }

        fn fetch_count(&self, problem_id: &str) -> usize {
            let fetched = self.fetched.lock().unwrap();
            fetched.iter().filter(|id| id.as_str() == problem_id).count()
        }
    }

    impl SampleSource for RecordingSource {
        fn fetch(&self, problem_id: &ProblemId) -> kattis_core::Result<SampleSet> {
            self.fetched.lock().unwrap().push(problem_id.to_string());
            if problem_id.as_str() == "missing" {
                return Err(KattisError::NotFound(format!(
                    "the problem '{}' does not exist",
                    problem_id
                )));
            }
            Ok(SampleSet::new(vec![
                Sample::new("1 2\n", "3\n"),
                Sample::new("2 2\n", "4\n"),
            ]))
        }
    }

    fn ids(names: &[&str]) -> Vec<ProblemId> {
        names.iter().map(|name| ProblemId::new(*name).unwrap()).collect()
    }

    #[test]
    fn test_open_without_config_uses_defaults() {
        let dir = TempDir::new().unwrap();

        let ws = workspace(&dir);

        assert_eq!(ws.config_path, dir.path().join(CONFIG_FILE_NAME));
        assert_eq!(ws.store.root(), dir.path().join("problems"));
    }

    #[test]
    fn test_init_writes_config_once() {
        let dir = TempDir::new().unwrap();
        let ws = workspace(&dir);

        assert!(init_workspace(&ws).unwrap());
        let written = fs::read_to_string(&ws.config_path).unwrap();
        assert!(dir.path().join("problems").is_dir());

        assert!(init_workspace(&ws).unwrap());
        assert_eq!(fs::read_to_string(&ws.config_path).unwrap(), written);
    }

    #[test]
    fn test_test_without_samples_fails_fast() {
        let dir = TempDir::new().unwrap();
        let ws = workspace(&dir);
        let id = ProblemId::new("never-downloaded").unwrap();

        let err = test_solution(&ws, &id).unwrap_err();

        assert!(err.to_string().contains("kattis download-samples never-downloaded"));
    }

    #[test]
    fn test_test_without_solution_is_error() {
        let dir = TempDir::new().unwrap();
        let ws = workspace(&dir);
        let id = ProblemId::new("sum").unwrap();
        ws.store
            .save(&id, &SampleSet::new(vec![Sample::new("1 2", "3")]))
            .unwrap();

        let err = test_solution(&ws, &id).unwrap_err();

        assert!(err.to_string().contains("No solution for problem 'sum'"));
    }

    #[tokio::test]
    async fn test_create_fetches_each_problem_once() {
        let dir = TempDir::new().unwrap();
        let ws = workspace(&dir);
        let source = RecordingSource::new();

        let ok = create_problems(&ws, source.clone(), &ids(&["sum", "hello", "sum"]), false)
            .await
            .unwrap();

        assert!(ok);
        assert_eq!(source.fetch_count("sum"), 1);
        assert_eq!(source.fetch_count("hello"), 1);
        for id in ids(&["sum", "hello"]) {
            assert_eq!(ws.store.load(&id).unwrap().len(), 2);
            assert!(ws.problem_dir(&id).join("solution.rs").is_file());
        }
    }

    #[tokio::test]
    async fn test_create_reports_failure_but_saves_the_rest() {
        let dir = TempDir::new().unwrap();
        let ws = workspace(&dir);
        let source = RecordingSource::new();

        let ok = create_problems(&ws, source.clone(), &ids(&["missing", "sum"]), false)
            .await
            .unwrap();

        assert!(!ok);
        assert!(ws.store.exists(&ProblemId::new("sum").unwrap()));
        assert!(!ws.store.exists(&ProblemId::new("missing").unwrap()));
    }

    #[tokio::test]
    async fn test_download_saves_to_store() {
        let dir = TempDir::new().unwrap();
        let ws = workspace(&dir);
        let id = ProblemId::new("sum").unwrap();

        assert!(download_problem_samples(&ws, RecordingSource::new(), id.clone(), None)
            .await
            .unwrap());

        assert_eq!(ws.store.load(&id).unwrap()[1], Sample::new("2 2\n", "4\n"));
    }

    #[tokio::test]
    async fn test_download_to_file_leaves_store_alone() {
        let dir = TempDir::new().unwrap();
        let ws = workspace(&dir);
        let id = ProblemId::new("sum").unwrap();
        let elsewhere = SampleStore::new(dir.path().join("elsewhere"));
        let out = elsewhere.path_for(&id);
        fs::create_dir_all(out.parent().unwrap()).unwrap();

        assert!(
            download_problem_samples(&ws, RecordingSource::new(), id.clone(), Some(&out))
                .await
                .unwrap()
        );

        assert_eq!(elsewhere.load(&id).unwrap().len(), 2);
        assert!(!ws.store.exists(&id));
    }

    #[tokio::test]
    async fn test_download_unknown_problem_is_error() {
        let dir = TempDir::new().unwrap();
        let ws = workspace(&dir);
        let id = ProblemId::new("missing").unwrap();

        let err = download_problem_samples(&ws, RecordingSource::new(), id.clone(), None)
            .await
            .unwrap_err();

        assert!(err.to_string().contains("does not exist"));
        assert!(!ws.store.exists(&id));
    }
}
