//! Sample Fetcher - download of a problem's published samples
//!
//! The judge serves every sample as a pair of files inside one zip archive,
//! `<stem>.in` and `<stem>.ans`. Pairs are joined by stem and kept in the
//! order their `.in` entries appear in the archive. Nothing is written to
//! disk here.
use std::collections::HashMap;
use std::io::{Cursor, Read};
use std::time::Duration;

use tracing::{debug, info, warn};
use zip::ZipArchive;

use crate::config::JudgeConfig;
use crate::error::{KattisError, Result};
use crate::store::SampleStore;
use crate::types::{ProblemId, Sample, SampleSet};

const INPUT_EXT: &str = ".in";
const ANSWER_EXT: &str = ".ans";

/// Anything that can produce the published samples of a problem.
pub trait SampleSource {
    fn fetch(&self, problem_id: &ProblemId) -> Result<SampleSet>;
}

/// Fetches `samples.zip` from a Kattis instance over HTTP.
pub struct KattisFetcher {
    base_url: String,
    agent: ureq::Agent,
}

impl KattisFetcher {
    pub fn new(config: &JudgeConfig) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build();
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            agent,
        }
    }

    pub fn samples_url(&self, problem_id: &ProblemId) -> String {
        format!(
            "{}/problems/{}/file/statement/samples.zip",
            self.base_url, problem_id
        )
    }

    fn download_archive(&self, problem_id: &ProblemId) -> Result<Vec<u8>> {
        let url = self.samples_url(problem_id);
        debug!(problem_id = %problem_id, url = %url, "Requesting sample archive");

        let response = match self.agent.get(&url).call() {
            Ok(response) => response,
            Err(ureq::Error::Status(404, _)) => {
                return Err(KattisError::NotFound(format!(
                    "the problem '{}' does not exist on {}",
                    problem_id, self.base_url
                )));
            }
            Err(ureq::Error::Status(code, _)) => {
                return Err(KattisError::Network(format!(
                    "{} answered with HTTP {}",
                    url, code
                )));
            }
            Err(ureq::Error::Transport(e)) => {
                return Err(KattisError::Network(format!("{}: {}", url, e)));
            }
        };

        let mut bytes = Vec::new();
        response
            .into_reader()
            .read_to_end(&mut bytes)
            .map_err(|e| KattisError::Network(format!("reading {}: {}", url, e)))?;
        Ok(bytes)
    }
}

impl SampleSource for KattisFetcher {
    fn fetch(&self, problem_id: &ProblemId) -> Result<SampleSet> {
        let bytes = self.download_archive(problem_id)?;
        let samples = parse_sample_archive(&bytes)?;
        info!(
            problem_id = %problem_id,
            samples = samples.len(),
            archive_bytes = bytes.len(),
            "Fetched samples"
        );
        Ok(samples)
    }
}

/// Pair the `.in`/`.ans` entries of a sample archive into a `SampleSet`.
pub fn parse_sample_archive(bytes: &[u8]) -> Result<SampleSet> {
    let mut archive = ZipArchive::new(Cursor::new(bytes))
        .map_err(|e| KattisError::Format(format!("not a zip archive: {}", e)))?;

    let mut inputs: Vec<(String, String)> = Vec::new();
    let mut answers: HashMap<String, String> = HashMap::new();

    for index in 0..archive.len() {
        let mut entry = archive
            .by_index(index)
            .map_err(|e| KattisError::Format(format!("unreadable entry #{}: {}", index, e)))?;
        if entry.is_dir() {
            continue;
        }

        let name = entry.name().to_string();
        let (stem, is_input) = if let Some(stem) = name.strip_suffix(INPUT_EXT) {
            (stem.to_string(), true)
        } else if let Some(stem) = name.strip_suffix(ANSWER_EXT) {
            (stem.to_string(), false)
        } else {
            debug!(entry = %name, "Ignoring non-sample archive entry");
            continue;
        };

        let mut content = String::new();
        entry
            .read_to_string(&mut content)
            .map_err(|e| KattisError::Format(format!("'{}' is not valid UTF-8 text: {}", name, e)))?;

        if is_input {
            inputs.push((stem, content));
        } else {
            answers.insert(stem, content);
        }
    }

    let mut samples = Vec::with_capacity(inputs.len());
    for (stem, input) in inputs {
        let answer = answers.remove(&stem).ok_or_else(|| {
            KattisError::Format(format!(
                "could not find a matching '{}{}' for '{}{}'",
                stem, ANSWER_EXT, stem, INPUT_EXT
            ))
        })?;
        samples.push(Sample::new(input, answer));
    }

    if let Some(stem) = answers.keys().min() {
        return Err(KattisError::Format(format!(
            "could not find a matching '{}{}' for '{}{}'",
            stem, INPUT_EXT, stem, ANSWER_EXT
        )));
    }

    if samples.is_empty() {
        return Err(KattisError::Format("archive contains no samples".to_string()));
    }

    Ok(SampleSet::new(samples))
}

/// Fetch a fresh sample set and replace the stored one.
///
/// The store is only touched once the whole set has been fetched and paired.
pub fn download_samples(
    source: &dyn SampleSource,
    store: &SampleStore,
    problem_id: &ProblemId,
) -> Result<SampleSet> {
    let samples = source.fetch(problem_id).map_err(|e| {
        warn!(problem_id = %problem_id, error = %e, "Sample download failed");
        e
    })?;
    store.save(problem_id, &samples)?;
    Ok(samples)
}
