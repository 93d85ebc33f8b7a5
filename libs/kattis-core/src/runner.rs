//! Test Runner - runs a solution over every stored sample of a problem
//!
//! This module is the glue layer between the store, the invoker and the
//! comparator. Every sample gets exactly one verdict, in order, no matter how
//! many of the earlier ones failed.
use tracing::{debug, info, instrument};

use crate::error::Result;
use crate::evaluator;
use crate::invoker::{self, InvocationError, Solution};
use crate::store::SampleStore;
use crate::types::{ProblemId, RunResult, SampleSet, Verdict};

/// Lifecycle of one sample within a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleState {
    Pending,
    Invoked,
    Compared,
    Errored,
}

pub struct TestRunner<'a> {
    store: &'a SampleStore,
}

impl<'a> TestRunner<'a> {
    pub fn new(store: &'a SampleStore) -> Self {
        Self { store }
    }

    /// Load the problem's samples and run `solution` on all of them.
    ///
    /// Fails only when the samples cannot be loaded.
    pub fn run(&self, problem_id: &ProblemId, solution: &dyn Solution) -> Result<RunResult> {
        let samples = self.store.load(problem_id)?;
        Ok(run_samples(problem_id, &samples, solution))
    }
}

/// Run `solution` over an already loaded sample set.
#[instrument(skip_all, fields(problem_id = %problem_id, samples = samples.len()))]
pub fn run_samples(
    problem_id: &ProblemId,
    samples: &SampleSet,
    solution: &dyn Solution,
) -> RunResult {
    let mut verdicts = Vec::with_capacity(samples.len());

    for (index, sample) in samples.iter().enumerate() {
        let mut state = SampleState::Pending;
        debug!(sample = index + 1, state = ?state, "Running sample");

        let outcome = invoker::invoke(solution, &sample.input);
        state = SampleState::Invoked;
        debug!(sample = index + 1, state = ?state, ok = outcome.is_ok());

        let verdict = evaluator::evaluate_sample(sample, outcome.map_err(|e| e.detail));
        state = match verdict {
            Verdict::Error { .. } => SampleState::Errored,
            _ => SampleState::Compared,
        };
        debug!(sample = index + 1, state = ?state, verdict = verdict.label(), "Sample finished");

        verdicts.push(verdict);
    }

    let pass_count = verdicts.iter().filter(|v| v.is_pass()).count();
    info!(
        passed = pass_count,
        total = verdicts.len(),
        "Test run complete"
    );

    RunResult {
        problem_id: problem_id.clone(),
        verdicts,
        pass_count,
    }
}

/// Single-Run Executor: run `solution` once on ad hoc input, no comparison.
pub fn run_once(solution: &dyn Solution, input: &str) -> std::result::Result<String, InvocationError> {
    invoker::invoke(solution, input)
}
