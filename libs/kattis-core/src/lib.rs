//! Sample acquisition and test execution for Kattis problems.
//!
//! Samples are fetched once from the judge ([`fetcher`]), kept on disk
//! ([`store`]), and replayed against a user solution ([`runner`]) whose output
//! is judged by [`evaluator::compare`].

pub mod config;
pub mod error;
pub mod evaluator;
pub mod fetcher;
pub mod invoker;
pub mod runner;
pub mod store;
pub mod types;

#[cfg(test)]
mod runner_tests;

pub use config::WorkspaceConfig;
pub use error::{KattisError, Result};
pub use fetcher::{download_samples, KattisFetcher, SampleSource};
pub use invoker::{InvocationError, ProcessSolution, Solution};
pub use runner::{run_once, run_samples, TestRunner};
pub use store::SampleStore;
pub use types::{ProblemId, RunResult, Sample, SampleSet, Verdict};
