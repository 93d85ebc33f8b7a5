use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Index;
use std::str::FromStr;

use crate::error::KattisError;

/// Identifier of a problem on the judge, e.g. `hello` or `twosum`.
///
/// Doubles as the name of the problem's workspace directory, so ids that
/// would escape that directory are rejected.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProblemId(String);

impl ProblemId {
    pub fn new(id: impl Into<String>) -> Result<Self, KattisError> {
        let id = id.into();
        if id.is_empty() || id == "." || id == ".." || id.contains(['/', '\\']) {
            return Err(KattisError::InvalidProblemId(id));
        }
        Ok(Self(id))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProblemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for ProblemId {
    type Err = KattisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for ProblemId {
    type Error = KattisError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ProblemId> for String {
    fn from(id: ProblemId) -> Self {
        id.0
    }
}

/// One published input/answer pair, kept exactly as the judge served it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sample {
    pub input: String,
    #[serde(rename = "answer")]
    pub expected_output: String,
}

impl Sample {
    pub fn new(input: impl Into<String>, expected_output: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            expected_output: expected_output.into(),
        }
    }
}

/// All samples of one problem, in the judge's order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SampleSet(Vec<Sample>);

impl SampleSet {
    pub fn new(samples: Vec<Sample>) -> Self {
        Self(samples)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Sample> {
        self.0.iter()
    }

    pub fn into_inner(self) -> Vec<Sample> {
        self.0
    }
}

impl From<Vec<Sample>> for SampleSet {
    fn from(samples: Vec<Sample>) -> Self {
        Self(samples)
    }
}

impl Index<usize> for SampleSet {
    type Output = Sample;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl<'a> IntoIterator for &'a SampleSet {
    type Item = &'a Sample;
    type IntoIter = std::slice::Iter<'a, Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl IntoIterator for SampleSet {
    type Item = Sample;
    type IntoIter = std::vec::IntoIter<Sample>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Outcome of running one sample. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Pass { output: String },
    Fail { actual: String, expected: String },
    Error { detail: String },
}

impl Verdict {
    pub fn is_pass(&self) -> bool {
        matches!(self, Verdict::Pass { .. })
    }

    pub fn label(&self) -> &'static str {
        match self {
            Verdict::Pass { .. } => "pass",
            Verdict::Fail { .. } => "fail",
            Verdict::Error { .. } => "error",
        }
    }
}

/// Verdicts of one test run, aligned 1:1 with the problem's `SampleSet`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunResult {
    pub problem_id: ProblemId,
    pub verdicts: Vec<Verdict>,
    pub pass_count: usize,
}

impl RunResult {
    pub fn total(&self) -> usize {
        self.verdicts.len()
    }

    pub fn all_passed(&self) -> bool {
        self.pass_count == self.total()
    }
}
