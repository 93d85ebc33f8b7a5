/// End-to-end tests of a test run: store → invoker → comparator.
///
/// These cover the guarantees callers rely on:
/// 1. One verdict per sample, in sample order
/// 2. Failing or panicking samples never stop the run
/// 3. A problem without stored samples produces no result at all

#[cfg(test)]
mod test_run_tests {
    use crate::error::KattisError;
    use crate::invoker::ProcessSolution;
    use crate::runner::{run_once, run_samples, TestRunner};
    use crate::store::SampleStore;
    use crate::types::{ProblemId, Sample, SampleSet, Verdict};
    use tempfile::TempDir;

    /// Sum of whitespace separated integers, failing on anything else
    fn sum(input: &str) -> Result<String, String> {
        let mut total = 0i64;
        for token in input.split_whitespace() {
            total += token
                .parse::<i64>()
                .map_err(|e| format!("not a number {:?}: {}", token, e))?;
        }
        Ok(total.to_string())
    }

    fn id(s: &str) -> ProblemId {
        ProblemId::new(s).unwrap()
    }

    fn stored(samples: Vec<Sample>) -> (TempDir, SampleStore) {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let store = SampleStore::new(dir.path());
        store.save(&id("sum"), &SampleSet::new(samples)).unwrap();
        (dir, store)
    }

    /// Test: a good sample passes, a malformed one errors, pass count is 1
    #[test]
    fn test_pass_then_error() {
        let (_dir, store) = stored(vec![Sample::new("2 3", "5"), Sample::new("bad", "")]);

        let result = TestRunner::new(&store).run(&id("sum"), &sum).unwrap();

        assert_eq!(result.total(), 2);
        assert_eq!(result.pass_count, 1);
        assert!(matches!(result.verdicts[0], Verdict::Pass { .. }));
        assert!(matches!(result.verdicts[1], Verdict::Error { ref detail } if detail.contains("bad")));
        assert!(!result.all_passed());
    }

    /// Test: verdict order and length follow the sample set
    #[test]
    fn test_verdicts_aligned_with_samples() {
        let samples = SampleSet::new(vec![
            Sample::new("1 1", "2\n"),
            Sample::new("x", "0"),
            Sample::new("1 2", "4\n"),
            Sample::new("10 -3", "7"),
            Sample::new("?", "0"),
        ]);

        let result = run_samples(&id("sum"), &samples, &sum);

        let labels: Vec<_> = result.verdicts.iter().map(|v| v.label()).collect();
        assert_eq!(labels, vec!["pass", "error", "fail", "pass", "error"]);
        assert_eq!(result.pass_count, 2);
        assert_eq!(
            result.verdicts[2],
            Verdict::Fail {
                actual: "3".to_string(),
                expected: "4\n".to_string()
            }
        );
    }

    /// Test: every sample erroring still yields a full result
    #[test]
    fn test_all_samples_error() {
        let samples = SampleSet::new(vec![Sample::new("1", "1"); 4]);
        let always_panics = |_: &str| -> Result<String, String> { panic!("not implemented") };

        let result = run_samples(&id("sum"), &samples, &always_panics);

        assert_eq!(result.total(), 4);
        assert_eq!(result.pass_count, 0);
        assert!(result
            .verdicts
            .iter()
            .all(|v| matches!(v, Verdict::Error { detail } if detail.contains("not implemented"))));
    }

    /// Test: an empty expected answer is only matched by empty output
    #[test]
    fn test_empty_expected_output() {
        let samples = SampleSet::new(vec![Sample::new("", "\n"), Sample::new("1", "")]);

        let result = run_samples(&id("sum"), &samples, &|input: &str| -> Result<String, String> {
            Ok(if input.is_empty() { String::new() } else { "0".to_string() })
        });

        assert!(result.verdicts[0].is_pass());
        assert!(!result.verdicts[1].is_pass());
    }

    /// Test: samples never downloaded is a hard failure
    #[test]
    fn test_missing_samples_is_not_found() {
        let dir = TempDir::new().unwrap();
        let store = SampleStore::new(dir.path());

        let result = TestRunner::new(&store).run(&id("never-downloaded"), &sum);

        assert!(matches!(result, Err(KattisError::NotFound(_))));
    }

    /// Test: the single-run executor returns raw output or the failure
    #[test]
    fn test_run_once() {
        assert_eq!(run_once(&sum, "4 5\n"), Ok("9".to_string()));
        assert!(run_once(&sum, "four five").is_err());
    }

    /// Test: a process-backed solution goes through the same runner
    #[cfg(unix)]
    #[test]
    fn test_process_solution_run() {
        let (_dir, store) = stored(vec![Sample::new("hello\n", "hello"), Sample::new("a", "b")]);

        let result = TestRunner::new(&store)
            .run(&id("sum"), &ProcessSolution::new("cat"))
            .unwrap();

        assert_eq!(result.pass_count, 1);
        assert!(matches!(result.verdicts[1], Verdict::Fail { .. }));
    }
}
