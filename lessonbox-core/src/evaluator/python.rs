//! Evaluation through a Python interpreter subprocess.
//!
//! Each submission starts a fresh interpreter running an embedded harness.
//! The harness reads `{code, tests}` as JSON from stdin, executes the code,
//! evaluates every test expression in the resulting scope and compares it to
//! the expected value with Python's own `==`. It prints a marker line followed
//! by a JSON report on stdout; output printed by the submission is captured
//! separately and returned in [`EvaluationReport::output`].
//!
//! # No sandbox
//!
//! Submitted code runs with the full privileges of this process: it can read
//! and write files, open network connections and spawn processes. The only
//! separation is a fresh temporary working directory per submission and a
//! wall-clock timeout. Do not expose this evaluator to untrusted users without
//! putting an isolation boundary (container, VM, seccomp) around it.

use async_trait::async_trait;
use serde::Serialize;
use std::{process::Stdio, time::Duration};
use tokio::{io::AsyncWriteExt, process::Command, time::timeout};
use tracing::{debug, warn};

use super::{EvaluationReport, Evaluator, EvaluatorError, EvaluatorResult};
use crate::{config::EvaluatorConfig, lesson::TestCase};

const HARNESS: &str = include_str!("harness.py");
const REPORT_MARKER: &str = "@@LESSONBOX_REPORT@@";

#[derive(Serialize)]
struct HarnessInput<'a> {
    code: &'a str,
    tests: &'a [TestCase],
}

#[derive(Debug, Clone)]
pub struct PythonEvaluator {
    python: String,
    timeout: Duration,
}

impl Default for PythonEvaluator {
    fn default() -> Self {
        Self::from_config(&EvaluatorConfig::default())
    }
}

impl PythonEvaluator {
    pub fn new(python: impl Into<String>, timeout: Duration) -> Self {
        Self {
            python: python.into(),
            timeout,
        }
    }

    pub fn from_config(config: &EvaluatorConfig) -> Self {
        Self::new(config.python.clone(), config.timeout)
    }

    pub fn interpreter(&self) -> &str {
        &self.python
    }

    #[tracing::instrument(skip(self, code, tests), fields(tests = tests.len()))]
    async fn run_harness(
        &self,
        code: &str,
        tests: &[TestCase],
    ) -> EvaluatorResult<EvaluationReport> {
        let input = serde_json::to_vec(&HarnessInput { code, tests })?;
        let workdir = tempfile::Builder::new().prefix("lessonbox-").tempdir()?;

        let mut child = Command::new(&self.python)
            .arg("-c")
            .arg(HARNESS)
            .current_dir(workdir.path())
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| EvaluatorError::Spawn {
                interpreter: self.python.clone(),
                source,
            })?;

        let mut stdin = child.stdin.take();
        let run = async move {
            if let Some(stdin) = stdin.as_mut() {
                stdin.write_all(&input).await?;
                stdin.shutdown().await?;
            }
            drop(stdin);
            child.wait_with_output().await
        };

        // Dropping `run` on timeout drops the child, which kills it.
        let output = match timeout(self.timeout, run).await {
            Ok(output) => output?,
            Err(_) => {
                warn!("Submission exceeded {:?}, interpreter killed", self.timeout);
                return Ok(EvaluationReport::timed_out(tests, self.timeout));
            }
        };

        let stdout = String::from_utf8_lossy(&output.stdout);
        let stderr = String::from_utf8_lossy(&output.stderr);
        if !stderr.is_empty() {
            debug!("harness stderr: {}", stderr);
        }

        parse_report(&stdout).ok_or_else(|| EvaluatorError::MalformedReport {
            status: output.status.to_string(),
            stderr: stderr.trim().to_string(),
        })
    }
}

fn parse_report(stdout: &str) -> Option<EvaluationReport> {
    let (_, json) = stdout.rsplit_once(REPORT_MARKER)?;
    serde_json::from_str(json.trim()).ok()
}

#[async_trait]
impl Evaluator for PythonEvaluator {
    async fn evaluate(
        &self,
        code: &str,
        tests: &[TestCase],
    ) -> EvaluatorResult<EvaluationReport> {
        let report = self.run_harness(code, tests).await?;
        debug!(
            "Evaluation finished: {}/{} passed",
            report.passed_count(),
            report.results.len()
        );
        Ok(report)
    }
}
