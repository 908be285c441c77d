//! Runs submitted code against a lesson's test expressions.

pub mod python;

pub use python::PythonEvaluator;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

use crate::lesson::TestCase;

/// Outcome of one test expression
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub expression: String,
    pub expected: Value,
    #[serde(default)]
    pub actual: Option<Value>,
    #[serde(default)]
    pub error: Option<String>,
    pub passed: bool,
}

impl EvaluationResult {
    pub fn failed(test: &TestCase, error: impl Into<String>) -> Self {
        Self {
            expression: test.expression.clone(),
            expected: test.expected.clone(),
            actual: None,
            error: Some(error.into()),
            passed: false,
        }
    }

    pub fn status(&self) -> TestStatus {
        match (self.passed, &self.error) {
            (true, _) => TestStatus::Passed,
            (false, Some(_)) => TestStatus::Errored,
            (false, None) => TestStatus::Failed,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
#[strum(serialize_all = "lowercase")]
pub enum TestStatus {
    Passed,
    Failed,
    Errored,
}

/// Everything produced by one submission
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub results: Vec<EvaluationResult>,
    /// Set when the submitted code itself raised
    #[serde(default)]
    pub error_message: Option<String>,
    /// Anything the code printed while running
    #[serde(default)]
    pub output: String,
}

impl EvaluationReport {
    /// A report where every test failed with the same error
    pub fn all_failed(tests: &[TestCase], error: impl Into<String>) -> Self {
        let error = error.into();
        Self {
            results: tests
                .iter()
                .map(|test| EvaluationResult::failed(test, error.clone()))
                .collect(),
            error_message: Some(error),
            output: String::new(),
        }
    }

    pub fn timed_out(tests: &[TestCase], limit: Duration) -> Self {
        Self::all_failed(
            tests,
            format!("Execution timed out after {} ms", limit.as_millis()),
        )
    }

    pub fn passed_count(&self) -> usize {
        self.results.iter().filter(|r| r.passed).count()
    }

    /// True when there is at least one test and all of them passed
    pub fn all_passed(&self) -> bool {
        !self.results.is_empty() && self.results.iter().all(|r| r.passed)
    }
}

#[derive(Error, Debug)]
pub enum EvaluatorError {
    #[error("Failed to start interpreter {interpreter}: {source}")]
    Spawn {
        interpreter: String,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error talking to the interpreter: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to encode harness input: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Interpreter produced no report (exit status {status}): {stderr}")]
    MalformedReport { status: String, stderr: String },
}

pub type EvaluatorResult<T> = Result<T, EvaluatorError>;

/// Evaluates submitted code against test expressions.
///
/// Errors raised by the submitted code are part of the returned report;
/// `Err` is reserved for failures of the evaluator itself.
#[mockall::automock]
#[async_trait]
pub trait Evaluator: Send + Sync {
    async fn evaluate(&self, code: &str, tests: &[TestCase])
    -> EvaluatorResult<EvaluationReport>;
}
