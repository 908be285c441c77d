//! Lesson definitions and the store that loads them.
//!
//! A lesson is one JSON file:
//!
//! ```json
//! {
//!   "id": "9",
//!   "title": "Error Handling",
//!   "description": "...",
//!   "problem": "...",
//!   "boilerplate": "def divide_numbers(a, b):\n    pass\n",
//!   "tests": [{ "expression": "divide_numbers(10, 2)", "expected": 5.0 }]
//! }
//! ```

pub mod store;

pub use store::LessonStore;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_valid::Validate;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct Lesson {
    #[validate(min_length = 1)]
    pub id: String,
    #[validate(min_length = 1)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub problem: String,
    #[serde(default)]
    pub boilerplate: String,
    #[serde(default)]
    #[validate]
    pub tests: Vec<TestCase>,
}

/// A Python expression evaluated in the scope of the submitted code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct TestCase {
    #[validate(min_length = 1)]
    pub expression: String,
    #[serde(default)]
    pub expected: Value,
}

impl TestCase {
    pub fn new(expression: impl Into<String>, expected: impl Into<Value>) -> Self {
        Self {
            expression: expression.into(),
            expected: expected.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum LessonError {
    #[error("Lesson directory not found: {0}")]
    DirectoryNotFound(PathBuf),

    #[error("Invalid lesson file pattern: {0}")]
    Pattern(#[from] glob::PatternError),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid lesson in {path}: {message}")]
    Invalid { path: PathBuf, message: String },

    #[error("Duplicate lesson id {id} in {path}")]
    Duplicate { id: String, path: PathBuf },

    #[error("Lesson not found: {0}")]
    NotFound(String),
}

pub type LessonResult<T> = Result<T, LessonError>;
