//! # lessonbox: interactive Python lessons and a todo service
//!
//! This crate holds everything the HTTP server and the CLI share:
//!
//! - Lesson definitions loaded from a directory of JSON files ([`lesson`])
//! - Evaluation of submitted Python code against a lesson's test
//!   expressions ([`evaluator`])
//! - Hints forwarded to an external text-generation service ([`hint`])
//! - An injectable todo repository ([`todo`])
//! - Configuration ([`config`]) and the shared error type ([`error`])
//!
//! ## Evaluation pipeline
//!
//! ```text
//! submitted code ─┐
//!                 ├─> Python harness (subprocess) ─> JSON report ─> EvaluationReport
//! lesson tests  ──┘
//! ```
//!
//! The evaluator does not sandbox user code. Submitted code runs with the
//! privileges of the process that hosts the evaluator; see
//! [`evaluator::python`] for the details of what is and is not isolated.

pub mod config;
pub mod error;
pub mod evaluator;
pub mod hint;
pub mod lesson;
pub mod todo;

// Re-exports
pub use error::*;
