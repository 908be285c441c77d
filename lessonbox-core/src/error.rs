use thiserror::Error;

use crate::evaluator::EvaluatorError;
use crate::hint::HintError;
use crate::lesson::LessonError;
use crate::todo::TodoError;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Lesson error: {0}")]
    Lesson(#[from] LessonError),
    #[error("Evaluator error: {0}")]
    Evaluator(#[from] EvaluatorError),
    #[error("Hint error: {0}")]
    Hint(#[from] HintError),
    #[error("Todo error: {0}")]
    Todo(#[from] TodoError),
    #[error("Config error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

pub type InternalResult<T> = Result<T, Error>;

impl Error {
    pub fn internal<S: Into<String>>(message: S) -> Self {
        Error::Internal(message.into())
    }
}
