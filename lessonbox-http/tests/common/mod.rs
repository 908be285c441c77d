//! Shared app state for the route tests

#![allow(dead_code)]

use std::sync::Arc;

use lessonbox_core::{
    evaluator::{Evaluator, PythonEvaluator},
    hint::HintService,
    lesson::{Lesson, LessonStore, TestCase},
    todo::InMemoryTodoRepository,
};
use serde_json::json;

use lessonbox_http::server::AppState;

/// The lessons every test state starts with
pub fn test_lessons() -> Vec<Lesson> {
    vec![
        Lesson {
            id: "1".to_string(),
            title: "Variables".to_string(),
            description: "Store values in names.".to_string(),
            problem: "Create a variable `greeting` holding 'Hello'.".to_string(),
            boilerplate: "greeting = None\n".to_string(),
            tests: vec![TestCase::new("greeting", json!("Hello"))],
        },
        Lesson {
            id: "9".to_string(),
            title: "Error Handling".to_string(),
            description: "Catch exceptions.".to_string(),
            problem: "Write divide_numbers(a, b) that handles bad input.".to_string(),
            boilerplate: "def divide_numbers(a, b):\n    pass\n".to_string(),
            tests: vec![
                TestCase::new("divide_numbers(10, 2)", json!(5.0)),
                TestCase::new("divide_numbers(5, 0)", json!("Error: Cannot divide by zero!")),
                TestCase::new("divide_numbers(10, 'a')", json!("Error: Invalid input types!")),
            ],
        },
    ]
}

/// Create a test AppState with the given evaluator and hint service
pub fn create_test_state_with(evaluator: Arc<dyn Evaluator>, hints: HintService) -> AppState {
    AppState::new(
        LessonStore::from_lessons(test_lessons()),
        evaluator,
        hints,
        Arc::new(InMemoryTodoRepository::new()),
    )
    .expect("templates must compile")
}

/// Create a test AppState with a Python evaluator and hints disabled
pub fn create_test_state() -> AppState {
    create_test_state_with(
        Arc::new(PythonEvaluator::default()),
        HintService::disabled("OPENAI_API_KEY"),
    )
}
