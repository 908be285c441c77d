use std::fmt::Write as _;

use lessonbox_core::{
    InternalResult,
    evaluator::{EvaluationReport, Evaluator, TestStatus},
    lesson::LessonStore,
};
use tracing::debug;

/// Evaluate `code` against the tests of lesson `lesson_id`
pub async fn check_solution(
    store: &LessonStore,
    lesson_id: &str,
    code: &str,
    evaluator: &dyn Evaluator,
) -> InternalResult<EvaluationReport> {
    let lesson = store.require(lesson_id)?;
    debug!(
        "Checking lesson {} against {} tests",
        lesson.id,
        lesson.tests.len()
    );
    Ok(evaluator.evaluate(code, &lesson.tests).await?)
}

/// One line per test, then the captured output and a summary
pub fn render_report(report: &EvaluationReport) -> String {
    let mut out = String::new();

    if let Some(error) = &report.error_message {
        let _ = writeln!(out, "Your code raised an error: {}", error);
    }

    for result in &report.results {
        let status = result.status();
        let _ = match status {
            TestStatus::Passed => writeln!(out, "[passed]  {}", result.expression),
            TestStatus::Failed => writeln!(
                out,
                "[failed]  {}: expected {}, got {}",
                result.expression,
                result.expected,
                result
                    .actual
                    .as_ref()
                    .map(ToString::to_string)
                    .unwrap_or_else(|| "nothing".to_string())
            ),
            TestStatus::Errored => writeln!(
                out,
                "[errored] {}: {}",
                result.expression,
                result.error.as_deref().unwrap_or_default()
            ),
        };
    }

    if !report.output.is_empty() {
        let _ = writeln!(out, "--- output ---");
        out.push_str(&report.output);
        if !report.output.ends_with('\n') {
            out.push('\n');
        }
    }

    let _ = write!(
        out,
        "{} / {} passed",
        report.passed_count(),
        report.results.len()
    );
    out
}
