use lessonbox_core::{evaluator::EvaluationReport, lesson::Lesson};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Form posted by the lesson page
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubmitForm {
    #[serde(default)]
    pub code: String,
}

/// Hint request body. Both fields fall back to the visitor's latest draft.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct HintRequest {
    /// Number of attempts made so far
    #[serde(default)]
    pub attempts: Option<u32>,

    /// The code currently in the editor
    #[serde(default)]
    pub code: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct HintResponse {
    pub hint: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Entry on the home page
#[derive(Debug, Serialize)]
pub struct LessonSummary<'a> {
    pub id: &'a str,
    pub title: &'a str,
    pub description: &'a str,
}

impl<'a> From<&'a Lesson> for LessonSummary<'a> {
    fn from(lesson: &'a Lesson) -> Self {
        Self {
            id: &lesson.id,
            title: &lesson.title,
            description: &lesson.description,
        }
    }
}

/// Everything `lesson.html` renders
#[derive(Debug, Serialize)]
pub struct LessonPage<'a> {
    pub lesson: &'a Lesson,
    pub code: &'a str,
    pub report: Option<&'a EvaluationReport>,
    pub passed_count: usize,
    pub hints_enabled: bool,
}
