use axum::{
    Form, Json,
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
};
use lessonbox_core::{evaluator::EvaluationReport, lesson::Lesson};
use tera::Context;
use tracing::{debug, info};

use crate::error::AppError;
use crate::models::{HintRequest, HintResponse, LessonPage, LessonSummary, SubmitForm};
use crate::server::AppState;
use crate::session::{new_session, session_from_headers};

/// Home page listing all lessons
pub async fn home(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let lessons: Vec<LessonSummary> = state
        .lessons
        .list()
        .into_iter()
        .map(LessonSummary::from)
        .collect();

    let mut context = Context::new();
    context.insert("lessons", &lessons);
    Ok(Html(state.templates.render("home.html", &context)?))
}

/// Lesson page with the visitor's latest draft, or the boilerplate
pub async fn view_lesson(
    State(state): State<AppState>,
    Path(lesson_id): Path<String>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let Some(lesson) = state.lessons.get(&lesson_id) else {
        return not_found_page(&state, &lesson_id);
    };

    let draft = session_from_headers(&headers)
        .and_then(|session_id| state.drafts.get(&session_id, &lesson_id));
    let code = draft
        .as_ref()
        .map(|draft| draft.code.as_str())
        .unwrap_or(lesson.boilerplate.as_str());

    let html = render_lesson(&state, lesson, code, None)?;
    Ok(Html(html).into_response())
}

/// Evaluate submitted code and render per-test results
pub async fn submit_lesson(
    State(state): State<AppState>,
    Path(lesson_id): Path<String>,
    headers: HeaderMap,
    Form(form): Form<SubmitForm>,
) -> Result<Response, AppError> {
    let Some(lesson) = state.lessons.get(&lesson_id) else {
        return not_found_page(&state, &lesson_id);
    };

    let (session_id, set_cookie) = match session_from_headers(&headers) {
        Some(session_id) => (session_id, None),
        None => {
            let (session_id, cookie) =
                new_session().map_err(|e| AppError::Internal(e.to_string()))?;
            (session_id, Some(cookie))
        }
    };
    let draft = state.drafts.save(&session_id, &lesson_id, &form.code);

    let report = state.evaluator.evaluate(&form.code, &lesson.tests).await?;
    info!(
        "Lesson {} attempt {}: {}/{} passed",
        lesson_id,
        draft.attempts,
        report.passed_count(),
        report.results.len()
    );

    let html = render_lesson(&state, lesson, &form.code, Some(&report))?;
    let mut response = Html(html).into_response();
    if let Some(cookie) = set_cookie {
        response.headers_mut().insert(header::SET_COOKIE, cookie);
    }
    Ok(response)
}

/// Get a hint for a lesson
///
/// The body is optional; attempts and code default to the visitor's draft.
#[utoipa::path(
    post,
    path = "/lesson/{lesson_id}/get_hint",
    tag = "lessons",
    request_body(content = HintRequest, description = "Optional hint context"),
    responses(
        (status = 200, description = "Hint generated", body = HintResponse),
        (status = 400, description = "Invalid payload", body = crate::models::ErrorResponse),
        (status = 404, description = "Lesson not found", body = crate::models::ErrorResponse),
        (status = 502, description = "Hint service failed", body = crate::models::ErrorResponse),
        (status = 503, description = "Hints not configured", body = crate::models::ErrorResponse)
    ),
    params(
        ("lesson_id" = String, Path, description = "Lesson identifier")
    )
)]
pub async fn get_hint(
    State(state): State<AppState>,
    Path(lesson_id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<HintResponse>, AppError> {
    let lesson = state.lessons.require(&lesson_id)?;

    let request: HintRequest = if body.iter().all(u8::is_ascii_whitespace) {
        HintRequest::default()
    } else {
        serde_json::from_slice(&body)
            .map_err(|e| AppError::BadRequest(format!("Invalid payload: {}", e)))?
    };

    let draft = session_from_headers(&headers)
        .and_then(|session_id| state.drafts.get(&session_id, &lesson_id));
    let attempts = request
        .attempts
        .or_else(|| draft.as_ref().map(|d| d.attempts))
        .unwrap_or(0);
    let code = request.code.or_else(|| draft.map(|d| d.code));
    debug!("Hint requested for lesson {} after {} attempts", lesson_id, attempts);

    let hint = state
        .hints
        .get_hint(lesson, attempts, code.as_deref())
        .await?;

    Ok(Json(HintResponse { hint }))
}

fn render_lesson(
    state: &AppState,
    lesson: &Lesson,
    code: &str,
    report: Option<&EvaluationReport>,
) -> Result<String, AppError> {
    let page = LessonPage {
        lesson,
        code,
        report,
        passed_count: report.map(EvaluationReport::passed_count).unwrap_or(0),
        hints_enabled: state.hints.is_enabled(),
    };
    let context = Context::from_serialize(&page)?;
    Ok(state.templates.render("lesson.html", &context)?)
}

fn not_found_page(state: &AppState, lesson_id: &str) -> Result<Response, AppError> {
    let mut context = Context::new();
    context.insert("message", &format!("There is no lesson \"{}\".", lesson_id));
    let html = state.templates.render("404.html", &context)?;
    Ok((StatusCode::NOT_FOUND, Html(html)).into_response())
}
