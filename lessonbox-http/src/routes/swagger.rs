use crate::handlers::{lessons, system, todos};
use crate::models::{CreateTodoRequest, ErrorResponse, HintRequest, HintResponse, SystemInfo};
use lessonbox_core::todo::{Todo, TodoPatch};

use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        todos::list_todos,
        todos::create_todo,
        todos::get_todo,
        todos::update_todo,
        todos::delete_todo,
        lessons::get_hint,
        system::get_system_info
    ),
    components(schemas(
        Todo,
        TodoPatch,
        CreateTodoRequest,
        HintRequest,
        HintResponse,
        ErrorResponse,
        SystemInfo
    )),
    tags(
        (name = "todos", description = "Todo API"),
        (name = "lessons", description = "Lesson hints")
    ),
    servers(
        (url = "http://localhost:3000", description = "Local development server"),
    )
)]
pub struct ApiDoc;
