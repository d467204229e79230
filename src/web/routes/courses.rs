use axum::{
    extract::{Path, State},
    response::Html,
};
use uuid::Uuid;

use crate::{
    model::{
        CrudRepository, ResourceType, ResourceTyped,
        entity::{Course, Module, Quiz},
    },
    web::{AppState, OrNotFound, RequestContext, WebError, WebResult, routes::parse_id, views},
};

/// Course page: the course plus every quiz hanging off one of its modules.
#[tracing::instrument(skip(state, ctx))]
pub async fn course_detail_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ctx: RequestContext,
) -> WebResult<Html<String>> {
    let user = ctx.user()?;
    let id = parse_id(&id, Course::get_resource_type())?;

    let course = Course::find_by_id(state.pool(), user, id)
        .await
        .or_not_found(Course::get_resource_type())?;

    let module_ids: Vec<Uuid> = Module::all_by_course(state.pool(), user, course.id())
        .await
        .map_err(|e| WebError::resource_fetch_error(ResourceType::Module, e))?
        .iter()
        .map(Module::id)
        .collect();

    let quizzes = Quiz::find_by_modules(state.pool(), user, &module_ids)
        .await
        .map_err(|e| WebError::resource_fetch_error(ResourceType::Quiz, e))?;

    Ok(Html(views::courses::course_detail(
        &course,
        &quizzes,
        Some(user.roles()),
    )))
}
