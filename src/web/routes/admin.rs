//! Admin dashboard and the delete confirmations reachable from it.
//!
//! The dashboard POST carries one of several forms, told apart by a marker field (see
//! [`DashboardIntent`]). A valid submission is persisted and answered with a redirect back to
//! the dashboard; an invalid one re-renders the dashboard with only that form bound.

use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
};
use uuid::Uuid;

use crate::{
    auth,
    model::{
        CrudRepository, ResourceType,
        entity::{Course, Lesson, LessonCreate, Module, UserEntity, UserEntityCreate},
    },
    utils::uploads,
    web::{
        AppState, AuthenticatedUser, OrNotFound, RequestContext, WebError, WebResult,
        forms::{
            Bound, CourseForm, DashboardIntent, FormData, FormErrors, LessonForm, ModuleForm,
            StudentForm, Validate,
        },
        routes::parse_id,
        views::{
            self,
            admin::{DashboardForms, DashboardListings},
        },
    },
};

const ADMIN_ROUTE: &str = "/admin";
const LESSON_UPLOADS: &str = "lessons";

async fn load_listings(
    state: &AppState,
    user: &AuthenticatedUser,
) -> WebResult<DashboardListings> {
    let mm = state.pool();

    let students = UserEntity::list_students(mm, user)
        .await
        .map_err(|e| WebError::resource_fetch_error(ResourceType::Student, e))?;
    let lessons = Lesson::list(mm, user)
        .await
        .map_err(|e| WebError::resource_fetch_error(ResourceType::Lesson, e))?;
    let modules = Module::list(mm, user)
        .await
        .map_err(|e| WebError::resource_fetch_error(ResourceType::Module, e))?;
    let courses = Course::list(mm, user)
        .await
        .map_err(|e| WebError::resource_fetch_error(ResourceType::Course, e))?;

    Ok(DashboardListings {
        students,
        lessons,
        modules,
        courses,
    })
}

async fn render_dashboard(
    state: &AppState,
    user: &AuthenticatedUser,
    forms: DashboardForms,
) -> WebResult<Html<String>> {
    let listings = load_listings(state, user).await?;
    Ok(Html(views::admin::dashboard(&forms, &listings, user.roles())))
}

pub async fn dashboard_handler(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> WebResult<Html<String>> {
    let user = ctx.user()?;
    render_dashboard(&state, user, DashboardForms::default()).await
}

#[tracing::instrument(skip_all)]
pub async fn dashboard_submit_handler(
    State(state): State<AppState>,
    ctx: RequestContext,
    data: FormData,
) -> WebResult<Response> {
    let user = ctx.user()?;

    let Some(intent) = DashboardIntent::from_data(&data) else {
        let page = render_dashboard(&state, user, DashboardForms::default()).await?;
        return Ok(page.into_response());
    };

    // `None` means the submission went through
    let rejected = match intent {
        DashboardIntent::AddStudent(form) => add_student(&state, user, form).await?,
        DashboardIntent::AddLesson(form) => add_lesson(&state, user, form).await?,
        DashboardIntent::AddModule(form) => add_module(&state, user, form).await?,
        DashboardIntent::AddCourse(form) => add_course(&state, user, form).await?,
        DashboardIntent::DeleteCourse(raw_id) => {
            delete_course(&state, user, raw_id.as_deref()).await?;
            None
        }
    };

    match rejected {
        None => Ok(Redirect::to(ADMIN_ROUTE).into_response()),
        Some(forms) => Ok(render_dashboard(&state, user, forms).await?.into_response()),
    }
}

async fn add_student(
    state: &AppState,
    user: &AuthenticatedUser,
    form: StudentForm,
) -> WebResult<Option<DashboardForms>> {
    let rejected = |form: StudentForm, errors: FormErrors| {
        Some(DashboardForms {
            student: Bound::new(form, errors),
            ..Default::default()
        })
    };

    let registration = match form
        .validate(state.pool(), user)
        .await
        .map_err(|e| WebError::resource_fetch_error(ResourceType::Student, e))?
    {
        Ok(registration) => registration,
        Err(errors) => return Ok(rejected(form, errors)),
    };

    let password_hash =
        auth::hash_password(&registration.password).map_err(WebError::server_crypt_error)?;
    let data = UserEntityCreate {
        username: registration.username,
        email: registration.email,
        first_name: registration.first_name,
        last_name: registration.last_name,
        password_hash,
        is_admin: false,
        is_student: true,
    };

    match UserEntity::create(state.pool(), user, data).await {
        Ok(student) => {
            tracing::info!(username = %student.username(), "student registered");
            Ok(None)
        }
        // lost a race against another registration with the same name
        Err(e) if e.is_unique_violation() => {
            let mut errors = FormErrors::default();
            errors.add("username", "A user with that username already exists.");
            Ok(rejected(form, errors))
        }
        Err(e) => Err(WebError::resource_fetch_error(ResourceType::Student, e)),
    }
}

async fn add_lesson(
    state: &AppState,
    user: &AuthenticatedUser,
    form: LessonForm,
) -> WebResult<Option<DashboardForms>> {
    let draft = match form
        .validate(state.pool(), user)
        .await
        .map_err(|e| WebError::resource_fetch_error(ResourceType::Lesson, e))?
    {
        Ok(draft) => draft,
        Err(errors) => {
            return Ok(Some(DashboardForms {
                lesson: Bound::new(form, errors),
                ..Default::default()
            }));
        }
    };

    let attachment = match &draft.attachment {
        Some(file) => Some(
            uploads::store_upload(
                state.uploads_dir(),
                LESSON_UPLOADS,
                &file.file_name,
                &file.bytes,
            )
            .await
            .map_err(WebError::server_io_error)?,
        ),
        None => None,
    };

    let lesson = Lesson::create(
        state.pool(),
        user,
        LessonCreate {
            title: draft.title,
            content: draft.content,
            attachment,
        },
    )
    .await
    .map_err(|e| WebError::resource_fetch_error(ResourceType::Lesson, e))?;

    tracing::info!(lesson = %lesson.id(), "lesson created");
    Ok(None)
}

async fn add_module(
    state: &AppState,
    user: &AuthenticatedUser,
    form: ModuleForm,
) -> WebResult<Option<DashboardForms>> {
    let data = match form
        .validate(state.pool(), user)
        .await
        .map_err(|e| WebError::resource_fetch_error(ResourceType::Module, e))?
    {
        Ok(data) => data,
        Err(errors) => {
            return Ok(Some(DashboardForms {
                module: Bound::new(form, errors),
                ..Default::default()
            }));
        }
    };

    let module = Module::create(state.pool(), user, data)
        .await
        .map_err(|e| WebError::resource_fetch_error(ResourceType::Module, e))?;

    tracing::info!(module = %module.id(), "module created");
    Ok(None)
}

async fn add_course(
    state: &AppState,
    user: &AuthenticatedUser,
    form: CourseForm,
) -> WebResult<Option<DashboardForms>> {
    let data = match form
        .validate(state.pool(), user)
        .await
        .map_err(|e| WebError::resource_fetch_error(ResourceType::Course, e))?
    {
        Ok(data) => data,
        Err(errors) => {
            return Ok(Some(DashboardForms {
                course: Bound::new(form, errors),
                ..Default::default()
            }));
        }
    };

    let course = Course::create(state.pool(), user, data)
        .await
        .map_err(|e| WebError::resource_fetch_error(ResourceType::Course, e))?;

    tracing::info!(course = %course.id(), "course created");
    Ok(None)
}

/// Unknown ids are a no-op; a missing or malformed id is a bad request.
async fn delete_course(
    state: &AppState,
    user: &AuthenticatedUser,
    raw_id: Option<&str>,
) -> WebResult<()> {
    let id: Uuid = raw_id
        .and_then(|raw| raw.trim().parse().ok())
        .ok_or_else(|| {
            WebError::resource_bad_request(
                ResourceType::Course,
                format!("invalid course_id: {:?}", raw_id),
            )
        })?;

    let removed = Course::delete_by_id(state.pool(), user, id)
        .await
        .map_err(|e| WebError::resource_fetch_error(ResourceType::Course, e))?;

    tracing::info!(course = %id, removed, "course delete");
    Ok(())
}

// Delete confirmations

async fn find_student(
    state: &AppState,
    user: &AuthenticatedUser,
    id: &str,
) -> WebResult<UserEntity> {
    let id = parse_id(id, ResourceType::Student)?;
    UserEntity::find_student(state.pool(), user, id)
        .await
        .or_not_found(ResourceType::Student)
}

pub async fn student_delete_confirm_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ctx: RequestContext,
) -> WebResult<Html<String>> {
    let user = ctx.user()?;
    let student = find_student(&state, user, &id).await?;

    let action = format!("/students/{}/delete", student.id());
    Ok(Html(views::admin::confirm_delete(
        ResourceType::Student.label(),
        student.username(),
        &action,
        Some(user.roles()),
    )))
}

#[tracing::instrument(skip(state, ctx))]
pub async fn student_delete_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ctx: RequestContext,
) -> WebResult<Redirect> {
    let user = ctx.user()?;
    let student = find_student(&state, user, &id).await?;

    student
        .delete(state.pool(), user)
        .await
        .map_err(|e| WebError::resource_fetch_error(ResourceType::Student, e))?;

    Ok(Redirect::to(ADMIN_ROUTE))
}

async fn find_lesson(state: &AppState, user: &AuthenticatedUser, id: &str) -> WebResult<Lesson> {
    let id = parse_id(id, ResourceType::Lesson)?;
    Lesson::find_by_id(state.pool(), user, id)
        .await
        .or_not_found(ResourceType::Lesson)
}

pub async fn lesson_delete_confirm_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ctx: RequestContext,
) -> WebResult<Html<String>> {
    let user = ctx.user()?;
    let lesson = find_lesson(&state, user, &id).await?;

    let action = format!("/lessons/{}/delete", lesson.id());
    Ok(Html(views::admin::confirm_delete(
        ResourceType::Lesson.label(),
        lesson.title(),
        &action,
        Some(user.roles()),
    )))
}

#[tracing::instrument(skip(state, ctx))]
pub async fn lesson_delete_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ctx: RequestContext,
) -> WebResult<Redirect> {
    let user = ctx.user()?;
    let lesson = find_lesson(&state, user, &id).await?;

    lesson
        .delete(state.pool(), user)
        .await
        .map_err(|e| WebError::resource_fetch_error(ResourceType::Lesson, e))?;

    Ok(Redirect::to(ADMIN_ROUTE))
}

async fn find_module(state: &AppState, user: &AuthenticatedUser, id: &str) -> WebResult<Module> {
    let id = parse_id(id, ResourceType::Module)?;
    Module::find_by_id(state.pool(), user, id)
        .await
        .or_not_found(ResourceType::Module)
}

pub async fn module_delete_confirm_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ctx: RequestContext,
) -> WebResult<Html<String>> {
    let user = ctx.user()?;
    let module = find_module(&state, user, &id).await?;

    let action = format!("/modules/{}/delete", module.id());
    Ok(Html(views::admin::confirm_delete(
        ResourceType::Module.label(),
        module.title(),
        &action,
        Some(user.roles()),
    )))
}

#[tracing::instrument(skip(state, ctx))]
pub async fn module_delete_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ctx: RequestContext,
) -> WebResult<Redirect> {
    let user = ctx.user()?;
    let module = find_module(&state, user, &id).await?;

    module
        .delete(state.pool(), user)
        .await
        .map_err(|e| WebError::resource_fetch_error(ResourceType::Module, e))?;

    Ok(Redirect::to(ADMIN_ROUTE))
}
