use axum::{
    extract::State,
    response::{Html, IntoResponse, Redirect, Response},
};
use tower_cookies::Cookies;

use crate::{
    model::{
        CrudRepository, ResourceType,
        entity::{Course, StudentProgressRow},
    },
    web::{
        AppState, RequestContext, WebError, WebResult,
        forms::{FormData, LoginForm},
        session, views,
    },
};

const INVALID_CREDENTIALS: &str = "Invalid credentials";

pub async fn login_page_handler(ctx: RequestContext) -> Html<String> {
    let roles = ctx.maybe_user().map(|u| u.roles());
    Html(views::account::login_page(&LoginForm::default(), None, roles))
}

#[tracing::instrument(skip_all)]
pub async fn login_submit_handler(
    State(state): State<AppState>,
    cookies: Cookies,
    data: FormData,
) -> WebResult<Response> {
    let form = LoginForm::from_data(&data);

    let Some(user) = session::authenticate(&state, &form.username, &form.password).await? else {
        tracing::info!(username = %form.username, "rejected login");
        let page = views::account::login_page(&form, Some(INVALID_CREDENTIALS), None);
        return Ok(Html(page).into_response());
    };

    session::login(&cookies, &user).await?;

    let roles = user.roles();
    match roles.landing_route() {
        Some(route) => Ok(Redirect::to(route).into_response()),
        None => {
            let page = views::account::login_page(&LoginForm::default(), None, Some(roles));
            Ok(Html(page).into_response())
        }
    }
}

pub async fn logout_handler(cookies: Cookies) -> Redirect {
    session::logout(&cookies);
    Redirect::to("/login")
}

pub async fn student_dashboard_handler(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> WebResult<Html<String>> {
    let user = ctx.user()?;
    let courses = Course::list(state.pool(), user)
        .await
        .map_err(|e| WebError::resource_fetch_error(ResourceType::Course, e))?;

    Ok(Html(views::account::student_dashboard(&courses, user.roles())))
}

pub async fn profile_handler(
    State(state): State<AppState>,
    ctx: RequestContext,
) -> WebResult<Html<String>> {
    let user = ctx.user()?;
    let progress = StudentProgressRow::for_student(state.pool(), user)
        .await
        .map_err(|e| WebError::resource_fetch_error(ResourceType::StudentProgress, e))?;

    Ok(Html(views::account::profile(&progress, user.roles())))
}
