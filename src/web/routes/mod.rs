use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::StatusCode,
    middleware,
    response::{Html, IntoResponse, Redirect},
    routing::{MethodRouter, get},
};
use tower_cookies::CookieManagerLayer;
use tower_http::{services::ServeDir, trace::TraceLayer};
use uuid::Uuid;

use crate::{
    model::ResourceType,
    web::{
        AppState, WebError, WebResult,
        capability::{Capability, require_capability},
        middlewares, views,
    },
};

pub mod account;
pub mod admin;
pub mod courses;
pub mod quizzes;

pub type RouteEntry = (&'static str, Capability, MethodRouter<AppState>);

/// Every route of the application with the capability it requires.
///
/// `upload_limit` caps the request body of the admin dashboard, whose lesson form carries
/// attachments.
pub fn route_table(upload_limit: usize) -> Vec<RouteEntry> {
    use Capability::*;

    vec![
        ("/", Public, get(index_handler)),
        (
            "/login",
            Public,
            get(account::login_page_handler).post(account::login_submit_handler),
        ),
        (
            "/logout",
            Public,
            get(account::logout_handler).post(account::logout_handler),
        ),
        (
            "/admin",
            Admin,
            get(admin::dashboard_handler)
                .post(admin::dashboard_submit_handler)
                .layer(DefaultBodyLimit::max(upload_limit)),
        ),
        ("/student", Student, get(account::student_dashboard_handler)),
        ("/profile", Authenticated, get(account::profile_handler)),
        (
            "/courses/{id}",
            Authenticated,
            get(courses::course_detail_handler),
        ),
        (
            "/students/{id}/delete",
            Admin,
            get(admin::student_delete_confirm_handler).post(admin::student_delete_handler),
        ),
        (
            "/lessons/{id}/delete",
            Admin,
            get(admin::lesson_delete_confirm_handler).post(admin::lesson_delete_handler),
        ),
        (
            "/modules/{id}/delete",
            Admin,
            get(admin::module_delete_confirm_handler).post(admin::module_delete_handler),
        ),
        ("/quizzes", Authenticated, get(quizzes::quiz_list_handler)),
        (
            "/quizzes/create",
            Admin,
            get(quizzes::quiz_create_page_handler).post(quizzes::quiz_create_handler),
        ),
        (
            "/quizzes/{id}",
            Authenticated,
            get(quizzes::quiz_detail_handler).post(quizzes::quiz_submit_handler),
        ),
    ]
}

pub fn build_app<S: Send + Sync + Clone + 'static>(state: AppState) -> Router<S> {
    let mut router = Router::new();
    for (path, capability, handler) in route_table(state.max_upload_bytes()) {
        let guard = middleware::from_fn_with_state(capability, require_capability);
        router = router.route(path, handler.route_layer(guard));
    }

    router
        .nest_service("/uploads", ServeDir::new(state.uploads_dir()))
        .fallback(fallback_handler)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            middlewares::extract_context_fn,
        ))
        .layer(CookieManagerLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn index_handler() -> Redirect {
    Redirect::to("/login")
}

async fn fallback_handler() -> impl IntoResponse {
    let page = views::error_page(
        StatusCode::NOT_FOUND,
        "There is nothing at this address.",
        None,
    );
    (StatusCode::NOT_FOUND, Html(page))
}

/// Ids in paths are uuids; anything else cannot name an existing row, so it is a 404 too.
pub(crate) fn parse_id(raw: &str, resource_type: ResourceType) -> WebResult<Uuid> {
    raw.parse()
        .map_err(|_| WebError::resource_not_found(resource_type))
}

#[cfg(test)]
mod test {
    use super::*;

    fn capability_of(path: &str) -> Option<Capability> {
        route_table(1024)
            .into_iter()
            .find(|(p, _, _)| *p == path)
            .map(|(_, c, _)| c)
    }

    #[test]
    fn admin_surfaces_require_admin() {
        for path in [
            "/admin",
            "/students/{id}/delete",
            "/lessons/{id}/delete",
            "/modules/{id}/delete",
            "/quizzes/create",
        ] {
            assert_eq!(capability_of(path), Some(Capability::Admin), "{path}");
        }
    }

    #[test]
    fn student_and_shared_pages() {
        assert_eq!(capability_of("/student"), Some(Capability::Student));
        for path in ["/profile", "/courses/{id}", "/quizzes", "/quizzes/{id}"] {
            assert_eq!(
                capability_of(path),
                Some(Capability::Authenticated),
                "{path}"
            );
        }
        assert_eq!(capability_of("/login"), Some(Capability::Public));
        assert_eq!(capability_of("/logout"), Some(Capability::Public));
    }

    #[test]
    fn paths_are_unique() {
        let table = route_table(1024);
        let mut paths: Vec<_> = table.iter().map(|(p, _, _)| *p).collect();
        paths.sort_unstable();
        paths.dedup();
        assert_eq!(paths.len(), table.len());
    }

    #[test]
    fn malformed_ids_are_not_found() {
        let err = parse_id("42", ResourceType::Quiz).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);

        let id = Uuid::new_v4();
        assert_eq!(parse_id(&id.to_string(), ResourceType::Quiz).unwrap(), id);
    }
}
