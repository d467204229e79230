use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use tower_cookies::Cookies;

use crate::{
    Config, auth,
    model::{CrudRepository, ResourceTyped, entity::UserEntity},
    web::{
        AppState, AuthenticatedUser, RequestContext, WebResult, error::WebError,
        session::AUTH_TOKEN,
    },
};

/// Resolves the session cookie into a [`RequestContext`]. A missing, forged or expired token,
/// or one for a user that no longer exists, yields an anonymous context.
pub async fn extract_context_fn(
    State(state): State<AppState>,
    cookies: Cookies,
    mut req: Request,
    next: Next,
) -> Result<Response, WebError> {
    let ctx = resolve_context(&state, &cookies).await?;
    req.extensions_mut().insert(ctx);
    Ok(next.run(req).await)
}

async fn resolve_context(state: &AppState, cookies: &Cookies) -> WebResult<RequestContext> {
    let Some(token) = cookies.get(AUTH_TOKEN) else {
        return Ok(RequestContext::anonymous());
    };

    let key = Config::get_or_init(false).await.app().jwt();
    let claims = match auth::decode_session(token.value(), key) {
        Ok(claims) => claims,
        Err(e) => {
            tracing::warn!("discarding session cookie: {}", e);
            return Ok(RequestContext::anonymous());
        }
    };

    let Some(id) = claims.user_id() else {
        tracing::warn!("session cookie has malformed subject: {}", claims.sub);
        return Ok(RequestContext::anonymous());
    };

    let user = UserEntity::find_by_id(state.pool(), &AuthenticatedUser::system(), id)
        .await
        .map_err(|e| WebError::resource_fetch_error(UserEntity::get_resource_type(), e))?;

    Ok(match user {
        Some(user) => RequestContext::new(Some(AuthenticatedUser::new(id, user.roles()))),
        None => {
            tracing::debug!("session refers to deleted user {}", id);
            RequestContext::anonymous()
        }
    })
}
