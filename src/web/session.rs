//! Binding and clearing the session cookie.

use tower_cookies::{Cookie, Cookies, cookie::SameSite};

use crate::{
    Config,
    auth::{self, SessionClaims},
    model::{ResourceTyped, entity::UserEntity},
    web::{AppState, AuthenticatedUser, WebError, WebResult},
};

pub static AUTH_TOKEN: &str = "SID";

/// Looks the user up by name and checks the password. Unknown users and wrong passwords both
/// come back as `Ok(None)`.
#[tracing::instrument(skip(state, password))]
pub async fn authenticate(
    state: &AppState,
    username: &str,
    password: &str,
) -> WebResult<Option<UserEntity>> {
    let system = AuthenticatedUser::system();
    let found = UserEntity::find_by_username(state.pool(), &system, username)
        .await
        .map_err(|e| WebError::resource_fetch_error(UserEntity::get_resource_type(), e))?;

    let Some(user) = found else {
        return Ok(None);
    };

    let verified =
        auth::verify_password(user.hash(), password).map_err(WebError::server_crypt_error)?;
    Ok(verified.then_some(user))
}

/// Issues a signed session token for `user` and stores it in the `SID` cookie.
pub async fn login(cookies: &Cookies, user: &UserEntity) -> WebResult<()> {
    let key = Config::get_or_init(false).await.app().jwt();
    let token = auth::encode_session(&SessionClaims::for_user(user.id()), key)
        .map_err(|e| WebError::server_crypt_error(e.into()))?;

    let mut cookie = Cookie::new(AUTH_TOKEN, token);
    cookie.set_same_site(SameSite::Lax);
    cookie.set_http_only(true);
    cookie.set_path("/");
    cookies.add(cookie);

    tracing::info!(user = %user.username(), "session bound");
    Ok(())
}

pub fn logout(cookies: &Cookies) {
    let mut cookie = Cookie::from(AUTH_TOKEN);
    cookie.set_path("/");
    cookies.remove(cookie);
}
