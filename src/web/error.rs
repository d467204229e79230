use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Redirect},
};
use thiserror::Error;

use crate::{
    auth::CryptError,
    error::log_error,
    model::{DatabaseError, ResourceType},
    web::{capability::Capability, views},
};

pub type WebResult<T> = std::result::Result<T, WebError>;

pub static LOGIN_ROUTE: &str = "/login";

#[derive(Debug, Error)]
pub enum AuthenticationError {
    #[error("AuthenticationRequired")]
    AuthenticationRequired,

    #[error("AuthenticationInsufficientRole, required: {required:?}")]
    AuthenticationInsufficientRole { required: Capability },
}

#[derive(Debug, Error)]
pub enum ResourceError {
    #[error("ResourceNotFound: {resource_type:?}")]
    ResourceNotFound { resource_type: ResourceType },

    #[error("ResourceFetchError: {resource_type:?}. Error: {error}")]
    ResourceFetchError {
        resource_type: ResourceType,
        error: DatabaseError,
    },

    #[error("ResourceBadRequest: {resource_type:?}. {details}")]
    ResourceBadRequest {
        resource_type: ResourceType,
        details: String,
    },
}

#[derive(Debug, Error)]
pub enum RequestError {
    #[error("RequestMalformedBody: {0}")]
    RequestMalformedBody(String),
}

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("ServerCryptError: {0}")]
    ServerCryptError(#[from] CryptError),
    #[error("ServerIoError: {0}")]
    ServerIoError(#[from] std::io::Error),
}

impl ServerError {
    pub fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    pub fn client_display(&self) -> String {
        String::from("Internal server error.")
    }
}

impl AuthenticationError {
    pub fn status_code(&self) -> StatusCode {
        StatusCode::SEE_OTHER
    }

    pub fn client_display(&self) -> String {
        match self {
            Self::AuthenticationRequired => String::from("Authentication required."),
            Self::AuthenticationInsufficientRole { .. } => {
                String::from("You are not allowed to open this page.")
            }
        }
    }
}

impl ResourceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            Self::ResourceFetchError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            Self::ResourceBadRequest { .. } => StatusCode::BAD_REQUEST,
        }
    }

    pub fn client_display(&self) -> String {
        match self {
            Self::ResourceNotFound { resource_type } => {
                format!("The requested {} does not exist.", resource_type.label())
            }
            Self::ResourceFetchError { .. } => String::from("Internal server error."),
            Self::ResourceBadRequest { resource_type, .. } => {
                format!("Bad request for {}.", resource_type.label())
            }
        }
    }
}

impl RequestError {
    pub fn status_code(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    pub fn client_display(&self) -> String {
        String::from("The submitted form could not be read.")
    }
}

#[derive(Debug, Error)]
pub enum WebError {
    #[error("ResourceError - {0}")]
    ResourceError(#[from] ResourceError),
    #[error("AuthenticationError - {0}")]
    AuthenticationError(#[from] AuthenticationError),
    #[error("RequestError - {0}")]
    RequestError(#[from] RequestError),
    #[error("ServerError - {0}")]
    ServerError(#[from] ServerError),
}

impl WebError {
    pub fn resource_not_found(r#type: ResourceType) -> Self {
        Self::ResourceError(ResourceError::ResourceNotFound {
            resource_type: r#type,
        })
    }

    pub fn resource_fetch_error(r#type: ResourceType, error: DatabaseError) -> Self {
        Self::ResourceError(ResourceError::ResourceFetchError {
            resource_type: r#type,
            error,
        })
    }

    pub fn resource_bad_request<S: Into<String>>(r#type: ResourceType, details: S) -> Self {
        Self::ResourceError(ResourceError::ResourceBadRequest {
            resource_type: r#type,
            details: details.into(),
        })
    }

    pub fn malformed_body<S: Into<String>>(details: S) -> Self {
        Self::RequestError(RequestError::RequestMalformedBody(details.into()))
    }

    pub fn auth_required() -> Self {
        Self::AuthenticationError(AuthenticationError::AuthenticationRequired)
    }

    pub fn insufficient_role(required: Capability) -> Self {
        Self::AuthenticationError(AuthenticationError::AuthenticationInsufficientRole {
            required,
        })
    }

    pub fn server_crypt_error(e: CryptError) -> Self {
        Self::ServerError(ServerError::ServerCryptError(e))
    }

    pub fn server_io_error(e: std::io::Error) -> Self {
        Self::ServerError(ServerError::ServerIoError(e))
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::ResourceError(e) => e.status_code(),
            Self::AuthenticationError(e) => e.status_code(),
            Self::RequestError(e) => e.status_code(),
            Self::ServerError(e) => e.status_code(),
        }
    }

    pub fn client_display(&self) -> String {
        match self {
            Self::ResourceError(e) => e.client_display(),
            Self::AuthenticationError(e) => e.client_display(),
            Self::RequestError(e) => e.client_display(),
            Self::ServerError(e) => e.client_display(),
        }
    }
}

/// Maps a lookup result onto the single not-found contract: storage failures become 500,
/// a missing row becomes the 404 page.
pub trait OrNotFound<T> {
    fn or_not_found(self, resource_type: ResourceType) -> WebResult<T>;
}

impl<T> OrNotFound<T> for Result<Option<T>, DatabaseError> {
    fn or_not_found(self, resource_type: ResourceType) -> WebResult<T> {
        self.map_err(|e| WebError::resource_fetch_error(resource_type, e))?
            .ok_or(WebError::resource_not_found(resource_type))
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> axum::response::Response {
        // auth failures are soft: back to the login form
        if let Self::AuthenticationError(e) = &self {
            tracing::debug!("{}", e);
            return Redirect::to(LOGIN_ROUTE).into_response();
        }

        log_error(&self);

        let status_code = self.status_code();
        let details = if cfg!(debug_assertions) {
            Some(self.to_string())
        } else {
            None
        };
        let page = views::error_page(status_code, &self.client_display(), details.as_deref());

        (status_code, Html(page)).into_response()
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn missing_row_maps_to_404() {
        let lookup: Result<Option<u8>, DatabaseError> = Ok(None);
        let err = lookup.or_not_found(ResourceType::Course).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
        assert!(err.client_display().contains("course"));
    }

    #[test]
    fn found_row_passes_through() {
        let lookup: Result<Option<u8>, DatabaseError> = Ok(Some(7));
        assert_eq!(lookup.or_not_found(ResourceType::Quiz).unwrap(), 7);
    }

    #[test]
    fn storage_failure_maps_to_500() {
        let lookup: Result<Option<u8>, DatabaseError> =
            Err(DatabaseError::SqlxError(sqlx::Error::PoolTimedOut));
        let err = lookup.or_not_found(ResourceType::Lesson).unwrap_err();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn auth_errors_redirect_to_login() {
        let resp = WebError::auth_required().into_response();
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
        assert_eq!(resp.headers()["location"], LOGIN_ROUTE);

        let resp = WebError::insufficient_role(Capability::Admin).into_response();
        assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    }
}
