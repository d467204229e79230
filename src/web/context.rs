//! Request context, e.g. user id, its role flags, etc.
//!

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::web::{WebResult, error::WebError};

/// Coarse role flags of a user record. Both may be set; neither may be set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RoleFlags {
    is_admin: bool,
    is_student: bool,
}

impl RoleFlags {
    pub fn new(is_admin: bool, is_student: bool) -> Self {
        Self {
            is_admin,
            is_student,
        }
    }

    pub fn admin() -> Self {
        Self::new(true, false)
    }

    pub fn student() -> Self {
        Self::new(false, true)
    }

    pub fn is_admin(&self) -> bool {
        self.is_admin
    }

    pub fn is_student(&self) -> bool {
        self.is_student
    }

    /// Where a freshly logged in user lands. The admin flag wins when both are set.
    /// `None` when neither flag is set.
    pub fn landing_route(&self) -> Option<&'static str> {
        if self.is_admin {
            Some("/admin")
        } else if self.is_student {
            Some("/student")
        } else {
            None
        }
    }
}

#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    user_id: uuid::Uuid,
    roles: RoleFlags,
}

impl AuthenticatedUser {
    pub fn new(user_id: uuid::Uuid, roles: RoleFlags) -> Self {
        Self { user_id, roles }
    }

    /// Identity used for queries the application runs on its own behalf
    /// (session lookup, seeding).
    pub fn system() -> Self {
        Self {
            roles: RoleFlags::admin(),
            user_id: uuid::Uuid::max(),
        }
    }

    pub fn user_id(&self) -> uuid::Uuid {
        self.user_id
    }

    pub fn roles(&self) -> RoleFlags {
        self.roles
    }
}

#[derive(Debug, Clone)]
pub struct RequestContext {
    maybe_user: Option<AuthenticatedUser>,
}

impl RequestContext {
    pub fn new(maybe_user: Option<AuthenticatedUser>) -> Self {
        Self { maybe_user }
    }

    pub fn anonymous() -> Self {
        Self::new(None)
    }

    pub fn maybe_user(&self) -> Option<&AuthenticatedUser> {
        self.maybe_user.as_ref()
    }

    pub fn user(&self) -> WebResult<&AuthenticatedUser> {
        self.maybe_user.as_ref().ok_or(WebError::auth_required())
    }
}

impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = WebError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let ctx = parts.extensions.get::<RequestContext>();
        Ok(ctx.cloned().unwrap_or_else(RequestContext::anonymous))
    }
}
