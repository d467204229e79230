//! Route-level role requirements.
//!
//! Every route is registered together with the [`Capability`] it needs (see
//! `routes::route_table`); [`require_capability`] enforces it before the handler runs, so
//! handlers never re-check roles themselves.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::web::{AuthenticatedUser, RequestContext, WebError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Anyone, signed in or not.
    Public,
    /// Any signed in user.
    Authenticated,
    /// Signed in with the student flag.
    Student,
    /// Signed in with the admin flag.
    Admin,
}

impl Capability {
    pub fn permits(&self, user: Option<&AuthenticatedUser>) -> bool {
        match (self, user) {
            (Self::Public, _) => true,
            (_, None) => false,
            (Self::Authenticated, Some(_)) => true,
            (Self::Student, Some(u)) => u.roles().is_student(),
            (Self::Admin, Some(u)) => u.roles().is_admin(),
        }
    }

    fn rejection(&self, user: Option<&AuthenticatedUser>) -> WebError {
        match user {
            None => WebError::auth_required(),
            Some(_) => WebError::insufficient_role(*self),
        }
    }
}

pub async fn require_capability(
    State(capability): State<Capability>,
    ctx: RequestContext,
    req: Request,
    next: Next,
) -> Response {
    if capability.permits(ctx.maybe_user()) {
        return next.run(req).await;
    }

    tracing::debug!(
        ?capability,
        path = %req.uri().path(),
        "request rejected by capability check"
    );
    capability.rejection(ctx.maybe_user()).into_response()
}
