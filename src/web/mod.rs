mod context;
pub use context::{AuthenticatedUser, RequestContext, RoleFlags};

pub mod capability;

mod error;
pub use error::{OrNotFound, WebError, WebResult};

pub mod forms;

pub mod middlewares;

pub mod session;

mod state;
pub use state::AppState;

pub mod routes;

pub mod views;
