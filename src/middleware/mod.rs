mod auth;
mod error_handler;

pub use auth::{AuthDecision, SESSION_HEADER, auth_middleware, authorize};
pub use error_handler::log_errors;
