//! HTTP surface.

pub mod auth;
pub mod handlers;
pub mod openapi;
mod routes;
mod state;

pub use auth::{require_admin, Claims, TokenVerifier};
pub use routes::create_router;
pub use state::AppState;
