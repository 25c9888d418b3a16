use crate::state::AppState;
use axum::Router;

mod claims;
pub mod dto;
pub(crate) mod extractors;
pub mod handlers;
pub mod jwt;
mod password;
pub mod repo;
pub mod repo_types;
mod services;

pub use extractors::{AuthUser, INVALID_TOKEN};

pub fn router() -> Router<AppState> {
    Router::new().merge(handlers::auth_routes())
}
