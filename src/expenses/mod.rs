use crate::state::AppState;
use axum::Router;

pub mod dto;
pub mod handlers;
pub mod repo;
pub mod repo_types;
mod services;

pub use dto::{CreateExpenseRequest, Expense};

pub fn router() -> Router<AppState> {
    handlers::expense_routes()
}
