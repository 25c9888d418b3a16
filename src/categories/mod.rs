use crate::state::AppState;
use axum::Router;

pub mod handlers;
pub mod repo;

pub use repo::Category;

/// Categories provisioned at deployment by the initial migration.
#[cfg(test)]
pub const DEFAULT_CATEGORIES: [&str; 10] = [
    "Food & Dining",
    "Transportation",
    "Entertainment",
    "Shopping",
    "Bills & Utilities",
    "Healthcare",
    "Travel",
    "Education",
    "Personal Care",
    "Other",
];

pub fn router() -> Router<AppState> {
    handlers::category_routes()
}
