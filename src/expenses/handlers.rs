use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use tracing::instrument;

use super::{
    dto::{CreateExpenseRequest, Expense},
    services,
};
use crate::{
    auth::AuthUser,
    error::{ApiResult, AppJson},
    state::AppState,
};

pub fn expense_routes() -> Router<AppState> {
    Router::new().route("/expenses", get(list_expenses).post(create_expense))
}

#[instrument(skip(state))]
pub async fn list_expenses(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> ApiResult<Json<Vec<Expense>>> {
    Ok(Json(services::list_expenses(&state, user_id).await?))
}

#[instrument(skip(state, payload))]
pub async fn create_expense(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    AppJson(payload): AppJson<CreateExpenseRequest>,
) -> ApiResult<(StatusCode, Json<Expense>)> {
    let expense = services::create_expense(&state, user_id, payload).await?;
    Ok((StatusCode::CREATED, Json(expense)))
}
