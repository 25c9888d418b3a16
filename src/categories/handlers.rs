use axum::{extract::State, routing::get, Json, Router};
use tracing::instrument;

use super::repo::Category;
use crate::{error::ApiResult, state::AppState};

pub fn category_routes() -> Router<AppState> {
    Router::new().route("/categories", get(list_categories))
}

#[instrument(skip(state))]
pub async fn list_categories(State(state): State<AppState>) -> ApiResult<Json<Vec<Category>>> {
    Ok(Json(state.categories.list().await?))
}
