use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use tracing::{instrument, warn};

use crate::{
    auth::{
        dto::{AuthResponse, Credentials},
        services,
    },
    error::{ApiError, ApiResult, AppJson},
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    AppJson(payload): AppJson<Credentials>,
) -> ApiResult<(StatusCode, Json<AuthResponse>)> {
    let creds = payload.for_register().map_err(|errors| {
        warn!(?errors, "invalid registration");
        ApiError::Validation(errors)
    })?;
    let res = services::register(&state, creds).await?;
    Ok((StatusCode::CREATED, Json(res)))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    AppJson(payload): AppJson<Credentials>,
) -> ApiResult<Json<AuthResponse>> {
    let creds = payload.for_login().map_err(ApiError::Validation)?;
    Ok(Json(services::login(&state, creds).await?))
}
