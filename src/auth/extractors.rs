use async_trait::async_trait;
use axum::{
    extract::{FromRef, FromRequestParts},
    http::{header::AUTHORIZATION, request::Parts},
};
use tracing::warn;
use uuid::Uuid;

use super::jwt::JwtKeys;
use crate::error::ApiError;

pub const INVALID_TOKEN: &str = "Invalid or expired token";

/// Caller identity decoded from the bearer token.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub Uuid);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    JwtKeys: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .and_then(bearer_token)
            .ok_or_else(|| ApiError::Unauthorized("Access token required".into()))?;

        let keys = JwtKeys::from_ref(state);
        let claims = keys.verify(token).map_err(|e| {
            warn!(error = %e, "invalid or expired token");
            ApiError::Unauthorized(INVALID_TOKEN.into())
        })?;

        Ok(AuthUser(claims.sub))
    }
}

/// Token part of `Bearer <token>`; the scheme is matched case-insensitively.
fn bearer_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}
