use tracing::{info, warn};

use super::{
    dto::{AuthResponse, PublicUser, ValidCredentials},
    password::{hash_password, verify_password},
};
use crate::{
    db::StoreError,
    error::{ApiError, ApiResult},
    state::AppState,
};

const USER_EXISTS: &str = "User already exists";
const INVALID_CREDENTIALS: &str = "Invalid credentials";

pub async fn register(state: &AppState, creds: ValidCredentials) -> ApiResult<AuthResponse> {
    if state.users.find_by_email(&creds.email).await?.is_some() {
        warn!(email = %creds.email, "email already registered");
        return Err(ApiError::Conflict(USER_EXISTS.into()));
    }

    let hash = hash_password(&creds.password)?;

    // A concurrent registration can still win the race; the unique index decides.
    let user = match state.users.create(&creds.email, &hash).await {
        Ok(u) => u,
        Err(StoreError::UniqueViolation) => {
            warn!(email = %creds.email, "email registered concurrently");
            return Err(ApiError::Conflict(USER_EXISTS.into()));
        }
        Err(e) => return Err(e.into()),
    };

    let token = state.jwt.sign(user.id, &user.email)?;
    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok(AuthResponse {
        message: "User registered successfully".into(),
        user: PublicUser::from(user),
        token,
    })
}

/// Unknown email and wrong password produce the same error.
pub async fn login(state: &AppState, creds: ValidCredentials) -> ApiResult<AuthResponse> {
    let user = state.users.find_by_email(&creds.email).await?;
    let verified = verify_password(
        &creds.password,
        user.as_ref().map(|u| u.password_hash.as_str()),
    )?;

    let user = match user {
        Some(user) if verified => user,
        Some(user) => {
            warn!(user_id = %user.id, "login invalid password");
            return Err(ApiError::Unauthorized(INVALID_CREDENTIALS.into()));
        }
        None => {
            warn!(email = %creds.email, "login unknown email");
            return Err(ApiError::Unauthorized(INVALID_CREDENTIALS.into()));
        }
    };

    let token = state.jwt.sign(user.id, &user.email)?;
    info!(user_id = %user.id, email = %user.email, "user logged in");
    Ok(AuthResponse {
        message: "Login successful".into(),
        user: PublicUser::from(user),
        token,
    })
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::{http::StatusCode, response::IntoResponse};

    use super::*;
    use crate::auth::{repo::UserRepo, repo_types::User};

    /// Lets both registrations past the existence check, as when two
    /// requests race; only the unique index can stop the second one.
    struct RacingUsers(Arc<dyn UserRepo>);

    #[async_trait]
    impl UserRepo for RacingUsers {
        async fn find_by_email(&self, _email: &str) -> Result<Option<User>, StoreError> {
            Ok(None)
        }

        async fn create(&self, email: &str, password_hash: &str) -> Result<User, StoreError> {
            self.0.create(email, password_hash).await
        }
    }

    fn creds(email: &str, password: &str) -> ValidCredentials {
        ValidCredentials {
            email: email.into(),
            password: password.into(),
        }
    }

    #[tokio::test]
    async fn register_then_login_yields_matching_identity() {
        let state = AppState::fake();
        let registered = register(&state, creds("svc@example.com", "password123"))
            .await
            .unwrap();
        let logged_in = login(&state, creds("svc@example.com", "password123"))
            .await
            .unwrap();

        assert_eq!(registered.user, logged_in.user);
        let claims = state.jwt.verify(&logged_in.token).unwrap();
        assert_eq!(claims.sub, registered.user.id);
        assert_eq!(claims.email, "svc@example.com");
    }

    #[tokio::test]
    async fn duplicate_registration_conflicts() {
        let state = AppState::fake();
        register(&state, creds("dup@example.com", "password123"))
            .await
            .unwrap();
        let err = register(&state, creds("dup@example.com", "another-pass"))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Conflict(msg) if msg == USER_EXISTS));
    }

    #[tokio::test]
    async fn login_failures_are_indistinguishable() {
        let state = AppState::fake();
        register(&state, creds("known@example.com", "password123"))
            .await
            .unwrap();

        let unknown = login(&state, creds("nobody@example.com", "password123"))
            .await
            .unwrap_err();
        let wrong = login(&state, creds("known@example.com", "wrongpassword"))
            .await
            .unwrap_err();
        assert_eq!(unknown.to_string(), wrong.to_string());
        assert!(matches!(unknown, ApiError::Unauthorized(_)));
        assert!(matches!(wrong, ApiError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn racing_registrations_yield_one_account() {
        let mut state = AppState::fake();
        state.users = Arc::new(RacingUsers(state.users.clone()));

        register(&state, creds("race@example.com", "password123"))
            .await
            .unwrap();
        let err = register(&state, creds("race@example.com", "password456"))
            .await
            .unwrap_err();
        assert!(matches!(&err, ApiError::Conflict(msg) if msg == USER_EXISTS));
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
