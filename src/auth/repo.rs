use async_trait::async_trait;
use sqlx::PgPool;

use crate::{auth::repo_types::User, db::StoreError};

#[async_trait]
pub trait UserRepo: Send + Sync {
    /// Find a user by (normalized) email.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Create a new user with hashed password. Fails with
    /// `StoreError::UniqueViolation` if the email is taken.
    async fn create(&self, email: &str, password_hash: &str) -> Result<User, StoreError>;
}

pub struct PgUserRepo {
    db: PgPool,
}

impl PgUserRepo {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepo for PgUserRepo {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, email, password_hash, created_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await?;
        Ok(user)
    }

    async fn create(&self, email: &str, password_hash: &str) -> Result<User, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (email, password_hash)
            VALUES ($1, $2)
            RETURNING id, email, password_hash, created_at
            "#,
        )
        .bind(email)
        .bind(password_hash)
        .fetch_one(&self.db)
        .await?;
        Ok(user)
    }
}
