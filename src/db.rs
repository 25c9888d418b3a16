use anyhow::Context;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::config::AppConfig;

/// Errors surfaced by the repositories. Constraint violations are kept apart
/// so services can turn them into client errors.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("unique constraint violated")]
    UniqueViolation,
    #[error("foreign key constraint {constraint:?} violated")]
    ForeignKeyViolation { constraint: Option<String> },
    #[error("database error: {0}")]
    Database(sqlx::Error),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        if let Some(db_err) = e.as_database_error() {
            if db_err.is_unique_violation() {
                return StoreError::UniqueViolation;
            }
            if db_err.is_foreign_key_violation() {
                return StoreError::ForeignKeyViolation {
                    constraint: db_err.constraint().map(str::to_owned),
                };
            }
        }
        StoreError::Database(e)
    }
}

pub async fn connect(config: &AppConfig) -> anyhow::Result<PgPool> {
    PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .connect(&config.database_url)
        .await
        .context("connect to database")
}

/// Applies the embedded migrations, which also seed the default categories.
pub async fn migrate(db: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations")
        .run(db)
        .await
        .context("run migrations")
}
