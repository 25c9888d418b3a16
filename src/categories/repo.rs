use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::db::StoreError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
}

#[async_trait]
pub trait CategoryRepo: Send + Sync {
    /// All categories ordered by name ascending.
    async fn list(&self) -> Result<Vec<Category>, StoreError>;
}

pub struct PgCategoryRepo {
    db: PgPool,
}

impl PgCategoryRepo {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CategoryRepo for PgCategoryRepo {
    async fn list(&self) -> Result<Vec<Category>, StoreError> {
        let rows = sqlx::query_as::<_, Category>(
            r#"
            SELECT id, name
            FROM categories
            ORDER BY name ASC
            "#,
        )
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }
}
