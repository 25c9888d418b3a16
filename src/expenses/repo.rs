use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::repo_types::{ExpenseRow, NewExpense};
use crate::db::StoreError;

/// Foreign keys named in the schema; `create` reports which one failed.
pub const OWNER_FK: &str = "expenses_user_id_fkey";
pub const CATEGORY_FK: &str = "expenses_category_id_fkey";

#[async_trait]
pub trait ExpenseRepo: Send + Sync {
    /// Expenses owned by `user_id`, most recent occurrence first.
    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<ExpenseRow>, StoreError>;

    /// Fails with `StoreError::ForeignKeyViolation` naming `CATEGORY_FK` or
    /// `OWNER_FK` when the category or owner does not exist.
    async fn create(&self, new: NewExpense) -> Result<ExpenseRow, StoreError>;
}

pub struct PgExpenseRepo {
    db: PgPool,
}

impl PgExpenseRepo {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl ExpenseRepo for PgExpenseRepo {
    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<ExpenseRow>, StoreError> {
        let rows = sqlx::query_as::<_, ExpenseRow>(
            r#"
            SELECT e.id, e.amount, e.description, e.date, e.user_id, e.category_id,
                   e.created_at, c.name AS category_name
              FROM expenses e
              JOIN categories c ON c.id = e.category_id
             WHERE e.user_id = $1
             ORDER BY e.date DESC, e.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.db)
        .await?;
        Ok(rows)
    }

    async fn create(&self, new: NewExpense) -> Result<ExpenseRow, StoreError> {
        let row = sqlx::query_as::<_, ExpenseRow>(
            r#"
            WITH inserted AS (
                INSERT INTO expenses (amount, description, date, user_id, category_id)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING id, amount, description, date, user_id, category_id, created_at
            )
            SELECT i.id, i.amount, i.description, i.date, i.user_id, i.category_id,
                   i.created_at, c.name AS category_name
              FROM inserted i
              JOIN categories c ON c.id = i.category_id
            "#,
        )
        .bind(new.amount)
        .bind(&new.description)
        .bind(new.date)
        .bind(new.user_id)
        .bind(new.category_id)
        .fetch_one(&self.db)
        .await?;
        Ok(row)
    }
}
