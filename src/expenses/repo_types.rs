use rust_decimal::Decimal;
use sqlx::FromRow;
use time::OffsetDateTime;
use uuid::Uuid;

/// Expense joined with its category name.
#[derive(Debug, Clone, FromRow)]
pub struct ExpenseRow {
    pub id: Uuid,
    pub amount: Decimal,
    pub description: String,
    pub date: OffsetDateTime,
    pub user_id: Uuid,
    pub category_id: Uuid,
    pub created_at: OffsetDateTime,
    pub category_name: String,
}

/// Validated input for a new expense.
#[derive(Debug, Clone)]
pub struct NewExpense {
    pub user_id: Uuid,
    pub amount: Decimal,
    pub description: String,
    pub category_id: Uuid,
    pub date: OffsetDateTime,
}
