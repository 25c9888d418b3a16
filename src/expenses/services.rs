use time::OffsetDateTime;
use tracing::{info, warn};
use uuid::Uuid;

use super::{
    dto::{CreateExpenseRequest, Expense, UNKNOWN_CATEGORY},
    repo::{CATEGORY_FK, OWNER_FK},
};
use crate::{
    auth::INVALID_TOKEN,
    db::StoreError,
    error::{ApiError, ApiResult, FieldErrors},
    state::AppState,
};

pub async fn list_expenses(state: &AppState, user_id: Uuid) -> ApiResult<Vec<Expense>> {
    let rows = state.expenses.list_by_user(user_id).await?;
    Ok(rows.into_iter().map(Expense::from).collect())
}

pub async fn create_expense(
    state: &AppState,
    user_id: Uuid,
    req: CreateExpenseRequest,
) -> ApiResult<Expense> {
    let new = req
        .validate(user_id, OffsetDateTime::now_utc())
        .map_err(ApiError::Validation)?;
    let category_id = new.category_id;

    // Category existence is left to the foreign key.
    let row = match state.expenses.create(new).await {
        Ok(row) => row,
        Err(StoreError::ForeignKeyViolation { constraint })
            if constraint.as_deref() == Some(CATEGORY_FK) =>
        {
            warn!(%user_id, %category_id, "expense references unknown category");
            return Err(ApiError::Validation(FieldErrors::single(
                "categoryId",
                UNKNOWN_CATEGORY,
            )));
        }
        // Signed token for an account that no longer exists.
        Err(StoreError::ForeignKeyViolation { constraint })
            if constraint.as_deref() == Some(OWNER_FK) =>
        {
            warn!(%user_id, "expense owner does not exist");
            return Err(ApiError::Unauthorized(INVALID_TOKEN.into()));
        }
        Err(e) => return Err(e.into()),
    };

    info!(%user_id, expense_id = %row.id, amount = %row.amount, "expense created");
    Ok(Expense::from(row))
}
