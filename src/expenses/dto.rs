use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use time::{format_description::well_known::Rfc3339, OffsetDateTime};
use uuid::Uuid;

use super::repo_types::{ExpenseRow, NewExpense};
use crate::{
    categories::Category,
    error::{Field, FieldErrors},
};

pub const UNKNOWN_CATEGORY: &str = "Category does not exist";

/// Largest amount a NUMERIC(12, 2) column holds.
fn max_amount() -> Decimal {
    Decimal::new(999_999_999_999, 2)
}

/// Request body for `POST /expenses`.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateExpenseRequest {
    #[serde(default)]
    pub amount: Field<f64>,
    #[serde(default)]
    pub description: Field<String>,
    #[serde(default)]
    pub category_id: Field<String>,
    #[serde(default, skip_serializing_if = "Field::is_missing")]
    pub date: Field<String>,
}

impl CreateExpenseRequest {
    /// Checks every field and builds the insert for `user_id`; `now` is
    /// used when no date is given.
    pub fn validate(self, user_id: Uuid, now: OffsetDateTime) -> Result<NewExpense, FieldErrors> {
        let mut errors = FieldErrors::new();

        let amount = match self.amount {
            Field::Missing => {
                errors.add("amount", "Amount is required");
                None
            }
            Field::Invalid => {
                errors.add("amount", "Expected number");
                None
            }
            Field::Present(raw) => match parse_amount(raw) {
                Ok(a) => Some(a),
                Err(msg) => {
                    errors.add("amount", msg);
                    None
                }
            },
        };

        let description = match self.description {
            Field::Invalid => {
                errors.add("description", "Expected string");
                None
            }
            Field::Present(d) if !d.trim().is_empty() => Some(d.trim().to_owned()),
            _ => {
                errors.add("description", "Description is required");
                None
            }
        };

        let category_id = match self.category_id {
            Field::Invalid => {
                errors.add("categoryId", "Expected string");
                None
            }
            Field::Present(raw) if !raw.trim().is_empty() => match Uuid::parse_str(raw.trim()) {
                Ok(id) => Some(id),
                Err(_) => {
                    errors.add("categoryId", UNKNOWN_CATEGORY);
                    None
                }
            },
            _ => {
                errors.add("categoryId", "Category is required");
                None
            }
        };

        let date = match self.date {
            Field::Missing => Some(now),
            Field::Invalid => {
                errors.add("date", "Expected string");
                None
            }
            Field::Present(raw) => match OffsetDateTime::parse(&raw, &Rfc3339) {
                Ok(d) => Some(d),
                Err(_) => {
                    errors.add("date", "Invalid datetime");
                    None
                }
            },
        };

        match (amount, description, category_id, date) {
            (Some(amount), Some(description), Some(category_id), Some(date))
                if errors.is_empty() =>
            {
                Ok(NewExpense {
                    user_id,
                    amount,
                    description,
                    category_id,
                    date,
                })
            }
            _ => Err(errors),
        }
    }
}

/// Positive amounts are rounded half-up to cents; anything that would round
/// down to zero is refused rather than stored as 0.00.
fn parse_amount(raw: f64) -> Result<Decimal, &'static str> {
    if !raw.is_finite() {
        return Err("Amount must be a number");
    }
    if raw <= 0.0 {
        return Err("Amount must be positive");
    }
    let mut amount = Decimal::from_f64_retain(raw)
        .ok_or("Amount must be a number")?
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    amount.rescale(2);
    if amount < Decimal::new(1, 2) {
        return Err("Amount must be at least 0.01");
    }
    if amount > max_amount() {
        return Err("Amount is too large");
    }
    Ok(amount)
}

/// Expense as returned by the API, joined with its category.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expense {
    pub id: Uuid,
    pub amount: Decimal,
    pub description: String,
    #[serde(with = "time::serde::rfc3339")]
    pub date: OffsetDateTime,
    pub user_id: Uuid,
    pub category_id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub category: Category,
}

impl From<ExpenseRow> for Expense {
    fn from(r: ExpenseRow) -> Self {
        Self {
            id: r.id,
            amount: r.amount,
            description: r.description,
            date: r.date,
            user_id: r.user_id,
            category_id: r.category_id,
            created_at: r.created_at,
            category: Category {
                id: r.category_id,
                name: r.category_name,
            },
        }
    }
}
