use rust_decimal::Decimal;

use crate::expenses::Expense;

/// Dashboard figures computed from the caller's expenses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub count: usize,
    pub total: Decimal,
    pub average: Decimal,
}

impl Summary {
    pub fn of(expenses: &[Expense]) -> Self {
        let count = expenses.len();
        let total: Decimal = expenses.iter().map(|e| e.amount).sum();
        let average = if count == 0 {
            Decimal::ZERO
        } else {
            (total / Decimal::from(count)).round_dp(2)
        };
        Self {
            count,
            total,
            average,
        }
    }
}

/// Two fraction digits with a dollar sign, e.g. `$25.50`.
pub fn money(amount: Decimal) -> String {
    format!("${:.2}", amount)
}
