//! In-memory repositories backing `AppState::fake()`.

use std::sync::Mutex;

use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::{
    auth::{repo::UserRepo, repo_types::User},
    categories::{repo::CategoryRepo, Category, DEFAULT_CATEGORIES},
    db::StoreError,
    expenses::{
        repo::{ExpenseRepo, CATEGORY_FK, OWNER_FK},
        repo_types::{ExpenseRow, NewExpense},
    },
};

struct StoredExpense {
    id: Uuid,
    seq: u64,
    new: NewExpense,
    created_at: OffsetDateTime,
}

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    categories: Vec<Category>,
    expenses: Vec<StoredExpense>,
}

/// Enforces the same unique and foreign-key constraints as the schema.
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn seeded() -> Self {
        let categories = DEFAULT_CATEGORIES
            .iter()
            .map(|name| Category {
                id: Uuid::new_v4(),
                name: (*name).to_owned(),
            })
            .collect();
        Self {
            tables: Mutex::new(Tables {
                categories,
                ..Default::default()
            }),
        }
    }

    fn row(tables: &Tables, e: &StoredExpense) -> Result<ExpenseRow, StoreError> {
        let category = tables
            .categories
            .iter()
            .find(|c| c.id == e.new.category_id)
            .ok_or_else(|| fk_violation(CATEGORY_FK))?;
        Ok(ExpenseRow {
            id: e.id,
            amount: e.new.amount,
            description: e.new.description.clone(),
            date: e.new.date,
            user_id: e.new.user_id,
            category_id: e.new.category_id,
            created_at: e.created_at,
            category_name: category.name.clone(),
        })
    }
}

fn fk_violation(constraint: &str) -> StoreError {
    StoreError::ForeignKeyViolation {
        constraint: Some(constraint.to_owned()),
    }
}

#[async_trait]
impl UserRepo for MemoryStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.users.iter().find(|u| u.email == email).cloned())
    }

    async fn create(&self, email: &str, password_hash: &str) -> Result<User, StoreError> {
        let mut tables = self.tables.lock().unwrap();
        if tables.users.iter().any(|u| u.email == email) {
            return Err(StoreError::UniqueViolation);
        }
        let user = User {
            id: Uuid::new_v4(),
            email: email.to_owned(),
            password_hash: password_hash.to_owned(),
            created_at: OffsetDateTime::now_utc(),
        };
        tables.users.push(user.clone());
        Ok(user)
    }
}

#[async_trait]
impl CategoryRepo for MemoryStore {
    async fn list(&self) -> Result<Vec<Category>, StoreError> {
        let mut categories = self.tables.lock().unwrap().categories.clone();
        categories.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(categories)
    }
}

#[async_trait]
impl ExpenseRepo for MemoryStore {
    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<ExpenseRow>, StoreError> {
        let tables = self.tables.lock().unwrap();
        let mut owned: Vec<&StoredExpense> = tables
            .expenses
            .iter()
            .filter(|e| e.new.user_id == user_id)
            .collect();
        owned.sort_by(|a, b| b.new.date.cmp(&a.new.date).then(b.seq.cmp(&a.seq)));
        owned.into_iter().map(|e| Self::row(&tables, e)).collect()
    }

    async fn create(&self, new: NewExpense) -> Result<ExpenseRow, StoreError> {
        let mut tables = self.tables.lock().unwrap();
        if !tables.users.iter().any(|u| u.id == new.user_id) {
            return Err(fk_violation(OWNER_FK));
        }
        if !tables.categories.iter().any(|c| c.id == new.category_id) {
            return Err(fk_violation(CATEGORY_FK));
        }
        let stored = StoredExpense {
            id: Uuid::new_v4(),
            seq: tables.expenses.len() as u64,
            new,
            created_at: OffsetDateTime::now_utc(),
        };
        let row = Self::row(&tables, &stored)?;
        tables.expenses.push(stored);
        Ok(row)
    }
}
