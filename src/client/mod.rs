//! Terminal client: stores the session locally and talks to the API over HTTP.

mod api;
mod error;
mod session;
mod summary;

pub use api::ApiClient;
pub use error::{ClientError, ClientResult};
pub use session::{SessionStore, StoredSession};
pub use summary::Summary;

use time::macros::format_description;
use tracing::debug;
use uuid::Uuid;

use crate::{
    categories::Category,
    cli::{ClientCommand, ClientOptions},
    error::Field,
    expenses::{CreateExpenseRequest, Expense},
};

pub async fn run(opts: ClientOptions, command: ClientCommand) -> ClientResult<()> {
    let store = SessionStore::new(opts.session.unwrap_or_else(SessionStore::default_path));
    let api = ApiClient::new(&opts.api_url)?;
    debug!(api_url = %opts.api_url, "client command");

    match command {
        ClientCommand::Register { email, password } => {
            let res = api.register(&email, &password).await?;
            println!("{} Welcome, {}.", res.message, res.user.email);
            store.save(&StoredSession::from(res))?;
        }
        ClientCommand::Login { email, password } => {
            let res = api.login(&email, &password).await?;
            println!("{} Welcome back, {}.", res.message, res.user.email);
            store.save(&StoredSession::from(res))?;
        }
        ClientCommand::Logout => {
            store.clear()?;
            println!("Logged out.");
        }
        ClientCommand::Categories => {
            for c in api.categories().await? {
                println!("{}  {}", c.id, c.name);
            }
        }
        ClientCommand::Dashboard => {
            let session = store.load()?.ok_or(ClientError::NotAuthenticated)?;
            let api = api.with_token(&session.token);
            let (categories, expenses) =
                forget_on_unauthorized(&store, async {
                    tokio::try_join!(api.categories(), api.expenses())
                })
                .await?;
            print_dashboard(&session, &categories, &expenses);
        }
        ClientCommand::Add {
            amount,
            description,
            category,
            date,
        } => {
            let session = store.load()?.ok_or(ClientError::NotAuthenticated)?;
            let api = api.with_token(&session.token);
            let categories = api.categories().await?;
            let category_id = resolve_category(&categories, &category)?;
            let req = CreateExpenseRequest {
                amount: Field::Present(amount),
                description: Field::Present(description),
                category_id: Field::Present(category_id.to_string()),
                date: date.into(),
            };
            let expense = forget_on_unauthorized(&store, api.create_expense(&req)).await?;
            println!(
                "Added {} \"{}\" ({}).",
                summary::money(expense.amount),
                expense.description,
                expense.category.name
            );
        }
    }
    Ok(())
}

/// A rejected token means the stored session is useless; drop it like a logout.
async fn forget_on_unauthorized<T>(
    store: &SessionStore,
    fut: impl std::future::Future<Output = ClientResult<T>>,
) -> ClientResult<T> {
    let res = fut.await;
    if matches!(&res, Err(e) if e.is_unauthorized()) {
        store.clear()?;
    }
    res
}

/// Accepts a category id or a case-insensitive name.
pub fn resolve_category(categories: &[Category], wanted: &str) -> ClientResult<Uuid> {
    let wanted = wanted.trim();
    categories
        .iter()
        .find(|c| c.id.to_string() == wanted || c.name.eq_ignore_ascii_case(wanted))
        .map(|c| c.id)
        .ok_or_else(|| ClientError::UnknownCategory(wanted.to_owned()))
}

fn print_dashboard(session: &StoredSession, categories: &[Category], expenses: &[Expense]) {
    let summary = Summary::of(expenses);
    let day = format_description!("[year]-[month]-[day]");

    println!("Welcome back, {}", session.user.email);
    println!();
    println!("Total expenses: {}", summary.count);
    println!("Total amount:   {}", summary::money(summary.total));
    println!("Average:        {}", summary::money(summary.average));
    println!();

    if expenses.is_empty() {
        println!(
            "No expenses yet. Add one with `add --category <name>`; {} categories available.",
            categories.len()
        );
        return;
    }
    for e in expenses {
        let date = e.date.format(day).unwrap_or_default();
        println!(
            "{date}  {:>12}  {:<20}  {}",
            summary::money(e.amount),
            e.category.name,
            e.description
        );
    }
}
