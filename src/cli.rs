use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "expense-tracker", version, about = "Personal expense tracker")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    #[command(flatten)]
    pub client: ClientOptions,
}

#[derive(Debug, Clone, Args)]
pub struct ClientOptions {
    /// Base URL of the API, including the `/api` prefix.
    #[arg(
        long,
        global = true,
        env = "EXPENSE_TRACKER_API",
        default_value = "http://localhost:3001/api"
    )]
    pub api_url: String,

    /// Where the login session is stored.
    #[arg(long, global = true, env = "EXPENSE_TRACKER_SESSION")]
    pub session: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP API server (default).
    Serve,
    #[command(flatten)]
    Client(ClientCommand),
}

#[derive(Debug, Subcommand)]
pub enum ClientCommand {
    /// Create an account and store the session.
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Log in and store the session.
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
    },
    /// Forget the stored session.
    Logout,
    /// List the available categories.
    Categories,
    /// Show expenses with count, total and average.
    Dashboard,
    /// Record a new expense.
    Add {
        #[arg(long)]
        amount: f64,
        #[arg(long)]
        description: String,
        /// Category name (case-insensitive) or id.
        #[arg(long)]
        category: String,
        /// RFC 3339 timestamp; defaults to now.
        #[arg(long)]
        date: Option<String>,
    },
}
