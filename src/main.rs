use clap::Parser;

mod app;
mod auth;
mod categories;
mod cli;
mod client;
mod config;
mod db;
mod error;
mod expenses;
#[cfg(test)]
mod memory;
mod state;

use crate::{
    cli::{Cli, Command},
    config::AppConfig,
    state::AppState,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "expense_tracker=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_writer(std::io::stderr)
            .init();
    }

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            let config = AppConfig::from_env()?;
            let app_state = AppState::init(config).await?;
            app::serve(app_state).await?;
        }
        Command::Client(command) => client::run(cli.client, command).await?,
    }

    Ok(())
}
