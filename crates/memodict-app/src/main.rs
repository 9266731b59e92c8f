use clap::Parser;
use memodict_config::Config;
use tracing_subscriber::EnvFilter;

pub mod board;
pub mod browse;
pub mod cli;
pub mod commands;
pub mod render;
pub mod state;

#[cfg(test)]
mod tests;

use self::cli::{Cli, Command};
use self::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // A missing .env is fine, the environment and defaults still apply
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let mut config = Config::new();
    cli.apply(&mut config);

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(config.log_directive()))
        .with_writer(std::io::stderr)
        .init();

    let state = AppState::new(config)?;

    let mut out = std::io::stdout();
    match cli.command() {
        Command::List { lemma, freq, json } => {
            commands::list(&state, &lemma, &freq, json, &mut out).await
        }
        Command::Flag { id, current } => {
            commands::flag(&state, &id, current.as_deref(), &mut out).await
        }
        Command::Delete { id } => commands::delete(&state, &id, &mut out).await,
        Command::Browse => browse::run(state).await,
    }
}
