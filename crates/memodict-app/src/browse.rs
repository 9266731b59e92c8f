use std::str::FromStr;

use memodict_store::{EntryStore, StoreError};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::signal;

use crate::board::{EntryBoard, Refresh};
use crate::render::{delete_ack, flag_ack, render_table};
use crate::state::AppState;

const HELP: &str = "\
Commands:
  lemma <prefix>   filter by lemma prefix (empty clears)
  freq <value>     filter by exact frequency (empty clears)
  clear            drop both filters
  flag <id>        toggle the flag of an entry
  delete <id>      delete an entry
  refresh          fetch again
  help             show this text
  quit             leave";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseCommand {
    Lemma(String),
    Freq(String),
    Clear,
    Flag(String),
    Delete(String),
    Refresh,
    Help,
    Quit,
}

impl FromStr for BrowseCommand {
    type Err = String;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (word, arg) = match line.split_once(char::is_whitespace) {
            Some((word, arg)) => (word, arg.trim()),
            None => (line, ""),
        };

        let required = |arg: &str| {
            if arg.is_empty() {
                Err(format!("`{word}` needs an entry id"))
            } else {
                Ok(arg.to_string())
            }
        };

        match word {
            "lemma" | "l" => Ok(Self::Lemma(arg.to_string())),
            "freq" | "f" => Ok(Self::Freq(arg.to_string())),
            "clear" => Ok(Self::Clear),
            "flag" => required(arg).map(Self::Flag),
            "delete" | "rm" => required(arg).map(Self::Delete),
            "refresh" | "r" | "" => Ok(Self::Refresh),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" | "q" => Ok(Self::Quit),
            other => Err(format!("Unknown command `{other}`, try `help`")),
        }
    }
}

/// Interactive session over stdin until `quit`, end of input or Ctrl+C
pub async fn run(state: AppState) -> anyhow::Result<()> {
    let board = EntryBoard::new(state.client.clone(), state.config.store.fetch_limit);

    // Initial fetch
    report_refresh(&board, board.refresh().await, state.colorize).await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = signal::ctrl_c() => {
                tracing::info!("Shutdown requested");
                break;
            }
        };

        let Some(line) = line else {
            break;
        };

        let command = match line.parse::<BrowseCommand>() {
            Ok(command) => command,
            Err(message) => {
                eprintln!("{message}");
                continue;
            }
        };

        if command == BrowseCommand::Quit {
            break;
        }

        handle_command(&board, command, state.colorize).await;
    }

    Ok(())
}

async fn handle_command<S: EntryStore>(
    board: &EntryBoard<S>,
    command: BrowseCommand,
    colorize: bool,
) {
    tracing::debug!("Handling {:?}", command);

    match command {
        BrowseCommand::Lemma(prefix) => {
            let filter = board.view().await.filter.with_lemma_prefix(&prefix);
            report_refresh(board, board.set_filter(filter).await, colorize).await;
        }
        BrowseCommand::Freq(freq) => {
            let filter = board.view().await.filter.with_freq(&freq);
            report_refresh(board, board.set_filter(filter).await, colorize).await;
        }
        BrowseCommand::Clear => {
            report_refresh(board, board.set_filter(Default::default()).await, colorize).await;
        }
        BrowseCommand::Refresh => {
            report_refresh(board, board.refresh().await, colorize).await;
        }
        BrowseCommand::Flag(id) => match board.toggle_flag(&id).await {
            Ok(updated) => {
                println!("{}", flag_ack(&id, &updated));
                print!("{}", render_table(&board.view().await.rows, colorize));
            }
            Err(e) => tracing::error!("Error updating record: {e}"),
        },
        BrowseCommand::Delete(id) => match board.delete_entry(&id).await {
            Ok(refresh) => {
                println!("{}", delete_ack(&id));
                report_refresh(board, Ok(refresh), colorize).await;
            }
            Err(e @ StoreError::Delete { .. }) => tracing::error!("Error deleting record: {e}"),
            Err(e) => {
                println!("{}", delete_ack(&id));
                tracing::error!("Error fetching data: {e}");
            }
        },
        BrowseCommand::Help => println!("{HELP}"),
        BrowseCommand::Quit => {}
    }
}

async fn report_refresh<S: EntryStore>(
    board: &EntryBoard<S>,
    result: Result<Refresh, StoreError>,
    colorize: bool,
) {
    match result {
        Ok(Refresh::Applied(count)) => {
            tracing::debug!("{count} rows shown");
            print!("{}", render_table(&board.view().await.rows, colorize));
        }
        Ok(Refresh::Stale) => {}
        Err(e) => tracing::error!("Error fetching data: {e}"),
    }
}
