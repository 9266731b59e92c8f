use clap::{Parser, Subcommand};
use memodict_config::Config;

#[derive(Debug, Parser)]
#[command(name = "memodict", about = "Browse, flag and prune dictionary entries")]
pub struct Cli {
    /// Base address of the JSON store
    #[arg(long, global = true)]
    pub store_url: Option<String>,

    /// Maximum number of entries fetched per listing
    #[arg(long, global = true)]
    pub limit: Option<u32>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// List entries, optionally filtered
    List {
        /// Case-insensitive lemma prefix
        #[arg(long, default_value = "")]
        lemma: String,
        /// Exact frequency
        #[arg(long, default_value = "")]
        freq: String,
        /// Print the entries as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Toggle the flag of an entry
    Flag {
        id: String,
        /// Status the entry currently has; read from the store when omitted
        #[arg(long)]
        current: Option<String>,
    },
    /// Delete an entry
    Delete { id: String },
    /// Interactive session (default)
    Browse,
}

impl Cli {
    /// Command-line flags take precedence over the environment
    pub fn apply(&self, config: &mut Config) {
        if let Some(url) = &self.store_url {
            config.store.url = url.clone();
        }
        if let Some(limit) = self.limit {
            config.store.fetch_limit = limit;
        }
    }

    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Browse)
    }
}
