use anyhow::Context;
use memodict_config::Config;
use memodict_store::{EntryClient, FirebaseStore};

pub struct AppState {
    pub config: Config,
    pub client: EntryClient<FirebaseStore>,
    /// Highlight flagged rows with terminal colors
    pub colorize: bool,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let store = FirebaseStore::with_timeout(&config.store.url, config.store.timeout())
            .context("Failed to set up store client")?;

        tracing::info!("Using store at {}", store.base_url());

        Ok(Self {
            config,
            client: EntryClient::new(store),
            colorize: atty::is(atty::Stream::Stdout),
        })
    }
}
