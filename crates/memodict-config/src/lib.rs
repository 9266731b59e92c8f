use std::env;

use serde::{Deserialize, Serialize};

use self::store::StoreConfig;

pub mod store;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub store: StoreConfig,

    /// `EnvFilter` directive for the memodict crates
    pub log_level: String,
}

impl Config {
    pub fn new() -> Self {
        let log_level = env::var("MEMODICT_LOG").unwrap_or_else(|_| "info".to_string());

        Config {
            store: StoreConfig::new(),
            log_level,
        }
    }

    /// Directive string handed to the tracing subscriber
    pub fn log_directive(&self) -> String {
        format!(
            "memodict={level},memodict_store={level},memodict_config={level}",
            level = self.log_level
        )
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
