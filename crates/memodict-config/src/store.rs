use std::env;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Realtime database the dictionary lives in
pub const DEFAULT_STORE_URL: &str =
    "https://memorize-dict-default-rtdb.europe-west1.firebasedatabase.app";

pub const DEFAULT_FETCH_LIMIT: u32 = 1000;

pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Base address of the JSON store
    pub url: String,
    /// Maximum number of entries fetched by one listing
    pub fetch_limit: u32,
    pub timeout_seconds: u64,
}

impl StoreConfig {
    pub fn new() -> Self {
        let url = env::var("MEMODICT_STORE_URL").unwrap_or_else(|_| DEFAULT_STORE_URL.to_string());

        let fetch_limit = env::var("MEMODICT_FETCH_LIMIT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_FETCH_LIMIT);

        let timeout_seconds = env::var("MEMODICT_TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECONDS);

        Self {
            url,
            fetch_limit,
            timeout_seconds,
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_STORE_URL.to_string(),
            fetch_limit: DEFAULT_FETCH_LIMIT,
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }
}
