use std::time::Duration;

use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use serde_json::Value;

use crate::entry::{Entries, Entry};
use crate::error::StoreError;
use crate::store::{EntryStore, OrderBy};

/// Store client speaking the Firebase Realtime Database REST protocol
#[derive(Clone)]
pub struct FirebaseStore {
    base_url: Url,
    client: reqwest::Client,
}

impl FirebaseStore {
    pub fn new(base_url: &str) -> Result<Self, StoreError> {
        Self::with_client(base_url, reqwest::Client::new())
    }

    /// Client whose requests give up after `timeout`
    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, StoreError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(StoreError::fetch)?;

        Self::with_client(base_url, client)
    }

    pub fn with_client(base_url: &str, client: reqwest::Client) -> Result<Self, StoreError> {
        let invalid = |reason: String| StoreError::InvalidAddress {
            url: base_url.to_string(),
            reason,
        };

        let base_url = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
        if base_url.cannot_be_a_base() || !matches!(base_url.scheme(), "http" | "https") {
            return Err(invalid("expected an http(s) address".to_string()));
        }

        Ok(Self { base_url, client })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `<base>/.json`
    fn collection_url(&self) -> Url {
        self.endpoint(".json")
    }

    /// `<base>/<id>.json`
    fn entry_url(&self, id: &str) -> Result<Url, String> {
        // An empty id would address the whole collection
        if id.trim().is_empty() {
            return Err("entry id is empty".to_string());
        }

        Ok(self.endpoint(&format!("{id}.json")))
    }

    fn endpoint(&self, file: &str) -> Url {
        let mut url = self.base_url.clone();
        // Checked in the constructor: the base can always take path segments
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(file);
        }
        url
    }
}

#[async_trait]
impl EntryStore for FirebaseStore {
    async fn list(&self, limit: u32, order: OrderBy) -> Result<Entries, StoreError> {
        let limit = limit.to_string();
        let url = self.collection_url();
        tracing::debug!(%url, %limit, "listing entries");

        let body = self
            .client
            .get(url)
            .query(&[("orderBy", order.as_param()), ("limitToFirst", limit.as_str())])
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(StoreError::fetch)?
            .text()
            .await
            .map_err(StoreError::fetch)?;

        let mut entries = decode_listing(&body)?;
        order.sort(&mut entries);
        tracing::debug!(count = entries.len(), "listing decoded");
        Ok(entries)
    }

    async fn get(&self, id: &str) -> Result<Option<Entry>, StoreError> {
        let url = self.entry_url(id).map_err(StoreError::fetch)?;
        tracing::debug!(%url, "reading entry");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(StoreError::fetch)?;

        // Stores other than Firebase answer a missing record with 404 instead of null
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let body = response
            .error_for_status()
            .map_err(StoreError::fetch)?
            .text()
            .await
            .map_err(StoreError::fetch)?;

        serde_json::from_str::<Option<Entry>>(&body)
            .map_err(|e| StoreError::Decode(format!("entry {id}: {e}")))
    }

    async fn patch(&self, id: &str, entry: &Entry) -> Result<(), StoreError> {
        let url = self.entry_url(id).map_err(|e| StoreError::update(id, e))?;
        tracing::debug!(%url, "patching entry");

        self.client
            .patch(url)
            .json(entry)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| StoreError::update(id, e))?;

        Ok(())
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let url = self.entry_url(id).map_err(|e| StoreError::delete(id, e))?;
        tracing::debug!(%url, "deleting entry");

        self.client
            .delete(url)
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| StoreError::delete(id, e))?;

        Ok(())
    }
}

/// Decode a listing body into entries
///
/// The store answers `null` for an empty collection and a JSON array when
/// the keys are dense integers; array holes come back as `null`.
fn decode_listing(body: &str) -> Result<Entries, StoreError> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| StoreError::Decode(format!("listing is not JSON: {e}")))?;

    match value {
        Value::Null => Ok(Entries::new()),
        Value::Object(records) => records
            .into_iter()
            .filter(|(_, record)| !record.is_null())
            .map(|(id, record)| decode_record(&id, record).map(|entry| (id, entry)))
            .collect(),
        Value::Array(records) => records
            .into_iter()
            .enumerate()
            .filter(|(_, record)| !record.is_null())
            .map(|(index, record)| {
                let id = index.to_string();
                decode_record(&id, record).map(|entry| (id, entry))
            })
            .collect(),
        other => Err(StoreError::Decode(format!(
            "expected a collection of entries, got {other}"
        ))),
    }
}

fn decode_record(id: &str, record: Value) -> Result<Entry, StoreError> {
    serde_json::from_value(record).map_err(|e| StoreError::Decode(format!("entry {id}: {e}")))
}
