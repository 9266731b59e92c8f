use crate::entry::{Entries, Entry, toggled_status};
use crate::error::StoreError;
use crate::filter::{EntryFilter, filter_entries};
use crate::store::{EntryStore, OrderBy};

/// Dictionary operations on top of an [`EntryStore`]
#[derive(Clone)]
pub struct EntryClient<S> {
    store: S,
}

impl<S: EntryStore> EntryClient<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Fetch at most `limit` entries in `order`
    pub async fn list(&self, limit: u32, order: OrderBy) -> Result<Entries, StoreError> {
        let entries = self.store.list(limit, order).await?;
        tracing::debug!(count = entries.len(), limit, "entries listed");
        Ok(entries)
    }

    /// Client-side filtering of an already fetched listing
    pub fn filter(&self, entries: &Entries, filter: &EntryFilter) -> Entries {
        filter_entries(entries, filter)
    }

    /// Flip the flag of `id` and return the record as written
    ///
    /// `current_status` only decides the new value. The stored record is
    /// read first so that fields other than `status` are written back as
    /// they are.
    pub async fn toggle_flag(&self, id: &str, current_status: &str) -> Result<Entry, StoreError> {
        let current = self.read_for_update(id).await?;
        self.write_status(id, current, toggled_status(current_status)).await
    }

    /// Flip the flag of `id` based on the status the store holds
    pub async fn toggle_stored_flag(&self, id: &str) -> Result<Entry, StoreError> {
        let current = self.read_for_update(id).await?;
        let new_status = toggled_status(current.status());
        self.write_status(id, current, new_status).await
    }

    /// Any failure to read the record counts as the record being absent
    async fn read_for_update(&self, id: &str) -> Result<Entry, StoreError> {
        match self.store.get(id).await {
            Ok(Some(entry)) => Ok(entry),
            Ok(None) => Err(StoreError::NotFound {
                id: id.to_string(),
                reason: "store holds no record".to_string(),
            }),
            Err(e) => Err(StoreError::NotFound {
                id: id.to_string(),
                reason: e.to_string(),
            }),
        }
    }

    async fn write_status(
        &self,
        id: &str,
        current: Entry,
        new_status: &str,
    ) -> Result<Entry, StoreError> {
        let updated = current.with_status(new_status);
        self.store.patch(id, &updated).await?;

        tracing::info!(id, status = new_status, "entry flag toggled");
        Ok(updated)
    }

    pub async fn delete_entry(&self, id: &str) -> Result<(), StoreError> {
        self.store.delete(id).await?;

        tracing::info!(id, "entry deleted");
        Ok(())
    }
}
