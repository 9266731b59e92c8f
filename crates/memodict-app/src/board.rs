use std::sync::atomic::{AtomicU64, Ordering};

use memodict_store::{Entries, Entry, EntryClient, EntryFilter, EntryStore, OrderBy, StoreError};
use tokio::sync::RwLock;

/// Hands out tickets for listings so only the newest one gets applied
#[derive(Debug, Default)]
pub struct ListSequencer {
    latest: AtomicU64,
}

impl ListSequencer {
    pub fn issue(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub fn is_latest(&self, ticket: u64) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket
    }
}

/// What the board currently shows
#[derive(Debug, Clone, Default)]
pub struct BoardView {
    pub filter: EntryFilter,
    pub rows: Entries,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Refresh {
    /// Listing applied, with the number of rows now shown
    Applied(usize),
    /// A newer listing was issued while this one was in flight
    Stale,
}

/// Displayed entries plus the operations the table rows trigger
///
/// Failed operations leave the shown rows as they were.
pub struct EntryBoard<S> {
    client: EntryClient<S>,
    limit: u32,
    sequencer: ListSequencer,
    view: RwLock<BoardView>,
}

impl<S: EntryStore> EntryBoard<S> {
    pub fn new(client: EntryClient<S>, limit: u32) -> Self {
        Self {
            client,
            limit,
            sequencer: ListSequencer::default(),
            view: RwLock::new(BoardView::default()),
        }
    }

    pub async fn view(&self) -> BoardView {
        self.view.read().await.clone()
    }

    /// Replace the filter and re-list
    pub async fn set_filter(&self, filter: EntryFilter) -> Result<Refresh, StoreError> {
        self.view.write().await.filter = filter.clone();
        self.list_with(filter).await
    }

    /// Re-list with the current filter
    pub async fn refresh(&self) -> Result<Refresh, StoreError> {
        let filter = self.view.read().await.filter.clone();
        self.list_with(filter).await
    }

    async fn list_with(&self, filter: EntryFilter) -> Result<Refresh, StoreError> {
        let ticket = self.sequencer.issue();

        let entries = self.client.list(self.limit, OrderBy::Key).await?;
        let rows = self.client.filter(&entries, &filter);

        let mut view = self.view.write().await;
        if !self.sequencer.is_latest(ticket) {
            tracing::debug!(ticket, "discarding stale listing");
            return Ok(Refresh::Stale);
        }

        view.rows = rows;
        Ok(Refresh::Applied(view.rows.len()))
    }

    /// Toggle the flag of a row and patch the shown status in place
    ///
    /// The status the row currently shows decides the new value; rows not
    /// on the board count as unflagged.
    pub async fn toggle_flag(&self, id: &str) -> Result<Entry, StoreError> {
        let current = self
            .view
            .read()
            .await
            .rows
            .get(id)
            .map(|entry| entry.status().to_string())
            .unwrap_or_default();

        let updated = self.client.toggle_flag(id, &current).await?;

        if let Some(row) = self.view.write().await.rows.get_mut(id) {
            row.status = updated.status.clone();
        }

        Ok(updated)
    }

    /// Delete a row, drop it from the board and re-list
    pub async fn delete_entry(&self, id: &str) -> Result<Refresh, StoreError> {
        self.client.delete_entry(id).await?;

        self.view.write().await.rows.shift_remove(id);
        self.refresh().await
    }
}
