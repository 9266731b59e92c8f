use std::cmp::Ordering;

use async_trait::async_trait;

use crate::entry::{Entries, Entry};
use crate::error::StoreError;

/// Ordering of a listing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OrderBy {
    /// Natural order of the store keys
    #[default]
    Key,
}

impl OrderBy {
    /// Value of the `orderBy` query parameter
    pub fn as_param(&self) -> &'static str {
        match self {
            OrderBy::Key => "\"$key\"",
        }
    }

    /// Put a listing into this order
    ///
    /// Filtered listings come back from the store in no particular order,
    /// so the order is restored client-side.
    pub fn sort(&self, entries: &mut Entries) {
        match self {
            OrderBy::Key => entries.sort_by(|a, _, b, _| key_order(a, b)),
        }
    }
}

/// Store key order: keys that parse as 32-bit integers come first in
/// numeric order, every other key follows in lexicographic order.
fn key_order(a: &str, b: &str) -> Ordering {
    match (a.parse::<i32>(), b.parse::<i32>()) {
        (Ok(a), Ok(b)) => a.cmp(&b),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

/// Remote key/value store holding dictionary entries
///
/// Any backend offering key-ordered listing, merge updates and
/// unconditional deletes addressed by entry id fits here.
#[async_trait]
pub trait EntryStore: Send + Sync {
    /// Fetch at most `limit` entries in `order`
    async fn list(&self, limit: u32, order: OrderBy) -> Result<Entries, StoreError>;

    /// Read one entry, `None` when the store has no record for `id`
    async fn get(&self, id: &str) -> Result<Option<Entry>, StoreError>;

    /// Merge the fields of `entry` into the stored record
    async fn patch(&self, id: &str, entry: &Entry) -> Result<(), StoreError>;

    /// Remove the record
    async fn delete(&self, id: &str) -> Result<(), StoreError>;
}
