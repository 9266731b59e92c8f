mod client;
mod entry;
mod error;
mod filter;
mod firebase;
mod store;

pub use client::EntryClient;
pub use entry::{Entries, Entry, FLAG_MARKER, Freq, toggled_status};
pub use error::{BoxError, StoreError};
pub use filter::{EntryFilter, filter_entries};
pub use firebase::FirebaseStore;
pub use store::{EntryStore, OrderBy};
