pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Invalid store address {url}: {reason}")]
    InvalidAddress { url: String, reason: String },

    #[error("Fetch error: {0}")]
    Fetch(#[source] BoxError),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Entry {id} not found: {reason}")]
    NotFound { id: String, reason: String },

    #[error("Update of entry {id} rejected: {source}")]
    Update {
        id: String,
        #[source]
        source: BoxError,
    },

    #[error("Delete of entry {id} rejected: {source}")]
    Delete {
        id: String,
        #[source]
        source: BoxError,
    },
}

impl StoreError {
    pub fn fetch(err: impl Into<BoxError>) -> Self {
        StoreError::Fetch(err.into())
    }

    pub fn update(id: &str, err: impl Into<BoxError>) -> Self {
        StoreError::Update {
            id: id.to_string(),
            source: err.into(),
        }
    }

    pub fn delete(id: &str, err: impl Into<BoxError>) -> Self {
        StoreError::Delete {
            id: id.to_string(),
            source: err.into(),
        }
    }
}
