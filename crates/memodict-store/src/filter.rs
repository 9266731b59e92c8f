use crate::entry::{Entries, Entry};

/// Client-side filter applied to a fetched listing
///
/// Both criteria are optional; an empty string disables the criterion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryFilter {
    lemma_prefix: String,
    freq: String,
}

impl EntryFilter {
    /// The lemma prefix is lower-cased here so matching is case-insensitive.
    pub fn new(lemma_prefix: &str, freq: &str) -> Self {
        Self {
            lemma_prefix: lemma_prefix.to_lowercase(),
            freq: freq.to_string(),
        }
    }

    pub fn lemma_prefix(&self) -> &str {
        &self.lemma_prefix
    }

    pub fn freq(&self) -> &str {
        &self.freq
    }

    /// Copy of this filter with a different lemma prefix
    pub fn with_lemma_prefix(&self, lemma_prefix: &str) -> Self {
        Self::new(lemma_prefix, &self.freq)
    }

    /// Copy of this filter with a different frequency
    pub fn with_freq(&self, freq: &str) -> Self {
        Self {
            lemma_prefix: self.lemma_prefix.clone(),
            freq: freq.to_string(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lemma_prefix.is_empty() && self.freq.is_empty()
    }

    pub fn matches(&self, entry: &Entry) -> bool {
        if !self.lemma_prefix.is_empty() {
            let Some(lemma) = entry.lemma.as_deref() else {
                return false;
            };
            if !lemma.to_lowercase().starts_with(&self.lemma_prefix) {
                return false;
            }
        }

        if !self.freq.is_empty() {
            let Some(freq) = entry.freq.as_ref() else {
                return false;
            };
            if freq.to_string() != self.freq {
                return false;
            }
        }

        true
    }
}

/// Keep the entries matching `filter`, preserving their order
pub fn filter_entries(entries: &Entries, filter: &EntryFilter) -> Entries {
    if filter.is_empty() {
        return entries.clone();
    }

    entries
        .iter()
        .filter(|(_, entry)| filter.matches(entry))
        .map(|(id, entry)| (id.clone(), entry.clone()))
        .collect()
}
