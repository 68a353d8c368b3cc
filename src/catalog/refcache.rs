//! Ref cache: remembers which template refs have already been fetched.
//!
//! Some catalogs republish the same `(id, version)` under a new ref when
//! the body changes. Remembering the last-fetched ref per identity lets
//! a sync skip refs whose content cannot have changed, without skipping
//! genuinely republished bodies.

use crate::model::CatalogEntry;
use std::collections::HashMap;

/// Process-scoped cache of last-fetched refs, keyed by template id and
/// version.
#[derive(Debug, Default)]
pub struct RefCache {
    refs: HashMap<String, HashMap<u64, String>>,
}

impl RefCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether this exact ref was the last one fetched for the entry's
    /// identity.
    pub fn is_cached_ref(&self, id: &str, entry: &CatalogEntry) -> bool {
        self.refs
            .get(id)
            .and_then(|versions| versions.get(&entry.version))
            .map(|cached| cached == &entry.ref_url)
            .unwrap_or(false)
    }

    /// Record the entry's ref as the last one fetched for its identity.
    pub fn cache_ref(&mut self, id: &str, entry: &CatalogEntry) {
        self.refs
            .entry(id.to_string())
            .or_default()
            .insert(entry.version, entry.ref_url.clone());
    }
}
