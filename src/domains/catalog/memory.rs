//! In-memory catalog store.

use chrono::Utc;
use std::sync::{Mutex, MutexGuard};

use super::entry::{CatalogEntry, EntryId, NewCatalogEntry};
use super::error::{StoreError, StoreResult};
use super::predicate::Predicate;
use super::store::CatalogStore;

#[derive(Debug, Default)]
struct State {
    next_id: u64,
    entries: Vec<CatalogEntry>,
}

/// Catalog store kept in process memory.
///
/// The SKU check and the insert happen under a single lock acquisition, so
/// two concurrent creates with the same SKU cannot both succeed.
#[derive(Debug, Default)]
pub struct MemoryCatalogStore {
    state: Mutex<State>,
}

impl MemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, State>> {
        self.state
            .lock()
            .map_err(|_| StoreError::unavailable("catalog lock poisoned"))
    }
}

impl CatalogStore for MemoryCatalogStore {
    fn create(&self, entry: NewCatalogEntry) -> StoreResult<EntryId> {
        super::stock_column(entry.stock)?;
        let mut state = self.lock()?;

        if state.entries.iter().any(|existing| existing.sku == entry.sku) {
            return Err(StoreError::unique_violation("sku"));
        }

        state.next_id += 1;
        let id = EntryId(state.next_id);
        state
            .entries
            .push(CatalogEntry::from_new(id, entry, Utc::now()));
        Ok(id)
    }

    fn find(&self, predicate: &Predicate) -> StoreResult<Vec<CatalogEntry>> {
        let state = self.lock()?;
        Ok(state
            .entries
            .iter()
            .filter(|entry| predicate.matches(entry))
            .cloned()
            .collect())
    }

    fn count(&self, predicate: &Predicate) -> StoreResult<u64> {
        let state = self.lock()?;
        Ok(state
            .entries
            .iter()
            .filter(|entry| predicate.matches(entry))
            .count() as u64)
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
