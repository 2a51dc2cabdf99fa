//! The catalog storage capability and backend selection.

use std::sync::Arc;
use tracing::info;

use super::entry::{CatalogEntry, EntryId, NewCatalogEntry};
use super::error::StoreResult;
use super::memory::MemoryCatalogStore;
use super::predicate::Predicate;
use super::sqlite::SqliteCatalogStore;
use crate::core::config::{CatalogConfig, StorageBackend};

/// Storage operations the tool layer depends on.
///
/// Implementations own entry identity and persistence. SKU uniqueness must be
/// enforced atomically by the store itself: a violation is reported as
/// `StoreError::UniqueViolation` and nothing is written. Stock above
/// `i64::MAX` is refused with `StoreError::OutOfRange` on every backend.
pub trait CatalogStore: Send + Sync {
    /// Persist a new entry and return its assigned id.
    fn create(&self, entry: NewCatalogEntry) -> StoreResult<EntryId>;

    /// Every entry matching the predicate, ordered by id.
    fn find(&self, predicate: &Predicate) -> StoreResult<Vec<CatalogEntry>>;

    /// Number of entries matching the predicate.
    fn count(&self, predicate: &Predicate) -> StoreResult<u64>;

    /// Short backend name for logs and health output.
    fn backend_name(&self) -> &'static str;
}

/// Open the store selected by configuration.
pub fn open_store(config: &CatalogConfig) -> StoreResult<Arc<dyn CatalogStore>> {
    match config.backend {
        StorageBackend::Memory => {
            info!("Using in-memory catalog store");
            Ok(Arc::new(MemoryCatalogStore::new()))
        }
        StorageBackend::Sqlite => {
            info!("Using SQLite catalog store at {:?}", config.database_path);
            Ok(Arc::new(SqliteCatalogStore::open(&config.database_path)?))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_memory_store() {
        let store = open_store(&CatalogConfig::default()).unwrap();
        assert_eq!(store.backend_name(), "memory");
    }

    #[test]
    fn test_open_sqlite_store() {
        let temp_dir = TempDir::new().unwrap();
        let config = CatalogConfig {
            backend: StorageBackend::Sqlite,
            database_path: temp_dir.path().join("nested").join("catalog.db"),
        };
        let store = open_store(&config).unwrap();
        assert_eq!(store.backend_name(), "sqlite");
        assert_eq!(store.count(&Predicate::MatchAll).unwrap(), 0);
    }
}
