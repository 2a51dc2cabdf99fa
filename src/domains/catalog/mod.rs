//! Catalog domain module.
//!
//! This module owns everything on the storage side of the tool layer:
//! the product record, the filter predicate evaluated by storage, and the
//! `CatalogStore` capability the tools are handed at construction time.
//!
//! ## Architecture
//!
//! - `entry.rs` - `CatalogEntry`, `NewCatalogEntry`, `EntryId`, `TextField`
//! - `predicate.rs` - Filter predicates (substring / OR / match-all)
//! - `store.rs` - The `CatalogStore` trait and backend selection
//! - `memory.rs` - In-process store, used by default and in tests
//! - `sqlite.rs` - Persistent store backed by SQLite
//!
//! The tools never reach for a global catalog: they receive an
//! `Arc<dyn CatalogStore>` and only call `create`, `find` and `count`.

mod entry;
mod error;
mod memory;
mod predicate;
mod sqlite;
mod store;

pub use entry::{CatalogEntry, EntryId, NewCatalogEntry, TextField};
pub use error::{StoreError, StoreResult};
pub use memory::MemoryCatalogStore;
pub use predicate::Predicate;
pub use sqlite::SqliteCatalogStore;
pub use store::{CatalogStore, open_store};

/// Round a price to the two-decimal precision kept by storage.
///
/// Prices too large to scale by 100 have no fractional digits left to round
/// and are kept as given.
pub(crate) fn round_price(price: f64) -> f64 {
    let scaled = price * 100.0;
    if scaled.is_finite() {
        scaled.round() / 100.0
    } else {
        price
    }
}

/// Stock as stored: a signed 64-bit count, shared by every backend.
pub(crate) fn stock_column(stock: u64) -> StoreResult<i64> {
    i64::try_from(stock).map_err(|_| StoreError::out_of_range("stock"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_price() {
        assert_eq!(round_price(10.0), 10.0);
        assert_eq!(round_price(10.456), 10.46);
        assert_eq!(round_price(0.004), 0.0);
        assert_eq!(round_price(1999.999), 2000.0);
    }

    #[test]
    fn test_round_price_huge_values_stay_finite() {
        assert_eq!(round_price(1e307), 1e307);
        assert_eq!(round_price(f64::MAX), f64::MAX);
    }

    #[test]
    fn test_stock_column_range() {
        assert_eq!(stock_column(12).unwrap(), 12);
        assert_eq!(stock_column(i64::MAX as u64).unwrap(), i64::MAX);
        assert!(matches!(
            stock_column(u64::MAX),
            Err(StoreError::OutOfRange { ref field }) if field == "stock"
        ));
    }
}
