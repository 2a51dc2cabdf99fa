//! SQLite-backed catalog store.

use chrono::{DateTime, Utc};
use rusqlite::functions::FunctionFlags;
use rusqlite::types::Type;
use rusqlite::{Connection, ErrorCode, Row, params, params_from_iter};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;
use tracing::debug;

use super::entry::{CatalogEntry, EntryId, NewCatalogEntry};
use super::error::{StoreError, StoreResult};
use super::predicate::Predicate;
use super::store::CatalogStore;

const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS products (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    description TEXT,
    price REAL NOT NULL,
    stock INTEGER NOT NULL DEFAULT 0,
    category TEXT,
    sku TEXT NOT NULL UNIQUE,
    image TEXT,
    is_active INTEGER NOT NULL DEFAULT 1,
    created_at TEXT NOT NULL
);
"#;

const SELECT_COLUMNS: &str =
    "id, name, description, price, stock, category, sku, image, is_active, created_at";

/// Catalog store persisted in a SQLite database.
///
/// SKU uniqueness is a `UNIQUE` column constraint; the store never pre-checks.
/// Substring matching runs `LIKE` over `unicode_lower(column)`, a function
/// registered on every connection, so case folds the same way as in the
/// memory store and not only for ASCII letters.
pub struct SqliteCatalogStore {
    conn: Mutex<Connection>,
}

impl SqliteCatalogStore {
    /// Open (or create) the database at `path` and install the schema.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        conn.busy_timeout(Duration::from_secs(5))?;
        Self::from_connection(conn)
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> StoreResult<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> StoreResult<Self> {
        conn.create_scalar_function(
            "unicode_lower",
            1,
            FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
            |ctx| {
                let value: Option<String> = ctx.get(0)?;
                Ok(value.map(|v| v.to_lowercase()))
            },
        )?;
        conn.execute_batch(SCHEMA_SQL)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| StoreError::unavailable("database connection lock poisoned"))
    }
}

impl CatalogStore for SqliteCatalogStore {
    fn create(&self, entry: NewCatalogEntry) -> StoreResult<EntryId> {
        let stock = super::stock_column(entry.stock)?;
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO products \
             (name, description, price, stock, category, sku, image, is_active, created_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                entry.name,
                entry.description,
                super::round_price(entry.price),
                stock,
                entry.category,
                entry.sku,
                entry.image,
                entry.is_active,
                Utc::now().to_rfc3339(),
            ],
        )
        .map_err(map_insert_error)?;

        let id = conn.last_insert_rowid();
        debug!("Inserted product row {}", id);
        Ok(EntryId(id as u64))
    }

    fn find(&self, predicate: &Predicate) -> StoreResult<Vec<CatalogEntry>> {
        let mut args = Vec::new();
        let clause = where_clause(predicate, &mut args);
        let sql = format!("SELECT {SELECT_COLUMNS} FROM products WHERE {clause} ORDER BY id");

        let conn = self.lock()?;
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt.query_map(params_from_iter(args.iter()), read_entry)?;
        Ok(rows.collect::<Result<Vec<_>, _>>()?)
    }

    fn count(&self, predicate: &Predicate) -> StoreResult<u64> {
        let mut args = Vec::new();
        let clause = where_clause(predicate, &mut args);
        let sql = format!("SELECT COUNT(*) FROM products WHERE {clause}");

        let conn = self.lock()?;
        let count: i64 = conn.query_row(&sql, params_from_iter(args.iter()), |row| row.get(0))?;
        Ok(count.max(0) as u64)
    }

    fn backend_name(&self) -> &'static str {
        "sqlite"
    }
}

/// Render a predicate as a SQL condition, pushing bound values into `args`.
///
/// Column names come from `TextField`, never from caller input.
fn where_clause(predicate: &Predicate, args: &mut Vec<String>) -> String {
    match predicate {
        Predicate::MatchAll => "1 = 1".to_string(),
        Predicate::Contains { field, term } => {
            args.push(like_pattern(&term.to_lowercase()));
            format!("unicode_lower({}) LIKE ? ESCAPE '\\'", field.as_str())
        }
        Predicate::Or(inner) if inner.is_empty() => "0 = 1".to_string(),
        Predicate::Or(inner) => {
            let parts: Vec<String> = inner.iter().map(|p| where_clause(p, args)).collect();
            format!("({})", parts.join(" OR "))
        }
    }
}

/// `%term%` with LIKE wildcards in the term escaped.
fn like_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn read_entry(row: &Row<'_>) -> rusqlite::Result<CatalogEntry> {
    let created_at: String = row.get(9)?;
    let created_at = DateTime::parse_from_rfc3339(&created_at)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(9, Type::Text, Box::new(e)))?
        .with_timezone(&Utc);
    let id: i64 = row.get(0)?;
    let stock: i64 = row.get(4)?;

    Ok(CatalogEntry {
        id: EntryId(id as u64),
        name: row.get(1)?,
        description: row.get(2)?,
        price: row.get(3)?,
        stock: stock.max(0) as u64,
        category: row.get(5)?,
        sku: row.get(6)?,
        image: row.get(7)?,
        is_active: row.get(8)?,
        created_at,
    })
}

fn map_insert_error(err: rusqlite::Error) -> StoreError {
    if let rusqlite::Error::SqliteFailure(code, Some(message)) = &err {
        if code.code == ErrorCode::ConstraintViolation && message.contains("UNIQUE constraint failed")
        {
            // "UNIQUE constraint failed: products.sku"
            let field = message
                .rsplit('.')
                .next()
                .map(str::trim)
                .filter(|f| !f.is_empty())
                .unwrap_or("sku");
            return StoreError::unique_violation(field);
        }
    }
    StoreError::Sql(err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::catalog::TextField;
    use tempfile::TempDir;

    fn store() -> SqliteCatalogStore {
        SqliteCatalogStore::open_in_memory().unwrap()
    }

    #[test]
    fn test_like_pattern_escapes_wildcards() {
        assert_eq!(like_pattern("abc"), "%abc%");
        assert_eq!(like_pattern("50%"), "%50\\%%");
        assert_eq!(like_pattern("a_b"), "%a\\_b%");
    }

    #[test]
    fn test_where_clause_or() {
        let mut args = Vec::new();
        let clause = where_clause(&Predicate::contains_any("x"), &mut args);
        assert_eq!(args.len(), 4);
        assert!(clause.starts_with("(unicode_lower(name) LIKE"));
        assert!(clause.contains(" OR unicode_lower(category) LIKE"));
    }

    #[test]
    fn test_where_clause_lowercases_term() {
        let mut args = Vec::new();
        where_clause(&Predicate::contains(TextField::Name, "ÉCLAIR"), &mut args);
        assert_eq!(args, vec!["%éclair%".to_string()]);
    }

    #[test]
    fn test_case_folds_beyond_ascii() {
        let store = store();
        store.create(NewCatalogEntry::new("ÉCLAIR au café", 3.0, "P-1")).unwrap();
        store
            .create(NewCatalogEntry::new("Straße Map", 7.0, "P-2").with_category("ÜBER"))
            .unwrap();

        let eclair = Predicate::contains(TextField::Name, "éclair");
        assert_eq!(store.count(&eclair).unwrap(), 1);
        let upper = Predicate::contains(TextField::Name, "CAFÉ");
        assert_eq!(store.count(&upper).unwrap(), 1);
        let category = Predicate::contains(TextField::Category, "über");
        assert_eq!(store.find(&category).unwrap()[0].sku, "P-2");
    }

    #[test]
    fn test_stock_beyond_i64_rejected() {
        let store = store();
        let err = store
            .create(NewCatalogEntry::new("Huge", 1.0, "H-1").with_stock(u64::MAX))
            .unwrap_err();
        assert!(matches!(err, StoreError::OutOfRange { ref field } if field == "stock"));
        assert_eq!(store.count(&Predicate::MatchAll).unwrap(), 0);

        store
            .create(NewCatalogEntry::new("Max", 1.0, "H-2").with_stock(i64::MAX as u64))
            .unwrap();
        let found = store.find(&Predicate::MatchAll).unwrap();
        assert_eq!(found[0].stock, i64::MAX as u64);
    }

    #[test]
    fn test_huge_price_kept() {
        let store = store();
        store.create(NewCatalogEntry::new("Yacht", 1e307, "Y-1")).unwrap();
        let found = store.find(&Predicate::MatchAll).unwrap();
        assert_eq!(found[0].price, 1e307);
    }

    #[test]
    fn test_create_and_find_round_trip() {
        let store = store();
        let id = store
            .create(
                NewCatalogEntry::new("Desk Lamp", 34.567, "LAMP-001")
                    .with_description("LED, dimmable")
                    .with_stock(12)
                    .with_category("Home & Garden")
                    .with_image("https://example.com/lamp.png")
                    .with_active(false),
            )
            .unwrap();

        let found = store
            .find(&Predicate::contains(TextField::Sku, "lamp-001"))
            .unwrap();
        assert_eq!(found.len(), 1);
        let entry = &found[0];
        assert_eq!(entry.id, id);
        assert_eq!(entry.name, "Desk Lamp");
        assert_eq!(entry.description.as_deref(), Some("LED, dimmable"));
        assert_eq!(entry.price, 34.57);
        assert_eq!(entry.stock, 12);
        assert_eq!(entry.category.as_deref(), Some("Home & Garden"));
        assert_eq!(entry.image.as_deref(), Some("https://example.com/lamp.png"));
        assert!(!entry.is_active);
    }

    #[test]
    fn test_duplicate_sku_maps_to_unique_violation() {
        let store = store();
        store.create(NewCatalogEntry::new("A", 1.0, "SKU-1")).unwrap();
        let err = store
            .create(NewCatalogEntry::new("B", 2.0, "SKU-1"))
            .unwrap_err();
        assert!(matches!(err, StoreError::UniqueViolation { ref field } if field == "sku"));
        assert_eq!(store.count(&Predicate::MatchAll).unwrap(), 1);
    }

    #[test]
    fn test_count_with_predicates() {
        let store = store();
        store
            .create(NewCatalogEntry::new("Phone", 500.0, "E-1").with_category("Electronics"))
            .unwrap();
        store
            .create(NewCatalogEntry::new("Laptop", 900.0, "E-2").with_category("electronics"))
            .unwrap();
        store
            .create(NewCatalogEntry::new("Novel", 9.0, "B-1").with_category("Books"))
            .unwrap();

        let electronics = Predicate::contains(TextField::Category, "Electronics");
        assert_eq!(store.count(&electronics).unwrap(), 2);
        assert_eq!(store.count(&Predicate::MatchAll).unwrap(), 3);
        assert_eq!(store.count(&Predicate::contains_any("zzz")).unwrap(), 0);
    }

    #[test]
    fn test_wildcards_match_literally() {
        let store = store();
        store.create(NewCatalogEntry::new("100% Cotton", 5.0, "C-1")).unwrap();
        store.create(NewCatalogEntry::new("1000 Cotton", 5.0, "C-2")).unwrap();
        let found = store
            .find(&Predicate::contains(TextField::Name, "100%"))
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].sku, "C-1");
    }

    #[test]
    fn test_persists_across_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("catalog.db");
        {
            let store = SqliteCatalogStore::open(&path).unwrap();
            store.create(NewCatalogEntry::new("Kept", 1.0, "K-1")).unwrap();
        }
        let store = SqliteCatalogStore::open(&path).unwrap();
        assert_eq!(store.count(&Predicate::MatchAll).unwrap(), 1);
    }
}
