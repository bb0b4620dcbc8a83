//! Nullable table store — thread-safe in-memory storage for testing.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;
use vouch_store::{Filter, Row, StoreError, TableSchema, TableStore};

struct Table {
    schema: TableSchema,
    rows: Vec<Row>,
}

/// Snapshot of how many times each storage operation was called.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CallCounts {
    pub has_table: u64,
    pub create_table: u64,
    pub query_first: u64,
    pub insert: u64,
    pub delete: u64,
}

impl CallCounts {
    /// Total calls across every operation.
    pub fn total(&self) -> u64 {
        self.has_table + self.create_table + self.query_first + self.insert + self.delete
    }

    /// Total data-path calls (everything except table management).
    pub fn data_calls(&self) -> u64 {
        self.query_first + self.insert + self.delete
    }
}

/// An in-memory structured-table store for testing.
///
/// Thread-safe for use with tokio's multi-threaded runtime. Counts every
/// call per operation so tests can assert on storage traffic, and can be
/// switched into a failing mode to exercise error propagation.
pub struct NullTableStore {
    tables: Mutex<HashMap<String, Table>>,
    has_table_calls: AtomicU64,
    create_table_calls: AtomicU64,
    query_first_calls: AtomicU64,
    insert_calls: AtomicU64,
    delete_calls: AtomicU64,
    failing: AtomicBool,
}

impl NullTableStore {
    pub fn new() -> Self {
        Self {
            tables: Mutex::new(HashMap::new()),
            has_table_calls: AtomicU64::new(0),
            create_table_calls: AtomicU64::new(0),
            query_first_calls: AtomicU64::new(0),
            insert_calls: AtomicU64::new(0),
            delete_calls: AtomicU64::new(0),
            failing: AtomicBool::new(false),
        }
    }

    /// When `true`, every subsequent operation fails with
    /// [`StoreError::Backend`] (after being counted).
    pub fn fail_all(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Snapshot of the per-operation call counters.
    pub fn counts(&self) -> CallCounts {
        CallCounts {
            has_table: self.has_table_calls.load(Ordering::SeqCst),
            create_table: self.create_table_calls.load(Ordering::SeqCst),
            query_first: self.query_first_calls.load(Ordering::SeqCst),
            insert: self.insert_calls.load(Ordering::SeqCst),
            delete: self.delete_calls.load(Ordering::SeqCst),
        }
    }

    /// Reset all call counters to zero.
    pub fn reset_counts(&self) {
        self.has_table_calls.store(0, Ordering::SeqCst);
        self.create_table_calls.store(0, Ordering::SeqCst);
        self.query_first_calls.store(0, Ordering::SeqCst);
        self.insert_calls.store(0, Ordering::SeqCst);
        self.delete_calls.store(0, Ordering::SeqCst);
    }

    /// All rows currently in `table`, in insertion order.
    pub fn rows(&self, table: &str) -> Vec<Row> {
        self.tables
            .lock()
            .unwrap()
            .get(table)
            .map(|t| t.rows.clone())
            .unwrap_or_default()
    }

    /// Number of rows currently in `table`.
    pub fn row_count(&self, table: &str) -> usize {
        self.tables
            .lock()
            .unwrap()
            .get(table)
            .map(|t| t.rows.len())
            .unwrap_or(0)
    }

    fn check_failing(&self) -> Result<(), StoreError> {
        if self.failing.load(Ordering::SeqCst) {
            Err(StoreError::Backend("injected failure".to_string()))
        } else {
            Ok(())
        }
    }

    /// Fill schema defaults and enforce required columns.
    fn apply_schema(schema: &TableSchema, mut row: Row) -> Result<Row, StoreError> {
        for column in &schema.columns {
            if row.contains(&column.name) {
                continue;
            }
            match (&column.default, column.required) {
                (Some(default), _) => row.insert(column.name.clone(), default.clone()),
                (None, true) => {
                    return Err(StoreError::Backend(format!(
                        "missing required column: {}",
                        column.name
                    )))
                }
                (None, false) => {}
            }
        }
        Ok(row)
    }
}

impl Default for NullTableStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TableStore for NullTableStore {
    async fn has_table(&self, name: &str) -> Result<bool, StoreError> {
        self.has_table_calls.fetch_add(1, Ordering::SeqCst);
        self.check_failing()?;
        Ok(self.tables.lock().unwrap().contains_key(name))
    }

    async fn create_table(&self, name: &str, schema: &TableSchema) -> Result<(), StoreError> {
        self.create_table_calls.fetch_add(1, Ordering::SeqCst);
        self.check_failing()?;
        let mut tables = self.tables.lock().unwrap();
        if tables.contains_key(name) {
            return Err(StoreError::Backend(format!("table already exists: {name}")));
        }
        tables.insert(
            name.to_string(),
            Table {
                schema: schema.clone(),
                rows: Vec::new(),
            },
        );
        Ok(())
    }

    async fn query_first(&self, table: &str, filter: &Filter) -> Result<Option<Row>, StoreError> {
        self.query_first_calls.fetch_add(1, Ordering::SeqCst);
        self.check_failing()?;
        let tables = self.tables.lock().unwrap();
        let table = tables
            .get(table)
            .ok_or_else(|| StoreError::TableMissing(table.to_string()))?;
        Ok(table.rows.iter().find(|row| filter.matches(row)).cloned())
    }

    async fn insert(&self, table: &str, row: Row) -> Result<(), StoreError> {
        self.insert_calls.fetch_add(1, Ordering::SeqCst);
        self.check_failing()?;
        let mut tables = self.tables.lock().unwrap();
        let table = tables
            .get_mut(table)
            .ok_or_else(|| StoreError::TableMissing(table.to_string()))?;
        let row = Self::apply_schema(&table.schema, row)?;
        table.rows.push(row);
        Ok(())
    }

    async fn delete(&self, table: &str, filter: &Filter) -> Result<u64, StoreError> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        self.check_failing()?;
        let mut tables = self.tables.lock().unwrap();
        let table = tables
            .get_mut(table)
            .ok_or_else(|| StoreError::TableMissing(table.to_string()))?;
        let before = table.rows.len();
        table.rows.retain(|row| !filter.matches(row));
        Ok((before - table.rows.len()) as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vouch_store::ColumnDef;

    fn people_schema() -> TableSchema {
        TableSchema::new(vec![
            ColumnDef::text("name").required(),
            ColumnDef::integer("score").required().default_value(0i64),
        ])
    }

    #[tokio::test]
    async fn create_insert_query_delete() {
        let store = NullTableStore::new();
        store.create_table("people", &people_schema()).await.unwrap();
        assert!(store.has_table("people").await.unwrap());

        store
            .insert("people", Row::new().set("name", "alice").set("score", 3i64))
            .await
            .unwrap();
        store
            .insert("people", Row::new().set("name", "bob"))
            .await
            .unwrap();

        let found = store
            .query_first("people", &Filter::new().eq("name", "bob"))
            .await
            .unwrap()
            .expect("bob exists");
        // score defaulted from the schema
        assert_eq!(found.integer("score").unwrap(), 0);

        let removed = store
            .delete("people", &Filter::new().eq("name", "alice"))
            .await
            .unwrap();
        assert_eq!(removed, 1);
        assert_eq!(store.row_count("people"), 1);
    }

    #[tokio::test]
    async fn missing_required_column_is_rejected() {
        let store = NullTableStore::new();
        store.create_table("people", &people_schema()).await.unwrap();
        let result = store.insert("people", Row::new().set("score", 1i64)).await;
        assert!(matches!(result, Err(StoreError::Backend(_))));
        assert_eq!(store.row_count("people"), 0);
    }

    #[tokio::test]
    async fn query_against_unknown_table_fails() {
        let store = NullTableStore::new();
        let result = store.query_first("nope", &Filter::new()).await;
        assert!(matches!(result, Err(StoreError::TableMissing(_))));
    }

    #[tokio::test]
    async fn double_create_fails() {
        let store = NullTableStore::new();
        store.create_table("people", &people_schema()).await.unwrap();
        let result = store.create_table("people", &people_schema()).await;
        assert!(matches!(result, Err(StoreError::Backend(_))));
    }

    #[tokio::test]
    async fn counters_track_every_call() {
        let store = NullTableStore::new();
        store.create_table("people", &people_schema()).await.unwrap();
        store
            .insert("people", Row::new().set("name", "alice"))
            .await
            .unwrap();
        let _ = store.query_first("people", &Filter::new()).await.unwrap();
        let _ = store.delete("people", &Filter::new()).await.unwrap();

        let counts = store.counts();
        assert_eq!(counts.create_table, 1);
        assert_eq!(counts.insert, 1);
        assert_eq!(counts.query_first, 1);
        assert_eq!(counts.delete, 1);
        assert_eq!(counts.data_calls(), 3);

        store.reset_counts();
        assert_eq!(store.counts().total(), 0);
    }

    #[tokio::test]
    async fn injected_failures_still_count() {
        let store = NullTableStore::new();
        store.create_table("people", &people_schema()).await.unwrap();
        store.fail_all(true);

        let result = store.insert("people", Row::new().set("name", "x")).await;
        assert!(matches!(result, Err(StoreError::Backend(_))));
        assert_eq!(store.counts().insert, 1);
        assert_eq!(store.row_count("people"), 0);

        store.fail_all(false);
        store
            .insert("people", Row::new().set("name", "x"))
            .await
            .unwrap();
        assert_eq!(store.row_count("people"), 1);
    }
}
