//! The structured-table storage trait.

use crate::{Filter, Row, StoreError, TableSchema};
use async_trait::async_trait;

/// Trait for a generic structured-table store.
///
/// All operations may suspend on storage I/O. Failures propagate to the
/// caller verbatim; no retrying happens at this layer.
#[async_trait]
pub trait TableStore: Send + Sync {
    /// Whether a table with this name exists.
    async fn has_table(&self, name: &str) -> Result<bool, StoreError>;

    /// Create a table with the given schema.
    ///
    /// Fails if a table with this name already exists.
    async fn create_table(&self, name: &str, schema: &TableSchema) -> Result<(), StoreError>;

    /// Return the first row matching `filter`, in insertion order.
    async fn query_first(&self, table: &str, filter: &Filter) -> Result<Option<Row>, StoreError>;

    /// Insert one row. Omitted columns take their schema defaults; a row
    /// still missing a required column after defaulting is rejected.
    async fn insert(&self, table: &str, row: Row) -> Result<(), StoreError>;

    /// Delete every row matching `filter`; returns how many were removed.
    async fn delete(&self, table: &str, filter: &Filter) -> Result<u64, StoreError>;
}
