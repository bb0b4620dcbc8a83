//! Abstract storage trait for the structured-table collaborator.
//!
//! The persistence engine behind vouch is a generic table store supplied by
//! the host application. This crate defines the five operations verification
//! tracking consumes (table existence, table creation, first-match query,
//! insert, filtered delete) plus the schema/row/value model those operations
//! speak. Every backend (the host's real engine, the in-memory nullable for
//! testing) implements [`TableStore`]; the rest of the workspace depends
//! only on the trait.

pub mod error;
pub mod schema;
pub mod table;

pub use error::StoreError;
pub use schema::{ColumnDef, ColumnKind, Filter, Row, TableSchema, Value};
pub use table::TableStore;
