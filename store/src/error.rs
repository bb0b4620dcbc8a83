use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("table not found: {0}")]
    TableMissing(String),

    #[error("type mismatch in column {column}: expected {expected}")]
    TypeMismatch {
        column: String,
        expected: &'static str,
    },

    #[error("storage backend error: {0}")]
    Backend(String),

    #[error("stored data is corrupted: {0}")]
    Corruption(String),
}
