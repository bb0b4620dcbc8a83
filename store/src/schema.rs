//! Schema, row, and filter model for structured tables.
//!
//! Backends are free to map these onto whatever physical layout they use;
//! the contract is purely logical: named, typed columns, rows as
//! column→value maps, and equality filters.

use crate::StoreError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single table cell.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Value {
    Text(String),
    Integer(i64),
    Bool(bool),
}

impl Value {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

/// The type of a table column.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnKind {
    Text,
    Integer,
    Bool,
}

/// Definition of one column in a table schema.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ColumnDef {
    pub name: String,
    pub kind: ColumnKind,
    /// Whether a row must carry a value for this column (after defaulting).
    pub required: bool,
    /// Value filled in when an inserted row omits this column.
    pub default: Option<Value>,
}

impl ColumnDef {
    pub fn text(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ColumnKind::Text,
            required: false,
            default: None,
        }
    }

    pub fn integer(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ColumnKind::Integer,
            required: false,
            default: None,
        }
    }

    pub fn bool(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ColumnKind::Bool,
            required: false,
            default: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }
}

/// The shape of a table: an ordered list of column definitions.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TableSchema {
    pub columns: Vec<ColumnDef>,
}

impl TableSchema {
    pub fn new(columns: Vec<ColumnDef>) -> Self {
        Self { columns }
    }

    pub fn column(&self, name: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.name == name)
    }
}

/// One table row: a column→value map.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Row {
    columns: BTreeMap<String, Value>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// Chainable setter, for building rows inline.
    pub fn set(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.columns.insert(column.into(), value.into());
        self
    }

    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<Value>) {
        self.columns.insert(column.into(), value.into());
    }

    pub fn get(&self, column: &str) -> Option<&Value> {
        self.columns.get(column)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.columns.contains_key(column)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Typed getter: the text value of `column`.
    ///
    /// Fails with [`StoreError::Corruption`] when the column is absent and
    /// [`StoreError::TypeMismatch`] when it holds a different type.
    pub fn text(&self, column: &str) -> Result<&str, StoreError> {
        self.get(column)
            .ok_or_else(|| StoreError::Corruption(format!("missing column: {column}")))?
            .as_text()
            .ok_or_else(|| StoreError::TypeMismatch {
                column: column.to_string(),
                expected: "text",
            })
    }

    /// Typed getter: the integer value of `column`.
    pub fn integer(&self, column: &str) -> Result<i64, StoreError> {
        self.get(column)
            .ok_or_else(|| StoreError::Corruption(format!("missing column: {column}")))?
            .as_integer()
            .ok_or_else(|| StoreError::TypeMismatch {
                column: column.to_string(),
                expected: "integer",
            })
    }
}

/// Conjunction of column equality conditions.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    conditions: Vec<(String, Value)>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Chainable equality condition.
    pub fn eq(mut self, column: impl Into<String>, value: impl Into<Value>) -> Self {
        self.conditions.push((column.into(), value.into()));
        self
    }

    pub fn conditions(&self) -> &[(String, Value)] {
        &self.conditions
    }

    /// Whether `row` satisfies every condition.
    pub fn matches(&self, row: &Row) -> bool {
        self.conditions
            .iter()
            .all(|(column, value)| row.get(column) == Some(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_typed_getters() {
        let row = Row::new().set("name", "alice").set("age", 30i64);
        assert_eq!(row.text("name").unwrap(), "alice");
        assert_eq!(row.integer("age").unwrap(), 30);
    }

    #[test]
    fn missing_column_is_corruption() {
        let row = Row::new();
        assert!(matches!(
            row.text("name"),
            Err(StoreError::Corruption(_))
        ));
    }

    #[test]
    fn wrong_type_is_mismatch() {
        let row = Row::new().set("age", "thirty");
        assert!(matches!(
            row.integer("age"),
            Err(StoreError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn filter_matches_conjunction() {
        let row = Row::new().set("guild_id", "g1").set("member_id", "m1");
        let hit = Filter::new().eq("guild_id", "g1").eq("member_id", "m1");
        let miss = Filter::new().eq("guild_id", "g1").eq("member_id", "m2");
        assert!(hit.matches(&row));
        assert!(!miss.matches(&row));
    }

    #[test]
    fn empty_filter_matches_everything() {
        assert!(Filter::new().matches(&Row::new()));
        assert!(Filter::new().matches(&Row::new().set("x", 1i64)));
    }

    #[test]
    fn schema_column_lookup() {
        let schema = TableSchema::new(vec![
            ColumnDef::text("guild_id").required(),
            ColumnDef::integer("level").required().default_value(0i64),
        ]);
        assert!(schema.column("guild_id").is_some());
        assert_eq!(schema.column("level").unwrap().default, Some(Value::Integer(0)));
        assert!(schema.column("missing").is_none());
    }
}
