//! Table descriptors.

use serde::Serialize;

use crate::column::Column;

/// A named, ordered collection of columns.
///
/// Column order is significant: it defines DDL order on create and
/// mirrors catalog order on reflection. The implicit leading `id` column
/// is prepended by the create-table operation and shows up here only when
/// a table is reflected back.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Table {
    /// Table name.
    pub name: String,
    /// Columns in definition order.
    pub columns: Vec<Column>,
}

impl Table {
    /// Creates an empty table descriptor.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: Vec::new(),
        }
    }

    /// Creates a table descriptor with columns.
    #[must_use]
    pub fn with_columns(name: impl Into<String>, columns: Vec<Column>) -> Self {
        Self {
            name: name.into(),
            columns,
        }
    }

    /// Looks up a column by name.
    #[must_use]
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Pretty-printed JSON description of the table.
    ///
    /// # Errors
    ///
    /// Returns a [`serde_json::Error`] if serialization fails.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
