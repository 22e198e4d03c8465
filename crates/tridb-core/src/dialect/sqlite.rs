//! SQLite dialect implementation.

use crate::column::Column;
use crate::error::Result;
use crate::types::{DialectKind, SqliteType};
use crate::value::SqlValue;

use super::{int_cell, opt_text_cell, text_cell, AutoIncrement, Dialect, PlaceholderStyle};

/// SQLite dialect.
#[derive(Debug, Default, Clone, Copy)]
pub struct SqliteDialect;

impl SqliteDialect {
    /// Creates a new SQLite dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for SqliteDialect {
    fn name(&self) -> &'static str {
        "sqlite"
    }

    fn kind(&self) -> DialectKind {
        DialectKind::Sqlite
    }

    fn placeholder_style(&self) -> PlaceholderStyle {
        PlaceholderStyle::Question
    }

    fn auto_increment(&self) -> AutoIncrement {
        AutoIncrement::Keyword("AUTOINCREMENT")
    }

    fn id_column(&self) -> Column {
        Column::new("id", SqliteType::Integer)
            .primary_key()
            .auto_increment()
    }

    fn list_tables_sql(&self) -> String {
        String::from("SELECT name FROM sqlite_master WHERE type = 'table'")
    }

    fn table_columns_sql(&self, table: &str) -> String {
        format!("PRAGMA table_info({table})")
    }

    fn is_internal_table(&self, name: &str) -> bool {
        name == "sqlite_sequence"
    }

    // PRAGMA table_info row: cid, name, type, notnull, dflt_value, pk.
    fn column_from_catalog_row(&self, row: &[SqlValue]) -> Result<Column> {
        let name = text_cell(row, 1, "name")?;
        let declared = text_cell(row, 2, "type")?;
        let not_null = int_cell(row, 3, "notnull")? != 0;
        let default = opt_text_cell(row, 4, "dflt_value")?;
        let primary = int_cell(row, 5, "pk")? != 0;

        let mut column = Column::new(name, SqliteType::from_declared(&declared));
        if primary {
            column = column.primary_key();
        }
        if not_null {
            column = column.not_null();
        }
        if let Some(expr) = default {
            column = column.default_expr(expr);
        }
        Ok(column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::Table;
    use crate::types::TypeCategory;
    use crate::value::ColumnData;

    #[test]
    fn test_sqlite_dialect() {
        let dialect = SqliteDialect::new();
        assert_eq!(dialect.name(), "sqlite");
        assert_eq!(dialect.kind(), DialectKind::Sqlite);
        assert_eq!(dialect.placeholder_style(), PlaceholderStyle::Question);
        assert!(dialect.is_internal_table("sqlite_sequence"));
        assert!(!dialect.is_internal_table("users"));
    }

    #[test]
    fn test_create_table_prepends_id() {
        let dialect = SqliteDialect::new();
        let table = Table::with_columns(
            "users",
            vec![
                Column::new("name", SqliteType::Text).not_null(),
                Column::new("age", SqliteType::Integer),
            ],
        );
        assert_eq!(
            dialect.create_table_sql(&table).unwrap(),
            "CREATE TABLE IF NOT EXISTS users (\
             id INTEGER PRIMARY KEY AUTOINCREMENT, \
             name TEXT NOT NULL, age INTEGER)"
        );
    }

    #[test]
    fn test_insert_update_delete_sql() {
        let dialect = SqliteDialect::new();
        let values = vec![
            ColumnData::new("name", "Ana"),
            ColumnData::new("age", 31_i64),
        ];
        assert_eq!(
            dialect.insert_sql("users", &values).unwrap(),
            "INSERT INTO users (name, age) VALUES (?, ?)"
        );
        assert_eq!(
            dialect.update_sql("users", &values, None).unwrap(),
            "UPDATE users SET name = ?, age = ?"
        );
        assert_eq!(dialect.delete_sql("users", None), "DELETE FROM users");
    }

    #[test]
    fn test_catalog_row_round_trip() {
        let dialect = SqliteDialect::new();
        let row = vec![
            SqlValue::Int(1),
            SqlValue::Text(String::from("name")),
            SqlValue::Text(String::from("VARCHAR(70)")),
            SqlValue::Int(1),
            SqlValue::Null,
            SqlValue::Int(0),
        ];
        let column = dialect.column_from_catalog_row(&row).unwrap();
        assert_eq!(column.name, "name");
        assert_eq!(column.column_type.category(), TypeCategory::Text);
        assert!(column.not_null);
        assert!(!column.primary_key);
    }

    #[test]
    fn test_rejects_foreign_type_token() {
        let dialect = SqliteDialect::new();
        let column = Column::new("total", crate::types::mysql::integer());
        assert!(matches!(
            dialect.column_sql(&column),
            Err(crate::error::Error::ColumnTypeMismatch { .. })
        ));
    }

    #[test]
    fn test_rejects_unsigned() {
        let dialect = SqliteDialect::new();
        let column = Column::new("age", SqliteType::Integer).unsigned();
        assert!(matches!(
            dialect.column_sql(&column),
            Err(crate::error::Error::UnsupportedModifier { .. })
        ));
    }
}
