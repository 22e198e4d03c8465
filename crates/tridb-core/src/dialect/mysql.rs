//! MySQL dialect implementation.

use crate::column::Column;
use crate::error::Result;
use crate::types::{mysql, DialectKind};
use crate::value::SqlValue;

use super::{opt_text_cell, text_cell, AutoIncrement, Dialect, PlaceholderStyle};

/// MySQL dialect.
#[derive(Debug, Default, Clone, Copy)]
pub struct MySqlDialect;

impl MySqlDialect {
    /// Creates a new MySQL dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for MySqlDialect {
    fn name(&self) -> &'static str {
        "mysql"
    }

    fn kind(&self) -> DialectKind {
        DialectKind::MySql
    }

    fn placeholder_style(&self) -> PlaceholderStyle {
        PlaceholderStyle::Question
    }

    fn auto_increment(&self) -> AutoIncrement {
        AutoIncrement::Keyword("AUTO_INCREMENT")
    }

    fn id_column(&self) -> Column {
        Column::new("id", mysql::integer())
            .primary_key()
            .auto_increment()
    }

    fn supports_unsigned(&self) -> bool {
        true
    }

    fn supports_on_update(&self) -> bool {
        true
    }

    fn list_tables_sql(&self) -> String {
        String::from("SHOW TABLES")
    }

    fn table_columns_sql(&self, table: &str) -> String {
        format!("SHOW COLUMNS FROM {table}")
    }

    // SHOW COLUMNS row: Field, Type, Null, Key, Default, Extra.
    fn column_from_catalog_row(&self, row: &[SqlValue]) -> Result<Column> {
        let name = text_cell(row, 0, "Field")?;
        let declared = text_cell(row, 1, "Type")?;
        let nullable = text_cell(row, 2, "Null")?;
        let key = text_cell(row, 3, "Key")?;
        let default = opt_text_cell(row, 4, "Default")?;
        let extra = text_cell(row, 5, "Extra")?;

        let mut column = Column::new(name, mysql::reflected(&declared));
        if key == "PRI" {
            column = column.primary_key();
        }
        if key == "UNI" {
            column = column.unique();
        }
        if nullable == "NO" {
            column = column.not_null();
        }
        if declared.to_ascii_lowercase().contains("unsigned") {
            column = column.unsigned();
        }
        if let Some(expr) = default {
            column = column.default_expr(expr);
        }
        let extra_lower = extra.to_ascii_lowercase();
        if extra_lower.contains("auto_increment") {
            column = column.auto_increment();
        }
        if let Some(position) = extra_lower.find("on update ") {
            column = column.on_update(extra[position + "on update ".len()..].to_owned());
        }
        Ok(column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::CURRENT_TIMESTAMP;
    use crate::table::Table;
    use crate::types::TypeCategory;
    use crate::value::ColumnData;

    #[test]
    fn test_mysql_dialect() {
        let dialect = MySqlDialect::new();
        assert_eq!(dialect.name(), "mysql");
        assert_eq!(dialect.kind(), DialectKind::MySql);
        assert!(dialect.supports_unsigned());
        assert!(dialect.supports_on_update());
        assert_eq!(dialect.table_columns_sql("users"), "SHOW COLUMNS FROM users");
    }

    #[test]
    fn test_modifier_order() {
        let dialect = MySqlDialect::new();
        let column = Column::new("stamp", mysql::timestamp())
            .not_null()
            .default_expr(CURRENT_TIMESTAMP)
            .on_update(CURRENT_TIMESTAMP);
        assert_eq!(
            dialect.column_sql(&column).unwrap(),
            "stamp TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP ON UPDATE CURRENT_TIMESTAMP"
        );
    }

    #[test]
    fn test_unsigned_column() {
        let dialect = MySqlDialect::new();
        let column = Column::new("hits", mysql::integer()).not_null().unsigned();
        assert_eq!(
            dialect.column_sql(&column).unwrap(),
            "hits INTEGER NOT NULL UNSIGNED"
        );
    }

    #[test]
    fn test_create_table_prepends_id() {
        let dialect = MySqlDialect::new();
        let table = Table::with_columns("logs", vec![Column::new("line", mysql::text())]);
        assert_eq!(
            dialect.create_table_sql(&table).unwrap(),
            "CREATE TABLE IF NOT EXISTS logs (\
             id INTEGER PRIMARY KEY AUTO_INCREMENT, line TEXT)"
        );
    }

    #[test]
    fn test_catalog_row_decoding() {
        let dialect = MySqlDialect::new();
        let row = vec![
            SqlValue::Text(String::from("id")),
            SqlValue::Text(String::from("int unsigned")),
            SqlValue::Text(String::from("NO")),
            SqlValue::Text(String::from("PRI")),
            SqlValue::Null,
            SqlValue::Text(String::from("auto_increment")),
        ];
        let column = dialect.column_from_catalog_row(&row).unwrap();
        assert_eq!(column.name, "id");
        assert_eq!(column.column_type.category(), TypeCategory::Integer);
        assert!(column.primary_key);
        assert!(column.not_null);
        assert!(column.unsigned);
        assert!(column.auto_increment);
    }

    #[test]
    fn test_catalog_row_on_update() {
        let dialect = MySqlDialect::new();
        let row = vec![
            SqlValue::Text(String::from("updated_at")),
            SqlValue::Text(String::from("timestamp")),
            SqlValue::Text(String::from("YES")),
            SqlValue::Text(String::new()),
            SqlValue::Text(String::from("CURRENT_TIMESTAMP")),
            SqlValue::Text(String::from("on update CURRENT_TIMESTAMP")),
        ];
        let column = dialect.column_from_catalog_row(&row).unwrap();
        assert_eq!(column.on_update.as_deref(), Some("CURRENT_TIMESTAMP"));
        assert!(!column.not_null);
        assert_eq!(column.column_type.category(), TypeCategory::DateTime);
    }

    #[test]
    fn test_insert_placeholders() {
        let dialect = MySqlDialect::new();
        let values = vec![ColumnData::new("line", "boot")];
        assert_eq!(
            dialect.insert_sql("logs", &values).unwrap(),
            "INSERT INTO logs (line) VALUES (?)"
        );
    }
}
