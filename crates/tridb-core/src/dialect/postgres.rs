//! PostgreSQL dialect implementation.

use crate::column::Column;
use crate::error::{Error, Result};
use crate::types::{postgres, DialectKind, TypeCategory};
use crate::value::SqlValue;

use super::{bool_cell, opt_text_cell, text_cell, AutoIncrement, Dialect, PlaceholderStyle};

/// PostgreSQL dialect.
#[derive(Debug, Default, Clone, Copy)]
pub struct PostgresDialect;

impl PostgresDialect {
    /// Creates a new PostgreSQL dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Dialect for PostgresDialect {
    fn name(&self) -> &'static str {
        "postgres"
    }

    fn kind(&self) -> DialectKind {
        DialectKind::Postgres
    }

    fn placeholder_style(&self) -> PlaceholderStyle {
        PlaceholderStyle::Numbered
    }

    fn auto_increment(&self) -> AutoIncrement {
        AutoIncrement::Serial
    }

    fn id_column(&self) -> Column {
        Column::new("id", postgres::serial()).primary_key()
    }

    // Auto-increment has no keyword here; the integer type itself is
    // swapped for its serial counterpart.
    fn type_sql(&self, column: &Column) -> Result<String> {
        if !column.auto_increment {
            return Ok(column.column_type.as_sql().to_owned());
        }
        let token = match column.column_type.category() {
            TypeCategory::SmallInt => "smallserial",
            TypeCategory::Integer => "serial",
            TypeCategory::BigInt => "bigserial",
            TypeCategory::Serial => column.column_type.as_sql(),
            _ => {
                return Err(Error::UnsupportedModifier {
                    modifier: "AUTO INCREMENT on a non-integer column",
                    dialect: DialectKind::Postgres,
                })
            }
        };
        Ok(token.to_owned())
    }

    fn list_tables_sql(&self) -> String {
        String::from(
            "SELECT table_name FROM information_schema.tables \
             WHERE table_schema = 'public' AND table_type = 'BASE TABLE'",
        )
    }

    fn table_columns_sql(&self, table: &str) -> String {
        format!(
            "SELECT c.column_name, c.data_type, \
             EXISTS (SELECT 1 FROM information_schema.table_constraints tc \
             JOIN information_schema.key_column_usage kcu \
             ON tc.constraint_name = kcu.constraint_name \
             WHERE tc.table_name = c.table_name \
             AND tc.constraint_type = 'PRIMARY KEY' \
             AND kcu.column_name = c.column_name) AS is_primary, \
             COALESCE(c.column_default LIKE 'nextval%', false) AS is_serial, \
             c.is_nullable, c.column_default \
             FROM information_schema.columns c \
             WHERE c.table_schema = 'public' AND c.table_name = '{table}' \
             ORDER BY c.ordinal_position"
        )
    }

    // Row: column_name, data_type, is_primary, is_serial, is_nullable,
    // column_default.
    fn column_from_catalog_row(&self, row: &[SqlValue]) -> Result<Column> {
        let name = text_cell(row, 0, "column_name")?;
        let data_type = text_cell(row, 1, "data_type")?;
        let primary = bool_cell(row, 2, "is_primary")?;
        let serial = bool_cell(row, 3, "is_serial")?;
        let nullable = text_cell(row, 4, "is_nullable")?;
        let default = opt_text_cell(row, 5, "column_default")?;

        let mut column = Column::new(name, postgres::reflected(&data_type, serial));
        if primary {
            column = column.primary_key();
        }
        if nullable == "NO" {
            column = column.not_null();
        }
        // A serial column's default is the sequence call, not user data.
        if let Some(expr) = default.filter(|_| !serial) {
            column = column.default_expr(expr);
        }
        Ok(column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::Filter;
    use crate::table::Table;
    use crate::value::ColumnData;

    #[test]
    fn test_postgres_dialect() {
        let dialect = PostgresDialect::new();
        assert_eq!(dialect.name(), "postgres");
        assert_eq!(dialect.kind(), DialectKind::Postgres);
        assert_eq!(dialect.placeholder_style(), PlaceholderStyle::Numbered);
        assert_eq!(dialect.auto_increment(), AutoIncrement::Serial);
    }

    #[test]
    fn test_create_table_uses_serial_id() {
        let dialect = PostgresDialect::new();
        let table = Table::with_columns(
            "users",
            vec![Column::new("name", postgres::text()).not_null()],
        );
        assert_eq!(
            dialect.create_table_sql(&table).unwrap(),
            "CREATE TABLE IF NOT EXISTS users (\
             id serial PRIMARY KEY, name text NOT NULL)"
        );
    }

    #[test]
    fn test_serial_substitution() {
        let dialect = PostgresDialect::new();
        let column = Column::new("seq", postgres::bigint()).auto_increment();
        assert_eq!(dialect.column_sql(&column).unwrap(), "seq bigserial");

        let column = Column::new("seq", postgres::smallint()).auto_increment();
        assert_eq!(dialect.column_sql(&column).unwrap(), "seq smallserial");
    }

    #[test]
    fn test_auto_increment_rejected_on_text() {
        let dialect = PostgresDialect::new();
        let column = Column::new("name", postgres::text()).auto_increment();
        assert!(matches!(
            dialect.column_sql(&column),
            Err(Error::UnsupportedModifier { .. })
        ));
    }

    #[test]
    fn test_numbered_placeholders() {
        let dialect = PostgresDialect::new();
        let values = vec![
            ColumnData::new("name", "Ana"),
            ColumnData::new("age", 31_i64),
        ];
        assert_eq!(
            dialect.insert_sql("users", &values).unwrap(),
            "INSERT INTO users (name, age) VALUES ($1, $2)"
        );

        let filter = Filter::new("id").equal(7);
        assert_eq!(
            dialect.update_sql("users", &values, Some(&filter)).unwrap(),
            "UPDATE users SET name = $1, age = $2 WHERE id = $3"
        );
        assert_eq!(
            dialect.select_sql("users", &["name"], Some(&filter)),
            "SELECT name FROM users WHERE id = $1"
        );
    }

    #[test]
    fn test_catalog_row_decoding() {
        let dialect = PostgresDialect::new();
        let row = vec![
            SqlValue::Text(String::from("id")),
            SqlValue::Text(String::from("integer")),
            SqlValue::Bool(true),
            SqlValue::Bool(true),
            SqlValue::Text(String::from("NO")),
            SqlValue::Text(String::from("nextval('users_id_seq'::regclass)")),
        ];
        let column = dialect.column_from_catalog_row(&row).unwrap();
        assert_eq!(column.name, "id");
        assert_eq!(column.column_type.as_sql(), "serial");
        assert_eq!(column.column_type.category(), TypeCategory::Serial);
        assert!(column.primary_key);
        assert!(column.default.is_none());
    }

    #[test]
    fn test_catalog_row_keeps_plain_defaults() {
        let dialect = PostgresDialect::new();
        let row = vec![
            SqlValue::Text(String::from("active")),
            SqlValue::Text(String::from("boolean")),
            SqlValue::Bool(false),
            SqlValue::Bool(false),
            SqlValue::Text(String::from("YES")),
            SqlValue::Text(String::from("true")),
        ];
        let column = dialect.column_from_catalog_row(&row).unwrap();
        assert_eq!(column.column_type.category(), TypeCategory::Boolean);
        assert!(!column.not_null);
        assert!(column.default.is_some());
    }
}
