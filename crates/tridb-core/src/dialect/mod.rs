//! Dialect-specific SQL generation.
//!
//! Different databases bind parameters, auto-increment keys and expose
//! their catalogs differently. This module defines the [`Dialect`] trait
//! with default statement assembly and one implementation per supported
//! engine.

mod mysql;
mod postgres;
mod sqlite;

pub use mysql::MySqlDialect;
pub use postgres::PostgresDialect;
pub use sqlite::SqliteDialect;

use crate::column::Column;
use crate::error::{Error, Result};
use crate::filter::Filter;
use crate::table::Table;
use crate::types::DialectKind;
use crate::value::{ColumnData, SqlValue};

/// How a dialect spells bind-parameter placeholders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderStyle {
    /// Positional `?` placeholders (SQLite, MySQL).
    Question,
    /// Numbered `$1`, `$2`, ... placeholders (PostgreSQL).
    Numbered,
}

impl PlaceholderStyle {
    /// Renders the placeholder for the given 1-based parameter index.
    #[must_use]
    pub fn placeholder(self, index: usize) -> String {
        match self {
            Self::Question => String::from("?"),
            Self::Numbered => format!("${index}"),
        }
    }
}

/// How a dialect makes a key column auto-increment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoIncrement {
    /// A keyword appended to the column definition.
    Keyword(&'static str),
    /// No keyword; the type token itself is swapped for a serial type.
    Serial,
}

/// Trait for dialect-specific statement generation and catalog access.
///
/// The default methods assemble statements out of the small seams each
/// dialect provides (placeholder style, auto-increment strategy, catalog
/// queries), so an implementation only overrides where its SQL genuinely
/// differs.
pub trait Dialect {
    /// Returns the dialect name.
    fn name(&self) -> &'static str;

    /// The catalog this dialect accepts type tokens from.
    fn kind(&self) -> DialectKind;

    /// How this dialect spells bind parameters.
    fn placeholder_style(&self) -> PlaceholderStyle;

    /// How this dialect auto-increments key columns.
    fn auto_increment(&self) -> AutoIncrement;

    /// The implicit `id` column prepended to every created table.
    fn id_column(&self) -> Column;

    /// Whether `UNSIGNED` is expressible.
    fn supports_unsigned(&self) -> bool {
        false
    }

    /// Whether an `ON UPDATE` column clause is expressible.
    fn supports_on_update(&self) -> bool {
        false
    }

    /// Renders the type token for a column definition.
    ///
    /// # Errors
    ///
    /// Dialects that fold auto-increment into the type (serial columns)
    /// return [`Error::UnsupportedModifier`] for categories they cannot
    /// substitute.
    fn type_sql(&self, column: &Column) -> Result<String> {
        Ok(column.column_type.as_sql().to_owned())
    }

    /// Renders one column definition fragment.
    ///
    /// Modifiers appear in a fixed order: `PRIMARY KEY`, auto-increment,
    /// `UNIQUE`, `NOT NULL`, `UNSIGNED`, `DEFAULT`, `ON UPDATE`. Flags are
    /// booleans on [`Column`], so no modifier can appear twice.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ColumnTypeMismatch`] when the column's type token
    /// was built for another dialect, and [`Error::UnsupportedModifier`]
    /// for modifiers this dialect cannot express.
    fn column_sql(&self, column: &Column) -> Result<String> {
        if column.column_type.dialect() != self.kind() {
            return Err(Error::ColumnTypeMismatch {
                column: column.name.clone(),
                expected: self.kind(),
                found: column.column_type.dialect(),
            });
        }
        if column.unsigned && !self.supports_unsigned() {
            return Err(Error::UnsupportedModifier {
                modifier: "UNSIGNED",
                dialect: self.kind(),
            });
        }
        if column.on_update.is_some() && !self.supports_on_update() {
            return Err(Error::UnsupportedModifier {
                modifier: "ON UPDATE",
                dialect: self.kind(),
            });
        }

        let mut sql = format!("{} {}", column.name, self.type_sql(column)?);
        if column.primary_key {
            sql.push_str(" PRIMARY KEY");
        }
        if column.auto_increment {
            // The serial strategy already swapped the type token.
            if let AutoIncrement::Keyword(keyword) = self.auto_increment() {
                sql.push(' ');
                sql.push_str(keyword);
            }
        }
        if column.unique {
            sql.push_str(" UNIQUE");
        }
        if column.not_null {
            sql.push_str(" NOT NULL");
        }
        if column.unsigned {
            sql.push_str(" UNSIGNED");
        }
        if let Some(ref default) = column.default {
            sql.push_str(" DEFAULT ");
            sql.push_str(&default.to_sql());
        }
        if let Some(ref expr) = column.on_update {
            sql.push_str(" ON UPDATE ");
            sql.push_str(expr);
        }
        Ok(sql)
    }

    /// Generates `CREATE TABLE IF NOT EXISTS` with the implicit `id`
    /// column prepended.
    ///
    /// # Errors
    ///
    /// Propagates column rendering failures.
    fn create_table_sql(&self, table: &Table) -> Result<String> {
        let mut defs = Vec::with_capacity(table.columns.len() + 1);
        defs.push(self.column_sql(&self.id_column())?);
        for column in &table.columns {
            defs.push(self.column_sql(column)?);
        }
        Ok(format!(
            "CREATE TABLE IF NOT EXISTS {} ({})",
            table.name,
            defs.join(", ")
        ))
    }

    /// Generates a parameterized `INSERT` statement.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ColumnCountMismatch`] when `values` is empty.
    fn insert_sql(&self, table: &str, values: &[ColumnData]) -> Result<String> {
        if values.is_empty() {
            return Err(Error::ColumnCountMismatch {
                operation: "insert",
            });
        }
        let style = self.placeholder_style();
        let columns: Vec<&str> = values.iter().map(|pair| pair.column.as_str()).collect();
        let placeholders: Vec<String> = (1..=values.len())
            .map(|index| style.placeholder(index))
            .collect();
        Ok(format!(
            "INSERT INTO {table} ({}) VALUES ({})",
            columns.join(", "),
            placeholders.join(", ")
        ))
    }

    /// Generates a `SELECT` statement; an empty column list selects `*`.
    fn select_sql(&self, table: &str, columns: &[&str], filter: Option<&Filter>) -> String {
        let projection = if columns.is_empty() {
            String::from("*")
        } else {
            columns.join(", ")
        };
        let mut sql = format!("SELECT {projection} FROM {table}");
        if let Some(filter) = filter {
            sql.push(' ');
            sql.push_str(&filter.condition(self.placeholder_style(), 1));
        }
        sql
    }

    /// Generates a parameterized `UPDATE` statement.
    ///
    /// Filter placeholders continue numbering after the `SET` parameters,
    /// so the bind order is: values first, then filter params.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ColumnCountMismatch`] when `values` is empty.
    fn update_sql(
        &self,
        table: &str,
        values: &[ColumnData],
        filter: Option<&Filter>,
    ) -> Result<String> {
        if values.is_empty() {
            return Err(Error::ColumnCountMismatch {
                operation: "update",
            });
        }
        let style = self.placeholder_style();
        let assignments: Vec<String> = values
            .iter()
            .enumerate()
            .map(|(index, pair)| format!("{} = {}", pair.column, style.placeholder(index + 1)))
            .collect();
        let mut sql = format!("UPDATE {table} SET {}", assignments.join(", "));
        if let Some(filter) = filter {
            sql.push(' ');
            sql.push_str(&filter.condition(style, values.len() + 1));
        }
        Ok(sql)
    }

    /// Generates a `DELETE` statement; without a filter it empties the
    /// table.
    fn delete_sql(&self, table: &str, filter: Option<&Filter>) -> String {
        let mut sql = format!("DELETE FROM {table}");
        if let Some(filter) = filter {
            sql.push(' ');
            sql.push_str(&filter.condition(self.placeholder_style(), 1));
        }
        sql
    }

    /// Generates `ALTER TABLE ... ADD COLUMN`.
    ///
    /// # Errors
    ///
    /// Propagates column rendering failures.
    fn add_column_sql(&self, table: &str, column: &Column) -> Result<String> {
        Ok(format!(
            "ALTER TABLE {table} ADD COLUMN {}",
            self.column_sql(column)?
        ))
    }

    /// Generates `ALTER TABLE ... DROP COLUMN`.
    fn drop_column_sql(&self, table: &str, column: &str) -> String {
        format!("ALTER TABLE {table} DROP COLUMN {column}")
    }

    /// Generates `DROP TABLE IF EXISTS`.
    fn drop_table_sql(&self, table: &str) -> String {
        format!("DROP TABLE IF EXISTS {table}")
    }

    /// The query listing user table names, one text cell per row.
    fn list_tables_sql(&self) -> String;

    /// The query describing a table's columns.
    fn table_columns_sql(&self, table: &str) -> String;

    /// Whether a catalog-reported table is engine bookkeeping that
    /// should be hidden from listings.
    fn is_internal_table(&self, _name: &str) -> bool {
        false
    }

    /// Rebuilds a [`Column`] from one row of [`Dialect::table_columns_sql`]
    /// output.
    ///
    /// # Errors
    ///
    /// Returns [`Error::CatalogRow`] when the row does not have the shape
    /// this dialect's catalog produces.
    fn column_from_catalog_row(&self, row: &[SqlValue]) -> Result<Column>;
}

pub(crate) fn text_cell(row: &[SqlValue], index: usize, field: &str) -> Result<String> {
    match row.get(index) {
        Some(SqlValue::Text(text)) => Ok(text.clone()),
        other => Err(Error::CatalogRow(format!(
            "expected text in {field}, got {other:?}"
        ))),
    }
}

pub(crate) fn opt_text_cell(row: &[SqlValue], index: usize, field: &str) -> Result<Option<String>> {
    match row.get(index) {
        Some(SqlValue::Null) | None => Ok(None),
        Some(SqlValue::Text(text)) => Ok(Some(text.clone())),
        other => Err(Error::CatalogRow(format!(
            "expected text or null in {field}, got {other:?}"
        ))),
    }
}

pub(crate) fn int_cell(row: &[SqlValue], index: usize, field: &str) -> Result<i64> {
    match row.get(index) {
        Some(SqlValue::Int(value)) => Ok(*value),
        other => Err(Error::CatalogRow(format!(
            "expected integer in {field}, got {other:?}"
        ))),
    }
}

pub(crate) fn bool_cell(row: &[SqlValue], index: usize, field: &str) -> Result<bool> {
    match row.get(index) {
        Some(SqlValue::Bool(value)) => Ok(*value),
        Some(SqlValue::Int(value)) => Ok(*value != 0),
        other => Err(Error::CatalogRow(format!(
            "expected boolean in {field}, got {other:?}"
        ))),
    }
}
