//! SQLite facade over a file-backed database.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use sqlx::query::Query;
use sqlx::sqlite::{SqliteArguments, SqliteConnectOptions, SqliteConnection, SqliteRow};
use sqlx::{ConnectOptions, Connection, Row, Sqlite, TypeInfo, ValueRef};
use tracing::{debug, info};

use tridb_core::dialect::{Dialect, SqliteDialect};
use tridb_core::{Column, ColumnData, Filter, SqlValue, Table};

use crate::error::{Error, Result};

const DIALECT: SqliteDialect = SqliteDialect::new();

/// Manages one SQLite database stored as a file.
///
/// The database lives at `<directory>/<name>.db`; the directory and file
/// are created on first use. Every operation opens its own connection,
/// executes, and closes it, so a manager is cheap to clone and share.
///
/// ```no_run
/// use tridb::types::SqliteType;
/// use tridb::{Column, ColumnData, SqliteManager};
///
/// # async fn demo() -> tridb::Result<()> {
/// let manager = SqliteManager::new("app");
/// manager
///     .create_table("users", &[Column::new("name", SqliteType::Text).not_null()])
///     .await?;
/// manager
///     .insert("users", &[ColumnData::new("name", "Ana")])
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct SqliteManager {
    database: String,
    directory: PathBuf,
}

impl SqliteManager {
    /// Creates a manager storing its file under the default `database/`
    /// directory.
    pub fn new(database: impl Into<String>) -> Self {
        Self::with_path(database, "database")
    }

    /// Creates a manager storing its file under `directory`.
    pub fn with_path(database: impl Into<String>, directory: impl AsRef<Path>) -> Self {
        Self {
            database: database.into(),
            directory: directory.as_ref().to_path_buf(),
        }
    }

    /// The database name this manager was built with.
    #[must_use]
    pub fn database(&self) -> &str {
        &self.database
    }

    /// Full path of the backing file.
    #[must_use]
    pub fn database_path(&self) -> PathBuf {
        self.directory.join(format!("{}.db", self.database))
    }

    async fn connect(&self) -> Result<SqliteConnection> {
        tokio::fs::create_dir_all(&self.directory).await?;
        let options = SqliteConnectOptions::new()
            .filename(self.database_path())
            .create_if_missing(true);
        options.connect().await.map_err(Error::Connection)
    }

    async fn execute(&self, sql: &str, params: &[SqlValue]) -> Result<()> {
        debug!(sql = %sql, "execute");
        let mut conn = self.connect().await?;
        let mut query = sqlx::query(sql);
        for value in params {
            query = bind_value(query, value.clone());
        }
        query.execute(&mut conn).await.map_err(Error::Statement)?;
        conn.close().await.map_err(Error::Connection)
    }

    async fn fetch(&self, sql: &str, params: &[SqlValue]) -> Result<Vec<SqliteRow>> {
        debug!(sql = %sql, "fetch");
        let mut conn = self.connect().await?;
        let mut query = sqlx::query(sql);
        for value in params {
            query = bind_value(query, value.clone());
        }
        let rows = query.fetch_all(&mut conn).await.map_err(Error::Statement)?;
        conn.close().await.map_err(Error::Connection)?;
        Ok(rows)
    }

    /// Creates a table with an implicit auto-increment `id` column.
    ///
    /// # Errors
    ///
    /// Fails before connecting if a column cannot be rendered for SQLite.
    pub async fn create_table(&self, table: &str, columns: &[Column]) -> Result<()> {
        let descriptor = Table::with_columns(table, columns.to_vec());
        let sql = DIALECT.create_table_sql(&descriptor)?;
        self.execute(&sql, &[]).await
    }

    /// Inserts one row of column-value pairs.
    ///
    /// # Errors
    ///
    /// An empty `values` list fails before connecting.
    pub async fn insert(&self, table: &str, values: &[ColumnData]) -> Result<()> {
        let sql = DIALECT.insert_sql(table, values)?;
        let params: Vec<SqlValue> = values.iter().map(|pair| pair.value.clone()).collect();
        self.execute(&sql, &params).await
    }

    /// Selects rows; empty `columns` selects `*`, no filter selects all
    /// rows. An empty result is an empty vec.
    ///
    /// # Errors
    ///
    /// Fails when the statement is rejected, including malformed filter
    /// chains.
    pub async fn select(
        &self,
        table: &str,
        columns: &[&str],
        filter: Option<&Filter>,
    ) -> Result<Vec<Vec<SqlValue>>> {
        let sql = DIALECT.select_sql(table, columns, filter);
        let params = filter.map(Filter::params).unwrap_or_default();
        let rows = self.fetch(&sql, params).await?;
        Ok(rows.iter().map(row_values).collect())
    }

    /// Updates matching rows; without a filter every row is updated.
    ///
    /// # Errors
    ///
    /// An empty `values` list fails before connecting.
    pub async fn update(
        &self,
        table: &str,
        values: &[ColumnData],
        filter: Option<&Filter>,
    ) -> Result<()> {
        let sql = DIALECT.update_sql(table, values, filter)?;
        let mut params: Vec<SqlValue> = values.iter().map(|pair| pair.value.clone()).collect();
        if let Some(filter) = filter {
            params.extend_from_slice(filter.params());
        }
        self.execute(&sql, &params).await
    }

    /// Deletes matching rows; without a filter the table is emptied.
    ///
    /// # Errors
    ///
    /// Fails when the statement is rejected.
    pub async fn delete(&self, table: &str, filter: Option<&Filter>) -> Result<()> {
        let sql = DIALECT.delete_sql(table, filter);
        let params = filter.map(Filter::params).unwrap_or_default();
        self.execute(&sql, params).await
    }

    /// Adds a column to an existing table.
    ///
    /// # Errors
    ///
    /// Rendering failures surface before connecting; engine rejections
    /// propagate.
    pub async fn add_column(&self, table: &str, column: &Column) -> Result<()> {
        let sql = DIALECT.add_column_sql(table, column)?;
        self.execute(&sql, &[]).await
    }

    /// Drops a column from an existing table.
    ///
    /// # Errors
    ///
    /// Engine rejections propagate.
    pub async fn drop_column(&self, table: &str, column: &str) -> Result<()> {
        let sql = DIALECT.drop_column_sql(table, column);
        self.execute(&sql, &[]).await
    }

    /// Drops a table if it exists.
    ///
    /// # Errors
    ///
    /// Engine rejections propagate.
    pub async fn drop_table(&self, table: &str) -> Result<()> {
        let sql = DIALECT.drop_table_sql(table);
        self.execute(&sql, &[]).await
    }

    /// Removes the backing database file. Missing files are fine, so the
    /// call is idempotent.
    ///
    /// # Errors
    ///
    /// Filesystem failures other than a missing file propagate.
    pub async fn drop_database(&self) -> Result<()> {
        let path = self.database_path();
        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                info!(path = %path.display(), "database removed");
                Ok(())
            }
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(Error::Io(err)),
        }
    }

    /// Lists user table names, hiding SQLite's housekeeping tables.
    ///
    /// # Errors
    ///
    /// Fails when the database cannot be opened.
    pub async fn list_tables(&self) -> Result<Vec<String>> {
        let rows = self.fetch(&DIALECT.list_tables_sql(), &[]).await?;
        let mut names = Vec::with_capacity(rows.len());
        for row in &rows {
            let name: String = row.try_get(0).map_err(Error::Statement)?;
            if !DIALECT.is_internal_table(&name) {
                names.push(name);
            }
        }
        Ok(names)
    }

    /// Reflects one table's columns from `PRAGMA table_info`.
    ///
    /// # Errors
    ///
    /// Fails when the catalog rows cannot be decoded.
    pub async fn table(&self, name: &str) -> Result<Table> {
        let rows = self.fetch(&DIALECT.table_columns_sql(name), &[]).await?;
        let mut columns = Vec::with_capacity(rows.len());
        for row in &rows {
            columns.push(DIALECT.column_from_catalog_row(&row_values(row))?);
        }
        Ok(Table::with_columns(name, columns))
    }

    /// Reflects every user table.
    ///
    /// # Errors
    ///
    /// Fails when the database cannot be opened or a table cannot be
    /// decoded.
    pub async fn tables(&self) -> Result<Vec<Table>> {
        let names = self.list_tables().await?;
        let mut tables = Vec::with_capacity(names.len());
        for name in names {
            tables.push(self.table(&name).await?);
        }
        Ok(tables)
    }

    /// Runs arbitrary SQL and returns any fetched rows; non-returning
    /// statements yield an empty vec.
    ///
    /// # Errors
    ///
    /// Engine rejections propagate.
    pub async fn execute_raw(&self, sql: &str) -> Result<Vec<Vec<SqlValue>>> {
        let rows = self.fetch(sql, &[]).await?;
        Ok(rows.iter().map(row_values).collect())
    }
}

fn bind_value<'q>(
    query: Query<'q, Sqlite, SqliteArguments<'q>>,
    value: SqlValue,
) -> Query<'q, Sqlite, SqliteArguments<'q>> {
    match value {
        SqlValue::Null => query.bind(Option::<i64>::None),
        SqlValue::Bool(b) => query.bind(b),
        SqlValue::Int(i) => query.bind(i),
        SqlValue::Float(f) => query.bind(f),
        SqlValue::Text(s) => query.bind(s),
        SqlValue::Blob(b) => query.bind(b),
    }
}

fn row_values(row: &SqliteRow) -> Vec<SqlValue> {
    (0..row.len()).map(|index| decode_cell(row, index)).collect()
}

// SQLite types values, not columns, so the storage class of the cell
// itself drives decoding.
fn decode_cell(row: &SqliteRow, index: usize) -> SqlValue {
    let Ok(raw) = row.try_get_raw(index) else {
        return SqlValue::Null;
    };
    if raw.is_null() {
        return SqlValue::Null;
    }
    let type_name = raw.type_info().name().to_owned();
    match type_name.as_str() {
        "INTEGER" => row.try_get(index).map_or(SqlValue::Null, SqlValue::Int),
        "REAL" => row.try_get(index).map_or(SqlValue::Null, SqlValue::Float),
        "TEXT" => row.try_get(index).map_or(SqlValue::Null, SqlValue::Text),
        "BLOB" => row.try_get(index).map_or(SqlValue::Null, SqlValue::Blob),
        "BOOLEAN" => row.try_get(index).map_or(SqlValue::Null, SqlValue::Bool),
        _ => {
            if let Ok(value) = row.try_get::<String, _>(index) {
                SqlValue::Text(value)
            } else if let Ok(value) = row.try_get::<i64, _>(index) {
                SqlValue::Int(value)
            } else {
                SqlValue::Null
            }
        }
    }
}
