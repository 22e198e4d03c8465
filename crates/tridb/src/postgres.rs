//! PostgreSQL facade over a server-hosted database.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use sqlx::postgres::{PgArguments, PgConnectOptions, PgConnection, PgRow};
use sqlx::query::Query;
use sqlx::{ConnectOptions, Connection, Postgres, Row, ValueRef};
use tracing::{debug, info, warn};

use tridb_core::dialect::{Dialect, PostgresDialect};
use tridb_core::{Column, ColumnData, Filter, SqlValue, Table};

use crate::error::{Error, Result};

const DIALECT: PostgresDialect = PostgresDialect::new();

/// Database used for create/drop statements that cannot run inside the
/// target database itself.
const MAINTENANCE_DATABASE: &str = "postgres";

/// Manages one PostgreSQL database reached over the network.
///
/// PostgreSQL has no `CREATE DATABASE IF NOT EXISTS`, so when a scoped
/// connection fails the manager checks `pg_database` from the `postgres`
/// maintenance database and creates the target if it is missing. Every
/// operation opens its own connection, executes, and closes it.
#[derive(Clone)]
pub struct PostgresManager {
    options: PgConnectOptions,
    database: String,
}

impl PostgresManager {
    /// Creates a manager for `database` on the given server, port 5432.
    pub fn new(
        database: impl Into<String>,
        host: &str,
        username: &str,
        password: &str,
    ) -> Self {
        Self {
            options: PgConnectOptions::new()
                .host(host)
                .username(username)
                .password(password),
            database: database.into(),
        }
    }

    /// Creates a manager from a `postgres://` connection URL; the URL's
    /// path names the target database.
    ///
    /// # Errors
    ///
    /// Fails when the URL cannot be parsed.
    pub fn from_url(url: &str) -> Result<Self> {
        let options: PgConnectOptions = url.parse().map_err(Error::Connection)?;
        let database = options
            .get_database()
            .unwrap_or(MAINTENANCE_DATABASE)
            .to_owned();
        Ok(Self { options, database })
    }

    /// Overrides the server port.
    #[must_use]
    pub fn port(mut self, port: u16) -> Self {
        self.options = self.options.port(port);
        self
    }

    /// The database name this manager was built with.
    #[must_use]
    pub fn database(&self) -> &str {
        &self.database
    }

    fn scoped_options(&self) -> PgConnectOptions {
        self.options.clone().database(&self.database)
    }

    fn maintenance_options(&self) -> PgConnectOptions {
        self.options.clone().database(MAINTENANCE_DATABASE)
    }

    // Scoped connect first; when that fails, create the database from the
    // maintenance connection and retry once.
    async fn connect(&self) -> Result<PgConnection> {
        let first = match self.scoped_options().connect().await {
            Ok(conn) => return Ok(conn),
            Err(err) => err,
        };
        warn!(database = %self.database, error = %first, "scoped connect failed, creating database");
        let mut maintenance = self
            .maintenance_options()
            .connect()
            .await
            .map_err(Error::Connection)?;
        let exists = sqlx::query("SELECT 1 FROM pg_database WHERE datname = $1")
            .bind(&self.database)
            .fetch_optional(&mut maintenance)
            .await
            .map_err(Error::Statement)?;
        if exists.is_none() {
            sqlx::query(&format!("CREATE DATABASE {}", self.database))
                .execute(&mut maintenance)
                .await
                .map_err(Error::Statement)?;
            info!(database = %self.database, "database created");
        }
        maintenance.close().await.map_err(Error::Connection)?;
        self.scoped_options()
            .connect()
            .await
            .map_err(Error::Connection)
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

    async fn fetch(&self, sql: &str, params: &[SqlValue]) -> Result<Vec<PgRow>> {
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

    /// Creates a table with an implicit `serial id` column.
    ///
    /// # Errors
    ///
    /// Fails before connecting if a column cannot be rendered for
    /// PostgreSQL.
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

    /// Drops the whole database from the maintenance connection.
    ///
    /// # Errors
    ///
    /// Fails when the server cannot be reached or rejects the drop.
    pub async fn drop_database(&self) -> Result<()> {
        let sql = format!("DROP DATABASE IF EXISTS {}", self.database);
        debug!(sql = %sql, "drop database");
        let mut maintenance = self
            .maintenance_options()
            .connect()
            .await
            .map_err(Error::Connection)?;
        sqlx::query(&sql)
            .execute(&mut maintenance)
            .await
            .map_err(Error::Statement)?;
        maintenance.close().await.map_err(Error::Connection)?;
        info!(database = %self.database, "database dropped");
        Ok(())
    }

    /// Lists user table names in the `public` schema.
    ///
    /// # Errors
    ///
    /// Fails when the database cannot be reached.
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

    /// Reflects one table's columns from `information_schema`.
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
    /// Fails when the database cannot be reached or a table cannot be
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

impl fmt::Debug for PostgresManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PostgresManager")
            .field("database", &self.database)
            .field("host", &self.options.get_host())
            .field("port", &self.options.get_port())
            .field("username", &self.options.get_username())
            .finish_non_exhaustive()
    }
}

fn bind_value(
    query: Query<'_, Postgres, PgArguments>,
    value: SqlValue,
) -> Query<'_, Postgres, PgArguments> {
    match value {
        SqlValue::Null => query.bind(Option::<i64>::None),
        SqlValue::Bool(b) => query.bind(b),
        SqlValue::Int(i) => query.bind(i),
        SqlValue::Float(f) => query.bind(f),
        SqlValue::Text(s) => query.bind(s),
        SqlValue::Blob(b) => query.bind(b),
    }
}

fn row_values(row: &PgRow) -> Vec<SqlValue> {
    (0..row.len()).map(|index| decode_cell(row, index)).collect()
}

// PostgreSQL decodes strictly by column type, so every integer width is
// tried; date and time cells come back as their textual form.
fn decode_cell(row: &PgRow, index: usize) -> SqlValue {
    let Ok(raw) = row.try_get_raw(index) else {
        return SqlValue::Null;
    };
    if raw.is_null() {
        return SqlValue::Null;
    }
    if let Ok(value) = row.try_get::<i64, _>(index) {
        return SqlValue::Int(value);
    }
    if let Ok(value) = row.try_get::<i32, _>(index) {
        return SqlValue::Int(i64::from(value));
    }
    if let Ok(value) = row.try_get::<i16, _>(index) {
        return SqlValue::Int(i64::from(value));
    }
    if let Ok(value) = row.try_get::<f64, _>(index) {
        return SqlValue::Float(value);
    }
    if let Ok(value) = row.try_get::<f32, _>(index) {
        return SqlValue::Float(f64::from(value));
    }
    if let Ok(value) = row.try_get::<bool, _>(index) {
        return SqlValue::Bool(value);
    }
    if let Ok(value) = row.try_get::<String, _>(index) {
        return SqlValue::Text(value);
    }
    if let Ok(value) = row.try_get::<NaiveDateTime, _>(index) {
        return SqlValue::Text(value.to_string());
    }
    if let Ok(value) = row.try_get::<DateTime<Utc>, _>(index) {
        return SqlValue::Text(value.to_rfc3339());
    }
    if let Ok(value) = row.try_get::<NaiveDate, _>(index) {
        return SqlValue::Text(value.to_string());
    }
    if let Ok(value) = row.try_get::<NaiveTime, _>(index) {
        return SqlValue::Text(value.to_string());
    }
    if let Ok(value) = row.try_get::<Vec<u8>, _>(index) {
        return SqlValue::Blob(value);
    }
    debug!(index, "cell type not decodable, returning null");
    SqlValue::Null
}
