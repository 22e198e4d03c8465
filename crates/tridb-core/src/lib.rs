//! # tridb-core
//!
//! Cross-dialect schema, filter and statement builders for SQLite, MySQL
//! and PostgreSQL.
//!
//! This crate provides:
//! - Per-dialect type catalogs that validate their parameters up front
//! - Column and table descriptors with chained modifier setters
//! - A `WHERE`-clause builder whose placeholder count always matches its
//!   parameter list
//! - A [`Dialect`] trait that renders the same descriptors into each
//!   engine's SQL
//!
//! Statements come back as text plus bound parameters; executing them is
//! the driver layer's job, so this crate stays connection-free.
//!
//! ## Building Statements
//!
//! ```rust
//! use tridb_core::dialect::{Dialect, SqliteDialect};
//! use tridb_core::types::SqliteType;
//! use tridb_core::{Column, Filter, Table};
//!
//! let dialect = SqliteDialect::new();
//! let table = Table::with_columns(
//!     "users",
//!     vec![
//!         Column::new("name", SqliteType::Text).not_null(),
//!         Column::new("age", SqliteType::Integer),
//!     ],
//! );
//!
//! let sql = dialect.create_table_sql(&table)?;
//! assert!(sql.starts_with("CREATE TABLE IF NOT EXISTS users"));
//!
//! let filter = Filter::new("age").greater_than(18);
//! let sql = dialect.select_sql("users", &[], Some(&filter));
//! assert_eq!(sql, "SELECT * FROM users WHERE age > ?");
//! # Ok::<(), tridb_core::Error>(())
//! ```
//!
//! ## Dialect Differences
//!
//! The same descriptors render differently per engine:
//!
//! ```rust
//! use tridb_core::dialect::{Dialect, MySqlDialect, PostgresDialect};
//! use tridb_core::types::{mysql, postgres};
//! use tridb_core::Column;
//!
//! let column = Column::new("n", mysql::integer()).auto_increment();
//! let sql = MySqlDialect::new().column_sql(&column)?;
//! assert_eq!(sql, "n INTEGER AUTO_INCREMENT");
//!
//! let column = Column::new("n", postgres::integer()).auto_increment();
//! let sql = PostgresDialect::new().column_sql(&column)?;
//! assert_eq!(sql, "n serial");
//! # Ok::<(), tridb_core::Error>(())
//! ```

pub mod column;
pub mod dialect;
pub mod error;
pub mod filter;
pub mod hash;
pub mod table;
pub mod types;
pub mod value;

pub use column::{Column, DefaultValue, CURRENT_TIMESTAMP};
pub use dialect::Dialect;
pub use error::{Error, Result};
pub use filter::Filter;
pub use hash::encrypt_value;
pub use table::Table;
pub use types::{ColumnType, DialectKind, TypeCategory};
pub use value::{ColumnData, SqlValue, ToSqlValue};
