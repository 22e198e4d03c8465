//! # tridb
//!
//! Uniform async database management over SQLite, MySQL and PostgreSQL.
//!
//! Each engine gets a manager with the same operations: create and drop
//! tables and databases, insert, select, update, delete, alter columns,
//! list and reflect tables, and run raw SQL. Statements are built by
//! [`tridb_core`] before any connection is opened, so builder mistakes
//! fail fast; execution goes through one short-lived sqlx connection per
//! call, and awaiting an operation is the point after which its effect is
//! visible.
//!
//! ```no_run
//! use tridb::types::SqliteType;
//! use tridb::{Column, ColumnData, Filter, SqliteManager};
//!
//! # async fn demo() -> tridb::Result<()> {
//! let manager = SqliteManager::new("app");
//!
//! manager
//!     .create_table(
//!         "users",
//!         &[
//!             Column::new("name", SqliteType::Text).not_null(),
//!             Column::new("age", SqliteType::Integer),
//!         ],
//!     )
//!     .await?;
//!
//! manager
//!     .insert(
//!         "users",
//!         &[ColumnData::new("name", "Ana"), ColumnData::new("age", 31)],
//!     )
//!     .await?;
//!
//! let adults = manager
//!     .select("users", &[], Some(&Filter::new("age").greater_or_equal(18)))
//!     .await?;
//! assert_eq!(adults.len(), 1);
//! # Ok(())
//! # }
//! ```
//!
//! The engines are feature-gated (`sqlite`, `mysql`, `postgres`); all
//! three are on by default.

mod error;
#[cfg(feature = "mysql")]
pub mod mysql;
#[cfg(feature = "postgres")]
pub mod postgres;
#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use error::{Error, Result};
#[cfg(feature = "mysql")]
pub use mysql::MySqlManager;
#[cfg(feature = "postgres")]
pub use postgres::PostgresManager;
#[cfg(feature = "sqlite")]
pub use sqlite::SqliteManager;

pub use tridb_core::types;
pub use tridb_core::{
    encrypt_value, Column, ColumnData, ColumnType, DefaultValue, DialectKind, Filter, SqlValue,
    Table, ToSqlValue, TypeCategory, CURRENT_TIMESTAMP,
};
