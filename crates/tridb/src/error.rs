//! Facade-level error types.

/// Errors returned by the database facades.
///
/// Builder failures surface before any connection is opened; the two
/// driver variants split "could not reach the store" from "the engine
/// rejected the statement", which is also where a malformed filter chain
/// ends up.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The backing store could not be reached or opened.
    #[error("connection failed: {0}")]
    Connection(#[source] sqlx::Error),

    /// The backing engine rejected a statement.
    #[error("statement failed: {0}")]
    Statement(#[source] sqlx::Error),

    /// A statement could not be built for this dialect.
    #[error(transparent)]
    Builder(#[from] tridb_core::Error),

    /// Database file handling failed (SQLite only).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result alias for facade operations.
pub type Result<T> = std::result::Result<T, Error>;
