//! Builder-level error types.

use crate::types::DialectKind;

/// Errors raised while building types, columns or statements.
///
/// All of these are detected before any connection is opened; execution
/// failures are reported by the driver layer, not here.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A parameterized type factory was given a non-positive parameter.
    #[error("invalid type parameter: {type_name} requires a positive {parameter}")]
    InvalidTypeParameter {
        /// The type being constructed (e.g. `DECIMAL`).
        type_name: &'static str,
        /// The offending parameter (e.g. `precision`).
        parameter: &'static str,
    },

    /// An enum/set factory was given no member values.
    #[error("{type_name} requires at least one value")]
    EmptyValueSet {
        /// The type being constructed (`ENUM` or `SET`).
        type_name: &'static str,
    },

    /// A column type built for one dialect was used with another.
    #[error("column {column} holds a {found} type token, expected {expected}")]
    ColumnTypeMismatch {
        /// Name of the offending column.
        column: String,
        /// Dialect the statement is being built for.
        expected: DialectKind,
        /// Dialect the type token was built for.
        found: DialectKind,
    },

    /// An insert/update was given an empty column-value list.
    #[error("{operation} requires at least one column-value pair")]
    ColumnCountMismatch {
        /// The operation that received the empty list.
        operation: &'static str,
    },

    /// A column modifier is not expressible in the target dialect.
    #[error("{modifier} is not supported by the {dialect} dialect")]
    UnsupportedModifier {
        /// The rejected modifier keyword.
        modifier: &'static str,
        /// Dialect that rejected it.
        dialect: DialectKind,
    },

    /// A catalog row did not have the shape the dialect expects.
    #[error("unreadable catalog row: {0}")]
    CatalogRow(String),
}

/// Convenience result alias for builder operations.
pub type Result<T> = std::result::Result<T, Error>;
