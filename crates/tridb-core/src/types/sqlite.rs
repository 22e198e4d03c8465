//! The closed SQLite type enumeration.

use super::{ColumnType, DialectKind, TypeCategory};

/// SQLite storage classes.
///
/// SQLite has no open type grammar worth exposing: declared types collapse
/// to five storage classes through type affinity, so the catalog is a
/// closed enumeration rather than a factory set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqliteType {
    /// `INTEGER` storage class.
    Integer,
    /// `TEXT` storage class.
    Text,
    /// `REAL` storage class.
    Real,
    /// `NULL` storage class.
    Null,
    /// `BLOB` storage class.
    Blob,
}

impl SqliteType {
    /// The SQL keyword for this storage class.
    #[must_use]
    pub const fn as_sql(self) -> &'static str {
        match self {
            Self::Integer => "INTEGER",
            Self::Text => "TEXT",
            Self::Real => "REAL",
            Self::Null => "NULL",
            Self::Blob => "BLOB",
        }
    }

    const fn category(self) -> TypeCategory {
        match self {
            Self::Integer => TypeCategory::Integer,
            Self::Text => TypeCategory::Text,
            Self::Real => TypeCategory::Float,
            Self::Null => TypeCategory::Null,
            Self::Blob => TypeCategory::Blob,
        }
    }

    /// Maps a declared type from `PRAGMA table_info` back to a storage
    /// class, using SQLite's affinity rules for declarations this crate
    /// did not generate (e.g. `VARCHAR(70)` in a pre-existing table).
    pub(crate) fn from_declared(declared: &str) -> Self {
        let upper = declared.trim().to_uppercase();
        match upper.as_str() {
            "INTEGER" => return Self::Integer,
            "TEXT" => return Self::Text,
            "REAL" => return Self::Real,
            "NULL" | "" => return Self::Null,
            "BLOB" => return Self::Blob,
            _ => {}
        }
        // https://www.sqlite.org/datatype3.html#determination_of_column_affinity
        if upper.contains("INT") {
            Self::Integer
        } else if upper.contains("CHAR") || upper.contains("CLOB") || upper.contains("TEXT") {
            Self::Text
        } else if upper.contains("BLOB") {
            Self::Blob
        } else {
            // REAL, FLOA, DOUB and the NUMERIC catch-all
            Self::Real
        }
    }
}

impl From<SqliteType> for ColumnType {
    fn from(ty: SqliteType) -> Self {
        Self::new(DialectKind::Sqlite, ty.category(), ty.as_sql())
    }
}
