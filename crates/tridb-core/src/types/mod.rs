//! Per-dialect column type catalogs.
//!
//! Each dialect exposes its own catalog and the tokens are not
//! interchangeable: a token records the dialect it was built for, and the
//! statement builders reject tokens from any other dialect instead of
//! translating them. SQLite is a closed five-type enumeration
//! ([`SqliteType`]); MySQL and PostgreSQL are open factory sets
//! ([`mysql`], [`postgres`]) whose parameterized factories validate their
//! arguments up front.

pub mod mysql;
pub mod postgres;
mod sqlite;

pub use sqlite::SqliteType;

/// The three supported dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialectKind {
    /// Embedded file-based SQLite.
    Sqlite,
    /// Client/server MySQL.
    MySql,
    /// Client/server PostgreSQL.
    Postgres,
}

impl std::fmt::Display for DialectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Sqlite => "sqlite",
            Self::MySql => "mysql",
            Self::Postgres => "postgres",
        };
        f.write_str(name)
    }
}

/// Coarse type family of a [`ColumnType`].
///
/// Categories drive PostgreSQL serial substitution and let reflected
/// columns compare against defined ones without parsing SQL type text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeCategory {
    SmallInt,
    Integer,
    BigInt,
    Serial,
    Float,
    Decimal,
    Char,
    Text,
    Binary,
    Blob,
    Bit,
    Boolean,
    Date,
    Time,
    DateTime,
    Enum,
    Set,
    Json,
    Uuid,
    Network,
    Range,
    Geometry,
    Array,
    Interval,
    Money,
    Null,
    /// Reflected type text the catalog could not classify.
    Other,
}

/// An opaque, dialect-specific SQL type token.
///
/// Produced by the per-dialect catalogs (or reconstructed from catalog
/// metadata during reflection); never by parsing caller strings.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnType {
    dialect: DialectKind,
    category: TypeCategory,
    sql: String,
}

impl ColumnType {
    pub(crate) fn new(
        dialect: DialectKind,
        category: TypeCategory,
        sql: impl Into<String>,
    ) -> Self {
        Self {
            dialect,
            category,
            sql: sql.into(),
        }
    }

    /// Dialect this token was built for.
    #[must_use]
    pub const fn dialect(&self) -> DialectKind {
        self.dialect
    }

    /// Coarse type family.
    #[must_use]
    pub const fn category(&self) -> TypeCategory {
        self.category
    }

    /// The SQL type text as it appears in DDL.
    #[must_use]
    pub fn as_sql(&self) -> &str {
        &self.sql
    }
}

impl serde::Serialize for ColumnType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.sql)
    }
}

/// Quotes enum/set member values, doubling embedded single quotes.
fn quote_members(values: &[&str]) -> String {
    values
        .iter()
        .map(|v| format!("'{}'", v.replace('\'', "''")))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dialect_kind_display() {
        assert_eq!(DialectKind::Sqlite.to_string(), "sqlite");
        assert_eq!(DialectKind::MySql.to_string(), "mysql");
        assert_eq!(DialectKind::Postgres.to_string(), "postgres");
    }

    #[test]
    fn test_column_type_serializes_as_sql_text() {
        let ty = ColumnType::new(DialectKind::MySql, TypeCategory::Text, "TEXT");
        assert_eq!(serde_json::to_string(&ty).unwrap(), "\"TEXT\"");
    }

    #[test]
    fn test_quote_members_escapes() {
        assert_eq!(quote_members(&["a", "b'c"]), "'a', 'b''c'");
    }
}
