//! MySQL type factories.
//!
//! Open factory set: parameterized factories validate lengths and
//! precision before producing a token.

use crate::error::{Error, Result};

use super::{quote_members, ColumnType, DialectKind, TypeCategory};

fn token(category: TypeCategory, sql: impl Into<String>) -> ColumnType {
    ColumnType::new(DialectKind::MySql, category, sql)
}

fn positive(value: u32, type_name: &'static str, parameter: &'static str) -> Result<u32> {
    if value == 0 {
        return Err(Error::InvalidTypeParameter {
            type_name,
            parameter,
        });
    }
    Ok(value)
}

/// `TINYINT` column type.
#[must_use]
pub fn tinyint() -> ColumnType {
    token(TypeCategory::SmallInt, "TINYINT")
}

/// `SMALLINT` column type.
#[must_use]
pub fn smallint() -> ColumnType {
    token(TypeCategory::SmallInt, "SMALLINT")
}

/// `MEDIUMINT` column type.
#[must_use]
pub fn mediumint() -> ColumnType {
    token(TypeCategory::Integer, "MEDIUMINT")
}

/// `INTEGER` column type.
#[must_use]
pub fn integer() -> ColumnType {
    token(TypeCategory::Integer, "INTEGER")
}

/// `BIGINT` column type.
#[must_use]
pub fn bigint() -> ColumnType {
    token(TypeCategory::BigInt, "BIGINT")
}

/// `DECIMAL(precision, scale)` column type.
///
/// # Errors
///
/// Returns [`Error::InvalidTypeParameter`] if either parameter is zero.
pub fn decimal(precision: u32, scale: u32) -> Result<ColumnType> {
    let precision = positive(precision, "DECIMAL", "precision")?;
    let scale = positive(scale, "DECIMAL", "scale")?;
    Ok(token(
        TypeCategory::Decimal,
        format!("DECIMAL({precision}, {scale})"),
    ))
}

/// `FLOAT(precision, scale)` column type.
///
/// # Errors
///
/// Returns [`Error::InvalidTypeParameter`] if either parameter is zero.
pub fn float(precision: u32, scale: u32) -> Result<ColumnType> {
    let precision = positive(precision, "FLOAT", "precision")?;
    let scale = positive(scale, "FLOAT", "scale")?;
    Ok(token(
        TypeCategory::Float,
        format!("FLOAT({precision}, {scale})"),
    ))
}

/// `DOUBLE(precision, scale)` column type.
///
/// # Errors
///
/// Returns [`Error::InvalidTypeParameter`] if either parameter is zero.
pub fn double(precision: u32, scale: u32) -> Result<ColumnType> {
    let precision = positive(precision, "DOUBLE", "precision")?;
    let scale = positive(scale, "DOUBLE", "scale")?;
    Ok(token(
        TypeCategory::Float,
        format!("DOUBLE({precision}, {scale})"),
    ))
}

/// `CHAR(length)` column type.
///
/// # Errors
///
/// Returns [`Error::InvalidTypeParameter`] if `length` is zero.
pub fn char(length: u32) -> Result<ColumnType> {
    let length = positive(length, "CHAR", "length")?;
    Ok(token(TypeCategory::Char, format!("CHAR({length})")))
}

/// `VARCHAR(length)` column type.
///
/// # Errors
///
/// Returns [`Error::InvalidTypeParameter`] if `length` is zero.
pub fn varchar(length: u32) -> Result<ColumnType> {
    let length = positive(length, "VARCHAR", "length")?;
    Ok(token(TypeCategory::Char, format!("VARCHAR({length})")))
}

/// `BINARY(length)` column type.
///
/// # Errors
///
/// Returns [`Error::InvalidTypeParameter`] if `length` is zero.
pub fn binary(length: u32) -> Result<ColumnType> {
    let length = positive(length, "BINARY", "length")?;
    Ok(token(TypeCategory::Binary, format!("BINARY({length})")))
}

/// `VARBINARY(length)` column type.
///
/// # Errors
///
/// Returns [`Error::InvalidTypeParameter`] if `length` is zero.
pub fn varbinary(length: u32) -> Result<ColumnType> {
    let length = positive(length, "VARBINARY", "length")?;
    Ok(token(
        TypeCategory::Binary,
        format!("VARBINARY({length})"),
    ))
}

/// `TINYTEXT` column type.
#[must_use]
pub fn tinytext() -> ColumnType {
    token(TypeCategory::Text, "TINYTEXT")
}

/// `TEXT` column type.
#[must_use]
pub fn text() -> ColumnType {
    token(TypeCategory::Text, "TEXT")
}

/// `MEDIUMTEXT` column type.
#[must_use]
pub fn mediumtext() -> ColumnType {
    token(TypeCategory::Text, "MEDIUMTEXT")
}

/// `LONGTEXT` column type.
#[must_use]
pub fn longtext() -> ColumnType {
    token(TypeCategory::Text, "LONGTEXT")
}

/// `TINYBLOB` column type.
#[must_use]
pub fn tinyblob() -> ColumnType {
    token(TypeCategory::Blob, "TINYBLOB")
}

/// `BLOB` column type.
#[must_use]
pub fn blob() -> ColumnType {
    token(TypeCategory::Blob, "BLOB")
}

/// `MEDIUMBLOB` column type.
#[must_use]
pub fn mediumblob() -> ColumnType {
    token(TypeCategory::Blob, "MEDIUMBLOB")
}

/// `LONGBLOB` column type.
#[must_use]
pub fn longblob() -> ColumnType {
    token(TypeCategory::Blob, "LONGBLOB")
}

/// `DATE` column type.
#[must_use]
pub fn date() -> ColumnType {
    token(TypeCategory::Date, "DATE")
}

/// `DATETIME` column type.
#[must_use]
pub fn datetime() -> ColumnType {
    token(TypeCategory::DateTime, "DATETIME")
}

/// `TIME` column type.
#[must_use]
pub fn time() -> ColumnType {
    token(TypeCategory::Time, "TIME")
}

/// `TIMESTAMP` column type.
#[must_use]
pub fn timestamp() -> ColumnType {
    token(TypeCategory::DateTime, "TIMESTAMP")
}

/// `YEAR` column type.
#[must_use]
pub fn year() -> ColumnType {
    token(TypeCategory::Date, "YEAR")
}

/// `ENUM('a', 'b', ...)` column type with quoted member values.
///
/// # Errors
///
/// Returns [`Error::EmptyValueSet`] if `values` is empty.
pub fn enumeration(values: &[&str]) -> Result<ColumnType> {
    if values.is_empty() {
        return Err(Error::EmptyValueSet { type_name: "ENUM" });
    }
    Ok(token(
        TypeCategory::Enum,
        format!("ENUM({})", quote_members(values)),
    ))
}

/// `SET('a', 'b', ...)` column type with quoted member values.
///
/// # Errors
///
/// Returns [`Error::EmptyValueSet`] if `values` is empty.
pub fn set(values: &[&str]) -> Result<ColumnType> {
    if values.is_empty() {
        return Err(Error::EmptyValueSet { type_name: "SET" });
    }
    Ok(token(
        TypeCategory::Set,
        format!("SET({})", quote_members(values)),
    ))
}

/// Wraps a `SHOW COLUMNS` type text (e.g. `int unsigned`, `varchar(255)`)
/// back into a token.
pub(crate) fn reflected(declared: &str) -> ColumnType {
    token(infer_category(declared), declared)
}

fn infer_category(declared: &str) -> TypeCategory {
    let lower = declared.trim().to_lowercase();
    let matches = |prefix: &str| lower.starts_with(prefix);
    if matches("tinyint") || matches("smallint") {
        TypeCategory::SmallInt
    } else if matches("mediumint") || matches("int") {
        TypeCategory::Integer
    } else if matches("bigint") {
        TypeCategory::BigInt
    } else if matches("decimal") || matches("numeric") {
        TypeCategory::Decimal
    } else if matches("float") || matches("double") {
        TypeCategory::Float
    } else if matches("varchar") || matches("char") {
        TypeCategory::Char
    } else if matches("varbinary") || matches("binary") {
        TypeCategory::Binary
    } else if matches("tinyblob") || matches("mediumblob") || matches("longblob") || matches("blob")
    {
        TypeCategory::Blob
    } else if matches("tinytext") || matches("mediumtext") || matches("longtext") || matches("text")
    {
        TypeCategory::Text
    } else if matches("datetime") || matches("timestamp") {
        TypeCategory::DateTime
    } else if matches("date") || matches("year") {
        TypeCategory::Date
    } else if matches("time") {
        TypeCategory::Time
    } else if matches("enum") {
        TypeCategory::Enum
    } else if matches("set") {
        TypeCategory::Set
    } else if matches("json") {
        TypeCategory::Json
    } else if matches("bit") {
        TypeCategory::Bit
    } else if matches("bool") {
        TypeCategory::Boolean
    } else {
        TypeCategory::Other
    }
}
