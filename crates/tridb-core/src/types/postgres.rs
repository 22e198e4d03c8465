//! PostgreSQL type factories.
//!
//! Open factory set covering the core SQL types plus the PostgreSQL
//! extensions (json, uuid, network addresses, ranges, geometry, arrays).
//! Tokens are lowercase, the conventional PostgreSQL spelling.

use crate::error::{Error, Result};

use super::{ColumnType, DialectKind, TypeCategory};

fn token(category: TypeCategory, sql: impl Into<String>) -> ColumnType {
    ColumnType::new(DialectKind::Postgres, category, sql)
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

/// `smallint` column type.
#[must_use]
pub fn smallint() -> ColumnType {
    token(TypeCategory::SmallInt, "smallint")
}

/// `integer` column type.
#[must_use]
pub fn integer() -> ColumnType {
    token(TypeCategory::Integer, "integer")
}

/// `bigint` column type.
#[must_use]
pub fn bigint() -> ColumnType {
    token(TypeCategory::BigInt, "bigint")
}

/// `serial` auto-incrementing integer type.
#[must_use]
pub fn serial() -> ColumnType {
    token(TypeCategory::Serial, "serial")
}

/// `bigserial` auto-incrementing bigint type.
#[must_use]
pub fn bigserial() -> ColumnType {
    token(TypeCategory::Serial, "bigserial")
}

/// `real` column type.
#[must_use]
pub fn real() -> ColumnType {
    token(TypeCategory::Float, "real")
}

/// `double precision` column type.
#[must_use]
pub fn double_precision() -> ColumnType {
    token(TypeCategory::Float, "double precision")
}

/// `decimal(precision, scale)` column type.
///
/// # Errors
///
/// Returns [`Error::InvalidTypeParameter`] if either parameter is zero.
pub fn decimal(precision: u32, scale: u32) -> Result<ColumnType> {
    let precision = positive(precision, "decimal", "precision")?;
    let scale = positive(scale, "decimal", "scale")?;
    Ok(token(
        TypeCategory::Decimal,
        format!("decimal({precision}, {scale})"),
    ))
}

/// `numeric(precision, scale)` column type.
///
/// # Errors
///
/// Returns [`Error::InvalidTypeParameter`] if either parameter is zero.
pub fn numeric(precision: u32, scale: u32) -> Result<ColumnType> {
    let precision = positive(precision, "numeric", "precision")?;
    let scale = positive(scale, "numeric", "scale")?;
    Ok(token(
        TypeCategory::Decimal,
        format!("numeric({precision}, {scale})"),
    ))
}

/// `char(length)` column type.
///
/// # Errors
///
/// Returns [`Error::InvalidTypeParameter`] if `length` is zero.
pub fn char(length: u32) -> Result<ColumnType> {
    let length = positive(length, "char", "length")?;
    Ok(token(TypeCategory::Char, format!("char({length})")))
}

/// `varchar(length)` column type.
///
/// # Errors
///
/// Returns [`Error::InvalidTypeParameter`] if `length` is zero.
pub fn varchar(length: u32) -> Result<ColumnType> {
    let length = positive(length, "varchar", "length")?;
    Ok(token(TypeCategory::Char, format!("varchar({length})")))
}

/// `bit(length)` column type.
///
/// # Errors
///
/// Returns [`Error::InvalidTypeParameter`] if `length` is zero.
pub fn bit(length: u32) -> Result<ColumnType> {
    let length = positive(length, "bit", "length")?;
    Ok(token(TypeCategory::Bit, format!("bit({length})")))
}

/// `bit varying(length)` column type.
///
/// # Errors
///
/// Returns [`Error::InvalidTypeParameter`] if `length` is zero.
pub fn bit_varying(length: u32) -> Result<ColumnType> {
    let length = positive(length, "bit varying", "length")?;
    Ok(token(TypeCategory::Bit, format!("bit varying({length})")))
}

/// `text` column type.
#[must_use]
pub fn text() -> ColumnType {
    token(TypeCategory::Text, "text")
}

/// `boolean` column type.
#[must_use]
pub fn boolean() -> ColumnType {
    token(TypeCategory::Boolean, "boolean")
}

/// `date` column type.
#[must_use]
pub fn date() -> ColumnType {
    token(TypeCategory::Date, "date")
}

/// `time` column type.
#[must_use]
pub fn time() -> ColumnType {
    token(TypeCategory::Time, "time")
}

/// `timestamp` column type.
#[must_use]
pub fn timestamp() -> ColumnType {
    token(TypeCategory::DateTime, "timestamp")
}

/// `timestamp with time zone` column type.
#[must_use]
pub fn timestamp_with_time_zone() -> ColumnType {
    token(TypeCategory::DateTime, "timestamp with time zone")
}

/// `interval` column type.
#[must_use]
pub fn interval() -> ColumnType {
    token(TypeCategory::Interval, "interval")
}

/// `json` column type.
#[must_use]
pub fn json() -> ColumnType {
    token(TypeCategory::Json, "json")
}

/// `jsonb` column type.
#[must_use]
pub fn jsonb() -> ColumnType {
    token(TypeCategory::Json, "jsonb")
}

/// `uuid` column type.
#[must_use]
pub fn uuid() -> ColumnType {
    token(TypeCategory::Uuid, "uuid")
}

/// `inet` network address type.
#[must_use]
pub fn inet() -> ColumnType {
    token(TypeCategory::Network, "inet")
}

/// `macaddr` network address type.
#[must_use]
pub fn macaddr() -> ColumnType {
    token(TypeCategory::Network, "macaddr")
}

/// `int4range` range type.
#[must_use]
pub fn int4range() -> ColumnType {
    token(TypeCategory::Range, "int4range")
}

/// `daterange` range type.
#[must_use]
pub fn daterange() -> ColumnType {
    token(TypeCategory::Range, "daterange")
}

/// `point` geometric type.
#[must_use]
pub fn point() -> ColumnType {
    token(TypeCategory::Geometry, "point")
}

/// `line` geometric type.
#[must_use]
pub fn line() -> ColumnType {
    token(TypeCategory::Geometry, "line")
}

/// `circle` geometric type.
#[must_use]
pub fn circle() -> ColumnType {
    token(TypeCategory::Geometry, "circle")
}

/// `integer[]` array type.
#[must_use]
pub fn integer_array() -> ColumnType {
    token(TypeCategory::Array, "integer[]")
}

/// `text[]` array type.
#[must_use]
pub fn text_array() -> ColumnType {
    token(TypeCategory::Array, "text[]")
}

/// `money` column type.
#[must_use]
pub fn money() -> ColumnType {
    token(TypeCategory::Money, "money")
}

/// Rebuilds a token from an `information_schema` `data_type` string.
///
/// Serial columns are reported by the catalog as plain integer types with
/// a `nextval(...)` default, so the caller passes `serial` separately.
pub(crate) fn reflected(data_type: &str, serial: bool) -> ColumnType {
    if serial {
        let sql = match data_type {
            "smallint" => "smallserial",
            "bigint" => "bigserial",
            _ => "serial",
        };
        return token(TypeCategory::Serial, sql);
    }
    token(infer_category(data_type), data_type)
}

fn infer_category(data_type: &str) -> TypeCategory {
    match data_type.trim().to_lowercase().as_str() {
        "smallint" => TypeCategory::SmallInt,
        "integer" => TypeCategory::Integer,
        "bigint" => TypeCategory::BigInt,
        "real" | "double precision" => TypeCategory::Float,
        "numeric" | "decimal" => TypeCategory::Decimal,
        "character" | "character varying" => TypeCategory::Char,
        "text" => TypeCategory::Text,
        "bytea" => TypeCategory::Binary,
        "boolean" => TypeCategory::Boolean,
        "date" => TypeCategory::Date,
        "time without time zone" | "time with time zone" => TypeCategory::Time,
        "timestamp without time zone" | "timestamp with time zone" => TypeCategory::DateTime,
        "interval" => TypeCategory::Interval,
        "json" | "jsonb" => TypeCategory::Json,
        "uuid" => TypeCategory::Uuid,
        "inet" | "macaddr" | "cidr" => TypeCategory::Network,
        "int4range" | "int8range" | "daterange" | "tsrange" | "tstzrange" => TypeCategory::Range,
        "point" | "line" | "circle" | "polygon" | "box" | "path" => TypeCategory::Geometry,
        "array" => TypeCategory::Array,
        "money" => TypeCategory::Money,
        s if s.starts_with("bit") => TypeCategory::Bit,
        _ => TypeCategory::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_tokens() {
        assert_eq!(integer().as_sql(), "integer");
        assert_eq!(serial().as_sql(), "serial");
        assert_eq!(double_precision().as_sql(), "double precision");
        assert_eq!(jsonb().as_sql(), "jsonb");
        assert_eq!(text_array().as_sql(), "text[]");
        assert_eq!(integer().dialect(), DialectKind::Postgres);
    }

    #[test]
    fn test_parameterized_tokens() {
        assert_eq!(numeric(12, 4).unwrap().as_sql(), "numeric(12, 4)");
        assert_eq!(varchar(80).unwrap().as_sql(), "varchar(80)");
        assert_eq!(bit_varying(8).unwrap().as_sql(), "bit varying(8)");
    }

    #[test]
    fn test_zero_parameters_rejected() {
        assert!(matches!(
            char(0),
            Err(Error::InvalidTypeParameter {
                type_name: "char",
                parameter: "length",
            })
        ));
        assert!(matches!(
            numeric(5, 0),
            Err(Error::InvalidTypeParameter {
                type_name: "numeric",
                parameter: "scale",
            })
        ));
    }

    #[test]
    fn test_reflected_serial_substitution() {
        assert_eq!(reflected("integer", true).as_sql(), "serial");
        assert_eq!(reflected("bigint", true).as_sql(), "bigserial");
        assert_eq!(reflected("smallint", true).as_sql(), "smallserial");
        assert_eq!(reflected("integer", true).category(), TypeCategory::Serial);
    }

    #[test]
    fn test_reflected_category_inference() {
        assert_eq!(
            reflected("character varying", false).category(),
            TypeCategory::Char
        );
        assert_eq!(
            reflected("timestamp without time zone", false).category(),
            TypeCategory::DateTime
        );
        assert_eq!(reflected("uuid", false).category(), TypeCategory::Uuid);
        assert_eq!(reflected("xml", false).category(), TypeCategory::Other);
    }
}
