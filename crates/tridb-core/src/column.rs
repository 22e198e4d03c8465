//! Column descriptors.

use serde::Serialize;

use crate::types::ColumnType;
use crate::value::{SqlValue, ToSqlValue};

/// SQL expression usable as a default or MySQL `ON UPDATE` action.
pub const CURRENT_TIMESTAMP: &str = "CURRENT_TIMESTAMP";

/// Default value for a column.
#[derive(Debug, Clone, PartialEq)]
pub enum DefaultValue {
    /// A literal value, quoted and escaped when rendered.
    Literal(SqlValue),
    /// A raw SQL expression (e.g. `CURRENT_TIMESTAMP`).
    Expression(String),
}

impl DefaultValue {
    /// Returns the SQL text for a `DEFAULT` clause.
    #[must_use]
    pub fn to_sql(&self) -> String {
        match self {
            Self::Literal(value) => value.to_sql_inline(),
            Self::Expression(expr) => expr.clone(),
        }
    }
}

impl Serialize for DefaultValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_sql())
    }
}

/// One column of a table: a type token plus modifier flags.
///
/// Built by the caller through the chained setters, or reconstructed from
/// catalog metadata during reflection. The DDL fragment itself is rendered
/// by a [`Dialect`](crate::dialect::Dialect), which also rejects tokens
/// from the wrong catalog and modifiers the dialect cannot express.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    /// Column name, interpolated into DDL as-is.
    pub name: String,
    /// The dialect-specific type token.
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    /// `PRIMARY KEY`.
    pub primary_key: bool,
    /// Auto-increment; emission is dialect-specific (keyword or serial
    /// type substitution).
    pub auto_increment: bool,
    /// `UNIQUE`.
    pub unique: bool,
    /// `NOT NULL`.
    pub not_null: bool,
    /// `DEFAULT` clause.
    pub default: Option<DefaultValue>,
    /// `UNSIGNED` (MySQL only).
    pub unsigned: bool,
    /// `ON UPDATE` expression (MySQL only).
    pub on_update: Option<String>,
}

impl Column {
    /// Creates a column with a name and type token and no modifiers.
    #[must_use]
    pub fn new(name: impl Into<String>, column_type: impl Into<ColumnType>) -> Self {
        Self {
            name: name.into(),
            column_type: column_type.into(),
            primary_key: false,
            auto_increment: false,
            unique: false,
            not_null: false,
            default: None,
            unsigned: false,
            on_update: None,
        }
    }

    /// Marks the column as `PRIMARY KEY`.
    #[must_use]
    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    /// Marks the column as auto-incrementing.
    #[must_use]
    pub fn auto_increment(mut self) -> Self {
        self.auto_increment = true;
        self
    }

    /// Marks the column as `UNIQUE`.
    #[must_use]
    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    /// Marks the column as `NOT NULL`.
    #[must_use]
    pub fn not_null(mut self) -> Self {
        self.not_null = true;
        self
    }

    /// Marks the column as `UNSIGNED` (MySQL only; other dialects reject
    /// it at render time).
    #[must_use]
    pub fn unsigned(mut self) -> Self {
        self.unsigned = true;
        self
    }

    /// Sets a literal default value, quoted when rendered.
    #[must_use]
    pub fn default_value(mut self, value: impl ToSqlValue) -> Self {
        self.default = Some(DefaultValue::Literal(value.to_sql_value()));
        self
    }

    /// Sets a raw SQL expression as default (e.g. [`CURRENT_TIMESTAMP`]).
    #[must_use]
    pub fn default_expr(mut self, expr: impl Into<String>) -> Self {
        self.default = Some(DefaultValue::Expression(expr.into()));
        self
    }

    /// Sets a MySQL `ON UPDATE` expression (other dialects reject it at
    /// render time).
    #[must_use]
    pub fn on_update(mut self, expr: impl Into<String>) -> Self {
        self.on_update = Some(expr.into());
        self
    }

    /// Pretty-printed JSON description of the column.
    ///
    /// # Errors
    ///
    /// Returns a [`serde_json::Error`] if serialization fails.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
