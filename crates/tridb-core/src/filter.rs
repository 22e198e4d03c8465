//! WHERE-clause builder.

use crate::dialect::PlaceholderStyle;
use crate::value::{SqlValue, ToSqlValue};

#[derive(Debug, Clone)]
enum FilterPart {
    Column(String),
    Connector(&'static str),
    /// A comparison operator followed by exactly one placeholder.
    Comparison(&'static str),
}

/// Incrementally composes a `WHERE` clause.
///
/// Starts from a column name and chains comparisons and `AND`/`OR`
/// connectors; every comparison appends exactly one placeholder to the
/// condition and one value to the parameter list, so the two stay equal in
/// length at every step. The builder does not validate chain ordering;
/// a malformed chain (say, two comparisons with no connector) surfaces
/// when the engine rejects the statement.
///
/// Placeholders are rendered on read through [`Filter::condition`], which
/// takes the dialect's [`PlaceholderStyle`] and the 1-based index of the
/// first placeholder (so UPDATE can keep numbering after its SET params).
///
/// ```
/// use tridb_core::dialect::PlaceholderStyle;
/// use tridb_core::Filter;
///
/// let filter = Filter::new("age").greater_than(18).and("name").contain("Al");
/// assert_eq!(
///     filter.condition(PlaceholderStyle::Question, 1),
///     "WHERE age > ? AND name LIKE ?"
/// );
/// assert_eq!(filter.params().len(), 2);
/// ```
#[derive(Debug, Clone)]
#[must_use]
pub struct Filter {
    parts: Vec<FilterPart>,
    params: Vec<SqlValue>,
}

impl Filter {
    /// Starts a filter on a column.
    pub fn new(column: impl Into<String>) -> Self {
        Self {
            parts: vec![FilterPart::Column(column.into())],
            params: Vec::new(),
        }
    }

    fn comparison(mut self, op: &'static str, value: SqlValue) -> Self {
        self.parts.push(FilterPart::Comparison(op));
        self.params.push(value);
        self
    }

    /// Appends `= <placeholder>`.
    pub fn equal(self, value: impl ToSqlValue) -> Self {
        self.comparison("=", value.to_sql_value())
    }

    /// Appends `!= <placeholder>`.
    pub fn not_equal(self, value: impl ToSqlValue) -> Self {
        self.comparison("!=", value.to_sql_value())
    }

    /// Appends `> <placeholder>`.
    pub fn greater_than(self, value: impl ToSqlValue) -> Self {
        self.comparison(">", value.to_sql_value())
    }

    /// Appends `>= <placeholder>`.
    pub fn greater_or_equal(self, value: impl ToSqlValue) -> Self {
        self.comparison(">=", value.to_sql_value())
    }

    /// Appends `< <placeholder>`.
    pub fn less_than(self, value: impl ToSqlValue) -> Self {
        self.comparison("<", value.to_sql_value())
    }

    /// Appends `<= <placeholder>`.
    pub fn less_or_equal(self, value: impl ToSqlValue) -> Self {
        self.comparison("<=", value.to_sql_value())
    }

    /// Appends `LIKE <placeholder>` with the value wrapped in `%...%`.
    ///
    /// The wildcard pattern is stored as a bound parameter, never inlined
    /// into the condition text.
    pub fn contain(self, value: impl ToSqlValue) -> Self {
        let pattern = wildcard(value.to_sql_value());
        self.comparison("LIKE", pattern)
    }

    /// Appends `NOT LIKE <placeholder>` with the value wrapped in `%...%`.
    pub fn not_contain(self, value: impl ToSqlValue) -> Self {
        let pattern = wildcard(value.to_sql_value());
        self.comparison("NOT LIKE", pattern)
    }

    /// Appends `AND` and the next column reference.
    pub fn and(mut self, column: impl Into<String>) -> Self {
        self.parts.push(FilterPart::Connector("AND"));
        self.parts.push(FilterPart::Column(column.into()));
        self
    }

    /// Appends `OR` and the next column reference.
    pub fn or(mut self, column: impl Into<String>) -> Self {
        self.parts.push(FilterPart::Connector("OR"));
        self.parts.push(FilterPart::Column(column.into()));
        self
    }

    /// Renders the `WHERE ...` condition text.
    ///
    /// `start` is the 1-based index assigned to the first placeholder;
    /// only the numbered style uses it.
    #[must_use]
    pub fn condition(&self, style: PlaceholderStyle, start: usize) -> String {
        let mut sql = String::from("WHERE");
        let mut index = start;
        for part in &self.parts {
            sql.push(' ');
            match part {
                FilterPart::Column(name) => sql.push_str(name),
                FilterPart::Connector(keyword) => sql.push_str(keyword),
                FilterPart::Comparison(op) => {
                    sql.push_str(op);
                    sql.push(' ');
                    sql.push_str(&style.placeholder(index));
                    index += 1;
                }
            }
        }
        sql
    }

    /// The bound parameters, in placeholder order.
    #[must_use]
    pub fn params(&self) -> &[SqlValue] {
        &self.params
    }
}

/// Wraps a value in `%...%` for substring matching.
fn wildcard(value: SqlValue) -> SqlValue {
    let text = match value {
        SqlValue::Text(s) => s,
        other => other.to_sql_inline(),
    };
    SqlValue::Text(format!("%{text}%"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_comparison() {
        let filter = Filter::new("id").equal(1);
        assert_eq!(
            filter.condition(PlaceholderStyle::Question, 1),
            "WHERE id = ?"
        );
        assert_eq!(filter.params(), &[SqlValue::Int(1)]);
    }

    #[test]
    fn test_chained_connectors() {
        let filter = Filter::new("age")
            .greater_or_equal(18)
            .and("city")
            .equal("Maputo")
            .or("admin")
            .equal(true);
        assert_eq!(
            filter.condition(PlaceholderStyle::Question, 1),
            "WHERE age >= ? AND city = ? OR admin = ?"
        );
        assert_eq!(filter.params().len(), 3);
    }

    #[test]
    fn test_numbered_placeholders_with_offset() {
        let filter = Filter::new("age").greater_than(30).and("name").not_equal("x");
        assert_eq!(
            filter.condition(PlaceholderStyle::Numbered, 3),
            "WHERE age > $3 AND name != $4"
        );
    }

    #[test]
    fn test_contain_wraps_value_as_parameter() {
        let filter = Filter::new("name").contain("li");
        assert_eq!(
            filter.condition(PlaceholderStyle::Question, 1),
            "WHERE name LIKE ?"
        );
        assert_eq!(filter.params(), &[SqlValue::Text(String::from("%li%"))]);
    }

    #[test]
    fn test_contain_formats_non_text_values() {
        let filter = Filter::new("code").not_contain(42);
        assert_eq!(filter.params(), &[SqlValue::Text(String::from("%42%"))]);
    }

    #[test]
    fn test_placeholder_count_matches_params() {
        let filter = Filter::new("a")
            .equal(1)
            .and("b")
            .less_than(2)
            .and("c")
            .greater_than(3)
            .and("d")
            .contain("x");
        let condition = filter.condition(PlaceholderStyle::Question, 1);
        let placeholders = condition.matches('?').count();
        assert_eq!(placeholders, filter.params().len());
        assert_eq!(placeholders, 4);
    }
}
