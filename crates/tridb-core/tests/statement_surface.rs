//! Tests for the cross-dialect statement surface: one logical operation
//! rendered through all three dialects, modifier ordering, and the
//! filter's placeholder/parameter pairing.

use tridb_core::dialect::{Dialect, MySqlDialect, PlaceholderStyle, PostgresDialect, SqliteDialect};
use tridb_core::types::{mysql, postgres, SqliteType};
use tridb_core::{Column, ColumnData, Error, Filter, SqlValue, Table, CURRENT_TIMESTAMP};

#[test]
fn create_table_across_dialects() {
    let sqlite = SqliteDialect::new();
    let table = Table::with_columns(
        "people",
        vec![Column::new("name", SqliteType::Text).not_null()],
    );
    assert_eq!(
        sqlite.create_table_sql(&table).unwrap(),
        "CREATE TABLE IF NOT EXISTS people (id INTEGER PRIMARY KEY AUTOINCREMENT, name TEXT NOT NULL)"
    );

    let mysql_dialect = MySqlDialect::new();
    let table = Table::with_columns(
        "people",
        vec![Column::new("name", mysql::varchar(70).unwrap()).not_null()],
    );
    assert_eq!(
        mysql_dialect.create_table_sql(&table).unwrap(),
        "CREATE TABLE IF NOT EXISTS people (id INTEGER PRIMARY KEY AUTO_INCREMENT, name VARCHAR(70) NOT NULL)"
    );

    let pg = PostgresDialect::new();
    let table = Table::with_columns(
        "people",
        vec![Column::new("name", postgres::varchar(70).unwrap()).not_null()],
    );
    assert_eq!(
        pg.create_table_sql(&table).unwrap(),
        "CREATE TABLE IF NOT EXISTS people (id serial PRIMARY KEY, name varchar(70) NOT NULL)"
    );
}

#[test]
fn modifier_order_is_fixed_and_single() {
    let dialect = MySqlDialect::new();
    let column = Column::new("stamp", mysql::timestamp())
        .unique()
        .not_null()
        .default_expr(CURRENT_TIMESTAMP)
        .on_update(CURRENT_TIMESTAMP);
    let sql = dialect.column_sql(&column).unwrap();
    assert_eq!(
        sql,
        "stamp TIMESTAMP UNIQUE NOT NULL DEFAULT CURRENT_TIMESTAMP ON UPDATE CURRENT_TIMESTAMP"
    );
    for modifier in ["UNIQUE", "NOT NULL", "DEFAULT", "ON UPDATE"] {
        assert_eq!(sql.matches(modifier).count(), 1, "{modifier} repeated");
    }
}

#[test]
fn filter_placeholders_match_params() {
    let filter = Filter::new("age")
        .greater_or_equal(18)
        .and("age")
        .less_than(65)
        .or("name")
        .contain("Jr")
        .and("active")
        .equal(true);

    let question = filter.condition(PlaceholderStyle::Question, 1);
    assert_eq!(question.matches('?').count(), filter.params().len());

    let numbered = filter.condition(PlaceholderStyle::Numbered, 1);
    for index in 1..=filter.params().len() {
        assert!(numbered.contains(&format!("${index}")), "missing ${index}");
    }
    assert_eq!(filter.params().len(), 4);
}

#[test]
fn select_with_filter_across_dialects() {
    let filter = Filter::new("age").greater_than(18).and("city").equal("Beira");

    let sqlite = SqliteDialect::new().select_sql("users", &["name", "age"], Some(&filter));
    assert_eq!(
        sqlite,
        "SELECT name, age FROM users WHERE age > ? AND city = ?"
    );

    let pg = PostgresDialect::new().select_sql("users", &["name", "age"], Some(&filter));
    assert_eq!(
        pg,
        "SELECT name, age FROM users WHERE age > $1 AND city = $2"
    );
}

#[test]
fn update_binds_values_before_filter_params() {
    let dialect = PostgresDialect::new();
    let values = vec![
        ColumnData::new("name", "Rui"),
        ColumnData::new("age", 40_i64),
    ];
    let filter = Filter::new("id").equal(9);
    let sql = dialect.update_sql("users", &values, Some(&filter)).unwrap();
    assert_eq!(sql, "UPDATE users SET name = $1, age = $2 WHERE id = $3");
    assert_eq!(filter.params(), &[SqlValue::Int(9)]);
}

#[test]
fn empty_value_lists_are_rejected() {
    let dialect = SqliteDialect::new();
    assert!(matches!(
        dialect.insert_sql("users", &[]),
        Err(Error::ColumnCountMismatch {
            operation: "insert"
        })
    ));
    assert!(matches!(
        dialect.update_sql("users", &[], None),
        Err(Error::ColumnCountMismatch {
            operation: "update"
        })
    ));
}

#[test]
fn foreign_type_tokens_are_rejected_everywhere() {
    let sqlite_column = Column::new("n", SqliteType::Integer);
    let mysql_column = Column::new("n", mysql::integer());
    let pg_column = Column::new("n", postgres::integer());

    assert!(matches!(
        SqliteDialect::new().column_sql(&pg_column),
        Err(Error::ColumnTypeMismatch { .. })
    ));
    assert!(matches!(
        MySqlDialect::new().column_sql(&sqlite_column),
        Err(Error::ColumnTypeMismatch { .. })
    ));
    assert!(matches!(
        PostgresDialect::new().column_sql(&mysql_column),
        Err(Error::ColumnTypeMismatch { .. })
    ));
}

#[test]
fn alter_and_drop_statements() {
    let dialect = MySqlDialect::new();
    let column = Column::new("email", mysql::varchar(120).unwrap()).unique();
    assert_eq!(
        dialect.add_column_sql("users", &column).unwrap(),
        "ALTER TABLE users ADD COLUMN email VARCHAR(120) UNIQUE"
    );
    assert_eq!(
        dialect.drop_column_sql("users", "email"),
        "ALTER TABLE users DROP COLUMN email"
    );
    assert_eq!(dialect.drop_table_sql("users"), "DROP TABLE IF EXISTS users");
}

#[test]
fn table_serializes_with_column_order() {
    let table = Table::with_columns(
        "users",
        vec![
            Column::new("name", SqliteType::Text),
            Column::new("age", SqliteType::Integer),
        ],
    );
    let json = table.to_json().unwrap();
    let name_at = json.find("\"name\"").unwrap();
    let age_at = json.find("\"age\"").unwrap();
    assert!(name_at < age_at);
    assert!(json.contains("\"TEXT\""));
}
