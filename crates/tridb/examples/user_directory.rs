//! Example: User Directory on SQLite
//!
//! This example walks the whole manager surface against a file-backed
//! SQLite database: define a table, insert and query rows, alter the
//! schema, reflect it back, and drop everything again.
//!
//! Run with: cargo run --example user_directory -p tridb

use tridb::types::SqliteType;
use tridb::{encrypt_value, Column, ColumnData, Filter, SqliteManager};

#[tokio::main]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    println!("{}", "=".repeat(70));
    println!(" TRIDB: User Directory Example");
    println!("{}", "=".repeat(70));
    println!();

    let manager = SqliteManager::with_path("directory", std::env::temp_dir());
    println!("[1] Database file: {}\n", manager.database_path().display());

    println!("[2] Creating the users table...");
    manager
        .create_table(
            "users",
            &[
                Column::new("name", SqliteType::Text).not_null(),
                Column::new("email", SqliteType::Text).unique(),
                Column::new("age", SqliteType::Integer),
                Column::new("secret", SqliteType::Text),
            ],
        )
        .await?;
    println!("    OK (an auto-increment id column is added for you)\n");

    println!("[3] Inserting rows...");
    for (name, email, age) in [
        ("Alice", "alice@example.com", 34),
        ("Aline", "aline@example.com", 29),
        ("Bob", "bob@example.com", 17),
    ] {
        manager
            .insert(
                "users",
                &[
                    ColumnData::new("name", name),
                    ColumnData::new("email", email),
                    ColumnData::new("age", age),
                    ColumnData::new("secret", encrypt_value("hunter2")),
                ],
            )
            .await?;
        println!("    + {name} <{email}>");
    }
    println!();

    println!("[4] Selecting adults whose name contains 'li'...");
    let rows = manager
        .select(
            "users",
            &["name", "age"],
            Some(&Filter::new("age").greater_or_equal(18).and("name").contain("li")),
        )
        .await?;
    for row in &rows {
        println!("    {row:?}");
    }
    println!();

    println!("[5] Updating Bob's age...");
    manager
        .update(
            "users",
            &[ColumnData::new("age", 18)],
            Some(&Filter::new("name").equal("Bob")),
        )
        .await?;
    println!("    OK\n");

    println!("[6] Adding a column, then reflecting the table...");
    manager
        .add_column("users", &Column::new("city", SqliteType::Text))
        .await?;
    let table = manager.table("users").await?;
    println!("{}", table.to_json()?);
    println!();

    println!("[7] Listing tables...");
    for name in manager.list_tables().await? {
        println!("    - {name}");
    }
    println!();

    println!("[8] Dropping the table and the database...");
    manager.drop_table("users").await?;
    manager.drop_database().await?;
    println!("    OK\n");

    println!("{}", "=".repeat(70));
    println!(" Example completed successfully!");
    println!("{}", "=".repeat(70));

    Ok(())
}
