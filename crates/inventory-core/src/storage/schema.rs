//! SQLite schema for the product store
//!
//! The store holds exactly one table. Its version lives in SQLite's
//! `user_version` header field rather than in a bookkeeping table; a value
//! of 0 means the file has never been initialised.

use rusqlite::{Connection, Result};

use crate::contract::DATABASE_VERSION;

/// Current schema version
pub const SCHEMA_VERSION: i32 = DATABASE_VERSION;

/// Create the products table and stamp the schema version
pub fn init_schema(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS products (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            product_name TEXT NOT NULL,
            price INTEGER NOT NULL,
            quantity INTEGER NOT NULL DEFAULT 0,
            supplier_name TEXT NOT NULL,
            supplier_phone TEXT
        );
        "#,
    )?;

    set_schema_version(conn, SCHEMA_VERSION)
}

/// Get the schema version recorded in the database, `None` if never set
pub fn get_schema_version(conn: &Connection) -> Result<Option<i32>> {
    let version: i32 = conn.query_row("PRAGMA user_version", [], |row| row.get(0))?;
    Ok(if version == 0 { None } else { Some(version) })
}

/// Record a schema version
pub fn set_schema_version(conn: &Connection, version: i32) -> Result<()> {
    // PRAGMA does not accept bound parameters
    conn.execute_batch(&format!("PRAGMA user_version = {}", version))
}
