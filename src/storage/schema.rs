//! Database schema definition

use rusqlite::Connection;

/// SQL schema for the listing store
pub const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS listings (
    url TEXT PRIMARY KEY,
    title TEXT,
    price INTEGER,
    published_time TEXT,
    published_date TEXT,
    seller_name TEXT,
    location TEXT,
    division TEXT,
    condition TEXT,
    model TEXT,
    brand TEXT,
    features TEXT,
    description TEXT,
    image_urls TEXT,
    scraped_date TEXT NOT NULL
);
"#;

/// Applies the schema to a connection; safe to run repeatedly
pub fn initialize_schema(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA_SQL)
}
