//! Catalog schema definition and default seed data.
//!
//! # Responsibility
//! - Create entity tables, junction tables and lookup indexes.
//! - Seed the default publication types with insert-if-absent semantics.
//!
//! # Invariants
//! - Safe to run on an already-initialized store.
//! - Seeding never overwrites or duplicates existing rows.

use super::DbResult;
use rusqlite::Connection;

const SCHEMA_SQL: &str = include_str!("schema.sql");

/// Publication types every catalog starts with.
pub const DEFAULT_PUBLICATION_TYPES: [&str; 3] = ["Science/technical", "Textbook", "Fiction"];

/// Tables and columns repositories rely on, used by connection readiness checks.
pub const REQUIRED_SCHEMA: &[(&str, &[&str])] = &[
    ("publication_types", &["id", "name"]),
    ("genres", &["id", "name"]),
    ("authors", &["id", "name"]),
    ("storage_locations", &["id", "cabinet", "shelf"]),
    (
        "publications",
        &[
            "id",
            "title",
            "kind",
            "year",
            "publication_type_id",
            "storage_location_id",
        ],
    ),
    ("publication_authors", &["publication_id", "author_id"]),
    ("publication_genres", &["publication_id", "genre_id"]),
];

/// Creates all catalog tables if absent and seeds default publication types.
///
/// Runs in a single transaction: either the full schema and seed are present
/// afterwards or the store is left untouched.
pub fn init_schema(conn: &mut Connection) -> DbResult<()> {
    let tx = conn.transaction()?;
    tx.execute_batch(SCHEMA_SQL)?;
    {
        let mut seed = tx.prepare("INSERT OR IGNORE INTO publication_types (name) VALUES (?1);")?;
        for name in DEFAULT_PUBLICATION_TYPES {
            seed.execute([name])?;
        }
    }
    tx.commit()?;
    Ok(())
}
