//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate SQLite query details from service/business orchestration.
//!
//! # Invariants
//! - Write paths normalize drafts before persistence.
//! - Repository APIs return semantic errors (`NotFound`, `UniquenessViolation`,
//!   `ReferenceError`) in addition to DB transport errors.
//! - Failed writes leave storage in its prior state.

pub mod entity_repo;
mod error;
pub mod publication_repo;

pub use error::{RepoError, RepoResult};

use crate::db::schema::REQUIRED_SCHEMA;
use rusqlite::Connection;

/// Verifies that every table/column listed in `tables` exists.
///
/// Repositories call this from `try_new` so an unprepared connection fails
/// fast with a descriptive error.
pub(crate) fn ensure_connection_ready(conn: &Connection, tables: &[&str]) -> RepoResult<()> {
    for &(table, columns) in REQUIRED_SCHEMA {
        if !tables.contains(&table) {
            continue;
        }
        if !table_exists(conn, table)? {
            return Err(RepoError::MissingRequiredTable(table));
        }
        for &column in columns {
            if !table_has_column(conn, table, column)? {
                return Err(RepoError::MissingRequiredColumn { table, column });
            }
        }
    }
    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn table_has_column(conn: &Connection, table: &str, column: &str) -> RepoResult<bool> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});"))?;
    let mut rows = stmt.query([])?;
    while let Some(row) = rows.next()? {
        let current: String = row.get(1)?;
        if current == column {
            return Ok(true);
        }
    }
    Ok(false)
}
