//! Reference-entity repositories (authors, genres, publication types,
//! storage locations).
//!
//! # Responsibility
//! - Provide one uniform CRUD contract for every reference entity.
//! - Keep table/column mapping for each entity next to its SQL.
//!
//! # Invariants
//! - `list_all` ordering is deterministic: by name, or by cabinet then shelf.
//! - `get_by_id` reports a missing row as `None`, never as an error.
//! - `delete` never blocks on dependents; the schema cascades or nulls them.

use crate::model::draft::{LocationDraft, NameDraft};
use crate::model::entity::{Author, EntityId, Genre, PublicationType, StorageLocation};
use crate::repo::error::map_write_error;
use crate::repo::{ensure_connection_ready, RepoError, RepoResult};
use log::debug;
use rusqlite::types::Value;
use rusqlite::{params_from_iter, Connection, OptionalExtension, Row};
use std::marker::PhantomData;

/// Table mapping for an entity stored in its own catalog table.
pub trait CatalogEntity: Sized {
    /// Editable attribute set accepted by create/update.
    type Draft;

    /// Backing table name.
    const TABLE: &'static str;
    /// Editable columns, in the order `bind_draft` produces values.
    const COLUMNS: &'static [&'static str];
    /// `ORDER BY` clause used by `list_all`.
    const ORDER_BY: &'static str;

    /// Decodes one row selected as `id` followed by `COLUMNS`.
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;

    /// Normalizes the draft and returns its values in `COLUMNS` order.
    fn bind_draft(draft: &Self::Draft) -> RepoResult<Vec<Value>>;
}

impl CatalogEntity for Author {
    type Draft = NameDraft;
    const TABLE: &'static str = "authors";
    const COLUMNS: &'static [&'static str] = &["name"];
    const ORDER_BY: &'static str = "name ASC, id ASC";

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
        })
    }

    fn bind_draft(draft: &NameDraft) -> RepoResult<Vec<Value>> {
        bind_name(draft)
    }
}

impl CatalogEntity for Genre {
    type Draft = NameDraft;
    const TABLE: &'static str = "genres";
    const COLUMNS: &'static [&'static str] = &["name"];
    const ORDER_BY: &'static str = "name ASC, id ASC";

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
        })
    }

    fn bind_draft(draft: &NameDraft) -> RepoResult<Vec<Value>> {
        bind_name(draft)
    }
}

impl CatalogEntity for PublicationType {
    type Draft = NameDraft;
    const TABLE: &'static str = "publication_types";
    const COLUMNS: &'static [&'static str] = &["name"];
    const ORDER_BY: &'static str = "name ASC, id ASC";

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
        })
    }

    fn bind_draft(draft: &NameDraft) -> RepoResult<Vec<Value>> {
        bind_name(draft)
    }
}

impl CatalogEntity for StorageLocation {
    type Draft = LocationDraft;
    const TABLE: &'static str = "storage_locations";
    const COLUMNS: &'static [&'static str] = &["cabinet", "shelf"];
    const ORDER_BY: &'static str = "cabinet ASC, shelf ASC, id ASC";

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            cabinet: row.get("cabinet")?,
            shelf: row.get("shelf")?,
        })
    }

    fn bind_draft(draft: &LocationDraft) -> RepoResult<Vec<Value>> {
        let draft = draft.normalized()?;
        Ok(vec![Value::Text(draft.cabinet), Value::Text(draft.shelf)])
    }
}

fn bind_name(draft: &NameDraft) -> RepoResult<Vec<Value>> {
    let draft = draft.normalized()?;
    Ok(vec![Value::Text(draft.name)])
}

/// Repository interface for reference-entity CRUD operations.
pub trait EntityRepository<E: CatalogEntity> {
    /// Lists every row in the entity's canonical order.
    fn list_all(&self) -> RepoResult<Vec<E>>;
    /// Gets one row by id; `None` when absent.
    fn get_by_id(&self, id: EntityId) -> RepoResult<Option<E>>;
    /// Inserts a row and returns its assigned id.
    fn create(&self, draft: &E::Draft) -> RepoResult<EntityId>;
    /// Replaces every editable attribute of an existing row.
    fn update(&self, id: EntityId, draft: &E::Draft) -> RepoResult<()>;
    /// Deletes a row. Returns `false` when nothing matched.
    fn delete(&self, id: EntityId) -> RepoResult<bool>;
    /// Counts rows in the entity's table.
    fn count(&self) -> RepoResult<u64>;
}

/// SQLite-backed reference-entity repository.
pub struct SqliteEntityRepository<'conn, E> {
    conn: &'conn Connection,
    _entity: PhantomData<E>,
}

pub type SqliteAuthorRepository<'conn> = SqliteEntityRepository<'conn, Author>;
pub type SqliteGenreRepository<'conn> = SqliteEntityRepository<'conn, Genre>;
pub type SqlitePublicationTypeRepository<'conn> = SqliteEntityRepository<'conn, PublicationType>;
pub type SqliteStorageLocationRepository<'conn> = SqliteEntityRepository<'conn, StorageLocation>;

impl<'conn, E: CatalogEntity> SqliteEntityRepository<'conn, E> {
    /// Constructs a repository from an initialized connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, &[E::TABLE])?;
        Ok(Self {
            conn,
            _entity: PhantomData,
        })
    }

    fn select_sql() -> String {
        format!("SELECT id, {} FROM {}", E::COLUMNS.join(", "), E::TABLE)
    }
}

impl<E: CatalogEntity> EntityRepository<E> for SqliteEntityRepository<'_, E> {
    fn list_all(&self) -> RepoResult<Vec<E>> {
        let sql = format!("{} ORDER BY {};", Self::select_sql(), E::ORDER_BY);
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query([])?;
        let mut entities = Vec::new();
        while let Some(row) = rows.next()? {
            entities.push(E::from_row(row)?);
        }
        Ok(entities)
    }

    fn get_by_id(&self, id: EntityId) -> RepoResult<Option<E>> {
        let sql = format!("{} WHERE id = ?1;", Self::select_sql());
        let entity = self
            .conn
            .query_row(&sql, [id], |row| E::from_row(row))
            .optional()?;
        Ok(entity)
    }

    fn create(&self, draft: &E::Draft) -> RepoResult<EntityId> {
        let values = E::bind_draft(draft)?;
        let placeholders = (1..=E::COLUMNS.len())
            .map(|idx| format!("?{idx}"))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({placeholders});",
            E::TABLE,
            E::COLUMNS.join(", ")
        );

        self.conn
            .execute(&sql, params_from_iter(values))
            .map_err(|err| map_write_error(err, E::TABLE))?;
        let id = self.conn.last_insert_rowid();
        debug!(
            "event=entity_create module=repo status=ok table={} id={id}",
            E::TABLE
        );
        Ok(id)
    }

    fn update(&self, id: EntityId, draft: &E::Draft) -> RepoResult<()> {
        let mut values = E::bind_draft(draft)?;
        let assignments = E::COLUMNS
            .iter()
            .enumerate()
            .map(|(idx, column)| format!("{column} = ?{}", idx + 1))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "UPDATE {} SET {assignments} WHERE id = ?{};",
            E::TABLE,
            values.len() + 1
        );
        values.push(Value::Integer(id));

        let changed = self
            .conn
            .execute(&sql, params_from_iter(values))
            .map_err(|err| map_write_error(err, E::TABLE))?;
        if changed == 0 {
            return Err(RepoError::NotFound {
                table: E::TABLE,
                id,
            });
        }
        Ok(())
    }

    fn delete(&self, id: EntityId) -> RepoResult<bool> {
        let sql = format!("DELETE FROM {} WHERE id = ?1;", E::TABLE);
        let changed = self.conn.execute(&sql, [id])?;
        debug!(
            "event=entity_delete module=repo status=ok table={} id={id} removed={}",
            E::TABLE,
            changed > 0
        );
        Ok(changed > 0)
    }

    fn count(&self) -> RepoResult<u64> {
        let sql = format!("SELECT COUNT(*) FROM {};", E::TABLE);
        let count: i64 = self.conn.query_row(&sql, [], |row| row.get(0))?;
        u64::try_from(count)
            .map_err(|_| RepoError::InvalidData(format!("negative row count in `{}`", E::TABLE)))
    }
}
