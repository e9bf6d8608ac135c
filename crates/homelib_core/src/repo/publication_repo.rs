//! Publication aggregate loader and writer.
//!
//! # Responsibility
//! - Hydrate `Publication` values (type, location, authors, genres) from
//!   normalized rows.
//! - Persist a publication together with its author/genre link sets.
//!
//! # Invariants
//! - Every write runs in one immediate transaction; on failure nothing persists.
//! - Link updates are full replace-all: the draft's id lists are the complete
//!   desired sets.
//! - Referenced authors, genres, types and locations must exist at write time.
//! - Hydrated link sets are complete and ordered by `name ASC, id ASC`.

use crate::model::draft::PublicationDraft;
use crate::model::entity::{Author, EntityId, Genre, PublicationType, StorageLocation};
use crate::model::publication::{Publication, PublicationKind};
use crate::repo::error::map_write_error;
use crate::repo::{ensure_connection_ready, RepoError, RepoResult};
use crate::search::publication_search::{search_publications, PublicationQuery};
use log::{debug, info};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row, TransactionBehavior};

/// Base select shared by the loader and the search engine.
///
/// Publication type and storage location are joined so a stale reference
/// resolves to `NULL` columns instead of an error.
pub(crate) const PUBLICATION_SELECT_SQL: &str = "SELECT
    p.id AS id,
    p.title AS title,
    p.kind AS kind,
    p.year AS year,
    p.publication_type_id AS publication_type_id,
    p.storage_location_id AS storage_location_id,
    pt.name AS type_name,
    sl.cabinet AS cabinet,
    sl.shelf AS shelf
FROM publications p
LEFT JOIN publication_types pt ON pt.id = p.publication_type_id
LEFT JOIN storage_locations sl ON sl.id = p.storage_location_id";

const PUBLICATION_TABLES: &[&str] = &[
    "publications",
    "publication_types",
    "storage_locations",
    "authors",
    "genres",
    "publication_authors",
    "publication_genres",
];

/// Repository interface for publication aggregates.
pub trait PublicationRepository {
    /// Inserts a publication and its links; returns the new id.
    fn create_publication(&mut self, draft: &PublicationDraft) -> RepoResult<EntityId>;
    /// Overwrites fields and replaces both link sets.
    fn update_publication(&mut self, id: EntityId, draft: &PublicationDraft) -> RepoResult<()>;
    /// Deletes a publication; links cascade. Returns `false` when nothing matched.
    fn delete_publication(&self, id: EntityId) -> RepoResult<bool>;
    /// Loads one hydrated publication.
    fn get_publication(&self, id: EntityId) -> RepoResult<Option<Publication>>;
    /// Loads every publication ordered by title.
    fn list_publications(&self) -> RepoResult<Vec<Publication>>;
    /// Runs a multi-criteria search and hydrates the matches.
    fn search_publications(&self, query: &PublicationQuery) -> RepoResult<Vec<Publication>>;
    /// Counts stored publications.
    fn count_publications(&self) -> RepoResult<u64>;
}

/// SQLite-backed publication repository.
pub struct SqlitePublicationRepository<'conn> {
    conn: &'conn mut Connection,
}

impl<'conn> SqlitePublicationRepository<'conn> {
    /// Constructs a repository from an initialized connection.
    pub fn try_new(conn: &'conn mut Connection) -> RepoResult<Self> {
        ensure_connection_ready(conn, PUBLICATION_TABLES)?;
        Ok(Self { conn })
    }
}

impl PublicationRepository for SqlitePublicationRepository<'_> {
    fn create_publication(&mut self, draft: &PublicationDraft) -> RepoResult<EntityId> {
        let draft = draft.normalized()?;
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        ensure_references_exist(&tx, &draft)?;

        tx.execute(
            "INSERT INTO publications (
                title,
                kind,
                year,
                publication_type_id,
                storage_location_id
            ) VALUES (?1, ?2, ?3, ?4, ?5);",
            params![
                draft.title.as_str(),
                kind_to_db(draft.kind),
                draft.year,
                draft.publication_type_id,
                draft.storage_location_id,
            ],
        )
        .map_err(|err| map_write_error(err, "publications"))?;
        let id = tx.last_insert_rowid();
        insert_links(&tx, id, &draft)?;

        tx.commit()?;
        info!(
            "event=publication_create module=repo status=ok id={id} authors={} genres={}",
            draft.author_ids.len(),
            draft.genre_ids.len()
        );
        Ok(id)
    }

    fn update_publication(&mut self, id: EntityId, draft: &PublicationDraft) -> RepoResult<()> {
        let draft = draft.normalized()?;
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)?;
        if !row_exists(&tx, "publications", id)? {
            return Err(RepoError::NotFound {
                table: "publications",
                id,
            });
        }
        ensure_references_exist(&tx, &draft)?;

        tx.execute(
            "UPDATE publications
             SET
                title = ?1,
                kind = ?2,
                year = ?3,
                publication_type_id = ?4,
                storage_location_id = ?5
             WHERE id = ?6;",
            params![
                draft.title.as_str(),
                kind_to_db(draft.kind),
                draft.year,
                draft.publication_type_id,
                draft.storage_location_id,
                id,
            ],
        )
        .map_err(|err| map_write_error(err, "publications"))?;

        tx.execute(
            "DELETE FROM publication_authors WHERE publication_id = ?1;",
            [id],
        )?;
        tx.execute(
            "DELETE FROM publication_genres WHERE publication_id = ?1;",
            [id],
        )?;
        insert_links(&tx, id, &draft)?;

        tx.commit()?;
        info!(
            "event=publication_update module=repo status=ok id={id} authors={} genres={}",
            draft.author_ids.len(),
            draft.genre_ids.len()
        );
        Ok(())
    }

    fn delete_publication(&self, id: EntityId) -> RepoResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM publications WHERE id = ?1;", [id])?;
        debug!(
            "event=publication_delete module=repo status=ok id={id} removed={}",
            changed > 0
        );
        Ok(changed > 0)
    }

    fn get_publication(&self, id: EntityId) -> RepoResult<Option<Publication>> {
        load_publication(self.conn, id)
    }

    fn list_publications(&self) -> RepoResult<Vec<Publication>> {
        query_publications(
            self.conn,
            &format!("{PUBLICATION_SELECT_SQL} ORDER BY p.title ASC, p.id ASC"),
            Vec::new(),
        )
    }

    fn search_publications(&self, query: &PublicationQuery) -> RepoResult<Vec<Publication>> {
        search_publications(self.conn, query)
    }

    fn count_publications(&self) -> RepoResult<u64> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM publications;", [], |row| row.get(0))?;
        u64::try_from(count).map_err(|_| {
            RepoError::InvalidData("negative row count in `publications`".to_string())
        })
    }
}

/// Loads one fully hydrated publication by id.
pub fn load_publication(conn: &Connection, id: EntityId) -> RepoResult<Option<Publication>> {
    let mut publications = query_publications(
        conn,
        &format!("{PUBLICATION_SELECT_SQL} WHERE p.id = ?"),
        vec![Value::Integer(id)],
    )?;
    Ok(publications.pop())
}

/// Runs a select built on `PUBLICATION_SELECT_SQL` and hydrates every row.
pub(crate) fn query_publications(
    conn: &Connection,
    sql: &str,
    bind_values: Vec<Value>,
) -> RepoResult<Vec<Publication>> {
    let mut stmt = conn.prepare(sql)?;
    let mut rows = stmt.query(params_from_iter(bind_values))?;
    let mut publications = Vec::new();
    while let Some(row) = rows.next()? {
        let mut publication = parse_publication_row(row)?;
        publication.authors = load_authors(conn, publication.id)?;
        publication.genres = load_genres(conn, publication.id)?;
        publications.push(publication);
    }
    Ok(publications)
}

fn parse_publication_row(row: &Row<'_>) -> RepoResult<Publication> {
    let id: EntityId = row.get("id")?;
    let kind_text: String = row.get("kind")?;
    let kind = parse_kind(&kind_text).ok_or_else(|| {
        RepoError::InvalidData(format!(
            "invalid kind `{kind_text}` in publications.kind for id {id}"
        ))
    })?;

    let publication_type_id: Option<EntityId> = row.get("publication_type_id")?;
    let type_name: Option<String> = row.get("type_name")?;
    let publication_type = match (publication_type_id, type_name) {
        (Some(type_id), Some(name)) => Some(PublicationType { id: type_id, name }),
        _ => None,
    };

    let storage_location_id: Option<EntityId> = row.get("storage_location_id")?;
    let cabinet: Option<String> = row.get("cabinet")?;
    let shelf: Option<String> = row.get("shelf")?;
    let storage_location = match (storage_location_id, cabinet, shelf) {
        (Some(location_id), Some(cabinet), Some(shelf)) => Some(StorageLocation {
            id: location_id,
            cabinet,
            shelf,
        }),
        _ => None,
    };

    Ok(Publication {
        id,
        title: row.get("title")?,
        kind,
        year: row.get("year")?,
        publication_type_id,
        storage_location_id,
        publication_type,
        storage_location,
        authors: Vec::new(),
        genres: Vec::new(),
    })
}

fn load_authors(conn: &Connection, publication_id: EntityId) -> RepoResult<Vec<Author>> {
    let mut stmt = conn.prepare_cached(
        "SELECT a.id, a.name
         FROM publication_authors pa
         INNER JOIN authors a ON a.id = pa.author_id
         WHERE pa.publication_id = ?1
         ORDER BY a.name ASC, a.id ASC;",
    )?;
    let authors = stmt
        .query_map([publication_id], |row| {
            Ok(Author {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(authors)
}

fn load_genres(conn: &Connection, publication_id: EntityId) -> RepoResult<Vec<Genre>> {
    let mut stmt = conn.prepare_cached(
        "SELECT g.id, g.name
         FROM publication_genres pg
         INNER JOIN genres g ON g.id = pg.genre_id
         WHERE pg.publication_id = ?1
         ORDER BY g.name ASC, g.id ASC;",
    )?;
    let genres = stmt
        .query_map([publication_id], |row| {
            Ok(Genre {
                id: row.get(0)?,
                name: row.get(1)?,
            })
        })?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    Ok(genres)
}

fn insert_links(
    conn: &Connection,
    publication_id: EntityId,
    draft: &PublicationDraft,
) -> RepoResult<()> {
    for author_id in &draft.author_ids {
        conn.execute(
            "INSERT INTO publication_authors (publication_id, author_id) VALUES (?1, ?2);",
            params![publication_id, author_id],
        )
        .map_err(|err| map_write_error(err, "publication_authors"))?;
    }
    for genre_id in &draft.genre_ids {
        conn.execute(
            "INSERT INTO publication_genres (publication_id, genre_id) VALUES (?1, ?2);",
            params![publication_id, genre_id],
        )
        .map_err(|err| map_write_error(err, "publication_genres"))?;
    }
    Ok(())
}

fn ensure_references_exist(conn: &Connection, draft: &PublicationDraft) -> RepoResult<()> {
    if let Some(type_id) = draft.publication_type_id {
        ensure_row_exists(conn, "publication_types", type_id)?;
    }
    if let Some(location_id) = draft.storage_location_id {
        ensure_row_exists(conn, "storage_locations", location_id)?;
    }
    for &author_id in &draft.author_ids {
        ensure_row_exists(conn, "authors", author_id)?;
    }
    for &genre_id in &draft.genre_ids {
        ensure_row_exists(conn, "genres", genre_id)?;
    }
    Ok(())
}

fn ensure_row_exists(conn: &Connection, table: &'static str, id: EntityId) -> RepoResult<()> {
    if row_exists(conn, table, id)? {
        return Ok(());
    }
    Err(RepoError::ReferenceError {
        table,
        id: Some(id),
    })
}

fn row_exists(conn: &Connection, table: &str, id: EntityId) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        &format!("SELECT EXISTS(SELECT 1 FROM {table} WHERE id = ?1);"),
        [id],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn kind_to_db(kind: PublicationKind) -> &'static str {
    match kind {
        PublicationKind::Book => "book",
        PublicationKind::Periodical => "periodical",
    }
}

fn parse_kind(value: &str) -> Option<PublicationKind> {
    match value {
        "book" => Some(PublicationKind::Book),
        "periodical" => Some(PublicationKind::Periodical),
        _ => None,
    }
}
