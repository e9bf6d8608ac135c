//! Connection-owning entry point for presentation callers.
//!
//! # Responsibility
//! - Own one initialized catalog connection.
//! - Hand out services borrowing that connection.
//!
//! # Invariants
//! - Every service handed out works on the same connection, so writes are
//!   immediately visible to later reads.

use crate::db::{open_db, open_db_in_memory, DbResult};
use crate::model::publication::Publication;
use crate::repo::entity_repo::SqliteEntityRepository;
use crate::repo::publication_repo::SqlitePublicationRepository;
use crate::repo::RepoResult;
use crate::search::publication_search::{search_publications, PublicationQuery};
use crate::service::entity_service::{
    AuthorService, EntityService, GenreService, PublicationTypeService, StorageLocationService,
};
use crate::service::publication_service::PublicationService;
use rusqlite::Connection;
use std::path::Path;

/// Catalog handle owning its SQLite connection.
pub struct Catalog {
    conn: Connection,
}

impl Catalog {
    /// Opens (or creates) a catalog file.
    pub fn open(path: impl AsRef<Path>) -> DbResult<Self> {
        Ok(Self {
            conn: open_db(path)?,
        })
    }

    /// Opens a throwaway in-memory catalog.
    pub fn open_in_memory() -> DbResult<Self> {
        Ok(Self {
            conn: open_db_in_memory()?,
        })
    }

    /// Borrows the underlying connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn authors(&self) -> RepoResult<AuthorService<'_>> {
        Ok(EntityService::new(SqliteEntityRepository::try_new(&self.conn)?))
    }

    pub fn genres(&self) -> RepoResult<GenreService<'_>> {
        Ok(EntityService::new(SqliteEntityRepository::try_new(&self.conn)?))
    }

    pub fn publication_types(&self) -> RepoResult<PublicationTypeService<'_>> {
        Ok(EntityService::new(SqliteEntityRepository::try_new(&self.conn)?))
    }

    pub fn storage_locations(&self) -> RepoResult<StorageLocationService<'_>> {
        Ok(EntityService::new(SqliteEntityRepository::try_new(&self.conn)?))
    }

    /// Publication writes need exclusive access for their transactions.
    pub fn publications(
        &mut self,
    ) -> RepoResult<PublicationService<SqlitePublicationRepository<'_>>> {
        Ok(PublicationService::new(SqlitePublicationRepository::try_new(
            &mut self.conn,
        )?))
    }

    /// Searches publications without taking exclusive access.
    pub fn search(&self, query: &PublicationQuery) -> RepoResult<Vec<Publication>> {
        search_publications(&self.conn, query)
    }
}
