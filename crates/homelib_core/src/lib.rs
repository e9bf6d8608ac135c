//! Core data-access layer for the home library catalog.
//! This crate is the single source of truth for catalog invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod search;
pub mod service;

pub use db::{init_schema, open_db, open_db_in_memory, DbError, DbResult};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError, LoggingOptions};
pub use model::draft::{DraftValidationError, LocationDraft, NameDraft, PublicationDraft};
pub use model::entity::{Author, EntityId, Genre, PublicationType, StorageLocation};
pub use model::publication::{Publication, PublicationKind};
pub use repo::entity_repo::{
    CatalogEntity, EntityRepository, SqliteAuthorRepository, SqliteEntityRepository,
    SqliteGenreRepository, SqlitePublicationTypeRepository, SqliteStorageLocationRepository,
};
pub use repo::publication_repo::{
    load_publication, PublicationRepository, SqlitePublicationRepository,
};
pub use repo::{RepoError, RepoResult};
pub use search::publication_search::{search_publications, PublicationQuery};
pub use service::catalog::Catalog;
pub use service::entity_service::{
    AuthorService, EntityService, GenreService, PublicationTypeService, StorageLocationService,
};
pub use service::publication_service::PublicationService;
pub use service::{ServiceError, ServiceResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
