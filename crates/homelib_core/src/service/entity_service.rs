//! Reference-entity use-case service.

use crate::model::entity::{Author, EntityId, Genre, PublicationType, StorageLocation};
use crate::repo::entity_repo::{
    CatalogEntity, EntityRepository, SqliteAuthorRepository, SqliteGenreRepository,
    SqlitePublicationTypeRepository, SqliteStorageLocationRepository,
};
use crate::repo::RepoResult;
use crate::service::{ServiceError, ServiceResult};
use std::marker::PhantomData;

/// Use-case service wrapper for one reference-entity repository.
pub struct EntityService<E: CatalogEntity, R: EntityRepository<E>> {
    repo: R,
    _entity: PhantomData<E>,
}

pub type AuthorService<'conn> = EntityService<Author, SqliteAuthorRepository<'conn>>;
pub type GenreService<'conn> = EntityService<Genre, SqliteGenreRepository<'conn>>;
pub type PublicationTypeService<'conn> =
    EntityService<PublicationType, SqlitePublicationTypeRepository<'conn>>;
pub type StorageLocationService<'conn> =
    EntityService<StorageLocation, SqliteStorageLocationRepository<'conn>>;

impl<E: CatalogEntity, R: EntityRepository<E>> EntityService<E, R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            _entity: PhantomData,
        }
    }

    /// Lists all rows in canonical order.
    pub fn list_all(&self) -> RepoResult<Vec<E>> {
        self.repo.list_all()
    }

    /// Gets one row by id.
    pub fn get(&self, id: EntityId) -> RepoResult<Option<E>> {
        self.repo.get_by_id(id)
    }

    /// Creates a row and returns it as stored (trimmed attributes, new id).
    pub fn create(&self, draft: &E::Draft) -> ServiceResult<E> {
        let id = self.repo.create(draft)?;
        self.repo
            .get_by_id(id)?
            .ok_or(ServiceError::InconsistentState(
                "created row not found in read-back",
            ))
    }

    /// Replaces a row's attributes and returns it as stored.
    pub fn update(&self, id: EntityId, draft: &E::Draft) -> ServiceResult<E> {
        self.repo.update(id, draft)?;
        self.repo
            .get_by_id(id)?
            .ok_or(ServiceError::InconsistentState(
                "updated row not found in read-back",
            ))
    }

    /// Deletes a row; missing ids are a no-op reported as `false`.
    pub fn delete(&self, id: EntityId) -> RepoResult<bool> {
        self.repo.delete(id)
    }

    /// Counts stored rows.
    pub fn count(&self) -> RepoResult<u64> {
        self.repo.count()
    }
}
