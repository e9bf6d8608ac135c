//! Publication use-case service.
//!
//! # Responsibility
//! - Provide publication create/update/get/list/delete/search entry points.
//! - Return hydrated read-back state after writes.
//!
//! # Invariants
//! - Link sets passed to `update` replace the stored sets entirely.

use crate::model::draft::PublicationDraft;
use crate::model::entity::EntityId;
use crate::model::publication::Publication;
use crate::repo::publication_repo::PublicationRepository;
use crate::repo::RepoResult;
use crate::search::publication_search::PublicationQuery;
use crate::service::{ServiceError, ServiceResult};

/// Publication service facade over repository implementations.
pub struct PublicationService<R: PublicationRepository> {
    repo: R,
}

impl<R: PublicationRepository> PublicationService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates a publication with its links and returns the hydrated result.
    pub fn create(&mut self, draft: &PublicationDraft) -> ServiceResult<Publication> {
        let id = self.repo.create_publication(draft)?;
        self.repo
            .get_publication(id)?
            .ok_or(ServiceError::InconsistentState(
                "created publication not found in read-back",
            ))
    }

    /// Replaces a publication's fields and link sets; returns the hydrated result.
    pub fn update(
        &mut self,
        id: EntityId,
        draft: &PublicationDraft,
    ) -> ServiceResult<Publication> {
        self.repo.update_publication(id, draft)?;
        self.repo
            .get_publication(id)?
            .ok_or(ServiceError::InconsistentState(
                "updated publication not found in read-back",
            ))
    }

    /// Gets one hydrated publication.
    pub fn get(&self, id: EntityId) -> RepoResult<Option<Publication>> {
        self.repo.get_publication(id)
    }

    /// Lists every publication ordered by title.
    pub fn list(&self) -> RepoResult<Vec<Publication>> {
        self.repo.list_publications()
    }

    /// Deletes a publication; missing ids are a no-op reported as `false`.
    pub fn delete(&self, id: EntityId) -> RepoResult<bool> {
        self.repo.delete_publication(id)
    }

    /// Searches publications by optional AND-combined criteria.
    pub fn search(&self, query: &PublicationQuery) -> RepoResult<Vec<Publication>> {
        self.repo.search_publications(query)
    }

    /// Counts stored publications.
    pub fn count(&self) -> RepoResult<u64> {
        self.repo.count_publications()
    }
}
