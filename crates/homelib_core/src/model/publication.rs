//! Publication aggregate model.
//!
//! # Responsibility
//! - Define the hydrated publication view returned by loaders and search.
//!
//! # Invariants
//! - `kind` is always exactly one of `book` or `periodical`.
//! - `authors` and `genres` are either the complete linked set or empty.
//! - `publication_type` is `Some` only when `publication_type_id` resolved;
//!   the same holds for `storage_location`.

use crate::model::entity::{Author, EntityId, Genre, PublicationType, StorageLocation};
use serde::{Deserialize, Serialize};

/// Physical form of a publication.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PublicationKind {
    /// Standalone book.
    #[default]
    Book,
    /// Magazine, journal or newspaper issue.
    Periodical,
}

/// Fully hydrated publication with owned snapshots of related entities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Publication {
    pub id: EntityId,
    pub title: String,
    pub kind: PublicationKind,
    pub year: Option<i32>,
    pub publication_type_id: Option<EntityId>,
    pub storage_location_id: Option<EntityId>,
    pub publication_type: Option<PublicationType>,
    pub storage_location: Option<StorageLocation>,
    /// Linked authors ordered by name.
    pub authors: Vec<Author>,
    /// Linked genres ordered by name.
    pub genres: Vec<Genre>,
}

impl Publication {
    /// Returns linked author names in display order.
    pub fn author_names(&self) -> Vec<&str> {
        self.authors.iter().map(|author| author.name.as_str()).collect()
    }

    /// Returns linked genre names in display order.
    pub fn genre_names(&self) -> Vec<&str> {
        self.genres.iter().map(|genre| genre.name.as_str()).collect()
    }

    /// Returns linked author ids in display order.
    pub fn author_ids(&self) -> Vec<EntityId> {
        self.authors.iter().map(|author| author.id).collect()
    }

    /// Returns linked genre ids in display order.
    pub fn genre_ids(&self) -> Vec<EntityId> {
        self.genres.iter().map(|genre| genre.id).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{Publication, PublicationKind};
    use crate::model::entity::{Author, Genre};

    fn sample() -> Publication {
        Publication {
            id: 1,
            title: "Kobzar".to_string(),
            kind: PublicationKind::Book,
            year: Some(1840),
            publication_type_id: None,
            storage_location_id: None,
            publication_type: None,
            storage_location: None,
            authors: vec![Author {
                id: 4,
                name: "Taras Shevchenko".to_string(),
            }],
            genres: vec![Genre {
                id: 9,
                name: "Poetry".to_string(),
            }],
        }
    }

    #[test]
    fn kind_serializes_as_snake_case() {
        let json = serde_json::to_value(PublicationKind::Periodical).unwrap();
        assert_eq!(json, serde_json::json!("periodical"));
    }

    #[test]
    fn default_kind_is_book() {
        assert_eq!(PublicationKind::default(), PublicationKind::Book);
    }

    #[test]
    fn name_and_id_projections_follow_link_order() {
        let publication = sample();
        assert_eq!(publication.author_names(), vec!["Taras Shevchenko"]);
        assert_eq!(publication.genre_names(), vec!["Poetry"]);
        assert_eq!(publication.author_ids(), vec![4]);
        assert_eq!(publication.genre_ids(), vec![9]);
    }
}
