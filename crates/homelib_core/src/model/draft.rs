//! Write-side input models.
//!
//! # Responsibility
//! - Carry the full editable attribute set for create/update calls.
//! - Normalize user-entered text before it reaches storage.
//!
//! # Invariants
//! - Normalized drafts never carry blank names, titles, cabinets or shelves.
//! - Normalized publication drafts carry no duplicate author or genre ids.

use crate::model::entity::EntityId;
use crate::model::publication::PublicationKind;
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Attributes of a name-only entity (author, genre, publication type).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameDraft {
    pub name: String,
}

impl NameDraft {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Returns a trimmed copy, rejecting blank names.
    pub fn normalized(&self) -> Result<Self, DraftValidationError> {
        Ok(Self {
            name: required(&self.name, DraftValidationError::BlankName)?,
        })
    }
}

/// Attributes of a storage location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationDraft {
    pub cabinet: String,
    pub shelf: String,
}

impl LocationDraft {
    pub fn new(cabinet: impl Into<String>, shelf: impl Into<String>) -> Self {
        Self {
            cabinet: cabinet.into(),
            shelf: shelf.into(),
        }
    }

    /// Returns a trimmed copy, rejecting a blank cabinet or shelf.
    pub fn normalized(&self) -> Result<Self, DraftValidationError> {
        Ok(Self {
            cabinet: required(&self.cabinet, DraftValidationError::BlankCabinet)?,
            shelf: required(&self.shelf, DraftValidationError::BlankShelf)?,
        })
    }
}

/// Full editable attribute set of a publication, including link sets.
///
/// `author_ids` and `genre_ids` are the complete desired link sets; an update
/// replaces whatever links existed before.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublicationDraft {
    pub title: String,
    pub kind: PublicationKind,
    pub year: Option<i32>,
    pub publication_type_id: Option<EntityId>,
    pub storage_location_id: Option<EntityId>,
    pub author_ids: Vec<EntityId>,
    pub genre_ids: Vec<EntityId>,
}

impl PublicationDraft {
    /// Creates a draft with no year, references or links.
    pub fn new(title: impl Into<String>, kind: PublicationKind) -> Self {
        Self {
            title: title.into(),
            kind,
            ..Self::default()
        }
    }

    /// Returns a copy with a trimmed title and deduplicated, sorted link ids.
    pub fn normalized(&self) -> Result<Self, DraftValidationError> {
        Ok(Self {
            title: required(&self.title, DraftValidationError::BlankTitle)?,
            kind: self.kind,
            year: self.year,
            publication_type_id: self.publication_type_id,
            storage_location_id: self.storage_location_id,
            author_ids: unique_ids(&self.author_ids),
            genre_ids: unique_ids(&self.genre_ids),
        })
    }
}

/// Draft normalization failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftValidationError {
    BlankName,
    BlankCabinet,
    BlankShelf,
    BlankTitle,
}

impl Display for DraftValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankName => write!(f, "name must not be empty"),
            Self::BlankCabinet => write!(f, "cabinet must not be empty"),
            Self::BlankShelf => write!(f, "shelf must not be empty"),
            Self::BlankTitle => write!(f, "title must not be empty"),
        }
    }
}

impl Error for DraftValidationError {}

fn required(value: &str, blank: DraftValidationError) -> Result<String, DraftValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(blank);
    }
    Ok(trimmed.to_string())
}

fn unique_ids(ids: &[EntityId]) -> Vec<EntityId> {
    ids.iter().copied().collect::<BTreeSet<_>>().into_iter().collect()
}
