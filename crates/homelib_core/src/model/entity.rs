//! Reference entities a publication can point at.
//!
//! # Invariants
//! - Author, genre and publication type names are unique per table.
//! - Storage locations are unique per `(cabinet, shelf)` pair.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Storage-assigned row identifier shared by every catalog table.
pub type EntityId = i64;

/// Person credited on one or more publications.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Author {
    pub id: EntityId,
    pub name: String,
}

/// Literary or subject genre.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Genre {
    pub id: EntityId,
    pub name: String,
}

/// Broad publication category such as textbook or fiction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PublicationType {
    pub id: EntityId,
    pub name: String,
}

/// Physical place on a shelf where a publication is kept.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StorageLocation {
    pub id: EntityId,
    pub cabinet: String,
    pub shelf: String,
}

impl Display for StorageLocation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Cabinet {}, shelf {}", self.cabinet, self.shelf)
    }
}

#[cfg(test)]
mod tests {
    use super::StorageLocation;

    #[test]
    fn storage_location_display_names_cabinet_and_shelf() {
        let location = StorageLocation {
            id: 7,
            cabinet: "A".to_string(),
            shelf: "3".to_string(),
        };
        assert_eq!(location.to_string(), "Cabinet A, shelf 3");
    }
}
