//! Catalog domain model.
//!
//! # Responsibility
//! - Define the entity values, write drafts and the hydrated `Publication`
//!   aggregate used by core business logic.
//!
//! # Invariants
//! - Every persisted entity is identified by a storage-assigned `EntityId`.
//! - Hydrated values are owned snapshots; they never track later writes.

pub mod draft;
pub mod entity;
pub mod publication;
