//! Publication search entry points.
//!
//! # Responsibility
//! - Build parameterized multi-criteria publication queries.
//! - Keep result shaping (dedup, ordering, hydration) inside core.

pub mod publication_search;
