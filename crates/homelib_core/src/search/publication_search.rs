//! Multi-criteria publication search.
//!
//! # Responsibility
//! - Translate optional criteria into one parameterized SQL query.
//! - Hydrate matches through the publication loader.
//!
//! # Invariants
//! - Criteria combine with logical AND; no criteria returns every publication.
//! - Each publication appears at most once, ordered by `title ASC, id ASC`.
//! - User text is always bound as a parameter, never spliced into SQL.
//! - No match yields an empty list, never an error.

use crate::model::entity::EntityId;
use crate::model::publication::Publication;
use crate::repo::publication_repo::{query_publications, PUBLICATION_SELECT_SQL};
use crate::repo::RepoResult;
use log::debug;
use rusqlite::types::Value;
use rusqlite::Connection;
use std::time::Instant;

const LIKE_ESCAPE: char = '\\';

/// Search criteria. Every field is optional; set fields are AND-combined.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublicationQuery {
    /// Substring of the title. Blank text is treated as absent.
    ///
    /// Matching uses SQLite `LIKE`, which folds ASCII case only.
    pub title: Option<String>,
    /// Only publications linked to this author.
    pub author_id: Option<EntityId>,
    /// Only publications linked to this genre.
    pub genre_id: Option<EntityId>,
    /// Only publications with this exact publication type.
    pub type_id: Option<EntityId>,
}

impl PublicationQuery {
    /// Creates a query filtering by title substring only.
    pub fn by_title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// Returns the trimmed title filter, or `None` when absent or blank.
    pub fn normalized_title(&self) -> Option<&str> {
        self.title
            .as_deref()
            .map(str::trim)
            .filter(|title| !title.is_empty())
    }

    /// Returns whether no criteria are set.
    pub fn is_empty(&self) -> bool {
        self.normalized_title().is_none()
            && self.author_id.is_none()
            && self.genre_id.is_none()
            && self.type_id.is_none()
    }
}

/// Searches publications and returns hydrated matches.
pub fn search_publications(
    conn: &Connection,
    query: &PublicationQuery,
) -> RepoResult<Vec<Publication>> {
    let started_at = Instant::now();
    let (sql, bind_values) = build_search_sql(query);
    let publications = query_publications(conn, &sql, bind_values)?;
    debug!(
        "event=publication_search module=search status=ok title_filter={} author_filter={} genre_filter={} type_filter={} hits={} duration_ms={}",
        query.normalized_title().is_some(),
        query.author_id.is_some(),
        query.genre_id.is_some(),
        query.type_id.is_some(),
        publications.len(),
        started_at.elapsed().as_millis()
    );
    Ok(publications)
}

/// Link filters use `EXISTS` sub-queries so a publication with several
/// matching links still yields one row.
fn build_search_sql(query: &PublicationQuery) -> (String, Vec<Value>) {
    let mut sql = format!("{PUBLICATION_SELECT_SQL} WHERE 1 = 1");
    let mut bind_values: Vec<Value> = Vec::new();

    if let Some(title) = query.normalized_title() {
        sql.push_str(" AND p.title LIKE ? ESCAPE '\\'");
        bind_values.push(Value::Text(format!("%{}%", escape_like(title))));
    }

    if let Some(author_id) = query.author_id {
        sql.push_str(
            " AND EXISTS (
                SELECT 1
                FROM publication_authors pa
                WHERE pa.publication_id = p.id
                  AND pa.author_id = ?
            )",
        );
        bind_values.push(Value::Integer(author_id));
    }

    if let Some(genre_id) = query.genre_id {
        sql.push_str(
            " AND EXISTS (
                SELECT 1
                FROM publication_genres pg
                WHERE pg.publication_id = p.id
                  AND pg.genre_id = ?
            )",
        );
        bind_values.push(Value::Integer(genre_id));
    }

    if let Some(type_id) = query.type_id {
        sql.push_str(" AND p.publication_type_id = ?");
        bind_values.push(Value::Integer(type_id));
    }

    sql.push_str(" ORDER BY p.title ASC, p.id ASC");
    (sql, bind_values)
}

fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        if matches!(ch, '%' | '_') || ch == LIKE_ESCAPE {
            escaped.push(LIKE_ESCAPE);
        }
        escaped.push(ch);
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::{build_search_sql, escape_like, PublicationQuery};
    use rusqlite::types::Value;

    #[test]
    fn empty_query_has_no_filters_or_bindings() {
        let (sql, binds) = build_search_sql(&PublicationQuery::default());
        assert!(sql.ends_with("WHERE 1 = 1 ORDER BY p.title ASC, p.id ASC"));
        assert!(binds.is_empty());
    }

    #[test]
    fn blank_title_is_treated_as_absent() {
        let query = PublicationQuery::by_title("   ");
        assert!(query.is_empty());
        let (sql, binds) = build_search_sql(&query);
        assert!(!sql.contains("LIKE"));
        assert!(binds.is_empty());
    }

    #[test]
    fn bindings_follow_clause_order() {
        let query = PublicationQuery {
            title: Some(" Kobzar ".to_string()),
            author_id: Some(3),
            genre_id: Some(5),
            type_id: Some(7),
        };
        let (sql, binds) = build_search_sql(&query);
        assert_eq!(sql.matches('?').count(), 4);
        assert_eq!(
            binds,
            vec![
                Value::Text("%Kobzar%".to_string()),
                Value::Integer(3),
                Value::Integer(5),
                Value::Integer(7),
            ]
        );
    }

    #[test]
    fn like_wildcards_are_escaped() {
        assert_eq!(escape_like("100%_done\\"), "100\\%\\_done\\\\");
    }
}
