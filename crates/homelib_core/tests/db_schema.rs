use homelib_core::db::{init_schema, open_db, open_db_in_memory, DEFAULT_PUBLICATION_TYPES};
use homelib_core::{
    EntityRepository, NameDraft, RepoError, SqliteAuthorRepository, SqlitePublicationRepository,
    SqlitePublicationTypeRepository,
};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_creates_all_tables() {
    let conn = open_db_in_memory().unwrap();

    for table in [
        "publication_types",
        "genres",
        "authors",
        "storage_locations",
        "publications",
        "publication_authors",
        "publication_genres",
    ] {
        assert_table_exists(&conn, table);
    }
}

#[test]
fn open_db_enables_foreign_keys() {
    let conn = open_db_in_memory().unwrap();
    let enabled: i64 = conn
        .query_row("PRAGMA foreign_keys;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(enabled, 1);
}

#[test]
fn default_publication_types_are_seeded() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePublicationTypeRepository::try_new(&conn).unwrap();

    let mut names: Vec<String> = repo
        .list_all()
        .unwrap()
        .into_iter()
        .map(|kind| kind.name)
        .collect();
    names.sort();
    let mut expected: Vec<String> = DEFAULT_PUBLICATION_TYPES
        .iter()
        .map(|name| name.to_string())
        .collect();
    expected.sort();
    assert_eq!(names, expected);
}

#[test]
fn init_schema_is_idempotent_and_keeps_existing_rows() {
    let mut conn = open_db_in_memory().unwrap();
    {
        let authors = SqliteAuthorRepository::try_new(&conn).unwrap();
        authors.create(&NameDraft::new("Ivan Franko")).unwrap();
    }

    init_schema(&mut conn).unwrap();
    init_schema(&mut conn).unwrap();

    let types = SqlitePublicationTypeRepository::try_new(&conn).unwrap();
    assert_eq!(types.count().unwrap(), 3);
    let authors = SqliteAuthorRepository::try_new(&conn).unwrap();
    assert_eq!(authors.count().unwrap(), 1);
}

#[test]
fn init_schema_keeps_renamed_default_and_restores_missing_default() {
    let mut conn = open_db_in_memory().unwrap();
    let renamed_id = {
        let types = SqlitePublicationTypeRepository::try_new(&conn).unwrap();
        let fiction = types
            .list_all()
            .unwrap()
            .into_iter()
            .find(|kind| kind.name == "Fiction")
            .unwrap();
        types.update(fiction.id, &NameDraft::new("Novels")).unwrap();
        fiction.id
    };

    init_schema(&mut conn).unwrap();

    let types = SqlitePublicationTypeRepository::try_new(&conn).unwrap();
    assert_eq!(types.get_by_id(renamed_id).unwrap().unwrap().name, "Novels");
    let names: Vec<String> = types
        .list_all()
        .unwrap()
        .into_iter()
        .map(|kind| kind.name)
        .collect();
    assert_eq!(
        names,
        vec!["Fiction", "Novels", "Science/technical", "Textbook"]
    );
}

#[test]
fn reopening_file_database_preserves_data() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("library.db");

    let conn_first = open_db(&path).unwrap();
    SqliteAuthorRepository::try_new(&conn_first)
        .unwrap()
        .create(&NameDraft::new("Lina Kostenko"))
        .unwrap();
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    let authors = SqliteAuthorRepository::try_new(&conn_second)
        .unwrap()
        .list_all()
        .unwrap();
    assert_eq!(authors.len(), 1);
    assert_eq!(authors[0].name, "Lina Kostenko");

    let types = SqlitePublicationTypeRepository::try_new(&conn_second).unwrap();
    assert_eq!(types.count().unwrap(), 3);
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    let result = SqliteAuthorRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredTable("authors"))
    ));
}

#[test]
fn repository_rejects_table_missing_required_column() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch("CREATE TABLE authors (id INTEGER PRIMARY KEY);")
        .unwrap();

    let result = SqliteAuthorRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredColumn {
            table: "authors",
            column: "name"
        })
    ));
}

#[test]
fn publication_repository_requires_junction_tables() {
    let mut conn = open_db_in_memory().unwrap();
    conn.execute_batch("DROP TABLE publication_genres;").unwrap();

    let result = SqlitePublicationRepository::try_new(&mut conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredTable("publication_genres"))
    ));
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
