use homelib_core::{
    Catalog, DraftValidationError, LocationDraft, NameDraft, PublicationDraft, PublicationKind,
    PublicationQuery, RepoError, ServiceError,
};

#[test]
fn entity_service_create_returns_stored_row() {
    let catalog = Catalog::open_in_memory().unwrap();
    let authors = catalog.authors().unwrap();

    let created = authors.create(&NameDraft::new("  Ivan Franko  ")).unwrap();
    assert_eq!(created.name, "Ivan Franko");
    assert_eq!(authors.get(created.id).unwrap(), Some(created));
    assert_eq!(authors.count().unwrap(), 1);
}

#[test]
fn entity_service_update_returns_stored_row() {
    let catalog = Catalog::open_in_memory().unwrap();
    let locations = catalog.storage_locations().unwrap();
    let created = locations.create(&LocationDraft::new("A", "1")).unwrap();

    let updated = locations
        .update(created.id, &LocationDraft::new(" B ", " 3 "))
        .unwrap();
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.to_string(), "Cabinet B, shelf 3");
}

#[test]
fn entity_service_maps_validation_and_not_found() {
    let catalog = Catalog::open_in_memory().unwrap();
    let genres = catalog.genres().unwrap();

    let err = genres.create(&NameDraft::new("")).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(DraftValidationError::BlankName)
    ));

    let err = genres.update(8, &NameDraft::new("Drama")).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::NotFound {
            table: "genres",
            id: 8
        }
    ));
}

#[test]
fn entity_service_wraps_uniqueness_violation() {
    let catalog = Catalog::open_in_memory().unwrap();
    let types = catalog.publication_types().unwrap();

    let err = types.create(&NameDraft::new("Textbook")).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Repo(RepoError::UniquenessViolation { .. })
    ));
    assert_eq!(types.count().unwrap(), 3);
}

#[test]
fn publication_service_roundtrip_through_catalog() {
    let mut catalog = Catalog::open_in_memory().unwrap();
    let author = catalog
        .authors()
        .unwrap()
        .create(&NameDraft::new("Taras Shevchenko"))
        .unwrap();
    let genre = catalog
        .genres()
        .unwrap()
        .create(&NameDraft::new("Poetry"))
        .unwrap();

    let mut draft = PublicationDraft::new("  Kobzar ", PublicationKind::Book);
    draft.year = Some(1840);
    draft.author_ids = vec![author.id];
    draft.genre_ids = vec![genre.id];

    let mut publications = catalog.publications().unwrap();
    let created = publications.create(&draft).unwrap();
    assert_eq!(created.title, "Kobzar");
    assert_eq!(created.authors, vec![author.clone()]);
    assert_eq!(created.genres, vec![genre]);

    draft.genre_ids.clear();
    draft.kind = PublicationKind::Periodical;
    let updated = publications.update(created.id, &draft).unwrap();
    assert_eq!(updated.kind, PublicationKind::Periodical);
    assert!(updated.genres.is_empty());
    assert_eq!(updated.authors, vec![author]);

    assert_eq!(publications.list().unwrap().len(), 1);
    assert_eq!(
        publications
            .search(&PublicationQuery::by_title("obz"))
            .unwrap()
            .len(),
        1
    );
    assert!(publications.delete(created.id).unwrap());
    assert_eq!(publications.count().unwrap(), 0);
}

#[test]
fn publication_service_maps_errors() {
    let mut catalog = Catalog::open_in_memory().unwrap();
    let mut publications = catalog.publications().unwrap();

    let err = publications
        .create(&PublicationDraft::new(" ", PublicationKind::Book))
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Validation(DraftValidationError::BlankTitle)
    ));

    let err = publications
        .update(3, &PublicationDraft::new("Eneida", PublicationKind::Book))
        .unwrap_err();
    assert!(matches!(
        err,
        ServiceError::NotFound {
            table: "publications",
            id: 3
        }
    ));

    let mut draft = PublicationDraft::new("Eneida", PublicationKind::Book);
    draft.author_ids = vec![17];
    let err = publications.create(&draft).unwrap_err();
    assert!(matches!(
        err,
        ServiceError::Repo(RepoError::ReferenceError {
            table: "authors",
            id: Some(17)
        })
    ));
}

#[test]
fn catalog_search_sees_publication_writes() {
    let mut catalog = Catalog::open_in_memory().unwrap();
    catalog
        .publications()
        .unwrap()
        .create(&PublicationDraft::new("Lisova pisnia", PublicationKind::Book))
        .unwrap();

    let hits = catalog.search(&PublicationQuery::by_title("pisnia")).unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].title, "Lisova pisnia");
}

#[test]
fn catalog_persists_between_opens() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("catalog.db");

    {
        let catalog = Catalog::open(&path).unwrap();
        catalog
            .genres()
            .unwrap()
            .create(&NameDraft::new("Satire"))
            .unwrap();
    }

    let catalog = Catalog::open(&path).unwrap();
    let genres = catalog.genres().unwrap().list_all().unwrap();
    assert_eq!(genres.len(), 1);
    assert_eq!(genres[0].name, "Satire");
}
