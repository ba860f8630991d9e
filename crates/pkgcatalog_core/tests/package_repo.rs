use pkgcatalog_core::db::open_db_in_memory;
use pkgcatalog_core::{Package, PackageRepository, RepoError, SqlitePackageRepository, NO_SUMMARY_SENTINEL};
use rusqlite::Connection;

#[test]
fn insert_and_find_roundtrip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePackageRepository::try_new(&conn).unwrap();

    repo.insert(&Package::new("bash")).unwrap();

    let found = repo.find_by_name("bash").unwrap().unwrap();
    assert_eq!(found.name, "bash");
    assert!(found.summary.is_empty());
    assert_eq!(repo.count().unwrap(), 1);
}

#[test]
fn find_missing_package_returns_none() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePackageRepository::try_new(&conn).unwrap();

    assert!(repo.find_by_name("nothing-here").unwrap().is_none());
}

#[test]
fn find_is_case_sensitive_exact_match() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePackageRepository::try_new(&conn).unwrap();

    repo.insert(&Package::new("bash")).unwrap();

    assert!(repo.find_by_name("Bash").unwrap().is_none());
    assert!(repo.find_by_name("bas").unwrap().is_none());
}

#[test]
fn list_needing_summary_selects_empty_and_sentinel_ordered_by_name() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePackageRepository::try_new(&conn).unwrap();

    repo.insert(&Package::new("zsh")).unwrap();
    repo.insert(&Package::with_summary("vim", "Vi improved"))
        .unwrap();
    repo.insert(&Package::with_summary("awk", NO_SUMMARY_SENTINEL))
        .unwrap();

    let candidates = repo.list_needing_summary().unwrap();
    let names: Vec<&str> = candidates.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, ["awk", "zsh"]);
}

#[test]
fn set_summary_updates_existing_package() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePackageRepository::try_new(&conn).unwrap();

    repo.insert(&Package::new("bash")).unwrap();
    repo.set_summary("bash", "The GNU Bourne Again shell")
        .unwrap();

    let found = repo.find_by_name("bash").unwrap().unwrap();
    assert_eq!(found.summary, "The GNU Bourne Again shell");
    assert!(repo.list_needing_summary().unwrap().is_empty());
}

#[test]
fn set_summary_for_missing_package_returns_not_found() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePackageRepository::try_new(&conn).unwrap();

    let err = repo.set_summary("ghost", "summary").unwrap_err();
    assert!(matches!(err, RepoError::NotFound(name) if name == "ghost"));
}

#[test]
fn duplicate_insert_is_rejected_by_storage() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePackageRepository::try_new(&conn).unwrap();

    repo.insert(&Package::new("bash")).unwrap();
    assert!(repo.insert(&Package::new("bash")).is_err());
}

#[test]
fn repository_rejects_uninitialized_connection() {
    let conn = Connection::open_in_memory().unwrap();

    let result = SqlitePackageRepository::try_new(&conn);
    match result {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert!(expected_version > 0),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn repository_rejects_connection_without_packages_table() {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(&format!(
        "PRAGMA user_version = {};",
        pkgcatalog_core::db::migrations::latest_version()
    ))
    .unwrap();

    let result = SqlitePackageRepository::try_new(&conn);
    assert!(matches!(
        result,
        Err(RepoError::MissingRequiredTable("packages"))
    ));
}
