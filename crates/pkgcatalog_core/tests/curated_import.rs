use pkgcatalog_core::db::open_db_in_memory;
use pkgcatalog_core::reconcile::curated::import_curated_apps;
use pkgcatalog_core::source::curated::{CuratedRecord, CuratedSource};
use pkgcatalog_core::{Package, PackageRepository, SourceError, SourceResult, SqlitePackageRepository};

struct StaticCurated {
    records: Vec<CuratedRecord>,
}

impl StaticCurated {
    fn with_records(entries: &[(&str, &str)]) -> Self {
        Self {
            records: entries
                .iter()
                .map(|(name, summary)| CuratedRecord {
                    name: name.to_string(),
                    summary: summary.to_string(),
                })
                .collect(),
        }
    }
}

impl CuratedSource for StaticCurated {
    fn fetch(&self) -> SourceResult<Vec<CuratedRecord>> {
        Ok(self.records.clone())
    }
}

struct FailingCurated;

impl CuratedSource for FailingCurated {
    fn fetch(&self) -> SourceResult<Vec<CuratedRecord>> {
        Err(SourceError::fetch("curated_apps", "503 service unavailable"))
    }
}

#[test]
fn inserts_new_records_with_summary_verbatim() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePackageRepository::try_new(&conn).unwrap();
    let source = StaticCurated::with_records(&[("shotwell", "Photo organizer")]);

    let count = import_curated_apps(&repo, Some(&source)).unwrap();

    assert_eq!(count, 1);
    let package = repo.find_by_name("shotwell").unwrap().unwrap();
    assert_eq!(package.summary, "Photo organizer");
}

#[test]
fn existing_package_summary_is_never_overwritten() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePackageRepository::try_new(&conn).unwrap();
    repo.insert(&Package::with_summary("gimp", "Original summary"))
        .unwrap();
    let source = StaticCurated::with_records(&[("gimp", "Curated summary")]);

    let count = import_curated_apps(&repo, Some(&source)).unwrap();

    assert_eq!(count, 0);
    let package = repo.find_by_name("gimp").unwrap().unwrap();
    assert_eq!(package.summary, "Original summary");
}

#[test]
fn existing_empty_summary_is_also_left_alone() {
    // First writer wins applies to presence, not summary quality: a package
    // already imported from the build system is skipped even while empty.
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePackageRepository::try_new(&conn).unwrap();
    repo.insert(&Package::new("gimp")).unwrap();
    let source = StaticCurated::with_records(&[("gimp", "Curated summary")]);

    let count = import_curated_apps(&repo, Some(&source)).unwrap();

    assert_eq!(count, 0);
    assert!(repo.find_by_name("gimp").unwrap().unwrap().summary.is_empty());
}

#[test]
fn absent_source_is_a_noop() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePackageRepository::try_new(&conn).unwrap();

    let count = import_curated_apps(&repo, None).unwrap();

    assert_eq!(count, 0);
    assert_eq!(repo.count().unwrap(), 0);
}

#[test]
fn fetch_failure_is_swallowed() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqlitePackageRepository::try_new(&conn).unwrap();

    let count = import_curated_apps(&repo, Some(&FailingCurated)).unwrap();

    assert_eq!(count, 0);
    assert_eq!(repo.count().unwrap(), 0);
}
