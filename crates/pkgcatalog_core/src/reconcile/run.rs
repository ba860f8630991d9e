//! Run controller: pass sequencing and the single commit point.
//!
//! # Responsibility
//! - Run the three reconciliation passes strictly in order inside one
//!   transaction and commit exactly once at the end.
//! - Abort before commit when the build-system pass fails.
//!
//! # Invariants
//! - No partial commit between passes: dropping the transaction on the
//!   fatal path rolls back everything staged in this run.
//! - The next run redoes the same reconciliation, so losing a run's work
//!   is acceptable; committing half a run is not.

use crate::db::DbError;
use crate::reconcile::backfill::{backfill_summaries, BackfillOutcome};
use crate::reconcile::curated::import_curated_apps;
use crate::reconcile::import_packages::import_new_packages;
use crate::repo::package_repo::{RepoError, SqlitePackageRepository};
use crate::source::build_system::{BuildSystemSource, TagId};
use crate::source::curated::CuratedSource;
use crate::source::metadata::LocalMetadataSource;
use crate::source::SourceError;
use log::info;
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Default bypass tag: packages carrying this build-system tag are
/// documentation-only trees that must never enter the catalog.
pub const DEFAULT_BYPASS_TAG: TagId = 230;

/// Options for one update run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Maximum summaries to backfill; `0` means no limit.
    pub summaries_to_process: usize,
    /// Build-system tag whose packages are skipped on import.
    pub bypass_tag: TagId,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            summaries_to_process: 0,
            bypass_tag: DEFAULT_BYPASS_TAG,
        }
    }
}

/// Source adapters consumed by one update run.
pub struct UpdateSources<'a> {
    pub build_system: &'a dyn BuildSystemSource,
    pub metadata: &'a dyn LocalMetadataSource,
    /// `None` when no curated URL was configured.
    pub curated: Option<&'a dyn CuratedSource>,
}

/// Aggregated counts reported by one update run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunReport {
    /// Packages inserted by the build-system pass.
    pub new_packages: usize,
    /// Outcome of the backfill pass.
    pub backfill: BackfillOutcome,
    /// Packages inserted by the curated pass.
    pub curated_apps: usize,
}

/// Fatal error terminating an update run before commit.
#[derive(Debug)]
pub enum UpdateError {
    Source(SourceError),
    Repo(RepoError),
    Db(DbError),
}

impl Display for UpdateError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Source(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
        }
    }
}

impl Error for UpdateError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Source(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::Db(err) => Some(err),
        }
    }
}

impl From<SourceError> for UpdateError {
    fn from(value: SourceError) -> Self {
        Self::Source(value)
    }
}

impl From<RepoError> for UpdateError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<DbError> for UpdateError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for UpdateError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Runs one full reconciliation: import, backfill, curated import, commit.
///
/// All three passes share one transaction built here; the repository only
/// stages mutations and the `commit` at the end is the sole durability
/// point. A build-system failure returns before commit and rolls back.
pub fn run_update(
    conn: &mut Connection,
    sources: &UpdateSources<'_>,
    options: &RunOptions,
) -> Result<RunReport, UpdateError> {
    info!(
        "event=run_update module=reconcile status=start quota={} bypass_tag={}",
        options.summaries_to_process, options.bypass_tag
    );

    let tx = conn.transaction()?;
    let report = {
        let repo = SqlitePackageRepository::try_new(&tx)?;

        let new_packages = import_new_packages(&repo, sources.build_system, options.bypass_tag)?;
        let backfill =
            backfill_summaries(&repo, sources.metadata, options.summaries_to_process)?;
        let curated_apps = import_curated_apps(&repo, sources.curated)?;

        RunReport {
            new_packages,
            backfill,
            curated_apps,
        }
    };
    tx.commit()?;

    info!(
        "event=run_update module=reconcile status=ok new_packages={} enriched={} curated_apps={}",
        report.new_packages, report.backfill.enriched, report.curated_apps
    );
    Ok(report)
}
