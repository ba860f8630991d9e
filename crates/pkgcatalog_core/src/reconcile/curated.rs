//! Curated application import pass.
//!
//! # Responsibility
//! - Insert curated `{name, summary}` records not yet cataloged, summary
//!   verbatim.
//! - Swallow every source failure: the curated list is best-effort and
//!   must not block the commit of earlier passes.
//!
//! # Invariants
//! - Existing packages keep their summary (first writer wins).

use crate::model::package::Package;
use crate::repo::package_repo::{PackageRepository, RepoResult};
use crate::source::curated::CuratedSource;
use log::{debug, error, info};

/// Imports curated application records.
///
/// `None` means no curated source was configured; the pass is a no-op.
/// Fetch/parse failures are logged and converted into a zero-record pass.
/// Returns the number of newly inserted packages.
pub fn import_curated_apps(
    repo: &impl PackageRepository,
    source: Option<&dyn CuratedSource>,
) -> RepoResult<usize> {
    let Some(source) = source else {
        info!("event=import_curated module=reconcile status=skipped reason=no_url");
        return Ok(0);
    };

    let records = match source.fetch() {
        Ok(records) => records,
        Err(err) => {
            error!(
                "event=import_curated module=reconcile status=error error={}",
                err
            );
            return Ok(0);
        }
    };

    let mut count = 0;
    for record in records {
        if repo.find_by_name(&record.name)?.is_none() {
            debug!(
                "event=import_curated module=reconcile status=insert name={}",
                record.name
            );
            repo.insert(&Package::with_summary(record.name, record.summary))?;
            count += 1;
        }
    }

    info!(
        "event=import_curated module=reconcile status=ok inserted={}",
        count
    );
    Ok(count)
}
