//! Summary backfill pass.
//!
//! # Responsibility
//! - Fill missing summaries for already-cataloged packages from local
//!   metadata, bounded by a per-run quota.
//! - Mark checked-but-unmatched packages with the sentinel summary.
//!
//! # Invariants
//! - Only packages with summary `''` or the sentinel are candidates.
//! - Only successful enrichments count toward the quota; sentinel writes
//!   do not.
//! - An unavailable metadata source leaves every package untouched.

use crate::model::package::NO_SUMMARY_SENTINEL;
use crate::repo::package_repo::{PackageRepository, RepoResult};
use crate::source::metadata::LocalMetadataSource;
use log::{debug, info, warn};

/// Result of one backfill pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BackfillOutcome {
    /// Packages that received a real summary.
    pub enriched: usize,
    /// Candidate packages at the start of the pass.
    pub candidates: usize,
    /// Whether the pass was skipped because metadata was unavailable.
    pub skipped: bool,
}

/// Backfills summaries for up to `quota` packages (`0` = no limit).
///
/// Packages imported from the build system exist for a while with an empty
/// summary before local metadata knows them; this pass periodically closes
/// that gap. Metadata lookups are slow, hence the quota.
///
/// The loop counts only successful enrichments and stops once `count >
/// quota`, so up to `quota + 1` packages can be enriched in one run. That
/// boundary is long-standing observable behavior and is preserved as is.
pub fn backfill_summaries(
    repo: &impl PackageRepository,
    source: &dyn LocalMetadataSource,
    quota: usize,
) -> RepoResult<BackfillOutcome> {
    if !source.is_available() {
        warn!("event=backfill module=reconcile status=skipped reason=metadata_unavailable");
        return Ok(BackfillOutcome {
            skipped: true,
            ..BackfillOutcome::default()
        });
    }

    let packages = repo.list_needing_summary()?;
    let candidates = packages.len();
    let quota = if quota == 0 { candidates } else { quota };
    info!(
        "event=backfill module=reconcile status=start candidates={} quota={}",
        candidates, quota
    );

    let mut count = 0;
    for package in packages {
        let summary = source.summary_for(&package.name);
        debug!(
            "event=backfill module=reconcile name={} found={}",
            package.name,
            !summary.is_empty()
        );

        if summary.is_empty() {
            repo.set_summary(&package.name, NO_SUMMARY_SENTINEL)?;
        } else {
            repo.set_summary(&package.name, &summary)?;
            count += 1;
        }

        if count > quota {
            break;
        }
    }

    info!(
        "event=backfill module=reconcile status=ok enriched={} candidates={}",
        count, candidates
    );
    Ok(BackfillOutcome {
        enriched: count,
        candidates,
        skipped: false,
    })
}
