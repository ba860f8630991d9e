//! Build-system package import pass.
//!
//! # Responsibility
//! - Insert every build-system package name not yet cataloged, with an
//!   explicitly empty summary for later enrichment.
//! - Skip packages carrying the configured bypass tag entirely.
//!
//! # Invariants
//! - Names are NFC-normalized before lookup/insert.
//! - Existing entries are never touched; running twice is a no-op.
//! - Source errors propagate: the run cannot proceed without this pass.

use crate::model::package::{normalize_package_name, Package};
use crate::reconcile::run::UpdateError;
use crate::repo::package_repo::PackageRepository;
use crate::source::build_system::{BuildSystemSource, TagId};
use log::{debug, info};

/// Imports new packages from the build system.
///
/// Returns the number of newly inserted packages. These might not be in
/// local metadata yet, so summaries are left empty until the backfill pass.
pub fn import_new_packages(
    repo: &impl PackageRepository,
    source: &dyn BuildSystemSource,
    bypass_tag: TagId,
) -> Result<usize, UpdateError> {
    info!("event=import_packages module=reconcile status=start");

    let packages = source.list_packages()?;
    info!(
        "event=import_packages module=reconcile status=listed total={}",
        packages.len()
    );

    let mut count = 0;
    for package in packages {
        let name = normalize_package_name(&package.package_name);

        let tag_status = source.package_config(bypass_tag, package.package_id)?;
        if tag_status.is_some() {
            info!(
                "event=import_packages module=reconcile status=skipped name={} reason=bypass_tag tag_id={}",
                name, bypass_tag
            );
            continue;
        }

        if repo.find_by_name(&name)?.is_none() {
            debug!("event=import_packages module=reconcile status=insert name={name}");
            repo.insert(&Package::new(name))?;
            count += 1;
        }
    }

    info!(
        "event=import_packages module=reconcile status=ok inserted={}",
        count
    );
    Ok(count)
}
