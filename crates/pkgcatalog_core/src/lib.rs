//! Core reconciliation logic for the package catalog updater.
//! This crate is the single source of truth for import/backfill invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod reconcile;
pub mod repo;
pub mod source;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::package::{normalize_package_name, Package, NO_SUMMARY_SENTINEL};
pub use reconcile::run::{run_update, RunOptions, RunReport, UpdateError, UpdateSources};
pub use repo::package_repo::{PackageRepository, RepoError, RepoResult, SqlitePackageRepository};
pub use source::{SourceError, SourceResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
