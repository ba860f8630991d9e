//! Catalog reconciliation passes and run orchestration.
//!
//! # Responsibility
//! - Decide, per incoming record, between insert, skip, and enrichment.
//! - Keep per-pass failure policy in one place: build-system errors are
//!   fatal, metadata and curated failures degrade to "pass did nothing".
//!
//! # Invariants
//! - At most one catalog entry per package name (lookup before insert).
//! - A real summary is never overwritten by `''` or the sentinel.
//! - Exactly one commit per run, issued by the run controller.

pub mod backfill;
pub mod curated;
pub mod import_packages;
pub mod run;
