//! Package domain model.
//!
//! # Responsibility
//! - Define the canonical catalog record keyed by package name.
//! - Provide the summary conventions shared by import and backfill passes.
//!
//! # Invariants
//! - `name` is the stable identity and is never rewritten once created.
//! - `summary` is monotonic in information: a real summary is never
//!   replaced by `""` or the sentinel by this subsystem.

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;

/// Placeholder summary meaning "checked against local metadata, nothing
/// found yet". Distinct from `""` ("never checked") only in intent; both
/// mark a package as a backfill candidate.
pub const NO_SUMMARY_SENTINEL: &str = "(no summary)";

/// Canonical catalog record for one software package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    /// Unique package name, case-sensitive exact match.
    pub name: String,
    /// Human-readable summary. `""` or [`NO_SUMMARY_SENTINEL`] mean no
    /// usable summary yet.
    pub summary: String,
}

impl Package {
    /// Creates a package imported from the build system: name only, summary
    /// explicitly empty until a later pass enriches it.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            summary: String::new(),
        }
    }

    /// Creates a package that arrives with its summary pre-populated, as
    /// curated application records do.
    pub fn with_summary(name: impl Into<String>, summary: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            summary: summary.into(),
        }
    }

    /// Returns whether this package is a backfill candidate.
    pub fn needs_summary(&self) -> bool {
        self.summary.is_empty() || self.summary == NO_SUMMARY_SENTINEL
    }
}

/// Normalizes a package name to Unicode NFC before lookup/insert.
///
/// Build-system names can arrive in mixed composition forms; canonicalizing
/// here prevents encoding-based duplicate entries for the same name.
pub fn normalize_package_name(name: &str) -> String {
    name.nfc().collect()
}
