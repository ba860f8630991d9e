//! External source adapters for catalog reconciliation.
//!
//! # Responsibility
//! - Define the trait seams each reconciliation pass consumes.
//! - Keep HTTP/file transport details out of the reconciliation logic.
//!
//! # Invariants
//! - Adapters never touch the catalog; they only produce records.
//! - Availability is reported up front where a source is optional, so
//!   passes branch on capability instead of catching transport errors.

use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod build_system;
pub mod curated;
pub mod metadata;

pub type SourceResult<T> = Result<T, SourceError>;

/// Transport/parse error taxonomy shared by all source adapters.
#[derive(Debug)]
pub enum SourceError {
    /// The source could not be reached at all.
    Unavailable { source: &'static str, reason: String },
    /// The source answered but the payload could not be retrieved.
    Fetch { source: &'static str, reason: String },
    /// The payload was retrieved but could not be parsed.
    Parse { source: &'static str, reason: String },
}

impl SourceError {
    pub fn unavailable(source: &'static str, reason: impl Into<String>) -> Self {
        Self::Unavailable {
            source,
            reason: reason.into(),
        }
    }

    pub fn fetch(source: &'static str, reason: impl Into<String>) -> Self {
        Self::Fetch {
            source,
            reason: reason.into(),
        }
    }

    pub fn parse(source: &'static str, reason: impl Into<String>) -> Self {
        Self::Parse {
            source,
            reason: reason.into(),
        }
    }
}

impl Display for SourceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable { source, reason } => {
                write!(f, "source `{source}` is unavailable: {reason}")
            }
            Self::Fetch { source, reason } => {
                write!(f, "fetch from source `{source}` failed: {reason}")
            }
            Self::Parse { source, reason } => {
                write!(f, "payload from source `{source}` failed to parse: {reason}")
            }
        }
    }
}

impl Error for SourceError {}
