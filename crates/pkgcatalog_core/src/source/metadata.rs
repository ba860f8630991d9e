//! Local package-metadata source adapter.
//!
//! # Responsibility
//! - Answer summary lookups against a local metadata dump.
//! - Report availability up front so the backfill pass can skip cleanly
//!   when the dump is missing or unreadable.
//!
//! # Invariants
//! - Sections are consulted in fixed priority order: installed, available,
//!   updates, extras.
//! - Within a section the first exact name match wins, in document order.

use crate::source::SourceResult;
use log::warn;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

const SOURCE_NAME: &str = "local_metadata";

/// Metadata sections in lookup priority order.
pub const SECTION_PRIORITY: &[MetadataSection] = &[
    MetadataSection::Installed,
    MetadataSection::Available,
    MetadataSection::Updates,
    MetadataSection::Extras,
];

/// One metadata sub-section of the local package index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetadataSection {
    Installed,
    Available,
    Updates,
    Extras,
}

impl MetadataSection {
    /// Stable section key used in the metadata document.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Installed => "installed",
            Self::Available => "available",
            Self::Updates => "updates",
            Self::Extras => "extras",
        }
    }
}

/// One `{name, summary}` entry inside a metadata section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MetadataEntry {
    pub name: String,
    pub summary: String,
}

/// Source of package summaries from locally installed/available metadata.
///
/// The source is optional: callers must check [`is_available`] before
/// relying on lookups, and a lookup miss is the empty string, not an error.
///
/// [`is_available`]: LocalMetadataSource::is_available
pub trait LocalMetadataSource {
    /// Reports whether the metadata index could be loaded at all.
    fn is_available(&self) -> bool;
    /// Returns the summary for an exact name match across all sections in
    /// priority order, or `""` when no section matches.
    fn summary_for(&self, name: &str) -> String;
}

/// Metadata source backed by a YAML dump of the local package index.
///
/// Document shape: a mapping from section key to a list of entries, e.g.
///
/// ```yaml
/// installed:
///   - name: bash
///     summary: The GNU Bourne Again shell
/// available: []
/// ```
pub struct FileMetadataSource {
    sections: Option<BTreeMap<String, Vec<MetadataEntry>>>,
}

impl FileMetadataSource {
    /// Loads the metadata dump from disk.
    ///
    /// A missing or unparseable file yields an unavailable source instead
    /// of an error; the backfill pass degrades by skipping.
    pub fn open(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) => {
                warn!(
                    "event=metadata_load module=source status=error path={} error={}",
                    path.display(),
                    err
                );
                return Self { sections: None };
            }
        };

        match Self::parse(&text) {
            Ok(source) => source,
            Err(err) => {
                warn!(
                    "event=metadata_load module=source status=error path={} error={}",
                    path.display(),
                    err
                );
                Self { sections: None }
            }
        }
    }

    /// Parses a metadata document from text.
    pub fn parse(text: &str) -> SourceResult<Self> {
        let sections: BTreeMap<String, Vec<MetadataEntry>> = serde_yaml::from_str(text)
            .map_err(|err| crate::source::SourceError::parse(SOURCE_NAME, err.to_string()))?;
        Ok(Self {
            sections: Some(sections),
        })
    }

    /// Builds an explicitly unavailable source.
    pub fn unavailable() -> Self {
        Self { sections: None }
    }
}

impl LocalMetadataSource for FileMetadataSource {
    fn is_available(&self) -> bool {
        self.sections.is_some()
    }

    fn summary_for(&self, name: &str) -> String {
        let Some(sections) = &self.sections else {
            return String::new();
        };

        for section in SECTION_PRIORITY {
            let Some(entries) = sections.get(section.as_str()) else {
                continue;
            };
            if let Some(entry) = entries.iter().find(|entry| entry.name == name) {
                return entry.summary.clone();
            }
        }

        String::new()
    }
}
