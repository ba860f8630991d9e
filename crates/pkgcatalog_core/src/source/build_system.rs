//! Build-system source adapter.
//!
//! # Responsibility
//! - Expose the authoritative package list and per-package tag config.
//! - Map transport failures to `SourceError::Unavailable` so the import
//!   pass can treat them as fatal.
//!
//! # Invariants
//! - `package_config` returning `Some` means the package carries the
//!   queried tag and must be skipped by the import pass.

use crate::source::{SourceError, SourceResult};
use serde::Deserialize;

const SOURCE_NAME: &str = "build_system";

/// Build-system tag identifier.
pub type TagId = i64;
/// Build-system package identifier.
pub type PackageId = i64;

/// One package as listed by the build system.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BuildPackage {
    pub package_name: String,
    pub package_id: PackageId,
}

/// Tag configuration reported for one package, present only when the
/// package carries the queried tag.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TagStatus {
    pub tag_id: TagId,
    pub package_id: PackageId,
}

/// Source of authoritative package names.
///
/// The build system is the only source the run cannot do without; both
/// operations propagate errors instead of degrading.
pub trait BuildSystemSource {
    /// Returns the full package list known to the build system.
    fn list_packages(&self) -> SourceResult<Vec<BuildPackage>>;
    /// Returns the tag configuration for one package, or `None` when the
    /// package does not carry the tag.
    fn package_config(&self, tag_id: TagId, package_id: PackageId)
        -> SourceResult<Option<TagStatus>>;
}

/// HTTP/JSON client for a build-system hub.
///
/// Endpoints:
/// - `GET {base}/packages` -> JSON array of [`BuildPackage`]
/// - `GET {base}/packages/{id}/config?tag={tag}` -> [`TagStatus`] or 404
pub struct HttpBuildSystemSource {
    base_url: String,
    client: reqwest::blocking::Client,
}

impl HttpBuildSystemSource {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client: reqwest::blocking::Client::new(),
        }
    }

    fn get_text(&self, url: &str) -> SourceResult<String> {
        let response = self
            .client
            .get(url)
            .send()
            .map_err(|err| SourceError::unavailable(SOURCE_NAME, err.to_string()))?;
        let response = response
            .error_for_status()
            .map_err(|err| SourceError::fetch(SOURCE_NAME, err.to_string()))?;
        response
            .text()
            .map_err(|err| SourceError::fetch(SOURCE_NAME, err.to_string()))
    }
}

impl BuildSystemSource for HttpBuildSystemSource {
    fn list_packages(&self) -> SourceResult<Vec<BuildPackage>> {
        let url = format!("{}/packages", self.base_url);
        let body = self.get_text(&url)?;
        serde_json::from_str(&body).map_err(|err| SourceError::parse(SOURCE_NAME, err.to_string()))
    }

    fn package_config(
        &self,
        tag_id: TagId,
        package_id: PackageId,
    ) -> SourceResult<Option<TagStatus>> {
        let url = format!(
            "{}/packages/{}/config?tag={}",
            self.base_url, package_id, tag_id
        );

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(|err| SourceError::unavailable(SOURCE_NAME, err.to_string()))?;

        // Absence of the tag config is a routine answer, not an error.
        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let response = response
            .error_for_status()
            .map_err(|err| SourceError::fetch(SOURCE_NAME, err.to_string()))?;
        let body = response
            .text()
            .map_err(|err| SourceError::fetch(SOURCE_NAME, err.to_string()))?;
        let status: TagStatus = serde_json::from_str(&body)
            .map_err(|err| SourceError::parse(SOURCE_NAME, err.to_string()))?;
        Ok(Some(status))
    }
}
