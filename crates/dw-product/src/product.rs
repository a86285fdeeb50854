//! The [`Product`] entity.

use std::path::{Path, PathBuf};

/// Sentinel returned when no version qualifies as the default.
pub const UNKNOWN_VERSION: &str = "unknown";

/// One documented product and its discovered versions.
///
/// Constructed and populated by [`ProductMaker`](crate::ProductMaker); the
/// entity itself is plain data. Versions are kept reverse-sorted by tag so
/// the highest numeric tag comes first and `master`/`main` sort among them
/// lexically.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    key: String,
    name: String,
    description: Option<String>,
    image_url: Option<String>,
    directory: PathBuf,
    versions: Vec<(String, String)>,
    last_modified: Option<f64>,
    worded_default_allowed: bool,
}

impl Product {
    pub(crate) fn new(
        key: String,
        directory: PathBuf,
        worded_default_allowed: bool,
    ) -> Self {
        Self {
            name: key.clone(),
            key,
            description: None,
            image_url: None,
            directory,
            versions: Vec::new(),
            last_modified: None,
            worded_default_allowed,
        }
    }

    /// Lowercase identifier, unique within a workspace.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Display name (metadata override or the key).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Product description, if provided by metadata.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Product image URL, if provided by metadata.
    #[must_use]
    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref()
    }

    /// Absolute path to the product's root folder.
    #[must_use]
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// Version tag to display name pairs, reverse-sorted by tag.
    #[must_use]
    pub fn versions(&self) -> &[(String, String)] {
        &self.versions
    }

    /// Version tags in display order.
    #[must_use]
    pub fn version_tags(&self) -> Vec<&str> {
        self.versions.iter().map(|(tag, _)| tag.as_str()).collect()
    }

    /// Check whether a version tag is already published.
    #[must_use]
    pub fn has_version(&self, tag: &str) -> bool {
        self.versions.iter().any(|(t, _)| t == tag)
    }

    /// Modification time of the product directory, seconds since epoch.
    #[must_use]
    pub fn last_modified(&self) -> Option<f64> {
        self.last_modified
    }

    /// Resolve the default version.
    ///
    /// Iterates versions in their reverse-sorted order, skipping non-numeric
    /// tags unless worded defaults are allowed. Returns [`UNKNOWN_VERSION`]
    /// when nothing qualifies.
    #[must_use]
    pub fn default_version(&self) -> &str {
        for (tag, _) in &self.versions {
            if self.worded_default_allowed || is_numeric_tag(tag) {
                return tag;
            }
        }
        UNKNOWN_VERSION
    }

    pub(crate) fn set_versions(&mut self, mut versions: Vec<(String, String)>) {
        versions.sort_by(|a, b| b.0.cmp(&a.0));
        self.versions = versions;
    }

    pub(crate) fn set_last_modified(&mut self, mtime: Option<f64>) {
        self.last_modified = mtime;
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name = name;
    }

    pub(crate) fn set_description(&mut self, description: Option<String>) {
        self.description = description;
    }

    pub(crate) fn set_image_url(&mut self, image_url: Option<String>) {
        self.image_url = image_url;
    }
}

/// Check whether a tag is version-like: digits and dots only.
///
/// Multi-component tags such as `2.3.1` qualify.
fn is_numeric_tag(tag: &str) -> bool {
    !tag.is_empty()
        && tag.chars().any(|c| c.is_ascii_digit())
        && tag.chars().all(|c| c.is_ascii_digit() || c == '.')
}
