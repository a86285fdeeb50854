//! The [`ProductMaker`] factory.

use std::path::Path;
use std::sync::Arc;

use dw_storage::Filesystem;

use crate::error::ProductError;
use crate::metadata::{META_FILENAME, ProductMetadata};
use crate::product::{Product, UNKNOWN_VERSION};

/// Settings controlling version and asset URL resolution.
#[derive(Debug, Clone)]
pub struct ProductSettings {
    /// Allow non-numeric tags (e.g. `master`) as the default version.
    pub worded_default_allowed: bool,
    /// Public route prefix used to build asset URLs.
    pub route_prefix: String,
}

impl Default for ProductSettings {
    fn default() -> Self {
        Self {
            worded_default_allowed: false,
            route_prefix: "docs".to_owned(),
        }
    }
}

/// Validates a directory and constructs a fully-populated [`Product`].
pub struct ProductMaker {
    filesystem: Arc<dyn Filesystem>,
    settings: ProductSettings,
}

impl ProductMaker {
    /// Create a new factory bound to a filesystem backend.
    #[must_use]
    pub fn new(filesystem: Arc<dyn Filesystem>, settings: ProductSettings) -> Self {
        Self {
            filesystem,
            settings,
        }
    }

    /// Validate `directory` and build a populated [`Product`].
    ///
    /// The product key is the lowercased directory basename. Population
    /// scans immediate subdirectories as version tags and loads the default
    /// version's `.docweaver.yml` when present.
    ///
    /// # Errors
    ///
    /// Returns [`ProductError::InvalidDirectory`] if `directory` is not an
    /// existing directory, [`ProductError::Parsing`] if the metadata file is
    /// malformed, or a storage error if scanning fails.
    pub fn create(&self, directory: &Path) -> Result<Product, ProductError> {
        if !self.filesystem.is_dir(directory) {
            return Err(ProductError::InvalidDirectory(directory.to_path_buf()));
        }

        let key = directory
            .file_name()
            .map(|name| name.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        let mut product = Product::new(
            key,
            directory.to_path_buf(),
            self.settings.worded_default_allowed,
        );
        self.populate(&mut product)?;
        Ok(product)
    }

    fn populate(&self, product: &mut Product) -> Result<(), ProductError> {
        self.load_versions(product)?;
        self.load_metadata(product)
    }

    /// Scan immediate subdirectories as version tags.
    fn load_versions(&self, product: &mut Product) -> Result<(), ProductError> {
        let directory = product.directory().to_path_buf();
        let subdirs = self.filesystem.directories(&directory)?;

        let versions = subdirs
            .iter()
            .filter_map(|dir| dir.file_name())
            .map(|name| {
                let tag = name.to_string_lossy().into_owned();
                (tag.clone(), tag)
            })
            .collect();
        product.set_versions(versions);
        product.set_last_modified(self.filesystem.last_modified(&directory).ok());
        Ok(())
    }

    /// Load the default version's metadata file, when present.
    fn load_metadata(&self, product: &mut Product) -> Result<(), ProductError> {
        let default_version = product.default_version().to_owned();
        if default_version == UNKNOWN_VERSION {
            return Ok(());
        }

        let meta_path = product.directory().join(&default_version).join(META_FILENAME);
        if !self.filesystem.exists(&meta_path) {
            return Ok(());
        }

        let content = self.filesystem.read(&meta_path)?;
        let metadata =
            ProductMetadata::from_yaml(&content).map_err(|e| ProductError::Parsing {
                path: meta_path,
                message: e.to_string(),
            })?;
        tracing::debug!(product = product.key(), version = %default_version, "Loaded product metadata");

        if let Some(name) = metadata.name {
            product.set_name(name);
        }
        if metadata.description.is_some() {
            product.set_description(metadata.description);
        }
        if let Some(image_url) = metadata.image_url {
            let resolved = self.resolve_image_url(&image_url, product.key(), &default_version);
            product.set_image_url(Some(resolved));
        }
        Ok(())
    }

    /// Resolve relative image URLs against the product's public asset route.
    fn resolve_image_url(&self, url: &str, key: &str, version: &str) -> String {
        if url.starts_with("http://") || url.starts_with("https://") || url.starts_with('/') {
            return url.to_owned();
        }
        format!("/{}/{key}/{version}/{url}", self.settings.route_prefix)
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use dw_storage::MockFilesystem;
    use pretty_assertions::assert_eq;

    use super::*;

    fn maker(filesystem: MockFilesystem) -> ProductMaker {
        ProductMaker::new(Arc::new(filesystem), ProductSettings::default())
    }

    #[test]
    fn test_create_invalid_directory() {
        let result = maker(MockFilesystem::new()).create(Path::new("/docs/missing"));

        assert!(matches!(result, Err(ProductError::InvalidDirectory(_))));
    }

    #[test]
    fn test_create_derives_lowercase_key() {
        let fs = MockFilesystem::new().with_dir("/docs/Alpha");

        let product = maker(fs).create(Path::new("/docs/Alpha")).unwrap();

        assert_eq!(product.key(), "alpha");
        assert_eq!(product.name(), "alpha");
        assert_eq!(product.directory(), Path::new("/docs/Alpha"));
    }

    #[test]
    fn test_create_scans_versions_reverse_sorted() {
        let fs = MockFilesystem::new()
            .with_dir("/docs/alpha/master")
            .with_dir("/docs/alpha/1.0")
            .with_dir("/docs/alpha/2.0");

        let product = maker(fs).create(Path::new("/docs/alpha")).unwrap();

        assert_eq!(product.version_tags(), vec!["master", "2.0", "1.0"]);
        assert_eq!(product.default_version(), "2.0");
    }

    #[test]
    fn test_create_records_last_modified() {
        let fs = MockFilesystem::new()
            .with_dir("/docs/alpha")
            .with_mtime("/docs/alpha", 1_700_000_000.0);

        let product = maker(fs).create(Path::new("/docs/alpha")).unwrap();

        assert_eq!(product.last_modified(), Some(1_700_000_000.0));
    }

    #[test]
    fn test_metadata_overrides_display_fields() {
        let fs = MockFilesystem::new()
            .with_dir("/docs/alpha/master")
            .with_dir("/docs/alpha/2.0")
            .with_file(
                "/docs/alpha/2.0/.docweaver.yml",
                "name: Alpha\ndescription: Alpha docs\nimage_url: https://example.com/logo.png",
            );

        let product = maker(fs).create(Path::new("/docs/alpha")).unwrap();

        assert_eq!(product.name(), "Alpha");
        assert_eq!(product.description(), Some("Alpha docs"));
        assert_eq!(product.image_url(), Some("https://example.com/logo.png"));
    }

    #[test]
    fn test_metadata_read_from_default_version_only() {
        // Worded defaults disabled: default is 2.0, so the master metadata
        // file must be ignored.
        let fs = MockFilesystem::new()
            .with_dir("/docs/alpha/2.0")
            .with_file("/docs/alpha/master/.docweaver.yml", "name: FromMaster");

        let product = maker(fs).create(Path::new("/docs/alpha")).unwrap();

        assert_eq!(product.name(), "alpha");
    }

    #[test]
    fn test_malformed_metadata_surfaces_parsing_error() {
        let fs = MockFilesystem::new()
            .with_dir("/docs/alpha/1.0")
            .with_file("/docs/alpha/1.0/.docweaver.yml", "name: [broken");

        let result = maker(fs).create(Path::new("/docs/alpha"));

        match result {
            Err(ProductError::Parsing { path, .. }) => {
                assert_eq!(path, PathBuf::from("/docs/alpha/1.0/.docweaver.yml"));
            }
            other => panic!("expected Parsing error, got {other:?}"),
        }
    }

    #[test]
    fn test_relative_image_url_resolved_against_route_prefix() {
        let fs = MockFilesystem::new()
            .with_dir("/docs/alpha/1.0")
            .with_file("/docs/alpha/1.0/.docweaver.yml", "image_url: images/logo.png");

        let product = maker(fs).create(Path::new("/docs/alpha")).unwrap();

        assert_eq!(
            product.image_url(),
            Some("/docs/alpha/1.0/images/logo.png")
        );
    }

    #[test]
    fn test_no_metadata_file_is_fine() {
        let fs = MockFilesystem::new().with_dir("/docs/alpha/1.0");

        let product = maker(fs).create(Path::new("/docs/alpha")).unwrap();

        assert_eq!(product.name(), "alpha");
        assert!(product.description().is_none());
    }

    #[test]
    fn test_unknown_default_skips_metadata_lookup() {
        let fs = MockFilesystem::new().with_dir("/docs/alpha/develop");

        let product = maker(fs).create(Path::new("/docs/alpha")).unwrap();

        assert_eq!(product.default_version(), UNKNOWN_VERSION);
        assert_eq!(product.name(), "alpha");
    }
}
