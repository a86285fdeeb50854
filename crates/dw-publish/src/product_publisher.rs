//! Per-product publish/update reconciliation.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use serde_json::json;

use dw_product::Product;
use dw_storage::Filesystem;
use dw_vcs::{DEFAULT_REMOTE, Vcs};

use crate::error::PublishError;
use crate::result::PublishResult;

/// Subdirectory of a version holding publishable images.
const ASSET_DIR_NAME: &str = "images";

/// Default trunk branch name.
const DEFAULT_TRUNK: &str = "master";

/// Reconciles one product's on-disk versions against its remote git source.
///
/// `publish` and `update` walk the same state machine: trunk reconciliation
/// first (clone when absent, pull when present), then tag reconciliation in
/// the order the remote lists them. Trunk failures during `publish` are
/// fatal; individual tag failures are recorded in the returned
/// [`PublishResult`] and never abort the operation.
pub struct ProductPublisher {
    vcs: Arc<dyn Vcs>,
    filesystem: Arc<dyn Filesystem>,
    trunk: String,
    assets_dir: Option<PathBuf>,
}

impl ProductPublisher {
    /// Create a publisher with the default trunk branch (`master`) and no
    /// asset destination.
    #[must_use]
    pub fn new(vcs: Arc<dyn Vcs>, filesystem: Arc<dyn Filesystem>) -> Self {
        Self {
            vcs,
            filesystem,
            trunk: DEFAULT_TRUNK.to_owned(),
            assets_dir: None,
        }
    }

    /// Use a different trunk branch name (e.g. `main`).
    #[must_use]
    pub fn with_trunk(mut self, trunk: impl Into<String>) -> Self {
        self.trunk = trunk.into();
        self
    }

    /// Publish version assets into this directory
    /// (`<assets_dir>/<product-key>/<version>`).
    #[must_use]
    pub fn with_assets_dir(mut self, assets_dir: impl Into<PathBuf>) -> Self {
        self.assets_dir = Some(assets_dir.into());
        self
    }

    /// Trunk branch name this publisher reconciles.
    #[must_use]
    pub fn trunk(&self) -> &str {
        &self.trunk
    }

    /// Publish all versions of `product` from `source`.
    ///
    /// Clones the trunk when absent, pulls it when present, then clones
    /// every remote tag that has no subdirectory yet. Existing tag
    /// directories are never re-cloned.
    ///
    /// # Errors
    ///
    /// Returns an error when the trunk clone or pull fails, since a stale or
    /// missing trunk implies a broken workspace. Tag failures do not error;
    /// they are folded into the result's messages.
    pub fn publish(&self, product: &Product, source: &str) -> Result<PublishResult, PublishError> {
        let started = Instant::now();
        let directory = product.directory();

        if !self.filesystem.is_dir(directory) || !self.filesystem.is_writable(directory) {
            return Ok(PublishResult::new()
                .with_error(format!(
                    "product directory {} is not writable",
                    directory.display()
                ))
                .with_extra("execution_time", json!(started.elapsed().as_secs_f64())));
        }

        let mut result = PublishResult::new();
        let mut published = Vec::new();
        let mut updated = Vec::new();

        let trunk_dir = directory.join(&self.trunk);
        if self.filesystem.is_dir(&trunk_dir) {
            self.update_version(product, &self.trunk)?;
            result = result.with_message(format!(
                "Updated version {} of {}.",
                self.trunk,
                product.name()
            ));
            updated.push(self.trunk.clone());
        } else {
            self.publish_version(product, source, &self.trunk)?;
            result = result.with_message(format!(
                "Published version {} of {}.",
                self.trunk,
                product.name()
            ));
            published.push(self.trunk.clone());
        }

        let tags = self
            .vcs
            .list_tags(&trunk_dir)
            .map_err(|e| PublishError::publication(product.name(), &self.trunk, e))?;

        let mut versions = vec![self.trunk.clone()];
        for tag in tags {
            versions.push(tag.clone());

            if self.filesystem.is_dir(&directory.join(&tag)) {
                result = result.with_message(format!(
                    "Version {tag} of {} already published.",
                    product.name()
                ));
                continue;
            }

            match self.publish_version(product, source, &tag) {
                Ok(()) => {
                    result = result
                        .with_message(format!("Published version {tag} of {}.", product.name()));
                    published.push(tag);
                }
                Err(err) => {
                    tracing::warn!(
                        product = product.key(),
                        version = %tag,
                        error = %err,
                        "Tag publication failed"
                    );
                    result = result.with_message(format!(
                        "Failed to publish version {tag} of {}: {err}",
                        product.name()
                    ));
                }
            }
        }

        Ok(result
            .with_message(format!("{} documentation published.", product.name()))
            .with_extra("versions", json!(versions))
            .with_extra("versions_published", json!(published))
            .with_extra("versions_updated", json!(updated))
            .with_extra("execution_time", json!(started.elapsed().as_secs_f64())))
    }

    /// Update an already-published product without re-supplying its source.
    ///
    /// The source is read back from the trunk working copy's remote.
    /// Published versions absent from the remote tag list are moving
    /// branches and get pulled; unpublished tags get cloned. Both kinds of
    /// per-version failure are recorded and skipped; unlike `publish`,
    /// nothing after the tag listing is fatal.
    ///
    /// # Errors
    ///
    /// Returns an error when the tag listing or remote lookup against the
    /// trunk working copy fails.
    pub fn update(&self, product: &Product) -> Result<PublishResult, PublishError> {
        let started = Instant::now();
        let trunk_dir = product.directory().join(&self.trunk);

        let published_versions: Vec<String> =
            product.version_tags().iter().map(|t| (*t).to_owned()).collect();
        let available_tags = self
            .vcs
            .list_tags(&trunk_dir)
            .map_err(|e| PublishError::publication(product.name(), &self.trunk, e))?;
        let source = self
            .vcs
            .remote_url(&trunk_dir, DEFAULT_REMOTE)
            .map_err(|e| PublishError::publication(product.name(), &self.trunk, e))?;

        let mut result = PublishResult::new();
        let mut published = Vec::new();
        let mut updated = Vec::new();

        // Published versions not present as remote tags are moving branches.
        for branch in published_versions
            .iter()
            .filter(|version| !available_tags.contains(*version))
        {
            match self.update_version(product, branch) {
                Ok(()) => {
                    result = result
                        .with_message(format!("Updated version {branch} of {}.", product.name()));
                    updated.push(branch.clone());
                }
                Err(err) => {
                    tracing::warn!(
                        product = product.key(),
                        version = %branch,
                        error = %err,
                        "Branch update failed"
                    );
                    result = result.with_message(format!(
                        "Failed to update version {branch} of {}: {err}",
                        product.name()
                    ));
                }
            }
        }

        for tag in available_tags
            .iter()
            .filter(|tag| !published_versions.contains(*tag))
        {
            match self.publish_version(product, &source, tag) {
                Ok(()) => {
                    result = result
                        .with_message(format!("Published version {tag} of {}.", product.name()));
                    published.push(tag.clone());
                }
                Err(err) => {
                    tracing::warn!(
                        product = product.key(),
                        version = %tag,
                        error = %err,
                        "Tag publication failed"
                    );
                    result = result.with_message(format!(
                        "Failed to publish version {tag} of {}: {err}",
                        product.name()
                    ));
                }
            }
        }

        let mut versions = published_versions;
        for tag in available_tags {
            if !versions.contains(&tag) {
                versions.push(tag);
            }
        }

        Ok(result
            .with_message(format!("{} documentation updated.", product.name()))
            .with_extra("versions", json!(versions))
            .with_extra("versions_published", json!(published))
            .with_extra("versions_updated", json!(updated))
            .with_extra("execution_time", json!(started.elapsed().as_secs_f64())))
    }

    /// Clone `version` into the product directory, then publish its assets.
    fn publish_version(
        &self,
        product: &Product,
        source: &str,
        version: &str,
    ) -> Result<(), PublishError> {
        self.vcs
            .clone_branch(source, version, product.directory())
            .map_err(|e| PublishError::publication(product.name(), version, e))?;
        self.publish_assets_logged(product, version);
        Ok(())
    }

    /// Pull `version`, then publish its assets.
    fn update_version(&self, product: &Product, version: &str) -> Result<(), PublishError> {
        self.vcs
            .pull(&product.directory().join(version))
            .map_err(|e| PublishError::update(product.name(), version, e))?;
        self.publish_assets_logged(product, version);
        Ok(())
    }

    /// Copy a version's image directory to the public asset destination.
    fn publish_assets(&self, product: &Product, version: &str) -> Result<usize, PublishError> {
        let Some(assets_dir) = &self.assets_dir else {
            return Ok(0);
        };

        let src = product.directory().join(version).join(ASSET_DIR_NAME);
        if !self.filesystem.is_dir(&src) {
            return Err(PublishError::InvalidAssetDirectory(src));
        }

        let dst = assets_dir.join(product.key()).join(version);
        self.filesystem
            .copy_dir(&src, &dst)
            .map_err(|e| PublishError::AssetPublication {
                product: product.name().to_owned(),
                version: version.to_owned(),
                source: e,
            })
    }

    /// Asset publication is a side effect: failures are logged, never fatal.
    fn publish_assets_logged(&self, product: &Product, version: &str) {
        match self.publish_assets(product, version) {
            Ok(_) => {}
            Err(err @ PublishError::InvalidAssetDirectory(_)) => {
                tracing::info!(product = product.key(), version, "{err}");
            }
            Err(err) => {
                tracing::error!(product = product.key(), version, error = %err, "Asset publication failed");
            }
        }
    }
}
