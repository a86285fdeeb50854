//! Workspace-level publishing orchestration.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use serde_json::json;

use dw_product::ProductMaker;
use dw_storage::Filesystem;

use crate::error::PublishError;
use crate::product_publisher::ProductPublisher;
use crate::reporter::{NullReporter, Reporter};
use crate::result::PublishResult;

/// Publishes and updates all products under one workspace directory.
///
/// Each immediate subdirectory of the workspace is one product, named by
/// its lowercased basename. Construction ensures the workspace exists and
/// is writable; per-product directories are created on first publish.
pub struct DocumentationPublisher {
    workspace: PathBuf,
    filesystem: Arc<dyn Filesystem>,
    maker: ProductMaker,
    publisher: ProductPublisher,
    reporter: Arc<dyn Reporter>,
}

impl DocumentationPublisher {
    /// Bind a publisher to a workspace directory, creating it when missing.
    ///
    /// # Errors
    ///
    /// Returns [`PublishError::Workspace`] when the workspace cannot be
    /// created or is not writable.
    pub fn new(
        workspace: impl Into<PathBuf>,
        filesystem: Arc<dyn Filesystem>,
        maker: ProductMaker,
        publisher: ProductPublisher,
    ) -> Result<Self, PublishError> {
        let workspace = workspace.into();
        if !filesystem.is_dir(&workspace) {
            filesystem.make_dir(&workspace).map_err(|err| {
                tracing::error!(workspace = %workspace.display(), error = %err, "Workspace creation failed");
                PublishError::Workspace(workspace.clone())
            })?;
        }
        if !filesystem.is_writable(&workspace) {
            return Err(PublishError::Workspace(workspace));
        }

        Ok(Self {
            workspace,
            filesystem,
            maker,
            publisher,
            reporter: Arc::new(NullReporter),
        })
    }

    /// Attach a progress reporter. Defaults to [`NullReporter`].
    #[must_use]
    pub fn with_reporter(mut self, reporter: Arc<dyn Reporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// The workspace root this publisher operates on.
    #[must_use]
    pub fn workspace(&self) -> &Path {
        &self.workspace
    }

    /// Publish every version of `product_name` from the git `source`.
    ///
    /// Creates the product directory (lowercased name) when missing. A
    /// non-writable product directory yields a failed result rather than an
    /// error, so sweeps over many products keep going.
    ///
    /// # Errors
    ///
    /// Returns an error when the directory cannot be created, product
    /// metadata is malformed, or the trunk clone/pull fails.
    pub fn publish(&self, product_name: &str, source: &str) -> Result<PublishResult, PublishError> {
        let started = Instant::now();
        let directory = self.product_directory(product_name);

        if !self.filesystem.is_dir(&directory) {
            self.filesystem.make_dir(&directory)?;
        }
        if !self.filesystem.is_writable(&directory) {
            return Ok(Self::not_writable_result(&directory, started));
        }

        let product = self.maker.create(&directory)?;
        let result = self.publisher.publish(&product, source)?;
        self.report(&result);

        Ok(result.with_extra("execution_time", json!(started.elapsed().as_secs_f64())))
    }

    /// Update every version of an already-published product.
    ///
    /// The git source is recovered from the trunk working copy's remote, so
    /// callers only name the product.
    ///
    /// # Errors
    ///
    /// Returns an error when the product was never published, its metadata
    /// is malformed, or the remote cannot be queried.
    pub fn update(&self, product_name: &str) -> Result<PublishResult, PublishError> {
        let started = Instant::now();
        let directory = self.product_directory(product_name);

        if !self.filesystem.is_writable(&directory) {
            return Ok(Self::not_writable_result(&directory, started));
        }

        let product = self.maker.create(&directory)?;
        let result = self.publisher.update(&product)?;
        self.report(&result);

        Ok(result.with_extra("execution_time", json!(started.elapsed().as_secs_f64())))
    }

    /// Update every product in the workspace, best effort.
    ///
    /// Each product is updated independently; failures are recorded in the
    /// returned result's messages and never stop the sweep. The result
    /// always reports success since a sweep has no single outcome.
    #[must_use]
    pub fn update_all(&self) -> PublishResult {
        let started = Instant::now();

        let directories = match self.filesystem.directories(&self.workspace) {
            Ok(directories) => directories,
            Err(err) => {
                return PublishResult::new()
                    .with_error(format!(
                        "cannot list workspace {}: {err}",
                        self.workspace.display()
                    ))
                    .with_extra("execution_time", json!(started.elapsed().as_secs_f64()));
            }
        };

        let mut result = PublishResult::new();
        let mut products = Vec::new();
        let mut products_updated = Vec::new();

        for directory in directories {
            let Some(name) = directory.file_name() else {
                continue;
            };
            let name = name.to_string_lossy().into_owned();
            products.push(name.clone());

            match self.update(&name) {
                Ok(updated) if updated.is_success() => {
                    result = result.with_message(format!("Updated {name}."));
                    products_updated.push(name);
                }
                Ok(updated) => {
                    result = result.with_message(format!(
                        "Failed to update {name}: {}",
                        updated.error().unwrap_or("unknown failure")
                    ));
                }
                Err(err) => {
                    tracing::error!(product = %name, error = %err, "Product update failed");
                    result = result.with_message(format!("Failed to update {name}: {err}"));
                }
            }
        }

        result
            .with_message(format!(
                "{} of {} products updated.",
                products_updated.len(),
                products.len()
            ))
            .with_extra("products", json!(products))
            .with_extra("products_updated", json!(products_updated))
            .with_extra("execution_time", json!(started.elapsed().as_secs_f64()))
    }

    fn product_directory(&self, product_name: &str) -> PathBuf {
        self.workspace.join(product_name.to_lowercase())
    }

    fn report(&self, result: &PublishResult) {
        for message in result.messages() {
            self.reporter.report(message);
        }
    }

    fn not_writable_result(directory: &Path, started: Instant) -> PublishResult {
        PublishResult::new()
            .with_error(format!(
                "product directory {} is not writable",
                directory.display()
            ))
            .with_extra("execution_time", json!(started.elapsed().as_secs_f64()))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use pretty_assertions::assert_eq;
    use serde_json::json;

    use dw_product::ProductSettings;
    use dw_storage::MockFilesystem;
    use dw_vcs::{MockVcs, Vcs};

    use super::*;

    const SOURCE: &str = "https://example.com/alpha.git";

    struct Recording(Mutex<Vec<String>>);

    impl Reporter for Recording {
        fn report(&self, line: &str) {
            self.0.lock().unwrap().push(line.to_owned());
        }
    }

    fn documentation_publisher(
        vcs: &Arc<MockVcs>,
        fs: &Arc<MockFilesystem>,
        workspace: &str,
    ) -> DocumentationPublisher {
        let filesystem = Arc::clone(fs) as Arc<dyn Filesystem>;
        let maker = ProductMaker::new(Arc::clone(&filesystem), ProductSettings::default());
        let publisher = ProductPublisher::new(
            Arc::clone(vcs) as Arc<dyn Vcs>,
            Arc::clone(&filesystem),
        );
        DocumentationPublisher::new(workspace, filesystem, maker, publisher).unwrap()
    }

    #[test]
    fn test_new_creates_missing_workspace() {
        let fs = Arc::new(MockFilesystem::new());
        let vcs = Arc::new(MockVcs::new());

        let publisher = documentation_publisher(&vcs, &fs, "/work");

        assert!(fs.is_dir(Path::new("/work")));
        assert_eq!(publisher.workspace(), Path::new("/work"));
    }

    #[test]
    fn test_new_rejects_read_only_workspace() {
        let fs: Arc<dyn Filesystem> = Arc::new(
            MockFilesystem::new()
                .with_dir("/work")
                .with_read_only("/work"),
        );
        let maker = ProductMaker::new(Arc::clone(&fs), ProductSettings::default());
        let publisher = ProductPublisher::new(Arc::new(MockVcs::new()), Arc::clone(&fs));

        let result = DocumentationPublisher::new("/work", fs, maker, publisher);

        assert!(matches!(result, Err(PublishError::Workspace(_))));
    }

    #[test]
    fn test_publish_creates_lowercased_product_directory() {
        let fs = Arc::new(MockFilesystem::new().with_dir("/work"));
        let vcs = Arc::new(MockVcs::new().with_tags(["1.0"]));

        let result = documentation_publisher(&vcs, &fs, "/work")
            .publish("Alpha", SOURCE)
            .unwrap();

        assert!(result.is_success());
        assert!(fs.is_dir(Path::new("/work/alpha")));
        assert_eq!(
            result.extra("versions_published"),
            Some(&json!(["master", "1.0"]))
        );
        assert!(result.extra("execution_time").is_some());
    }

    #[test]
    fn test_publish_reports_progress_lines() {
        let fs = Arc::new(MockFilesystem::new().with_dir("/work"));
        let vcs = Arc::new(MockVcs::new());
        let reporter = Arc::new(Recording(Mutex::new(Vec::new())));

        documentation_publisher(&vcs, &fs, "/work")
            .with_reporter(Arc::clone(&reporter) as Arc<dyn Reporter>)
            .publish("alpha", SOURCE)
            .unwrap();

        let lines = reporter.0.lock().unwrap().clone();
        assert_eq!(
            lines,
            vec![
                "Published version master of alpha.",
                "alpha documentation published.",
            ]
        );
    }

    #[test]
    fn test_publish_read_only_product_directory_fails_softly() {
        let fs = Arc::new(
            MockFilesystem::new()
                .with_dir("/work/alpha")
                .with_read_only("/work/alpha"),
        );
        let vcs = Arc::new(MockVcs::new());

        let result = documentation_publisher(&vcs, &fs, "/work")
            .publish("alpha", SOURCE)
            .unwrap();

        assert!(!result.is_success());
        assert!(result.error().unwrap().contains("not writable"));
        assert!(vcs.calls().is_empty());
    }

    #[test]
    fn test_update_recovers_source_from_remote() {
        let fs = Arc::new(MockFilesystem::new().with_dir("/work/alpha/master"));
        let vcs = Arc::new(
            MockVcs::new()
                .with_tags(["1.0"])
                .with_remote_url(SOURCE),
        );

        let result = documentation_publisher(&vcs, &fs, "/work")
            .update("alpha")
            .unwrap();

        assert!(result.is_success());
        assert_eq!(result.extra("versions_updated"), Some(&json!(["master"])));
        assert_eq!(result.extra("versions_published"), Some(&json!(["1.0"])));
        assert!(vcs.calls().contains(&"remote_url master origin".to_owned()));
    }

    #[test]
    fn test_update_unpublished_product_fails() {
        let fs = Arc::new(MockFilesystem::new().with_dir("/work"));
        let vcs = Arc::new(MockVcs::new());

        let result = documentation_publisher(&vcs, &fs, "/work").update("ghost");

        // Directory never created, so it is not writable.
        assert!(!result.unwrap().is_success());
    }

    #[test]
    fn test_update_all_sweeps_every_product() {
        let fs = Arc::new(
            MockFilesystem::new()
                .with_dir("/work/alpha/master")
                .with_dir("/work/beta/master"),
        );
        let vcs = Arc::new(MockVcs::new().with_remote_url(SOURCE));

        let result = documentation_publisher(&vcs, &fs, "/work").update_all();

        assert!(result.is_success());
        assert_eq!(result.extra("products"), Some(&json!(["alpha", "beta"])));
        assert_eq!(
            result.extra("products_updated"),
            Some(&json!(["alpha", "beta"]))
        );
        assert!(
            result
                .messages()
                .iter()
                .any(|m| m == "2 of 2 products updated.")
        );
    }

    #[test]
    fn test_update_all_isolates_per_product_failures() {
        let fs = Arc::new(
            MockFilesystem::new()
                .with_dir("/work/alpha/master")
                .with_dir("/work/beta/master")
                .with_read_only("/work/beta"),
        );
        let vcs = Arc::new(MockVcs::new().with_remote_url(SOURCE));

        let result = documentation_publisher(&vcs, &fs, "/work").update_all();

        assert!(result.is_success());
        assert_eq!(result.extra("products_updated"), Some(&json!(["alpha"])));
        assert!(
            result
                .messages()
                .iter()
                .any(|m| m.starts_with("Failed to update beta"))
        );
        assert!(
            result
                .messages()
                .iter()
                .any(|m| m == "1 of 2 products updated.")
        );
    }

    #[test]
    fn test_update_all_empty_workspace() {
        let fs = Arc::new(MockFilesystem::new().with_dir("/work"));
        let vcs = Arc::new(MockVcs::new());

        let result = documentation_publisher(&vcs, &fs, "/work").update_all();

        assert!(result.is_success());
        assert_eq!(result.extra("products"), Some(&json!([])));
        assert!(
            result
                .messages()
                .iter()
                .any(|m| m == "0 of 0 products updated.")
        );
    }
}
