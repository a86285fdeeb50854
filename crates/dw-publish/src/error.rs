//! Publishing error taxonomy.

use std::path::PathBuf;

use dw_product::ProductError;
use dw_storage::StorageError;
use dw_vcs::GitError;

/// Error returned by the publishing layers.
///
/// `Publication` and `Update` are fatal when raised for the trunk branch
/// during `publish` (they abort the whole product publish); for individual
/// tags and for branch pulls during `update` they are caught at the point
/// of occurrence and folded into the [`PublishResult`](crate::PublishResult).
#[derive(Debug, thiserror::Error)]
pub enum PublishError {
    /// The workspace root cannot be created or made writable.
    #[error("workspace directory {} cannot be made writable", .0.display())]
    Workspace(PathBuf),

    /// Product validation or metadata loading failed.
    #[error(transparent)]
    Product(#[from] ProductError),

    /// A version could not be published (cloned).
    #[error("failed to publish version {version} of {product}: {source}")]
    Publication {
        /// Product display name.
        product: String,
        /// Version tag or branch.
        version: String,
        /// Raw VCS failure.
        #[source]
        source: GitError,
    },

    /// A version could not be updated (pulled).
    ///
    /// Pulling a tag is expected to fail since tags are detached.
    #[error("failed to update version {version} of {product} (may be a tag): {source}")]
    Update {
        /// Product display name.
        product: String,
        /// Version tag or branch.
        version: String,
        /// Raw VCS failure.
        #[source]
        source: GitError,
    },

    /// Version assets could not be copied.
    #[error("failed to publish assets for version {version} of {product}: {source}")]
    AssetPublication {
        /// Product display name.
        product: String,
        /// Version tag or branch.
        version: String,
        /// Underlying filesystem failure.
        #[source]
        source: StorageError,
    },

    /// The version has no valid asset directory.
    #[error("invalid asset directory: {}", .0.display())]
    InvalidAssetDirectory(PathBuf),

    /// Underlying filesystem failure.
    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl PublishError {
    pub(crate) fn publication(product: &str, version: &str, source: GitError) -> Self {
        Self::Publication {
            product: product.to_owned(),
            version: version.to_owned(),
            source,
        }
    }

    pub(crate) fn update(product: &str, version: &str, source: GitError) -> Self {
        Self::Update {
            product: product.to_owned(),
            version: version.to_owned(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publication_display() {
        let err = PublishError::publication(
            "Alpha",
            "1.0",
            GitError::Failed {
                command: "git clone".to_owned(),
                output: "denied".to_owned(),
            },
        );

        assert_eq!(
            err.to_string(),
            "failed to publish version 1.0 of Alpha: `git clone` failed: denied"
        );
    }

    #[test]
    fn test_update_display_mentions_tag_hint() {
        let err = PublishError::update(
            "Alpha",
            "1.0",
            GitError::Failed {
                command: "git pull".to_owned(),
                output: "detached HEAD".to_owned(),
            },
        );

        assert!(err.to_string().contains("may be a tag"));
    }
}
