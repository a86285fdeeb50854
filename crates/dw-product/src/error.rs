//! Product error types.

use std::path::PathBuf;

use dw_storage::StorageError;

/// Error returned by product construction and population.
#[derive(Debug, thiserror::Error)]
pub enum ProductError {
    /// The product path does not exist or is not a directory.
    #[error("invalid directory: {}", .0.display())]
    InvalidDirectory(PathBuf),

    /// The product metadata file is malformed.
    ///
    /// Never silently swallowed: a corrupt meta file indicates a product in
    /// a bad state.
    #[error("failed to parse {}: {message}", path.display())]
    Parsing {
        /// Path of the malformed metadata file.
        path: PathBuf,
        /// Parser diagnostic.
        message: String,
    },

    /// Underlying filesystem failure while scanning the product.
    #[error(transparent)]
    Storage(#[from] StorageError),
}
