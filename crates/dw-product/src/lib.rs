//! Product entity and factory for the Docweaver publishing engine.
//!
//! A **product** is one documented software artifact with one or more
//! published documentation versions, each living in a subdirectory of the
//! product's root folder:
//!
//! ```text
//! <workspace>/<product-key>/
//!     master/              (trunk branch working copy)
//!         .docweaver.yml   (optional metadata)
//!         *.md
//!     <tag>/
//!         *.md
//! ```
//!
//! The crate provides:
//! - [`Product`]: key, display metadata, version map and default-version
//!   resolution
//! - [`ProductMetadata`]: the optional `.docweaver.yml` sidecar file
//! - [`ProductMaker`]: factory that validates the directory, scans version
//!   subdirectories and loads metadata

mod error;
mod maker;
mod metadata;
mod product;

pub use error::ProductError;
pub use maker::{ProductMaker, ProductSettings};
pub use metadata::{MetadataError, ProductMetadata, META_FILENAME};
pub use product::{Product, UNKNOWN_VERSION};
