//! Publishing and version reconciliation engine for Docweaver.
//!
//! This crate reconciles on-disk product documentation against remote git
//! sources:
//!
//! - [`ProductPublisher`] publishes/updates all versions (tags plus the
//!   trunk branch) of a single product, deciding clone vs. pull and
//!   aggregating partial successes
//! - [`DocumentationPublisher`] orchestrates publishing across all products
//!   in a workspace, with best-effort sweep semantics for `update_all`
//! - [`PublishResult`] is the immutable outcome record returned by every
//!   publish/update operation at every layer
//!
//! # Failure semantics
//!
//! Errors cross layer boundaries only for workspace-level or trunk-level
//! failures (invalid directory, trunk clone/pull failed, metadata parse
//! failed). Per-tag and per-asset failures are caught where they occur and
//! folded into the [`PublishResult`] message list, so a single bad tag never
//! fails the whole publish.

mod documentation_publisher;
mod error;
mod product_publisher;
mod reporter;
mod result;

pub use documentation_publisher::DocumentationPublisher;
pub use error::PublishError;
pub use product_publisher::ProductPublisher;
pub use reporter::{NullReporter, Reporter};
pub use result::PublishResult;
