//! Git subprocess facade for the Docweaver publishing engine.
//!
//! This crate is the only component that touches the VCS binary. It provides:
//!
//! - [`Vcs`] trait with the four operations the publishers need:
//!   clone, pull, tag listing and remote-url lookup
//! - [`GitRunner`] implementation wrapping the `git` binary with captured
//!   output and a per-command timeout
//! - [`MockVcs`] for testing (behind the `mock` feature flag)
//!
//! Failures surface as typed [`GitError`] values carrying the command line
//! and the subprocess's captured output; callers decide whether a failure is
//! fatal (trunk clone/pull) or recoverable (an individual tag).

mod error;
#[cfg(feature = "mock")]
mod mock;
mod runner;

pub use error::GitError;
#[cfg(feature = "mock")]
pub use mock::MockVcs;
pub use runner::{GitRunner, Vcs};

/// Remote name used when none is configured.
pub const DEFAULT_REMOTE: &str = "origin";
