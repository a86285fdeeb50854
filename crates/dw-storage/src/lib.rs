//! Filesystem abstraction for the Docweaver publishing engine.
//!
//! This crate provides a [`Filesystem`] trait covering the directory and file
//! operations the publishing pipeline needs: directory checks, creation,
//! enumeration, modification times, file reads and recursive copies. This
//! enables:
//!
//! - **Unit testing** the publishers without touching the real filesystem
//! - **Clean separation** between reconciliation logic and I/O operations
//!
//! # Architecture
//!
//! The crate provides:
//! - [`Filesystem`] trait
//! - [`DiskFilesystem`] implementation backed by `std::fs`
//! - [`MockFilesystem`] for testing (behind the `mock` feature flag)

mod disk;
mod error;
mod filesystem;
#[cfg(feature = "mock")]
mod mock;

pub use disk::DiskFilesystem;
pub use error::{StorageError, StorageErrorKind};
pub use filesystem::Filesystem;
#[cfg(feature = "mock")]
pub use mock::MockFilesystem;
