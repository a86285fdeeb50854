//! VCS error types.

use std::time::Duration;

/// Error returned by VCS operations.
#[derive(Debug, thiserror::Error)]
pub enum GitError {
    /// The subprocess exited with a non-zero status.
    #[error("`{command}` failed: {output}")]
    Failed {
        /// Full command line that was executed.
        command: String,
        /// Captured stderr (falling back to stdout).
        output: String,
    },

    /// The subprocess did not finish within the configured timeout.
    #[error("`{command}` timed out after {timeout:?}")]
    TimedOut {
        /// Full command line that was executed.
        command: String,
        /// Timeout that was exceeded.
        timeout: Duration,
    },

    /// The subprocess could not be spawned or waited on.
    #[error("failed to run `{command}`: {source}")]
    Io {
        /// Full command line that was attempted.
        command: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl GitError {
    /// Full command line of the failed invocation.
    #[must_use]
    pub fn command(&self) -> &str {
        match self {
            Self::Failed { command, .. }
            | Self::TimedOut { command, .. }
            | Self::Io { command, .. } => command,
        }
    }
}
