//! Mock VCS implementation for testing.
//!
//! Provides [`MockVcs`] for unit testing the publishers without a git
//! binary or network access.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Mutex;

use crate::error::GitError;
use crate::runner::Vcs;

/// Mock VCS for testing.
///
/// Records every call and can be configured to fail specific clones or
/// pulls. Use the builder methods to set up tag lists and remote URLs.
///
/// # Example
///
/// ```
/// use std::path::Path;
/// use dw_vcs::{MockVcs, Vcs};
///
/// let vcs = MockVcs::new().with_tags(["1.0", "2.0"]);
///
/// let tags = vcs.list_tags(Path::new("/docs/alpha/master")).unwrap();
/// assert_eq!(tags, vec!["1.0", "2.0"]);
/// assert_eq!(vcs.calls(), vec!["list_tags master"]);
/// ```
#[derive(Debug, Default)]
pub struct MockVcs {
    tags: Vec<String>,
    remote: Option<String>,
    failing_clones: HashSet<String>,
    failing_pulls: HashSet<String>,
    fail_tag_list: bool,
    calls: Mutex<Vec<String>>,
}

impl MockVcs {
    /// Create a new mock with no tags and no remote URL.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the tags returned by `list_tags`.
    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// Set the URL returned by `remote_url`.
    #[must_use]
    pub fn with_remote_url(mut self, url: impl Into<String>) -> Self {
        self.remote = Some(url.into());
        self
    }

    /// Make `clone_branch` fail for the given branch or tag name.
    #[must_use]
    pub fn with_failing_clone(mut self, branch: impl Into<String>) -> Self {
        self.failing_clones.insert(branch.into());
        self
    }

    /// Make `pull` fail when the working directory's basename matches.
    #[must_use]
    pub fn with_failing_pull(mut self, branch: impl Into<String>) -> Self {
        self.failing_pulls.insert(branch.into());
        self
    }

    /// Make `list_tags` fail.
    #[must_use]
    pub fn with_failing_tag_list(mut self) -> Self {
        self.fail_tag_list = true;
        self
    }

    /// Calls recorded so far, in order (e.g. `"clone 1.0"`, `"pull master"`).
    ///
    /// # Panics
    ///
    /// Panics if the internal lock is poisoned.
    #[must_use]
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

fn basename(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

impl Vcs for MockVcs {
    fn clone_branch(
        &self,
        source: &str,
        branch: &str,
        _working_dir: &Path,
    ) -> Result<(), GitError> {
        self.record(format!("clone {branch}"));
        if self.failing_clones.contains(branch) {
            return Err(GitError::Failed {
                command: format!("git clone --branch {branch} {source} {branch}"),
                output: format!("fatal: Remote branch {branch} not found"),
            });
        }
        Ok(())
    }

    fn pull(&self, working_dir: &Path) -> Result<(), GitError> {
        let branch = basename(working_dir);
        self.record(format!("pull {branch}"));
        if self.failing_pulls.contains(&branch) {
            return Err(GitError::Failed {
                command: "git pull".to_owned(),
                output: "fatal: unable to pull".to_owned(),
            });
        }
        Ok(())
    }

    fn list_tags(&self, working_dir: &Path) -> Result<Vec<String>, GitError> {
        self.record(format!("list_tags {}", basename(working_dir)));
        if self.fail_tag_list {
            return Err(GitError::Failed {
                command: "git fetch --tags".to_owned(),
                output: "fatal: unable to access remote".to_owned(),
            });
        }
        Ok(self.tags.clone())
    }

    fn remote_url(&self, working_dir: &Path, remote: &str) -> Result<String, GitError> {
        self.record(format!("remote_url {} {remote}", basename(working_dir)));
        self.remote.clone().ok_or_else(|| GitError::Failed {
            command: format!("git config --get remote.{remote}.url"),
            output: String::new(),
        })
    }
}
