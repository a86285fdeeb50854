//! The [`Vcs`] trait and the git-binary-backed [`GitRunner`].

use std::io::Read;
use std::path::Path;
use std::process::{Child, Command, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use crate::error::GitError;

/// Interval between subprocess exit checks.
const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Default per-command timeout.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// VCS operations consumed by the publishers.
///
/// Every operation blocks until the underlying command completes and can
/// fail with a [`GitError`] carrying the command line and captured output.
pub trait Vcs: Send + Sync {
    /// Clone `source` at `branch` into a subdirectory named exactly
    /// `branch` inside `working_dir`.
    ///
    /// # Errors
    ///
    /// Returns [`GitError`] if the clone fails or times out.
    fn clone_branch(
        &self,
        source: &str,
        branch: &str,
        working_dir: &Path,
    ) -> Result<(), GitError>;

    /// Run a pull in `working_dir`.
    ///
    /// Used only for moving branches; tags are never pulled.
    ///
    /// # Errors
    ///
    /// Returns [`GitError`] if the pull fails or times out.
    fn pull(&self, working_dir: &Path) -> Result<(), GitError>;

    /// Fetch remote refs, then list tags in `working_dir`.
    ///
    /// An empty tag list is `Ok(vec![])`, never an error.
    ///
    /// # Errors
    ///
    /// Returns [`GitError`] if the fetch or listing fails or times out.
    fn list_tags(&self, working_dir: &Path) -> Result<Vec<String>, GitError>;

    /// Read the configured URL for `remote` in `working_dir`.
    ///
    /// # Errors
    ///
    /// Returns [`GitError`] if the remote is not configured or the command
    /// fails.
    fn remote_url(&self, working_dir: &Path, remote: &str) -> Result<String, GitError>;
}

/// Typed facade over git subprocess invocation.
///
/// Commands run with captured stdout/stderr and a configurable timeout
/// (default 60 seconds), after which the subprocess is killed and the
/// operation fails with [`GitError::TimedOut`].
#[derive(Debug, Clone)]
pub struct GitRunner {
    binary: String,
    timeout: Duration,
}

impl Default for GitRunner {
    fn default() -> Self {
        Self {
            binary: "git".to_owned(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl GitRunner {
    /// Create a runner using the `git` binary and the default timeout.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different binary (e.g. an absolute path to git).
    #[must_use]
    pub fn with_binary(mut self, binary: impl Into<String>) -> Self {
        self.binary = binary.into();
        self
    }

    /// Set the per-command timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Run the binary with `args` in `working_dir`, returning captured stdout.
    fn run(&self, args: &[&str], working_dir: &Path) -> Result<String, GitError> {
        let command = format!("{} {}", self.binary, args.join(" "));
        tracing::debug!(command = %command, dir = %working_dir.display(), "Running VCS command");

        let mut child = Command::new(&self.binary)
            .args(args)
            .current_dir(working_dir)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| GitError::Io {
                command: command.clone(),
                source,
            })?;

        // Drain both pipes on threads so a chatty subprocess cannot block
        // on a full pipe buffer while we poll for exit.
        let stdout_reader = spawn_reader(child.stdout.take());
        let stderr_reader = spawn_reader(child.stderr.take());

        let status = self.wait_with_timeout(&mut child, &command)?;
        let stdout = join_reader(stdout_reader);
        let stderr = join_reader(stderr_reader);

        if status.success() {
            Ok(stdout)
        } else {
            let trimmed = stderr.trim();
            let output = if trimmed.is_empty() {
                stdout.trim().to_owned()
            } else {
                trimmed.to_owned()
            };
            Err(GitError::Failed { command, output })
        }
    }

    fn wait_with_timeout(
        &self,
        child: &mut Child,
        command: &str,
    ) -> Result<std::process::ExitStatus, GitError> {
        let deadline = Instant::now() + self.timeout;
        loop {
            match child.try_wait() {
                Ok(Some(status)) => return Ok(status),
                Ok(None) => {
                    if Instant::now() >= deadline {
                        let _ = child.kill();
                        let _ = child.wait();
                        return Err(GitError::TimedOut {
                            command: command.to_owned(),
                            timeout: self.timeout,
                        });
                    }
                    thread::sleep(POLL_INTERVAL);
                }
                Err(source) => {
                    return Err(GitError::Io {
                        command: command.to_owned(),
                        source,
                    });
                }
            }
        }
    }
}

impl Vcs for GitRunner {
    fn clone_branch(
        &self,
        source: &str,
        branch: &str,
        working_dir: &Path,
    ) -> Result<(), GitError> {
        self.run(&["clone", "--branch", branch, source, branch], working_dir)
            .map(|_| ())
    }

    fn pull(&self, working_dir: &Path) -> Result<(), GitError> {
        self.run(&["pull"], working_dir).map(|_| ())
    }

    fn list_tags(&self, working_dir: &Path) -> Result<Vec<String>, GitError> {
        self.run(&["fetch", "--tags"], working_dir)?;
        let output = self.run(&["tag", "--list"], working_dir)?;
        Ok(parse_tags(&output))
    }

    fn remote_url(&self, working_dir: &Path, remote: &str) -> Result<String, GitError> {
        let key = format!("remote.{remote}.url");
        let output = self.run(&["config", "--get", &key], working_dir)?;
        Ok(output.trim().to_owned())
    }
}

/// Split tag-list output on newlines, trim, and drop empty entries.
fn parse_tags(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

fn spawn_reader<R: Read + Send + 'static>(pipe: Option<R>) -> Option<JoinHandle<String>> {
    pipe.map(|mut reader| {
        thread::spawn(move || {
            let mut buf = String::new();
            let _ = reader.read_to_string(&mut buf);
            buf
        })
    })
}

fn join_reader(handle: Option<JoinHandle<String>>) -> String {
    handle
        .and_then(|h| h.join().ok())
        .unwrap_or_default()
}
