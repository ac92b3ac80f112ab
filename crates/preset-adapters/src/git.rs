//! Fetching git repositories by shelling out to `git`.

use std::ffi::OsString;
use std::path::Path;
use std::process::{Command, Output};

use thiserror::Error;
use tracing::{debug, instrument};

/// Errors from running git.
#[derive(Debug, Error)]
pub enum GitError {
    #[error("could not run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("git {step} failed ({status}): {stderr}")]
    Failed {
        step: &'static str,
        status: String,
        stderr: String,
    },
}

/// Something that can place a checkout of `url` at `dest`.
///
/// `dest` does not exist beforehand; on success it contains the working
/// tree at `git_ref` (or the default branch).
pub trait GitFetcher: Send + Sync {
    fn fetch(&self, url: &str, git_ref: Option<&str>, dest: &Path) -> Result<(), GitError>;
}

/// [`GitFetcher`] backed by the `git` binary on `PATH`.
#[derive(Debug, Clone)]
pub struct SystemGit {
    program: OsString,
}

impl SystemGit {
    pub fn new() -> Self {
        Self {
            program: OsString::from("git"),
        }
    }

    /// Use a specific git executable.
    pub fn with_program(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        // Never block on a credential prompt; auth failures become errors.
        cmd.env("GIT_TERMINAL_PROMPT", "0");
        cmd
    }

    fn run(&self, step: &'static str, cmd: &mut Command) -> Result<Output, GitError> {
        debug!(?cmd, "running git");
        let output = cmd.output().map_err(|source| GitError::Spawn {
            program: self.program.to_string_lossy().into_owned(),
            source,
        })?;

        if !output.status.success() {
            return Err(GitError::Failed {
                step,
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(output)
    }
}

impl Default for SystemGit {
    fn default() -> Self {
        Self::new()
    }
}

/// Abbreviated or full commit hashes cannot be passed to `clone --branch`.
fn is_commit_like(git_ref: &str) -> bool {
    (7..=40).contains(&git_ref.len()) && git_ref.chars().all(|c| c.is_ascii_hexdigit())
}

impl GitFetcher for SystemGit {
    #[instrument(skip(self), fields(dest = %dest.display()))]
    fn fetch(&self, url: &str, git_ref: Option<&str>, dest: &Path) -> Result<(), GitError> {
        match git_ref {
            Some(commit) if is_commit_like(commit) => {
                self.run(
                    "clone",
                    self.command()
                        .args(["clone", "--quiet", "--no-checkout", "--"])
                        .arg(url)
                        .arg(dest),
                )?;
                self.run(
                    "checkout",
                    self.command()
                        .arg("-C")
                        .arg(dest)
                        .args(["checkout", "--quiet", commit]),
                )?;
            }
            Some(branch) => {
                self.run(
                    "clone",
                    self.command()
                        .args(["clone", "--quiet", "--depth", "1", "--branch", branch, "--"])
                        .arg(url)
                        .arg(dest),
                )?;
            }
            None => {
                self.run(
                    "clone",
                    self.command()
                        .args(["clone", "--quiet", "--depth", "1", "--"])
                        .arg(url)
                        .arg(dest),
                )?;
            }
        }
        Ok(())
    }
}
