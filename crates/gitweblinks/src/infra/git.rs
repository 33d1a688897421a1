//! Git integration utilities.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use crate::domain::errors::LinkError;
use crate::domain::model::GitInfo;

/// Runs version-control commands inside a repository.
pub trait GitExecutor: Send + Sync {
    /// Run `git <args>` in `root` and return its trimmed standard output.
    fn execute(&self, root: &Path, args: &[&str]) -> Result<String, LinkError>;
}

/// [`GitExecutor`] backed by the `git` executable on `PATH`.
#[derive(Debug, Clone)]
pub struct GitCli {
    program: PathBuf,
}

impl GitCli {
    pub fn new() -> Self {
        Self {
            program: PathBuf::from("git"),
        }
    }

    /// Use a specific git binary instead of the one on `PATH`.
    pub fn with_program(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new()
    }
}

impl GitExecutor for GitCli {
    fn execute(&self, root: &Path, args: &[&str]) -> Result<String, LinkError> {
        let command = format!("git {}", args.join(" "));
        tracing::debug!(root = %root.display(), %command, "running git");

        let output = Command::new(&self.program)
            .args(args)
            .current_dir(root)
            .output()
            .map_err(LinkError::GitUnavailable)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            tracing::warn!(%command, status = %output.status, %stderr, "git command failed");
            return Err(LinkError::GitCommand {
                command,
                code: output.status.code(),
                stderr,
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout).trim().to_string();
        tracing::trace!(%command, %stdout, "git output");
        Ok(stdout)
    }
}

/// Locates the working tree and remote URL for a path.
pub struct GitInfoFinder<'a> {
    git: &'a dyn GitExecutor,
}

impl<'a> GitInfoFinder<'a> {
    pub fn new(git: &'a dyn GitExecutor) -> Self {
        Self { git }
    }

    /// Resolve repository information for `path`, which may be a file or a directory.
    ///
    /// Returns `Ok(None)` when the path is not under version control or the
    /// repository has no remote.
    pub fn find(&self, path: &Path) -> Result<Option<GitInfo>, LinkError> {
        let Some(root) = repository_root(path)? else {
            tracing::debug!(path = %path.display(), "no repository found");
            return Ok(None);
        };

        let Some(remote_url) = self.remote_url(&root)? else {
            tracing::debug!(root = %root.display(), "repository has no remote");
            return Ok(None);
        };

        Ok(Some(GitInfo {
            root_directory: root,
            remote_url,
        }))
    }

    /// The `origin` remote's URL, or the first configured remote's.
    fn remote_url(&self, root: &Path) -> Result<Option<String>, LinkError> {
        let listing = match self
            .git
            .execute(root, &["config", "--get-regexp", r"^remote\..*\.url$"])
        {
            Ok(listing) => listing,
            // `git config --get-regexp` exits with 1 when nothing matches.
            Err(LinkError::GitCommand { code: Some(1), .. }) => {
                return Ok(None);
            }
            Err(err) => return Err(err),
        };

        Ok(pick_remote(&listing))
    }
}

fn pick_remote(listing: &str) -> Option<String> {
    let remotes: Vec<(&str, &str)> = listing
        .lines()
        .filter_map(|line| {
            let (key, url) = line.trim().split_once(char::is_whitespace)?;
            let name = key.strip_prefix("remote.")?.strip_suffix(".url")?;
            Some((name, url.trim()))
        })
        .filter(|(_, url)| !url.is_empty())
        .collect();

    remotes
        .iter()
        .find(|(name, _)| *name == "origin")
        .or_else(|| remotes.first())
        .map(|(_, url)| (*url).to_string())
}

/// Canonical working tree root containing `path`, or `None` outside a repository.
///
/// Relative paths are resolved against the current directory.
pub fn repository_root(path: &Path) -> Result<Option<PathBuf>, LinkError> {
    let path = fs::canonicalize(path)?;
    let start = if path.is_dir() {
        path.as_path()
    } else {
        match path.parent() {
            Some(parent) => parent,
            None => return Ok(None),
        }
    };

    let repo = match gix::discover(start) {
        Ok(repo) => repo,
        Err(gix::discover::Error::Discover(err)) => {
            tracing::debug!(error = %err, "not a git repository");
            return Ok(None);
        }
        Err(err) => return Err(LinkError::Discover(err.to_string())),
    };

    let Some(work_dir) = repo.work_dir() else {
        return Ok(None);
    };

    Ok(Some(fs::canonicalize(work_dir)?))
}
