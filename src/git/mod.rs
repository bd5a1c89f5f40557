use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use crate::error::{Error, Result};
use crate::utils::debug;

pub mod diff;

pub use diff::collect_diff;

/// Runs git subcommands in a given working directory and returns stdout.
///
/// Failures (spawn errors and non-zero exits) become [`Error::Git`].
pub trait GitRunner {
    fn run(&self, cwd: &Path, args: &[&str]) -> Result<String>;
}

/// The system `git` executable
#[derive(Debug, Clone)]
pub struct GitCli {
    binary: String,
}

impl Default for GitCli {
    fn default() -> Self {
        Self {
            binary: "git".to_string(),
        }
    }
}

impl GitRunner for GitCli {
    fn run(&self, cwd: &Path, args: &[&str]) -> Result<String> {
        let rendered = debug::render_command(&self.binary, args);
        debug::log(&format!("Running: {} (in {})", rendered, cwd.display()));

        let output = Command::new(&self.binary)
            .args(args)
            .current_dir(cwd)
            .stdin(Stdio::null())
            .env("GIT_TERMINAL_PROMPT", "0")
            .output()
            .map_err(|e| Error::Git {
                command: rendered.clone(),
                message: e.to_string(),
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let message = if stderr.is_empty() {
                format!("exited with {}", output.status)
            } else {
                stderr
            };
            return Err(Error::Git {
                command: rendered,
                message,
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

/// The repository a pipeline operates on. Built once per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryContext {
    pub path: PathBuf,
    pub branch: String,
    pub target: Option<String>,
}

/// Resolve `path` to an absolute path and check that it holds a `.git` entry.
///
/// The entry may be a directory or a file (worktrees, submodules); it is not
/// checked for being a working repository.
pub fn resolve_repository(path: &Path) -> Result<PathBuf> {
    let absolute = std::path::absolute(path).map_err(|source| Error::Path {
        path: path.to_path_buf(),
        source,
    })?;

    match absolute.join(".git").try_exists() {
        Ok(true) => Ok(absolute),
        Ok(false) => Err(Error::NotAGitRepo(absolute)),
        Err(source) => Err(Error::Path {
            path: absolute,
            source,
        }),
    }
}

/// Abbreviated symbolic name of `HEAD`.
///
/// A detached HEAD yields `HEAD`, which is passed through unchanged.
pub fn current_branch(git: &dyn GitRunner, repo: &Path) -> Result<String> {
    let output = git.run(repo, &["rev-parse", "--abbrev-ref", "HEAD"])?;
    Ok(output.trim().to_string())
}

/// Whether the working tree has staged or unstaged changes
pub fn has_uncommitted_changes(git: &dyn GitRunner, repo: &Path) -> Result<bool> {
    let output = git.run(repo, &["status", "--porcelain"])?;
    Ok(!output.trim().is_empty())
}

/// Check out `branch`, fetching before and pulling after.
///
/// Only the checkout itself is fatal. Fetch and pull failures, and a dirty
/// working tree, are returned as warnings for the caller to display.
pub fn checkout_branch(git: &dyn GitRunner, repo: &Path, branch: &str) -> Result<Vec<String>> {
    let mut warnings = Vec::new();

    match has_uncommitted_changes(git, repo) {
        Ok(true) => warnings.push(format!(
            "Working tree at {} has uncommitted changes; checking out '{}' anyway",
            repo.display(),
            branch
        )),
        Ok(false) => {}
        Err(e) => warnings.push(format!("Could not inspect working tree: {}", e)),
    }

    if let Err(e) = git.run(repo, &["fetch", "--all"]) {
        warnings.push(format!("Fetch failed, branch may be stale: {}", e));
    }

    git.run(repo, &["checkout", branch])?;

    if let Err(e) = git.run(repo, &["pull"]) {
        warnings.push(format!("Pull failed, branch may be stale: {}", e));
    }

    Ok(warnings)
}
