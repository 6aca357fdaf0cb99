//! Git collaborators: enumerating the revision range and moving the checkout
//!
//! Every operation shells out to `git` in the given repository directory.

use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use thiserror::Error;

/// Errors from git subprocesses
#[derive(Error, Debug)]
pub enum GitError {
    #[error("failed to run git: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("git {command} failed: {stderr}")]
    Failed { command: String, stderr: String },

    #[error("no commits in range {from}..{to}")]
    EmptyRange { from: String, to: String },
}

pub type Result<T> = std::result::Result<T, GitError>;

fn git(repo: &Path, args: &[&str]) -> Result<String> {
    let output = Command::new("git")
        .args(args)
        .current_dir(repo)
        .stdin(Stdio::null())
        .output()?;

    if !output.status.success() {
        return Err(GitError::Failed {
            command: args.join(" "),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
}

/// Resolve any revision expression to a full commit id
pub fn resolve_commit(repo: &Path, rev: &str) -> Result<String> {
    git(repo, &["rev-parse", "--verify", &format!("{}^{{commit}}", rev)])
}

/// Ordered revision list for a hunt: `from` first, then `from..to` oldest first
///
/// Index 0 is the resolved baseline; the last entry is `to`.
pub fn revisions_between(repo: &Path, from: &str, to: &str) -> Result<Vec<String>> {
    let baseline = resolve_commit(repo, from)?;
    let log = git(
        repo,
        &[
            "log",
            "--format=%H",
            "--reverse",
            &format!("{}..{}", from, to),
        ],
    )?;

    if log.is_empty() {
        return Err(GitError::EmptyRange {
            from: from.to_string(),
            to: to.to_string(),
        });
    }

    let mut revisions = vec![baseline];
    revisions.extend(log.lines().map(|line| line.trim().to_string()));
    tracing::debug!(count = revisions.len(), "enumerated revisions");
    Ok(revisions)
}

/// Check out `rev` quietly
pub fn checkout(repo: &Path, rev: &str) -> Result<()> {
    git(repo, &["checkout", "--quiet", rev]).map(|_| ())
}

/// Where HEAD points now: branch name, or commit id when detached
pub fn current_position(repo: &Path) -> Result<String> {
    match git(repo, &["symbolic-ref", "-q", "--short", "HEAD"]) {
        Ok(branch) if !branch.is_empty() => Ok(branch),
        _ => git(repo, &["rev-parse", "HEAD"]),
    }
}

/// Restores the checkout recorded at creation when dropped
///
/// Hunts move HEAD around; the guard puts it back on success, error or panic.
#[derive(Debug)]
pub struct CheckoutGuard {
    repo: PathBuf,
    original: String,
}

impl CheckoutGuard {
    pub fn new(repo: &Path) -> Result<Self> {
        let original = current_position(repo)?;
        tracing::debug!(%original, "recorded checkout");
        Ok(Self {
            repo: repo.to_path_buf(),
            original,
        })
    }

    pub fn original(&self) -> &str {
        &self.original
    }
}

impl Drop for CheckoutGuard {
    fn drop(&mut self) {
        if let Err(e) = checkout(&self.repo, &self.original) {
            tracing::warn!("Failed to restore checkout {}: {}", self.original, e);
        }
    }
}

#[cfg(test)]
pub(crate) mod test_repo {
    use super::*;
    use std::fs;

    /// Throwaway repository with one commit per entry in `files`
    pub fn init(dir: &Path, files: &[(&str, &str)]) -> Vec<String> {
        run(dir, &["init", "--quiet"]);
        run(dir, &["symbolic-ref", "HEAD", "refs/heads/main"]);
        let mut commits = Vec::new();
        for (i, (name, content)) in files.iter().enumerate() {
            fs::write(dir.join(name), content).unwrap();
            run(dir, &["add", "."]);
            run(
                dir,
                &[
                    "-c",
                    "user.name=perfhunt",
                    "-c",
                    "user.email=perfhunt@example.com",
                    "commit",
                    "--quiet",
                    "-m",
                    &format!("commit {}", i),
                ],
            );
            commits.push(git(dir, &["rev-parse", "HEAD"]).unwrap());
        }
        commits
    }

    fn run(dir: &Path, args: &[&str]) {
        let status = Command::new("git")
            .args(args)
            .current_dir(dir)
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .unwrap();
        assert!(status.success(), "git {:?} failed", args);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_revisions_between_orders_oldest_first() {
        let dir = tempfile::tempdir().unwrap();
        let commits =
            test_repo::init(dir.path(), &[("a", "1"), ("b", "2"), ("c", "3"), ("d", "4")]);

        let revisions = revisions_between(dir.path(), &commits[0], "HEAD").unwrap();

        assert_eq!(revisions, commits);
    }

    #[test]
    fn test_revisions_between_resolves_baseline_ref() {
        let dir = tempfile::tempdir().unwrap();
        let commits = test_repo::init(dir.path(), &[("a", "1"), ("b", "2"), ("c", "3")]);

        let revisions = revisions_between(dir.path(), "HEAD~2", "HEAD").unwrap();

        assert_eq!(revisions[0], commits[0]);
        assert_eq!(revisions.len(), 3);
    }

    #[test]
    fn test_empty_range() {
        let dir = tempfile::tempdir().unwrap();
        test_repo::init(dir.path(), &[("a", "1")]);

        let err = revisions_between(dir.path(), "HEAD", "HEAD").unwrap_err();
        assert!(matches!(err, GitError::EmptyRange { .. }));
    }

    #[test]
    fn test_unknown_revision() {
        let dir = tempfile::tempdir().unwrap();
        test_repo::init(dir.path(), &[("a", "1")]);

        let err = revisions_between(dir.path(), "does-not-exist", "HEAD").unwrap_err();
        assert!(matches!(err, GitError::Failed { .. }));
    }

    #[test]
    fn test_checkout_guard_restores_branch() {
        let dir = tempfile::tempdir().unwrap();
        let commits = test_repo::init(dir.path(), &[("a", "1"), ("b", "2")]);

        {
            let guard = CheckoutGuard::new(dir.path()).unwrap();
            assert_eq!(guard.original(), "main");
            checkout(dir.path(), &commits[0]).unwrap();
            assert_eq!(current_position(dir.path()).unwrap(), commits[0]);
        }

        assert_eq!(current_position(dir.path()).unwrap(), "main");
    }
}
