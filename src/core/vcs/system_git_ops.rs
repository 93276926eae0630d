//! Release operations for SystemGit (status, tags, pushes, resets)

use super::system_git::SystemGit;
use crate::core::error::{ReleaseError, ReleaseResult, ResultExt};
use std::path::Path;

impl SystemGit {
  /// Paths with uncommitted changes (staged or unstaged), porcelain format
  pub fn changed_paths(&self) -> ReleaseResult<Vec<String>> {
    let stdout = self.run(&["status", "--porcelain"])?;
    Ok(stdout.lines().filter_map(status_path).collect())
  }

  /// Stage specific paths (never a full working-tree add)
  pub fn stage_paths(&self, paths: &[&Path]) -> ReleaseResult<()> {
    let mut cmd = self.git_cmd();
    cmd.args(["add", "--"]);
    for path in paths {
      cmd.arg(path);
    }

    let output = cmd.output().context("Failed to run git add")?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      return Err(ReleaseError::GitCommandFailed {
        command: "git add".to_string(),
        stderr: stderr.to_string(),
      });
    }

    Ok(())
  }

  /// Paths with staged changes, restricted to the given paths
  pub fn staged_paths(&self, paths: &[&Path]) -> ReleaseResult<Vec<String>> {
    let mut cmd = self.git_cmd();
    cmd.args(["diff", "--cached", "--name-only", "--"]);
    for path in paths {
      cmd.arg(path);
    }

    let output = cmd.output().context("Failed to run git diff")?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      return Err(ReleaseError::GitCommandFailed {
        command: "git diff --cached".to_string(),
        stderr: stderr.to_string(),
      });
    }

    let staged = String::from_utf8_lossy(&output.stdout)
      .lines()
      .map(|s| s.trim().to_string())
      .filter(|s| !s.is_empty())
      .collect();

    Ok(staged)
  }

  /// Create a commit from the index
  pub fn commit(&self, message: &str) -> ReleaseResult<()> {
    self.run(&["commit", "-m", message])?;
    Ok(())
  }

  /// Subject line of the most recent commit
  pub fn last_commit_subject(&self) -> ReleaseResult<String> {
    let stdout = self.run(&["log", "-1", "--format=%s"])?;
    Ok(stdout.trim().to_string())
  }

  /// Create an annotated tag
  pub fn create_annotated_tag(&self, tag: &str, message: &str) -> ReleaseResult<()> {
    self.run(&["tag", "-a", tag, "-m", message])?;
    Ok(())
  }

  /// Delete a local tag
  pub fn delete_local_tag(&self, tag: &str) -> ReleaseResult<()> {
    self.run(&["tag", "-d", tag])?;
    Ok(())
  }

  /// Check whether a tag exists in the local repository
  pub fn local_tag_exists(&self, tag: &str) -> ReleaseResult<bool> {
    let stdout = self.run(&["tag", "-l", tag])?;
    Ok(!stdout.trim().is_empty())
  }

  /// Most recently created local tags, newest first
  pub fn recent_tags(&self, limit: usize) -> ReleaseResult<Vec<String>> {
    let stdout = self.run(&["tag", "-l", "--sort=-creatordate"])?;

    let tags = stdout
      .lines()
      .map(|s| s.trim().to_string())
      .filter(|s| !s.is_empty())
      .take(limit)
      .collect();

    Ok(tags)
  }

  /// Probe the remote for reachability
  pub fn check_remote_reachable(&self, remote: &str) -> ReleaseResult<()> {
    let output = self
      .git_cmd()
      .args(["ls-remote", "--heads", remote])
      .output()
      .context("Failed to run git ls-remote")?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      return Err(ReleaseError::RemoteUnreachable {
        remote: remote.to_string(),
        reason: stderr.to_string(),
      });
    }

    Ok(())
  }

  /// Check whether a tag exists on the remote
  pub fn remote_tag_exists(&self, remote: &str, tag: &str) -> ReleaseResult<bool> {
    let refspec = format!("refs/tags/{}", tag);
    let output = self
      .git_cmd()
      .args(["ls-remote", "--tags", remote, &refspec])
      .output()
      .context("Failed to run git ls-remote")?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      return Err(ReleaseError::RemoteUnreachable {
        remote: remote.to_string(),
        reason: stderr.to_string(),
      });
    }

    Ok(!String::from_utf8_lossy(&output.stdout).trim().is_empty())
  }

  /// Delete a tag on the remote
  pub fn delete_remote_tag(&self, remote: &str, tag: &str) -> ReleaseResult<()> {
    let refspec = format!(":refs/tags/{}", tag);
    self.run(&["push", remote, &refspec])?;
    Ok(())
  }

  /// Fetch a single branch from the remote
  pub fn fetch(&self, remote: &str, branch: &str) -> ReleaseResult<()> {
    self.run(&["fetch", remote, branch])?;
    Ok(())
  }

  /// True if `ancestor` is an ancestor of `descendant`
  pub fn is_ancestor(&self, ancestor: &str, descendant: &str) -> ReleaseResult<bool> {
    let output = self
      .git_cmd()
      .args(["merge-base", "--is-ancestor", ancestor, descendant])
      .output()
      .context("Failed to run git merge-base")?;

    match output.status.code() {
      Some(0) => Ok(true),
      Some(1) => Ok(false),
      _ => {
        let stderr = String::from_utf8_lossy(&output.stderr);
        Err(ReleaseError::GitCommandFailed {
          command: "git merge-base --is-ancestor".to_string(),
          stderr: stderr.to_string(),
        })
      }
    }
  }

  /// Push a branch to the remote
  pub fn push_branch(&self, remote: &str, branch: &str) -> ReleaseResult<()> {
    let output = self
      .git_cmd()
      .args(["push", remote, branch])
      .output()
      .context("Failed to run git push")?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      return Err(ReleaseError::PushFailed {
        remote: remote.to_string(),
        refname: branch.to_string(),
        reason: stderr.to_string(),
      });
    }

    Ok(())
  }

  /// Push a tag to the remote
  pub fn push_tag(&self, remote: &str, tag: &str) -> ReleaseResult<()> {
    let refspec = format!("refs/tags/{}", tag);
    let output = self
      .git_cmd()
      .args(["push", remote, &refspec])
      .output()
      .context("Failed to run git push")?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      return Err(ReleaseError::PushFailed {
        remote: remote.to_string(),
        refname: tag.to_string(),
        reason: stderr.to_string(),
      });
    }

    Ok(())
  }

  /// URL of the named remote, if configured
  pub fn remote_url(&self, remote: &str) -> ReleaseResult<Option<String>> {
    let output = self
      .git_cmd()
      .args(["remote", "get-url", remote])
      .output()
      .context("Failed to run git remote get-url")?;

    if !output.status.success() {
      return Ok(None);
    }

    Ok(Some(String::from_utf8_lossy(&output.stdout).trim().to_string()))
  }

  /// Hard-reset the current branch to a refspec, discarding changes
  pub fn reset_hard(&self, refspec: &str) -> ReleaseResult<()> {
    self.run(&["reset", "--hard", refspec])?;
    Ok(())
  }

  /// Check out committed versions of specific paths, discarding local edits
  ///
  /// Fails when any path does not match the given ref, so callers restoring
  /// possibly-untracked files should pass paths one at a time.
  pub fn checkout_paths(&self, refname: &str, paths: &[&Path]) -> ReleaseResult<()> {
    let mut cmd = self.git_cmd();
    cmd.args(["checkout", refname, "--"]);
    for path in paths {
      cmd.arg(path);
    }

    let output = cmd.output().context("Failed to run git checkout")?;

    if !output.status.success() {
      let stderr = String::from_utf8_lossy(&output.stderr);
      return Err(ReleaseError::GitCommandFailed {
        command: "git checkout".to_string(),
        stderr: stderr.to_string(),
      });
    }

    Ok(())
  }
}

/// Extract the path from one porcelain v1 status line
///
/// Rename entries read `R  old -> new`; the new path is reported.
fn status_path(line: &str) -> Option<String> {
  if line.len() <= 3 {
    return None;
  }

  let path = line[3..].trim();
  let path = path.rsplit_once(" -> ").map_or(path, |(_, new)| new);
  Some(path.to_string())
}
