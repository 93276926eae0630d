//! Preflight validation before any mutation
//!
//! An ordered sequence of independent checks, aborting at the first failure.
//! Dry-run downgrades the working-tree and remote-tip checks to advisory
//! warnings and skips the reachability probe entirely.

use crate::core::config::Settings;
use crate::core::error::{ReleaseError, ReleaseResult};
use crate::core::vcs::SystemGit;
use crate::ui;
use std::path::Path;

/// Preflight check runner
pub struct Preflight<'a> {
  git: &'a SystemGit,
  settings: &'a Settings,
  /// Increment mode requires a clean tree before mutating the manifest;
  /// fixed mode tolerates pending edits it is about to commit.
  require_clean: bool,
  dry_run: bool,
}

impl<'a> Preflight<'a> {
  pub fn new(git: &'a SystemGit, settings: &'a Settings, require_clean: bool, dry_run: bool) -> Self {
    Self {
      git,
      settings,
      require_clean,
      dry_run,
    }
  }

  /// Run all checks in order, aborting at the first failure
  pub fn run(&self) -> ReleaseResult<()> {
    self.check_tools()?;
    self.check_branch()?;
    if self.require_clean {
      self.check_clean_tree()?;
    }
    if !self.dry_run {
      self.check_remote_reachable()?;
    }
    self.check_remote_tip()?;
    Ok(())
  }

  /// Required external tools resolvable on PATH
  fn check_tools(&self) -> ReleaseResult<()> {
    let mut tools = vec!["git"];
    if let Some(test_program) = self.settings.test_command.split_whitespace().next() {
      tools.push(test_program);
    }

    for tool in tools {
      if !tool_on_path(tool) {
        return Err(ReleaseError::ToolMissing { tool: tool.to_string() });
      }
    }

    Ok(())
  }

  /// Current branch equals the designated release branch
  fn check_branch(&self) -> ReleaseResult<()> {
    let current = self.git.current_branch()?;
    if current != self.settings.branch {
      return Err(ReleaseError::WrongBranch {
        current,
        expected: self.settings.branch.clone(),
      });
    }
    Ok(())
  }

  /// Working tree has no uncommitted changes
  fn check_clean_tree(&self) -> ReleaseResult<()> {
    let paths = self.git.changed_paths()?;
    if paths.is_empty() {
      return Ok(());
    }

    if self.dry_run {
      ui::warn(format!("Working tree has {} uncommitted change(s) (advisory in dry-run)", paths.len()));
      return Ok(());
    }

    Err(ReleaseError::DirtyWorkingTree { paths })
  }

  /// Remote repository reachable (skipped in dry-run)
  fn check_remote_reachable(&self) -> ReleaseResult<()> {
    self.git.check_remote_reachable(&self.settings.remote)
  }

  /// Compare the local branch tip against the fetched remote tip
  ///
  /// Behind fails, ahead proceeds with a notice that a push will happen,
  /// equal proceeds silently. A missing remote branch means first push.
  fn check_remote_tip(&self) -> ReleaseResult<()> {
    let remote = &self.settings.remote;
    let branch = &self.settings.branch;

    if let Err(e) = self.git.fetch(remote, branch) {
      if self.dry_run {
        ui::warn(format!("Could not fetch '{}/{}' (advisory in dry-run): {}", remote, branch, e));
        return Ok(());
      }
      // The remote branch may simply not exist yet
      ui::info(format!("Remote branch '{}/{}' not fetched; assuming first push", remote, branch));
      return Ok(());
    }

    let local = self.git.head_commit()?;
    let Some(remote_tip) = self.git.rev_parse(&format!("{}/{}", remote, branch))? else {
      ui::info(format!("Remote branch '{}/{}' does not exist yet", remote, branch));
      return Ok(());
    };

    if local == remote_tip {
      return Ok(());
    }

    if self.git.is_ancestor(&local, &remote_tip)? {
      if self.dry_run {
        ui::warn(format!("Local '{}' is behind '{}/{}' (advisory in dry-run)", branch, remote, branch));
        return Ok(());
      }
      return Err(ReleaseError::BehindRemote {
        branch: branch.clone(),
        remote: remote.clone(),
      });
    }

    if self.git.is_ancestor(&remote_tip, &local)? {
      ui::info(format!("Local '{}' is ahead of '{}/{}'; the release will push it", branch, remote, branch));
      return Ok(());
    }

    // Diverged histories cannot fast-forward either way; treat like behind
    if self.dry_run {
      ui::warn(format!("Local '{}' has diverged from '{}/{}' (advisory in dry-run)", branch, remote, branch));
      return Ok(());
    }

    Err(ReleaseError::BehindRemote {
      branch: branch.clone(),
      remote: remote.clone(),
    })
  }
}

/// Resolve a program name against PATH (honoring absolute/relative paths)
fn tool_on_path(program: &str) -> bool {
  let candidate = Path::new(program);
  if candidate.components().count() > 1 {
    return candidate.exists();
  }

  let Some(paths) = std::env::var_os("PATH") else {
    return false;
  };

  std::env::split_paths(&paths).any(|dir| {
    let full = dir.join(program);
    if full.is_file() {
      return true;
    }
    // Windows resolves through PATHEXT; .exe covers the common case
    cfg!(windows) && dir.join(format!("{}.exe", program)).is_file()
  })
}
