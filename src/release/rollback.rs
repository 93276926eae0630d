//! Transactional rollback for failed release runs
//!
//! The pipeline body runs inside [`run_with_rollback`]; on any error outside
//! dry-run the recorded [`ReleaseState`] is used to undo the commit, file
//! edits, and tag made so far, then the original error is returned so the
//! operator sees the real failure. Every undo sub-operation is best-effort
//! with its own errors suppressed. A successful run never triggers it.

use crate::core::config::Settings;
use crate::core::error::ReleaseResult;
use crate::core::state::ReleaseState;
use crate::core::vcs::SystemGit;
use crate::release::publish;
use crate::ui;
use std::path::Path;

/// Run the fallible pipeline body, rolling back on failure
pub fn run_with_rollback<F>(git: &SystemGit, settings: &Settings, state: &mut ReleaseState, body: F) -> ReleaseResult<()>
where
  F: FnOnce(&SystemGit, &mut ReleaseState) -> ReleaseResult<()>,
{
  match body(git, state) {
    Ok(()) => Ok(()),
    Err(err) => {
      if !state.dry_run {
        ui::warn("Release failed; rolling back partial changes");
        rollback(git, settings, state);
      }
      Err(err)
    }
  }
}

/// Undo whatever the failed run managed to do, best-effort
fn rollback(git: &SystemGit, settings: &Settings, state: &ReleaseState) {
  // The release commit, if one landed, is discarded by resetting to the
  // commit recorded before any mutation. Guard on the commit message
  // template so an unrelated HEAD is never reset away.
  let undo_commit = state.committed
    && git
      .last_commit_subject()
      .map(|subject| publish::is_release_commit(&subject))
      .unwrap_or(false)
    && git
      .head_commit()
      .map(|head| head != state.start_commit)
      .unwrap_or(false);

  if undo_commit {
    if git.reset_hard(&state.start_commit).is_ok() {
      ui::info("Rolled back release commit");
    }
  } else if let Ok(changed) = git.changed_paths() {
    // No commit landed; revert file edits one path at a time, skipping
    // anything untouched. A changelog not tracked in HEAD must not make the
    // manifest restore fail.
    for path in [settings.manifest.as_path(), settings.changelog.as_path()] {
      if changed.iter().any(|c| Path::new(c) == path) && git.checkout_paths("HEAD", &[path]).is_ok() {
        ui::info(format!("Restored {}", path.display()));
      }
    }
  }

  if state.tagged {
    let tag = state.tag();
    if git.delete_local_tag(&tag).is_ok() {
      ui::info(format!("Deleted tag {}", tag));
    }
  }
}
