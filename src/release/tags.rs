//! Tag reconciliation before release
//!
//! The release tag must be absent both locally and remotely before it is
//! created. Fixed-version re-runs reconcile stale tags away; increment mode
//! rejects, since a freshly computed version must never collide.

use crate::core::config::Settings;
use crate::core::error::{ReleaseError, ReleaseResult};
use crate::core::vcs::SystemGit;
use crate::ui;

/// How to handle a pre-existing release tag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TagPolicy {
  /// Delete the conflicting tag (remote deletion is best-effort) and proceed
  Reconcile,

  /// Fail with `TagAlreadyExists`, listing recent tags for context
  Reject,
}

/// Number of recent tags listed alongside a rejection
const RECENT_TAG_CONTEXT: usize = 10;

/// Converge the release tag to "absent in both locations"
///
/// Remote listing is skipped in dry-run (treated as absent), and dry-run
/// reports intended deletions without performing them.
pub fn reconcile(git: &SystemGit, settings: &Settings, tag: &str, policy: TagPolicy, dry_run: bool) -> ReleaseResult<()> {
  let local = git.local_tag_exists(tag)?;
  let remote = if dry_run {
    false
  } else {
    git.remote_tag_exists(&settings.remote, tag)?
  };

  if !local && !remote {
    return Ok(());
  }

  match policy {
    TagPolicy::Reject => Err(ReleaseError::TagAlreadyExists {
      tag: tag.to_string(),
      recent: git.recent_tags(RECENT_TAG_CONTEXT).unwrap_or_default(),
    }),
    TagPolicy::Reconcile => {
      if local {
        if dry_run {
          ui::dry_run(format!("Would delete local tag {}", tag));
        } else {
          git.delete_local_tag(tag)?;
          ui::info(format!("Deleted stale local tag {}", tag));
        }
      }

      if remote {
        if dry_run {
          ui::dry_run(format!("Would delete remote tag {} on '{}'", tag, settings.remote));
        } else if let Err(e) = git.delete_remote_tag(&settings.remote, tag) {
          // Likely missing push permission; the push step will surface it
          ui::warn(format!("Could not delete remote tag {}: {}", tag, e));
        } else {
          ui::info(format!("Deleted stale remote tag {}", tag));
        }
      }

      Ok(())
    }
  }
}
