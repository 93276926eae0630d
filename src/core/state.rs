//! Transient release state consulted by the rollback controller
//!
//! Created at process start, updated as each step completes, never persisted.
//! Threading an explicit struct through the pipeline (instead of ambient
//! globals) is what lets rollback know exactly how far the run got.

use crate::release::version::ReleaseVersion;

/// In-memory record of one release attempt
#[derive(Debug, Clone)]
pub struct ReleaseState {
  /// HEAD commit SHA when the run started
  pub start_commit: String,

  /// Version being released
  pub version: ReleaseVersion,

  /// A release commit was created during this run
  pub committed: bool,

  /// The release tag was created during this run
  pub tagged: bool,

  /// Dry-run: no mutations happened, rollback is a no-op
  pub dry_run: bool,
}

impl ReleaseState {
  pub fn new(start_commit: String, version: ReleaseVersion, dry_run: bool) -> Self {
    Self {
      start_commit,
      version,
      committed: false,
      tagged: false,
      dry_run,
    }
  }

  /// Tag name for the version being released
  pub fn tag(&self) -> String {
    self.version.tag()
  }
}
