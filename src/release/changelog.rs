//! Changelog mutation: insert a dated release section
//!
//! The new section goes immediately after the literal `## [Unreleased]`
//! marker line; every other byte of the file is preserved. A missing
//! changelog degrades to a warning instead of failing the release.

use crate::core::error::ReleaseResult;
use crate::release::version::ReleaseVersion;
use crate::ui;
use std::fs;
use std::path::Path;

/// Literal marker the new section is inserted after
pub const UNRELEASED_MARKER: &str = "## [Unreleased]";

/// Insert `## [version] - date` after the unreleased marker
///
/// Returns `false` when the step was skipped (file or marker missing).
/// Dry-run performs no write and reports the intended insertion.
pub fn insert_section(path: &Path, version: &ReleaseVersion, date: &str, dry_run: bool) -> ReleaseResult<bool> {
  if !path.exists() {
    ui::warn(format!("No changelog at {}; skipping changelog update", path.display()));
    return Ok(false);
  }

  let content = fs::read_to_string(path)?;

  let Some(updated) = insert_after_marker(&content, version, date) else {
    ui::warn(format!(
      "No '{}' marker in {}; skipping changelog update",
      UNRELEASED_MARKER,
      path.display()
    ));
    return Ok(false);
  };

  if dry_run {
    ui::dry_run(format!("Would insert '## [{}] - {}' into {}", version, date, path.display()));
    return Ok(true);
  }

  fs::write(path, updated)?;
  Ok(true)
}

/// Pure insertion: new section header after the marker line, rest unchanged
fn insert_after_marker(content: &str, version: &ReleaseVersion, date: &str) -> Option<String> {
  let marker_at = find_marker_line(content)?;

  // End of the marker line, excluding its newline
  let line_end = content[marker_at..]
    .find('\n')
    .map(|i| marker_at + i)
    .unwrap_or(content.len());

  let section = format!("\n\n## [{}] - {}", version, date);

  let mut updated = String::with_capacity(content.len() + section.len());
  updated.push_str(&content[..line_end]);
  updated.push_str(&section);
  updated.push_str(&content[line_end..]);
  Some(updated)
}

/// Byte offset of the marker, required to sit at the start of a line
fn find_marker_line(content: &str) -> Option<usize> {
  let mut offset = 0;
  for line in content.split_inclusive('\n') {
    if line.trim_end_matches(['\n', '\r']) == UNRELEASED_MARKER {
      return Some(offset);
    }
    offset += line.len();
  }
  None
}
