//! Manifest version field: read and rewrite
//!
//! The manifest is treated as plain text: the version is the first line whose
//! leading token is `version` followed by `=` and a quoted value. The rewrite
//! replaces only the quoted value on that line; every other byte of the file
//! is preserved.

use crate::core::error::{ReleaseError, ReleaseResult};
use crate::release::version::ReleaseVersion;
use crate::ui;
use std::fs;
use std::path::Path;

/// Extract the quoted value from a `version = "..."` line
///
/// Returns the span of the quoted value so a rewrite can splice in a
/// replacement without touching surrounding whitespace or comments.
fn version_value_span(line: &str) -> Option<(usize, usize)> {
  let trimmed = line.trim_start();
  let rest = trimmed.strip_prefix("version")?;
  let rest = rest.trim_start();
  let rest = rest.strip_prefix('=')?;
  let rest = rest.trim_start();
  let rest = rest.strip_prefix('"')?;
  let len = rest.find('"')?;

  // Offsets back into the original line
  let start = line.len() - rest.len();
  Some((start, start + len))
}

/// Read the version field from the manifest
///
/// First matching line wins. Fails with `ManifestMissing` when the file is
/// absent and `VersionFieldMissing` when no line matches.
pub fn read_version(path: &Path) -> ReleaseResult<ReleaseVersion> {
  if !path.exists() {
    return Err(ReleaseError::ManifestMissing {
      path: path.to_path_buf(),
    });
  }

  let content = fs::read_to_string(path)?;

  for line in content.lines() {
    if let Some((start, end)) = version_value_span(line) {
      return ReleaseVersion::parse(&line[start..end]);
    }
  }

  Err(ReleaseError::VersionFieldMissing {
    path: path.to_path_buf(),
  })
}

/// Rewrite the first version line with the new version string
///
/// All other lines are unchanged. Dry-run performs no write.
pub fn write_version(path: &Path, next: &ReleaseVersion, dry_run: bool) -> ReleaseResult<()> {
  if dry_run {
    ui::dry_run(format!("Would set version = \"{}\" in {}", next, path.display()));
    return Ok(());
  }

  let content = fs::read_to_string(path).map_err(|e| ReleaseError::ManifestWriteFailed {
    path: path.to_path_buf(),
    reason: e.to_string(),
  })?;

  let mut rewritten = String::with_capacity(content.len());
  let mut replaced = false;

  for line in content.split_inclusive('\n') {
    if !replaced
      && let Some((start, end)) = version_value_span(line)
    {
      rewritten.push_str(&line[..start]);
      rewritten.push_str(&next.to_string());
      rewritten.push_str(&line[end..]);
      replaced = true;
      continue;
    }
    rewritten.push_str(line);
  }

  if !replaced {
    return Err(ReleaseError::VersionFieldMissing {
      path: path.to_path_buf(),
    });
  }

  fs::write(path, rewritten).map_err(|e| ReleaseError::ManifestWriteFailed {
    path: path.to_path_buf(),
    reason: e.to_string(),
  })?;

  Ok(())
}
