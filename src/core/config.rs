//! Release settings (shipit.toml) parsing
//!
//! Every field has a default, so the file is entirely optional. Settings are
//! read once at startup and threaded through the pipeline.

use crate::core::error::{ReleaseResult, ResultExt};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for shipit
///
/// Loaded from `shipit.toml` at the repository root when present.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
  /// Designated release branch
  #[serde(default = "default_branch")]
  pub branch: String,

  /// Remote name to fetch from and push to
  #[serde(default = "default_remote")]
  pub remote: String,

  /// Manifest file carrying the `version = "X.Y.Z"` line
  #[serde(default = "default_manifest")]
  pub manifest: PathBuf,

  /// Changelog file carrying the `## [Unreleased]` marker (optional on disk)
  #[serde(default = "default_changelog")]
  pub changelog: PathBuf,

  /// External test gate, run as a single pass/fail command
  #[serde(default = "default_test_command")]
  pub test_command: String,
}

fn default_branch() -> String {
  "main".to_string()
}

fn default_remote() -> String {
  "origin".to_string()
}

fn default_manifest() -> PathBuf {
  PathBuf::from("Cargo.toml")
}

fn default_changelog() -> PathBuf {
  PathBuf::from("CHANGELOG.md")
}

fn default_test_command() -> String {
  "cargo test".to_string()
}

impl Default for Settings {
  fn default() -> Self {
    Self {
      branch: default_branch(),
      remote: default_remote(),
      manifest: default_manifest(),
      changelog: default_changelog(),
      test_command: default_test_command(),
    }
  }
}

impl Settings {
  /// Load settings from `shipit.toml` under `root`, falling back to defaults
  pub fn load(root: &Path) -> ReleaseResult<Self> {
    let path = root.join("shipit.toml");
    if !path.exists() {
      return Ok(Self::default());
    }

    let content = fs::read_to_string(&path).with_context(|| format!("Failed to read {}", path.display()))?;
    let settings: Settings =
      toml_edit::de::from_str(&content).with_context(|| format!("Failed to parse {}", path.display()))?;
    Ok(settings)
  }
}
