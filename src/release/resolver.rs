//! Version resolution strategies
//!
//! One pipeline, two strategies: `Fixed` releases whatever version the
//! manifest already carries; `Bump` computes the next version from the
//! manifest via semantic increment, prompting the operator when no kind
//! was given on the command line.

use crate::core::config::Settings;
use crate::core::error::ReleaseResult;
use crate::release::manifest;
use crate::release::version::{BumpKind, ReleaseVersion};
use crate::ui;
use std::path::Path;

/// How the version being released is determined
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionStrategy {
  /// Release the version already recorded in the manifest
  Fixed,

  /// Increment the manifest version; `None` prompts interactively
  Bump(Option<BumpKind>),
}

impl VersionStrategy {
  /// Whether this strategy rewrites the manifest before committing
  pub fn mutates_manifest(self) -> bool {
    matches!(self, VersionStrategy::Bump(_))
  }
}

/// Outcome of version resolution
#[derive(Debug, Clone)]
pub struct ResolvedVersion {
  /// Version currently in the manifest
  pub current: ReleaseVersion,

  /// Version to release (== current in fixed mode)
  pub next: ReleaseVersion,
}

/// Resolve the version to release
///
/// Returns `Ok(None)` when the operator cancels the interactive menu; the
/// caller exits 0 with no side effects.
pub fn resolve(strategy: VersionStrategy, settings: &Settings, root: &Path) -> ReleaseResult<Option<ResolvedVersion>> {
  let manifest_path = root.join(&settings.manifest);
  let current = manifest::read_version(&manifest_path)?;

  match strategy {
    VersionStrategy::Fixed => Ok(Some(ResolvedVersion {
      next: current.clone(),
      current,
    })),
    VersionStrategy::Bump(Some(kind)) => {
      let next = kind.apply(&current);
      Ok(Some(ResolvedVersion { current, next }))
    }
    VersionStrategy::Bump(None) => match prompt_increment(&current)? {
      Some(kind) => {
        let next = kind.apply(&current);
        Ok(Some(ResolvedVersion { current, next }))
      }
      None => Ok(None),
    },
  }
}

/// Interactive menu showing all three computed targets plus cancel
fn prompt_increment(current: &ReleaseVersion) -> ReleaseResult<Option<BumpKind>> {
  println!("Current version: {}", current);
  println!();
  println!("  1) patch  {} -> {}", current, BumpKind::Patch.apply(current));
  println!("  2) minor  {} -> {}", current, BumpKind::Minor.apply(current));
  println!("  3) major  {} -> {}", current, BumpKind::Major.apply(current));
  println!("  4) cancel");
  println!();

  loop {
    let Some(answer) = ui::prompt("Select increment [1-4]:")? else {
      return Ok(None); // EOF is a cancel
    };

    match answer.as_str() {
      "1" | "patch" => return Ok(Some(BumpKind::Patch)),
      "2" | "minor" => return Ok(Some(BumpKind::Minor)),
      "3" | "major" => return Ok(Some(BumpKind::Major)),
      "4" | "cancel" | "q" => return Ok(None),
      other => ui::warn(format!("Unrecognized choice '{}'", other)),
    }
  }
}
