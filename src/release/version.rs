//! Release version parsing and semantic increment

use crate::core::error::{ReleaseError, ReleaseResult};
use semver::Version;
use std::fmt;

/// A plain three-component release version (no pre-release, no build metadata)
///
/// Backed by `semver::Version` for parsing and ordering; the constructor
/// rejects anything that is not exactly `major.minor.patch`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct ReleaseVersion {
  inner: Version,
}

impl ReleaseVersion {
  pub fn new(major: u64, minor: u64, patch: u64) -> Self {
    Self {
      inner: Version::new(major, minor, patch),
    }
  }

  /// Parse a dotted `X.Y.Z` string
  pub fn parse(input: &str) -> ReleaseResult<Self> {
    let version: Version = input
      .trim()
      .parse()
      .map_err(|e| ReleaseError::message(format!("Invalid version '{}': {}", input.trim(), e)))?;

    if !version.pre.is_empty() || !version.build.is_empty() {
      return Err(ReleaseError::message(format!(
        "Invalid version '{}': expected plain X.Y.Z",
        input.trim()
      )));
    }

    Ok(Self { inner: version })
  }

  pub fn major(&self) -> u64 {
    self.inner.major
  }

  pub fn minor(&self) -> u64 {
    self.inner.minor
  }

  pub fn patch(&self) -> u64 {
    self.inner.patch
  }

  /// Tag name for this version (`vX.Y.Z`)
  pub fn tag(&self) -> String {
    format!("v{}", self)
  }
}

impl fmt::Display for ReleaseVersion {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.inner)
  }
}

/// Semantic increment kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BumpKind {
  Patch,
  Minor,
  Major,
}

impl BumpKind {
  /// Parse an operator-supplied increment kind
  pub fn parse(input: &str) -> ReleaseResult<Self> {
    match input {
      "patch" => Ok(BumpKind::Patch),
      "minor" => Ok(BumpKind::Minor),
      "major" => Ok(BumpKind::Major),
      other => Err(ReleaseError::InvalidIncrementKind {
        input: other.to_string(),
      }),
    }
  }

  /// Apply this increment to a version
  pub fn apply(self, current: &ReleaseVersion) -> ReleaseVersion {
    match self {
      BumpKind::Patch => ReleaseVersion::new(current.major(), current.minor(), current.patch() + 1),
      BumpKind::Minor => ReleaseVersion::new(current.major(), current.minor() + 1, 0),
      BumpKind::Major => ReleaseVersion::new(current.major() + 1, 0, 0),
    }
  }
}
