//! Error types for shipit with contextual messages
//!
//! Every fatal error is detected at its originating pipeline step and carries
//! enough context to print a useful diagnosis plus, where it makes sense, a
//! corrective suggestion. Warnings are printed through `crate::ui` and never
//! surface here.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Main error type for shipit
///
/// One variant per failure kind the release pipeline can diagnose, plus
/// catch-all git/io/message variants for everything delegated to subprocesses.
#[derive(Debug)]
pub enum ReleaseError {
  /// A required external tool is not resolvable on PATH
  ToolMissing { tool: String },

  /// Working directory is not inside a git repository
  NotARepository { path: PathBuf },

  /// Current branch is not the designated release branch
  WrongBranch { current: String, expected: String },

  /// Working tree has uncommitted changes
  DirtyWorkingTree { paths: Vec<String> },

  /// Remote repository could not be contacted
  RemoteUnreachable { remote: String, reason: String },

  /// Local branch tip is behind the fetched remote tip
  BehindRemote { branch: String, remote: String },

  /// The release tag already exists locally or remotely
  TagAlreadyExists { tag: String, recent: Vec<String> },

  /// Manifest file not found
  ManifestMissing { path: PathBuf },

  /// Manifest exists but has no recognizable version line
  VersionFieldMissing { path: PathBuf },

  /// Increment kind was not one of patch/minor/major
  InvalidIncrementKind { input: String },

  /// Manifest rewrite failed
  ManifestWriteFailed { path: PathBuf, reason: String },

  /// The external test gate reported failure
  TestSuiteFailed { command: String },

  /// Push to the remote failed
  PushFailed {
    remote: String,
    refname: String,
    reason: String,
  },

  /// A git subprocess failed
  GitCommandFailed { command: String, stderr: String },

  /// I/O errors
  Io(io::Error),

  /// Generic error with message and optional context
  Message {
    message: String,
    context: Option<String>,
    help: Option<String>,
  },
}

impl ReleaseError {
  /// Create a simple error message
  pub fn message(msg: impl Into<String>) -> Self {
    ReleaseError::Message {
      message: msg.into(),
      context: None,
      help: None,
    }
  }

  /// Add context to an existing error
  pub fn context(self, ctx: impl Into<String>) -> Self {
    let ctx_str = ctx.into();
    match self {
      ReleaseError::Message { message, context, help } => ReleaseError::Message {
        message,
        context: Some(context.map(|c| format!("{}\n{}", ctx_str, c)).unwrap_or(ctx_str)),
        help,
      },
      other => other,
    }
  }

  /// Get contextual help message for this error
  pub fn help_message(&self) -> Option<String> {
    match self {
      ReleaseError::ToolMissing { tool } => Some(format!("Install '{}' and make sure it is on your PATH.", tool)),
      ReleaseError::WrongBranch { expected, .. } => Some(format!("Switch branches with: git checkout {}", expected)),
      ReleaseError::DirtyWorkingTree { .. } => {
        Some("Commit or stash your changes before releasing (git stash).".to_string())
      }
      ReleaseError::RemoteUnreachable { remote, .. } => Some(format!(
        "Check your network connection and that the remote '{}' is configured (git remote -v).",
        remote
      )),
      ReleaseError::BehindRemote { branch, remote } => Some(format!("Update your branch with: git pull {} {}", remote, branch)),
      ReleaseError::TagAlreadyExists { tag, .. } => Some(format!(
        "Delete the stale tag first (git tag -d {0} && git push origin :refs/tags/{0}) or pick a different version.",
        tag
      )),
      ReleaseError::ManifestMissing { .. } => Some("Run shipit from the repository root.".to_string()),
      ReleaseError::VersionFieldMissing { .. } => {
        Some("The manifest needs a line of the form: version = \"X.Y.Z\"".to_string())
      }
      ReleaseError::InvalidIncrementKind { .. } => Some("Valid increment kinds are: patch, minor, major".to_string()),
      ReleaseError::TestSuiteFailed { command } => Some(format!("Run `{}` locally to see the failures.", command)),
      ReleaseError::PushFailed { reason, .. } => {
        if reason.contains("non-fast-forward") {
          Some("The remote has commits you don't have. Pull first and re-run the release.".to_string())
        } else if reason.contains("permission denied") || reason.contains("403") {
          Some("Check your SSH key permissions and push access to the repository.".to_string())
        } else {
          None
        }
      }
      ReleaseError::Message { help, .. } => help.clone(),
      _ => None,
    }
  }
}

impl fmt::Display for ReleaseError {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      ReleaseError::ToolMissing { tool } => write!(f, "Required tool not found on PATH: {}", tool),
      ReleaseError::NotARepository { path } => {
        write!(f, "Not a git repository: {}", path.display())
      }
      ReleaseError::WrongBranch { current, expected } => {
        write!(f, "On branch '{}' but releases must be cut from '{}'", current, expected)
      }
      ReleaseError::DirtyWorkingTree { paths } => {
        write!(f, "Working tree has uncommitted changes:")?;
        for path in paths {
          write!(f, "\n  {}", path)?;
        }
        Ok(())
      }
      ReleaseError::RemoteUnreachable { remote, reason } => {
        write!(f, "Remote '{}' is unreachable: {}", remote, reason.trim())
      }
      ReleaseError::BehindRemote { branch, remote } => {
        write!(f, "Local '{}' is behind '{}/{}'", branch, remote, branch)
      }
      ReleaseError::TagAlreadyExists { tag, recent } => {
        write!(f, "Tag '{}' already exists", tag)?;
        if !recent.is_empty() {
          write!(f, "\nRecent tags:")?;
          for t in recent {
            write!(f, "\n  {}", t)?;
          }
        }
        Ok(())
      }
      ReleaseError::ManifestMissing { path } => {
        write!(f, "Manifest not found: {}", path.display())
      }
      ReleaseError::VersionFieldMissing { path } => {
        write!(f, "No version field found in {}", path.display())
      }
      ReleaseError::InvalidIncrementKind { input } => {
        write!(f, "Invalid increment kind: '{}'", input)
      }
      ReleaseError::ManifestWriteFailed { path, reason } => {
        write!(f, "Failed to rewrite {}: {}", path.display(), reason)
      }
      ReleaseError::TestSuiteFailed { command } => {
        write!(f, "Test suite failed: {}", command)
      }
      ReleaseError::PushFailed { remote, refname, reason } => {
        write!(f, "Push of '{}' to '{}' failed: {}", refname, remote, reason.trim())
      }
      ReleaseError::GitCommandFailed { command, stderr } => {
        write!(f, "Git command failed: {}\n{}", command, stderr.trim())
      }
      ReleaseError::Io(e) => write!(f, "I/O error: {}", e),
      ReleaseError::Message { message, context, .. } => {
        write!(f, "{}", message)?;
        if let Some(ctx) = context {
          write!(f, "\n{}", ctx)?;
        }
        Ok(())
      }
    }
  }
}

impl std::error::Error for ReleaseError {
  fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
    match self {
      ReleaseError::Io(e) => Some(e),
      _ => None,
    }
  }
}

impl From<io::Error> for ReleaseError {
  fn from(err: io::Error) -> Self {
    ReleaseError::Io(err)
  }
}

impl From<String> for ReleaseError {
  fn from(msg: String) -> Self {
    ReleaseError::message(msg)
  }
}

impl From<&str> for ReleaseError {
  fn from(msg: &str) -> Self {
    ReleaseError::message(msg)
  }
}

impl From<toml_edit::de::Error> for ReleaseError {
  fn from(err: toml_edit::de::Error) -> Self {
    ReleaseError::message(format!("TOML deserialization error: {}", err))
  }
}

impl From<semver::Error> for ReleaseError {
  fn from(err: semver::Error) -> Self {
    ReleaseError::message(format!("Version parse error: {}", err))
  }
}

/// Result type alias for shipit
pub type ReleaseResult<T> = Result<T, ReleaseError>;

/// Helper trait to add context to Results
pub trait ResultExt<T> {
  /// Add context to an error result
  fn context(self, ctx: impl Into<String>) -> ReleaseResult<T>;

  /// Add context using a closure (lazy evaluation)
  fn with_context<F>(self, f: F) -> ReleaseResult<T>
  where
    F: FnOnce() -> String;
}

impl<T, E> ResultExt<T> for Result<T, E>
where
  E: Into<ReleaseError>,
{
  fn context(self, ctx: impl Into<String>) -> ReleaseResult<T> {
    self.map_err(|e| e.into().context(ctx))
  }

  fn with_context<F>(self, f: F) -> ReleaseResult<T>
  where
    F: FnOnce() -> String,
  {
    self.map_err(|e| e.into().context(f()))
  }
}

/// Pretty-print an error to stderr with help text
pub fn print_error(error: &ReleaseError) {
  eprintln!("\n❌ {}\n", error);

  if let Some(help) = error.help_message() {
    eprintln!("💡 Help: {}\n", help);
  }
}
