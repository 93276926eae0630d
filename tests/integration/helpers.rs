//! Test helpers for integration tests

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};
use tempfile::TempDir;

/// A releasable repository with git history and a bare "origin" remote
pub struct ReleaseRepo {
  _root: TempDir,
  _remote: TempDir,
  pub path: PathBuf,
  pub remote_path: PathBuf,
}

impl ReleaseRepo {
  /// Create a repository at the given manifest version, with a changelog,
  /// an instant-pass test gate, and everything pushed to the bare remote.
  pub fn new(version: &str) -> Result<Self> {
    let root = TempDir::new()?;
    let remote = TempDir::new()?;
    let path = root.path().to_path_buf();
    let remote_path = remote.path().to_path_buf();

    git(&remote_path, &["init", "--bare", "--initial-branch=main"])?;

    git(&path, &["init", "--initial-branch=main"])?;
    git(&path, &["config", "user.name", "Test User"])?;
    git(&path, &["config", "user.email", "test@example.com"])?;

    std::fs::write(
      path.join("Cargo.toml"),
      format!(
        r#"[package]
name = "demo"
version = "{}"
edition = "2021"
"#,
        version
      ),
    )?;

    std::fs::write(
      path.join("CHANGELOG.md"),
      "# Changelog\n\n## [Unreleased]\n\n## [0.1.0] - 2025-01-15\n\n- Initial release\n",
    )?;

    // Instant pass/fail gate keeps the tests fast and deterministic
    std::fs::write(
      path.join("shipit.toml"),
      "branch = \"main\"\nremote = \"origin\"\ntest_command = \"true\"\n",
    )?;

    git(&path, &["add", "."])?;
    git(&path, &["commit", "-m", "Initial commit"])?;
    git(&path, &["remote", "add", "origin", remote_path.to_str().unwrap()])?;
    git(&path, &["push", "-u", "origin", "main"])?;

    Ok(Self {
      _root: root,
      _remote: remote,
      path,
      remote_path,
    })
  }

  /// Swap the test gate command and commit the settings change
  pub fn set_test_command(&self, command: &str) -> Result<()> {
    std::fs::write(
      self.path.join("shipit.toml"),
      format!("branch = \"main\"\nremote = \"origin\"\ntest_command = \"{}\"\n", command),
    )?;
    self.commit("Update test gate")?;
    git(&self.path, &["push", "origin", "main"])?;
    Ok(())
  }

  /// Commit all pending changes
  pub fn commit(&self, message: &str) -> Result<String> {
    git(&self.path, &["add", "."])?;
    git(&self.path, &["commit", "-m", message])?;
    self.head_commit()
  }

  pub fn head_commit(&self) -> Result<String> {
    let output = git(&self.path, &["rev-parse", "HEAD"])?;
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
  }

  pub fn head_subject(&self) -> Result<String> {
    let output = git(&self.path, &["log", "-1", "--format=%s"])?;
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
  }

  pub fn commit_count(&self) -> Result<usize> {
    let output = git(&self.path, &["rev-list", "--count", "HEAD"])?;
    Ok(String::from_utf8_lossy(&output.stdout).trim().parse()?)
  }

  pub fn read_file(&self, path: &str) -> Result<String> {
    Ok(std::fs::read_to_string(self.path.join(path))?)
  }

  pub fn local_tag_exists(&self, tag: &str) -> Result<bool> {
    let output = git(&self.path, &["tag", "-l", tag])?;
    Ok(!String::from_utf8_lossy(&output.stdout).trim().is_empty())
  }

  pub fn remote_tag_exists(&self, tag: &str) -> Result<bool> {
    let output = git(&self.remote_path, &["tag", "-l", tag])?;
    Ok(!String::from_utf8_lossy(&output.stdout).trim().is_empty())
  }

  /// Object type of a tag ref ("tag" for annotated, "commit" for lightweight)
  pub fn tag_object_type(&self, tag: &str) -> Result<String> {
    let output = git(&self.path, &["cat-file", "-t", tag])?;
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
  }

  pub fn remote_head(&self) -> Result<String> {
    let output = git(&self.remote_path, &["rev-parse", "main"])?;
    Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
  }

  /// Create a commit in a second clone and push it, leaving this repository
  /// behind the remote.
  pub fn advance_remote(&self) -> Result<()> {
    let clone = TempDir::new()?;
    let clone_path = clone.path().join("repo");
    git(
      clone.path(),
      &["clone", self.remote_path.to_str().unwrap(), clone_path.to_str().unwrap()],
    )?;
    git(&clone_path, &["config", "user.name", "Other User"])?;
    git(&clone_path, &["config", "user.email", "other@example.com"])?;
    git(&clone_path, &["commit", "--allow-empty", "-m", "Upstream change"])?;
    git(&clone_path, &["push", "origin", "main"])?;
    Ok(())
  }
}

/// Run git command in a directory
pub fn git(cwd: &Path, args: &[&str]) -> Result<Output> {
  let output = Command::new("git")
    .current_dir(cwd)
    .args(args)
    .output()
    .context("Failed to run git command")?;

  if !output.status.success() {
    let stderr = String::from_utf8_lossy(&output.stderr);
    anyhow::bail!("Git command failed: git {}\n{}", args.join(" "), stderr);
  }

  Ok(output)
}

/// Run the shipit CLI; callers assert on the returned status themselves
pub fn run_shipit(cwd: &Path, args: &[&str]) -> Result<Output> {
  let shipit_bin = env!("CARGO_BIN_EXE_shipit");

  Command::new(shipit_bin)
    .current_dir(cwd)
    .args(args)
    .stdin(Stdio::null())
    .output()
    .context("Failed to run shipit")
}

/// Run the shipit CLI feeding the given input on stdin
pub fn run_shipit_with_input(cwd: &Path, args: &[&str], input: &str) -> Result<Output> {
  use std::io::Write;

  let shipit_bin = env!("CARGO_BIN_EXE_shipit");

  let mut child = Command::new(shipit_bin)
    .current_dir(cwd)
    .args(args)
    .stdin(Stdio::piped())
    .stdout(Stdio::piped())
    .stderr(Stdio::piped())
    .spawn()
    .context("Failed to spawn shipit")?;

  child
    .stdin
    .as_mut()
    .expect("stdin was piped")
    .write_all(input.as_bytes())?;

  Ok(child.wait_with_output()?)
}

/// Combined stdout + stderr for assertions on messages
pub fn combined_output(output: &Output) -> String {
  format!(
    "{}{}",
    String::from_utf8_lossy(&output.stdout),
    String::from_utf8_lossy(&output.stderr)
  )
}
