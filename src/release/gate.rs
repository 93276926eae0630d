//! Test gate: run the external test suite before tagging
//!
//! The configured command runs synchronously with inherited stdio so the
//! operator sees test output live. A non-zero exit is fatal and flows into
//! rollback like any other failure.

use crate::core::config::Settings;
use crate::core::error::{ReleaseError, ReleaseResult, ResultExt};
use crate::ui;
use std::path::Path;
use std::process::Command;

/// Run the test gate; dry-run only reports what would run
pub fn run_test_gate(root: &Path, settings: &Settings, dry_run: bool) -> ReleaseResult<()> {
  let command_line = settings.test_command.trim();

  if dry_run {
    ui::dry_run(format!("Would run test gate: {}", command_line));
    return Ok(());
  }

  let mut parts = command_line.split_whitespace();
  let Some(program) = parts.next() else {
    ui::warn("Empty test command; skipping test gate");
    return Ok(());
  };

  ui::step(format!("Running test gate: {}", command_line));

  let status = Command::new(program)
    .args(parts)
    .current_dir(root)
    .status()
    .with_context(|| format!("Failed to run test gate '{}'", command_line))?;

  if !status.success() {
    return Err(ReleaseError::TestSuiteFailed {
      command: command_line.to_string(),
    });
  }

  ui::success("Test suite passed");
  Ok(())
}
