//! Increment-mode releases (`shipit bump`)

use crate::helpers::{ReleaseRepo, combined_output, run_shipit, run_shipit_with_input};
use anyhow::Result;

#[test]
fn test_bump_minor_zeroes_patch_and_releases() -> Result<()> {
  let repo = ReleaseRepo::new("2.4.9")?;

  let output = run_shipit(&repo.path, &["bump", "minor", "-y"])?;
  assert!(output.status.success(), "{}", combined_output(&output));

  let manifest = repo.read_file("Cargo.toml")?;
  assert!(manifest.contains("version = \"2.5.0\""));
  assert!(!manifest.contains("2.4.9"));

  let changelog = repo.read_file("CHANGELOG.md")?;
  assert!(changelog.contains("## [Unreleased]\n\n## [2.5.0] - "));

  assert_eq!(repo.head_subject()?, "chore(release): 2.5.0");
  assert!(repo.local_tag_exists("v2.5.0")?);
  assert!(repo.remote_tag_exists("v2.5.0")?);
  assert_eq!(repo.remote_head()?, repo.head_commit()?);

  Ok(())
}

#[test]
fn test_bump_patch_increments_third_component_only() -> Result<()> {
  let repo = ReleaseRepo::new("1.2.3")?;

  let output = run_shipit(&repo.path, &["bump", "patch", "-y"])?;
  assert!(output.status.success(), "{}", combined_output(&output));

  assert!(repo.read_file("Cargo.toml")?.contains("version = \"1.2.4\""));
  assert!(repo.local_tag_exists("v1.2.4")?);

  Ok(())
}

#[test]
fn test_bump_major_zeroes_minor_and_patch() -> Result<()> {
  let repo = ReleaseRepo::new("1.2.3")?;

  let output = run_shipit(&repo.path, &["bump", "major", "-y"])?;
  assert!(output.status.success(), "{}", combined_output(&output));

  assert!(repo.read_file("Cargo.toml")?.contains("version = \"2.0.0\""));
  assert!(repo.local_tag_exists("v2.0.0")?);

  Ok(())
}

#[test]
fn test_invalid_increment_kind_fails() -> Result<()> {
  let repo = ReleaseRepo::new("1.2.3")?;

  let output = run_shipit(&repo.path, &["bump", "hotfix", "-y"])?;
  assert_eq!(output.status.code(), Some(1));
  assert!(combined_output(&output).contains("Invalid increment kind"));

  // Nothing happened
  assert!(repo.read_file("Cargo.toml")?.contains("version = \"1.2.3\""));

  Ok(())
}

#[test]
fn test_interactive_menu_cancel_exits_zero() -> Result<()> {
  let repo = ReleaseRepo::new("1.2.3")?;
  let head = repo.head_commit()?;

  let output = run_shipit_with_input(&repo.path, &["bump", "-y"], "4\n")?;
  assert!(output.status.success(), "{}", combined_output(&output));

  assert_eq!(repo.head_commit()?, head);
  assert!(repo.read_file("Cargo.toml")?.contains("version = \"1.2.3\""));
  assert!(!repo.local_tag_exists("v1.2.4")?);

  Ok(())
}

#[test]
fn test_interactive_menu_shows_all_three_targets() -> Result<()> {
  let repo = ReleaseRepo::new("1.2.3")?;

  let output = run_shipit_with_input(&repo.path, &["bump", "-y"], "4\n")?;
  let stdout = String::from_utf8_lossy(&output.stdout);
  assert!(stdout.contains("1.2.4"));
  assert!(stdout.contains("1.3.0"));
  assert!(stdout.contains("2.0.0"));

  Ok(())
}

#[test]
fn test_interactive_menu_selection_releases() -> Result<()> {
  let repo = ReleaseRepo::new("1.2.3")?;

  let output = run_shipit_with_input(&repo.path, &["bump", "-y"], "2\n")?;
  assert!(output.status.success(), "{}", combined_output(&output));

  assert!(repo.read_file("Cargo.toml")?.contains("version = \"1.3.0\""));
  assert!(repo.local_tag_exists("v1.3.0")?);

  Ok(())
}

#[test]
fn test_bump_requires_clean_working_tree() -> Result<()> {
  let repo = ReleaseRepo::new("1.2.3")?;
  std::fs::write(repo.path.join("scratch.txt"), "uncommitted\n")?;

  let output = run_shipit(&repo.path, &["bump", "patch", "-y"])?;
  assert_eq!(output.status.code(), Some(1));

  let messages = combined_output(&output);
  assert!(messages.contains("uncommitted changes"), "{}", messages);
  assert!(messages.contains("scratch.txt"), "{}", messages);

  Ok(())
}
