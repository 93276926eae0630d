//! Dry-run must never mutate the manifest, changelog, history, or tags

use crate::helpers::{ReleaseRepo, combined_output, git, run_shipit};
use anyhow::Result;

#[test]
fn test_dry_run_bump_mutates_nothing() -> Result<()> {
  let repo = ReleaseRepo::new("2.4.9")?;
  let head = repo.head_commit()?;
  let manifest_before = repo.read_file("Cargo.toml")?;
  let changelog_before = repo.read_file("CHANGELOG.md")?;

  let output = run_shipit(&repo.path, &["bump", "minor", "--dry-run", "-y"])?;
  assert!(output.status.success(), "{}", combined_output(&output));

  assert_eq!(repo.read_file("Cargo.toml")?, manifest_before);
  assert_eq!(repo.read_file("CHANGELOG.md")?, changelog_before);
  assert_eq!(repo.head_commit()?, head);
  assert!(!repo.local_tag_exists("v2.5.0")?);
  assert!(!repo.remote_tag_exists("v2.5.0")?);

  let messages = combined_output(&output);
  assert!(messages.contains("dry-run"), "{}", messages);

  Ok(())
}

#[test]
fn test_dry_run_cut_mutates_nothing() -> Result<()> {
  let repo = ReleaseRepo::new("1.2.3")?;
  let head = repo.head_commit()?;
  let remote_head = repo.remote_head()?;

  let output = run_shipit(&repo.path, &["cut", "--dry-run", "-y"])?;
  assert!(output.status.success(), "{}", combined_output(&output));

  assert_eq!(repo.head_commit()?, head);
  assert_eq!(repo.remote_head()?, remote_head);
  assert!(!repo.local_tag_exists("v1.2.3")?);

  Ok(())
}

#[test]
fn test_dry_run_reports_tag_deletion_without_performing_it() -> Result<()> {
  let repo = ReleaseRepo::new("1.2.3")?;
  git(&repo.path, &["tag", "v1.2.3"])?;

  let output = run_shipit(&repo.path, &["cut", "--dry-run", "-y"])?;
  assert!(output.status.success(), "{}", combined_output(&output));

  // Deletion was only announced
  assert!(combined_output(&output).contains("Would delete local tag v1.2.3"));
  assert!(repo.local_tag_exists("v1.2.3")?);

  Ok(())
}

#[test]
fn test_dry_run_downgrades_dirty_tree_to_warning() -> Result<()> {
  let repo = ReleaseRepo::new("1.2.3")?;
  std::fs::write(repo.path.join("scratch.txt"), "uncommitted\n")?;

  let output = run_shipit(&repo.path, &["bump", "patch", "--dry-run", "-y"])?;
  assert!(output.status.success(), "{}", combined_output(&output));

  let messages = combined_output(&output);
  assert!(messages.contains("advisory"), "{}", messages);

  Ok(())
}
