//! Tag reconciliation policies

use crate::helpers::{ReleaseRepo, combined_output, git, run_shipit};
use anyhow::Result;

#[test]
fn test_cut_reconciles_stale_tag_locally_and_remotely() -> Result<()> {
  let repo = ReleaseRepo::new("1.2.3")?;

  // Leftovers from a failed earlier run, on both sides
  git(&repo.path, &["tag", "v1.2.3"])?;
  git(&repo.path, &["push", "origin", "v1.2.3"])?;

  let stale_target = {
    let output = git(&repo.path, &["rev-list", "-1", "v1.2.3"])?;
    String::from_utf8_lossy(&output.stdout).trim().to_string()
  };

  let output = run_shipit(&repo.path, &["cut", "-y"])?;
  assert!(output.status.success(), "{}", combined_output(&output));

  // A fresh v1.2.3 exists and points at the new release commit
  assert!(repo.local_tag_exists("v1.2.3")?);
  assert!(repo.remote_tag_exists("v1.2.3")?);

  let new_target = {
    let output = git(&repo.path, &["rev-list", "-1", "v1.2.3"])?;
    String::from_utf8_lossy(&output.stdout).trim().to_string()
  };
  assert_ne!(new_target, stale_target);
  assert_eq!(new_target, repo.head_commit()?);

  Ok(())
}

#[test]
fn test_bump_rejects_existing_tag_with_recent_tag_context() -> Result<()> {
  let repo = ReleaseRepo::new("1.2.2")?;

  // The bumped version would collide
  git(&repo.path, &["tag", "v1.2.3"])?;

  let output = run_shipit(&repo.path, &["bump", "patch", "-y"])?;
  assert_eq!(output.status.code(), Some(1));

  let messages = combined_output(&output);
  assert!(messages.contains("already exists"), "{}", messages);
  assert!(messages.contains("v1.2.3"), "{}", messages);

  // Manifest untouched, conflicting tag left alone
  assert!(repo.read_file("Cargo.toml")?.contains("version = \"1.2.2\""));
  assert!(repo.local_tag_exists("v1.2.3")?);

  Ok(())
}

#[test]
fn test_reconcile_survives_unremovable_remote_tag() -> Result<()> {
  let repo = ReleaseRepo::new("1.2.3")?;

  // Tag exists remotely; deleting it there will fail because the remote
  // rejects deletions. (`receive.denyDeletes` only covers refs/heads/*, so
  // a pre-receive hook enforces this for tags.)
  git(&repo.path, &["tag", "v1.2.3"])?;
  git(&repo.path, &["push", "origin", "v1.2.3"])?;
  git(&repo.path, &["tag", "-d", "v1.2.3"])?;
  let hook = repo.remote_path.join("hooks").join("pre-receive");
  std::fs::create_dir_all(hook.parent().unwrap())?;
  std::fs::write(
    &hook,
    "#!/bin/sh\nwhile read old new ref; do\n  if [ \"$new\" = \"0000000000000000000000000000000000000000\" ]; then\n    echo \"deletion prohibited\" >&2\n    exit 1\n  fi\ndone\nexit 0\n",
  )?;
  #[cfg(unix)]
  {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(&hook, std::fs::Permissions::from_mode(0o755))?;
  }

  let output = run_shipit(&repo.path, &["cut", "-y"])?;

  // Remote deletion failure is only a warning: the run proceeds past
  // reconciliation and creates a fresh v1.2.3. (The final tag push is then
  // rejected by this locked-down remote, which is a separate failure.)
  let messages = combined_output(&output);
  assert!(messages.contains("Could not delete remote tag"), "{}", messages);
  assert!(messages.contains("Created annotated tag v1.2.3"), "{}", messages);

  Ok(())
}
