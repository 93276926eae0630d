//! Commit, tag, and push the release
//!
//! Stages exactly the manifest and changelog, commits with a fixed message
//! template, creates the annotated tag, and pushes branch then tag in that
//! order. The tag push only happens after a successful branch push.

use crate::core::config::Settings;
use crate::core::error::ReleaseResult;
use crate::core::state::ReleaseState;
use crate::core::vcs::SystemGit;
use crate::release::version::ReleaseVersion;
use crate::ui;
use std::path::Path;

/// Fixed commit message template embedding the version
pub fn commit_message(version: &ReleaseVersion) -> String {
  format!("chore(release): {}", version)
}

/// Whether a commit subject matches the release-commit template
pub fn is_release_commit(subject: &str) -> bool {
  subject.starts_with("chore(release):")
}

/// Annotation message for the release tag
pub fn tag_message(version: &ReleaseVersion) -> String {
  format!("Release {}", version.tag())
}

/// Stage manifest + changelog and create the release commit
///
/// In fixed mode (`require_commit == false`) an empty staged diff is a
/// warning and the commit is skipped; increment mode always commits, since
/// the manifest was just rewritten.
pub fn commit_release(
  git: &SystemGit,
  settings: &Settings,
  state: &mut ReleaseState,
  require_commit: bool,
) -> ReleaseResult<()> {
  let message = commit_message(&state.version);

  if state.dry_run {
    ui::dry_run(format!("Would commit '{}' staging {} and {}",
      message,
      settings.manifest.display(),
      settings.changelog.display()
    ));
    return Ok(());
  }

  let mut staged: Vec<&Path> = vec![settings.manifest.as_path()];
  if git.work_tree().join(&settings.changelog).exists() {
    staged.push(settings.changelog.as_path());
  }

  git.stage_paths(&staged)?;

  if !require_commit && git.staged_paths(&staged)?.is_empty() {
    ui::warn("Nothing staged for the release commit; continuing without one");
    return Ok(());
  }

  git.commit(&message)?;
  state.committed = true;
  ui::success(format!("Committed: {}", message));
  Ok(())
}

/// Create the annotated tag, then push branch and tag in that order
pub fn tag_and_push(git: &SystemGit, settings: &Settings, state: &mut ReleaseState) -> ReleaseResult<()> {
  let tag = state.tag();

  if state.dry_run {
    ui::dry_run(format!("Would create annotated tag {}", tag));
    ui::dry_run(format!("Would push '{}' then '{}' to '{}'", settings.branch, tag, settings.remote));
    return Ok(());
  }

  git.create_annotated_tag(&tag, &tag_message(&state.version))?;
  state.tagged = true;
  ui::success(format!("Created annotated tag {}", tag));

  ui::step(format!("Pushing '{}' to '{}'", settings.branch, settings.remote));
  git.push_branch(&settings.remote, &settings.branch)?;

  ui::step(format!("Pushing tag {}", tag));
  git.push_tag(&settings.remote, &tag)?;

  Ok(())
}

/// Print the completion summary with a link to the release page
pub fn print_summary(git: &SystemGit, settings: &Settings, state: &ReleaseState) {
  let tag = state.tag();

  println!();
  ui::success(format!("Released {}", state.version));
  println!("   Branch: {} -> {}", settings.branch, settings.remote);
  println!("   Tag:    {}", tag);

  if let Ok(Some(url)) = git.remote_url(&settings.remote)
    && let Some(link) = release_link(&url, &tag)
  {
    println!("   Release page: {}", link);
  }
}

/// Derive a release-page link from the remote URL
///
/// Supports ssh (`git@host:user/repo.git`) and https remotes.
pub fn release_link(remote_url: &str, tag: &str) -> Option<String> {
  let url = remote_url.trim();

  let web_base = if let Some(rest) = url.strip_prefix("git@") {
    let (host, path) = rest.split_once(':')?;
    format!("https://{}/{}", host, path.trim_end_matches(".git"))
  } else if url.starts_with("https://") || url.starts_with("http://") {
    url.trim_end_matches('/').trim_end_matches(".git").to_string()
  } else {
    return None; // Local or unrecognized remote
  };

  Some(format!("{}/releases/tag/{}", web_base, tag))
}
