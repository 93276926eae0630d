//! The release pipeline
//!
//! Strictly sequential: Resolve -> Preflight -> Reconcile tag -> Confirm ->
//! Mutate files -> Commit -> Test gate -> Tag & Push, with the mutating tail
//! wrapped in the rollback controller. One release attempt at a time; the
//! working tree is assumed to be exclusively ours for the duration.

use crate::core::config::Settings;
use crate::core::error::ReleaseResult;
use crate::core::state::ReleaseState;
use crate::core::vcs::SystemGit;
use crate::release::preflight::Preflight;
use crate::release::resolver::{self, VersionStrategy};
use crate::release::rollback::run_with_rollback;
use crate::release::tags::{self, TagPolicy};
use crate::release::version::ReleaseVersion;
use crate::release::{changelog, gate, manifest, publish};
use crate::ui;
use std::env;

/// Options for one release invocation
#[derive(Debug, Clone, Copy)]
pub struct ReleaseOptions {
  pub strategy: VersionStrategy,
  pub dry_run: bool,
  pub assume_yes: bool,
}

/// Run one release attempt end to end
pub fn run(options: ReleaseOptions) -> ReleaseResult<()> {
  let cwd = env::current_dir()?;
  let git = SystemGit::open(&cwd)?;

  // Operate from the work tree root so relative manifest/changelog paths
  // resolve the same way for git and for file edits.
  let root = git.work_tree().to_path_buf();
  let git = if root == cwd { git } else { SystemGit::open(&root)? };

  let settings = Settings::load(&root)?;

  if options.dry_run {
    ui::info("Dry-run: nothing will be modified");
  }

  // Resolve (interactive sub-mode may cancel cleanly)
  let Some(resolved) = resolver::resolve(options.strategy, &settings, &root)? else {
    ui::info("Release cancelled");
    return Ok(());
  };

  if options.strategy.mutates_manifest() {
    ui::step(format!("Releasing {} (bumped from {})", resolved.next, resolved.current));
  } else {
    ui::step(format!("Releasing manifest version {}", resolved.next));
  }

  // Preflight: increment mode must start from a clean tree, fixed mode is
  // about to commit whatever manifest edits are already pending.
  Preflight::new(&git, &settings, options.strategy.mutates_manifest(), options.dry_run).run()?;

  // Reconcile tag. A fixed-version re-run is the retry path, so stale tags
  // are cleared; a bumped version must never collide with an existing tag.
  let policy = if options.strategy.mutates_manifest() {
    TagPolicy::Reject
  } else {
    TagPolicy::Reconcile
  };
  tags::reconcile(&git, &settings, &resolved.next.tag(), policy, options.dry_run)?;

  // Confirm. Declining is a clean zero-exit termination; nothing that needs
  // rolling back has happened yet.
  if !options.dry_run && !options.assume_yes && !confirm(&resolved.next)? {
    ui::info("Release cancelled");
    return Ok(());
  }

  let mut state = ReleaseState::new(git.head_commit()?, resolved.next.clone(), options.dry_run);

  run_with_rollback(&git, &settings, &mut state, |git, state| {
    if options.strategy.mutates_manifest() {
      manifest::write_version(&root.join(&settings.manifest), &state.version, state.dry_run)?;
    }

    let date = chrono::Local::now().format("%Y-%m-%d").to_string();
    changelog::insert_section(&root.join(&settings.changelog), &state.version, &date, state.dry_run)?;

    publish::commit_release(git, &settings, state, options.strategy.mutates_manifest())?;
    gate::run_test_gate(&root, &settings, state.dry_run)?;
    publish::tag_and_push(git, &settings, state)?;
    Ok(())
  })?;

  if options.dry_run {
    ui::success("Dry-run complete; nothing was modified");
  } else {
    publish::print_summary(&git, &settings, &state);
  }

  Ok(())
}

fn confirm(version: &ReleaseVersion) -> ReleaseResult<bool> {
  let answer = ui::prompt(format!("Release {}? [y/N]", version.tag()))?;
  Ok(matches!(answer.as_deref(), Some("y") | Some("Y") | Some("yes")))
}
