//! Core building blocks for the release pipeline
//!
//! - **config**: shipit.toml settings with full defaults
//! - **error**: error types with contextual help messages
//! - **state**: transient per-run state consulted by rollback
//! - **vcs**: git operations via system git (SystemGit)

pub mod config;
pub mod error;
pub mod state;
pub mod vcs;
