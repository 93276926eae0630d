//! Git operations abstraction
//!
//! All version-control work goes through [`SystemGit`], which shells out to
//! the system git binary with an isolated environment. Release-specific
//! operations (tags, pushes, resets) live in `system_git_ops`.

mod system_git;
mod system_git_ops;

pub use system_git::SystemGit;
