//! Release state machine with transactional rollback
//!
//! - **version**: three-component versions and semantic increment
//! - **resolver**: fixed-version vs increment strategies (interactive menu)
//! - **preflight**: repository and environment validation
//! - **tags**: conflicting-tag reconciliation
//! - **changelog**: dated-section insertion
//! - **manifest**: version field read/rewrite
//! - **publish**: stage, commit, tag, push, summary
//! - **gate**: external test suite as a pass/fail gate
//! - **rollback**: best-effort undo of partial runs
//! - **pipeline**: the strictly sequential orchestration

pub mod changelog;
pub mod gate;
pub mod manifest;
pub mod pipeline;
pub mod preflight;
pub mod publish;
pub mod resolver;
pub mod rollback;
pub mod tags;
pub mod version;
