//! User-facing history commands
//!
//! - `log`: one page of history (and the shared commit printers)
//! - `search`: commits whose message matches a pattern
//! - `last_commit`: the last commit that changed a path
//! - `show`: a single commit
//! - `count`: number of reachable commits

pub mod count;
pub mod last_commit;
pub mod log;
pub mod search;
pub mod show;
