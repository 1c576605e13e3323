//! Read-only commit history queries over a content-addressed object store
//!
//! The crate is split the same way as a git implementation would be:
//!
//! - `areas`: where objects come from (the [`ObjectStore`] trait, an in-memory
//!   store, a loose-object store over `.git`) and the [`Repository`] handle
//! - `artifacts`: the object model (commits, signatures, trees), revision
//!   expressions and the history walk with its queries
//! - `commands`: the `bitlog` command-line front end
//!
//! ```no_run
//! use bitlog::{PageOptions, Repository};
//!
//! # fn main() -> bitlog::Result<()> {
//! let repository = Repository::open(".")?;
//! let head = repository.resolve(&repository.resolve_revision("HEAD")?)?;
//! for commit in repository.commits_by_page(&head, 1, 10, &PageOptions::default())? {
//!     println!("{} {}", commit.id().to_short_oid(), commit.summary());
//! }
//! # Ok(())
//! # }
//! ```

pub mod areas;
pub mod artifacts;
pub mod commands;

pub use areas::memory::MemoryStore;
pub use areas::repository::Repository;
pub use areas::store::ObjectStore;
pub use artifacts::core::error::{HistoryError, Result};
pub use artifacts::log::query::{AncestorOptions, PageOptions, SearchOptions};
pub use artifacts::log::rev_list::RevList;
pub use artifacts::objects::commit::Commit;
pub use artifacts::objects::object_id::ObjectId;
pub use artifacts::objects::signature::Signature;

/// How commits are printed by the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum CommitDisplayFormat {
    /// Header, author, date and the indented message
    #[default]
    Medium,
    /// Id and summary on a single line
    #[value(name = "oneline")]
    OneLine,
}

/// When to colorize CLI output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Only when stdout is a terminal
    #[default]
    Auto,
    Always,
    Never,
}
