//! Commit history traversal and the queries built on it
//!
//! - `rev_list`: ordered, lazy walk over the ancestry of a commit
//! - `path_filter`: per-commit predicate restricting a walk to one path
//! - `query`: pagination, message search and path lookups on [`Repository`]
//!
//! [`Repository`]: crate::areas::repository::Repository

pub mod path_filter;
pub mod query;
pub mod rev_list;

#[cfg(test)]
pub(crate) mod fixtures;
