//! History queries built on [`RevList`]
//!
//! Every query walks from its start commit again; nothing is cached between
//! calls. Errors from the walk surface as soon as they are hit, including
//! inside pages that end up skipped.

use crate::areas::repository::Repository;
use crate::artifacts::core::error::{HistoryError, Result};
use crate::artifacts::log::path_filter::PathFilter;
use crate::artifacts::log::rev_list::RevList;
use crate::artifacts::objects::commit::Commit;
use chrono::{DateTime, FixedOffset};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageOptions {
    /// Only count commits touching this path
    pub path: Option<PathBuf>,
}

impl PageOptions {
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchOptions {
    pub path: Option<PathBuf>,
    /// Stop after this many matches; `0` means no limit
    pub max_count: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AncestorOptions {
    pub path: Option<PathBuf>,
    pub skip: usize,
    /// `0` means no limit
    pub max_count: usize,
}

impl Repository {
    /// Walk the history reachable from `start`, optionally restricted to `path`
    pub fn rev_list(&self, start: &Commit, path: Option<&Path>) -> RevList<'_> {
        RevList::new(self, *start.id(), PathFilter::from_option(path))
    }

    /// Most recent commit, starting at `start`, that touched `path`
    ///
    /// An empty path returns `start` itself.
    pub fn commit_by_path(&self, start: &Commit, path: impl AsRef<Path>) -> Result<Commit> {
        let path = path.as_ref();
        if path.as_os_str().is_empty() {
            return Ok(start.clone());
        }

        self.rev_list(start, Some(path))
            .next()
            .transpose()?
            .ok_or_else(|| {
                HistoryError::revision_not_exist(start.id().to_string(), path.display().to_string())
            })
    }

    /// Resolve a revision expression, then find the last commit touching `path`
    pub fn commit_by_revision(&self, expression: &str, path: impl AsRef<Path>) -> Result<Commit> {
        let oid = self.resolve_revision(expression)?;
        let start = self.resolve(&oid)?;

        self.commit_by_path(&start, path)
    }

    /// One page of history
    ///
    /// Pages are 1-based; page `0` is treated as page `1`. A page past the end
    /// of history is empty rather than an error.
    pub fn commits_by_page(
        &self,
        start: &Commit,
        page: usize,
        size: usize,
        options: &PageOptions,
    ) -> Result<Vec<Commit>> {
        if size == 0 {
            return Err(HistoryError::InvalidArgument {
                name: "size",
                reason: "page size must be greater than zero".to_string(),
            });
        }

        let Some(offset) = page.saturating_sub(1).checked_mul(size) else {
            return Ok(Vec::new());
        };

        tracing::debug!(oid = %start.id(), page, size, offset, "paginating history");

        take_window(self.rev_list(start, options.path.as_deref()), offset, size)
    }

    /// Commits whose message matches `pattern`
    ///
    /// The pattern is compiled before anything is read from the store; an
    /// empty pattern matches every commit.
    pub fn search_commits(
        &self,
        start: &Commit,
        pattern: &str,
        options: &SearchOptions,
    ) -> Result<Vec<Commit>> {
        let regex = regex::Regex::new(pattern)?;

        let mut matches = Vec::new();
        for commit in self.rev_list(start, options.path.as_deref()) {
            let commit = commit?;
            if !regex.is_match(commit.message()) {
                continue;
            }

            matches.push(commit);
            if matches.len() == options.max_count {
                break;
            }
        }

        tracing::debug!(oid = %start.id(), pattern, found = matches.len(), "searched history");

        Ok(matches)
    }

    /// Number of commits reachable from `start` (touching `path`, if given)
    pub fn commits_count(&self, start: &Commit, options: &PageOptions) -> Result<usize> {
        self.rev_list(start, options.path.as_deref())
            .try_fold(0, |count, commit| commit.map(|_| count + 1))
    }

    /// Commits committed at or after `since`
    pub fn commits_since(
        &self,
        start: &Commit,
        since: DateTime<FixedOffset>,
        options: &PageOptions,
    ) -> Result<Vec<Commit>> {
        let mut commits = Vec::new();
        for commit in self.rev_list(start, options.path.as_deref()) {
            let commit = commit?;
            if commit.timestamp() >= since {
                commits.push(commit);
            }
        }

        Ok(commits)
    }

    /// History strictly below `start`
    pub fn ancestors(&self, start: &Commit, options: &AncestorOptions) -> Result<Vec<Commit>> {
        let walk = self
            .rev_list(start, options.path.as_deref())
            .filter(|commit| !matches!(commit, Ok(commit) if commit.id() == start.id()));
        let limit = match options.max_count {
            0 => usize::MAX,
            max_count => max_count,
        };

        take_window(walk, options.skip, limit)
    }
}

/// Skip `offset` commits, then collect at most `limit`
///
/// Skipped entries are still checked for errors.
fn take_window(
    walk: impl Iterator<Item = Result<Commit>>,
    offset: usize,
    limit: usize,
) -> Result<Vec<Commit>> {
    let mut window = Vec::new();
    for (position, commit) in walk.enumerate() {
        let commit = commit?;
        if position < offset {
            continue;
        }

        window.push(commit);
        if window.len() == limit {
            break;
        }
    }

    Ok(window)
}
