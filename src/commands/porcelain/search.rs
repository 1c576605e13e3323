use crate::areas::repository::Repository;
use crate::artifacts::log::query::SearchOptions;
use crate::commands::porcelain::log::{DisplayOptions, write_commits};
use anyhow::Context;
use std::io::Write;

impl Repository {
    /// Print the commits reachable from `revision` whose message matches `pattern`
    pub fn search(
        &self,
        writer: &mut dyn Write,
        revision: &str,
        pattern: &str,
        options: &SearchOptions,
        display: &DisplayOptions,
    ) -> anyhow::Result<()> {
        let start = self
            .commit_by_revision(revision, "")
            .with_context(|| format!("failed to resolve revision '{revision}'"))?;
        let commits = self
            .search_commits(&start, pattern, options)
            .with_context(|| format!("failed to search for '{pattern}'"))?;

        write_commits(writer, &commits, display)
    }
}
