use crate::areas::repository::Repository;
use crate::artifacts::log::query::PageOptions;
use anyhow::Context;
use std::io::Write;

impl Repository {
    /// Print how many commits are reachable from `revision`
    pub fn count(
        &self,
        writer: &mut dyn Write,
        revision: &str,
        options: &PageOptions,
    ) -> anyhow::Result<()> {
        let start = self
            .commit_by_revision(revision, "")
            .with_context(|| format!("failed to resolve revision '{revision}'"))?;

        writeln!(writer, "{}", self.commits_count(&start, options)?)?;

        Ok(())
    }
}
