use crate::areas::repository::Repository;
use crate::commands::porcelain::log::{DisplayOptions, write_commit};
use anyhow::Context;
use std::io::Write;

impl Repository {
    /// Print a single commit named by a revision expression
    pub fn show(
        &self,
        writer: &mut dyn Write,
        revision: &str,
        display: &DisplayOptions,
    ) -> anyhow::Result<()> {
        let commit = self
            .commit_by_revision(revision, "")
            .with_context(|| format!("failed to resolve revision '{revision}'"))?;

        write_commit(writer, &commit, display)
    }
}
