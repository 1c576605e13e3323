use crate::areas::repository::Repository;
use crate::commands::porcelain::log::{DisplayOptions, write_commit};
use std::io::Write;
use std::path::Path;

impl Repository {
    /// Print the most recent commit, from `revision` down, that changed `path`
    pub fn last_commit(
        &self,
        writer: &mut dyn Write,
        revision: &str,
        path: &Path,
        display: &DisplayOptions,
    ) -> anyhow::Result<()> {
        let commit = self.commit_by_revision(revision, path)?;

        write_commit(writer, &commit, display)
    }
}
