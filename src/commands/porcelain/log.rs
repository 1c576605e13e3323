use crate::CommitDisplayFormat;
use crate::areas::repository::Repository;
use crate::artifacts::log::query::PageOptions;
use crate::artifacts::objects::commit::Commit;
use anyhow::Context;
use colored::Colorize;
use derive_new::new;
use std::io::Write;

#[derive(Debug, Clone, Copy, Default, new)]
pub struct DisplayOptions {
    pub format: CommitDisplayFormat,
    pub abbrev_commit: bool,
}

impl Repository {
    /// Print one page of history starting at `revision`
    pub fn log(
        &self,
        writer: &mut dyn Write,
        revision: &str,
        page: usize,
        size: usize,
        options: &PageOptions,
        display: &DisplayOptions,
    ) -> anyhow::Result<()> {
        let start = self
            .commit_by_revision(revision, "")
            .with_context(|| format!("failed to resolve revision '{revision}'"))?;
        let commits = self.commits_by_page(&start, page, size, options)?;

        write_commits(writer, &commits, display)
    }
}

/// Print commits the way `git log` separates them
pub fn write_commits(
    writer: &mut dyn Write,
    commits: &[Commit],
    display: &DisplayOptions,
) -> anyhow::Result<()> {
    for (position, commit) in commits.iter().enumerate() {
        if position > 0 && display.format == CommitDisplayFormat::Medium {
            writeln!(writer)?;
        }
        write_commit(writer, commit, display)?;
    }

    Ok(())
}

pub fn write_commit(
    writer: &mut dyn Write,
    commit: &Commit,
    display: &DisplayOptions,
) -> anyhow::Result<()> {
    match display.format {
        CommitDisplayFormat::Medium => show_commit_medium(writer, commit, display.abbrev_commit),
        CommitDisplayFormat::OneLine => show_commit_oneline(writer, commit, display.abbrev_commit),
    }
}

fn show_commit_medium(
    writer: &mut dyn Write,
    commit: &Commit,
    abbrev_commit: bool,
) -> anyhow::Result<()> {
    writeln!(
        writer,
        "{}",
        format!("commit {}", abbrev_commit_id(commit, abbrev_commit)).yellow()
    )?;
    if commit.is_merge() {
        let parents = commit
            .parent_ids()
            .iter()
            .map(|parent_id| parent_id.to_short_oid())
            .collect::<Vec<_>>()
            .join(" ");
        writeln!(writer, "Merge: {}", parents)?;
    }
    writeln!(writer, "Author: {}", commit.author().display_name())?;
    writeln!(writer, "Date:   {}", commit.author().readable_timestamp())?;
    writeln!(writer)?;
    for message_line in commit.message().lines() {
        writeln!(writer, "    {}", message_line)?;
    }

    Ok(())
}

fn show_commit_oneline(
    writer: &mut dyn Write,
    commit: &Commit,
    abbrev_commit: bool,
) -> anyhow::Result<()> {
    writeln!(
        writer,
        "{} {}",
        abbrev_commit_id(commit, abbrev_commit).yellow(),
        commit.summary()
    )?;

    Ok(())
}

fn abbrev_commit_id(commit: &Commit, abbrev_commit: bool) -> String {
    if abbrev_commit {
        commit.id().to_short_oid()
    } else {
        commit.id().to_string()
    }
}
