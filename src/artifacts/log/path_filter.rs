use crate::areas::store::ObjectStore;
use crate::artifacts::core::error::Result;
use crate::artifacts::objects::commit::Commit;
use std::path::{Path, PathBuf};

/// Restricts a walk to commits that change one path
///
/// A commit touches the path when its tree differs at that path from the tree
/// of every parent. A root commit touches it when the path exists at all.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathFilter {
    path: Option<PathBuf>,
}

impl PathFilter {
    /// Filter that lets every commit through
    pub fn empty() -> Self {
        Self::default()
    }

    /// An empty path is the same as no filter at all
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();

        Self {
            path: (!path.as_os_str().is_empty()).then(|| path.to_path_buf()),
        }
    }

    pub fn from_option(path: Option<&Path>) -> Self {
        path.map(Self::new).unwrap_or_default()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn is_empty(&self) -> bool {
        self.path.is_none()
    }

    pub fn matches(&self, store: &dyn ObjectStore, commit: &Commit) -> Result<bool> {
        let Some(path) = &self.path else {
            return Ok(true);
        };

        if commit.is_root() {
            return store.diff_touches_path(commit.id(), None, path);
        }

        for parent_id in commit.parent_ids() {
            if !store.diff_touches_path(commit.id(), Some(parent_id), path)? {
                tracing::trace!(
                    oid = %commit.id(),
                    parent = %parent_id,
                    path = %path.display(),
                    "same as parent at path"
                );
                return Ok(false);
            }
        }

        Ok(true)
    }
}
