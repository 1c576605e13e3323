use crate::areas::database::Database;
use crate::areas::store::{ObjectStore, read_object};
use crate::artifacts::core::error::{HistoryError, Result};
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tag::Tag;
use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

/// Longest chain of tags followed while peeling
const MAX_TAG_DEPTH: usize = 10;

/// Read-only handle over an object store
///
/// Cheap to clone; clones share the same store. Every query builds its own
/// walk state, so one repository can serve concurrent readers.
#[derive(Clone)]
pub struct Repository {
    store: Arc<dyn ObjectStore>,
}

impl Repository {
    /// Open the git directory of a work tree or a bare repository
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let git_dir = if path.join(".git").is_dir() {
            path.join(".git")
        } else if path.join("objects").is_dir() && path.join("HEAD").is_file() {
            path.to_path_buf()
        } else {
            return Err(HistoryError::InvalidArgument {
                name: "repository",
                reason: format!("not a git repository: {}", path.display()),
            });
        };

        tracing::debug!(git_dir = %git_dir.display(), "opened repository");

        Ok(Self::with_store(Database::new(&git_dir)))
    }

    pub fn with_store(store: impl ObjectStore + 'static) -> Self {
        Repository {
            store: Arc::new(store),
        }
    }

    pub fn with_shared_store(store: Arc<dyn ObjectStore>) -> Self {
        Repository { store }
    }

    pub fn store(&self) -> &dyn ObjectStore {
        self.store.as_ref()
    }

    /// Fetch and parse the commit stored under `oid`
    ///
    /// Nothing is cached between calls.
    pub fn resolve(&self, oid: &ObjectId) -> Result<Commit> {
        tracing::trace!(%oid, "resolving commit");

        read_object(self.store(), oid, ObjectType::Commit)
    }

    /// Follow annotated tags from `oid` until a commit is reached
    ///
    /// Returns `None` when the chain ends at a tree or blob. Missing objects
    /// fail with `ObjectNotFound`.
    pub fn peel_to_commit(&self, oid: &ObjectId) -> Result<Option<ObjectId>> {
        let mut current = *oid;

        for _ in 0..=MAX_TAG_DEPTH {
            let mut reader = Cursor::new(self.store.load(&current)?);
            match ObjectType::parse_object_type(&mut reader)? {
                ObjectType::Commit => return Ok(Some(current)),
                ObjectType::Tag => {
                    let tag: Tag = read_object(self.store(), &current, ObjectType::Tag)?;
                    tracing::trace!(tag = %current, target = %tag.target_id(), "peeling tag");
                    current = *tag.target_id();
                }
                other => {
                    tracing::trace!(%current, object_type = %other, "revision does not name a commit");
                    return Ok(None);
                }
            }
        }

        Err(HistoryError::parse(
            "object",
            format!("tag chain from {} is deeper than {}", oid, MAX_TAG_DEPTH),
        ))
    }

    /// The `n`th parent of `commit`, in record order
    ///
    /// An index past the last parent fails with an empty `RevisionNotExist`.
    pub fn parent(&self, commit: &Commit, n: usize) -> Result<Commit> {
        match commit.parent_id(n) {
            Some(parent_id) => self.resolve(parent_id),
            None => Err(HistoryError::revision_not_exist("", "")),
        }
    }
}

impl std::fmt::Debug for Repository {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Repository").finish_non_exhaustive()
    }
}
