//! Object store capability
//!
//! The history engine never touches storage directly. Everything it needs from
//! the outside world goes through [`ObjectStore`]:
//!
//! - `load`: raw, framed object bytes for an id
//! - `read_ref`: reference lookup used by revision resolution
//! - `find_objects_by_prefix`: abbreviated id lookup (optional)
//! - `diff_touches_path`: whether a commit changed a path relative to a parent
//!
//! Implementations must be safe for concurrent reads; the engine keeps no
//! shared mutable state of its own.

use crate::artifacts::core::error::{HistoryError, Result};
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::entry_mode::EntryMode;
use crate::artifacts::objects::object::Unpackable;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::tree::{Tree, TreeEntry};
use bytes::Bytes;
use std::io::Cursor;
use std::path::{Component, Path};

pub trait ObjectStore: Send + Sync {
    /// Load the framed bytes (`<type> <size>\0<body>`) of an object
    ///
    /// Fails with `ObjectNotFound` when the store has no such object.
    fn load(&self, oid: &ObjectId) -> Result<Bytes>;

    /// Look up a fully qualified reference (e.g. `HEAD`, `refs/heads/main`)
    fn read_ref(&self, name: &str) -> Result<Option<ObjectId>>;

    /// All object ids starting with the given hex prefix
    fn find_objects_by_prefix(&self, _prefix: &str) -> Result<Vec<ObjectId>> {
        Ok(Vec::new())
    }

    /// Whether `path` differs between the trees of `commit_oid` and `parent_oid`
    ///
    /// A missing parent compares against the empty tree, so a root commit
    /// touches a path iff the path exists in its tree.
    fn diff_touches_path(
        &self,
        commit_oid: &ObjectId,
        parent_oid: Option<&ObjectId>,
        path: &Path,
    ) -> Result<bool> {
        let new_entry = entry_at_path(self, commit_oid, path)?;
        let old_entry = match parent_oid {
            Some(parent_oid) => entry_at_path(self, parent_oid, path)?,
            None => None,
        };

        Ok(new_entry != old_entry)
    }
}

/// Load an object and decode it as `T`, checking the frame type first
pub fn read_object<S, T>(store: &S, oid: &ObjectId, expected: ObjectType) -> Result<T>
where
    S: ObjectStore + ?Sized,
    T: Unpackable,
{
    let mut reader = Cursor::new(store.load(oid)?);
    let object_type = ObjectType::parse_object_type(&mut reader)?;
    if object_type != expected {
        return Err(HistoryError::parse(
            "type",
            format!("object {} is a {}, not a {}", oid, object_type, expected),
        ));
    }

    T::deserialize(*oid, reader)
}

/// Entry found at `path` inside the tree of a commit
///
/// An empty path names the root tree itself.
fn entry_at_path<S>(store: &S, commit_oid: &ObjectId, path: &Path) -> Result<Option<TreeEntry>>
where
    S: ObjectStore + ?Sized,
{
    let commit: Commit = read_object(store, commit_oid, ObjectType::Commit)?;
    let mut entry = TreeEntry::new(*commit.tree_id(), EntryMode::Directory);

    for component in path.components() {
        let name = match component {
            Component::Normal(name) => name.to_string_lossy(),
            Component::CurDir | Component::RootDir => continue,
            _ => {
                return Err(HistoryError::InvalidArgument {
                    name: "path",
                    reason: format!("'{}' must be relative to the tree root", path.display()),
                });
            }
        };
        if !entry.is_tree() {
            return Ok(None);
        }

        let tree: Tree = read_object(store, &entry.oid, ObjectType::Tree)?;
        match tree.get(&name) {
            Some(child) => entry = *child,
            None => return Ok(None),
        }
    }

    Ok(Some(entry))
}
