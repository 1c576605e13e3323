//! Git references (branches, HEAD, tags)
//!
//! This module reads Git references, human-readable names pointing to commits.
//! References can be:
//! - Direct: Containing a commit SHA-1
//! - Symbolic: Pointing to another reference (e.g., HEAD -> refs/heads/master)
//!
//! ## Lookup order
//!
//! 1. The loose ref file under the git directory (`HEAD`, `refs/heads/main`, ...)
//! 2. The `packed-refs` file, for refs that have been packed by `git gc`
//!
//! References are only ever read here; nothing in this crate writes them.

use crate::artifacts::core::error::{HistoryError, Result};
use crate::artifacts::objects::object_id::ObjectId;
use derive_new::new;
use std::path::Path;

/// Regex pattern for parsing symbolic references
const SYMREF_REGEX: &str = r"^ref: (.+)$";

/// Symbolic refs pointing at more refs than this are treated as a cycle
const MAX_SYMREF_DEPTH: usize = 10;

/// Name of the HEAD reference
pub const HEAD_REF_NAME: &str = "HEAD";

/// Internal representation of a reference value
#[derive(Debug, Clone)]
enum SymRefOrOid {
    /// Symbolic reference pointing to another ref
    SymRef(String),
    /// Direct object ID
    Oid(ObjectId),
}

impl SymRefOrOid {
    fn read_symref_or_oid(path: &Path) -> Result<Option<SymRefOrOid>> {
        if !path.is_file() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path)?;
        let content = content.trim();

        if content.is_empty() {
            return Ok(None);
        }

        let symref_match = regex::Regex::new(SYMREF_REGEX)?.captures(content);
        if let Some(symref_match) = symref_match {
            Ok(Some(SymRefOrOid::SymRef(symref_match[1].to_string())))
        } else {
            Ok(Some(SymRefOrOid::Oid(ObjectId::try_parse(content).map_err(
                |_| HistoryError::parse(path.display().to_string(), "invalid reference content"),
            )?)))
        }
    }
}

/// Read-only view of the references in a git directory
#[derive(Debug, new)]
pub struct Refs {
    /// Path to the git directory (typically `.git`)
    path: Box<Path>,
}

impl Refs {
    /// Resolve a fully qualified reference name to the object it points at
    ///
    /// Follows symbolic references until reaching a direct OID.
    ///
    /// # Returns
    ///
    /// Some(ObjectId) if the ref exists, None otherwise (including an unborn HEAD)
    pub fn read_ref(&self, name: &str) -> Result<Option<ObjectId>> {
        let mut name = name.to_string();

        for _ in 0..MAX_SYMREF_DEPTH {
            match SymRefOrOid::read_symref_or_oid(&self.path.join(&name))? {
                Some(SymRefOrOid::SymRef(target)) => name = target,
                Some(SymRefOrOid::Oid(oid)) => return Ok(Some(oid)),
                None => return self.read_packed_ref(&name),
            }
        }

        Err(HistoryError::parse(
            name,
            format!("symbolic reference nested deeper than {MAX_SYMREF_DEPTH}"),
        ))
    }

    pub fn read_head(&self) -> Result<Option<ObjectId>> {
        self.read_ref(HEAD_REF_NAME)
    }

    fn read_packed_ref(&self, name: &str) -> Result<Option<ObjectId>> {
        let packed_refs_path = self.path.join("packed-refs");
        if !packed_refs_path.is_file() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&packed_refs_path)?;
        for line in content.lines() {
            // comments and peeled tag lines
            if line.starts_with('#') || line.starts_with('^') {
                continue;
            }

            if let Some((oid, ref_name)) = line.split_once(' ')
                && ref_name.trim() == name
            {
                return ObjectId::try_parse(oid)
                    .map(Some)
                    .map_err(|_| HistoryError::parse("packed-refs", format!("invalid entry for {name}")));
            }
        }

        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_fs::TempDir;
    use assert_fs::prelude::*;
    use pretty_assertions::assert_eq;

    const OID: &str = "435ffceb7ba576c937e922766e37d4f7abdcc122";
    const PACKED_OID: &str = "a13dba1e469944772490909daa58c53ac8fa4b0d";

    fn refs(dir: &TempDir) -> Refs {
        Refs::new(dir.path().to_path_buf().into_boxed_path())
    }

    #[test]
    fn follows_head_to_branch() {
        let dir = TempDir::new().unwrap();
        dir.child("HEAD").write_str("ref: refs/heads/main\n").unwrap();
        dir.child("refs/heads/main").write_str(&format!("{OID}\n")).unwrap();

        assert_eq!(
            refs(&dir).read_head().unwrap(),
            Some(ObjectId::try_parse(OID).unwrap())
        );
    }

    #[test]
    fn unborn_head_is_none() {
        let dir = TempDir::new().unwrap();
        dir.child("HEAD").write_str("ref: refs/heads/main\n").unwrap();

        assert_eq!(refs(&dir).read_head().unwrap(), None);
    }

    #[test]
    fn falls_back_to_packed_refs() {
        let dir = TempDir::new().unwrap();
        dir.child("packed-refs")
            .write_str(&format!(
                "# pack-refs with: peeled fully-peeled sorted\n{PACKED_OID} refs/tags/v1.0\n^{OID}\n"
            ))
            .unwrap();

        assert_eq!(
            refs(&dir).read_ref("refs/tags/v1.0").unwrap(),
            Some(ObjectId::try_parse(PACKED_OID).unwrap())
        );
        assert_eq!(refs(&dir).read_ref("refs/tags/v2.0").unwrap(), None);
    }

    #[test]
    fn symref_cycle_is_an_error() {
        let dir = TempDir::new().unwrap();
        dir.child("refs/heads/a").write_str("ref: refs/heads/b\n").unwrap();
        dir.child("refs/heads/b").write_str("ref: refs/heads/a\n").unwrap();

        assert!(refs(&dir).read_ref("refs/heads/a").is_err());
    }
}
