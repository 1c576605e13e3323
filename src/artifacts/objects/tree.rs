//! Git tree object
//!
//! Trees represent directory snapshots in Git. They contain entries for files (blobs)
//! and subdirectories (other trees), along with their names and modes.
//!
//! ## Format
//!
//! On disk: `tree <size>\0<entries>`
//! Each entry: `<mode> <name>\0<20-byte-sha1>`
//!
//! Entries are ordered by name, with directory names compared as if they
//! ended in `/`.

use crate::artifacts::core::error::{HistoryError, Result};
use crate::artifacts::objects::entry_mode::EntryMode;
use crate::artifacts::objects::object::{Object, Packable, Unpackable, frame};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use bytes::Bytes;
use derive_new::new;
use std::collections::BTreeMap;
use std::io::{BufRead, Write};

/// A single named entry of a tree
#[derive(Debug, Clone, Copy, PartialEq, Eq, new)]
pub struct TreeEntry {
    pub oid: ObjectId,
    pub mode: EntryMode,
}

impl TreeEntry {
    pub fn is_tree(&self) -> bool {
        self.mode.is_tree()
    }

    pub fn object_type(&self) -> ObjectType {
        match self.mode {
            EntryMode::Directory => ObjectType::Tree,
            EntryMode::Submodule => ObjectType::Commit,
            _ => ObjectType::Blob,
        }
    }
}

/// Git tree object representing a directory snapshot
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tree {
    entries: BTreeMap<String, TreeEntry>,
}

impl Tree {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an entry, returning the tree for chaining
    pub fn with_entry(mut self, name: impl Into<String>, entry: TreeEntry) -> Self {
        self.entries.insert(name.into(), entry);
        self
    }

    pub fn get(&self, name: &str) -> Option<&TreeEntry> {
        self.entries.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = (&String, &TreeEntry)> {
        self.entries.iter()
    }

    /// Entries in record order: directories sort as though suffixed by `/`
    fn ordered_entries(&self) -> Vec<(&String, &TreeEntry)> {
        let mut entries: Vec<_> = self.entries.iter().collect();
        entries.sort_by_cached_key(|(name, entry)| {
            let mut key = name.as_bytes().to_vec();
            if entry.is_tree() {
                key.push(b'/');
            }
            key
        });
        entries
    }
}

impl Packable for Tree {
    fn serialize(&self) -> Result<Bytes> {
        let mut content = Vec::new();
        for (name, entry) in self.ordered_entries() {
            content.write_all(format!("{} {}", entry.mode.as_str(), name).as_bytes())?;
            content.push(0);
            entry.oid.write_h40_to(&mut content)?;
        }

        frame(self.object_type(), &content)
    }
}

impl Unpackable for Tree {
    fn deserialize(oid: ObjectId, reader: impl BufRead) -> Result<Self> {
        let mut entries = BTreeMap::new();
        let mut reader = reader;

        // Reuse scratch buffers to reduce allocs
        let mut mode_bytes = Vec::new();
        let mut name_bytes = Vec::new();

        loop {
            mode_bytes.clear();
            // Read "mode " (space-delimited)
            let n = reader.read_until(b' ', &mut mode_bytes)?;
            if n == 0 {
                break; // clean EOF: no more entries
            }
            // Must end with ' ' or it's malformed
            if mode_bytes.pop() != Some(b' ') {
                return Err(HistoryError::parse(
                    "tree entry mode",
                    format!("unexpected end of tree {}", oid),
                ));
            }
            let mode = EntryMode::from_octal_str(&String::from_utf8_lossy(&mode_bytes))?;

            // Read "name\0"
            name_bytes.clear();
            reader.read_until(b'\0', &mut name_bytes)?;
            if name_bytes.pop() != Some(b'\0') {
                return Err(HistoryError::parse(
                    "tree entry name",
                    format!("unexpected end of tree {}", oid),
                ));
            }
            let name = String::from_utf8_lossy(&name_bytes).into_owned();

            let entry_oid = ObjectId::read_h40_from(&mut reader).map_err(|_| {
                HistoryError::parse(
                    "tree entry id",
                    format!("unexpected end of tree {}", oid),
                )
            })?;

            entries.insert(name, TreeEntry::new(entry_oid, mode));
        }

        Ok(Tree { entries })
    }
}

impl Object for Tree {
    fn object_type(&self) -> ObjectType {
        ObjectType::Tree
    }

    fn display(&self) -> String {
        self.ordered_entries()
            .into_iter()
            .map(|(name, entry)| {
                format!(
                    "{:0>6} {} {}\t{}",
                    entry.mode.as_str(),
                    entry.object_type(),
                    entry.oid,
                    name
                )
            })
            .collect::<Vec<String>>()
            .join("\n")
    }
}
