//! Git commit object
//!
//! Commits represent snapshots of the repository at specific points in time.
//! They contain:
//! - A tree object ID (directory snapshot)
//! - Parent commit ID(s) (for history)
//! - Author and committer information
//! - Commit message
//!
//! ## Format
//!
//! ```text
//! commit <size>\0
//! tree <tree-sha>
//! parent <parent-sha>
//! author <name> <email> <timestamp> <timezone>
//! committer <name> <email> <timestamp> <timezone>
//! gpgsig -----BEGIN PGP SIGNATURE-----
//!  <continuation lines start with a space>
//!
//! <commit message>
//! ```
//!
//! Headers other than `tree`, `parent`, `author` and `committer` are skipped
//! along with their continuation lines.

use crate::artifacts::core::error::{HistoryError, Result};
use crate::artifacts::objects::object::{Object, Packable, Unpackable, frame};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::signature::Signature;
use bytes::Bytes;
use std::io::BufRead;

/// Git commit object
///
/// Immutable once parsed. A commit built with [`Commit::new`] carries the zero
/// id until it is stored and read back.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    id: ObjectId,
    /// Tree object ID representing the directory snapshot
    tree_id: ObjectId,
    /// Parent commit IDs in record order (empty for root commits)
    parent_ids: Vec<ObjectId>,
    /// Author who wrote the changes
    author: Signature,
    /// Committer who recorded the commit
    committer: Signature,
    /// Message with a single trailing line terminator removed
    message: String,
}

impl Commit {
    /// Create a new, not yet stored commit
    pub fn new(
        tree_id: ObjectId,
        parent_ids: Vec<ObjectId>,
        author: Signature,
        committer: Signature,
        message: String,
    ) -> Self {
        Commit {
            id: ObjectId::zero(),
            tree_id,
            parent_ids,
            author,
            committer,
            message,
        }
    }

    /// Decode a commit record body
    ///
    /// # Arguments
    ///
    /// * `id` - The id the record was stored under
    /// * `data` - Record bytes without the loose-object frame
    pub fn parse(id: ObjectId, data: &[u8]) -> Result<Self> {
        let mut tree_id = None;
        let mut parent_ids = Vec::new();
        let mut author = None;
        let mut committer = None;

        let mut rest = data;
        loop {
            let Some(line_end) = rest.iter().position(|&b| b == b'\n') else {
                return Err(HistoryError::parse(
                    "message",
                    "missing blank line after headers",
                ));
            };
            let line = &rest[..line_end];
            rest = &rest[line_end + 1..];

            if line.is_empty() || line == b"\r" {
                break;
            }
            // continuation of a multi-line header
            if line[0] == b' ' {
                continue;
            }

            let Some(space) = line.iter().position(|&b| b == b' ') else {
                return Err(HistoryError::parse(
                    decode(line),
                    "header line without a value",
                ));
            };
            let value = decode(&line[space + 1..]);

            match &line[..space] {
                b"tree" => {
                    if tree_id.is_some() {
                        return Err(HistoryError::parse("tree", "duplicate header"));
                    }
                    tree_id = Some(parse_oid("tree", &value)?);
                }
                b"parent" => parent_ids.push(parse_oid("parent", &value)?),
                b"author" => {
                    if author.is_some() {
                        return Err(HistoryError::parse("author", "duplicate header"));
                    }
                    author = Some(Signature::try_parse("author", &value)?);
                }
                b"committer" => {
                    if committer.is_some() {
                        return Err(HistoryError::parse("committer", "duplicate header"));
                    }
                    committer = Some(Signature::try_parse("committer", &value)?);
                }
                other => {
                    tracing::trace!(header = %decode(other), "skipping commit header");
                }
            }
        }

        let body = rest
            .strip_suffix(b"\r\n")
            .or_else(|| rest.strip_suffix(b"\n"))
            .unwrap_or(rest);

        Ok(Commit {
            id,
            tree_id: tree_id.ok_or_else(|| HistoryError::parse("tree", "missing header"))?,
            parent_ids,
            author: author.ok_or_else(|| HistoryError::parse("author", "missing header"))?,
            committer: committer
                .ok_or_else(|| HistoryError::parse("committer", "missing header"))?,
            message: decode(body),
        })
    }

    pub fn id(&self) -> &ObjectId {
        &self.id
    }

    /// Get the tree object ID
    pub fn tree_id(&self) -> &ObjectId {
        &self.tree_id
    }

    pub fn parent_ids(&self) -> &[ObjectId] {
        &self.parent_ids
    }

    pub fn parent_id(&self, n: usize) -> Option<&ObjectId> {
        self.parent_ids.get(n)
    }

    pub fn parents_count(&self) -> usize {
        self.parent_ids.len()
    }

    pub fn is_root(&self) -> bool {
        self.parent_ids.is_empty()
    }

    pub fn is_merge(&self) -> bool {
        self.parent_ids.len() > 1
    }

    pub fn author(&self) -> &Signature {
        &self.author
    }

    pub fn committer(&self) -> &Signature {
        &self.committer
    }

    /// Get the full commit message
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Get the first line of the commit message
    ///
    /// Useful for short-form display (e.g., `log --oneline`)
    pub fn summary(&self) -> &str {
        let line = self.message.split('\n').next().unwrap_or_default();
        line.strip_suffix('\r').unwrap_or(line)
    }

    /// Committer time, the ordering key of history walks
    pub fn timestamp(&self) -> chrono::DateTime<chrono::FixedOffset> {
        self.committer.when()
    }
}

fn decode(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

fn parse_oid(field: &str, value: &str) -> Result<ObjectId> {
    ObjectId::try_parse(value.trim()).map_err(|_| {
        HistoryError::parse(field, format!("invalid object id '{}'", value.trim()))
    })
}

impl Packable for Commit {
    fn serialize(&self) -> Result<Bytes> {
        let mut content = self.display();
        content.push('\n');

        frame(self.object_type(), content.as_bytes())
    }
}

impl Unpackable for Commit {
    fn deserialize(oid: ObjectId, mut reader: impl BufRead) -> Result<Self> {
        let mut content = Vec::new();
        reader.read_to_end(&mut content)?;

        Self::parse(oid, &content)
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }

    fn display(&self) -> String {
        let mut lines = vec![];

        lines.push(format!("tree {}", self.tree_id));
        for parent in &self.parent_ids {
            lines.push(format!("parent {}", parent));
        }
        lines.push(format!("author {}", self.author.display()));
        lines.push(format!("committer {}", self.committer.display()));
        lines.push(String::new());
        lines.push(self.message.to_string());

        lines.join("\n")
    }
}
