//! Git annotated tag object
//!
//! ## Format
//!
//! ```text
//! tag <size>\0
//! object <target-sha>
//! type <target-type>
//! tag <name>
//! tagger <name> <email> <timestamp> <timezone>
//!
//! <tag message>
//! ```
//!
//! Revision lookups follow the `object` header until they reach a commit.

use crate::artifacts::core::error::{HistoryError, Result};
use crate::artifacts::objects::object::{Object, Packable, Unpackable, frame};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::artifacts::objects::signature::Signature;
use bytes::Bytes;
use std::io::BufRead;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tag {
    id: ObjectId,
    target_id: ObjectId,
    target_type: ObjectType,
    name: String,
    tagger: Option<Signature>,
    message: String,
}

impl Tag {
    pub fn new(
        target_id: ObjectId,
        target_type: ObjectType,
        name: String,
        tagger: Option<Signature>,
        message: String,
    ) -> Self {
        Tag {
            id: ObjectId::zero(),
            target_id,
            target_type,
            name,
            tagger,
            message,
        }
    }

    /// Decode a tag record body
    ///
    /// `object` and `type` are required; a tag without a message may omit the
    /// blank separator line.
    pub fn parse(id: ObjectId, data: &[u8]) -> Result<Self> {
        let mut target_id = None;
        let mut target_type = None;
        let mut name = String::new();
        let mut tagger = None;

        let mut rest = data;
        while !rest.is_empty() {
            let line_end = rest.iter().position(|&b| b == b'\n').unwrap_or(rest.len());
            let line = &rest[..line_end];
            rest = rest.get(line_end + 1..).unwrap_or_default();

            if line.is_empty() {
                break;
            }
            if line[0] == b' ' {
                continue;
            }

            let text = String::from_utf8_lossy(line);
            let Some((header, value)) = text.split_once(' ') else {
                return Err(HistoryError::parse(text.to_string(), "header line without a value"));
            };
            match header {
                "object" => {
                    target_id = Some(ObjectId::try_parse(value.trim()).map_err(|_| {
                        HistoryError::parse("object", format!("invalid object id '{}'", value))
                    })?);
                }
                "type" => target_type = Some(ObjectType::try_from(value.trim())?),
                "tag" => name = value.to_string(),
                "tagger" => tagger = Some(Signature::try_parse("tagger", value)?),
                other => tracing::trace!(header = other, "skipping tag header"),
            }
        }

        let message = rest.strip_suffix(b"\n").unwrap_or(rest);

        Ok(Tag {
            id,
            target_id: target_id.ok_or_else(|| HistoryError::parse("object", "missing header"))?,
            target_type: target_type.ok_or_else(|| HistoryError::parse("type", "missing header"))?,
            name,
            tagger,
            message: String::from_utf8_lossy(message).into_owned(),
        })
    }

    pub fn id(&self) -> &ObjectId {
        &self.id
    }

    /// The object this tag points at
    pub fn target_id(&self) -> &ObjectId {
        &self.target_id
    }

    pub fn target_type(&self) -> ObjectType {
        self.target_type
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn tagger(&self) -> Option<&Signature> {
        self.tagger.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Packable for Tag {
    fn serialize(&self) -> Result<Bytes> {
        let mut content = self.display();
        content.push('\n');

        frame(self.object_type(), content.as_bytes())
    }
}

impl Unpackable for Tag {
    fn deserialize(oid: ObjectId, mut reader: impl BufRead) -> Result<Self> {
        let mut content = Vec::new();
        reader.read_to_end(&mut content)?;

        Self::parse(oid, &content)
    }
}

impl Object for Tag {
    fn object_type(&self) -> ObjectType {
        ObjectType::Tag
    }

    fn display(&self) -> String {
        let mut lines = vec![
            format!("object {}", self.target_id),
            format!("type {}", self.target_type),
            format!("tag {}", self.name),
        ];
        if let Some(tagger) = &self.tagger {
            lines.push(format!("tagger {}", tagger.display()));
        }
        lines.push(String::new());
        lines.push(self.message.clone());

        lines.join("\n")
    }
}
