use crate::artifacts::core::error::{HistoryError, Result};
use std::io::BufRead;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectType {
    Blob,
    Tree,
    Commit,
    Tag,
}

impl ObjectType {
    pub fn as_str(&self) -> &str {
        match self {
            ObjectType::Blob => "blob",
            ObjectType::Tree => "tree",
            ObjectType::Commit => "commit",
            ObjectType::Tag => "tag",
        }
    }

    /// Read the `<type> <size>\0` frame header, leaving the reader at the body
    pub fn parse_object_type(data_reader: &mut impl BufRead) -> Result<ObjectType> {
        let mut object_type = Vec::new();
        data_reader.read_until(b' ', &mut object_type)?;
        if object_type.pop() != Some(b' ') {
            return Err(HistoryError::parse("type", "missing object header"));
        }
        let object_type = String::from_utf8_lossy(&object_type);

        // skip the size part
        let mut size = Vec::new();
        data_reader.read_until(b'\0', &mut size)?;
        if size.pop() != Some(b'\0') {
            return Err(HistoryError::parse("size", "unterminated object header"));
        }

        ObjectType::try_from(object_type.as_ref())
    }
}

impl TryFrom<&str> for ObjectType {
    type Error = HistoryError;

    fn try_from(value: &str) -> Result<Self> {
        match value {
            "blob" => Ok(ObjectType::Blob),
            "tree" => Ok(ObjectType::Tree),
            "commit" => Ok(ObjectType::Commit),
            "tag" => Ok(ObjectType::Tag),
            _ => Err(HistoryError::parse(
                "type",
                format!("unknown object type '{}'", value),
            )),
        }
    }
}

impl std::fmt::Display for ObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
