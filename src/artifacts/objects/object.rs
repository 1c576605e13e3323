use crate::artifacts::core::error::Result;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use bytes::Bytes;
use sha1::{Digest, Sha1};
use std::io::{BufRead, Write};

pub trait Packable {
    /// Serialize into the framed loose-object form `<type> <size>\0<content>`
    fn serialize(&self) -> Result<Bytes>;
}

pub trait Unpackable {
    /// Decode an object body (frame header already consumed)
    fn deserialize(oid: ObjectId, reader: impl BufRead) -> Result<Self>
    where
        Self: Sized;
}

pub trait Object: Packable {
    fn object_type(&self) -> ObjectType;

    fn display(&self) -> String;

    /// Content hash of the serialized object
    fn object_id(&self) -> Result<ObjectId> {
        let content = self.serialize()?;
        let mut hasher = Sha1::new();
        hasher.update(&content);

        Ok(ObjectId::from_bytes(hasher.finalize().into()))
    }
}

/// Prepend the loose-object header to an object body
pub fn frame(object_type: ObjectType, content: &[u8]) -> Result<Bytes> {
    let mut object_bytes = Vec::with_capacity(content.len() + 16);
    let header = format!("{} {}\0", object_type.as_str(), content.len());
    object_bytes.write_all(header.as_bytes())?;
    object_bytes.write_all(content)?;

    Ok(Bytes::from(object_bytes))
}
