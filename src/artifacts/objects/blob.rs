//! Git blob object
//!
//! Blobs hold raw file content. History queries only compare blob ids, so the
//! type exists to build and store content, never to inspect it.
//!
//! ## Format
//!
//! On disk: `blob <size>\0<content>`

use crate::artifacts::core::error::Result;
use crate::artifacts::objects::object::{Object, Packable, frame};
use crate::artifacts::objects::object_type::ObjectType;
use bytes::Bytes;
use derive_new::new;

/// Git blob object representing file content
#[derive(Debug, Clone, new)]
pub struct Blob {
    content: Bytes,
}

impl Blob {
    pub fn content(&self) -> &[u8] {
        &self.content
    }
}

impl Packable for Blob {
    fn serialize(&self) -> Result<Bytes> {
        frame(self.object_type(), &self.content)
    }
}

impl Object for Blob {
    fn object_type(&self) -> ObjectType {
        ObjectType::Blob
    }

    fn display(&self) -> String {
        String::from_utf8_lossy(&self.content).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blob_id_matches_git_hash_object() {
        let blob = Blob::new(Bytes::from_static(b"hello\n"));

        assert_eq!(
            blob.object_id().unwrap().to_string(),
            "ce013625030ba8dba906f756967f9e9ca394464a"
        );
    }
}
