//! In-memory object store
//!
//! Holds framed objects and references in hash maps. It is the store used to
//! exercise the engine without a repository on disk, and a convenient backend
//! for callers that already hold objects in memory.

use crate::areas::store::ObjectStore;
use crate::artifacts::core::error::{HistoryError, Result};
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

#[derive(Debug, Default)]
pub struct MemoryStore {
    objects: RwLock<HashMap<ObjectId, Bytes>>,
    refs: RwLock<HashMap<String, ObjectId>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an object under its content hash and return that hash
    pub fn insert(&self, object: &impl Object) -> Result<ObjectId> {
        let oid = object.object_id()?;
        self.insert_raw(oid, object.serialize()?);
        Ok(oid)
    }

    /// Store already framed bytes under an explicit id
    pub fn insert_raw(&self, oid: ObjectId, bytes: Bytes) {
        self.objects
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(oid, bytes);
    }

    /// Point a fully qualified reference name at an object
    pub fn set_ref(&self, name: impl Into<String>, oid: ObjectId) {
        self.refs
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.into(), oid);
    }

    pub fn len(&self) -> usize {
        self.objects
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ObjectStore for MemoryStore {
    fn load(&self, oid: &ObjectId) -> Result<Bytes> {
        self.objects
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(oid)
            .cloned()
            .ok_or(HistoryError::ObjectNotFound { oid: *oid })
    }

    fn read_ref(&self, name: &str) -> Result<Option<ObjectId>> {
        Ok(self
            .refs
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .copied())
    }

    fn find_objects_by_prefix(&self, prefix: &str) -> Result<Vec<ObjectId>> {
        let prefix = prefix.to_ascii_lowercase();
        let mut matches: Vec<ObjectId> = self
            .objects
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .filter(|oid| oid.to_string().starts_with(&prefix))
            .copied()
            .collect();
        matches.sort();

        Ok(matches)
    }
}
