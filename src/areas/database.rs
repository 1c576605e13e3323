use crate::areas::refs::Refs;
use crate::areas::store::ObjectStore;
use crate::artifacts::core::error::{HistoryError, Result};
use crate::artifacts::objects::object_id::ObjectId;
use bytes::Bytes;
use std::io::Read;
use std::path::{Path, PathBuf};

/// Read-only loose-object store over a `.git` directory
///
/// Objects are read from `objects/<xx>/<38 hex>` and inflated with zlib.
/// References are delegated to [`Refs`].
#[derive(Debug)]
pub struct Database {
    path: Box<Path>,
    refs: Refs,
}

// TODO: read packfiles so repositories after `git gc` resolve without unpacking
impl Database {
    /// Open the store rooted at a git directory
    pub fn new(git_dir: &Path) -> Self {
        Database {
            path: git_dir.join("objects").into_boxed_path(),
            refs: Refs::new(git_dir.to_path_buf().into_boxed_path()),
        }
    }

    fn read_object(&self, object_id: &ObjectId, object_path: PathBuf) -> Result<Bytes> {
        // read the object file
        let object_content = match std::fs::read(&object_path) {
            Ok(content) => content,
            Err(error) if error.kind() == std::io::ErrorKind::NotFound => {
                return Err(HistoryError::ObjectNotFound { oid: *object_id });
            }
            Err(error) => return Err(error.into()),
        };

        tracing::trace!(oid = %object_id, path = %object_path.display(), "read loose object");

        // decompress the object content
        Self::decompress(object_content.into())
    }

    fn decompress(data: Bytes) -> Result<Bytes> {
        let mut decoder = flate2::read::ZlibDecoder::new(&*data);
        let mut decompressed_content = Vec::new();
        decoder.read_to_end(&mut decompressed_content)?;

        Ok(decompressed_content.into())
    }
}

impl ObjectStore for Database {
    fn load(&self, object_id: &ObjectId) -> Result<Bytes> {
        let object_path = self.path.join(object_id.to_path());

        self.read_object(object_id, object_path)
    }

    fn read_ref(&self, name: &str) -> Result<Option<ObjectId>> {
        self.refs.read_ref(name)
    }

    /// Find all objects whose OID starts with the given prefix.
    ///
    /// This method searches the object database for all objects whose OID begins
    /// with the specified prefix. It's used to resolve abbreviated OIDs to their
    /// full form.
    ///
    /// # Returns
    ///
    /// A vector of all matching ObjectIds. If multiple matches are found, all are
    /// returned (indicating an ambiguous prefix).
    ///
    /// # Performance
    ///
    /// - For prefixes of 2+ characters, only searches the specific directory
    /// - For prefixes of 0-1 characters, must search all directories (slower)
    fn find_objects_by_prefix(&self, prefix: &str) -> Result<Vec<ObjectId>> {
        let prefix = prefix.to_ascii_lowercase();
        let mut matches = Vec::new();

        let dir_names: Vec<String> = if prefix.len() >= 2 {
            vec![prefix[..2].to_string()]
        } else {
            (0..=255).map(|i| format!("{:02x}", i)).collect()
        };

        for dir_name in dir_names {
            let dir_path = self.path.join(&dir_name);
            if !dir_path.is_dir() {
                continue;
            }

            for entry in std::fs::read_dir(&dir_path)? {
                let entry = entry?;
                let full_oid = format!("{}{}", dir_name, entry.file_name().to_string_lossy());

                if full_oid.starts_with(&prefix)
                    && let Ok(oid) = ObjectId::try_parse(&full_oid)
                {
                    matches.push(oid);
                }
            }
        }
        matches.sort();

        Ok(matches)
    }
}
