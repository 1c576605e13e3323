//! Git object identifier (SHA-1 hash)
//!
//! Object IDs are 20-byte hashes whose canonical text form is 40 lowercase
//! hexadecimal characters. They uniquely identify every object in the store.
//!
//! ## Format
//!
//! - Full: 40 hex characters (e.g., "abc123...def")
//! - Short: First 7 characters (e.g., "abc123f")
//!
//! ## Storage
//!
//! Loose objects live in `.git/objects/<first-2-chars>/<remaining-38-chars>`

use crate::artifacts::core::error::{HistoryError, Result};
use crate::artifacts::objects::{OBJECT_ID_LENGTH, OBJECT_ID_SIZE, SHORT_OBJECT_ID_LENGTH};
use std::io;
use std::path::PathBuf;

/// Git object identifier (SHA-1 hash)
///
/// Equality is byte equality. The all-zero value is reserved to mean "no object".
/// Ordering is plain byte order: stable, but carries no meaning.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct ObjectId([u8; OBJECT_ID_SIZE]);

impl ObjectId {
    /// The distinguished "no object" id
    pub const fn zero() -> Self {
        Self([0; OBJECT_ID_SIZE])
    }

    pub fn is_zero(&self) -> bool {
        self.0 == [0; OBJECT_ID_SIZE]
    }

    pub fn from_bytes(bytes: [u8; OBJECT_ID_SIZE]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; OBJECT_ID_SIZE] {
        &self.0
    }

    /// Parse and validate an object ID from its hex form
    ///
    /// # Arguments
    ///
    /// * `id` - 40-character hexadecimal string (either case)
    ///
    /// # Returns
    ///
    /// Validated ObjectId or `InvalidArgument` if the length or characters are wrong
    pub fn try_parse(id: &str) -> Result<Self> {
        if id.len() != OBJECT_ID_LENGTH {
            return Err(HistoryError::InvalidArgument {
                name: "object id",
                reason: format!("invalid length {} for '{}'", id.len(), id),
            });
        }
        if !id.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(HistoryError::InvalidArgument {
                name: "object id",
                reason: format!("invalid characters in '{}'", id),
            });
        }

        let mut bytes = [0; OBJECT_ID_SIZE];
        for (i, byte) in bytes.iter_mut().enumerate() {
            *byte = u8::from_str_radix(&id[i * 2..i * 2 + 2], 16).map_err(|_| {
                HistoryError::InvalidArgument {
                    name: "object id",
                    reason: format!("invalid hex digit in '{}'", id),
                }
            })?;
        }

        Ok(Self(bytes))
    }

    /// Write the object ID in binary format (20 bytes)
    ///
    /// Used when serializing tree objects.
    pub fn write_h40_to<W: io::Write>(&self, writer: &mut W) -> io::Result<()> {
        writer.write_all(&self.0)
    }

    /// Read an object ID from binary format (20 bytes)
    ///
    /// Used when deserializing tree objects.
    pub fn read_h40_from<R: io::Read + ?Sized>(reader: &mut R) -> io::Result<Self> {
        let mut bytes = [0; OBJECT_ID_SIZE];
        reader.read_exact(&mut bytes)?;
        Ok(Self(bytes))
    }

    /// Convert to file system path for object storage
    ///
    /// Splits the hash as `XX/YYYYYY...` where XX is the first 2 chars.
    pub fn to_path(&self) -> PathBuf {
        let hex = self.to_string();
        let (dir, file) = hex.split_at(2);
        PathBuf::from(dir).join(file)
    }

    /// First 7 characters of the hash (standard Git abbreviation)
    pub fn to_short_oid(&self) -> String {
        let mut hex = self.to_string();
        hex.truncate(SHORT_OBJECT_ID_LENGTH);
        hex
    }
}

impl TryFrom<&str> for ObjectId {
    type Error = HistoryError;

    fn try_from(value: &str) -> Result<Self> {
        Self::try_parse(value)
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for byte in &self.0 {
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl std::fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ObjectId({})", self)
    }
}
