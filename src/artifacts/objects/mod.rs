//! Git object types and operations
//!
//! Git stores all content as objects identified by SHA-1 hashes. The history
//! engine reads two of them:
//!
//! - **Commit**: Snapshot with metadata (author, message, parent commits, tree)
//! - **Tree**: Directory listing (names, modes, and object IDs)
//! - **Tag**: Annotated reference to another object, peeled during revision
//!   lookup
//!
//! **Blob** values can be built and stored, but history queries only ever
//! compare their ids.
//! All loose objects are framed as `<type> <size>\0<content>`.

pub mod blob;
pub mod commit;
pub mod entry_mode;
pub mod object;
pub mod object_id;
pub mod object_type;
pub mod signature;
pub mod tag;
pub mod tree;

/// Length of a SHA-1 hash in hexadecimal format
pub const OBJECT_ID_LENGTH: usize = 40;

/// Length of a SHA-1 hash in bytes
pub const OBJECT_ID_SIZE: usize = 20;

/// Length of an abbreviated object id
pub const SHORT_OBJECT_ID_LENGTH: usize = 7;
