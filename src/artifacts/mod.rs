//! Git data structures and algorithms
//!
//! - `core`: the crate-wide error type
//! - `objects`: commit, tree and blob objects, ids and signatures
//! - `revision`: revision expressions (`HEAD~2`, `main^`, abbreviated ids)
//! - `log`: history traversal and the queries built on it

pub mod core;
pub mod log;
pub mod objects;
pub mod revision;
