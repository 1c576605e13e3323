//! Object sources and the repository handle
//!
//! - `store`: the `ObjectStore` capability the history engine reads through
//! - `memory`: in-memory store
//! - `database`: loose-object store over a `.git` directory
//! - `refs`: reference lookup for the loose-object store
//! - `repository`: commit resolution on top of any store

pub mod database;
pub mod memory;
pub mod refs;
pub mod repository;
pub mod store;
