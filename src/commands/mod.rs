//! `bitlog` command implementations
//!
//! Each command resolves a revision, runs one history query and prints the
//! result to the writer it is given.

pub mod porcelain;
