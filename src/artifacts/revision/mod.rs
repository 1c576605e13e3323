//! Revision expressions
//!
//! Turns user-facing revision strings (`HEAD`, `main~3`, `abc1234^`) into
//! object ids before history queries run.

pub mod ref_name;
pub mod revision;

pub const INVALID_REF_NAME_REGEX: &str =
    r"^\.|\/\.|\.\.|^\/|\/$|\.lock$|@\{|[\x00-\x20\*:\?\[\\~\^\x7f]";
pub const PARENT_REGEX: &str = r"^(.+)\^$";
pub const ANCESTOR_REGEX: &str = r"^(.+)\~(\d+)$";
pub const REF_ALIASES: phf::Map<&'static str, &'static str> = phf::phf_map! {
    "@" => "HEAD",
};

/// Names looked up directly under the git directory (`HEAD`, `ORIG_HEAD`, ...)
pub const PSEUDO_REF_REGEX: &str = r"^[A-Z_]+$";

/// Prefixes tried, in order, when resolving a short reference name
///
/// The empty prefix only applies to pseudo-refs and to names already under
/// `refs/`, so files such as `config` or `description` are never read as refs.
pub const REF_SEARCH_PREFIXES: [&str; 5] = ["", "refs/", "refs/tags/", "refs/heads/", "refs/remotes/"];

/// Shortest abbreviated object id accepted as a revision
pub const MIN_ABBREV_LENGTH: usize = 4;
