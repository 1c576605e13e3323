use crate::areas::repository::Repository;
use crate::artifacts::core::error::{HistoryError, Result};
use crate::artifacts::objects::OBJECT_ID_LENGTH;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::revision::ref_name::RefName;
use crate::artifacts::revision::{
    ANCESTOR_REGEX, MIN_ABBREV_LENGTH, PARENT_REGEX, PSEUDO_REF_REGEX, REF_ALIASES,
    REF_SEARCH_PREFIXES,
};

/// A parsed revision expression naming a commit.
///
/// Supports multiple formats:
/// - Ref names: `main`, `feature/new-feature`, `HEAD`, `v1.0`, `refs/heads/main`
/// - Aliases: `@` (resolves to `HEAD`)
/// - Full OIDs: 40-character hexadecimal strings (resolved as fallback if ref doesn't exist)
/// - Abbreviated OIDs: 4-40 character hexadecimal strings (resolved as fallback if ref doesn't exist)
/// - Parent notation: `<revision>^` (e.g., `main^`, `HEAD^`, `abc123^`)
/// - Ancestor notation: `<revision>~<n>` (e.g., `main~3`, `HEAD~5`, `abc123~2`)
///
/// # Parsing Strategy
///
/// OID-like strings (e.g., "abc123") are initially parsed as `Ref` variants. During resolution,
/// if no ref with that name exists and the string looks like an OID (4-40 hex characters),
/// the resolver will attempt to resolve it as an object ID. Refs win over OIDs when
/// both would match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Revision {
    /// A reference or potentially an OID (decided during resolution)
    Ref(RefName),
    /// The Nth first-parent ancestor of a revision (e.g., HEAD~3)
    Ancestor(Box<Revision>, usize),
    /// The first parent of a revision (e.g., HEAD^)
    Parent(Box<Revision>),
}

impl Revision {
    /// Resolve to a commit id
    ///
    /// # Returns
    ///
    /// `None` when the revision names nothing (unknown ref, unborn HEAD,
    /// walking past a root commit).
    pub fn resolve(&self, repository: &Repository) -> Result<Option<ObjectId>> {
        match self {
            Revision::Ref(ref_name) => Self::resolve_ref(ref_name, repository),
            Revision::Parent(base_revision) => {
                Self::resolve_commit_parent(base_revision.resolve(repository)?, repository)
            }
            Revision::Ancestor(base_revision, generations) => {
                let mut oid = base_revision.resolve(repository)?;
                for _ in 0..*generations {
                    oid = Self::resolve_commit_parent(oid, repository)?;
                }

                Ok(oid)
            }
        }
    }

    fn resolve_ref(ref_name: &RefName, repository: &Repository) -> Result<Option<ObjectId>> {
        let name = ref_name.as_ref();

        for candidate in Self::ref_candidates(name)? {
            if let Some(oid) = repository.store().read_ref(&candidate)? {
                tracing::debug!(revision = name, reference = %candidate, %oid, "resolved reference");
                return repository.peel_to_commit(&oid);
            }
        }

        if Self::looks_like_oid(name) {
            return Self::resolve_oid(name, repository);
        }

        Ok(None)
    }

    /// Fully qualified names to look up for a short name, in order
    fn ref_candidates(name: &str) -> Result<Vec<String>> {
        let direct = name.starts_with("refs/") || regex::Regex::new(PSEUDO_REF_REGEX)?.is_match(name);

        Ok(REF_SEARCH_PREFIXES
            .iter()
            .filter(|prefix| direct || !prefix.is_empty())
            .map(|prefix| format!("{prefix}{name}"))
            .collect())
    }

    fn resolve_commit_parent(
        oid: Option<ObjectId>,
        repository: &Repository,
    ) -> Result<Option<ObjectId>> {
        match oid {
            Some(oid) => {
                let commit = repository.resolve(&oid)?;
                Ok(commit.parent_id(0).copied())
            }
            None => Ok(None),
        }
    }

    fn resolve_oid(oid_str: &str, repository: &Repository) -> Result<Option<ObjectId>> {
        // Full OID: only needs to exist and be a commit
        if oid_str.len() == OBJECT_ID_LENGTH {
            let oid = ObjectId::try_parse(oid_str)?;
            return match repository.peel_to_commit(&oid) {
                Err(error) if error.is_not_found() => Ok(None),
                resolved => resolved,
            };
        }

        // Abbreviated OID: commits, and tags that peel to commits
        let mut candidates = Vec::new();
        for oid in repository.store().find_objects_by_prefix(oid_str)? {
            if let Some(commit_oid) = repository.peel_to_commit(&oid)? {
                candidates.push((oid, commit_oid));
            }
        }

        match candidates.as_slice() {
            [] => Ok(None),
            [(_, commit_oid)] => Ok(Some(*commit_oid)),
            _ => {
                let mut error_msg = format!(
                    "short SHA1 {} is ambiguous\nhint: The candidates are:",
                    oid_str
                );
                for (oid, commit_oid) in &candidates {
                    let kind = if oid == commit_oid { "commit" } else { "tag" };
                    error_msg.push_str(&format!("\nhint:   {} {}", oid.to_short_oid(), kind));
                }
                Err(HistoryError::InvalidArgument {
                    name: "revision",
                    reason: error_msg,
                })
            }
        }
    }

    pub fn try_parse(revision: &str) -> Result<Revision> {
        if let Some(caps) = regex::Regex::new(PARENT_REGEX)?.captures(revision) {
            let base_revision = Self::try_parse(&caps[1])?;

            Ok(Revision::Parent(Box::new(base_revision)))
        } else if let Some(caps) = regex::Regex::new(ANCESTOR_REGEX)?.captures(revision) {
            let generations: usize =
                caps[2]
                    .parse()
                    .map_err(|_| HistoryError::InvalidArgument {
                        name: "revision",
                        reason: format!("failed to parse generations in revision: {revision}"),
                    })?;
            let base_revision = Self::try_parse(&caps[1])?;

            Ok(Revision::Ancestor(Box::new(base_revision), generations))
        } else {
            let resolved_name = *REF_ALIASES.get(revision).unwrap_or(&revision);
            Ok(Revision::Ref(RefName::try_parse(resolved_name)?))
        }
    }

    fn looks_like_oid(s: &str) -> bool {
        (MIN_ABBREV_LENGTH..=OBJECT_ID_LENGTH).contains(&s.len())
            && s.chars().all(|c| c.is_ascii_hexdigit())
    }
}

impl Repository {
    /// Resolve a revision expression to a commit id
    ///
    /// Unknown revisions fail with `RevisionNotExist` carrying the expression
    /// and an empty path.
    pub fn resolve_revision(&self, expression: &str) -> Result<ObjectId> {
        let revision = Revision::try_parse(expression)?;

        revision
            .resolve(self)?
            .ok_or_else(|| HistoryError::revision_not_exist(expression, ""))
    }
}
