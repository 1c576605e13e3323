use crate::artifacts::core::error::{HistoryError, Result};
use crate::artifacts::revision::INVALID_REF_NAME_REGEX;

/// A syntactically valid reference name (`main`, `feature/x`, `refs/tags/v1`)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RefName(String);

impl RefName {
    pub fn try_parse(name: &str) -> Result<Self> {
        let invalid = regex::Regex::new(INVALID_REF_NAME_REGEX)?;

        if name.is_empty() || invalid.is_match(name) {
            return Err(HistoryError::InvalidArgument {
                name: "revision",
                reason: format!("'{}' is not a valid reference name", name),
            });
        }

        Ok(Self(name.to_string()))
    }
}

impl AsRef<str> for RefName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RefName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
