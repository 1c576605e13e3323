//! Author and committer signatures
//!
//! A signature header value has the form
//!
//! ```text
//! <name> <<email>> <epoch-seconds> <±HHMM>
//! ```
//!
//! Display names may themselves contain angle brackets, so the email is taken
//! from the **last** `<` / `>` pair and everything before it is the name.

use crate::artifacts::core::error::{HistoryError, Result};
use chrono::{DateTime, FixedOffset, TimeZone};

/// Author or committer information
///
/// Two signatures are equal when name, email and the epoch seconds of the
/// timestamp match; the offset is kept for display only.
#[derive(Debug, Clone)]
pub struct Signature {
    name: String,
    email: String,
    when: DateTime<FixedOffset>,
}

impl Signature {
    pub fn new(name: String, email: String, when: DateTime<FixedOffset>) -> Self {
        Signature { name, email, when }
    }

    /// Decode a signature header value
    ///
    /// # Arguments
    ///
    /// * `header` - Header the value came from (`author`, `committer`), used to
    ///   name the offending field on failure
    /// * `value` - The raw header value
    pub fn try_parse(header: &str, value: &str) -> Result<Self> {
        let email_start = value
            .rfind('<')
            .ok_or_else(|| HistoryError::parse(format!("{header} email"), "missing '<'"))?;
        let email_end = value
            .rfind('>')
            .ok_or_else(|| HistoryError::parse(format!("{header} email"), "missing '>'"))?;
        if email_end < email_start {
            return Err(HistoryError::parse(
                format!("{header} email"),
                "'>' appears before '<'",
            ));
        }

        let name = value[..email_start].trim().to_string();
        let email = value[email_start + 1..email_end].to_string();

        let mut tail = value[email_end + 1..].split_whitespace();
        let epoch = tail.next().unwrap_or_default();
        let offset = tail.next().unwrap_or_default();

        let epoch = parse_epoch(epoch).ok_or_else(|| {
            HistoryError::parse(
                format!("{header} timestamp"),
                format!("not a number: '{epoch}'"),
            )
        })?;
        let offset = parse_offset(offset).ok_or_else(|| {
            HistoryError::parse(
                format!("{header} timezone"),
                format!("expected ±HHMM, got '{offset}'"),
            )
        })?;
        let when = offset.timestamp_opt(epoch, 0).single().ok_or_else(|| {
            HistoryError::parse(
                format!("{header} timestamp"),
                format!("out of range: {epoch}"),
            )
        })?;

        Ok(Signature { name, email, when })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn when(&self) -> DateTime<FixedOffset> {
        self.when
    }

    /// Format author name and email for display
    ///
    /// # Returns
    ///
    /// String in format "Name <email@example.com>"
    pub fn display_name(&self) -> String {
        format!("{} <{}>", self.name, self.email)
    }

    /// Format the signature the way it is written in a commit record
    pub fn display(&self) -> String {
        format!(
            "{} <{}> {} {}",
            self.name,
            self.email,
            self.when.timestamp(),
            self.when.format("%z")
        )
    }

    /// Format timestamp in human-readable form
    ///
    /// # Returns
    ///
    /// String like "Mon Jan 1 12:34:56 2024 +0000"
    pub fn readable_timestamp(&self) -> String {
        self.when.format("%a %b %-d %H:%M:%S %Y %z").to_string()
    }
}

impl PartialEq for Signature {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.email == other.email
            && self.when.timestamp() == other.when.timestamp()
    }
}

impl Eq for Signature {}

impl TryFrom<&str> for Signature {
    type Error = HistoryError;

    fn try_from(value: &str) -> Result<Self> {
        Self::try_parse("signature", value)
    }
}

fn parse_epoch(epoch: &str) -> Option<i64> {
    let digits = epoch.strip_prefix('-').unwrap_or(epoch);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    epoch.parse().ok()
}

fn parse_offset(offset: &str) -> Option<FixedOffset> {
    let (sign, digits) = match offset.as_bytes().first()? {
        b'+' => (1, &offset[1..]),
        b'-' => (-1, &offset[1..]),
        _ => return None,
    };
    if digits.len() != 4 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let hours: i32 = digits[..2].parse().ok()?;
    let minutes: i32 = digits[2..].parse().ok()?;
    if minutes >= 60 {
        return None;
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
}
