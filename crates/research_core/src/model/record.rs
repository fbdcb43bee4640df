//! Shared record identity, timestamps and input validation.

use chrono::{SecondsFormat, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

static URL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z][A-Za-z0-9+.\-]*://[^\s/?#]+\S*$").expect("valid url regex")
});
static DECIMAL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d+(\.\d*)?|\.\d+)$").expect("valid decimal regex"));

/// Record identifier. Persisted data may carry legacy timestamp-style ids, so
/// this stays an opaque string rather than a parsed UUID.
pub type RecordId = String;

/// Generates a fresh record id.
pub fn new_record_id() -> RecordId {
    Uuid::new_v4().to_string()
}

/// Current instant as an RFC 3339 UTC timestamp with millisecond precision,
/// e.g. `2025-03-05T09:15:00.123Z`.
pub fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Common view over papers, journals and conferences.
pub trait Record {
    fn id(&self) -> &str;
}

/// Returns the index of the record with `id`, if any.
pub fn position_of<R: Record>(records: &[R], id: &str) -> Option<usize> {
    records.iter().position(|record| record.id() == id)
}

/// Form input rejected before it reaches a collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required field is empty after trimming.
    MissingField(&'static str),
    /// Paper status outside `idea|planning|writing|submitted`.
    InvalidStatus(String),
    InvalidDate { field: &'static str, value: String },
    InvalidUrl { field: &'static str, value: String },
    /// Impact factor is not a non-negative decimal number.
    InvalidImpactFactor(String),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "`{field}` is required"),
            Self::InvalidStatus(value) => write!(
                f,
                "unsupported status `{value}`; expected idea|planning|writing|submitted"
            ),
            Self::InvalidDate { field, value } => {
                write!(f, "`{field}` is not a valid date: `{value}`")
            }
            Self::InvalidUrl { field, value } => {
                write!(f, "`{field}` is not a valid URL: `{value}`")
            }
            Self::InvalidImpactFactor(value) => {
                write!(f, "impact factor must be a decimal number, got `{value}`")
            }
        }
    }
}

impl Error for ValidationError {}

pub(crate) fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::MissingField(field));
    }
    Ok(())
}

/// Accepts empty input; otherwise requires `scheme://host...`.
pub(crate) fn check_url(field: &'static str, value: &str) -> Result<(), ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() || URL_RE.is_match(trimmed) {
        return Ok(());
    }
    Err(ValidationError::InvalidUrl {
        field,
        value: trimmed.to_string(),
    })
}

pub(crate) fn check_date(field: &'static str, value: &str) -> Result<(), ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() || super::date::parse_date(trimmed).is_some() {
        return Ok(());
    }
    Err(ValidationError::InvalidDate {
        field,
        value: trimmed.to_string(),
    })
}

pub(crate) fn check_decimal(value: &str) -> Result<(), ValidationError> {
    let trimmed = value.trim();
    if trimmed.is_empty() || DECIMAL_RE.is_match(trimmed) {
        return Ok(());
    }
    Err(ValidationError::InvalidImpactFactor(trimmed.to_string()))
}

/// Reads a stored `null` as the field's default. Paired with
/// `#[serde(default)]` so absent and `null` fields decode the same way.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Trimmed copy; empty stays empty.
pub(crate) fn trimmed(value: &str) -> String {
    value.trim().to_string()
}

/// Trimmed copy, or `None` when nothing is left.
pub(crate) fn non_empty(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
