//! Field-level validation results shared by the form aggregates.
//!
//! Aggregates validate raw form input synchronously and collect one message
//! per offending field. Screens render the messages inline.

use std::collections::BTreeMap;
use std::fmt;

use url::Url;

/// Per-field validation messages keyed by the wire name of the field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors(BTreeMap<&'static str, String>);

impl FieldErrors {
    /// Empty error set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a message for `field`. The first message for a field wins.
    pub fn insert(&mut self, field: &'static str, message: impl fmt::Display) {
        self.0.entry(field).or_insert_with(|| message.to_string());
    }

    /// Message recorded for `field`, if any.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Whether `field` failed validation.
    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Whether every field passed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of failing fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Failing field names in stable order.
    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.keys().copied()
    }

    /// Return `value` when no field failed, otherwise the collected errors.
    pub fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, Self> {
        if self.is_empty() { Ok(value()) } else { Err(self) }
    }
}

/// Trimmed text, or `None` when the input is blank.
pub(crate) fn optional_text(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_owned())
}

/// Parse an optional `http`/`https` URL. Blank input yields `Ok(None)`.
pub(crate) fn optional_web_url(raw: &str) -> Result<Option<Url>, url::ParseError> {
    let Some(text) = optional_text(raw) else {
        return Ok(None);
    };
    let parsed = Url::parse(&text)?;
    match parsed.scheme() {
        "http" | "https" if parsed.host_str().is_some() => Ok(Some(parsed)),
        _ => Err(url::ParseError::EmptyHost),
    }
}
