//! Field-scoped validation results shared by every draft kind

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// A validation failure that belongs to a single form field.
///
/// Implemented by the per-kind validation error enums so the validator can
/// collect them into one [`ValidationResult`].
pub trait FieldError: fmt::Display {
    /// Name of the field the message is rendered next to
    fn field(&self) -> &'static str;
}

/// Mapping from field name to the messages shown for that field.
///
/// An empty result means the draft is valid. Fields are kept in a sorted map so
/// that two validations of the same draft compare equal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationResult {
    errors: BTreeMap<String, Vec<String>>,
}

impl ValidationResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Record a message for a field
    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors
            .entry(field.into())
            .or_default()
            .push(message.into());
    }

    /// Record a typed field error
    pub fn push<E: FieldError>(&mut self, error: E) {
        self.add(error.field(), error.to_string());
    }

    /// Messages recorded for a single field
    pub fn field_errors(&self, field: &str) -> &[String] {
        self.errors.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    /// Drop the messages of a field, e.g. after the user edits it
    pub fn clear_field(&mut self, field: &str) -> bool {
        self.errors.remove(field).is_some()
    }

    /// Merge another result into this one
    pub fn extend(&mut self, other: ValidationResult) {
        for (field, messages) in other.errors {
            self.errors.entry(field).or_default().extend(messages);
        }
    }

    /// Names of the fields with errors, sorted
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.errors.keys().map(String::as_str)
    }

    /// Every message, field by field
    pub fn messages(&self) -> impl Iterator<Item = &str> {
        self.errors.values().flatten().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.errors.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (field, messages) in &self.errors {
            for message in messages {
                if !first {
                    writeln!(f)?;
                }
                write!(f, "{}: {}", field, message)?;
                first = false;
            }
        }
        Ok(())
    }
}
