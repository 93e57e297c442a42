// File: src/error.rs
// Purpose: Path-tagged validation errors and report helpers

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Underlying cause of a [`BadField`]
#[derive(Debug, Error)]
pub enum FieldError {
    /// The directive names a validator missing from the registry
    #[error("undefined validator: {0:?}")]
    UndefinedValidator(String),

    /// A registered validator rejected the field's value
    #[error(transparent)]
    Invalid(anyhow::Error),
}

/// A field path paired with the reason it failed validation.
///
/// This is the element type returned from [`Validators::validate`](crate::Validators::validate).
#[derive(Debug, Error)]
#[error("field {field} is invalid: {error}")]
pub struct BadField {
    pub field: String,
    #[source]
    pub error: FieldError,
}

impl BadField {
    pub fn undefined(field: impl Into<String>, validator: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            error: FieldError::UndefinedValidator(validator.into()),
        }
    }

    pub fn invalid(field: impl Into<String>, error: anyhow::Error) -> Self {
        Self {
            field: field.into(),
            error: FieldError::Invalid(error),
        }
    }

    /// True when the entry comes from an unregistered validator name
    pub fn is_undefined(&self) -> bool {
        matches!(self.error, FieldError::UndefinedValidator(_))
    }
}

/// Serializable row for a single validation failure
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldReport {
    pub field: String,
    pub message: String,
}

impl From<&BadField> for FieldReport {
    fn from(bad: &BadField) -> Self {
        Self {
            field: bad.field.clone(),
            message: bad.error.to_string(),
        }
    }
}

/// All failures found in one validation pass, in field then directive order.
///
/// Returned as the `Err` side of [`Validators::check`](crate::Validators::check).
#[derive(Debug, Default)]
pub struct ValidationErrors(pub Vec<BadField>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, BadField> {
        self.0.iter()
    }

    pub fn into_inner(self) -> Vec<BadField> {
        self.0
    }

    /// `Ok(())` when no failures were collected
    pub fn into_result(self) -> Result<(), Self> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    /// Group messages by field path, keeping directive order within a field
    pub fn by_field(&self) -> BTreeMap<String, Vec<String>> {
        let mut grouped: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for bad in &self.0 {
            grouped
                .entry(bad.field.clone())
                .or_default()
                .push(bad.error.to_string());
        }
        grouped
    }

    pub fn report(&self) -> Vec<FieldReport> {
        self.0.iter().map(FieldReport::from).collect()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, bad) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}", bad)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl From<Vec<BadField>> for ValidationErrors {
    fn from(errors: Vec<BadField>) -> Self {
        Self(errors)
    }
}

impl IntoIterator for ValidationErrors {
    type Item = BadField;
    type IntoIter = std::vec::IntoIter<BadField>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a BadField;
    type IntoIter = std::slice::Iter<'a, BadField>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
