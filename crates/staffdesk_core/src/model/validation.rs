//! Raw field input and per-field validation rules.
//!
//! # Responsibility
//! - Carry untyped field values from forms and file imports.
//! - Coerce and check each field in a fixed rule order.
//!
//! # Invariants
//! - Rules run per field as presence, type, range, non-empty; the first
//!   failing rule is the error reported for that field.
//! - Errors are collected for every field, in declaration order.
//! - A record is accepted only when no field failed.

use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::num::IntErrorKind;

/// One untyped field value as received from an input surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawValue {
    Text(String),
    Integer(i64),
}

impl From<&str> for RawValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for RawValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for RawValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

/// Field name to raw value mapping for one submitted record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRecord {
    fields: BTreeMap<String, RawValue>,
}

impl RawRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, convenient for tests and form adapters.
    pub fn with(mut self, name: impl Into<String>, value: impl Into<RawValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Sets a field, replacing any earlier value for the same name.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<RawValue>) {
        self.fields.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&RawValue> {
        self.fields.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for RawRecord
where
    K: Into<String>,
    V: Into<RawValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Self::new();
        for (name, value) in iter {
            record.insert(name, value);
        }
        record
    }
}

/// Failure category for one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Field was not supplied at all.
    MissingField,
    /// Value could not be coerced to the field type.
    InvalidType,
    /// Numeric value is zero or negative.
    OutOfRange,
    /// Text value is empty after trimming.
    EmptyField,
}

impl ValidationErrorKind {
    fn describe(self) -> &'static str {
        match self {
            Self::MissingField => "field is required",
            Self::InvalidType => "value must be an integer",
            Self::OutOfRange => "value must be greater than 0",
            Self::EmptyField => "field must not be empty",
        }
    }
}

/// One failing field and the reason it failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub kind: ValidationErrorKind,
}

impl Display for FieldError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        // Text fields handed an integer get their own wording.
        if self.kind == ValidationErrorKind::InvalidType && is_text_field(self.field) {
            return write!(f, "{}: value must be text", self.field);
        }
        write!(f, "{}: {}", self.field, self.kind.describe())
    }
}

/// Non-empty list of field failures for one rejected record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl ValidationErrors {
    pub(crate) fn new(errors: Vec<FieldError>) -> Self {
        debug_assert!(!errors.is_empty());
        Self { errors }
    }

    /// First failure in field declaration order; the one shown to users.
    pub fn first(&self) -> &FieldError {
        &self.errors[0]
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the failure kind recorded for `field`, if it failed.
    pub fn kind_of(&self, field: &str) -> Option<ValidationErrorKind> {
        self.errors
            .iter()
            .find(|error| error.field == field)
            .map(|error| error.kind)
    }
}

impl Display for ValidationErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (index, error) in self.errors.iter().enumerate() {
            if index > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl Error for ValidationErrors {}

/// Walks the fields of one raw record and accumulates failures.
pub(crate) struct FieldReader<'a> {
    raw: &'a RawRecord,
    errors: Vec<FieldError>,
}

impl<'a> FieldReader<'a> {
    pub(crate) fn new(raw: &'a RawRecord) -> Self {
        Self {
            raw,
            errors: Vec::new(),
        }
    }

    /// Reads a strictly positive integer field.
    pub(crate) fn positive_int(&mut self, field: &'static str) -> Option<i64> {
        let value = match self.raw.get(field) {
            None => return self.fail(field, ValidationErrorKind::MissingField),
            Some(RawValue::Integer(value)) => *value,
            Some(RawValue::Text(text)) => match text.trim().parse::<i64>() {
                Ok(value) => value,
                // Still a negative integer, just too small to hold.
                Err(err) if *err.kind() == IntErrorKind::NegOverflow => {
                    return self.fail(field, ValidationErrorKind::OutOfRange)
                }
                Err(_) => return self.fail(field, ValidationErrorKind::InvalidType),
            },
        };

        if value <= 0 {
            return self.fail(field, ValidationErrorKind::OutOfRange);
        }
        Some(value)
    }

    /// Reads a text field and returns it trimmed.
    pub(crate) fn non_empty_text(&mut self, field: &'static str) -> Option<String> {
        match self.raw.get(field) {
            None => self.fail(field, ValidationErrorKind::MissingField),
            Some(RawValue::Integer(_)) => self.fail(field, ValidationErrorKind::InvalidType),
            Some(RawValue::Text(text)) => {
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    return self.fail(field, ValidationErrorKind::EmptyField);
                }
                Some(trimmed.to_string())
            }
        }
    }

    pub(crate) fn into_errors(self) -> ValidationErrors {
        ValidationErrors::new(self.errors)
    }

    fn fail<T>(&mut self, field: &'static str, kind: ValidationErrorKind) -> Option<T> {
        self.errors.push(FieldError { field, kind });
        None
    }
}

/// Checks an already-typed integer field against the range rule.
pub(crate) fn check_positive(errors: &mut Vec<FieldError>, field: &'static str, value: i64) {
    if value <= 0 {
        errors.push(FieldError {
            field,
            kind: ValidationErrorKind::OutOfRange,
        });
    }
}

/// Checks an already-typed text field against the non-empty rule.
pub(crate) fn check_non_empty(errors: &mut Vec<FieldError>, field: &'static str, value: &str) {
    if value.trim().is_empty() {
        errors.push(FieldError {
            field,
            kind: ValidationErrorKind::EmptyField,
        });
    }
}

pub(crate) fn into_result(errors: Vec<FieldError>) -> Result<(), ValidationErrors> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors::new(errors))
    }
}

fn is_text_field(field: &str) -> bool {
    use crate::model::{department, employee};
    matches!(
        field,
        employee::EMPNAME | employee::JOB | department::DNAME | department::LOC
    )
}
