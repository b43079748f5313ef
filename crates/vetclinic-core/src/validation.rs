//! Declarative field checks for inbound DTOs.
//!
//! Each DTO lists its `(field, value, rules)` triples through
//! [`Validate::checks`]; [`validate`] evaluates every rule and collects
//! all violations instead of stopping at the first one. Presence and
//! primitive types are already guaranteed by deserialization, so an
//! absent optional value skips its rules.

use std::fmt;

use chrono::{DateTime, NaiveDate};
use serde::Serialize;

/// A single field-level constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rule {
    /// String must contain at least one non-whitespace character.
    NotEmpty,
    /// String must look like `local@domain.tld`.
    Email,
    /// String must be an ISO 8601 calendar date or RFC 3339 datetime.
    IsoDate,
    /// Number must be `>= 0`.
    NonNegative,
    /// Number must be `> 0`.
    Positive,
    /// Floating-point number must not be NaN or infinite.
    Finite,
    /// Number must be `<=` the bound.
    AtMost(i64),
}

/// Borrowed view of a field value handed to the rules.
#[derive(Debug, Clone, Copy)]
pub enum FieldValue<'a> {
    Text(&'a str),
    Integer(i64),
    Number(f64),
}

/// One `(field, value, rules)` entry of a DTO contract.
#[derive(Debug)]
pub struct FieldCheck<'a> {
    pub field: &'static str,
    pub value: Option<FieldValue<'a>>,
    pub rules: &'static [Rule],
}

impl<'a> FieldCheck<'a> {
    pub fn text(field: &'static str, value: &'a str, rules: &'static [Rule]) -> Self {
        Self {
            field,
            value: Some(FieldValue::Text(value)),
            rules,
        }
    }

    pub fn optional_text(
        field: &'static str,
        value: Option<&'a str>,
        rules: &'static [Rule],
    ) -> Self {
        Self {
            field,
            value: value.map(FieldValue::Text),
            rules,
        }
    }

    pub fn integer(field: &'static str, value: Option<i64>, rules: &'static [Rule]) -> Self {
        Self {
            field,
            value: value.map(FieldValue::Integer),
            rules,
        }
    }

    pub fn number(field: &'static str, value: Option<f64>, rules: &'static [Rule]) -> Self {
        Self {
            field,
            value: value.map(FieldValue::Number),
            rules,
        }
    }
}

/// Implemented by every inbound DTO.
pub trait Validate {
    fn checks(&self) -> Vec<FieldCheck<'_>>;
}

/// A rule violation on one field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Every violation found for one input.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(pub Vec<FieldError>);

impl ValidationErrors {
    /// A single error not tied to a declared rule, e.g. a body that
    /// failed to deserialize.
    pub fn single(field: &str, message: impl Into<String>) -> Self {
        Self(vec![FieldError {
            field: field.to_string(),
            message: message.into(),
        }])
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|e| e.field.as_str())
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|e| format!("{} {}", e.field, e.message))
            .collect();
        f.write_str(&parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Evaluate every rule declared by `input`.
pub fn validate<T: Validate + ?Sized>(input: &T) -> Result<(), ValidationErrors> {
    let mut errors = Vec::new();

    for check in input.checks() {
        let Some(value) = check.value else {
            continue;
        };
        for rule in check.rules {
            if let Err(message) = apply(*rule, value) {
                errors.push(FieldError {
                    field: check.field.to_string(),
                    message: message.to_string(),
                });
            }
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors(errors))
    }
}

fn apply(rule: Rule, value: FieldValue<'_>) -> Result<(), &'static str> {
    match (rule, value) {
        (Rule::NotEmpty, FieldValue::Text(s)) => {
            if s.trim().is_empty() {
                Err("should not be empty")
            } else {
                Ok(())
            }
        }
        (Rule::Email, FieldValue::Text(s)) => {
            if is_email(s) {
                Ok(())
            } else {
                Err("must be an email")
            }
        }
        (Rule::IsoDate, FieldValue::Text(s)) => {
            if is_iso_date(s) {
                Ok(())
            } else {
                Err("must be a valid ISO 8601 date string")
            }
        }
        (Rule::NonNegative, FieldValue::Integer(n)) if n < 0 => Err("must not be negative"),
        (Rule::NonNegative, FieldValue::Number(n)) if n < 0.0 => Err("must not be negative"),
        (Rule::NonNegative, FieldValue::Integer(_) | FieldValue::Number(_)) => Ok(()),
        (Rule::Positive, FieldValue::Integer(n)) if n <= 0 => Err("must be a positive number"),
        (Rule::Positive, FieldValue::Number(n)) if n <= 0.0 => Err("must be a positive number"),
        (Rule::Positive, FieldValue::Integer(_) | FieldValue::Number(_)) => Ok(()),
        (Rule::Finite, FieldValue::Number(n)) => {
            if n.is_finite() {
                Ok(())
            } else {
                Err("must be a finite number")
            }
        }
        (Rule::Finite, FieldValue::Integer(_)) => Ok(()),
        (Rule::AtMost(max), FieldValue::Integer(n)) if n > max => {
            Err("exceeds the maximum allowed value")
        }
        (Rule::AtMost(max), FieldValue::Number(n)) if n > max as f64 => {
            Err("exceeds the maximum allowed value")
        }
        (Rule::AtMost(_), FieldValue::Integer(_) | FieldValue::Number(_)) => Ok(()),
        _ => Err("has the wrong type"),
    }
}

fn is_email(s: &str) -> bool {
    if s.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && domain.contains('.')
        && !domain.starts_with('.')
        && !domain.ends_with('.')
}

fn is_iso_date(s: &str) -> bool {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").is_ok() || DateTime::parse_from_rfc3339(s).is_ok()
}
