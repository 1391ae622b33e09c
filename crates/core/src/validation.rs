//! Structured validation failures.
//!
//! Validators collect every violated rule instead of stopping at the first
//! one, so callers can report the complete list back to the client.

use serde::{Deserialize, Serialize};
use validator::ValidationErrors;

/// A single violated rule on a single field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    /// Public (camelCase) name of the offending field.
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Join violations into a single human-readable line.
pub fn summarize(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(|v| format!("{}: {}", v.field, v.message))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Flatten `validator` derive output into [`FieldViolation`]s.
///
/// Struct-level (`schema`) errors are reported under the error code, which
/// the schema functions set to the field they check. Output is sorted by
/// field so responses are stable.
pub fn from_validation_errors(errors: &ValidationErrors) -> Vec<FieldViolation> {
    let mut violations = Vec::new();
    for (field, field_errors) in errors.field_errors() {
        for error in field_errors.iter() {
            let name = if field.to_string() == "__all__" {
                error.code.to_string()
            } else {
                field.to_string()
            };
            let message = error
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("failed '{}' check", error.code));
            violations.push(FieldViolation::new(to_camel_case(&name), message));
        }
    }
    violations.sort_by(|a, b| a.field.cmp(&b.field).then(a.message.cmp(&b.message)));
    violations
}

fn to_camel_case(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut upper_next = false;
    for c in name.chars() {
        if c == '_' {
            upper_next = true;
        } else if upper_next {
            out.extend(c.to_uppercase());
            upper_next = false;
        } else {
            out.push(c);
        }
    }
    out
}
