//! Field validation rules shared by the record store and the HTTP controllers.
//!
//! Input DTOs derive [`validator::Validate`] and point their attributes at the
//! patterns and helpers defined here; [`validate_input`] folds the resulting
//! [`ValidationErrors`] into a single [`CoreError::Validation`] message.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Loose email shape: something, `@`, something, `.`, something.
pub const EMAIL_PATTERN: &str = r"^\S+@\S+\.\S+$";

/// Mobile numbers are 10 to 15 ASCII digits with no separators.
pub const MOBILE_PATTERN: &str = r"^[0-9]{10,15}$";

pub static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("valid regex"));

pub static MOBILE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(MOBILE_PATTERN).expect("valid regex"));

// ---------------------------------------------------------------------------
// Custom validators
// ---------------------------------------------------------------------------

/// Reject empty and whitespace-only strings.
pub fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}

/// Check a single required text field outside of a derived validator.
///
/// `label` is the human-readable field name used in the error message.
pub fn require_non_empty(label: &str, value: Option<&str>) -> Result<(), CoreError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(()),
        _ => Err(CoreError::Validation(format!("{label} is required"))),
    }
}

// ---------------------------------------------------------------------------
// Error folding
// ---------------------------------------------------------------------------

/// Run the derived validator on `input`, mapping failures to [`CoreError`].
pub fn validate_input<T: Validate>(input: &T) -> Result<(), CoreError> {
    input.validate().map_err(into_core_error)
}

/// Fold validator errors into one message, ordered by field name so the
/// output is stable.
pub fn into_core_error(errors: ValidationErrors) -> CoreError {
    let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    let messages: Vec<String> = fields
        .into_iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| match &e.message {
                Some(msg) => msg.to_string(),
                None => default_message(&field, &e.code),
            })
        })
        .collect();

    CoreError::Validation(messages.join(", "))
}

fn default_message(field: &str, code: &Cow<'static, str>) -> String {
    match code.as_ref() {
        "blank" | "length" => format!("{field} is required"),
        _ => format!("{field} is invalid"),
    }
}
