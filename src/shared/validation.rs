//! Validation Utilities

use once_cell::sync::Lazy;
use regex::Regex;
use validator::{ValidateEmail, ValidationError, ValidationErrors};

use super::error::{AppError, FieldError};

/// Letters, digits and `@ . + - _`, the usual username alphabet.
static USERNAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[\w.@+-]+$").expect("Username regex should compile")
});

/// Convert validation errors to AppError
pub fn validation_error(errors: ValidationErrors) -> AppError {
    let mut field_errors: Vec<FieldError> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| FieldError {
                field: field.to_string(),
                message: e
                    .message
                    .clone()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| e.code.to_string()),
            })
        })
        .collect();
    field_errors.sort_by(|a, b| a.field.cmp(&b.field));

    let message = field_errors
        .first()
        .map(|e| format!("{}: {}", e.field, e.message))
        .unwrap_or_else(|| "Validation failed".into());

    AppError::Validation {
        message,
        errors: field_errors,
    }
}

/// String-like field shapes accepted by the custom validators below.
///
/// Optional fields validate only when present.
pub trait FieldStr {
    fn field_str(&self) -> Option<&str>;
}

impl FieldStr for str {
    fn field_str(&self) -> Option<&str> {
        Some(self)
    }
}

impl FieldStr for String {
    fn field_str(&self) -> Option<&str> {
        Some(self.as_str())
    }
}

// The validator derive unwraps `Option<String>` and passes `&&String`.
impl<T: FieldStr + ?Sized> FieldStr for &T {
    fn field_str(&self) -> Option<&str> {
        (**self).field_str()
    }
}

impl FieldStr for Option<String> {
    fn field_str(&self) -> Option<&str> {
        self.as_deref()
    }
}

/// Username alphabet check used by `#[validate(custom(...))]`.
pub fn validate_username<T: FieldStr + ?Sized>(value: &T) -> Result<(), ValidationError> {
    match value.field_str() {
        Some(username) if !USERNAME_RE.is_match(username) => Err(ValidationError::new("username")
            .with_message(
                "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters."
                    .into(),
            )),
        _ => Ok(()),
    }
}

/// Blank emails are allowed; anything else must look like an address.
pub fn validate_optional_email<T: FieldStr + ?Sized>(value: &T) -> Result<(), ValidationError> {
    match value.field_str() {
        Some(email) if !email.is_empty() && !email.validate_email() => {
            Err(ValidationError::new("email").with_message("Enter a valid email address.".into()))
        }
        _ => Ok(()),
    }
}

/// Rejects strings that are empty once trimmed.
pub fn validate_not_blank<T: FieldStr + ?Sized>(value: &T) -> Result<(), ValidationError> {
    match value.field_str() {
        Some(s) if s.trim().is_empty() => Err(ValidationError::new("blank")
            .with_message("This field may not be blank.".into())),
        _ => Ok(()),
    }
}
