/// Input validation shared by the request types and pipelines
use std::borrow::Cow;
use std::collections::BTreeMap;
use validator::{Validate, ValidationError, ValidationErrors};

pub mod data_uri;

pub use data_uri::{DataUriError, PhotoDataUri};

use crate::models::post::MAX_POST_LENGTH;

/// Field name (wire spelling) to human-readable messages
pub type FieldErrors = BTreeMap<String, Vec<String>>;

/// Centralized validation messages
pub mod messages {
    pub const POST_EMPTY: &str = "Post cannot be empty.";
    pub const POST_TOO_LONG: &str = "Post is too long.";
    pub const FEEDBACK_POST_EMPTY: &str = "Posts to summarize cannot be empty.";
    pub const FEEDBACK_POST_TOO_LONG: &str = "Each post to summarize must be at most 500 characters.";
}

/// Run the derived validators and flatten failures into [`FieldErrors`]
pub fn validate<T: Validate>(value: &T) -> Result<(), FieldErrors> {
    value.validate().map_err(|errors| field_errors(&errors))
}

/// Flatten validator output into field -> messages, keyed by camelCase wire names
pub fn field_errors(errors: &ValidationErrors) -> FieldErrors {
    errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| {
            let messages = errs
                .iter()
                .map(|e| match &e.message {
                    Some(message) => message.to_string(),
                    None => format!("Invalid value ({})", e.code),
                })
                .collect();
            (to_camel_case(&field), messages)
        })
        .collect()
}

/// Single field error, for checks that run outside the derive
pub fn single_field_error(field: &str, message: impl Into<String>) -> FieldErrors {
    let mut errors = FieldErrors::new();
    errors.insert(field.to_string(), vec![message.into()]);
    errors
}

/// Post content must be 1..=500 characters
pub fn validate_post_content(content: &str) -> Result<(), ValidationError> {
    let length = content.chars().count();
    if length == 0 {
        return Err(error_with_message("length", messages::POST_EMPTY));
    }
    if length > MAX_POST_LENGTH {
        return Err(error_with_message("length", messages::POST_TOO_LONG));
    }
    Ok(())
}

/// Every entry of a feedback batch must itself be a valid post body
pub fn validate_feedback_entries(posts: &[String]) -> Result<(), ValidationError> {
    if posts.iter().any(|p| p.trim().is_empty()) {
        return Err(error_with_message("length", messages::FEEDBACK_POST_EMPTY));
    }
    if posts.iter().any(|p| p.chars().count() > MAX_POST_LENGTH) {
        return Err(error_with_message("length", messages::FEEDBACK_POST_TOO_LONG));
    }
    Ok(())
}

fn error_with_message(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

fn to_camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper_next = false;
    for c in field.chars() {
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
