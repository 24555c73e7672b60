use crate::error::ApiError;
use once_cell::sync::Lazy;
use regex::Regex;

// something@something.something, nothing stricter
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r".+@.+\..+").expect("static regex"));

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

pub fn require_email(email: &str) -> Result<(), ApiError> {
    if is_valid_email(email) {
        Ok(())
    } else {
        Err(ApiError::Validation("Please enter a valid email".to_string()))
    }
}

/// Fails with a `ValidationError` naming the first blank field.
pub fn require_non_empty(fields: &[(&str, &str)]) -> Result<(), ApiError> {
    match fields.iter().find(|(_, value)| value.trim().is_empty()) {
        Some((name, _)) => Err(ApiError::Validation(format!("{} is required", name))),
        None => Ok(()),
    }
}

pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_shape() {
        assert!(is_valid_email("site@vishakan.com"));
        assert!(!is_valid_email("site.vishakan.com"));
        assert!(!is_valid_email("site@vishakan"));
    }

    #[test]
    fn names_the_blank_field() {
        let err = require_non_empty(&[("title", "Tower A"), ("location", "  ")]).unwrap_err();
        assert_eq!(err, ApiError::Validation("location is required".to_string()));
    }
}
