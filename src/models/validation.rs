use std::sync::LazyLock;

use regex::Regex;

use crate::error::AppError;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email regex"));

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9\s\-().]{7,20}$").expect("valid phone regex"));

/// Trims `value` and fails with "<field> is required" when nothing is left.
pub fn required(value: &str, field: &str) -> Result<String, AppError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(AppError::validation(format!("{field} is required")));
    }
    Ok(trimmed.to_string())
}

pub fn email(value: &str) -> Result<String, AppError> {
    let value = required(value, "Email")?;
    if !EMAIL_RE.is_match(&value) {
        return Err(AppError::validation("Invalid email format"));
    }
    Ok(value.to_lowercase())
}

pub fn phone(value: &str) -> Result<String, AppError> {
    let value = required(value, "Phone")?;
    if !PHONE_RE.is_match(&value) {
        return Err(AppError::validation("Invalid phone format"));
    }
    Ok(value)
}

/// Same as [`phone`] but an empty or absent value is allowed.
pub fn optional_phone(value: Option<&str>) -> Result<Option<String>, AppError> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(v) => phone(v).map(Some),
        None => Ok(None),
    }
}

/// Empty strings become `None`.
pub fn optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(err: AppError) -> String {
        match err {
            AppError::Validation(msg) => msg,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn required_trims_and_rejects_blank() {
        assert_eq!(required("  Ada ", "Full name").unwrap(), "Ada");
        assert_eq!(message(required("   ", "Full name").unwrap_err()), "Full name is required");
    }

    #[test]
    fn email_format() {
        assert_eq!(email("Ada@Example.com").unwrap(), "ada@example.com");
        assert_eq!(message(email("bad-email").unwrap_err()), "Invalid email format");
        assert_eq!(message(email("a@b").unwrap_err()), "Invalid email format");
        assert_eq!(message(email("").unwrap_err()), "Email is required");
    }

    #[test]
    fn phone_format() {
        assert!(phone("+1 (555) 123-4567").is_ok());
        assert!(phone("0612345678").is_ok());
        assert_eq!(message(phone("123").unwrap_err()), "Invalid phone format");
        assert_eq!(message(phone("call me maybe").unwrap_err()), "Invalid phone format");
    }

    #[test]
    fn optional_phone_allows_absent() {
        assert_eq!(optional_phone(None).unwrap(), None);
        assert_eq!(optional_phone(Some("  ")).unwrap(), None);
        assert!(optional_phone(Some("12")).is_err());
    }

    #[test]
    fn optional_drops_blank_strings() {
        assert_eq!(optional(Some("  ".into())), None);
        assert_eq!(optional(Some(" x ".into())), Some("x".into()));
    }
}
