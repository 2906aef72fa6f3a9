//! Field-level validation shared by the identity store and the API layer.

use std::str::FromStr;
use std::sync::LazyLock;

use bigdecimal::BigDecimal;
use regex::Regex;
use thiserror::Error;

pub const MIN_PASSWORD_LENGTH: usize = 5;
pub const MAX_FIELD_LENGTH: usize = 255;

/// Digits allowed in a recipe price, two of them after the decimal point.
pub const PRICE_MAX_DIGITS: u64 = 5;
pub const PRICE_DECIMAL_PLACES: i64 = 2;

static EMAIL_USER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[-!#$%&'*+/=?^_`{}|~0-9A-Za-z]+(\.[-!#$%&'*+/=?^_`{}|~0-9A-Za-z]+)*$")
        .expect("email user pattern is valid")
});

static EMAIL_DOMAIN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?\.)+[A-Za-z0-9-]{2,63}$")
        .expect("email domain pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EmailError {
    #[error("This field is required.")]
    Missing,

    #[error("Enter a valid email address.")]
    Invalid,
}

/// Validate an email address and return its canonical (trimmed, lowercased) form.
pub fn normalize_email(raw: Option<&str>) -> Result<String, EmailError> {
    let email = raw.map(str::trim).unwrap_or_default();
    if email.is_empty() {
        return Err(EmailError::Missing);
    }
    if email.len() > MAX_FIELD_LENGTH {
        return Err(EmailError::Invalid);
    }

    let (user, domain) = email.rsplit_once('@').ok_or(EmailError::Invalid)?;
    if !EMAIL_USER.is_match(user) {
        return Err(EmailError::Invalid);
    }
    if domain != "localhost" && !EMAIL_DOMAIN.is_match(domain) {
        return Err(EmailError::Invalid);
    }

    Ok(email.to_lowercase())
}

pub fn validate_password(password: &str) -> Result<(), String> {
    if password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(format!(
            "Ensure this field has at least {MIN_PASSWORD_LENGTH} characters."
        ));
    }
    Ok(())
}

/// Trim a required short text field, rejecting blank or oversized values.
pub fn required_text(value: &str) -> Result<&str, String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err("This field may not be blank.".to_string());
    }
    optional_text(trimmed)
}

pub fn optional_text(value: &str) -> Result<&str, String> {
    if value.chars().count() > MAX_FIELD_LENGTH {
        return Err(format!(
            "Ensure this field has no more than {MAX_FIELD_LENGTH} characters."
        ));
    }
    Ok(value)
}

/// Parse a price and check it fits `NUMERIC(5, 2)`.
pub fn parse_price(raw: &str) -> Result<BigDecimal, String> {
    let price = BigDecimal::from_str(raw.trim())
        .map_err(|_| "A valid number is required.".to_string())?;
    let normalized = price.normalized();

    let (_, scale) = normalized.as_bigint_and_exponent();
    if scale > PRICE_DECIMAL_PLACES {
        return Err(format!(
            "Ensure that there are no more than {PRICE_DECIMAL_PLACES} decimal places."
        ));
    }

    let whole_digits = normalized.digits() as i64 - scale;
    if whole_digits > (PRICE_MAX_DIGITS as i64 - PRICE_DECIMAL_PLACES) {
        return Err(format!(
            "Ensure that there are no more than {PRICE_MAX_DIGITS} digits in total."
        ));
    }

    Ok(price.with_scale(PRICE_DECIMAL_PLACES))
}

pub fn validate_time_minutes(minutes: i32) -> Result<i32, String> {
    if minutes < 0 {
        return Err("Ensure this value is greater than or equal to 0.".to_string());
    }
    Ok(minutes)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_is_lowercased() {
        assert_eq!(normalize_email(Some("A@B.COM")).unwrap(), "a@b.com");
        assert_eq!(
            normalize_email(Some("  Test1-Valid@Email.com ")).unwrap(),
            "test1-valid@email.com"
        );
    }

    #[test]
    fn test_email_normalization_is_idempotent() {
        let once = normalize_email(Some("MiXeD.Case@Example.ORG")).unwrap();
        let twice = normalize_email(Some(&once)).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_missing_email() {
        assert_eq!(normalize_email(None), Err(EmailError::Missing));
        assert_eq!(normalize_email(Some("")), Err(EmailError::Missing));
        assert_eq!(normalize_email(Some("   ")), Err(EmailError::Missing));
    }

    #[test]
    fn test_invalid_email() {
        for raw in [
            "not-an-email",
            "@example.com",
            "user@",
            "user@nodot",
            "two..dots@example.com",
            "user@-bad-.com",
            "spaces in@example.com",
        ] {
            assert_eq!(normalize_email(Some(raw)), Err(EmailError::Invalid), "{raw}");
        }
    }

    #[test]
    fn test_localhost_domain_allowed() {
        assert_eq!(normalize_email(Some("root@localhost")).unwrap(), "root@localhost");
    }

    #[test]
    fn test_password_min_length() {
        assert!(validate_password("pw").is_err());
        assert!(validate_password("1234").is_err());
        assert!(validate_password("12345").is_ok());
    }

    #[test]
    fn test_required_text() {
        assert_eq!(required_text("  Vegan "), Ok("Vegan"));
        assert!(required_text("").is_err());
        assert!(required_text("   ").is_err());
        assert!(required_text(&"x".repeat(256)).is_err());
        assert!(required_text(&"x".repeat(255)).is_ok());
    }

    #[test]
    fn test_price_parsing() {
        assert_eq!(parse_price("5").unwrap().to_string(), "5.00");
        assert_eq!(parse_price("5.5").unwrap().to_string(), "5.50");
        assert_eq!(parse_price("999.99").unwrap().to_string(), "999.99");
        assert_eq!(parse_price("10.00").unwrap().to_string(), "10.00");
    }

    #[test]
    fn test_price_rejects_out_of_range() {
        assert!(parse_price("1000").is_err());
        assert!(parse_price("1.234").is_err());
        assert!(parse_price("abc").is_err());
        assert!(parse_price("").is_err());
    }

    #[test]
    fn test_time_minutes() {
        assert_eq!(validate_time_minutes(0), Ok(0));
        assert!(validate_time_minutes(-1).is_err());
    }
}
