//! Field validation for user-submitted data.
//!
//! Bounds match the persistent schema: titles and headlines cap at 128
//! characters, descriptions at 2048, review bodies at 8192, and ratings
//! must lie in `[0, 5]`. Lengths are counted in characters, not bytes.

use crate::error::{DomainError, Result};

/// Maximum length of a ticket title.
pub const TITLE_MAX_LEN: usize = 128;
/// Maximum length of a ticket description.
pub const DESCRIPTION_MAX_LEN: usize = 2048;
/// Maximum length of a review headline.
pub const HEADLINE_MAX_LEN: usize = 128;
/// Maximum length of a review body.
pub const BODY_MAX_LEN: usize = 8192;
/// Minimum rating value.
pub const RATING_MIN: i16 = 0;
/// Maximum rating value.
pub const RATING_MAX: i16 = 5;
/// Maximum length of a username.
pub const USERNAME_MAX_LEN: usize = 150;
/// Minimum length of a password.
pub const PASSWORD_MIN_LEN: usize = 8;

fn check_required(field: &'static str, value: &str, max: usize) -> Result<()> {
    if value.trim().is_empty() {
        return Err(DomainError::Validation(format!("{field} must not be empty")));
    }
    check_optional(field, value, max)
}

fn check_optional(field: &'static str, value: &str, max: usize) -> Result<()> {
    let len = value.chars().count();
    if len > max {
        return Err(DomainError::Validation(format!(
            "{field} exceeds {max} characters (got {len})"
        )));
    }
    Ok(())
}

/// Validate the user-submitted fields of a ticket.
///
/// # Errors
///
/// Returns [`DomainError::Validation`] if the title is empty or over 128
/// characters, or the description is over 2048 characters.
pub fn validate_ticket(title: &str, description: Option<&str>) -> Result<()> {
    check_required("title", title, TITLE_MAX_LEN)?;
    if let Some(description) = description {
        check_optional("description", description, DESCRIPTION_MAX_LEN)?;
    }
    Ok(())
}

/// Validate the user-submitted fields of a review.
///
/// # Errors
///
/// Returns [`DomainError::Validation`] if the rating is outside `[0, 5]`,
/// the headline is empty or over 128 characters, or the body is over 8192
/// characters.
pub fn validate_review(rating: i16, headline: &str, body: Option<&str>) -> Result<()> {
    if !(RATING_MIN..=RATING_MAX).contains(&rating) {
        return Err(DomainError::Validation(format!(
            "rating must be between {RATING_MIN} and {RATING_MAX} (got {rating})"
        )));
    }
    check_required("headline", headline, HEADLINE_MAX_LEN)?;
    if let Some(body) = body {
        check_optional("body", body, BODY_MAX_LEN)?;
    }
    Ok(())
}

/// Validate a username at signup.
///
/// # Errors
///
/// Returns [`DomainError::Validation`] if the username is empty, over 150
/// characters, or contains whitespace.
pub fn validate_username(username: &str) -> Result<()> {
    check_required("username", username, USERNAME_MAX_LEN)?;
    if username.chars().any(char::is_whitespace) {
        return Err(DomainError::Validation(
            "username must not contain whitespace".to_string(),
        ));
    }
    Ok(())
}

/// Validate a password at signup.
///
/// # Errors
///
/// Returns [`DomainError::Validation`] if the password is shorter than 8
/// characters.
pub fn validate_password(password: &str) -> Result<()> {
    if password.chars().count() < PASSWORD_MIN_LEN {
        return Err(DomainError::Validation(format!(
            "password must be at least {PASSWORD_MIN_LEN} characters"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticket_title_bounds() {
        assert!(validate_ticket("Dune", None).is_ok());
        assert!(validate_ticket("", None).is_err());
        assert!(validate_ticket("   ", None).is_err());
        assert!(validate_ticket(&"x".repeat(TITLE_MAX_LEN), None).is_ok());
        assert!(validate_ticket(&"x".repeat(TITLE_MAX_LEN + 1), None).is_err());
    }

    #[test]
    fn test_ticket_description_optional() {
        assert!(validate_ticket("Dune", Some(&"d".repeat(DESCRIPTION_MAX_LEN))).is_ok());
        assert!(validate_ticket("Dune", Some(&"d".repeat(DESCRIPTION_MAX_LEN + 1))).is_err());
        // An empty description is allowed; only presence is optional.
        assert!(validate_ticket("Dune", Some("")).is_ok());
    }

    #[test]
    fn test_rating_range() {
        for rating in 0..=5 {
            assert!(validate_review(rating, "Fine", None).is_ok(), "rating {rating}");
        }
        assert!(validate_review(-1, "Fine", None).is_err());
        assert!(validate_review(6, "Fine", None).is_err());
    }

    #[test]
    fn test_review_text_bounds() {
        assert!(validate_review(3, &"h".repeat(HEADLINE_MAX_LEN), None).is_ok());
        assert!(validate_review(3, &"h".repeat(HEADLINE_MAX_LEN + 1), None).is_err());
        assert!(validate_review(3, "Fine", Some(&"b".repeat(BODY_MAX_LEN))).is_ok());
        assert!(validate_review(3, "Fine", Some(&"b".repeat(BODY_MAX_LEN + 1))).is_err());
    }

    #[test]
    fn test_lengths_count_characters_not_bytes() {
        // 128 multi-byte characters fit even though the byte length exceeds 128.
        let title = "é".repeat(TITLE_MAX_LEN);
        assert!(title.len() > TITLE_MAX_LEN);
        assert!(validate_ticket(&title, None).is_ok());
    }

    #[test]
    fn test_username_rules() {
        assert!(validate_username("ursula").is_ok());
        assert!(validate_username("").is_err());
        assert!(validate_username("two words").is_err());
        assert!(validate_username(&"u".repeat(USERNAME_MAX_LEN + 1)).is_err());
    }

    #[test]
    fn test_password_minimum_length() {
        assert!(validate_password("short").is_err());
        assert!(validate_password("longenough").is_ok());
    }
}
