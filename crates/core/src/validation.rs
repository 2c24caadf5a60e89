//! Form validation run before any backend call.
//!
//! Each `*Input` mirrors a posted HTML form. `validate()` either returns the
//! exact request body to send, or a [`ValidationError`] whose `Display` text is
//! the message shown inline next to the form.

use serde::Deserialize;

use crate::types::{
    Email, EmailRule, LoginRequest, NewComplaint, NewFeedback, NewUser, Priority,
    RegisterRequest, Role, clamp_progress,
};
use crate::types::feedback::{MAX_RATING, MIN_RATING};
use crate::types::user::DEFAULT_DEPARTMENT;

/// Minimum password length for every password rule.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Client-side validation failures.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter email and password")]
    MissingCredentials,
    #[error("Please fill in all fields")]
    MissingFields,
    #[error("Please fill in all required fields")]
    MissingRequiredFields,
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Passwords do not match!")]
    PasswordMismatch,
    #[error("Password must be 8+ chars with upper, lower, number, and special")]
    WeakPassword,
    #[error("Password must be at least 8 characters long")]
    PasswordTooShort,
    #[error("Please choose a rating from 1 to 5")]
    InvalidRating,
    #[error("Please choose a priority")]
    InvalidPriority,
    #[error("Progress must be a number")]
    InvalidProgress,
}

/// 8+ characters with an upper, a lower, a digit and a special character,
/// and no whitespace.
#[must_use]
pub fn is_strong_password(password: &str) -> bool {
    password.chars().count() >= MIN_PASSWORD_LENGTH
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_digit())
        && password.chars().any(|c| !c.is_ascii_alphanumeric())
        && !password.chars().any(char::is_whitespace)
}

/// Parse the log-progress input and clamp it into `[0, 100]`.
///
/// Progress is a whole percent: decimals are rounded to the nearest integer
/// before clamping, so the result is `max(0, min(100, round(v)))`.
///
/// # Errors
///
/// Returns [`ValidationError::InvalidProgress`] when the input is not a number.
pub fn parse_progress(input: &str) -> Result<u8, ValidationError> {
    let input = input.trim();
    if let Ok(value) = input.parse::<i64>() {
        return Ok(clamp_progress(value));
    }

    let value = input
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or(ValidationError::InvalidProgress)?;
    // Float-to-int casts saturate, and clamping follows.
    #[allow(clippy::cast_possible_truncation)]
    let value = value.round() as i64;
    Ok(clamp_progress(value))
}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

/// Login form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginInput {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

impl LoginInput {
    /// # Errors
    ///
    /// [`ValidationError::MissingCredentials`] when either field is empty.
    pub fn validate(&self) -> Result<LoginRequest, ValidationError> {
        if is_blank(&self.email) || self.password.is_empty() {
            return Err(ValidationError::MissingCredentials);
        }
        Ok(LoginRequest {
            email: self.email.trim().to_owned(),
            password: self.password.clone(),
        })
    }
}

/// Self-registration form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegistrationInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub password_confirm: String,
    #[serde(default)]
    pub role: Role,
}

impl RegistrationInput {
    /// Checks run in this order: all fields present, email shape, passwords
    /// match, password strength.
    ///
    /// # Errors
    ///
    /// Returns the first failing check.
    pub fn validate(&self) -> Result<RegisterRequest, ValidationError> {
        if is_blank(&self.name)
            || is_blank(&self.email)
            || self.password.is_empty()
            || self.password_confirm.is_empty()
        {
            return Err(ValidationError::MissingFields);
        }

        let email = Email::parse_with(self.email.trim(), EmailRule::Registration)
            .map_err(|_| ValidationError::InvalidEmail)?;

        if self.password != self.password_confirm {
            return Err(ValidationError::PasswordMismatch);
        }

        if !is_strong_password(&self.password) {
            return Err(ValidationError::WeakPassword);
        }

        Ok(RegisterRequest {
            name: self.name.trim().to_owned(),
            email,
            password: self.password.clone(),
            role: self.role,
            department: self.role.registration_department().to_owned(),
        })
    }
}

/// Admin "create user" form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct NewUserInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub department: String,
}

impl NewUserInput {
    /// # Errors
    ///
    /// Returns the first failing check: required fields, email shape,
    /// password length.
    pub fn validate(&self) -> Result<NewUser, ValidationError> {
        if is_blank(&self.name) || is_blank(&self.email) || self.password.is_empty() {
            return Err(ValidationError::MissingRequiredFields);
        }

        let email =
            Email::parse(self.email.trim()).map_err(|_| ValidationError::InvalidEmail)?;

        if self.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(ValidationError::PasswordTooShort);
        }

        let department = if is_blank(&self.department) {
            DEFAULT_DEPARTMENT.to_owned()
        } else {
            self.department.trim().to_owned()
        };

        Ok(NewUser {
            name: self.name.trim().to_owned(),
            email,
            password: self.password.clone(),
            role: self.role,
            department,
        })
    }
}

/// Complaint submission form. Checkbox fields are absent when unticked.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ComplaintInput {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub priority: String,
    #[serde(default)]
    pub anonymous: Option<String>,
}

impl ComplaintInput {
    /// # Errors
    ///
    /// [`ValidationError::MissingRequiredFields`] when title, category,
    /// description or priority is empty; [`ValidationError::InvalidPriority`]
    /// for an unknown priority.
    pub fn validate(&self) -> Result<NewComplaint, ValidationError> {
        if is_blank(&self.title)
            || is_blank(&self.category)
            || is_blank(&self.description)
            || is_blank(&self.priority)
        {
            return Err(ValidationError::MissingRequiredFields);
        }

        let priority: Priority = self
            .priority
            .trim()
            .parse()
            .map_err(|_| ValidationError::InvalidPriority)?;

        Ok(NewComplaint {
            title: self.title.trim().to_owned(),
            description: self.description.trim().to_owned(),
            category: self.category.trim().to_owned(),
            priority,
            anonymous: self.anonymous.is_some(),
        })
    }
}

/// Feedback submission form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedbackInput {
    #[serde(default)]
    pub rating: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub comments: String,
}

impl FeedbackInput {
    /// # Errors
    ///
    /// [`ValidationError::InvalidRating`] unless the rating is 1-5;
    /// [`ValidationError::MissingRequiredFields`] when category or comments
    /// is empty.
    pub fn validate(&self) -> Result<NewFeedback, ValidationError> {
        let rating = self
            .rating
            .trim()
            .parse::<u8>()
            .ok()
            .filter(|r| (MIN_RATING..=MAX_RATING).contains(r))
            .ok_or(ValidationError::InvalidRating)?;

        if is_blank(&self.category) || is_blank(&self.comments) {
            return Err(ValidationError::MissingRequiredFields);
        }

        Ok(NewFeedback {
            rating,
            category: self.category.trim().to_owned(),
            comments: self.comments.trim().to_owned(),
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn registration(email: &str) -> RegistrationInput {
        RegistrationInput {
            name: "Ada Lovelace".to_string(),
            email: email.to_string(),
            password: "Str0ng!Pass".to_string(),
            password_confirm: "Str0ng!Pass".to_string(),
            role: Role::Customer,
        }
    }

    #[test]
    fn test_login_requires_both_fields() {
        let input = LoginInput {
            email: "ada@example.com".to_string(),
            password: String::new(),
        };
        assert_eq!(
            input.validate().unwrap_err(),
            ValidationError::MissingCredentials
        );
    }

    #[test]
    fn test_registration_bad_email_message() {
        let err = registration("bad-email").validate().unwrap_err();
        assert_eq!(err, ValidationError::InvalidEmail);
        assert_eq!(err.to_string(), "Please enter a valid email address");
    }

    #[test]
    fn test_registration_empty_field_checked_first() {
        let mut input = registration("bad-email");
        input.name = "  ".to_string();
        assert_eq!(input.validate().unwrap_err(), ValidationError::MissingFields);
    }

    #[test]
    fn test_registration_email_checked_before_mismatch() {
        let mut input = registration("bad-email");
        input.password_confirm = "different".to_string();
        assert_eq!(input.validate().unwrap_err(), ValidationError::InvalidEmail);
    }

    #[test]
    fn test_registration_password_mismatch() {
        let mut input = registration("ada@example.com");
        input.password_confirm = "Str0ng!Pas".to_string();
        let err = input.validate().unwrap_err();
        assert_eq!(err.to_string(), "Passwords do not match!");
    }

    #[test]
    fn test_registration_weak_password() {
        let mut input = registration("ada@example.com");
        input.password = "weakpass".to_string();
        input.password_confirm = "weakpass".to_string();
        assert_eq!(input.validate().unwrap_err(), ValidationError::WeakPassword);
    }

    #[test]
    fn test_registration_builds_request() {
        let mut input = registration("ada@example.com");
        input.role = Role::Admin;
        let request = input.validate().unwrap();
        assert_eq!(request.email.as_str(), "ada@example.com");
        assert_eq!(request.department, "Administration");
    }

    #[test]
    fn test_strong_password_rules() {
        assert!(is_strong_password("Str0ng!Pass"));
        assert!(!is_strong_password("Sh0rt!"));
        assert!(!is_strong_password("nouppercase1!"));
        assert!(!is_strong_password("NOLOWERCASE1!"));
        assert!(!is_strong_password("NoDigits!!"));
        assert!(!is_strong_password("NoSpecial12"));
        assert!(!is_strong_password("Has Space1!"));
    }

    #[test]
    fn test_new_user_validation_order() {
        let mut input = NewUserInput {
            name: "Sam".to_string(),
            email: "sam@example".to_string(),
            password: "short".to_string(),
            role: Role::Staff,
            department: String::new(),
        };
        assert_eq!(input.validate().unwrap_err(), ValidationError::InvalidEmail);

        input.email = "sam@example.com".to_string();
        let err = input.validate().unwrap_err();
        assert_eq!(err.to_string(), "Password must be at least 8 characters long");

        input.password = "longenough".to_string();
        let user = input.validate().unwrap();
        assert_eq!(user.department, "N/A");
    }

    #[test]
    fn test_new_user_missing_fields() {
        let input = NewUserInput::default();
        assert_eq!(
            input.validate().unwrap_err().to_string(),
            "Please fill in all required fields"
        );
    }

    #[test]
    fn test_parse_progress() {
        assert_eq!(parse_progress("55").unwrap(), 55);
        assert_eq!(parse_progress(" -10 ").unwrap(), 0);
        assert_eq!(parse_progress("180").unwrap(), 100);
        assert_eq!(parse_progress("42.9").unwrap(), 43);
        assert_eq!(parse_progress("42.4").unwrap(), 42);
        assert_eq!(parse_progress("100.4").unwrap(), 100);
        assert_eq!(parse_progress("-0.6").unwrap(), 0);
        assert_eq!(parse_progress("1e3").unwrap(), 100);
        assert_eq!(
            parse_progress("lots").unwrap_err(),
            ValidationError::InvalidProgress
        );
        assert_eq!(
            parse_progress("NaN").unwrap_err(),
            ValidationError::InvalidProgress
        );
    }

    #[test]
    fn test_complaint_input() {
        let input = ComplaintInput {
            title: "Broken item".to_string(),
            category: "Product".to_string(),
            description: "Arrived cracked".to_string(),
            priority: "high".to_string(),
            anonymous: Some("on".to_string()),
        };
        let complaint = input.validate().unwrap();
        assert_eq!(complaint.priority, Priority::High);
        assert!(complaint.anonymous);

        let missing = ComplaintInput {
            priority: String::new(),
            ..input
        };
        assert_eq!(
            missing.validate().unwrap_err(),
            ValidationError::MissingRequiredFields
        );
    }

    #[test]
    fn test_feedback_input_rating_range() {
        let mut input = FeedbackInput {
            rating: "6".to_string(),
            category: "Service".to_string(),
            comments: "Fine".to_string(),
        };
        assert_eq!(input.validate().unwrap_err(), ValidationError::InvalidRating);

        input.rating = "4".to_string();
        assert_eq!(input.validate().unwrap().rating, 4);
    }
}
